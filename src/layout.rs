//! Collision-free placement of x-axis tick labels.
//!
//! Models the labels as movable intervals connected by 1-D spring forces:
//! overlapping neighbors repel each other, the figure boundaries push
//! protruding labels back inside, and every interval stays anchored to its
//! own tick column. The simulation is iterated until the total force is
//! stable, then the intervals are rounded and clipped to hard limits.

use crate::render::round_half_away;

const MARGIN: f64 = 2.0;
const STEP_SIZE: f64 = 0.3;
const TOLERANCE: f64 = 0.3;
const MAX_ITERATIONS: usize = 1000;

/// Compute non-overlapping `[start, end)` column spans for tick labels.
///
/// `tick_positions` are ascending grid columns, one per label. Spans are
/// clipped to `[0, width)` and never cross a neighboring tick's column. When
/// the relaxation hits its iteration cap, a warning is emitted and the
/// best-effort placement is returned.
#[must_use]
pub fn solve_label_spans(
    tick_positions: &[i64],
    labels: &[String],
    width: usize,
) -> Vec<(usize, usize)> {
    debug_assert_eq!(tick_positions.len(), labels.len());
    let widths: Vec<i64> = labels.iter().map(|l| l.chars().count() as i64).collect();

    let mut anchors: Vec<[f64; 2]> = tick_positions
        .iter()
        .zip(&widths)
        .map(|(&tick, &len)| {
            let mut left = tick - len / 2;
            let mut right = left + len;
            let overshoot = right - width as i64;
            if overshoot > 0 {
                left -= overshoot;
                right -= overshoot;
            }
            [left as f64, right as f64]
        })
        .collect();

    let mut forces = spring_forces(&anchors, width as f64);
    let mut total: f64 = forces.iter().map(|f| f.abs()).sum();
    if total != 0.0 {
        let mut prev_total = f64::INFINITY;
        let mut iterations = 0;
        while (total - prev_total).abs() > TOLERANCE {
            for ((anchor, force), &tick) in anchors.iter_mut().zip(&forces).zip(tick_positions) {
                anchor[0] += force * STEP_SIZE;
                anchor[1] += force * STEP_SIZE;
                // neither edge may move past the tick the label is anchored to
                if round_half_away(anchor[0]) > tick {
                    let d = (round_half_away(anchor[0]) - tick) as f64;
                    anchor[0] -= d;
                    anchor[1] -= d;
                } else if round_half_away(anchor[1]) - 1 < tick {
                    let d = (tick - round_half_away(anchor[1]) + 1) as f64;
                    anchor[0] += d;
                    anchor[1] += d;
                }
            }
            prev_total = forces.iter().map(|f| f.abs()).sum();
            forces = spring_forces(&anchors, width as f64);
            total = forces.iter().map(|f| f.abs()).sum();
            iterations += 1;
            if iterations >= MAX_ITERATIONS {
                tracing::warn!(
                    max_iterations = MAX_ITERATIONS,
                    "x tick label placement did not stabilize, using best effort"
                );
                break;
            }
        }
    }

    let mut spans: Vec<[i64; 2]> = anchors
        .iter()
        .zip(&widths)
        .map(|(anchor, &len)| {
            let start = round_half_away(anchor[0]);
            [start, start + len]
        })
        .collect();
    // hard limits, independent of the simulation
    for span in &mut spans {
        span[0] = span[0].max(0);
        span[1] = span[1].min(width as i64);
    }
    for i in 0..spans.len() {
        if i > 0 {
            spans[i][0] = spans[i][0].max(tick_positions[i - 1] + 1);
        }
        if i + 1 < spans.len() {
            spans[i][1] = spans[i][1].min(tick_positions[i + 1]);
        }
    }
    spans.iter().map(|span| (span[0] as usize, span[1].max(span[0]) as usize)).collect()
}

fn spring_forces(anchors: &[[f64; 2]], width: f64) -> Vec<f64> {
    let mut forces = vec![0.0; anchors.len()];
    // forces between labels
    for i in 0..anchors.len() - 1 {
        let overlap = (anchors[i][1] + MARGIN - anchors[i + 1][0]).max(0.0);
        forces[i] -= overlap;
        forces[i + 1] += overlap;
    }
    // figure boundary forces
    forces[0] -= anchors[0][0].min(0.0);
    if let Some(last) = forces.last_mut() {
        *last -= (anchors[anchors.len() - 1][1] - width).max(0.0);
    }
    forces
}
