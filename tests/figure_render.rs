//! End-to-end figure rendering tests.
//!
//! Each test renders a complete figure and checks the produced grid
//! character by character, so axis fitting, tick selection, label layout,
//! and command replay are all exercised together.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use termviz::prelude::*;

/// Rendered output as an indexable grid of characters.
fn grid(rendered: &str) -> Vec<Vec<char>> {
    rendered.lines().map(|line| line.chars().collect()).collect()
}

fn series(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

// ============================================================================
// Scatter geometry
// ============================================================================

/// A 10-point diagonal on the default 80x24 grid lands on known cells.
#[test]
fn test_scatter_diagonal_marker_positions() {
    let mut fig = Figure::builder().width(80).height(24).build().unwrap();
    fig.scatter(&series(10), &series(10), Style::new()).unwrap();
    let rows = grid(&fig.render().unwrap());

    let expected = [
        (3, 79),
        (5, 71),
        (7, 62),
        (9, 54),
        (11, 45),
        (13, 37),
        (15, 28),
        (17, 20),
        (19, 11),
        (21, 3),
    ];
    for &(row, col) in &expected {
        assert_eq!(rows[row][col], '•', "expected marker at ({row}, {col})");
    }
    let markers: usize =
        rows.iter().map(|row| row.iter().filter(|&&c| c == '•').count()).sum();
    assert_eq!(markers, 10);
}

/// The same figure renders to an identical string on repeated calls.
#[test]
fn test_render_is_idempotent() {
    let mut fig = Figure::builder().width(60).height(20).title("waves").build().unwrap();
    let y: Vec<f64> = (0..30).map(|i| f64::from(i).sin()).collect();
    fig.line_indexed(&y, Style::new().color(Color::Cyan)).unwrap();
    let first = fig.render().unwrap();
    assert_eq!(fig.render().unwrap(), first);
}

/// Every rendered row spans exactly the configured width.
#[test]
fn test_output_dimensions_match_configuration() {
    let mut fig = Figure::builder().width(44).height(17).build().unwrap();
    fig.scatter_indexed(&[5.0, 2.0, 9.0], Style::new()).unwrap();
    let rows = grid(&fig.render().unwrap());
    assert_eq!(rows.len(), 17);
    for row in &rows {
        assert_eq!(row.len(), 44);
    }
}

// ============================================================================
// Axes and labels
// ============================================================================

/// Title is centered on the top row; axis labels appear on their edges.
#[test]
fn test_title_and_axis_labels() {
    let mut fig = Figure::builder()
        .width(60)
        .height(20)
        .title("sales")
        .xlabel("month")
        .ylabel("units")
        .build()
        .unwrap();
    fig.bar_indexed(&[3.0, 7.0, 5.0], Style::new()).unwrap();
    let rendered = fig.render().unwrap();
    let rows = grid(&rendered);

    let top: String = rows[0].iter().collect();
    assert!(top.trim() == "sales");
    let bottom: String = rows[19].iter().collect();
    assert!(bottom.contains("month"));
    let left_column: String = rows.iter().map(|row| row[0]).collect();
    assert!(left_column.contains("units"));
}

/// Numeric tick labels use up to three significant digits.
#[test]
fn test_tick_label_formatting() {
    let mut fig = Figure::builder().width(70).height(20).build().unwrap();
    fig.scatter(&[0.0, 1_000_000.0], &[0.0, 0.125], Style::new()).unwrap();
    let rendered = fig.render().unwrap();
    assert!(rendered.contains("1e+06"));
    assert!(!rendered.contains("1000000"));
}

// ============================================================================
// Bars
// ============================================================================

/// Bars straddling zero grow from the zero tick, not the data minimum.
#[test]
fn test_bar_zero_origin() {
    let mut fig = Figure::builder().width(40).height(12).build().unwrap();
    fig.bar(&[0.0, 1.0], &[-3.0, 5.0], Style::new()).unwrap();
    let rows = grid(&fig.render().unwrap());

    // y ticks are [-5, 0, 5] on rows 9, 5, 1; x values 0 and 1 land on
    // columns 3 and 39
    assert_eq!(rows[5][3], '█');
    assert_eq!(rows[7][3], '█');
    assert_ne!(rows[8][3], '█');
    assert_ne!(rows[4][3], '█');
    assert_eq!(rows[1][39], '█');
    assert_eq!(rows[5][39], '█');
    assert_ne!(rows[6][39], '█');
}

/// Horizontal bars against categorical y values label every row.
#[test]
fn test_hbar_categorical_rows() {
    let mut fig = Figure::builder().width(40).height(10).build().unwrap();
    fig.hbar(&[3.0, 8.0], &["ale", "stout"], Style::new()).unwrap();
    let rendered = fig.render().unwrap();
    assert!(rendered.contains("ale"));
    assert!(rendered.contains("stout"));
    assert!(rendered.contains('█'));
}

// ============================================================================
// Braille and text
// ============================================================================

/// Line plots default to braille sub-cell rendering.
#[test]
fn test_line_renders_braille_cells() {
    let mut fig = Figure::builder().width(60).height(20).build().unwrap();
    fig.line_indexed(&[0.0, 3.0, 1.0, 4.0, 2.0], Style::new()).unwrap();
    let rendered = fig.render().unwrap();
    assert!(rendered.chars().any(|c| ('\u{2800}'..='\u{28ff}').contains(&c)));
}

/// Text is placed at its data coordinate and truncated at the right edge.
#[test]
fn test_text_truncates_at_canvas_edge() {
    let mut fig = Figure::builder().width(30).height(10).build().unwrap();
    fig.scatter(&[0.0, 10.0], &[0.0, 10.0], Style::new()).unwrap();
    fig.text(5.0, 5.0, "annotation that runs long", None);
    let rendered = fig.render().unwrap();
    assert!(rendered.contains("annotation"));
    assert!(!rendered.contains("long"));
    for line in rendered.lines() {
        assert!(line.chars().count() <= 30);
    }
}

// ============================================================================
// Legend
// ============================================================================

/// The legend box is anchored to the top-right tick corner with the
/// marker inside.
#[test]
fn test_legend_box_top_right() {
    let mut fig = Figure::builder().width(80).height(24).build().unwrap();
    fig.scatter(&series(10), &series(10), Style::new().label("data")).unwrap();
    let rows = grid(&fig.render().unwrap());

    let header: String = rows[1][72..80].iter().collect();
    assert_eq!(header, "┌Legend┐");
    let entry: String = rows[2][72..80].iter().collect();
    assert_eq!(entry, "│• data│");
    let footer: String = rows[3][72..80].iter().collect();
    assert_eq!(footer, "└──────┘");
}

/// Legend entries keep insertion order.
#[test]
fn test_legend_entry_order() {
    let mut fig = Figure::builder().width(60).height(20).build().unwrap();
    fig.scatter_indexed(&[1.0, 2.0], Style::new().label("first")).unwrap();
    fig.line_indexed(&[2.0, 1.0], Style::new().label("second")).unwrap();
    let rendered = fig.render().unwrap();
    let first = rendered.find("first").unwrap();
    let second = rendered.find("second").unwrap();
    assert!(first < second);
}

// ============================================================================
// ASCII-only mode
// ============================================================================

/// Forced ASCII output contains no characters above 0x7f.
#[test]
fn test_ascii_only_output_is_pure_ascii() {
    let mut fig = Figure::builder()
        .width(60)
        .height(20)
        .ascii_only(true)
        .build()
        .unwrap();
    fig.scatter_indexed(&[1.0, 4.0, 2.0], Style::new().label("pts")).unwrap();
    fig.line_indexed(&[2.0, 3.0, 1.0], Style::new().color(Color::Green)).unwrap();
    fig.bar_indexed(&[1.0, 2.0], Style::new()).unwrap();
    let rendered = fig.render().unwrap();
    assert!(rendered.is_ascii());
    // colors are suppressed along with unicode
    assert!(!rendered.contains('\u{1b}'));
    assert!(rendered.contains('*'));
    assert!(rendered.contains('#'));
}

// ============================================================================
// Images
// ============================================================================

/// Images render with the y axis pointing down by default.
#[test]
fn test_image_downward_orientation() {
    let raster = Raster::from_bytes(&[vec![0, 255], vec![255, 0]]).unwrap();
    let mut fig = Figure::builder().width(30).height(14).build().unwrap();
    fig.image(raster, None, None, GlyphRamp::Block);
    let rows = grid(&fig.render().unwrap());

    let shaded: Vec<(usize, usize)> = rows
        .iter()
        .enumerate()
        .flat_map(|(r, row)| {
            row.iter().enumerate().filter(|(_, &c)| c == '█').map(move |(c, _)| (r, c))
        })
        .collect();
    assert!(!shaded.is_empty());
    let (top_row, top_col) = shaded[0];
    let (bottom_row, bottom_col) = shaded[shaded.len() - 1];
    // raster row 0 is light-dark, row 1 dark-light; downward y puts row 0
    // on top, so the upper shading sits right of the lower shading
    assert!(top_row < bottom_row);
    assert!(top_col > bottom_col);
}

/// Forcing the y axis up flips the image vertically.
#[test]
fn test_image_respects_upward_override() {
    let raster = Raster::from_bytes(&[vec![0, 255], vec![255, 0]]).unwrap();
    let mut fig = Figure::builder()
        .width(30)
        .height(14)
        .y_axis_direction(YAxisDirection::Up)
        .build()
        .unwrap();
    fig.image(raster, None, None, GlyphRamp::Block);
    let rows = grid(&fig.render().unwrap());

    let shaded: Vec<(usize, usize)> = rows
        .iter()
        .enumerate()
        .flat_map(|(r, row)| {
            row.iter().enumerate().filter(|(_, &c)| c == '█').map(move |(c, _)| (r, c))
        })
        .collect();
    assert!(!shaded.is_empty());
    let (top_row, top_col) = shaded[0];
    let (bottom_row, bottom_col) = shaded[shaded.len() - 1];
    assert!(top_row < bottom_row);
    assert!(top_col < bottom_col);
}

// ============================================================================
// Failure modes
// ============================================================================

/// A figure too small for its axes fails whole, never partially.
#[test]
fn test_tiny_figure_fails_without_partial_output() {
    let mut fig = Figure::builder().width(1).height(1).build().unwrap();
    fig.scatter_indexed(&[1.0, 2.0], Style::new()).unwrap();
    assert!(matches!(fig.render(), Err(Error::OutOfBounds { .. })));
}

/// More categories than rows is reported, not clipped.
#[test]
fn test_categorical_overflow_is_an_error() {
    let mut fig = Figure::builder().width(40).height(5).build().unwrap();
    let names: Vec<String> = (0..8).map(|i| format!("series-{i}")).collect();
    fig.hbar(&series(8), &names, Style::new()).unwrap();
    assert!(matches!(fig.render(), Err(Error::CategoryOverflow { categories: 8, .. })));
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Any numeric scatter on a reasonable grid renders deterministically
    /// inside its configured bounds.
    #[test]
    fn prop_numeric_scatter_renders_in_bounds(
        values in proptest::collection::vec(-100.0f64..100.0, 1..20),
    ) {
        let mut fig = Figure::builder().width(40).height(20).build().unwrap();
        fig.scatter_indexed(&values, Style::new()).unwrap();
        let first = fig.render().unwrap();
        prop_assert_eq!(&fig.render().unwrap(), &first);
        let rows: Vec<&str> = first.lines().collect();
        prop_assert_eq!(rows.len(), 20);
        for row in rows {
            prop_assert_eq!(row.chars().count(), 40);
        }
    }
}
