//! Figure orchestration: deferred draw commands, axis layout, and rendering.
//!
//! A [`Figure`] queues plot commands instead of drawing them immediately,
//! because axis geometry depends on all of the data: the y-axis width
//! depends on the tick label text, and the scales depend on the axis
//! extents. `render` fits everything from the queue, draws axes, replays
//! the commands against the fitted scales, and draws the legend last so it
//! overlays data.

use crate::braille;
use crate::canvas::Canvas;
use crate::color::Color;
use crate::error::{Error, Result};
use crate::image::{GlyphRamp, Raster};
use crate::layout::solve_label_spans;
use crate::render::{round_half_away, LineSegment};
use crate::scale::{AxisScale, CategoricalScale, Datum, LinearScale};
use crate::term;
use crate::ticks::{best_ticks, format_tick};

/// How plot points are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// A literal character per point.
    Literal(char),
    /// Braille sub-cell dots, four rows by two columns per character cell.
    Braille,
}

/// Corner of the plotting area a legend box anchors to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendLocation {
    /// Top-left corner.
    TopLeft,
    /// Top-right corner.
    #[default]
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom-right corner.
    BottomRight,
}

/// Which way the y axis points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YAxisDirection {
    /// Downward when an image command is queued, upward otherwise.
    #[default]
    Auto,
    /// Row zero holds the largest y value, conventional for graphs.
    Up,
    /// Row zero holds the smallest y value, conventional for images.
    Down,
}

/// Per-command styling: marker, color, and legend label.
#[derive(Debug, Clone, Default)]
pub struct Style {
    marker: Option<Marker>,
    color: Option<Color>,
    label: Option<String>,
}

impl Style {
    /// Default style: the plot kind's own marker, no color, no label.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `marker` instead of the plot kind's default.
    #[must_use]
    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }

    /// Draw in `color`.
    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Add a legend entry for this command.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[derive(Debug, Clone)]
enum CommandKind {
    Scatter { marker: char, braille: bool },
    Line { marker: char, braille: bool },
    Bar { marker: char },
    HBar { marker: char },
    Text { text: String },
    Image { raster: Raster, vmin: f64, vmax: f64, ramp: GlyphRamp },
}

#[derive(Debug, Clone)]
struct DrawCommand {
    x: Vec<Datum>,
    y: Vec<Datum>,
    color: Option<Color>,
    kind: CommandKind,
}

/// Tick values selected for one axis.
#[derive(Debug, Clone, PartialEq)]
enum Ticks {
    Numeric(Vec<f64>),
    Categorical(Vec<String>),
}

impl Ticks {
    fn labels(&self) -> Vec<String> {
        match self {
            Self::Numeric(values) => values.iter().map(|&v| format_tick(v)).collect(),
            Self::Categorical(values) => values.clone(),
        }
    }

    fn data(&self) -> Vec<Datum> {
        match self {
            Self::Numeric(values) => values.iter().map(|&v| Datum::Number(v)).collect(),
            Self::Categorical(values) => {
                values.iter().map(|v| Datum::Category(v.clone())).collect()
            }
        }
    }

    fn first(&self) -> Datum {
        match self {
            Self::Numeric(values) => Datum::Number(values[0]),
            Self::Categorical(values) => Datum::Category(values[0].clone()),
        }
    }

    fn last(&self) -> Datum {
        match self {
            Self::Numeric(values) => Datum::Number(values[values.len() - 1]),
            Self::Categorical(values) => Datum::Category(values[values.len() - 1].clone()),
        }
    }
}

/// Everything `render` derives from the queue, memoized per revision.
#[derive(Debug, Clone)]
struct Layout {
    xticks: Ticks,
    yticks: Ticks,
    yax_width: i64,
    xscale: AxisScale,
    yscale: AxisScale,
    down: bool,
}

/// Builder for [`Figure`] geometry and behavior.
///
/// Width and height default to the detected terminal size (one row is kept
/// for the prompt), falling back to 80 by 24 when detection fails.
#[derive(Debug, Clone, Default)]
pub struct FigureBuilder {
    width: Option<usize>,
    height: Option<usize>,
    xlabel: Option<String>,
    ylabel: Option<String>,
    title: Option<String>,
    legend_location: LegendLocation,
    ascii_only: bool,
    y_direction: YAxisDirection,
}

impl FigureBuilder {
    /// Figure width in character columns.
    #[must_use]
    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Figure height in character rows.
    #[must_use]
    pub fn height(mut self, height: usize) -> Self {
        self.height = Some(height);
        self
    }

    /// Label drawn under the x axis.
    #[must_use]
    pub fn xlabel(mut self, label: impl Into<String>) -> Self {
        self.xlabel = Some(label.into());
        self
    }

    /// Label drawn beside the y axis.
    #[must_use]
    pub fn ylabel(mut self, label: impl Into<String>) -> Self {
        self.ylabel = Some(label.into());
        self
    }

    /// Title centered on the top row.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Corner the legend box anchors to.
    #[must_use]
    pub fn legend_location(mut self, location: LegendLocation) -> Self {
        self.legend_location = location;
        self
    }

    /// Restrict output to ASCII characters and disable colors.
    ///
    /// Also forced on when the terminal locale does not advertise UTF-8.
    #[must_use]
    pub fn ascii_only(mut self, ascii_only: bool) -> Self {
        self.ascii_only = ascii_only;
        self
    }

    /// Which way the y axis points.
    #[must_use]
    pub fn y_axis_direction(mut self, direction: YAxisDirection) -> Self {
        self.y_direction = direction;
        self
    }

    /// Validate and construct the [`Figure`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] when width or height is zero.
    pub fn build(self) -> Result<Figure> {
        let (term_width, term_height) = term::size();
        let width = self.width.unwrap_or(term_width);
        // keep a row for the shell prompt when sizing from the terminal
        let height = self.height.unwrap_or_else(|| term_height.saturating_sub(1));
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Figure {
            width,
            height,
            xlabel: self.xlabel,
            ylabel: self.ylabel,
            title: self.title,
            legend_location: self.legend_location,
            ascii_only: self.ascii_only || !term::unicode_supported(),
            y_direction: self.y_direction,
            commands: Vec::new(),
            legend: Vec::new(),
            revision: 0,
            cache: None,
        })
    }
}

/// A figure that renders queued plot commands to a string.
#[derive(Debug, Clone)]
pub struct Figure {
    width: usize,
    height: usize,
    xlabel: Option<String>,
    ylabel: Option<String>,
    title: Option<String>,
    legend_location: LegendLocation,
    ascii_only: bool,
    y_direction: YAxisDirection,
    commands: Vec<DrawCommand>,
    legend: Vec<(char, Option<Color>, String)>,
    revision: u64,
    cache: Option<(u64, Layout)>,
}

impl Figure {
    /// Start configuring a figure.
    #[must_use]
    pub fn builder() -> FigureBuilder {
        FigureBuilder::default()
    }

    /// Figure width in character columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Figure height in character rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Queue a scatter plot of `y` against `x`.
    ///
    /// The default marker is `•`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] when either series is empty and
    /// [`Error::DataLengthMismatch`] when their lengths differ.
    pub fn scatter<X, Y>(&mut self, x: &[X], y: &[Y], style: Style) -> Result<()>
    where
        X: Clone + Into<Datum>,
        Y: Clone + Into<Datum>,
    {
        let (x, y) = series(x, y)?;
        let (marker, is_braille) = self.resolve_marker(style.marker.unwrap_or(Marker::Literal('•')));
        self.register_label(marker, &style);
        self.push(DrawCommand {
            x,
            y,
            color: style.color,
            kind: CommandKind::Scatter { marker, braille: is_braille },
        });
        Ok(())
    }

    /// Queue a scatter plot of `y` against its indices `0..len`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] when `y` is empty.
    pub fn scatter_indexed<Y>(&mut self, y: &[Y], style: Style) -> Result<()>
    where
        Y: Clone + Into<Datum>,
    {
        self.scatter(&indices(y.len()), y, style)
    }

    /// Queue a line plot connecting consecutive points.
    ///
    /// The default marker is braille.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] when either series is empty and
    /// [`Error::DataLengthMismatch`] when their lengths differ.
    pub fn line<X, Y>(&mut self, x: &[X], y: &[Y], style: Style) -> Result<()>
    where
        X: Clone + Into<Datum>,
        Y: Clone + Into<Datum>,
    {
        let (x, y) = series(x, y)?;
        let (marker, is_braille) = self.resolve_marker(style.marker.unwrap_or(Marker::Braille));
        self.register_label(marker, &style);
        self.push(DrawCommand {
            x,
            y,
            color: style.color,
            kind: CommandKind::Line { marker, braille: is_braille },
        });
        Ok(())
    }

    /// Queue a line plot of `y` against its indices `0..len`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] when `y` is empty.
    pub fn line_indexed<Y>(&mut self, y: &[Y], style: Style) -> Result<()>
    where
        Y: Clone + Into<Datum>,
    {
        self.line(&indices(y.len()), y, style)
    }

    /// Queue vertical bars from the y origin tick to each y value.
    ///
    /// The default marker is `█`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] when either series is empty and
    /// [`Error::DataLengthMismatch`] when their lengths differ.
    pub fn bar<X, Y>(&mut self, x: &[X], y: &[Y], style: Style) -> Result<()>
    where
        X: Clone + Into<Datum>,
        Y: Clone + Into<Datum>,
    {
        let (x, y) = series(x, y)?;
        let (marker, _) = self.resolve_marker(style.marker.unwrap_or(Marker::Literal('█')));
        self.register_label(marker, &style);
        self.push(DrawCommand { x, y, color: style.color, kind: CommandKind::Bar { marker } });
        Ok(())
    }

    /// Queue vertical bars for `y` against its indices `0..len`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] when `y` is empty.
    pub fn bar_indexed<Y>(&mut self, y: &[Y], style: Style) -> Result<()>
    where
        Y: Clone + Into<Datum>,
    {
        self.bar(&indices(y.len()), y, style)
    }

    /// Queue horizontal bars from the x origin tick to each x value.
    ///
    /// The default marker is `█`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] when either series is empty and
    /// [`Error::DataLengthMismatch`] when their lengths differ.
    pub fn hbar<X, Y>(&mut self, x: &[X], y: &[Y], style: Style) -> Result<()>
    where
        X: Clone + Into<Datum>,
        Y: Clone + Into<Datum>,
    {
        let (x, y) = series(x, y)?;
        let (marker, _) = self.resolve_marker(style.marker.unwrap_or(Marker::Literal('█')));
        self.register_label(marker, &style);
        self.push(DrawCommand { x, y, color: style.color, kind: CommandKind::HBar { marker } });
        Ok(())
    }

    /// Queue horizontal bars for `x` against indices `0..len` on the y axis.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] when `x` is empty.
    pub fn hbar_indexed<X>(&mut self, x: &[X], style: Style) -> Result<()>
    where
        X: Clone + Into<Datum>,
    {
        let y = indices(x.len());
        self.hbar(x, &y, style)
    }

    /// Queue left-aligned text at a data coordinate.
    ///
    /// The coordinate participates in scale fitting like any data point;
    /// text running past the right canvas edge is truncated.
    pub fn text(
        &mut self,
        x: impl Into<Datum>,
        y: impl Into<Datum>,
        text: impl Into<String>,
        color: Option<Color>,
    ) {
        self.push(DrawCommand {
            x: vec![x.into()],
            y: vec![y.into()],
            color,
            kind: CommandKind::Text { text: text.into() },
        });
    }

    /// Queue an image drawn from `raster`.
    ///
    /// `vmin`/`vmax` default to the raster's value range; values outside are
    /// clipped. Queuing an image makes an `Auto` y axis point down.
    pub fn image(&mut self, raster: Raster, vmin: Option<f64>, vmax: Option<f64>, ramp: GlyphRamp) {
        let (range_min, range_max) = raster.value_range();
        let ramp = if self.ascii_only { GlyphRamp::Ascii } else { ramp };
        let x = indices(raster.cols() + 1);
        let y = indices(raster.rows() + 1);
        self.push(DrawCommand {
            x,
            y,
            color: None,
            kind: CommandKind::Image {
                raster,
                vmin: vmin.unwrap_or(range_min),
                vmax: vmax.unwrap_or(range_max),
                ramp,
            },
        });
    }

    /// Drop all queued commands and legend entries.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.legend.clear();
        self.revision += 1;
    }

    /// Render the queued commands to a string without trailing newline.
    ///
    /// Rendering twice without queue mutation yields identical strings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] when nothing is queued,
    /// [`Error::CategoryOverflow`] when categorical y values outnumber the
    /// available rows, and [`Error::OutOfBounds`] when any draw position
    /// falls outside the grid; no partial output is produced.
    pub fn render(&mut self) -> Result<String> {
        let layout = self.layout()?;
        let mut canvas = Canvas::new(self.width, self.height);

        if let Some(title) = &self.title {
            let title: String = title.chars().take(self.width).collect();
            let col = (self.width - title.chars().count()) / 2;
            canvas.put_text(0, col as i64, &title, None)?;
        }
        self.draw_x_axis(&mut canvas, &layout)?;
        self.draw_y_axis(&mut canvas, &layout)?;
        for command in &self.commands {
            self.draw_command(&mut canvas, &layout, command)?;
        }
        if !self.legend.is_empty() {
            self.draw_legend(&mut canvas, &layout)?;
        }
        Ok(canvas.assemble(self.ascii_only, true))
    }

    /// Render and print the figure followed by a newline.
    ///
    /// # Errors
    ///
    /// Propagates every [`render`](Self::render) error.
    pub fn show(&mut self) -> Result<()> {
        println!("{}", self.render()?);
        Ok(())
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
        self.revision += 1;
    }

    fn resolve_marker(&self, marker: Marker) -> (char, bool) {
        match marker {
            Marker::Braille => {
                if self.ascii_only {
                    ('.', false)
                } else {
                    ('⠄', true)
                }
            }
            Marker::Literal(ch) => (ch, !self.ascii_only && braille::is_braille(ch)),
        }
    }

    fn register_label(&mut self, marker: char, style: &Style) {
        if let Some(label) = &style.label {
            self.legend.push((marker, style.color, label.clone()));
        }
    }

    fn title_rows(&self) -> i64 {
        i64::from(self.title.is_some())
    }

    fn xax_height(&self) -> i64 {
        2 + i64::from(self.xlabel.is_some())
    }

    fn layout(&mut self) -> Result<Layout> {
        if let Some((revision, layout)) = &self.cache {
            if *revision == self.revision {
                return Ok(layout.clone());
            }
        }
        let layout = self.compute_layout()?;
        self.cache = Some((self.revision, layout.clone()));
        Ok(layout)
    }

    fn compute_layout(&self) -> Result<Layout> {
        if self.commands.is_empty() {
            return Err(Error::EmptyData);
        }
        let xs: Vec<Datum> = self.commands.iter().flat_map(|c| c.x.iter().cloned()).collect();
        let ys: Vec<Datum> = self.commands.iter().flat_map(|c| c.y.iter().cloned()).collect();
        let down = match self.y_direction {
            YAxisDirection::Up => false,
            YAxisDirection::Down => true,
            YAxisDirection::Auto => self
                .commands
                .iter()
                .any(|c| matches!(c.kind, CommandKind::Image { .. })),
        };

        let y_extent = self.height as i64 - self.title_rows() - self.xax_height();
        let yticks = axis_ticks(&ys, self.height / 3, Some(y_extent))?;
        let yax_width = yticks
            .labels()
            .iter()
            .map(|l| l.chars().count() as i64)
            .fold(0, i64::max)
            + 1
            + 2 * i64::from(self.ylabel.is_some());

        let bottom = (self.height as i64 - self.xax_height() - 1) as f64;
        let top = (1 + self.title_rows()) as f64;
        let (y_target_min, y_target_max) = if down { (top, bottom) } else { (bottom, top) };
        let yscale = fitted_scale(&ys, &yticks, y_target_min, y_target_max)?;

        let xticks = axis_ticks(&xs, self.width / 4, None)?;
        let x_target_min = yax_width as f64;
        let x_target_max = (self.width - 1) as f64;
        let xscale = fitted_scale(&xs, &xticks, x_target_min, x_target_max)?;

        Ok(Layout { xticks, yticks, yax_width, xscale, yscale, down })
    }

    fn draw_x_axis(&self, canvas: &mut Canvas, layout: &Layout) -> Result<()> {
        let positions = tick_positions(&layout.xticks, &layout.xscale)?;
        let labels = layout.xticks.labels();
        let axis_row = self.height as i64 - self.xax_height();
        let axis_start = positions[0];
        let axis_end = positions[positions.len() - 1];

        for col in axis_start..axis_end {
            canvas.put(axis_row, col, '─', None)?;
        }
        for &col in &positions {
            canvas.put(axis_row, col, '┬', None)?;
        }
        let spans = solve_label_spans(&positions, &labels, self.width);
        for ((start, end), label) in spans.iter().zip(&labels) {
            let fitted: String = label.chars().take(end - start).collect();
            canvas.put_text(axis_row + 1, *start as i64, &fitted, None)?;
        }
        if let Some(xlabel) = &self.xlabel {
            let extent = (axis_end - axis_start).max(0) as usize;
            let fitted: String = xlabel.chars().take(extent).collect();
            let col = axis_start + ((extent - fitted.chars().count()) / 2) as i64;
            canvas.put_text(self.height as i64 - 1, col, &fitted, None)?;
        }
        Ok(())
    }

    fn draw_y_axis(&self, canvas: &mut Canvas, layout: &Layout) -> Result<()> {
        let positions = tick_positions(&layout.yticks, &layout.yscale)?;
        let labels = layout.yticks.labels();
        let axis_col = layout.yax_width - 1;
        let first = positions[0];
        let last = positions[positions.len() - 1];
        let (start, end) = (first.min(last), first.max(last));

        for row in start..end {
            canvas.put(row, axis_col, '│', None)?;
        }
        let label_col = 2 * i64::from(self.ylabel.is_some());
        let label_width = (axis_col - label_col) as usize;
        for (&row, label) in positions.iter().zip(&labels) {
            canvas.put(row, axis_col, '┤', None)?;
            let padded = format!("{label:>label_width$}");
            canvas.put_text(row, label_col, &padded, None)?;
        }
        if let Some(ylabel) = &self.ylabel {
            let extent = (end - start).max(0) as usize;
            let fitted: String = ylabel.chars().take(extent).collect();
            let offset = ((extent - fitted.chars().count()) / 2) as i64;
            for (i, ch) in fitted.chars().enumerate() {
                canvas.put(start + offset + i as i64, 0, ch, None)?;
            }
        }
        Ok(())
    }

    fn draw_command(&self, canvas: &mut Canvas, layout: &Layout, command: &DrawCommand) -> Result<()> {
        let xs = transform_series(&command.x, &layout.xscale)?;
        let ys = transform_series(&command.y, &layout.yscale)?;
        let color = command.color;
        match &command.kind {
            CommandKind::Scatter { marker, braille: in_braille } => {
                for (&xi, &yi) in xs.iter().zip(&ys) {
                    let row = round_half_away(yi);
                    let col = round_half_away(xi);
                    if *in_braille {
                        let mask = braille::dot_mask(col as f64, row as f64);
                        canvas.put_braille(row, col, mask, color)?;
                    } else {
                        canvas.put(row, col, *marker, color)?;
                    }
                }
            }
            CommandKind::Line { marker, braille: in_braille } => {
                for (from, to) in xs.iter().zip(&ys).zip(xs.iter().zip(&ys).skip(1)) {
                    let ((&x0, &y0), (&x1, &y1)) = (from, to);
                    if *in_braille {
                        let segment = LineSegment::new(
                            round_half_away(x0 * 2.0),
                            round_half_away(y0 * 4.0),
                            round_half_away(x1 * 2.0),
                            round_half_away(y1 * 4.0),
                        );
                        for (px, py) in segment {
                            let xf = px as f64 / 2.0;
                            let yf = py as f64 / 4.0;
                            let mask = braille::dot_mask(xf, yf);
                            canvas.put_braille(round_half_away(yf), round_half_away(xf), mask, color)?;
                        }
                    } else {
                        let segment = LineSegment::new(
                            round_half_away(x0),
                            round_half_away(y0),
                            round_half_away(x1),
                            round_half_away(y1),
                        );
                        for (px, py) in segment {
                            canvas.put(py, px, *marker, color)?;
                        }
                    }
                }
            }
            CommandKind::Bar { marker } => {
                let glyph = if *marker == '⠄' { '⡇' } else { *marker };
                let origin = layout.yscale.transform(&origin_tick(&layout.yticks))?;
                for (&xi, &yi) in xs.iter().zip(&ys) {
                    let (lo, hi) = (origin.min(yi), origin.max(yi));
                    let col = round_half_away(xi);
                    for row in round_half_away(lo)..=round_half_away(hi) {
                        canvas.put(row, col, glyph, color)?;
                    }
                }
            }
            CommandKind::HBar { marker } => {
                let glyph = if *marker == '⠄' { '⠒' } else { *marker };
                let origin = layout.xscale.transform(&origin_tick(&layout.xticks))?;
                for (&xi, &yi) in xs.iter().zip(&ys) {
                    let (lo, hi) = (origin.min(xi), origin.max(xi));
                    let row = round_half_away(yi);
                    for col in round_half_away(lo)..=round_half_away(hi) {
                        canvas.put(row, col, glyph, color)?;
                    }
                }
            }
            CommandKind::Text { text } => {
                canvas.put_text(round_half_away(ys[0]), round_half_away(xs[0]), text, color)?;
            }
            CommandKind::Image { raster, vmin, vmax, ramp } => {
                let xmin = round_half_away(layout.xscale.transform(&Datum::Number(0.0))?);
                let xmax =
                    round_half_away(layout.xscale.transform(&Datum::Number(raster.cols() as f64))?);
                let y0 = round_half_away(layout.yscale.transform(&Datum::Number(0.0))?);
                let y1 =
                    round_half_away(layout.yscale.transform(&Datum::Number(raster.rows() as f64))?);
                let (ymin, ymax) = (y0.min(y1), y0.max(y1));
                let resampled =
                    raster.resample((ymax - ymin + 1) as usize, (xmax - xmin + 1) as usize);
                let oriented = if layout.down { resampled } else { resampled.flipped() };
                let glyphs = oriented.to_glyphs(*vmin, *vmax, *ramp)?;
                for (row_offset, row) in glyphs.iter().enumerate() {
                    for (col_offset, &glyph) in row.iter().enumerate() {
                        canvas.put(ymin + row_offset as i64, xmin + col_offset as i64, glyph, None)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn draw_legend(&self, canvas: &mut Canvas, layout: &Layout) -> Result<()> {
        let longest = self.legend.iter().map(|(_, _, l)| l.chars().count()).fold(0, usize::max);
        let width = (longest + 4).max("Legend".len() + 2) as i64;
        let height = self.legend.len() as i64 + 2;

        let top = match self.legend_location {
            LegendLocation::TopLeft | LegendLocation::TopRight => {
                round_half_away(layout.yscale.transform(&layout.yticks.last())?)
            }
            LegendLocation::BottomLeft | LegendLocation::BottomRight => {
                round_half_away(layout.yscale.transform(&layout.yticks.first())?) - height + 1
            }
        };
        let left = match self.legend_location {
            LegendLocation::TopRight | LegendLocation::BottomRight => {
                round_half_away(layout.xscale.transform(&layout.xticks.last())?) - width + 1
            }
            LegendLocation::TopLeft | LegendLocation::BottomLeft => {
                round_half_away(layout.xscale.transform(&layout.xticks.first())?)
            }
        };

        let inner = (width - 2) as usize;
        let pad = inner - "Legend".len();
        let header = format!("┌{}Legend{}┐", "─".repeat(pad / 2), "─".repeat(pad - pad / 2));
        canvas.put_text(top, left, &header, None)?;
        for (i, (marker, color, label)) in self.legend.iter().enumerate() {
            let body_width = (width - 4) as usize;
            let line = format!("│  {label:<body_width$}│");
            canvas.put_text(top + i as i64 + 1, left, &line, None)?;
            canvas.put(top + i as i64 + 1, left + 1, *marker, *color)?;
        }
        let footer = format!("└{}┘", "─".repeat(inner));
        canvas.put_text(top + height - 1, left, &footer, None)?;
        Ok(())
    }
}

fn indices(len: usize) -> Vec<Datum> {
    (0..len).map(|i| Datum::Number(i as f64)).collect()
}

fn series<X, Y>(x: &[X], y: &[Y]) -> Result<(Vec<Datum>, Vec<Datum>)>
where
    X: Clone + Into<Datum>,
    Y: Clone + Into<Datum>,
{
    if x.is_empty() || y.is_empty() {
        return Err(Error::EmptyData);
    }
    if x.len() != y.len() {
        return Err(Error::DataLengthMismatch { x_len: x.len(), y_len: y.len() });
    }
    let x = x.iter().cloned().map(Into::into).collect();
    let y = y.iter().cloned().map(Into::into).collect();
    Ok((x, y))
}

fn axis_ticks(data: &[Datum], most: usize, extent: Option<i64>) -> Result<Ticks> {
    let numbers: Option<Vec<f64>> = data.iter().map(Datum::as_number).collect();
    if let Some(values) = numbers {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        return Ok(Ticks::Numeric(best_ticks(min, max, most)));
    }
    let mut distinct: Vec<String> = data.iter().map(ToString::to_string).collect();
    distinct.sort_unstable();
    distinct.dedup();
    if let Some(extent) = extent {
        if distinct.len() as i64 > extent {
            return Err(Error::CategoryOverflow {
                categories: distinct.len(),
                extent: extent.max(0) as usize,
            });
        }
    }
    Ok(Ticks::Categorical(distinct))
}

fn fitted_scale(data: &[Datum], ticks: &Ticks, target_min: f64, target_max: f64) -> Result<AxisScale> {
    match ticks {
        // numeric axes refit to the selected ticks so every tick lands on a
        // grid position exactly
        Ticks::Numeric(values) => {
            LinearScale::fit(values, target_min, target_max).map(AxisScale::Linear)
        }
        Ticks::Categorical(_) => {
            CategoricalScale::fit(data, target_min, target_max).map(AxisScale::Categorical)
        }
    }
}

fn tick_positions(ticks: &Ticks, scale: &AxisScale) -> Result<Vec<i64>> {
    ticks
        .data()
        .iter()
        .map(|d| scale.transform(d).map(round_half_away))
        .collect()
}

fn transform_series(data: &[Datum], scale: &AxisScale) -> Result<Vec<f64>> {
    data.iter().map(|d| scale.transform(d)).collect()
}

/// The tick a bar grows from: the numeric tick nearest zero, or the first
/// category.
fn origin_tick(ticks: &Ticks) -> Datum {
    match ticks {
        Ticks::Numeric(values) => {
            let mut origin = values[0];
            for &value in values {
                if value.abs() < origin.abs() {
                    origin = value;
                }
            }
            Datum::Number(origin)
        }
        Ticks::Categorical(values) => Datum::Category(values[0].clone()),
    }
}
