use plotters::prelude::*;

use crate::series::Series;

pub(crate) const DEFAULT_WIDTH: u32 = 640;
pub(crate) const DEFAULT_HEIGHT: u32 = 400;

/// Marker color for scatter points (a muted blue).
const MARKER_COLOR: (u8, u8, u8) = (0x5E, 0x81, 0xB5);

/// A rendering sink for plot requests. Rendering failures never surface
/// through the evaluation error taxonomy; implementations keep them as
/// retrievable warnings instead.
pub trait Renderer {
  fn draw_scatter_plot(
    &mut self,
    title: &str,
    x_label: &str,
    y_label: &str,
    xs: &Series<f64>,
    ys: &Series<f64>,
  );

  /// The most recent rendering, if this sink produces one.
  fn take_svg(&mut self) -> Option<String> {
    None
  }

  /// The most recent rendering failure, if any.
  fn take_warning(&mut self) -> Option<String> {
    None
  }
}

/// Discards every plot request. Used for headless evaluation.
pub struct NullRenderer;

impl Renderer for NullRenderer {
  fn draw_scatter_plot(
    &mut self,
    _title: &str,
    _x_label: &str,
    _y_label: &str,
    _xs: &Series<f64>,
    _ys: &Series<f64>,
  ) {
  }
}

/// Renders scatter plots to an in-memory SVG string and keeps the last one
/// until it is taken.
pub struct SvgRenderer {
  width: u32,
  height: u32,
  svg: Option<String>,
  warning: Option<String>,
}

impl SvgRenderer {
  pub fn new() -> Self {
    Self::with_size(DEFAULT_WIDTH, DEFAULT_HEIGHT)
  }

  pub fn with_size(width: u32, height: u32) -> Self {
    SvgRenderer {
      width,
      height,
      svg: None,
      warning: None,
    }
  }
}

impl Default for SvgRenderer {
  fn default() -> Self {
    Self::new()
  }
}

impl Renderer for SvgRenderer {
  fn draw_scatter_plot(
    &mut self,
    title: &str,
    x_label: &str,
    y_label: &str,
    xs: &Series<f64>,
    ys: &Series<f64>,
  ) {
    match generate_scatter_svg(
      title,
      x_label,
      y_label,
      xs,
      ys,
      self.width,
      self.height,
    ) {
      Ok(svg) => self.svg = Some(svg),
      Err(message) => self.warning = Some(message),
    }
  }

  fn take_svg(&mut self) -> Option<String> {
    self.svg.take()
  }

  fn take_warning(&mut self) -> Option<String> {
    self.warning.take()
  }
}

/// Compute a "nice" major tick step given the axis range and desired label
/// count (1, 2, or 5 times a power of ten).
fn nice_step(range: f64, target_labels: usize) -> f64 {
  let raw = range / target_labels as f64;
  let mag = 10_f64.powf(raw.abs().log10().floor());
  let norm = raw / mag;
  let nice = if norm <= 1.0 {
    1.0
  } else if norm <= 2.0 {
    2.0
  } else if norm <= 5.0 {
    5.0
  } else {
    10.0
  };
  nice * mag
}

/// Check whether a tick value falls on a major tick grid.
fn is_major_tick(v: f64, step: f64) -> bool {
  if step == 0.0 {
    return true;
  }
  let remainder = (v / step).round() * step - v;
  remainder.abs() < step * 1e-9
}

/// Format a tick value, dropping the trailing ".0" for integers.
fn format_tick(v: f64) -> String {
  if (v - v.round()).abs() < 1e-9 {
    format!("{}", v.round() as i64)
  } else {
    format!("{v:.1}")
  }
}

/// Axis range over the finite values, padded by 4%, with a unit fallback
/// for empty or degenerate data.
fn padded_range<'a>(values: impl Iterator<Item = &'a f64>) -> (f64, f64) {
  let mut lo = f64::INFINITY;
  let mut hi = f64::NEG_INFINITY;
  for &v in values {
    if v.is_finite() {
      lo = lo.min(v);
      hi = hi.max(v);
    }
  }
  if lo > hi {
    return (0.0, 1.0);
  }
  if lo == hi {
    return (lo - 1.0, hi + 1.0);
  }
  let pad = (hi - lo) * 0.04;
  (lo - pad, hi + pad)
}

fn generate_scatter_svg(
  title: &str,
  x_label: &str,
  y_label: &str,
  xs: &Series<f64>,
  ys: &Series<f64>,
  width: u32,
  height: u32,
) -> Result<String, String> {
  let (x_min, x_max) = padded_range(xs.iter());
  let (y_min, y_max) = padded_range(ys.iter());

  let mut buf = String::new();
  {
    let root =
      SVGBackend::with_string(&mut buf, (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| format!("plot: {e}"))?;

    let dark_gray = RGBColor(0x66, 0x66, 0x66);
    let light_gray = RGBColor(0xCC, 0xCC, 0xCC);

    let mut chart = ChartBuilder::on(&root)
      .caption(title, ("sans-serif", 16).into_font().color(&dark_gray))
      .margin(10)
      .x_label_area_size(30)
      .y_label_area_size(45)
      .build_cartesian_2d(x_min..x_max, y_min..y_max)
      .map_err(|e| format!("plot: {e}"))?;

    let x_major = nice_step(x_max - x_min, 5);
    let y_major = nice_step(y_max - y_min, 5);
    let x_minor_step = x_major / 5.0;
    let y_minor_step = y_major / 5.0;
    let x_tick_count = ((x_max - x_min) / x_minor_step).round() as usize + 1;
    let y_tick_count = ((y_max - y_min) / y_minor_step).round() as usize + 1;

    chart
      .configure_mesh()
      .disable_mesh()
      .x_desc(x_label)
      .y_desc(y_label)
      .x_labels(x_tick_count)
      .y_labels(y_tick_count)
      .x_label_formatter(&move |v: &f64| {
        if is_major_tick(*v, x_major) {
          format_tick(*v)
        } else {
          String::new()
        }
      })
      .y_label_formatter(&move |v: &f64| {
        if is_major_tick(*v, y_major) {
          format_tick(*v)
        } else {
          String::new()
        }
      })
      .axis_style(dark_gray.stroke_width(1))
      .label_style(("sans-serif", 11).into_font().color(&dark_gray))
      .draw()
      .map_err(|e| format!("plot: {e}"))?;

    // Origin lines
    let origin_line = light_gray.stroke_width(1);
    if y_min < 0.0 && y_max > 0.0 {
      chart
        .draw_series(std::iter::once(PathElement::new(
          vec![(x_min, 0.0), (x_max, 0.0)],
          origin_line,
        )))
        .map_err(|e| format!("plot: {e}"))?;
    }
    if x_min < 0.0 && x_max > 0.0 {
      chart
        .draw_series(std::iter::once(PathElement::new(
          vec![(0.0, y_min), (0.0, y_max)],
          origin_line,
        )))
        .map_err(|e| format!("plot: {e}"))?;
    }

    let (r, g, b) = MARKER_COLOR;
    let color = RGBColor(r, g, b);
    let finite_pts: Vec<(f64, f64)> = xs
      .iter()
      .zip(ys.iter())
      .map(|(&x, &y)| (x, y))
      .filter(|(x, y)| x.is_finite() && y.is_finite())
      .collect();
    chart
      .draw_series(
        finite_pts
          .iter()
          .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
      )
      .map_err(|e| format!("plot: {e}"))?;

    root.present().map_err(|e| format!("plot: {e}"))?;
  }
  Ok(buf)
}
