//! Figure assembly on top of plotly.
//!
//! Vector glyphs and wireframes are emitted as single gap-separated line
//! traces: a `None` sample breaks the line, so one trace carries a whole
//! quiver. Figures are written by the demo binaries with
//! [`plotly::Plot::write_html`].

use plotly::common::{Line, Marker, Mode, Title};
use plotly::layout::Axis;
use plotly::{Layout, Plot, Scatter, Scatter3D};

/// Glyph-count cap applied by the quiver builders; oversized scenes are
/// down-sampled to at most this many glyphs.
pub const DEFAULT_MAX_GLYPHS: usize = 1000;

/// Stride that down-samples `n` points to at most `max_n` kept points.
pub fn mask_stride(n: usize, max_n: usize) -> usize {
    if max_n == 0 {
        return n.max(1);
    }
    n.div_ceil(max_n).max(1)
}

/// Gap-separated line segments for a 3D vector-glyph field: per kept point
/// one segment from the point to `point + scale * vector`, then a gap.
#[allow(clippy::type_complexity)]
pub fn arrow_segments3(
    xyz: (&[f64], &[f64], &[f64]),
    uvw: (&[f64], &[f64], &[f64]),
    scale: f64,
    stride: usize,
) -> Result<(Vec<Option<f64>>, Vec<Option<f64>>, Vec<Option<f64>>), &'static str> {
    let (x, y, z) = xyz;
    let (u, v, w) = uvw;

    let n = x.len();
    if y.len() != n || z.len() != n || u.len() != n || v.len() != n || w.len() != n {
        return Err("Input length mismatch");
    }
    if stride == 0 {
        return Err("Stride must be nonzero");
    }

    let mut sx = Vec::with_capacity(3 * n / stride + 3);
    let mut sy = Vec::with_capacity(3 * n / stride + 3);
    let mut sz = Vec::with_capacity(3 * n / stride + 3);
    for i in (0..n).step_by(stride) {
        sx.push(Some(x[i]));
        sy.push(Some(y[i]));
        sz.push(Some(z[i]));
        sx.push(Some(u[i].mul_add(scale, x[i])));
        sy.push(Some(v[i].mul_add(scale, y[i])));
        sz.push(Some(w[i].mul_add(scale, z[i])));
        sx.push(None);
        sy.push(None);
        sz.push(None);
    }

    Ok((sx, sy, sz))
}

/// Gap-separated line segments for a 2D vector-glyph field.
#[allow(clippy::type_complexity)]
pub fn arrow_segments2(
    xy: (&[f64], &[f64]),
    uv: (&[f64], &[f64]),
    scale: f64,
    stride: usize,
) -> Result<(Vec<Option<f64>>, Vec<Option<f64>>), &'static str> {
    let (x, y) = xy;
    let (u, v) = uv;

    let n = x.len();
    if y.len() != n || u.len() != n || v.len() != n {
        return Err("Input length mismatch");
    }
    if stride == 0 {
        return Err("Stride must be nonzero");
    }

    let mut sx = Vec::with_capacity(3 * n / stride + 3);
    let mut sy = Vec::with_capacity(3 * n / stride + 3);
    for i in (0..n).step_by(stride) {
        sx.push(Some(x[i]));
        sy.push(Some(y[i]));
        sx.push(Some(u[i].mul_add(scale, x[i])));
        sy.push(Some(v[i].mul_add(scale, y[i])));
        sx.push(None);
        sy.push(None);
    }

    Ok((sx, sy))
}

/// Normalize glyph vectors to unit direction in place, leaving zero vectors
/// untouched. Field magnitudes in the demos span many decades; the scenes
/// show direction and let a uniform glyph length carry the geometry.
pub fn unit_glyphs3(u: &mut [f64], v: &mut [f64], w: &mut [f64]) {
    let n = u.len().min(v.len()).min(w.len());
    for i in 0..n {
        let mag = crate::math::rss3(u[i], v[i], w[i]);
        if mag > 0.0 && mag.is_finite() {
            u[i] /= mag;
            v[i] /= mag;
            w[i] /= mag;
        }
    }
}

/// Gap-separated samples joining a set of polylines into one trace.
#[allow(clippy::type_complexity)]
pub fn polyline_segments(
    lines: &[(Vec<f64>, Vec<f64>, Vec<f64>)],
) -> (Vec<Option<f64>>, Vec<Option<f64>>, Vec<Option<f64>>) {
    let mut sx = Vec::new();
    let mut sy = Vec::new();
    let mut sz = Vec::new();
    for (x, y, z) in lines.iter() {
        for i in 0..x.len() {
            sx.push(Some(x[i]));
            sy.push(Some(y[i]));
            sz.push(Some(z[i]));
        }
        sx.push(None);
        sy.push(None);
        sz.push(None);
    }
    (sx, sy, sz)
}

/// One whole 3D quiver as a single masked line trace.
pub fn quiver3_trace(
    xyz: (&[f64], &[f64], &[f64]),
    uvw: (&[f64], &[f64], &[f64]),
    scale: f64,
    color: &str,
) -> Result<Box<Scatter3D<Option<f64>, Option<f64>, Option<f64>>>, &'static str> {
    let stride = mask_stride(xyz.0.len(), DEFAULT_MAX_GLYPHS);
    let (sx, sy, sz) = arrow_segments3(xyz, uvw, scale, stride)?;

    Ok(Scatter3D::new(sx, sy, sz)
        .mode(Mode::Lines)
        .line(Line::new().color(color.to_string()).width(1.0))
        .show_legend(false))
}

/// One whole 2D quiver as a single masked line trace.
pub fn quiver2_trace(
    xy: (&[f64], &[f64]),
    uv: (&[f64], &[f64]),
    scale: f64,
    color: &str,
) -> Result<Box<Scatter<Option<f64>, Option<f64>>>, &'static str> {
    let stride = mask_stride(xy.0.len(), DEFAULT_MAX_GLYPHS);
    let (sx, sy) = arrow_segments2(xy, uv, scale, stride)?;

    Ok(Scatter::new(sx, sy)
        .mode(Mode::Lines)
        .line(Line::new().color(color.to_string()).width(1.0))
        .show_legend(false))
}

/// A single 3D polyline trace (field line or trajectory curve).
pub fn polyline3_trace(
    x: &[f64],
    y: &[f64],
    z: &[f64],
    color: &str,
    width: f64,
) -> Box<Scatter3D<f64, f64, f64>> {
    Scatter3D::new(x.to_vec(), y.to_vec(), z.to_vec())
        .mode(Mode::Lines)
        .line(Line::new().color(color.to_string()).width(width))
        .show_legend(false)
}

/// A 3D point-cloud trace; the trajectory figures draw their curves as
/// dotted tracks rather than continuous lines.
pub fn points3_trace(
    x: &[f64],
    y: &[f64],
    z: &[f64],
    color: &str,
    size: usize,
) -> Box<Scatter3D<f64, f64, f64>> {
    Scatter3D::new(x.to_vec(), y.to_vec(), z.to_vec())
        .mode(Mode::Markers)
        .marker(Marker::new().color(color.to_string()).size(size))
        .show_legend(false)
}

/// The central body drawn as one wireframe-sphere trace.
pub fn sphere_trace(
    radius: f64,
    n_theta: usize,
    n_phi: usize,
    color: &str,
) -> Box<Scatter3D<Option<f64>, Option<f64>, Option<f64>>> {
    let lines = crate::grid::sphere_wireframe(radius, n_theta, n_phi);
    let (sx, sy, sz) = polyline_segments(&lines);
    Scatter3D::new(sx, sy, sz)
        .mode(Mode::Lines)
        .line(Line::new().color(color.to_string()).width(1.0))
        .show_legend(false)
}

/// Shared figure layout: title and pixel dimensions.
pub fn figure_layout(title: &str, width: usize, height: usize) -> Layout {
    Layout::new()
        .title(Title::from(title))
        .width(width)
        .height(height)
}

/// Shared 2D-figure layout with axis titles.
pub fn planar_layout(title: &str, xlabel: &str, ylabel: &str, width: usize, height: usize) -> Layout {
    Layout::new()
        .title(Title::from(title))
        .x_axis(Axis::new().title(xlabel))
        .y_axis(Axis::new().title(ylabel))
        .width(width)
        .height(height)
}

/// Empty figure with the shared layout applied.
pub fn figure(title: &str, width: usize, height: usize) -> Plot {
    let mut plot = Plot::new();
    plot.set_layout(figure_layout(title, width, height));
    plot
}
