//! Coordinate-grid builders for the demo figures.
//!
//! All builders return freshly allocated arrays; coordinate triples returned
//! together always share one length.

use core::f64::consts::PI;

/// `n` evenly spaced samples covering `[start, stop]`, inclusive of both
/// endpoints. `n == 1` yields just `start`.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![start];
    }
    let dx = (stop - start) / ((n - 1) as f64);
    (0..n).map(|i| (i as f64).mul_add(dx, start)).collect()
}

/// Flattened cartesian lattice: the product of the same half-open range
/// `[start, stop)` sampled with spacing `step` on each axis, x-outermost.
///
/// # Arguments
///
/// * `start`: lower bound of each axis
/// * `stop`:  upper bound of each axis, excluded
/// * `step`:  sample spacing, must be positive
pub fn lattice3(start: f64, stop: f64, step: f64) -> Result<(Vec<f64>, Vec<f64>, Vec<f64>), &'static str> {
    if !(step > 0.0) {
        return Err("Step must be positive");
    }
    if stop <= start {
        return Err("Empty range");
    }

    let n = ((stop - start) / step).ceil() as usize;
    let axis: Vec<f64> = (0..n).map(|i| (i as f64).mul_add(step, start)).collect();

    let size = n * n * n;
    let mut x = Vec::with_capacity(size);
    let mut y = Vec::with_capacity(size);
    let mut z = Vec::with_capacity(size);
    for xi in axis.iter() {
        for yj in axis.iter() {
            for zk in axis.iter() {
                x.push(*xi);
                y.push(*yj);
                z.push(*zk);
            }
        }
    }

    Ok((x, y, z))
}

/// Cartesian coordinates of the outer product of 1D spherical axes,
/// r-outermost: `x = r sin(theta) cos(phi)`, `y = r sin(theta) sin(phi)`,
/// `z = r cos(theta)`.
pub fn spherical_product(r: &[f64], theta: &[f64], phi: &[f64]) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let size = r.len() * theta.len() * phi.len();
    let mut x = Vec::with_capacity(size);
    let mut y = Vec::with_capacity(size);
    let mut z = Vec::with_capacity(size);
    for ri in r.iter() {
        for tj in theta.iter() {
            for pk in phi.iter() {
                let st = tj.sin();
                x.push(ri * st * pk.cos());
                y.push(ri * st * pk.sin());
                z.push(ri * tj.cos());
            }
        }
    }
    (x, y, z)
}

/// Per-point spherical coordinates `(r, theta, phi)` of cartesian points,
/// with `theta` measured from the +z axis and `phi = atan2(y, x)`.
pub fn cartesian_to_spherical(
    x: &[f64],
    y: &[f64],
    z: &[f64],
) -> Result<(Vec<f64>, Vec<f64>, Vec<f64>), &'static str> {
    let n = x.len();
    if y.len() != n || z.len() != n {
        return Err("Input length mismatch");
    }

    let mut r = Vec::with_capacity(n);
    let mut theta = Vec::with_capacity(n);
    let mut phi = Vec::with_capacity(n);
    for i in 0..n {
        let xy = x[i].mul_add(x[i], y[i] * y[i]);
        r.push(z[i].mul_add(z[i], xy).sqrt());
        theta.push(xy.sqrt().atan2(z[i]));
        phi.push(y[i].atan2(x[i]));
    }

    Ok((r, theta, phi))
}

/// Per-point radius and unit radial components `(r, x/r, y/r, z/r)`.
///
/// The point at the origin divides by zero and yields non-finite components;
/// the field kernels mask that point rather than this builder.
#[allow(clippy::type_complexity)]
pub fn unit_radials(
    x: &[f64],
    y: &[f64],
    z: &[f64],
) -> Result<(Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>), &'static str> {
    let n = x.len();
    if y.len() != n || z.len() != n {
        return Err("Input length mismatch");
    }

    let mut r = Vec::with_capacity(n);
    let mut xh = Vec::with_capacity(n);
    let mut yh = Vec::with_capacity(n);
    let mut zh = Vec::with_capacity(n);
    for i in 0..n {
        let ri = crate::math::rss3(x[i], y[i], z[i]);
        r.push(ri);
        xh.push(x[i] / ri);
        yh.push(y[i] / ri);
        zh.push(z[i] / ri);
    }

    Ok((r, xh, yh, zh))
}

/// Wireframe covering of a sphere surface centered at the origin: `n_theta`
/// pole-to-pole meridians and `n_theta - 1` closed parallels, each returned
/// as one polyline.
pub fn sphere_wireframe(
    radius: f64,
    n_theta: usize,
    n_phi: usize,
) -> Vec<(Vec<f64>, Vec<f64>, Vec<f64>)> {
    let mut lines = Vec::new();

    // Meridians: theta sweeps 0..pi at fixed phi
    for k in 0..n_phi {
        let phi = 2.0 * PI * (k as f64) / (n_phi as f64);
        let theta = linspace(0.0, PI, n_theta + 1);
        let mut x = Vec::with_capacity(theta.len());
        let mut y = Vec::with_capacity(theta.len());
        let mut z = Vec::with_capacity(theta.len());
        for t in theta.iter() {
            x.push(radius * t.sin() * phi.cos());
            y.push(radius * t.sin() * phi.sin());
            z.push(radius * t.cos());
        }
        lines.push((x, y, z));
    }

    // Parallels: phi sweeps a closed circle at fixed theta, poles excluded
    for j in 1..n_theta {
        let theta = PI * (j as f64) / (n_theta as f64);
        let phi = linspace(0.0, 2.0 * PI, n_phi + 1);
        let mut x = Vec::with_capacity(phi.len());
        let mut y = Vec::with_capacity(phi.len());
        let mut z = Vec::with_capacity(phi.len());
        for p in phi.iter() {
            x.push(radius * theta.sin() * p.cos());
            y.push(radius * theta.sin() * p.sin());
            z.push(radius * theta.cos());
        }
        lines.push((x, y, z));
    }

    lines
}
