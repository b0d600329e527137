//! Magnetics calculations for ideal point dipoles.
use std::num::NonZeroUsize;

use nalgebra::Vector3;
use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::{ParallelSlice, ParallelSliceMut},
};

use crate::math::{dot3, rss3};

use crate::MU0_OVER_4PI;

/// B-field of a point dipole at the origin evaluated at many observation
/// points. This variant of the function is parallelized over chunks of
/// observation points.
///
/// # Arguments
///
/// * `m`:    (A-m^2) dipole moment vector
/// * `xyzp`: (m) observation point coords, each length `n`
/// * `out`:  (T) bx, by, bz at observation points, each length `n`
///
/// # Commentary
///
/// Far-field formula of any compact current distribution,
/// `B = mu_0 / (4 pi) * (3 (m . rhat) rhat - m) / r^3`; exact everywhere for
/// an ideal dipole. See eqn. 5.87 in \[1\].
///
/// The observation point at the origin is the field's singular point and is
/// masked to `B = 0` instead of propagating non-finite values.
///
/// # References
///
///   \[1\] D. J. Griffiths, *Introduction to Electrodynamics*, 4th ed.
///         Cambridge University Press, 2017.
pub fn flux_density_dipole_par(
    m: Vector3<f64>,
    xyzp: (&[f64], &[f64], &[f64]),
    out: (&mut [f64], &mut [f64], &mut [f64]),
) -> Result<(), &'static str> {
    // Chunk inputs
    let ncores = std::thread::available_parallelism()
        .unwrap_or(NonZeroUsize::MIN)
        .get();

    let n = (xyzp.0.len() / ncores).max(1);

    let xpc = xyzp.0.par_chunks(n);
    let ypc = xyzp.1.par_chunks(n);
    let zpc = xyzp.2.par_chunks(n);

    let bxc = out.0.par_chunks_mut(n);
    let byc = out.1.par_chunks_mut(n);
    let bzc = out.2.par_chunks_mut(n);

    // Run calcs
    bxc.zip(byc.zip(bzc.zip(xpc.zip(ypc.zip(zpc)))))
        .try_for_each(|(bx, (by, (bz, (xp, (yp, zp)))))| {
            flux_density_dipole(m, (xp, yp, zp), (bx, by, bz))
        })?;

    Ok(())
}

/// B-field of a point dipole at the origin evaluated at many observation
/// points.
///
/// # Arguments
///
/// * `m`:    (A-m^2) dipole moment vector
/// * `xyzp`: (m) observation point coords, each length `n`
/// * `out`:  (T) bx, by, bz at observation points, each length `n`
///
/// # Commentary
///
/// Far-field formula of any compact current distribution,
/// `B = mu_0 / (4 pi) * (3 (m . rhat) rhat - m) / r^3`; exact everywhere for
/// an ideal dipole. See eqn. 5.87 in \[1\].
///
/// The observation point at the origin is the field's singular point and is
/// masked to `B = 0` instead of propagating non-finite values.
///
/// # References
///
///   \[1\] D. J. Griffiths, *Introduction to Electrodynamics*, 4th ed.
///         Cambridge University Press, 2017.
pub fn flux_density_dipole(
    m: Vector3<f64>,
    xyzp: (&[f64], &[f64], &[f64]),
    out: (&mut [f64], &mut [f64], &mut [f64]),
) -> Result<(), &'static str> {
    // Unpack
    let (xp, yp, zp) = xyzp;
    let (bx, by, bz) = out;

    // Check lengths; Error if they do not match
    let n = xp.len();
    if yp.len() != n || zp.len() != n || bx.len() != n || by.len() != n || bz.len() != n {
        return Err("Input length mismatch");
    }

    for j in 0..n {
        bx[j] = 0.0;
        by[j] = 0.0;
        bz[j] = 0.0;
    }

    for j in 0..n {
        let r = rss3(xp[j], yp[j], zp[j]); // [m]
        if r == 0.0 {
            // Singular point; masked
            continue;
        }

        // Unit radial
        let xh = xp[j] / r;
        let yh = yp[j] / r;
        let zh = zp[j] / r;

        let mr = dot3(m.x, m.y, m.z, xh, yh, zh); // [A-m^2]
        let r3_inv = 1.0 / (r * r * r); // [m^-3]

        // The values stored here do not yet have units of tesla; the result
        // has units of tesla after the mu_0 / (4 pi) factor is applied below.
        bx[j] = r3_inv * (3.0 * mr).mul_add(xh, -m.x);
        by[j] = r3_inv * (3.0 * mr).mul_add(yh, -m.y);
        bz[j] = r3_inv * (3.0 * mr).mul_add(zh, -m.z);
    }

    for j in 0..n {
        bx[j] *= MU0_OVER_4PI;
        by[j] *= MU0_OVER_4PI;
        bz[j] *= MU0_OVER_4PI;
    }

    Ok(())
}

/// B-field of the same dipole at a single point, for the integrators.
/// Returns the zero vector at the singular point.
pub fn dipole_field_at(m: Vector3<f64>, p: Vector3<f64>) -> Vector3<f64> {
    let r = p.norm();
    if r == 0.0 {
        return Vector3::zeros();
    }
    let rhat = p / r;
    let mr = m.dot(&rhat);
    (MU0_OVER_4PI / (r * r * r)) * (3.0 * mr * rhat - m)
}

#[cfg(test)]
mod test {
    use super::*;

    /// Div/0-resistant approximate comparison
    fn approx(truth: f64, val: f64, rtol: f64, atol: f64) -> bool {
        let abs_err = (val - truth).abs();
        let lim = rtol * truth.abs() + atol;
        abs_err < lim
    }

    /// Check the kernel against the closed-form on-axis and equatorial values:
    /// `B(0, 0, z) = mu0/4pi * 2 m / z^3` and `B(x, 0, 0) = -mu0/4pi * m / x^3`
    /// for an axis-aligned moment.
    #[test]
    fn test_axis_and_equator() {
        let m = Vector3::new(0.0, 0.0, 7.3e22); // roughly Earth's moment
        let xp = [0.0, 2.5e6];
        let yp = [0.0, 0.0];
        let zp = [4.0e6, 0.0];
        let mut bx = [0.0; 2];
        let mut by = [0.0; 2];
        let mut bz = [0.0; 2];
        flux_density_dipole(m, (&xp, &yp, &zp), (&mut bx, &mut by, &mut bz)).unwrap();

        let b_axis = MU0_OVER_4PI * 2.0 * m.z / 4.0e6_f64.powi(3);
        assert!(approx(b_axis, bz[0], 1e-12, 0.0));
        assert!(approx(0.0, bx[0], 0.0, 1e-18));
        assert!(approx(0.0, by[0], 0.0, 1e-18));

        let b_eq = -MU0_OVER_4PI * m.z / 2.5e6_f64.powi(3);
        assert!(approx(b_eq, bz[1], 1e-12, 0.0));
        assert!(approx(0.0, bx[1], 0.0, 1e-18));
    }

    /// The field of a dipole is divergence-free; check with central
    /// differences of the single-point sampler at a scattering of points.
    #[test]
    fn test_divergence_free() {
        let m = Vector3::new(-0.7, 0.3, 2.0);
        let eps = 1e-7;
        let vals = [0.25, 0.5, 2.5, -2.5, -0.5, -0.25];
        for x in vals.iter() {
            for y in vals.iter() {
                for z in vals.iter() {
                    let p = Vector3::new(*x, *y, *z);
                    let dbx = dipole_field_at(m, p + Vector3::new(eps, 0.0, 0.0)).x
                        - dipole_field_at(m, p - Vector3::new(eps, 0.0, 0.0)).x;
                    let dby = dipole_field_at(m, p + Vector3::new(0.0, eps, 0.0)).y
                        - dipole_field_at(m, p - Vector3::new(0.0, eps, 0.0)).y;
                    let dbz = dipole_field_at(m, p + Vector3::new(0.0, 0.0, eps)).z
                        - dipole_field_at(m, p - Vector3::new(0.0, 0.0, eps)).z;
                    let div = (dbx + dby + dbz) / (2.0 * eps);

                    // Scale the tolerance by the local field over the
                    // distance to the source
                    let scale = dipole_field_at(m, p).norm() / p.norm();
                    assert!(approx(0.0, div, 0.0, 1e-6 * scale));
                }
            }
        }
    }

    /// The batch kernel and the single-point sampler agree.
    #[test]
    fn test_kernel_vs_sampler() {
        let m = Vector3::new(1.1, -0.4, 2.0);
        const NOBS: usize = 50;
        let xp: Vec<f64> = (0..NOBS).map(|i| 2.0 * (i as f64).sin() + 2.1).collect();
        let yp: Vec<f64> = (0..NOBS).map(|i| 4.0 * (2.0 * i as f64).cos()).collect();
        let zp: Vec<f64> = (0..NOBS).map(|i| (i as f64) - (NOBS as f64) / 2.0).collect();

        let mut bx = [0.0; NOBS];
        let mut by = [0.0; NOBS];
        let mut bz = [0.0; NOBS];
        flux_density_dipole(m, (&xp, &yp, &zp), (&mut bx, &mut by, &mut bz)).unwrap();

        for i in 0..NOBS {
            let b = dipole_field_at(m, Vector3::new(xp[i], yp[i], zp[i]));
            assert!(approx(b.x, bx[i], 1e-12, 1e-18));
            assert!(approx(b.y, by[i], 1e-12, 1e-18));
            assert!(approx(b.z, bz[i], 1e-12, 1e-18));
        }
    }

    /// The singular point is masked to zero in both evaluation paths.
    #[test]
    fn test_origin_masked() {
        let m = Vector3::new(0.0, 0.0, 2.0);
        let mut bx = [1.0];
        let mut by = [1.0];
        let mut bz = [1.0];
        flux_density_dipole(m, (&[0.0], &[0.0], &[0.0]), (&mut bx, &mut by, &mut bz)).unwrap();
        assert_eq!(bx[0], 0.0);
        assert_eq!(by[0], 0.0);
        assert_eq!(bz[0], 0.0);
        assert_eq!(dipole_field_at(m, Vector3::zeros()), Vector3::zeros());
    }

    /// Check that the parallel variant produces the same result as serial.
    /// This also incidentally tests defensive zeroing of input slices.
    #[test]
    fn test_serial_vs_parallel() {
        const NOBS: usize = 100;
        let m = Vector3::new(0.3, 0.0, 1.9);

        let xp: Vec<f64> = (0..NOBS).map(|i| 2.0 * (i as f64).sin() + 2.1).collect();
        let yp: Vec<f64> = (0..NOBS).map(|i| 4.0 * (2.0 * i as f64).cos()).collect();
        let zp: Vec<f64> = (0..NOBS).map(|i| (0.1 * i as f64).exp()).collect();

        // Initialize with different values for each buffer to test zeroing
        let out0 = &mut [0.0; NOBS];
        let out1 = &mut [1.0; NOBS];
        let out2 = &mut [2.0; NOBS];
        let out3 = &mut [3.0; NOBS];
        let out4 = &mut [4.0; NOBS];
        let out5 = &mut [5.0; NOBS];

        flux_density_dipole(m, (&xp, &yp, &zp), (out0, out1, out2)).unwrap();
        flux_density_dipole_par(m, (&xp, &yp, &zp), (out3, out4, out5)).unwrap();
        for i in 0..NOBS {
            assert_eq!(out0[i], out3[i]);
            assert_eq!(out1[i], out4[i]);
            assert_eq!(out2[i], out5[i]);
        }
    }

    #[test]
    fn test_length_mismatch() {
        let m = Vector3::new(0.0, 0.0, 1.0);
        let xp = [1.0, 2.0];
        let short = [1.0];
        let mut out = [0.0; 2];
        let mut out1 = [0.0; 2];
        let mut out2 = [0.0; 2];
        assert!(
            flux_density_dipole(m, (&xp, &short, &xp), (&mut out, &mut out1, &mut out2)).is_err()
        );
    }
}
