//! Electrostatics calculations for collections of point charges.
use std::num::NonZeroUsize;

use nalgebra::Vector3;
use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::{ParallelSlice, ParallelSliceMut},
};

use crate::math::dot3;

use crate::ONE_OVER_4PI_EPS0;

/// Coulomb superposition for E-field contribution from many point charges
/// to many observation points. This variant of the function is parallelized
/// over chunks of observation points.
///
/// # Arguments
///
/// * `q`:    (C) charge of each source, length `m`
/// * `xyzq`: (m) source coords, each length `m`
/// * `xyzp`: (m) observation point coords, each length `n`
/// * `out`:  (V/m) ex, ey, ez at observation points, each length `n`
pub fn electric_field_point_charges_par(
    q: &[f64],
    xyzq: (&[f64], &[f64], &[f64]),
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

    let exc = out.0.par_chunks_mut(n);
    let eyc = out.1.par_chunks_mut(n);
    let ezc = out.2.par_chunks_mut(n);

    // Run calcs
    exc.zip(eyc.zip(ezc.zip(xpc.zip(ypc.zip(zpc)))))
        .try_for_each(|(ex, (ey, (ez, (xp, (yp, zp)))))| {
            electric_field_point_charges(q, xyzq, (xp, yp, zp), (ex, ey, ez))
        })?;

    Ok(())
}

/// Coulomb superposition for E-field contribution from many point charges
/// to many observation points.
///
/// # Arguments
///
/// * `q`:    (C) charge of each source, length `m`
/// * `xyzq`: (m) source coords, each length `m`
/// * `xyzp`: (m) observation point coords, each length `n`
/// * `out`:  (V/m) ex, ey, ez at observation points, each length `n`
///
/// # Commentary
///
/// `E = 1 / (4 pi eps_0) * sum_i q_i (r - r_i) / |r - r_i|^3`, the gradient
/// field of the Coulomb potential. An observation point coincident with a
/// source sits on that source's singularity; its contribution is masked to
/// zero, while the contributions of the remaining sources still accumulate.
/// Grids should still be laid out to avoid landing on sources (the demos
/// offset their charges off the grid nodes for that reason).
pub fn electric_field_point_charges(
    q: &[f64],
    xyzq: (&[f64], &[f64], &[f64]),
    xyzp: (&[f64], &[f64], &[f64]),
    out: (&mut [f64], &mut [f64], &mut [f64]),
) -> Result<(), &'static str> {
    // Unpack
    let (xq, yq, zq) = xyzq;
    let (xp, yp, zp) = xyzp;

    let (ex, ey, ez) = out;

    // Check lengths; if there is any possibility of mismatch,
    // the compiler will bypass vectorization
    let m = q.len();
    let n = xp.len();

    if xq.len() != m
        || yq.len() != m
        || zq.len() != m
        || yp.len() != n
        || zp.len() != n
        || ex.len() != n
        || ey.len() != n
        || ez.len() != n
    {
        return Err("Input length mismatch");
    }

    for j in 0..n {
        ex[j] = 0.0;
        ey[j] = 0.0;
        ez[j] = 0.0;
    }

    // For each charge, evaluate the contribution to each observation point
    for i in 0..m {
        let qi = q[i]; // [C]

        for j in 0..n {
            // Distance from the charge to the observation point
            let rx = xp[j] - xq[i]; // [m]
            let ry = yp[j] - yq[i]; // [m]
            let rz = zp[j] - zq[i]; // [m]

            // Do the 1/r^3 operation without the actual cube operation,
            // rolling the result into the factor that is constant between
            // the x, y, and z components.
            let sumsq = dot3(rx, ry, rz, rx, ry, rz);
            if sumsq == 0.0 {
                // Observation point on this charge; masked
                continue;
            }
            let rnorm3_inv = sumsq.powf(-1.5); // [m^-3]

            let c = qi * rnorm3_inv;

            // Sum up the contributions at each observation point on each axis
            // using fused multiply-add to reduce roundoff error.
            // The contributions added here do not have units of volt per
            // meter; the sum does after it is multiplied by
            // 1 / (4 pi eps_0) below.
            ex[j] = c.mul_add(rx, ex[j]);
            ey[j] = c.mul_add(ry, ey[j]);
            ez[j] = c.mul_add(rz, ez[j]);
        }
    }

    for j in 0..n {
        ex[j] *= ONE_OVER_4PI_EPS0;
        ey[j] *= ONE_OVER_4PI_EPS0;
        ez[j] *= ONE_OVER_4PI_EPS0;
    }

    Ok(())
}

/// E-field of the same charge collection at a single point, for the tracers.
/// Positions are given as one vector per charge; a coincident source is
/// masked like in the batch kernel.
pub fn electric_field_at(q: &[f64], positions: &[Vector3<f64>], p: Vector3<f64>) -> Vector3<f64> {
    let mut e = Vector3::zeros();
    for (qi, pos) in q.iter().zip(positions.iter()) {
        let d = p - pos;
        let r2 = d.norm_squared();
        if r2 == 0.0 {
            continue;
        }
        e += (qi / (r2 * r2.sqrt())) * d;
    }
    ONE_OVER_4PI_EPS0 * e
}
