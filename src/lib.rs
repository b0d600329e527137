//! Closed-form dipole and multipole field evaluation with 3D figure output.
//!
//! The crate provides vectorized kernels for the magnetic field of a point
//! dipole and the electrostatic field of a point-charge collection, a
//! forward-Euler Lorentz-force particle tracer, and a fixed-step RK4
//! field-line tracer. The binaries under `src/bin` each assemble one figure
//! from these pieces and write it to disk as interactive HTML.

use core::f64::consts::PI;

pub mod grid;
pub mod math;
pub mod physics;
pub mod plot;

/// (H/m) vacuum magnetic permeability
pub const MU_0: f64 = 1.256_637_062_12e-6;

/// (H/m) mu_0 / (4 pi), the shared prefactor of the magnetic kernels
pub const MU0_OVER_4PI: f64 = MU_0 / (4.0 * PI);

/// (F/m) vacuum permittivity
pub const EPSILON_0: f64 = 8.854_187_812_8e-12;

/// (m/F) 1 / (4 pi epsilon_0), the shared prefactor of the electric kernels
pub const ONE_OVER_4PI_EPS0: f64 = 1.0 / (4.0 * PI * EPSILON_0);
