//! Field evaluation and integration kernels.

pub mod dipole;
pub mod field_line;
pub mod point_charge;
pub mod trajectory;

pub use dipole::{dipole_field_at, flux_density_dipole, flux_density_dipole_par};
pub use field_line::{sphere_seeds, FieldLine, FieldLineTracer, StoppingCause, TraceDirection};
pub use point_charge::{
    electric_field_at, electric_field_point_charges, electric_field_point_charges_par,
};
pub use trajectory::{particle_trajectory, Trajectory, TrajectoryEnd};
