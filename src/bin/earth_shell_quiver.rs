//! The Earth's dipole field sampled on a spherical shell cross-section and
//! drawn as vector glyphs.

use nalgebra::Vector3;

use fieldviz::physics::flux_density_dipole;
use fieldviz::{grid, plot, MU0_OVER_4PI};

const EARTH_RADIUS: f64 = 6371.0; // [km]
const MOMENT_MODEL: f64 = 2.0;
const N: usize = 13; // samples per coordinate

fn main() -> Result<(), &'static str> {
    // Shell from the surface out to two radii; the full-turn polar sweep at
    // a single azimuth covers the great circle through the poles.
    let r = grid::linspace(EARTH_RADIUS, 2.0 * EARTH_RADIUS, N);
    let theta = grid::linspace(0.0, 2.0 * core::f64::consts::PI, N);
    let phi = [0.0];
    let (x, y, z) = grid::spherical_product(&r, &theta, &phi);
    println!("Evaluating the dipole field at {} shell points...", x.len());

    let m = Vector3::new(0.0, 0.0, MOMENT_MODEL / MU0_OVER_4PI);

    let mut bx = vec![0.0; x.len()];
    let mut by = vec![0.0; x.len()];
    let mut bz = vec![0.0; x.len()];
    flux_density_dipole(m, (&x, &y, &z), (&mut bx, &mut by, &mut bz))?;

    // Direction-only glyphs sized to the shell spacing
    plot::unit_glyphs3(&mut bx, &mut by, &mut bz);
    let glyph = 0.8 * EARTH_RADIUS / ((N - 1) as f64);

    let mut fig = plot::figure("Earth dipole field, polar cross-section", 400, 400);
    fig.add_trace(plot::quiver3_trace(
        (&x, &y, &z),
        (&bx, &by, &bz),
        glyph,
        "rgb(31,119,180)",
    )?);
    fig.add_trace(plot::sphere_trace(EARTH_RADIUS, 11, 21, "black"));

    std::fs::create_dir_all("plots").map_err(|_| "Could not create the plots directory")?;
    fig.write_html("plots/earth_shell_quiver.html");
    println!("Saved figure to plots/earth_shell_quiver.html");

    Ok(())
}
