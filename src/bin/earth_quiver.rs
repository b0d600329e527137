//! The Earth's dipole field sampled on a cartesian lattice and drawn as
//! vector glyphs around a wireframe globe.

use nalgebra::Vector3;

use fieldviz::physics::flux_density_dipole_par;
use fieldviz::{grid, plot, MU0_OVER_4PI};

// Model units: lengths are display units (the globe spans 12), and the
// moment is chosen so that mu_0/(4 pi) |m| = 2, giving |B| = 2/r^3 on the
// dipole axis.
const EARTH_RADIUS: f64 = 12.0;
const MOMENT_MODEL: f64 = 2.0;

fn main() -> Result<(), &'static str> {
    // Lattice out to two Earth radii on each side, 13 samples per radius
    let step = EARTH_RADIUS / 13.0;
    let (x, y, z) = grid::lattice3(-2.0 * EARTH_RADIUS, 2.0 * EARTH_RADIUS, step)?;
    println!("Evaluating the dipole field at {} lattice points...", x.len());

    // Axis-aligned moment, geographic north up
    let m = Vector3::new(0.0, 0.0, MOMENT_MODEL / MU0_OVER_4PI);

    let mut bx = vec![0.0; x.len()];
    let mut by = vec![0.0; x.len()];
    let mut bz = vec![0.0; x.len()];
    flux_density_dipole_par(m, (&x, &y, &z), (&mut bx, &mut by, &mut bz))?;

    // Direction-only glyphs sized to the lattice spacing
    plot::unit_glyphs3(&mut bx, &mut by, &mut bz);

    let mut fig = plot::figure("Earth dipole field", 720, 720);
    fig.add_trace(plot::quiver3_trace(
        (&x, &y, &z),
        (&bx, &by, &bz),
        0.8 * step,
        "rgb(31,119,180)",
    )?);
    fig.add_trace(plot::sphere_trace(EARTH_RADIUS, 11, 11, "black"));

    std::fs::create_dir_all("plots").map_err(|_| "Could not create the plots directory")?;
    fig.write_html("plots/earth_quiver.html");
    println!("Saved figure to plots/earth_quiver.html");

    Ok(())
}
