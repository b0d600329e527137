//! Field lines of the tilted Earth dipole, traced in both directions from a
//! ring of seed points and drawn around a wireframe globe.

use nalgebra::Vector3;

use fieldviz::physics::{dipole_field_at, sphere_seeds, FieldLineTracer, TraceDirection};
use fieldviz::{plot, MU0_OVER_4PI};

const EARTH_RADIUS: f64 = 10.0;
const MOMENT_MODEL: f64 = 2.0;
// Rotation tilt ~23 deg and magnetic tilt ~10 deg from the rotation axis
// combine to ~13 deg between the moment and the z-axis.
const TILT_DEG: f64 = 13.0;

fn main() -> Result<(), &'static str> {
    let tilt = TILT_DEG.to_radians();
    let m = (MOMENT_MODEL / MU0_OVER_4PI) * Vector3::new(-tilt.sin(), 0.0, tilt.cos());
    let field = move |p: Vector3<f64>| dipole_field_at(m, p);

    // Seeds on a sphere just above the surface; the tracer follows each line
    // until it leaves the two-radii viewing region.
    let seeds = sphere_seeds(Vector3::zeros(), 1.2 * EARTH_RADIUS, 5, 10);
    let mut tracer = FieldLineTracer::new(0.1, 400.0, 2.0 * EARTH_RADIUS);
    // Lines that dive into the globe stop near its core instead of
    // thrashing around the dipole singularity
    tracer.terminal_field = 0.25;

    println!("Tracing {} field lines...", seeds.len());
    let mut fig = plot::figure("Earth dipole field lines", 720, 720);
    for seed in seeds.iter() {
        let line = tracer.trace(*seed, &field, TraceDirection::Both);
        fig.add_trace(plot::polyline3_trace(
            &line.x,
            &line.y,
            &line.z,
            "rgb(31,119,180)",
            2.0,
        ));
    }
    fig.add_trace(plot::sphere_trace(EARTH_RADIUS, 11, 21, "black"));

    std::fs::create_dir_all("plots").map_err(|_| "Could not create the plots directory")?;
    fig.write_html("plots/earth_field_lines.html");
    println!("Saved figure to plots/earth_field_lines.html");

    Ok(())
}
