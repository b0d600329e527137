//! Solar-wind protons streaming past the tilted Earth dipole.
//!
//! A plane of particles is launched toward the globe and each trajectory is
//! integrated under `a = k (v x B)` until it escapes the viewing region or
//! the iteration budget runs out. Launch mode is the optional first argument:
//! `towards` (default, aimed straight at the origin), `anti-x`, or `anti-z`.

use nalgebra::Vector3;

use fieldviz::physics::{dipole_field_at, particle_trajectory, TrajectoryEnd};
use fieldviz::{grid, plot, MU0_OVER_4PI};

const EARTH_RADIUS: f64 = 10.0;
const MOMENT_MODEL: f64 = 2.0;
const TILT_DEG: f64 = 13.0;

// 400 km/s scaled by the display units of the 6371 km globe
const LAUNCH_SPEED: f64 = 400.0 / 6371.0 * 10.0;
const LAUNCH_DISTANCE: f64 = 25.0;
const K_LORENTZ: f64 = 2e2;
const MAX_ITERATIONS: usize = 10_000;
const LAUNCH_GRID: usize = 4; // particles per transverse axis

fn main() -> Result<(), &'static str> {
    let mode = std::env::args().nth(1).unwrap_or_else(|| "towards".into());

    let tilt = TILT_DEG.to_radians();
    let m = (MOMENT_MODEL / MU0_OVER_4PI) * Vector3::new(-tilt.sin(), 0.0, tilt.cos());
    let field = move |p: Vector3<f64>| dipole_field_at(m, p);

    // Transverse launch offsets covering [-25, 25)
    let offsets: Vec<f64> = (0..LAUNCH_GRID)
        .map(|i| -LAUNCH_DISTANCE + 2.0 * LAUNCH_DISTANCE * (i as f64) / (LAUNCH_GRID as f64))
        .collect();

    let mut xs = Vec::new();
    let mut ys = Vec::new();
    let mut zs = Vec::new();
    for a in offsets.iter() {
        for b in offsets.iter() {
            match mode.as_str() {
                // Launch plane at z = +25 descending
                "anti-z" => {
                    xs.push(*a);
                    ys.push(*b);
                    zs.push(LAUNCH_DISTANCE);
                }
                // Launch plane at x = +25, sunward side
                _ => {
                    xs.push(LAUNCH_DISTANCE);
                    ys.push(*a);
                    zs.push(*b);
                }
            }
        }
    }

    // Launch velocities per mode; the aimed mode points each particle
    // straight at the origin along its unit radial.
    let velocities: Vec<Vector3<f64>> = match mode.as_str() {
        "towards" => {
            let (_, xh, yh, zh) = grid::unit_radials(&xs, &ys, &zs)?;
            (0..xs.len())
                .map(|i| -LAUNCH_SPEED * Vector3::new(xh[i], yh[i], zh[i]))
                .collect()
        }
        "anti-x" => vec![Vector3::new(-LAUNCH_SPEED, 0.0, 0.0); xs.len()],
        "anti-z" => vec![Vector3::new(0.0, 0.0, -LAUNCH_SPEED); xs.len()],
        _ => return Err("Unknown launch mode"),
    };

    println!("Integrating {} trajectories ({mode})...", xs.len());
    let mut fig = plot::figure("Solar wind in the Earth dipole field", 720, 720);
    let mut lost = 0;
    for i in 0..xs.len() {
        let traj = particle_trajectory(
            Vector3::new(xs[i], ys[i], zs[i]),
            velocities[i],
            K_LORENTZ,
            MAX_ITERATIONS,
            field,
        );
        if traj.end == TrajectoryEnd::Lost {
            lost += 1;
        }
        println!(
            "  particle {:2}: {:5} points, start/end speed difference {:.3} %",
            i,
            traj.len(),
            traj.speed_drift_percent(),
        );
        fig.add_trace(plot::points3_trace(
            &traj.x,
            &traj.y,
            &traj.z,
            "rgb(255,185,0)",
            2,
        ));
    }
    println!("{lost} of {} particles left the viewing region", xs.len());

    fig.add_trace(plot::sphere_trace(EARTH_RADIUS, 11, 21, "black"));

    std::fs::create_dir_all("plots").map_err(|_| "Could not create the plots directory")?;
    fig.write_html("plots/solar_wind.html");
    println!("Saved figure to plots/solar_wind.html");

    Ok(())
}
