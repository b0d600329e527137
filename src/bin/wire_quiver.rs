//! The magnetic field circling a straight current-carrying wire, drawn as a
//! 2D quiver over the xy-plane.

use plotly::layout::Axis;
use plotly::Plot;

use fieldviz::{grid, plot};

const EXTENT: f64 = 2.0; // [cm]
const N: usize = 10; // samples per axis

fn main() -> Result<(), &'static str> {
    // Meshgrid over the plane, flattened x-outer
    let axis = grid::linspace(-EXTENT, EXTENT, N);
    let mut x = Vec::with_capacity(N * N);
    let mut y = Vec::with_capacity(N * N);
    for xi in axis.iter() {
        for yj in axis.iter() {
            x.push(*xi);
            y.push(*yj);
        }
    }

    // B wraps the wire: (-y, x) / s^2 for a wire along z
    let mut bx = Vec::with_capacity(N * N);
    let mut by = Vec::with_capacity(N * N);
    for i in 0..x.len() {
        let s2 = x[i].mul_add(x[i], y[i] * y[i]);
        bx.push(-y[i] / s2);
        by.push(x[i] / s2);
    }

    // Scale the longest arrow to one grid gap
    let gap = 2.0 * EXTENT / ((N - 1) as f64);
    let bmax = bx
        .iter()
        .zip(by.iter())
        .map(|(u, v)| fieldviz::math::rss3(*u, *v, 0.0))
        .fold(0.0, f64::max);
    let scale = gap / bmax;

    let mut fig = Plot::new();
    fig.add_trace(plot::quiver2_trace((&x, &y), (&bx, &by), scale, "black")?);
    // One grid gap of margin around the outermost arrows
    fig.set_layout(
        plot::figure_layout("Magnetic field of a wire with I = 50 A", 600, 600)
            .x_axis(Axis::new().title("x (cm)").range(vec![-EXTENT - gap, EXTENT + gap]))
            .y_axis(Axis::new().title("y (cm)").range(vec![-EXTENT - gap, EXTENT + gap])),
    );

    std::fs::create_dir_all("plots").map_err(|_| "Could not create the plots directory")?;
    fig.write_html("plots/wire_quiver.html");
    println!("Saved figure to plots/wire_quiver.html");

    Ok(())
}
