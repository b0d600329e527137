//! Field lines of an eight-charge multipole: alternating charges on the
//! corners of a cube, with field lines traced from seed spheres around each
//! charge and a midplane field-magnitude map.

use nalgebra::Vector3;
use plotly::common::{ColorScale, ColorScalePalette};
use plotly::HeatMap;

use fieldviz::physics::{
    electric_field_at, electric_field_point_charges, sphere_seeds, FieldLineTracer, TraceDirection,
};
use fieldviz::{grid, plot};

// Model-unit charges on cube corners. The half-edge is offset off the map
// grid nodes so no evaluation lands on a singularity.
const Q: [f64; 8] = [1.0, -1.0, 1.0, 1.0, 1.0, 1.0, -1.0, -1.0];
const HALF_EDGE: f64 = 1.5;
const EXTENT: f64 = 10.0;

fn charge_positions() -> Vec<Vector3<f64>> {
    let d = HALF_EDGE;
    vec![
        Vector3::new(d, d, d),
        Vector3::new(d, d, -d),
        Vector3::new(d, -d, d),
        Vector3::new(d, -d, -d),
        Vector3::new(-d, d, d),
        Vector3::new(-d, d, -d),
        Vector3::new(-d, -d, d),
        Vector3::new(-d, -d, -d),
    ]
}

fn main() -> Result<(), &'static str> {
    let positions = charge_positions();
    let field = {
        let positions = positions.clone();
        move |p: Vector3<f64>| electric_field_at(&Q, &positions, p)
    };

    // Finer steps than the two-charge figure: lines bend hard between the
    // cube corners. Shorter propagation keeps the escaping bundles tidy.
    let mut tracer = FieldLineTracer::new(0.01, 20.0, 2.0 * EXTENT);
    // Lines terminate within 0.2 units of a charge
    tracer.terminal_field = fieldviz::ONE_OVER_4PI_EPS0 / (0.2 * 0.2);

    let mut fig = plot::figure("Eight-charge multipole field lines", 720, 720);
    let mut n_lines = 0;
    for pos in positions.iter() {
        for seed in sphere_seeds(*pos, 0.3, 3, 6) {
            let line = tracer.trace(seed, &field, TraceDirection::Both);
            fig.add_trace(plot::polyline3_trace(
                &line.x,
                &line.y,
                &line.z,
                "rgba(31,119,180,0.5)",
                1.5,
            ));
            n_lines += 1;
        }
    }
    println!("Traced {n_lines} field lines");

    std::fs::create_dir_all("plots").map_err(|_| "Could not create the plots directory")?;
    fig.write_html("plots/charge_multipole_lines.html");
    println!("Saved figure to plots/charge_multipole_lines.html");

    field_magnitude_map(&Q, &positions, "plots/charge_multipole_magnitude.html")?;

    Ok(())
}

/// |E| over the z = 0 midplane as a heat map, evaluated with the batch
/// superposition kernel.
fn field_magnitude_map(
    q: &[f64],
    positions: &[Vector3<f64>],
    filename: &str,
) -> Result<(), &'static str> {
    let axis = grid::linspace(-EXTENT, EXTENT, 41);
    let n = axis.len();

    let xq: Vec<f64> = positions.iter().map(|p| p.x).collect();
    let yq: Vec<f64> = positions.iter().map(|p| p.y).collect();
    let zq: Vec<f64> = positions.iter().map(|p| p.z).collect();

    // Flatten the plane, x-outer
    let mut xp = Vec::with_capacity(n * n);
    let mut yp = Vec::with_capacity(n * n);
    for xi in axis.iter() {
        for yj in axis.iter() {
            xp.push(*xi);
            yp.push(*yj);
        }
    }
    let zp = vec![0.0; n * n];

    let mut ex = vec![0.0; n * n];
    let mut ey = vec![0.0; n * n];
    let mut ez = vec![0.0; n * n];
    electric_field_point_charges(
        q,
        (&xq, &yq, &zq),
        (&xp, &yp, &zp),
        (&mut ex, &mut ey, &mut ez),
    )?;

    let mut magnitude = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..n {
            let pos = i * n + j;
            magnitude[i][j] = fieldviz::math::rss3(ex[pos], ey[pos], ez[pos]);
        }
    }

    let labels: Vec<String> = axis.iter().map(|v| format!("{v:.1}")).collect();
    let trace = HeatMap::new(labels.clone(), labels, magnitude)
        .color_scale(ColorScale::Palette(ColorScalePalette::Hot))
        .transpose(true)
        .name("|E|");

    let mut fig = plot::figure("Eight-charge multipole |E|, z = 0 midplane", 800, 600);
    fig.add_trace(trace);
    fig.write_html(filename);
    println!("Saved field-magnitude map to {filename}");

    Ok(())
}
