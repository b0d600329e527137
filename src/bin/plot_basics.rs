//! Warm-up plotting script: a sine/cosine line pair and a product-wave heat
//! map, saved like every other figure.

use plotly::common::{ColorScale, ColorScalePalette, Mode};
use plotly::{HeatMap, Plot, Scatter};

use fieldviz::{grid, plot};

fn main() -> Result<(), &'static str> {
    std::fs::create_dir_all("plots").map_err(|_| "Could not create the plots directory")?;

    // Line pair over two periods
    let xs = grid::linspace(0.0, 4.0 * core::f64::consts::PI, 250);
    let ys: Vec<f64> = xs.iter().map(|x| x.sin()).collect();
    let zs: Vec<f64> = xs.iter().map(|x| x.cos()).collect();

    let mut fig = Plot::new();
    fig.add_trace(
        Scatter::new(xs.clone(), ys)
            .mode(Mode::Lines)
            .name("sin(x)"),
    );
    fig.add_trace(
        Scatter::new(xs.clone(), zs)
            .mode(Mode::Lines)
            .name("cos(x)"),
    );
    fig.set_layout(plot::planar_layout("Sine and cosine", "x", "y", 800, 600));
    fig.write_html("plots/plot_basics_lines.html");
    println!("Saved figure to plots/plot_basics_lines.html");

    // Product wave over one period per axis
    let axis = grid::linspace(0.0, 2.0 * core::f64::consts::PI, 250);
    let mut wave = vec![vec![0.0; axis.len()]; axis.len()];
    for (i, x) in axis.iter().enumerate() {
        for (j, y) in axis.iter().enumerate() {
            wave[i][j] = x.sin() * y.cos();
        }
    }

    let labels: Vec<String> = axis.iter().map(|v| format!("{v:.2}")).collect();
    let trace = HeatMap::new(labels.clone(), labels, wave)
        .color_scale(ColorScale::Palette(ColorScalePalette::Viridis))
        .transpose(true)
        .name("sin(x) cos(y)");

    let mut fig = Plot::new();
    fig.add_trace(trace);
    fig.set_layout(plot::planar_layout("Product wave", "x", "y", 800, 600));
    fig.write_html("plots/plot_basics_heatmap.html");
    println!("Saved figure to plots/plot_basics_heatmap.html");

    Ok(())
}
