//! Field-line tracing by fixed-step RK4 on the unit field direction.
//!
//! Streamline geometry depends only on the field direction, so the tracer
//! normalizes every sample; step size is arc length, not time.

use core::f64::consts::PI;

use nalgebra::Vector3;

/// Whether to follow the field, run against it, or do both from the seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceDirection {
    Forward,
    Backward,
    /// Concatenates the reversed backward trace with the forward trace into
    /// one polyline through the seed.
    Both,
}

/// Reason for terminating a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoppingCause {
    /// The field vanished or degenerated at the head of the line.
    NullField,
    /// The field magnitude crossed the terminal threshold; the line ran
    /// into a source or sink.
    Sink,
    /// The head of the line left the tracing domain.
    OutOfBounds,
    /// The accumulated arc length reached the configured maximum.
    MaxPropagation,
    /// The step budget ran out first.
    MaxSteps,
}

/// One traced polyline and why it stopped. For a `Both` trace the cause is
/// the forward half's.
pub struct FieldLine {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub cause: StoppingCause,
}

impl FieldLine {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Fixed-step field-line tracer.
pub struct FieldLineTracer {
    /// (m) arc-length advanced per step
    pub step: f64,
    /// (m) total arc length budget per direction
    pub max_propagation: f64,
    /// step budget per direction
    pub max_steps: usize,
    /// (m) domain radius about the origin; the trace stops outside
    pub bounds: f64,
    /// (T) or (V/m) field magnitude at which the line is considered to have
    /// reached a source or sink and stops
    pub terminal_field: f64,
}

impl FieldLineTracer {
    pub fn new(step: f64, max_propagation: f64, bounds: f64) -> Self {
        Self {
            step,
            max_propagation,
            max_steps: 10_000,
            bounds,
            terminal_field: f64::INFINITY,
        }
    }

    /// Trace the field line through `seed`.
    pub fn trace<F>(&self, seed: Vector3<f64>, field: &F, direction: TraceDirection) -> FieldLine
    where
        F: Fn(Vector3<f64>) -> Vector3<f64>,
    {
        match direction {
            TraceDirection::Forward => self.trace_signed(seed, field, 1.0),
            TraceDirection::Backward => self.trace_signed(seed, field, -1.0),
            TraceDirection::Both => {
                let back = self.trace_signed(seed, field, -1.0);
                let fwd = self.trace_signed(seed, field, 1.0);

                // Walk the backward half in reverse, dropping its copy of
                // the seed, then append the forward half.
                let n = back.len() + fwd.len() - 1;
                let mut x = Vec::with_capacity(n);
                let mut y = Vec::with_capacity(n);
                let mut z = Vec::with_capacity(n);
                for i in (1..back.len()).rev() {
                    x.push(back.x[i]);
                    y.push(back.y[i]);
                    z.push(back.z[i]);
                }
                x.extend_from_slice(&fwd.x);
                y.extend_from_slice(&fwd.y);
                z.extend_from_slice(&fwd.z);

                FieldLine {
                    x,
                    y,
                    z,
                    cause: fwd.cause,
                }
            }
        }
    }

    fn trace_signed<F>(&self, seed: Vector3<f64>, field: &F, sign: f64) -> FieldLine
    where
        F: Fn(Vector3<f64>) -> Vector3<f64>,
    {
        let mut x = vec![seed.x];
        let mut y = vec![seed.y];
        let mut z = vec![seed.z];

        let mut p = seed;
        let mut cause = StoppingCause::MaxSteps;

        for i in 0..self.max_steps {
            let p_next = match rk4_step(p, self.step, sign, field) {
                Some(p_next) => p_next,
                None => {
                    cause = StoppingCause::NullField;
                    break;
                }
            };

            if p_next.norm() > self.bounds {
                cause = StoppingCause::OutOfBounds;
                break;
            }

            x.push(p_next.x);
            y.push(p_next.y);
            z.push(p_next.z);
            p = p_next;

            // The line keeps its last point when it dives into a source;
            // everything after it would only thrash around the singularity.
            if field(p_next).norm() > self.terminal_field {
                cause = StoppingCause::Sink;
                break;
            }

            // Arc length as a count-times-step product rather than a
            // running sum, which would drift over thousands of steps
            if ((i + 1) as f64) * self.step >= self.max_propagation {
                cause = StoppingCause::MaxPropagation;
                break;
            }
        }

        FieldLine { x, y, z, cause }
    }
}

/// One RK4 step of arc length `h` along the unit field direction, or `None`
/// where the field vanishes or degenerates.
fn rk4_step<F>(p: Vector3<f64>, h: f64, sign: f64, field: &F) -> Option<Vector3<f64>>
where
    F: Fn(Vector3<f64>) -> Vector3<f64>,
{
    let f = |x: Vector3<f64>| -> Option<Vector3<f64>> {
        let b = field(x);
        let m = b.norm();
        if m > 0.0 && m.is_finite() {
            Some(b * (sign / m))
        } else {
            None
        }
    };

    let k1 = f(p)?;
    let k2 = f(p + 0.5 * h * k1)?;
    let k3 = f(p + 0.5 * h * k2)?;
    let k4 = f(p + h * k3)?;
    let dir = (k1 + 2.0 * k2 + 2.0 * k3 + k4) / 6.0;

    let p_next = p + h * dir;
    if p_next.x.is_finite() && p_next.y.is_finite() && p_next.z.is_finite() {
        Some(p_next)
    } else {
        None
    }
}

/// Seed points distributed over a sphere around a source: `n_theta` interior
/// rings of `n_phi` points each, poles excluded.
pub fn sphere_seeds(
    center: Vector3<f64>,
    radius: f64,
    n_theta: usize,
    n_phi: usize,
) -> Vec<Vector3<f64>> {
    let mut seeds = Vec::with_capacity(n_theta * n_phi);
    for j in 0..n_theta {
        let theta = PI * ((j + 1) as f64) / ((n_theta + 1) as f64);
        for k in 0..n_phi {
            let phi = 2.0 * PI * (k as f64) / (n_phi as f64);
            seeds.push(
                center
                    + radius
                        * Vector3::new(theta.sin() * phi.cos(), theta.sin() * phi.sin(), theta.cos()),
            );
        }
    }
    seeds
}

#[cfg(test)]
mod test {
    use super::*;

    /// Div/0-resistant approximate comparison
    fn approx(truth: f64, val: f64, rtol: f64, atol: f64) -> bool {
        let abs_err = (val - truth).abs();
        let lim = rtol * truth.abs() + atol;
        abs_err < lim
    }

    /// In the radial field `B = r` a forward trace runs straight outward and
    /// exhausts its propagation budget.
    #[test]
    fn test_radial_outward() {
        let tracer = FieldLineTracer::new(0.1, 5.0, 1e6);
        let line = tracer.trace(Vector3::new(1.0, 0.0, 0.0), &|p| p, TraceDirection::Forward);

        assert_eq!(line.cause, StoppingCause::MaxPropagation);
        // 50 steps of 0.1 reach the budget exactly
        assert_eq!(line.len(), 51);
        for i in 1..line.len() {
            assert!(line.x[i] > line.x[i - 1]);
            assert!(approx(0.0, line.y[i], 0.0, 1e-12));
            assert!(approx(0.0, line.z[i], 0.0, 1e-12));
        }
        let last = *line.x.last().unwrap();
        assert!(approx(6.0, last, 1e-9, 0.0));
    }

    /// A trace whose head leaves the domain stops with `OutOfBounds` and
    /// records no point outside it.
    #[test]
    fn test_out_of_bounds() {
        let tracer = FieldLineTracer::new(0.5, 1e9, 3.0);
        let line = tracer.trace(Vector3::new(1.0, 0.0, 0.0), &|p| p, TraceDirection::Forward);

        assert_eq!(line.cause, StoppingCause::OutOfBounds);
        assert!(line
            .x
            .iter()
            .zip(line.y.iter().zip(line.z.iter()))
            .all(|(x, (y, z))| crate::math::rss3(*x, *y, *z) <= 3.0));
    }

    /// A vanishing field stops the trace immediately; only the seed remains.
    #[test]
    fn test_null_field() {
        let tracer = FieldLineTracer::new(0.1, 10.0, 100.0);
        let line = tracer.trace(
            Vector3::new(1.0, 2.0, 3.0),
            &|_| Vector3::zeros(),
            TraceDirection::Both,
        );

        assert_eq!(line.cause, StoppingCause::NullField);
        assert_eq!(line.len(), 1);
        assert_eq!(line.x[0], 1.0);
    }

    /// A `Both` trace is one polyline through the seed with the two halves
    /// joined tail-to-head and the seed stored once.
    #[test]
    fn test_both_directions() {
        let tracer = FieldLineTracer::new(0.1, 2.0, 1e6);
        // Uniform field along +x: the line is the x-axis through the seed
        let field = |_: Vector3<f64>| Vector3::new(4.0, 0.0, 0.0);
        let line = tracer.trace(Vector3::zeros(), &field, TraceDirection::Both);

        assert_eq!(line.cause, StoppingCause::MaxPropagation);
        // 20 backward points + seed + 20 forward points
        assert_eq!(line.len(), 41);
        assert!(approx(-2.0, line.x[0], 1e-9, 0.0));
        assert!(approx(0.0, line.x[20], 0.0, 1e-12));
        assert!(approx(2.0, *line.x.last().unwrap(), 1e-9, 0.0));
        // Monotone through the join
        for i in 1..line.len() {
            assert!(line.x[i] > line.x[i - 1]);
        }
    }

    /// A line attracted into a point sink stops once the field magnitude
    /// crosses the terminal threshold.
    #[test]
    fn test_sink() {
        // Point attractor at the origin, 1/r^2 magnitude
        let field = |p: Vector3<f64>| -p / p.norm().powi(3);
        let mut tracer = FieldLineTracer::new(0.05, 100.0, 1e6);
        tracer.terminal_field = 1.0;

        let line = tracer.trace(Vector3::new(2.0, 0.0, 0.0), &field, TraceDirection::Forward);
        assert_eq!(line.cause, StoppingCause::Sink);
        // Stopped at the r = 1 surface where |field| crosses 1, give or
        // take one step
        let last = crate::math::rss3(
            *line.x.last().unwrap(),
            *line.y.last().unwrap(),
            *line.z.last().unwrap(),
        );
        assert!(approx(1.0, last, 0.1, 0.0));
    }

    #[test]
    fn test_sphere_seeds() {
        let center = Vector3::new(0.5, 2.5, 0.5);
        let seeds = sphere_seeds(center, 0.3, 4, 8);
        assert_eq!(seeds.len(), 32);
        for s in seeds.iter() {
            assert!(approx(0.3, (s - center).norm(), 1e-12, 0.0));
        }
    }
}
