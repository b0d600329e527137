//! Charged-particle trajectories under the Lorentz force.
//!
//! Explicit forward Euler with a fixed, launch-speed-derived time step. No
//! adaptive stepping and no stability guarantee; the proportionality
//! constant, step count and escape bound are hand-picked per demo.

use nalgebra::Vector3;

/// Why integration ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrajectoryEnd {
    /// A coordinate of the next position exceeded the escape bound; the
    /// particle is considered lost and the offending point is not recorded.
    Lost,
    /// The iteration budget ran out inside the bound.
    Exhausted,
}

/// Recorded history of one particle.
pub struct Trajectory {
    /// (m) positions, one entry per completed step plus the launch point
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    /// (m/s) velocities matching the positions
    pub v: Vec<Vector3<f64>>,
    pub end: TrajectoryEnd,
}

impl Trajectory {
    /// Number of recorded points, launch point included.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// (%) relative difference between launch and final speed. Forward Euler
    /// does not conserve speed under a magnetic force, so this is the cheap
    /// figure of merit for how badly a run drifted.
    pub fn speed_drift_percent(&self) -> f64 {
        let v_first = self.v.first().map_or(0.0, |v| v.norm());
        let v_last = self.v.last().map_or(0.0, |v| v.norm());
        (v_first - v_last) / v_first * 100.0
    }
}

/// Integrate a charged-particle trajectory through a magnetic field.
///
/// # Arguments
///
/// * `r0`: (m) launch position
/// * `v0`: (m/s) launch velocity; must be nonzero, the step size derives from it
/// * `k`:  (C/kg) proportionality constant of the Lorentz acceleration
///   `a = k (v x B)`, absorbing charge-to-mass ratio and unit conversions
/// * `max_iterations`: iteration budget, bounding the recorded length
/// * `field`: (T) magnetic field sampled at the current position
///
/// # Commentary
///
/// One step advances the particle by 50/720 length units, one display pixel
/// of a 720-pixel frame spanning 50 units, so `dt = (50/720) / |v0|`. The
/// escape bound is one unit beyond the largest launch coordinate magnitude,
/// `limit = 1 + max(|x0|, |y0|, |z0|)`; a particle stepping past it in any
/// coordinate stops integration and is reported as lost.
///
/// The velocity updates first, but the position advances with the pre-update
/// velocity of the same step.
pub fn particle_trajectory<F>(
    r0: Vector3<f64>,
    v0: Vector3<f64>,
    k: f64,
    max_iterations: usize,
    field: F,
) -> Trajectory
where
    F: Fn(Vector3<f64>) -> Vector3<f64>,
{
    let limit = 1.0 + r0.abs().max(); // [m]
    let dt = (50.0 / 720.0) / v0.norm(); // [s]

    let mut x = Vec::with_capacity(max_iterations);
    let mut y = Vec::with_capacity(max_iterations);
    let mut z = Vec::with_capacity(max_iterations);
    let mut v = Vec::with_capacity(max_iterations);
    x.push(r0.x);
    y.push(r0.y);
    z.push(r0.z);
    v.push(v0);

    let mut end = TrajectoryEnd::Exhausted;
    for i in 0..max_iterations.saturating_sub(1) {
        let p = Vector3::new(x[i], y[i], z[i]);
        let b = field(p); // [T]

        let vi = v[i];
        let v_next = vi + k * vi.cross(&b) * dt; // [m/s]
        let p_next = p + vi * dt; // [m]

        if p_next.x.abs() > limit || p_next.y.abs() > limit || p_next.z.abs() > limit {
            end = TrajectoryEnd::Lost;
            break;
        }

        v.push(v_next);
        x.push(p_next.x);
        y.push(p_next.y);
        z.push(p_next.z);
    }

    Trajectory { x, y, z, v, end }
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

    /// With no field the motion is a straight line at constant velocity,
    /// one pixel-length per step.
    #[test]
    fn test_field_free_motion() {
        let v0 = Vector3::new(0.0, 3.0, 4.0); // speed 5
        let traj = particle_trajectory(
            Vector3::new(0.0, -20.0, 0.0),
            v0,
            1.0,
            100,
            |_| Vector3::zeros(),
        );

        assert_eq!(traj.end, TrajectoryEnd::Exhausted);
        assert_eq!(traj.len(), 100);
        let step = 50.0 / 720.0;
        for i in 0..traj.len() {
            assert!(approx(0.0, traj.x[i], 0.0, 1e-15));
            assert!(approx(-20.0 + 0.6 * step * i as f64, traj.y[i], 1e-12, 1e-12));
            assert!(approx(0.8 * step * i as f64, traj.z[i], 1e-12, 1e-12));
            assert_eq!(traj.v[i], v0);
        }
        assert!(approx(0.0, traj.speed_drift_percent(), 0.0, 1e-15));
    }

    /// A particle leaving the bound stops early, reports itself lost, and
    /// records no point beyond the bound.
    #[test]
    fn test_escape() {
        let traj = particle_trajectory(
            Vector3::zeros(),
            Vector3::new(1.0, 0.0, 0.0),
            1.0,
            10_000,
            |_| Vector3::zeros(),
        );

        // limit = 1; dt advances x by 50/720 per step, so the first
        // violation is the 15th step (15 * 50/720 > 1) and points 0..=14
        // survive.
        assert_eq!(traj.end, TrajectoryEnd::Lost);
        assert_eq!(traj.len(), 15);
        let limit = 1.0;
        assert!(traj.x.iter().all(|xi| xi.abs() <= limit));
    }

    /// First Euler step against hand-evaluated arithmetic in a uniform
    /// axial field.
    #[test]
    fn test_first_step() {
        let b0 = 2.5;
        let speed = 4.0;
        let k = 3.0;
        let traj = particle_trajectory(
            Vector3::zeros(),
            Vector3::new(speed, 0.0, 0.0),
            k,
            2,
            move |_| Vector3::new(0.0, 0.0, b0),
        );

        assert_eq!(traj.len(), 2);
        let dt = (50.0 / 720.0) / speed;
        // v x B = (vx, 0, 0) x (0, 0, b0) = (0, -vx b0, 0)
        assert_eq!(traj.v[1], Vector3::new(speed, -k * speed * b0 * dt, 0.0));
        // position advances with the pre-update velocity
        assert!(approx(speed * dt, traj.x[1], 1e-15, 0.0));
        assert_eq!(traj.y[1], 0.0);
        assert_eq!(traj.z[1], 0.0);
    }

    /// Forward Euler gains speed in a magnetic field; the drift diagnostic
    /// reports that as a negative start-minus-end percentage.
    #[test]
    fn test_speed_drift_sign() {
        let traj = particle_trajectory(
            Vector3::new(0.0, -5.0, 0.0),
            Vector3::new(2.0, 0.0, 0.0),
            10.0,
            500,
            |_| Vector3::new(0.0, 0.0, 1.0),
        );

        let v_first = traj.v.first().unwrap().norm();
        let v_last = traj.v.last().unwrap().norm();
        assert!(v_last > v_first);
        assert!(traj.speed_drift_percent() < 0.0);
    }
}
