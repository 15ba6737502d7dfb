//! Damped spring with a start/stop clock
//!
//! Each frame advances the spring by the exact solution of the damped
//! harmonic oscillator over `dt`, starting from the current position and
//! velocity. Underdamped, critically damped, and overdamped systems each
//! use their own closed form, so large frame deltas never blow up the way an
//! explicit integrator can.
//!
//! A spring only advances while its clock is running. Restarting always
//! stops the clock, reseeds position and velocity, and only then starts it
//! again.

/// Longest frame delta a single step will integrate, in seconds
pub const MAX_FRAME_DELTA: f32 = 0.064;

/// Damping ratios within this distance of 1.0 use the critical solution
const CRITICAL_EPSILON: f32 = 1e-4;

/// Spring physics configuration
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpringConfig {
    /// Velocity drag coefficient
    pub damping: f32,
    /// Mass of the moving body
    pub mass: f32,
    /// Restoring force per unit of displacement
    pub stiffness: f32,
    /// Stop as soon as the spring crosses its target
    pub overshoot_clamping: bool,
    /// Speed (units/second) below which the spring may come to rest
    pub rest_speed_threshold: f32,
    /// Distance from target below which the spring may come to rest
    pub rest_displacement_threshold: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            damping: 20.0,
            mass: 0.2,
            stiffness: 100.0,
            overshoot_clamping: false,
            rest_speed_threshold: 0.2,
            rest_displacement_threshold: 0.2,
        }
    }
}

impl SpringConfig {
    /// Create a config from stiffness, damping and mass with default rest thresholds
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
            ..Default::default()
        }
    }

    /// Soft, slightly bouncy motion
    pub fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// Quick response with little overshoot
    pub fn snappy() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    /// Very fast settle, no visible rebound
    pub fn stiff() -> Self {
        Self::new(600.0, 50.0, 1.0)
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_stiffness(mut self, stiffness: f32) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_overshoot_clamping(mut self, clamp: bool) -> Self {
        self.overshoot_clamping = clamp;
        self
    }

    pub fn with_rest_speed_threshold(mut self, threshold: f32) -> Self {
        self.rest_speed_threshold = threshold.abs();
        self
    }

    pub fn with_rest_displacement_threshold(mut self, threshold: f32) -> Self {
        self.rest_displacement_threshold = threshold.abs();
        self
    }

    /// Damping ratio ζ = c / (2√(km))
    pub fn damping_ratio(&self) -> f32 {
        let km = (self.stiffness * self.mass).max(f32::EPSILON);
        self.damping / (2.0 * km.sqrt())
    }

    /// Undamped angular frequency ω₀ = √(k/m)
    pub fn natural_frequency(&self) -> f32 {
        (self.stiffness / self.mass.max(f32::EPSILON)).max(0.0).sqrt()
    }
}

/// Live values of a running spring
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpringState {
    pub position: f32,
    pub velocity: f32,
    /// Seconds elapsed since the clock last started
    pub time: f32,
    pub finished: bool,
}

/// A spring animation toward a target value
#[derive(Clone, Debug)]
pub struct Spring {
    config: SpringConfig,
    state: SpringState,
    target: f32,
    running: bool,
}

impl Spring {
    /// Create a stopped spring resting at `position`
    pub fn new(config: SpringConfig, position: f32) -> Self {
        Self {
            config,
            state: SpringState {
                position,
                finished: true,
                ..Default::default()
            },
            target: position,
            running: false,
        }
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SpringConfig) {
        self.config = config;
    }

    pub fn state(&self) -> &SpringState {
        &self.state
    }

    pub fn value(&self) -> f32 {
        self.state.position
    }

    pub fn velocity(&self) -> f32 {
        self.state.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Change the target without touching the clock
    pub fn set_target(&mut self, target: f32) {
        if target != self.target {
            self.target = target;
            self.state.finished = false;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.state.finished
    }

    /// Start the clock from the current state
    pub fn start(&mut self) {
        self.running = true;
        self.state.time = 0.0;
        self.state.finished = false;
    }

    /// Stop the clock, leaving position and velocity where they are
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Stop, reseed, and start again toward `target`
    pub fn restart(&mut self, position: f32, velocity: f32, target: f32) {
        self.stop();
        self.state = SpringState {
            position,
            velocity,
            time: 0.0,
            finished: false,
        };
        self.target = target;
        self.start();
    }

    /// Jump to `position` with the clock stopped and nothing left to animate
    pub fn snap_to(&mut self, position: f32) {
        self.stop();
        self.target = position;
        self.state = SpringState {
            position,
            finished: true,
            ..Default::default()
        };
    }

    /// Advance by `dt` seconds
    ///
    /// Does nothing while the clock is stopped. Returns true on the step
    /// where the spring comes to rest; the clock keeps running until the
    /// owner stops it.
    pub fn step(&mut self, dt: f32) -> bool {
        if !self.running || self.state.finished {
            return false;
        }
        let dt = dt.clamp(0.0, MAX_FRAME_DELTA);
        if dt == 0.0 {
            return false;
        }

        let prev_position = self.state.position;
        let (position, velocity) = solve(
            &self.config,
            self.state.position - self.target,
            self.state.velocity,
            dt,
        );
        self.state.position = self.target + position;
        self.state.velocity = velocity;
        self.state.time += dt;

        let overshooting = self.config.overshoot_clamping
            && self.config.stiffness != 0.0
            && if prev_position < self.target {
                self.state.position > self.target
            } else {
                self.state.position < self.target
            };
        let resting_speed = self.state.velocity.abs() < self.config.rest_speed_threshold;
        let resting_displacement = self.config.stiffness == 0.0
            || (self.target - self.state.position).abs() < self.config.rest_displacement_threshold;

        if overshooting || (resting_speed && resting_displacement) {
            if self.config.stiffness != 0.0 {
                self.state.velocity = 0.0;
                self.state.position = self.target;
            }
            self.state.finished = true;
            return true;
        }
        false
    }
}

/// Displacement and velocity after `t` seconds, from displacement `d0`
/// (position minus target) and velocity `v0`
fn solve(config: &SpringConfig, d0: f32, v0: f32, t: f32) -> (f32, f32) {
    let zeta = config.damping_ratio();
    let omega0 = config.natural_frequency();

    if omega0 == 0.0 {
        // No restoring force: the body coasts under damping alone
        let drag = config.damping / config.mass.max(f32::EPSILON);
        if drag == 0.0 {
            return (d0 + v0 * t, v0);
        }
        let decay = (-drag * t).exp();
        return (d0 + v0 * (1.0 - decay) / drag, v0 * decay);
    }

    if zeta < 1.0 - CRITICAL_EPSILON {
        let alpha = zeta * omega0;
        let omega1 = omega0 * (1.0 - zeta * zeta).sqrt();
        let envelope = (-alpha * t).exp();
        let (sin1, cos1) = (omega1 * t).sin_cos();
        let b = (v0 + alpha * d0) / omega1;
        let d = envelope * (d0 * cos1 + b * sin1);
        let v = envelope * (v0 * cos1 - (alpha * b + omega1 * d0) * sin1);
        (d, v)
    } else if zeta <= 1.0 + CRITICAL_EPSILON {
        let envelope = (-omega0 * t).exp();
        let b = v0 + omega0 * d0;
        let d = envelope * (d0 + b * t);
        let v = envelope * (v0 - omega0 * b * t);
        (d, v)
    } else {
        let root = (zeta * zeta - 1.0).sqrt();
        let r1 = -omega0 * (zeta - root);
        let r2 = -omega0 * (zeta + root);
        let c2 = (v0 - r1 * d0) / (r2 - r1);
        let c1 = d0 - c2;
        let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
        (c1 * e1 + c2 * e2, c1 * r1 * e1 + c2 * r2 * e2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    fn run_until_finished(spring: &mut Spring, max_frames: usize) -> Option<usize> {
        (0..max_frames).find(|_| spring.step(FRAME))
    }

    #[test]
    fn test_default_config_values() {
        let config = SpringConfig::default();
        assert_eq!(config.damping, 20.0);
        assert_eq!(config.mass, 0.2);
        assert_eq!(config.stiffness, 100.0);
        assert!(!config.overshoot_clamping);
        // ζ = 20 / (2·√20) > 1, so the default settle is overdamped
        assert!(config.damping_ratio() > 1.0);
    }

    #[test]
    fn test_stopped_spring_does_not_move() {
        let mut spring = Spring::new(SpringConfig::default(), 0.0);
        spring.set_target(100.0);
        assert!(!spring.step(FRAME));
        assert_eq!(spring.value(), 0.0);
    }

    #[test]
    fn test_default_spring_settles_on_target() {
        let mut spring = Spring::new(SpringConfig::default(), 0.0);
        spring.restart(0.0, 0.0, 250.0);
        let frames = run_until_finished(&mut spring, 600);
        assert!(frames.is_some());
        assert_eq!(spring.value(), 250.0);
        assert_eq!(spring.velocity(), 0.0);
        assert!(spring.is_finished());
    }

    #[test]
    fn test_every_damping_regime_finishes() {
        let configs = [
            SpringConfig::gentle(),
            SpringConfig::snappy(),
            SpringConfig::stiff(),
            SpringConfig::default(),
            // critically damped: c = 2√(km)
            SpringConfig::new(100.0, 20.0, 1.0),
            SpringConfig::new(100.0, 1.0, 1.0),
        ];
        for config in configs {
            for displacement in [-5000.0, -1.0, 0.5, 37.0, 12000.0] {
                let mut spring = Spring::new(config, displacement);
                spring.restart(displacement, 0.0, 0.0);
                assert!(
                    run_until_finished(&mut spring, 20_000).is_some(),
                    "{config:?} from {displacement} never settled"
                );
            }
        }
    }

    #[test]
    fn test_overshoot_clamping_stops_at_target() {
        let config = SpringConfig::gentle().with_overshoot_clamping(true);
        let mut spring = Spring::new(config, 0.0);
        spring.restart(0.0, 0.0, 100.0);

        let mut max_seen = 0.0f32;
        while !spring.step(FRAME) {
            max_seen = max_seen.max(spring.value());
        }
        assert!(max_seen <= 100.0);
        assert_eq!(spring.value(), 100.0);
    }

    #[test]
    fn test_underdamped_spring_overshoots_without_clamping() {
        let mut spring = Spring::new(SpringConfig::gentle(), 0.0);
        spring.restart(0.0, 0.0, 100.0);

        let mut max_seen = 0.0f32;
        for _ in 0..120 {
            spring.step(FRAME);
            max_seen = max_seen.max(spring.value());
        }
        assert!(max_seen > 100.0);
    }

    #[test]
    fn test_restart_reseeds_state() {
        let mut spring = Spring::new(SpringConfig::default(), 0.0);
        spring.restart(0.0, 0.0, 100.0);
        spring.step(FRAME);
        spring.restart(40.0, 5.0, -10.0);

        assert!(spring.is_running());
        assert_eq!(spring.value(), 40.0);
        assert_eq!(spring.velocity(), 5.0);
        assert_eq!(spring.target(), -10.0);
        assert_eq!(spring.state().time, 0.0);
    }

    #[test]
    fn test_large_frame_delta_is_capped() {
        let mut a = Spring::new(SpringConfig::default(), 0.0);
        let mut b = a.clone();
        a.restart(0.0, 0.0, 100.0);
        b.restart(0.0, 0.0, 100.0);
        a.step(10.0);
        b.step(MAX_FRAME_DELTA);
        assert_eq!(a.value(), b.value());
    }
}
