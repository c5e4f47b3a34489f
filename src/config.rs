//! Configuration types for the simulation stepper.

use crate::error::PhysicsError;
use crate::float::Float;
use crate::integrator::Rk4Scheme;
use crate::vec::Vec;

/// Configuration for stepping a spring mesh.
///
/// # Builder Pattern
/// ```
/// use weft::config::SolverConfig;
/// use weft::vec::Vec3;
///
/// let config: SolverConfig<Vec3<f32>> = SolverConfig::new()
///     .with_timestep(0.005)
///     .with_gravity(Vec3::new(0.0, -9.81, 0.0))
///     .with_sub_steps(2);
/// ```
#[derive(Clone, Debug)]
pub struct SolverConfig<V: Vec> {
    /// Fixed step `h` advanced per call to `step`. Default: 0.005.
    pub timestep: V::Scalar,
    /// Gravity acceleration vector, applied as `mass · g`. Default: zero.
    pub gravity: V,
    /// Number of sub-steps per step, each of size `timestep / sub_steps`. Default: 1.
    pub sub_steps: usize,
    /// Runge-Kutta stage structure. Default: `Rk4Scheme::SampledField`.
    pub scheme: Rk4Scheme,
    /// Log a warning when the state stops being finite. Default: off.
    pub check_finite: bool,
}

impl<V: Vec> SolverConfig<V> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        SolverConfig {
            timestep: V::Scalar::from_f32(0.005),
            gravity: V::zero(),
            sub_steps: 1,
            scheme: Rk4Scheme::SampledField,
            check_finite: false,
        }
    }

    /// Set the fixed timestep.
    pub fn with_timestep(mut self, timestep: V::Scalar) -> Self {
        self.timestep = timestep;
        self
    }

    /// Set the gravity vector.
    pub fn with_gravity(mut self, gravity: V) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the number of sub-steps.
    pub fn with_sub_steps(mut self, sub_steps: usize) -> Self {
        self.sub_steps = sub_steps.max(1);
        self
    }

    /// Select the integration stage structure.
    pub fn with_scheme(mut self, scheme: Rk4Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Enable or disable the finite-state check.
    pub fn with_finite_check(mut self, enabled: bool) -> Self {
        self.check_finite = enabled;
        self
    }

    /// Size of a single sub-step.
    pub fn sub_step(&self) -> V::Scalar {
        self.timestep / V::Scalar::from_f32(self.sub_steps.max(1) as f32)
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !(self.timestep > V::Scalar::zero()) || !self.timestep.is_finite() {
            return Err(PhysicsError::InvalidTimestep);
        }
        Ok(())
    }
}

impl<V: Vec> Default for SolverConfig<V> {
    fn default() -> Self {
        Self::new()
    }
}
