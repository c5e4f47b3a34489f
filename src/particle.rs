//! Point-mass particles integrated from an explicit velocity and acceleration.

use crate::vec::Vec;

/// A point mass: position, velocity, acceleration, mass and a pinned flag.
///
/// Once pinned, a particle keeps its position and velocity for the rest of the
/// run. It still acts as an anchor for the springs attached to it.
#[derive(Clone, Debug)]
pub struct Particle<V: Vec> {
    position: V,
    velocity: V,
    acceleration: V,
    mass: V::Scalar,
    pinned: bool,
}

impl<V: Vec> Particle<V> {
    /// Create a free particle at rest. The mass is not validated here.
    pub fn new(position: V, mass: V::Scalar) -> Self {
        Particle {
            position,
            velocity: V::zero(),
            acceleration: V::zero(),
            mass,
            pinned: false,
        }
    }

    /// Create an already-pinned particle.
    pub fn pinned(position: V, mass: V::Scalar) -> Self {
        let mut p = Particle::new(position, mass);
        p.make_stationary();
        p
    }

    pub fn position(&self) -> V { self.position }
    pub fn set_position(&mut self, position: V) { self.position = position; }

    pub fn velocity(&self) -> V { self.velocity }
    pub fn set_velocity(&mut self, velocity: V) { self.velocity = velocity; }

    pub fn acceleration(&self) -> V { self.acceleration }
    pub fn set_acceleration(&mut self, acceleration: V) { self.acceleration = acceleration; }

    pub fn mass(&self) -> V::Scalar { self.mass }

    pub fn is_pinned(&self) -> bool { self.pinned }

    /// Pin the particle in place. There is no way back.
    pub fn make_stationary(&mut self) {
        self.pinned = true;
        self.velocity = V::zero();
        self.acceleration = V::zero();
    }

    /// Add a position delta. Ignored for pinned particles.
    pub fn translate(&mut self, delta: V) {
        if !self.pinned {
            self.position = self.position + delta;
        }
    }

    /// True if position and velocity hold no NaN or infinity.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec::Vec3;

    #[test]
    fn new_particle_is_at_rest() {
        let p = Particle::new(Vec3::new(1.0f32, 2.0, 3.0), 2.0);
        assert_eq!(p.velocity(), Vec3::zero());
        assert_eq!(p.acceleration(), Vec3::zero());
        assert_eq!(p.mass(), 2.0);
        assert!(!p.is_pinned());
    }

    #[test]
    fn make_stationary_clears_motion() {
        let mut p = Particle::new(Vec3::new(0.0f32, 0.0, 0.0), 1.0);
        p.set_velocity(Vec3::new(1.0, 0.0, 0.0));
        p.set_acceleration(Vec3::new(0.0, -9.81, 0.0));
        p.make_stationary();
        assert!(p.is_pinned());
        assert_eq!(p.velocity(), Vec3::zero());
        assert_eq!(p.acceleration(), Vec3::zero());
    }

    #[test]
    fn translate_ignored_when_pinned() {
        let mut p = Particle::pinned(Vec3::new(5.0f32, 5.0, 0.0), 1.0);
        p.translate(Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(p.position(), Vec3::new(5.0, 5.0, 0.0));
    }
}
