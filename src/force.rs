//! External forces injected into the force-accumulation pass.

use crate::particle::Particle;
use crate::vec::Vec;

/// A force applied to individual particles on top of the spring network.
///
/// Evaluated once per particle per force pass, against the state of the
/// previous step. Closures `Fn(usize, &Particle<V>) -> V` implement it.
pub trait ExternalForce<V: Vec> {
    fn force(&self, index: usize, particle: &Particle<V>) -> V;
}

/// No external force.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoExternalForce;

impl<V: Vec> ExternalForce<V> for NoExternalForce {
    fn force(&self, _index: usize, _particle: &Particle<V>) -> V {
        V::zero()
    }
}

/// Uniform gravitational acceleration; the force is `mass · g`.
#[derive(Copy, Clone, Debug, Default)]
pub struct Gravity<V: Vec>(pub V);

impl<V: Vec> ExternalForce<V> for Gravity<V> {
    fn force(&self, _index: usize, particle: &Particle<V>) -> V {
        self.0.scale(particle.mass())
    }
}

/// A drag impulse on one designated particle while the trigger is held.
#[derive(Copy, Clone, Debug, Default)]
pub struct Interaction<V: Vec> {
    pub target: usize,
    pub force: V,
    pub active: bool,
}

impl<V: Vec> Interaction<V> {
    pub fn new(target: usize, force: V) -> Self {
        Interaction { target, force, active: false }
    }
}

impl<V: Vec> ExternalForce<V> for Interaction<V> {
    fn force(&self, index: usize, _particle: &Particle<V>) -> V {
        if self.active && index == self.target {
            self.force
        } else {
            V::zero()
        }
    }
}

/// Sum of two external forces.
#[derive(Copy, Clone, Debug, Default)]
pub struct Sum<A, B>(pub A, pub B);

impl<V: Vec, A: ExternalForce<V>, B: ExternalForce<V>> ExternalForce<V> for Sum<A, B> {
    fn force(&self, index: usize, particle: &Particle<V>) -> V {
        self.0.force(index, particle) + self.1.force(index, particle)
    }
}

impl<V, F> ExternalForce<V> for F
where
    V: Vec,
    F: Fn(usize, &Particle<V>) -> V,
{
    fn force(&self, index: usize, particle: &Particle<V>) -> V {
        self(index, particle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec::Vec3;

    #[test]
    fn gravity_scales_with_mass() {
        let p = Particle::new(Vec3::new(0.0f32, 0.0, 0.0), 2.0);
        let g = Gravity(Vec3::new(0.0f32, -10.0, 0.0));
        assert_eq!(g.force(0, &p), Vec3::new(0.0, -20.0, 0.0));
    }

    #[test]
    fn interaction_only_hits_target_while_active() {
        let p = Particle::new(Vec3::new(0.0f32, 0.0, 0.0), 1.0);
        let mut drag = Interaction::new(3, Vec3::new(0.0f32, 0.0, 5.0));
        assert_eq!(drag.force(3, &p), Vec3::zero());
        drag.active = true;
        assert_eq!(drag.force(3, &p), Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(drag.force(2, &p), Vec3::zero());
    }

    #[test]
    fn closures_and_sums_compose() {
        let p = Particle::new(Vec3::new(0.0f32, 0.0, 0.0), 1.0);
        let wind = |_i: usize, _p: &Particle<Vec3<f32>>| Vec3::new(1.0, 0.0, 0.0);
        let total = Sum(wind, Gravity(Vec3::new(0.0f32, -1.0, 0.0)));
        assert_eq!(total.force(0, &p), Vec3::new(1.0, -1.0, 0.0));
    }
}
