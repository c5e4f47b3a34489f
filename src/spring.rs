//! Hookean springs and linear dampers between particle pairs.
//!
//! Sign convention, used everywhere in the crate: for an edge `(a, b)` the
//! force on `a` is `spring_force(a, b) - damp_force(a, b)` and the force on `b`
//! is its exact negative. A stretched spring therefore pulls `a` toward `b`,
//! and the damper opposes the relative velocity of the two endpoints.

use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec;

/// The three spring families of a cloth grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpringClass {
    /// Grid-adjacent neighbors, rest length `L0`.
    Structural,
    /// Diagonal neighbors, rest length `L0·√2`.
    Shear,
    /// Neighbors two cells apart along an axis, rest length `2·L0`.
    Bend,
}

impl SpringClass {
    pub const ALL: [SpringClass; 3] = [SpringClass::Structural, SpringClass::Shear, SpringClass::Bend];

    /// Rest length for this class given the grid spacing.
    pub fn rest_length<F: Float>(self, spacing: F) -> F {
        match self {
            SpringClass::Structural => spacing,
            SpringClass::Shear => (spacing * spacing + spacing * spacing).sqrt(),
            SpringClass::Bend => spacing * F::two(),
        }
    }
}

/// An immutable spring between two particle indices.
#[derive(Clone, Debug, PartialEq)]
pub struct SpringEdge<V: Vec> {
    pub a: usize,
    pub b: usize,
    pub rest_length: V::Scalar,
    pub class: SpringClass,
}

impl<V: Vec> SpringEdge<V> {
    pub fn new(a: usize, b: usize, rest_length: V::Scalar, class: SpringClass) -> Self {
        SpringEdge { a, b, rest_length, class }
    }

    /// Edge of the given class with the rest length derived from `spacing`.
    pub fn between(a: usize, b: usize, spacing: V::Scalar, class: SpringClass) -> Self {
        SpringEdge::new(a, b, class.rest_length(spacing), class)
    }

    pub fn touches(&self, index: usize) -> bool {
        self.a == index || self.b == index
    }

    /// Net spring + damper force on endpoint `a`. Endpoint `b` gets the negative.
    pub fn force_on_a(&self, particles: &[Particle<V>], stiffness: V::Scalar, damping: V::Scalar) -> V {
        let pa = &particles[self.a];
        let pb = &particles[self.b];
        spring_force(pa, pb, self.rest_length, stiffness) - damp_force(pa, pb, damping)
    }
}

/// Hookean spring force `k·(|pB − pA| − rest)` along the unit direction from A to B.
///
/// Coincident endpoints have no direction; the force is then zero.
pub fn spring_force<V: Vec>(a: &Particle<V>, b: &Particle<V>, rest_length: V::Scalar, k: V::Scalar) -> V {
    let delta = b.position() - a.position();
    let distance = delta.length();
    delta.normalize().scale(k * (distance - rest_length))
}

/// Linear damper `b·(vA − vB)`. Stateless.
pub fn damp_force<V: Vec>(a: &Particle<V>, b: &Particle<V>, damping: V::Scalar) -> V {
    (a.velocity() - b.velocity()).scale(damping)
}
