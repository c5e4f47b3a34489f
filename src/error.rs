//! Error types for simulation setup and geometry handling.

use core::fmt;

/// Errors that can occur while building or driving a simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Mass must be positive and finite.
    InvalidMass,
    /// Spring constants must be non-negative and finite.
    InvalidStiffness,
    /// Damping constant must be non-negative and finite.
    InvalidDamping,
    /// Grid spacing (rest length) must be positive and finite.
    InvalidSpacing,
    /// Timestep must be positive and finite.
    InvalidTimestep,
    /// Grid must have at least one row and one column, and at least two particles.
    InvalidGridDimensions,
    /// Sphere radius must be positive and finite.
    InvalidRadius,
    /// Particle index is out of bounds.
    ParticleOutOfBounds { index: usize, count: usize },
    /// A triangle refers to a vertex that does not exist.
    IndexOutOfBounds { index: u32, vertex_count: usize },
    /// Index list length is not a multiple of three.
    IncompleteTriangle { len: usize },
    /// A buffer does not have the vertex count the mesh expects.
    VertexCountMismatch { expected: usize, found: usize },
    /// The geometry backend refused an operation.
    Backend(&'static str),
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::InvalidMass => write!(f, "mass must be positive and finite"),
            PhysicsError::InvalidStiffness => write!(f, "spring constant must be non-negative and finite"),
            PhysicsError::InvalidDamping => write!(f, "damping constant must be non-negative and finite"),
            PhysicsError::InvalidSpacing => write!(f, "grid spacing must be positive and finite"),
            PhysicsError::InvalidTimestep => write!(f, "timestep must be positive and finite"),
            PhysicsError::InvalidGridDimensions => write!(f, "grid needs at least two particles"),
            PhysicsError::InvalidRadius => write!(f, "sphere radius must be positive and finite"),
            PhysicsError::ParticleOutOfBounds { index, count } => {
                write!(f, "particle index {} out of bounds (count: {})", index, count)
            }
            PhysicsError::IndexOutOfBounds { index, vertex_count } => {
                write!(f, "vertex index {} out of bounds (vertices: {})", index, vertex_count)
            }
            PhysicsError::IncompleteTriangle { len } => {
                write!(f, "index list length {} is not a multiple of 3", len)
            }
            PhysicsError::VertexCountMismatch { expected, found } => {
                write!(f, "expected {} vertices, found {}", expected, found)
            }
            PhysicsError::Backend(msg) => write!(f, "geometry backend error: {}", msg),
        }
    }
}
