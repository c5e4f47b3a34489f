//! Mass-spring cloth simulation and procedural sphere meshes.
//!
//! `weft` simulates chains and cloth grids of point masses joined by
//! structural, shear, and bend springs, advanced by a fixed-step Runge-Kutta
//! integrator, and produces renderer-ready geometry buffers. Designed to sit
//! under a thin render loop that feeds in input and draws what comes out.
//!
//! # Features
//!
//! - **Force model**: Hookean springs with linear dampers, one global sign convention
//! - **RK4 integration**: fixed step, position delta then velocity, pinned anchors
//! - **Spring meshes**: `SpringMesh` chains and grids with boundary-clipped springs
//! - **External forces**: gravity, drag interaction, closures via `ExternalForce`
//! - **Sphere tessellation**: UV spheres with normals and texture coordinates
//! - **Geometry buffers**: `bytemuck` vertex records, RAII backend handles
//! - **Scenes**: presets and an explicit frame context instead of globals
//! - **Observable**: Monitor simulation steps via the `StepObserver` trait
//! - **`no_std` compatible**: Works in embedded and WASM environments

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod particle;
pub mod spring;
pub mod integrator;
pub mod force;
pub mod mesh;
pub mod geometry;
pub mod sphere;
pub mod resource;
pub mod scene;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::{Vec, Vec2, Vec3};
pub use particle::Particle;
pub use spring::{SpringClass, SpringEdge, spring_force, damp_force};
pub use integrator::{Rk4Scheme, integrate_velocity, integrate_position_delta, integrate_particle};
pub use force::{ExternalForce, NoExternalForce, Gravity, Interaction, Sum};
pub use mesh::{SpringMesh, GridConfig};
pub use geometry::{GeometryBuffer, Vertex, ColorVertex, MeshVertex};
pub use sphere::{generate_sphere, sphere_vertex_count, sphere_triangle_count};
pub use resource::{GeometryBackend, GeometryHandle};
pub use scene::{Scene, ScenePreset, SceneConfig, SphereConfig, FrameInput, FrameStatus, Camera, CameraMove};
pub use config::SolverConfig;
pub use observer::{StepObserver, NoOpStepObserver};
pub use error::PhysicsError;
