//! Mass-spring meshes: particle chains and cloth grids with structural,
//! shear, and bend springs.

use crate::config::SolverConfig;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::force::ExternalForce;
use crate::geometry::{ColorVertex, GeometryBuffer, Vertex};
use crate::integrator::{integrate_particle, Rk4Scheme};
use crate::observer::StepObserver;
use crate::particle::Particle;
use crate::spring::{SpringClass, SpringEdge};
use crate::vec::Vec;
use alloc::vec::Vec as AllocVec;

/// Topology and material of a chain or cloth grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridConfig<F: Float> {
    pub cols: usize,
    pub rows: usize,
    /// Grid spacing, the structural rest length `L0`.
    pub spacing: F,
    pub structural_stiffness: F,
    pub shear_stiffness: F,
    pub bend_stiffness: F,
    /// Damping constant `b`, shared by every spring.
    pub damping: F,
    pub particle_mass: F,
    /// Build diagonal springs.
    pub shear: bool,
    /// Build skip-one springs.
    pub bend: bool,
}

impl<F: Float> GridConfig<F> {
    /// All three spring classes with the same spring constant.
    pub fn uniform(cols: usize, rows: usize, spacing: F, stiffness: F, damping: F, mass: F) -> Self {
        GridConfig {
            cols,
            rows,
            spacing,
            structural_stiffness: stiffness,
            shear_stiffness: stiffness,
            bend_stiffness: stiffness,
            damping,
            particle_mass: mass,
            shear: true,
            bend: true,
        }
    }

    /// A 1×`count` chain with structural springs only.
    pub fn chain(count: usize, spacing: F, stiffness: F, damping: F, mass: F) -> Self {
        GridConfig::uniform(count, 1, spacing, stiffness, damping, mass)
            .with_shear(false)
            .with_bend(false)
    }

    pub fn with_shear(mut self, enabled: bool) -> Self {
        self.shear = enabled;
        self
    }

    pub fn with_bend(mut self, enabled: bool) -> Self {
        self.bend = enabled;
        self
    }

    /// Override the spring constant of one class.
    pub fn with_class_stiffness(mut self, class: SpringClass, stiffness: F) -> Self {
        match class {
            SpringClass::Structural => self.structural_stiffness = stiffness,
            SpringClass::Shear => self.shear_stiffness = stiffness,
            SpringClass::Bend => self.bend_stiffness = stiffness,
        }
        self
    }

    pub fn stiffness(&self, class: SpringClass) -> F {
        match class {
            SpringClass::Structural => self.structural_stiffness,
            SpringClass::Shear => self.shear_stiffness,
            SpringClass::Bend => self.bend_stiffness,
        }
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        match self.cols.checked_mul(self.rows) {
            Some(count) if count >= 2 => {}
            _ => return Err(PhysicsError::InvalidGridDimensions),
        }
        if !(self.spacing > F::zero()) || !self.spacing.is_finite() {
            return Err(PhysicsError::InvalidSpacing);
        }
        if !(self.particle_mass > F::zero()) || !self.particle_mass.is_finite() {
            return Err(PhysicsError::InvalidMass);
        }
        for class in SpringClass::ALL {
            let k = self.stiffness(class);
            if !(k >= F::zero()) || !k.is_finite() {
                return Err(PhysicsError::InvalidStiffness);
            }
        }
        if !(self.damping >= F::zero()) || !self.damping.is_finite() {
            return Err(PhysicsError::InvalidDamping);
        }
        Ok(())
    }
}

/// A chain or cloth grid of particles joined by springs and dampers.
///
/// Particle at (col, row) has index `row * cols + col`. The mesh owns its
/// particles; callers get read-only views.
pub struct SpringMesh<V: Vec> {
    particles: AllocVec<Particle<V>>,
    edges: AllocVec<SpringEdge<V>>,
    rest_positions: AllocVec<V>,
    forces: AllocVec<V>,
    stiffness: [V::Scalar; 3],
    damping: V::Scalar,
    cols: usize,
    rows: usize,
    diverged: bool,
}

impl<V: Vec> SpringMesh<V> {
    /// Create a grid starting at `origin`.
    ///
    /// Columns advance along `col_axis` and rows along `row_axis`, each by
    /// `config.spacing` per cell; pass unit vectors for an undistorted grid.
    ///
    /// Spring classes, all clipped at the grid boundary:
    /// - Structural: horizontal + vertical neighbors (rest = spacing)
    /// - Shear: diagonal neighbors (rest = spacing * sqrt(2))
    /// - Bend: skip-one horizontal + vertical (rest = spacing * 2)
    pub fn grid(origin: V, col_axis: V, row_axis: V, config: &GridConfig<V::Scalar>) -> Result<Self, PhysicsError> {
        config.validate()?;
        let GridConfig { cols, rows, spacing, .. } = *config;

        let mut particles = AllocVec::with_capacity(cols * rows);
        for row in 0..rows {
            for col in 0..cols {
                let pos = origin
                    + col_axis.scale(V::Scalar::from_f32(col as f32) * spacing)
                    + row_axis.scale(V::Scalar::from_f32(row as f32) * spacing);
                particles.push(Particle::new(pos, config.particle_mass));
            }
        }

        let mut edges = AllocVec::new();

        // Structural: horizontal
        for row in 0..rows {
            for col in 0..cols.saturating_sub(1) {
                let a = row * cols + col;
                edges.push(SpringEdge::between(a, a + 1, spacing, SpringClass::Structural));
            }
        }

        // Structural: vertical
        for row in 0..rows.saturating_sub(1) {
            for col in 0..cols {
                let a = row * cols + col;
                edges.push(SpringEdge::between(a, a + cols, spacing, SpringClass::Structural));
            }
        }

        // Shear: both diagonals of every cell
        if config.shear {
            for row in 0..rows.saturating_sub(1) {
                for col in 0..cols.saturating_sub(1) {
                    let tl = row * cols + col;
                    let tr = tl + 1;
                    let bl = tl + cols;
                    let br = bl + 1;
                    edges.push(SpringEdge::between(tl, br, spacing, SpringClass::Shear));
                    edges.push(SpringEdge::between(tr, bl, spacing, SpringClass::Shear));
                }
            }
        }

        if config.bend {
            // Bend: skip-one horizontal
            for row in 0..rows {
                for col in 0..cols.saturating_sub(2) {
                    let a = row * cols + col;
                    edges.push(SpringEdge::between(a, a + 2, spacing, SpringClass::Bend));
                }
            }

            // Bend: skip-one vertical
            for row in 0..rows.saturating_sub(2) {
                for col in 0..cols {
                    let a = row * cols + col;
                    edges.push(SpringEdge::between(a, a + 2 * cols, spacing, SpringClass::Bend));
                }
            }
        }

        let rest_positions = particles.iter().map(|p| p.position()).collect();
        let forces = alloc::vec![V::zero(); particles.len()];

        Ok(SpringMesh {
            particles,
            edges,
            rest_positions,
            forces,
            stiffness: [
                config.structural_stiffness,
                config.shear_stiffness,
                config.bend_stiffness,
            ],
            damping: config.damping,
            cols,
            rows,
            diverged: false,
        })
    }

    /// Create a 1×`count` chain from `origin` along `axis`.
    ///
    /// `config.cols` and `config.rows` are replaced by `count` and 1.
    pub fn chain(origin: V, axis: V, count: usize, config: &GridConfig<V::Scalar>) -> Result<Self, PhysicsError> {
        let config = GridConfig { cols: count, rows: 1, ..*config };
        SpringMesh::grid(origin, axis, V::zero(), &config)
    }

    pub fn index(&self, col: usize, row: usize) -> usize {
        row * self.cols + col
    }

    pub fn try_index(&self, col: usize, row: usize) -> Result<usize, PhysicsError> {
        if col >= self.cols || row >= self.rows {
            return Err(PhysicsError::ParticleOutOfBounds {
                index: row.saturating_mul(self.cols).saturating_add(col),
                count: self.particles.len(),
            });
        }
        Ok(self.index(col, row))
    }

    pub fn pin(&mut self, col: usize, row: usize) -> Result<(), PhysicsError> {
        let idx = self.try_index(col, row)?;
        self.particles[idx].make_stationary();
        Ok(())
    }

    pub fn pin_index(&mut self, index: usize) -> Result<(), PhysicsError> {
        let count = self.particles.len();
        let particle = self
            .particles
            .get_mut(index)
            .ok_or(PhysicsError::ParticleOutOfBounds { index, count })?;
        particle.make_stationary();
        Ok(())
    }

    pub fn pin_top_row(&mut self) {
        for p in self.particles.iter_mut().take(self.cols) {
            p.make_stationary();
        }
    }

    /// Sum every particle's net force from the current state, then write
    /// `force / mass` into the acceleration of each unpinned particle.
    ///
    /// All forces are computed before any particle is written.
    pub fn accumulate_forces<E: ExternalForce<V>>(&mut self, config: &SolverConfig<V>, external: &E) {
        for (i, (f, p)) in self.forces.iter_mut().zip(self.particles.iter()).enumerate() {
            *f = config.gravity.scale(p.mass()) + external.force(i, p);
        }

        for edge in self.edges.iter() {
            let k = self.stiffness[class_slot(edge.class)];
            let f = edge.force_on_a(&self.particles, k, self.damping);
            self.forces[edge.a] = self.forces[edge.a] + f;
            self.forces[edge.b] = self.forces[edge.b] - f;
        }

        for (p, f) in self.particles.iter_mut().zip(self.forces.iter()) {
            if !p.is_pinned() {
                p.set_acceleration(f.scale(V::Scalar::one() / p.mass()));
            }
        }
    }

    /// Advance every unpinned particle by `h` from its current acceleration.
    pub fn integrate(&mut self, h: V::Scalar, scheme: Rk4Scheme) {
        for p in self.particles.iter_mut() {
            integrate_particle(p, h, scheme);
        }
    }

    pub fn step<E: ExternalForce<V>, O: StepObserver>(
        &mut self,
        config: &SolverConfig<V>,
        external: &E,
        observer: &mut O,
    ) {
        let sub_dt = config.sub_step();

        for _sub in 0..config.sub_steps.max(1) {
            self.accumulate_forces(config, external);
            observer.on_forces_accumulated();

            self.integrate(sub_dt, config.scheme);
            observer.on_integrate();
        }

        if config.check_finite && !self.diverged && !self.is_finite() {
            self.diverged = true;
            log::warn!(
                "spring mesh {}x{} diverged: non-finite particle state (timestep {:?})",
                self.cols,
                self.rows,
                config.timestep
            );
        }

        observer.on_step_complete();
    }

    pub fn positions(&self) -> AllocVec<V> {
        self.particles.iter().map(|p| p.position()).collect()
    }

    pub fn position_at(&self, col: usize, row: usize) -> V {
        self.particles[self.index(col, row)].position()
    }

    /// Offset of every particle from where it was created.
    pub fn translations(&self) -> AllocVec<V> {
        self.particles
            .iter()
            .zip(self.rest_positions.iter())
            .map(|(p, &rest)| p.position() - rest)
            .collect()
    }

    pub fn particle(&self, index: usize) -> &Particle<V> { &self.particles[index] }
    pub fn particles(&self) -> &[Particle<V>] { &self.particles }
    pub fn edges(&self) -> &[SpringEdge<V>] { &self.edges }

    pub fn cols(&self) -> usize { self.cols }
    pub fn rows(&self) -> usize { self.rows }
    pub fn particle_count(&self) -> usize { self.particles.len() }
    pub fn edge_count(&self) -> usize { self.edges.len() }

    pub fn edge_count_of(&self, class: SpringClass) -> usize {
        self.edges.iter().filter(|e| e.class == class).count()
    }

    pub fn incident_edge_count(&self, index: usize) -> usize {
        self.edges.iter().filter(|e| e.touches(index)).count()
    }

    pub fn is_finite(&self) -> bool {
        self.particles.iter().all(|p| p.is_finite())
    }

    /// True once a finite-state check has seen the mesh blow up.
    pub fn diverged(&self) -> bool { self.diverged }

    /// Two triangles per grid cell, wound counter-clockwise about
    /// `col_axis × row_axis`. Empty for a chain.
    pub fn surface_indices(&self) -> AllocVec<u32> {
        let cols = self.cols;
        let mut indices = AllocVec::with_capacity(
            6 * self.cols.saturating_sub(1) * self.rows.saturating_sub(1),
        );
        for row in 0..self.rows.saturating_sub(1) {
            for col in 0..cols.saturating_sub(1) {
                let tl = (row * cols + col) as u32;
                let tr = tl + 1;
                let bl = tl + cols as u32;
                let br = bl + 1;
                indices.extend_from_slice(&[tl, tr, bl, tr, br, bl]);
            }
        }
        indices
    }

    /// Cloth surface geometry in a single color.
    pub fn geometry(&self, color: [f32; 3]) -> Result<GeometryBuffer<ColorVertex>, PhysicsError> {
        let vertices = self
            .particles
            .iter()
            .map(|p| ColorVertex { position: p.position().to_vertex(), color })
            .collect();
        GeometryBuffer::new(vertices, self.surface_indices())
    }

    /// Rewrite vertex positions from the current particle positions.
    pub fn update_geometry<T: Vertex>(&self, buffer: &mut GeometryBuffer<T>) -> Result<(), PhysicsError> {
        if buffer.vertex_count() != self.particles.len() {
            return Err(PhysicsError::VertexCountMismatch {
                expected: self.particles.len(),
                found: buffer.vertex_count(),
            });
        }
        for (v, p) in buffer.vertices_mut().iter_mut().zip(self.particles.iter()) {
            v.set_position(p.position().to_vertex());
        }
        Ok(())
    }
}

fn class_slot(class: SpringClass) -> usize {
    match class {
        SpringClass::Structural => 0,
        SpringClass::Shear => 1,
        SpringClass::Bend => 2,
    }
}
