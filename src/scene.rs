//! Frame-driver context: scene presets, camera, and the per-frame update.
//!
//! A [`Scene`] owns everything the render loop used to keep in globals. The
//! windowing layer fills a [`FrameInput`] each tick and calls
//! [`Scene::frame`]; the scene advances the simulation by exactly one fixed
//! step and refreshes the geometry the renderer reads.

use crate::config::SolverConfig;
use crate::error::PhysicsError;
use crate::force::Interaction;
use crate::geometry::{ColorVertex, GeometryBuffer, MeshVertex};
use crate::mesh::{GridConfig, SpringMesh};
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::sphere::generate_sphere;
use crate::vec::{Vec, Vec3};
use alloc::vec::Vec as AllocVec;

type Vec3f = Vec3<f32>;

/// Built-in scenes, one per classic demo.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScenePreset {
    /// One bob on a spring, swinging from a fixed anchor.
    Pendulum,
    /// 3×3 grid hanging from its top row.
    Grid3x3,
    /// Nine particles in a horizontal chain, pinned at one end.
    Chain9,
    /// 5×5 cloth pinned at the top corners.
    Cloth5x5,
    /// 9×9 cloth pinned at the top corners, with a sphere in the scene.
    Cloth9x9WithSphere,
}

impl ScenePreset {
    pub const ALL: [ScenePreset; 5] = [
        ScenePreset::Pendulum,
        ScenePreset::Grid3x3,
        ScenePreset::Chain9,
        ScenePreset::Cloth5x5,
        ScenePreset::Cloth9x9WithSphere,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ScenePreset::Pendulum => "pendulum",
            ScenePreset::Grid3x3 => "grid-3x3",
            ScenePreset::Chain9 => "chain-9",
            ScenePreset::Cloth5x5 => "cloth-5x5",
            ScenePreset::Cloth9x9WithSphere => "cloth-9x9-sphere",
        }
    }

    pub fn config(self) -> SceneConfig {
        let gravity = Vec3::new(0.0, -9.81, 0.0);
        let solver = SolverConfig::new()
            .with_timestep(0.005)
            .with_gravity(gravity)
            .with_finite_check(true);
        let right = Vec3::new(1.0, 0.0, 0.0);
        let down = Vec3::new(0.0, -1.0, 0.0);

        match self {
            ScenePreset::Pendulum => SceneConfig {
                grid: GridConfig::chain(2, 1.0, 50.0, 0.5, 1.0),
                solver,
                origin: Vec3::new(0.0, 1.0, 0.0),
                col_axis: right,
                row_axis: down,
                pinned: alloc::vec![(0, 0)],
                interaction: Interaction::new(1, Vec3::new(0.0, 0.0, 5.0)),
                sphere: None,
                cloth_color: [0.8, 0.8, 0.8],
                camera: Camera::new(Vec3::new(0.0, 0.0, 4.0), 2.0),
            },
            ScenePreset::Grid3x3 => SceneConfig {
                grid: GridConfig::uniform(3, 3, 0.5, 40.0, 0.4, 0.2),
                solver,
                origin: Vec3::new(-0.5, 1.0, 0.0),
                col_axis: right,
                row_axis: down,
                pinned: alloc::vec![(0, 0), (1, 0), (2, 0)],
                interaction: Interaction::new(7, Vec3::new(0.0, 0.0, 2.0)),
                sphere: None,
                cloth_color: [0.9, 0.4, 0.2],
                camera: Camera::new(Vec3::new(0.0, 0.0, 4.0), 2.0),
            },
            ScenePreset::Chain9 => SceneConfig {
                grid: GridConfig::chain(9, 0.25, 60.0, 0.6, 0.2),
                solver,
                origin: Vec3::new(-1.0, 1.0, 0.0),
                col_axis: right,
                row_axis: down,
                pinned: alloc::vec![(0, 0)],
                interaction: Interaction::new(8, Vec3::new(0.0, 0.0, 2.0)),
                sphere: None,
                cloth_color: [0.8, 0.8, 0.8],
                camera: Camera::new(Vec3::new(0.0, 0.0, 5.0), 2.0),
            },
            ScenePreset::Cloth5x5 => SceneConfig {
                grid: GridConfig::uniform(5, 5, 0.4, 80.0, 0.8, 0.2),
                solver,
                origin: Vec3::new(-0.8, 1.0, 0.0),
                col_axis: right,
                row_axis: down,
                pinned: alloc::vec![(0, 0), (4, 0)],
                interaction: Interaction::new(22, Vec3::new(0.0, 0.0, 2.0)),
                sphere: None,
                cloth_color: [0.2, 0.5, 0.9],
                camera: Camera::new(Vec3::new(0.0, 0.0, 5.0), 2.0),
            },
            ScenePreset::Cloth9x9WithSphere => SceneConfig {
                grid: GridConfig::uniform(9, 9, 0.25, 100.0, 1.0, 0.2),
                solver,
                origin: Vec3::new(-1.0, 1.0, 0.0),
                col_axis: right,
                row_axis: down,
                pinned: alloc::vec![(0, 0), (8, 0)],
                interaction: Interaction::new(76, Vec3::new(0.0, 0.0, 2.0)),
                sphere: Some(SphereConfig {
                    center: Vec3::new(0.0, -1.4, -0.6),
                    radius: 0.5,
                    segments: 16,
                }),
                cloth_color: [0.9, 0.2, 0.3],
                camera: Camera::new(Vec3::new(0.0, 0.0, 6.0), 2.0),
            },
        }
    }
}

/// A static sphere placed in the scene.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SphereConfig {
    pub center: Vec3f,
    pub radius: f32,
    pub segments: usize,
}

/// Everything needed to set up a scene.
#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub grid: GridConfig<f32>,
    pub solver: SolverConfig<Vec3f>,
    pub origin: Vec3f,
    pub col_axis: Vec3f,
    pub row_axis: Vec3f,
    /// Grid positions (col, row) pinned at startup.
    pub pinned: AllocVec<(usize, usize)>,
    /// Drag impulse applied while the interaction trigger is held.
    pub interaction: Interaction<Vec3f>,
    pub sphere: Option<SphereConfig>,
    pub cloth_color: [f32; 3],
    pub camera: Camera,
}

/// Discrete camera movement requested by the input layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CameraMove {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Free camera looking down `-z`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3f,
    /// Units per second.
    pub speed: f32,
}

impl Camera {
    pub fn new(eye: Vec3f, speed: f32) -> Self {
        Camera { eye, speed }
    }

    pub fn apply(&mut self, movement: CameraMove, dt: f32) {
        let dir = match movement {
            CameraMove::Forward => Vec3::new(0.0, 0.0, -1.0),
            CameraMove::Backward => Vec3::new(0.0, 0.0, 1.0),
            CameraMove::Left => Vec3::new(-1.0, 0.0, 0.0),
            CameraMove::Right => Vec3::new(1.0, 0.0, 0.0),
            CameraMove::Up => Vec3::new(0.0, 1.0, 0.0),
            CameraMove::Down => Vec3::new(0.0, -1.0, 0.0),
        };
        self.eye = self.eye + dir.scale(self.speed * dt);
    }
}

/// What the window/input layer hands over each tick.
#[derive(Clone, Debug, Default)]
pub struct FrameInput<'a> {
    /// Wall-clock time since the previous tick, in seconds.
    pub dt: f32,
    /// Interaction trigger held down.
    pub interact: bool,
    pub camera: &'a [CameraMove],
    /// Window close or escape.
    pub exit: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Exit,
}

/// A running simulation plus the geometry the renderer reads from it.
pub struct Scene {
    mesh: SpringMesh<Vec3f>,
    solver: SolverConfig<Vec3f>,
    interaction: Interaction<Vec3f>,
    cloth: Option<GeometryBuffer<ColorVertex>>,
    sphere: Option<GeometryBuffer<MeshVertex>>,
    sphere_center: Option<Vec3f>,
    camera: Camera,
    steps: u64,
    wall_time: f32,
}

impl Scene {
    pub fn new(config: SceneConfig) -> Result<Self, PhysicsError> {
        config.solver.validate()?;
        let mut mesh = SpringMesh::grid(config.origin, config.col_axis, config.row_axis, &config.grid)?;
        for &(col, row) in config.pinned.iter() {
            mesh.pin(col, row)?;
        }
        if config.interaction.target >= mesh.particle_count() {
            return Err(PhysicsError::ParticleOutOfBounds {
                index: config.interaction.target,
                count: mesh.particle_count(),
            });
        }

        let cloth = if mesh.cols() > 1 && mesh.rows() > 1 {
            Some(mesh.geometry(config.cloth_color)?)
        } else {
            None
        };
        let sphere = config
            .sphere
            .map(|s| generate_sphere(s.radius, s.segments))
            .transpose()?;

        log::info!(
            "scene ready: {}x{} mesh, {} springs, {} pinned, sphere: {}",
            mesh.cols(),
            mesh.rows(),
            mesh.edge_count(),
            config.pinned.len(),
            sphere.is_some()
        );

        Ok(Scene {
            mesh,
            solver: config.solver,
            interaction: Interaction { active: false, ..config.interaction },
            cloth,
            sphere,
            sphere_center: config.sphere.map(|s| s.center),
            camera: config.camera,
            steps: 0,
            wall_time: 0.0,
        })
    }

    pub fn from_preset(preset: ScenePreset) -> Result<Self, PhysicsError> {
        log::debug!("loading preset {}", preset.name());
        Scene::new(preset.config())
    }

    /// Advance one tick.
    pub fn frame(&mut self, input: &FrameInput<'_>) -> Result<FrameStatus, PhysicsError> {
        self.frame_observed(input, &mut NoOpStepObserver)
    }

    /// Advance one tick, reporting the simulation step to `observer`.
    pub fn frame_observed<O: StepObserver>(
        &mut self,
        input: &FrameInput<'_>,
        observer: &mut O,
    ) -> Result<FrameStatus, PhysicsError> {
        if input.exit {
            log::info!("exit requested after {} steps", self.steps);
            return Ok(FrameStatus::Exit);
        }

        for &movement in input.camera {
            self.camera.apply(movement, input.dt);
        }

        self.interaction.active = input.interact;
        self.mesh.step(&self.solver, &self.interaction, observer);
        self.steps += 1;
        self.wall_time += input.dt;

        if let Some(cloth) = self.cloth.as_mut() {
            self.mesh.update_geometry(cloth)?;
        }
        Ok(FrameStatus::Continue)
    }

    pub fn mesh(&self) -> &SpringMesh<Vec3f> { &self.mesh }

    /// Per-particle offsets from the initial layout, for instanced drawing.
    pub fn translations(&self) -> AllocVec<Vec3f> { self.mesh.translations() }

    pub fn cloth(&self) -> Option<&GeometryBuffer<ColorVertex>> { self.cloth.as_ref() }
    pub fn sphere(&self) -> Option<&GeometryBuffer<MeshVertex>> { self.sphere.as_ref() }
    pub fn sphere_center(&self) -> Option<Vec3f> { self.sphere_center }
    pub fn camera(&self) -> &Camera { &self.camera }
    pub fn solver(&self) -> &SolverConfig<Vec3f> { &self.solver }
    pub fn interaction_target(&self) -> usize { self.interaction.target }

    pub fn steps(&self) -> u64 { self.steps }

    /// Simulated time: steps times the fixed timestep.
    pub fn sim_time(&self) -> f32 { self.steps as f32 * self.solver.timestep }

    /// Sum of the frame deltas seen so far.
    pub fn wall_time(&self) -> f32 { self.wall_time }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_builds() {
        for preset in ScenePreset::ALL {
            let scene = Scene::from_preset(preset).unwrap();
            assert!(scene.mesh().particle_count() >= 2, "{}", preset.name());
        }
    }

    #[test]
    fn only_grids_have_cloth_geometry() {
        assert!(Scene::from_preset(ScenePreset::Chain9).unwrap().cloth().is_none());
        assert!(Scene::from_preset(ScenePreset::Pendulum).unwrap().cloth().is_none());
        assert!(Scene::from_preset(ScenePreset::Cloth5x5).unwrap().cloth().is_some());
    }

    #[test]
    fn camera_moves_by_speed_times_dt() {
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 4.0), 2.0);
        camera.apply(CameraMove::Forward, 0.5);
        camera.apply(CameraMove::Left, 0.25);
        assert_eq!(camera.eye, Vec3::new(-0.5, 0.0, 3.0));
    }

    #[test]
    fn bad_pin_fails_setup() {
        let mut config = ScenePreset::Cloth5x5.config();
        config.pinned.push((5, 0));
        assert!(matches!(Scene::new(config), Err(PhysicsError::ParticleOutOfBounds { .. })));
    }

    #[test]
    fn bad_interaction_target_fails_setup() {
        let mut config = ScenePreset::Pendulum.config();
        config.interaction.target = 2;
        assert!(Scene::new(config).is_err());
    }
}
