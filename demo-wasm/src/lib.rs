//! Browser frame driver: the page owns the canvas and input, and calls
//! `update` once per animation frame.

use weft::{CameraMove, FrameInput, FrameStatus, Scene, ScenePreset};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::warn!("logger already installed");
    }
}

fn preset_from_index(index: u8) -> Result<ScenePreset, JsValue> {
    ScenePreset::ALL
        .get(index as usize)
        .copied()
        .ok_or_else(|| JsValue::from_str("unknown scene preset"))
}

fn camera_move(code: u8) -> Option<CameraMove> {
    match code {
        0 => Some(CameraMove::Forward),
        1 => Some(CameraMove::Backward),
        2 => Some(CameraMove::Left),
        3 => Some(CameraMove::Right),
        4 => Some(CameraMove::Up),
        5 => Some(CameraMove::Down),
        _ => None,
    }
}

// ---- Scene Demo ----

#[wasm_bindgen]
pub struct SceneDemo {
    scene: Scene,
    running: bool,
}

#[wasm_bindgen]
impl SceneDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(preset: u8) -> Result<SceneDemo, JsValue> {
        let preset = preset_from_index(preset)?;
        let scene = Scene::from_preset(preset).map_err(|e| {
            log::error!("failed to build scene {}: {}", preset.name(), e);
            JsValue::from_str(&e.to_string())
        })?;
        Ok(SceneDemo { scene, running: true })
    }

    pub fn preset_count() -> usize {
        ScenePreset::ALL.len()
    }

    /// Advance one frame. `moves` holds camera move codes 0..=5 in the order
    /// forward, backward, left, right, up, down. Returns false once the scene
    /// has been asked to exit.
    pub fn update(&mut self, dt: f32, interact: bool, moves: &[u8], exit: bool) -> Result<bool, JsValue> {
        if !self.running {
            return Ok(false);
        }
        let camera: Vec<CameraMove> = moves.iter().filter_map(|&m| camera_move(m)).collect();
        let input = FrameInput { dt, interact, camera: &camera, exit };
        let status = self.scene.frame(&input).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.running = status == FrameStatus::Continue;
        Ok(self.running)
    }

    /// Returns flat [x0, y0, z0, x1, y1, z1, ...] particle positions
    pub fn positions(&self) -> Vec<f32> {
        let mesh = self.scene.mesh();
        let mut out = Vec::with_capacity(mesh.particle_count() * 3);
        for p in mesh.particles() {
            let v = p.position();
            out.extend_from_slice(&[v.x, v.y, v.z]);
        }
        out
    }

    /// Returns flat per-particle offsets from the starting layout
    pub fn translations(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.scene.mesh().particle_count() * 3);
        for t in self.scene.translations() {
            out.extend_from_slice(&[t.x, t.y, t.z]);
        }
        out
    }

    /// Interleaved [x, y, z, r, g, b] cloth vertices, empty for chains
    pub fn cloth_vertices(&self) -> Vec<f32> {
        self.scene.cloth().map(|c| c.vertex_floats().to_vec()).unwrap_or_default()
    }

    pub fn cloth_indices(&self) -> Vec<u32> {
        self.scene.cloth().map(|c| c.indices().to_vec()).unwrap_or_default()
    }

    /// Interleaved [x, y, z, nx, ny, nz, u, v] sphere vertices, empty without a sphere
    pub fn sphere_vertices(&self) -> Vec<f32> {
        self.scene.sphere().map(|s| s.vertex_floats().to_vec()).unwrap_or_default()
    }

    pub fn sphere_indices(&self) -> Vec<u32> {
        self.scene.sphere().map(|s| s.indices().to_vec()).unwrap_or_default()
    }

    /// Returns [x, y, z] of the sphere center, empty without a sphere
    pub fn sphere_center(&self) -> Vec<f32> {
        self.scene.sphere_center().map(|c| vec![c.x, c.y, c.z]).unwrap_or_default()
    }

    pub fn camera_eye(&self) -> Vec<f32> {
        let eye = self.scene.camera().eye;
        vec![eye.x, eye.y, eye.z]
    }

    pub fn particle_count(&self) -> usize {
        self.scene.mesh().particle_count()
    }

    pub fn steps(&self) -> u64 {
        self.scene.steps()
    }

    pub fn diverged(&self) -> bool {
        self.scene.mesh().diverged()
    }
}
