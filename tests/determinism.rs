//! Identical inputs must produce bit-identical outputs.

use weft::{generate_sphere, GridConfig, Interaction, NoOpStepObserver, Scene, ScenePreset, FrameInput, SolverConfig, SpringMesh, Vec3};

fn run_cloth() -> std::vec::Vec<Vec3<f32>> {
    let config = GridConfig::uniform(6, 6, 0.3f32, 90.0, 0.9, 0.2);
    let mut cloth: SpringMesh<Vec3<f32>> =
        SpringMesh::grid(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, -1.0, 0.0), &config)
            .unwrap();
    cloth.pin(0, 0).unwrap();
    cloth.pin(5, 0).unwrap();

    let solver = SolverConfig::new()
        .with_timestep(0.005)
        .with_gravity(Vec3::new(0.0, -9.81, 0.0));
    let mut push = Interaction::new(33, Vec3::new(0.0, 0.0, 2.0));
    for i in 0..300 {
        push.active = i % 50 < 20;
        cloth.step(&solver, &push, &mut NoOpStepObserver);
    }
    cloth.positions()
}

#[test]
fn cloth_simulation_is_deterministic() {
    let reference = run_cloth();
    for _ in 0..5 {
        let again = run_cloth();
        for (a, b) in reference.iter().zip(again.iter()) {
            assert_eq!(a.x.to_bits(), b.x.to_bits());
            assert_eq!(a.y.to_bits(), b.y.to_bits());
            assert_eq!(a.z.to_bits(), b.z.to_bits());
        }
    }
}

#[test]
fn sphere_generation_is_deterministic() {
    let a = generate_sphere(0.75, 24).unwrap();
    let b = generate_sphere(0.75, 24).unwrap();
    assert_eq!(a.vertex_bytes(), b.vertex_bytes());
    assert_eq!(a.indices(), b.indices());
}

#[test]
fn scene_frames_are_deterministic() {
    let run = || {
        let mut scene = Scene::from_preset(ScenePreset::Cloth9x9WithSphere).unwrap();
        for i in 0..120 {
            let input = FrameInput { dt: 1.0 / 60.0, interact: i > 60, ..FrameInput::default() };
            scene.frame(&input).unwrap();
        }
        scene.cloth().unwrap().vertex_bytes().to_vec()
    };
    assert_eq!(run(), run());
}
