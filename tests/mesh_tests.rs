use weft::{GridConfig, NoExternalForce, NoOpStepObserver, SolverConfig, SpringClass, SpringMesh, Vec3};
use weft::vec::Vec;

type V = Vec3<f64>;

fn grid(cols: usize, rows: usize) -> SpringMesh<V> {
    let config = GridConfig::uniform(cols, rows, 1.0, 10.0, 0.2, 1.0);
    SpringMesh::grid(Vec3::zero(), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, -1.0, 0.0), &config).unwrap()
}

fn flag(b: bool) -> usize {
    b as usize
}

#[test]
fn springs_are_clipped_at_the_boundary() {
    for &(cols, rows) in &[(5, 4), (3, 3), (2, 6), (4, 2)] {
        let mesh = grid(cols, rows);
        for r in 0..rows {
            for c in 0..cols {
                let structural = flag(c > 0) + flag(c + 1 < cols) + flag(r > 0) + flag(r + 1 < rows);
                let shear = (flag(c > 0) + flag(c + 1 < cols)) * (flag(r > 0) + flag(r + 1 < rows));
                let bend = flag(c > 1) + flag(c + 2 < cols) + flag(r > 1) + flag(r + 2 < rows);
                assert_eq!(
                    mesh.incident_edge_count(mesh.index(c, r)),
                    structural + shear + bend,
                    "{}x{} grid at ({}, {})",
                    cols,
                    rows,
                    c,
                    r
                );
            }
        }
    }
}

#[test]
fn per_class_counts_match_closed_form() {
    let (cols, rows) = (6, 5);
    let mesh = grid(cols, rows);
    assert_eq!(mesh.edge_count_of(SpringClass::Structural), (cols - 1) * rows + cols * (rows - 1));
    assert_eq!(mesh.edge_count_of(SpringClass::Shear), 2 * (cols - 1) * (rows - 1));
    assert_eq!(mesh.edge_count_of(SpringClass::Bend), (cols - 2) * rows + cols * (rows - 2));
}

#[test]
fn square_at_rest_stays_at_rest() {
    let config = GridConfig::uniform(2, 2, 1.0, 1.0, 0.1, 1.0);
    let mut mesh: SpringMesh<V> =
        SpringMesh::grid(Vec3::zero(), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0), &config).unwrap();
    let before = mesh.positions();
    let solver = SolverConfig::new().with_timestep(0.005);
    mesh.step(&solver, &NoExternalForce, &mut NoOpStepObserver);
    for (p, q) in mesh.positions().iter().zip(before.iter()) {
        assert!(p.distance(*q) < 1e-12);
    }
    for p in mesh.particles() {
        assert!(p.velocity().length() < 1e-12);
    }
}

#[test]
fn internal_forces_cancel() {
    let mut mesh = grid(4, 4);
    let kick = |i: usize, _p: &weft::Particle<V>| {
        if i == 5 { Vec3::new(40.0, 25.0, -10.0) } else { Vec3::zero() }
    };
    let solver = SolverConfig::new().with_timestep(0.005);
    for _ in 0..20 {
        mesh.step(&solver, &kick, &mut NoOpStepObserver);
    }

    mesh.accumulate_forces(&solver, &NoExternalForce);
    let total = mesh
        .particles()
        .iter()
        .fold(V::zero(), |acc, p| acc + p.acceleration().scale(p.mass()));
    assert!(total.length() < 1e-9, "net internal force {:?}", total);
}

#[test]
fn cloth_drapes_from_pinned_top_row() {
    let config = GridConfig::uniform(5, 5, 0.4f32, 80.0, 0.8, 0.2);
    let mut cloth: SpringMesh<Vec3<f32>> =
        SpringMesh::grid(Vec3::new(-0.8, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, -1.0, 0.0), &config)
            .unwrap();
    cloth.pin_top_row();
    let top_before: std::vec::Vec<_> = (0..5).map(|c| cloth.position_at(c, 0)).collect();
    let bottom_before = cloth.position_at(2, 4).y;

    let solver = SolverConfig::new()
        .with_timestep(0.005)
        .with_gravity(Vec3::new(0.0, -9.81, 0.0))
        .with_finite_check(true);
    for _ in 0..400 {
        cloth.step(&solver, &NoExternalForce, &mut NoOpStepObserver);
    }

    for (c, before) in top_before.iter().enumerate() {
        assert_eq!(cloth.position_at(c, 0), *before);
    }
    assert!(cloth.position_at(2, 4).y < bottom_before - 1e-3);
    assert!(cloth.is_finite());
    assert!(!cloth.diverged());
}

#[test]
fn pinned_particles_ignore_external_forces() {
    let mut mesh = grid(3, 3);
    mesh.pin(1, 1).unwrap();
    let anchor = mesh.position_at(1, 1);
    let shove = |_i: usize, _p: &weft::Particle<V>| Vec3::new(1.0e3, -1.0e3, 5.0e2);
    let solver = SolverConfig::new().with_timestep(0.001);
    for _ in 0..50 {
        mesh.step(&solver, &shove, &mut NoOpStepObserver);
    }
    assert_eq!(mesh.position_at(1, 1), anchor);
    assert_eq!(mesh.particle(mesh.index(1, 1)).velocity(), V::zero());
}

#[test]
fn translations_track_displacement() {
    let mut mesh = grid(3, 2);
    assert!(mesh.translations().iter().all(|t| *t == V::zero()));
    let solver = SolverConfig::new().with_gravity(Vec3::new(0.0, -9.81, 0.0));
    // The first step only picks up velocity.
    for _ in 0..3 {
        mesh.step(&solver, &NoExternalForce, &mut NoOpStepObserver);
    }
    let moved = mesh.translations();
    assert!(moved.iter().all(|t| t.y < 0.0));
}

#[test]
fn geometry_follows_particles() {
    let mut mesh = grid(3, 3);
    let mut cloth = mesh.geometry([0.5, 0.5, 0.5]).unwrap();
    let solver = SolverConfig::new().with_gravity(Vec3::new(0.0, -9.81, 0.0));
    for _ in 0..10 {
        mesh.step(&solver, &NoExternalForce, &mut NoOpStepObserver);
    }
    mesh.update_geometry(&mut cloth).unwrap();
    for (v, p) in cloth.vertices().iter().zip(mesh.particles()) {
        assert_eq!(v.position, p.position().to_vertex());
        assert_eq!(v.color, [0.5, 0.5, 0.5]);
    }
}

#[test]
fn geometry_update_rejects_wrong_vertex_count() {
    let mut small = grid(2, 2).geometry([1.0, 1.0, 1.0]).unwrap();
    let big = grid(3, 3);
    assert!(big.update_geometry(&mut small).is_err());
}
