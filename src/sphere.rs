//! UV-sphere tessellation.
//!
//! The sphere is centered at the origin with `+z` as the polar axis. Vertex
//! layout: the top pole, then `segments - 1` latitude rings of
//! `2 * segments + 1` samples each (the last sample of a ring repeats the
//! first so texture coordinates can wrap), then the bottom pole. All triangles
//! wind counter-clockwise seen from outside.

use crate::error::PhysicsError;
use crate::geometry::{GeometryBuffer, MeshVertex};
use alloc::vec::Vec as AllocVec;
use core::f64::consts::PI;

/// Fewest latitude segments that still enclose a volume.
pub const MIN_SEGMENTS: usize = 2;

/// Number of vertices produced for `segments` latitude segments.
pub fn sphere_vertex_count(segments: usize) -> usize {
    let v = segments.max(MIN_SEGMENTS);
    2 + (v - 1) * (2 * v + 1)
}

/// Number of triangles produced for `segments` latitude segments.
pub fn sphere_triangle_count(segments: usize) -> usize {
    let v = segments.max(MIN_SEGMENTS);
    let h = 2 * v;
    h + (v - 2) * 2 * h + h
}

/// Generate a textured sphere with outward normals.
///
/// `segments` is the number of latitude bands; longitude uses twice as many.
/// Values below [`MIN_SEGMENTS`] are raised to it. Output depends only on the
/// arguments, bit for bit.
pub fn generate_sphere(radius: f32, segments: usize) -> Result<GeometryBuffer<MeshVertex>, PhysicsError> {
    if !(radius > 0.0) || !radius.is_finite() {
        return Err(PhysicsError::InvalidRadius);
    }
    if segments < MIN_SEGMENTS {
        log::debug!("sphere segments raised from {} to {}", segments, MIN_SEGMENTS);
    }
    let v_segs = segments.max(MIN_SEGMENTS);
    let h_segs = 2 * v_segs;
    let n_verts = sphere_vertex_count(v_segs);

    let mut vertices = AllocVec::with_capacity(n_verts);
    vertices.push(MeshVertex {
        position: [0.0, 0.0, radius],
        normal: [0.0, 0.0, 1.0],
        tex_coord: [0.5, 1.0],
    });

    for j in 0..v_segs - 1 {
        let theta = (j + 1) as f64 / v_segs as f64 * PI;
        let z = libm::cos(theta);
        let ring_radius = libm::sin(theta);
        let t = 1.0 - (j + 1) as f32 / v_segs as f32;
        for i in 0..=h_segs {
            let phi = i as f64 / h_segs as f64 * 2.0 * PI;
            let x = (ring_radius * libm::cos(phi)) as f32;
            let y = (ring_radius * libm::sin(phi)) as f32;
            let z = z as f32;
            vertices.push(MeshVertex {
                position: [radius * x, radius * y, radius * z],
                normal: [x, y, z],
                tex_coord: [i as f32 / h_segs as f32, t],
            });
        }
    }

    vertices.push(MeshVertex {
        position: [0.0, 0.0, -radius],
        normal: [0.0, 0.0, -1.0],
        tex_coord: [0.5, 0.0],
    });

    let indices = sphere_indices(v_segs, n_verts);
    log::debug!(
        "generated sphere: radius {}, {} vertices, {} triangles",
        radius,
        vertices.len(),
        indices.len() / 3
    );
    GeometryBuffer::new(vertices, indices)
}

fn sphere_indices(v_segs: usize, n_verts: usize) -> AllocVec<u32> {
    let h_segs = 2 * v_segs;
    let ring = h_segs + 1;
    let mut indices = AllocVec::with_capacity(3 * sphere_triangle_count(v_segs));

    // Top cap
    for i in 0..h_segs {
        indices.extend_from_slice(&[0, (1 + i) as u32, (2 + i) as u32]);
    }

    // Middle bands, empty when v_segs == 2
    for j in 0..v_segs - 2 {
        for i in 0..h_segs {
            let i0 = (1 + j * ring + i) as u32;
            let below = i0 + ring as u32;
            indices.extend_from_slice(&[i0, below, i0 + 1]);
            indices.extend_from_slice(&[i0 + 1, below, below + 1]);
        }
    }

    // Bottom cap
    let last = (n_verts - 1) as u32;
    for i in 0..h_segs as u32 {
        indices.extend_from_slice(&[last, last - 1 - i, last - 2 - i]);
    }

    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimum_sphere_has_no_middle_band() {
        let sphere = generate_sphere(1.0, 2).unwrap();
        assert_eq!(sphere.vertex_count(), 2 + 5);
        assert_eq!(sphere.triangle_count(), 8);
    }

    #[test]
    fn low_segment_counts_are_raised() {
        let clamped = generate_sphere(1.0, 0).unwrap();
        let minimum = generate_sphere(1.0, 2).unwrap();
        assert_eq!(clamped, minimum);
    }

    #[test]
    fn rejects_bad_radius() {
        assert_eq!(generate_sphere(0.0, 8).unwrap_err(), PhysicsError::InvalidRadius);
        assert_eq!(generate_sphere(-1.0, 8).unwrap_err(), PhysicsError::InvalidRadius);
        assert_eq!(generate_sphere(f32::NAN, 8).unwrap_err(), PhysicsError::InvalidRadius);
    }

    #[test]
    fn count_formulas_match_closed_form() {
        for s in 2..12 {
            assert_eq!(sphere_vertex_count(s), 2 + (s - 1) * (2 * s + 1));
            assert_eq!(sphere_triangle_count(s), 4 * s + (s - 2) * 4 * s);
        }
    }
}
