//! Interleaved vertex records and triangle-list index buffers.
//!
//! A [`GeometryBuffer`] is the hand-off format between the simulation and the
//! renderer: `#[repr(C)]` vertex structs that can be viewed as raw bytes, plus
//! a flat `u32` index list in triangle-list topology.

use crate::error::PhysicsError;
use alloc::vec::Vec as AllocVec;
use bytemuck::{Pod, Zeroable};

/// A vertex record that can be uploaded as-is.
pub trait Vertex: Pod {
    /// Number of `f32` values per record.
    const FLOATS: usize;

    fn position(&self) -> [f32; 3];
    fn set_position(&mut self, position: [f32; 3]);
}

/// Position + RGB color, 6 floats. Used for the cloth surface.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ColorVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex for ColorVertex {
    const FLOATS: usize = 6;
    fn position(&self) -> [f32; 3] { self.position }
    fn set_position(&mut self, position: [f32; 3]) { self.position = position; }
}

/// Position + normal + texture coordinates, 8 floats. Used for generated meshes.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coord: [f32; 2],
}

impl Vertex for MeshVertex {
    const FLOATS: usize = 8;
    fn position(&self) -> [f32; 3] { self.position }
    fn set_position(&mut self, position: [f32; 3]) { self.position = position; }
}

/// Vertex records plus a triangle-list index buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryBuffer<T: Vertex> {
    vertices: AllocVec<T>,
    indices: AllocVec<u32>,
}

impl<T: Vertex> GeometryBuffer<T> {
    /// Build a buffer, checking that the index list forms valid triangles.
    pub fn new(vertices: AllocVec<T>, indices: AllocVec<u32>) -> Result<Self, PhysicsError> {
        let buffer = GeometryBuffer { vertices, indices };
        buffer.validate()?;
        Ok(buffer)
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        if self.indices.len() % 3 != 0 {
            return Err(PhysicsError::IncompleteTriangle { len: self.indices.len() });
        }
        let vertex_count = self.vertices.len();
        match self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            Some(&index) => Err(PhysicsError::IndexOutOfBounds { index, vertex_count }),
            None => Ok(()),
        }
    }

    pub fn vertices(&self) -> &[T] { &self.vertices }

    /// Mutable access to vertex records. The index list cannot be changed, so
    /// the buffer stays valid.
    pub fn vertices_mut(&mut self) -> &mut [T] { &mut self.vertices }

    pub fn indices(&self) -> &[u32] { &self.indices }

    /// Index triplets, one per triangle.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    pub fn vertex_count(&self) -> usize { self.vertices.len() }
    pub fn triangle_count(&self) -> usize { self.indices.len() / 3 }
    pub fn is_empty(&self) -> bool { self.indices.is_empty() }

    /// Size of one vertex record in bytes.
    pub fn stride(&self) -> usize { core::mem::size_of::<T>() }

    pub fn vertex_bytes(&self) -> &[u8] { bytemuck::cast_slice(&self.vertices) }
    pub fn index_bytes(&self) -> &[u8] { bytemuck::cast_slice(&self.indices) }

    /// Vertex records as one flat run of `T::FLOATS` floats each.
    pub fn vertex_floats(&self) -> &[f32] { bytemuck::cast_slice(&self.vertices) }

    /// Unnormalized face normal of triangle `t` from its winding order.
    pub fn face_normal(&self, t: usize) -> [f32; 3] {
        let a = self.vertices[self.indices[3 * t] as usize].position();
        let b = self.vertices[self.indices[3 * t + 1] as usize].position();
        let c = self.vertices[self.indices[3 * t + 2] as usize].position();
        let e1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
        let e2 = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
        [
            e1[1] * e2[2] - e1[2] * e2[1],
            e1[2] * e2[0] - e1[0] * e2[2],
            e1[0] * e2[1] - e1[1] * e2[0],
        ]
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for an empty buffer.
    pub fn extents(&self) -> Option<([f32; 3], [f32; 3])> {
        let first = self.vertices.first()?.position();
        Some(self.vertices.iter().skip(1).fold((first, first), |(mut lo, mut hi), v| {
            let p = v.position();
            for k in 0..3 {
                lo[k] = lo[k].min(p[k]);
                hi[k] = hi[k].max(p[k]);
            }
            (lo, hi)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn quad() -> AllocVec<ColorVertex> {
        [[0.5, 0.5, 0.0], [0.5, -0.5, 0.0], [-0.5, -0.5, 0.0], [-0.5, 0.5, 0.0]]
            .iter()
            .map(|&position| ColorVertex { position, color: [1.0, 0.0, 0.0] })
            .collect()
    }

    #[test]
    fn record_strides_match_float_counts() {
        assert_eq!(core::mem::size_of::<ColorVertex>(), ColorVertex::FLOATS * 4);
        assert_eq!(core::mem::size_of::<MeshVertex>(), MeshVertex::FLOATS * 4);
    }

    #[test]
    fn rejects_out_of_range_index() {
        let err = GeometryBuffer::new(quad(), vec![0, 1, 4]).unwrap_err();
        assert_eq!(err, PhysicsError::IndexOutOfBounds { index: 4, vertex_count: 4 });
    }

    #[test]
    fn rejects_partial_triangle() {
        let err = GeometryBuffer::new(quad(), vec![0, 1, 3, 1]).unwrap_err();
        assert_eq!(err, PhysicsError::IncompleteTriangle { len: 4 });
    }

    #[test]
    fn byte_views_cover_all_records() {
        let buffer = GeometryBuffer::new(quad(), vec![0, 1, 3, 1, 2, 3]).unwrap();
        assert_eq!(buffer.triangle_count(), 2);
        assert_eq!(buffer.vertex_bytes().len(), 4 * 24);
        assert_eq!(buffer.index_bytes().len(), 6 * 4);
        assert_eq!(buffer.stride(), 24);
        assert_eq!(buffer.vertex_floats().len(), 4 * ColorVertex::FLOATS);
        assert_eq!(&buffer.vertex_floats()[..6], &[0.5, 0.5, 0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn extents_span_the_quad() {
        let buffer = GeometryBuffer::new(quad(), vec![0, 1, 3]).unwrap();
        let (lo, hi) = buffer.extents().unwrap();
        assert_eq!(lo, [-0.5, -0.5, 0.0]);
        assert_eq!(hi, [0.5, 0.5, 0.0]);
    }

    #[test]
    fn winding_sets_face_normal_sign() {
        // (0, 1, 3) runs clockwise seen from +z
        let buffer = GeometryBuffer::new(quad(), vec![0, 1, 3, 3, 1, 0]).unwrap();
        assert!(buffer.face_normal(0)[2] < 0.0);
        assert!(buffer.face_normal(1)[2] > 0.0);
    }
}
