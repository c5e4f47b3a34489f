//! Ownership of renderer-side geometry buffers.
//!
//! The renderer implements [`GeometryBackend`]; a [`GeometryHandle`] holds one
//! uploaded buffer pair and hands it back to the backend when dropped.

use crate::error::PhysicsError;
use crate::geometry::{GeometryBuffer, Vertex};
use alloc::rc::Rc;
use core::cell::RefCell;

/// Renderer-side storage for vertex and index buffers.
pub trait GeometryBackend {
    /// Identifier of one uploaded vertex + index buffer pair.
    type Id;

    fn upload(&mut self, vertex_bytes: &[u8], index_bytes: &[u8], stride: usize) -> Result<Self::Id, PhysicsError>;
    fn update_vertices(&mut self, id: &Self::Id, vertex_bytes: &[u8]) -> Result<(), PhysicsError>;
    fn draw(&mut self, id: &Self::Id, index_count: usize);
    fn release(&mut self, id: Self::Id);
}

/// An uploaded geometry buffer, released exactly once when dropped.
pub struct GeometryHandle<B: GeometryBackend> {
    backend: Rc<RefCell<B>>,
    id: Option<B::Id>,
    vertex_count: usize,
    index_count: usize,
}

impl<B: GeometryBackend> GeometryHandle<B> {
    pub fn upload<T: Vertex>(backend: &Rc<RefCell<B>>, buffer: &GeometryBuffer<T>) -> Result<Self, PhysicsError> {
        let id = backend
            .try_borrow_mut()
            .map_err(|_| PhysicsError::Backend("backend already borrowed"))?
            .upload(buffer.vertex_bytes(), buffer.index_bytes(), buffer.stride())?;
        Ok(GeometryHandle {
            backend: Rc::clone(backend),
            id: Some(id),
            vertex_count: buffer.vertex_count(),
            index_count: buffer.indices().len(),
        })
    }

    /// Re-upload vertex data. The buffer must keep the uploaded vertex count.
    pub fn update<T: Vertex>(&mut self, buffer: &GeometryBuffer<T>) -> Result<(), PhysicsError> {
        if buffer.vertex_count() != self.vertex_count {
            return Err(PhysicsError::VertexCountMismatch {
                expected: self.vertex_count,
                found: buffer.vertex_count(),
            });
        }
        let id = self.id.as_ref().ok_or(PhysicsError::Backend("buffer already released"))?;
        self.backend
            .try_borrow_mut()
            .map_err(|_| PhysicsError::Backend("backend already borrowed"))?
            .update_vertices(id, buffer.vertex_bytes())
    }

    /// Issue a draw. Skipped, with an error logged, while the backend is
    /// borrowed elsewhere.
    pub fn draw(&self) {
        let Some(id) = self.id.as_ref() else { return };
        match self.backend.try_borrow_mut() {
            Ok(mut backend) => backend.draw(id, self.index_count),
            Err(_) => log::error!("geometry backend busy; draw of {} indices skipped", self.index_count),
        }
    }

    pub fn index_count(&self) -> usize { self.index_count }
    pub fn vertex_count(&self) -> usize { self.vertex_count }
}

impl<B: GeometryBackend> Drop for GeometryHandle<B> {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            match self.backend.try_borrow_mut() {
                Ok(mut backend) => backend.release(id),
                Err(_) => log::error!("geometry backend busy on drop; buffer not released"),
            }
        }
    }
}
