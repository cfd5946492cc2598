use std::{marker::PhantomData, mem::size_of};

use bytemuck::{cast_slice, Pod};
use wgpu::{
    util::{BufferInitDescriptor, DeviceExt},
    BufferDescriptor, BufferSlice, BufferUsages, Device, Queue,
};

/// Data that can live in a typed GPU buffer. `LABEL` names the buffer in
/// validation messages and graphics debuggers.
pub trait Bufferable {
    const LABEL: &'static str;
}

impl Bufferable for u32 {
    const LABEL: &'static str = "IndexBuffer";
}

/// Vertex or index data, uploaded once when a mesh is turned into a model
pub struct Buffer<T: Copy + Pod + Bufferable> {
    inner: wgpu::Buffer,
    length: usize,
    phantom: PhantomData<T>,
}

impl<T: Copy + Pod + Bufferable> Buffer<T> {
    pub fn new(device: &Device, data: &[T], usage: BufferUsages) -> Self {
        Self {
            inner: device.create_buffer_init(&BufferInitDescriptor {
                label: Some(T::LABEL),
                contents: cast_slice(data),
                usage,
            }),
            length: data.len(),
            phantom: PhantomData,
        }
    }

    /// Number of `T` elements
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn slice(&self) -> BufferSlice {
        self.inner.slice(..)
    }
}

/// Uniform data rewritten from the CPU, usually once per frame
pub struct Consts<T: Copy + Pod + Bufferable> {
    inner: wgpu::Buffer,
    length: usize,
    phantom: PhantomData<T>,
}

impl<T: Copy + Pod + Bufferable> Consts<T> {
    /// Allocate room for `values` and upload them
    pub fn new(device: &Device, queue: &Queue, values: &[T]) -> Self {
        let consts = Self {
            inner: device.create_buffer(&BufferDescriptor {
                label: Some(T::LABEL),
                size: uniform_size::<T>(values.len()),
                usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }),
            length: values.len(),
            phantom: PhantomData,
        };
        consts.update(queue, values);
        consts
    }

    /// Overwrite the leading `values.len()` elements
    pub fn update(&self, queue: &Queue, values: &[T]) {
        debug_assert!(values.len() <= self.length, "{} overflow", T::LABEL);

        if !values.is_empty() {
            queue.write_buffer(&self.inner, 0, cast_slice(values));
        }
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.inner
    }
}

/// Byte size of a uniform buffer holding `length` elements. Never zero, a
/// zero-sized buffer can't be bound.
fn uniform_size<T>(length: usize) -> u64 {
    (size_of::<T>() * length.max(1)) as u64
}

#[cfg(test)]
mod tests {
    use crate::render::pipelines::{Globals, Locals};

    use super::*;

    #[test]
    fn uniform_size_counts_elements() {
        assert_eq!(uniform_size::<Locals>(1), 16);
        assert_eq!(uniform_size::<Locals>(3), 48);
        assert_eq!(uniform_size::<Globals>(1), 4 * 64);
    }

    #[test]
    fn empty_uniform_still_has_one_element() {
        assert_eq!(uniform_size::<Locals>(0), uniform_size::<Locals>(1));
    }
}
