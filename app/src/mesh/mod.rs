//! CPU-side geometry.
//!
//! A [`Mesh`] is a flat vertex buffer, one index buffer and a list of
//! [`MeshPart`]s. Every part is a contiguous range of the index buffer drawn
//! with its own color. Sub-meshes are concatenated by [`MeshBuilder`], which
//! rebases their indices onto the shared vertex buffer.

use thiserror::Error;

use crate::{
    render::primitives::vertex::Vertex,
    types::{Color, F32x3},
};

pub mod import;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MeshError {
    #[error("Index {index} of part #{part} is out of range ({vertices} vertices)")]
    IndexOutOfRange {
        part: usize,
        index: u32,
        vertices: usize,
    },
    #[error("Part #{part} has {count} indices, which is not a whole number of triangles")]
    IncompleteTriangle { part: usize, count: usize },
    #[error("Mesh is too large for 32-bit indices")]
    TooManyVertices,
    #[error("Mesh has no triangles")]
    Empty,
}

/// Range of the index buffer drawn with one color
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshPart {
    /// First index of the part in the index buffer
    pub index_offset: u32,
    /// Number of indices in the part
    pub index_count: u32,
    pub color: Color,
}

impl MeshPart {
    pub fn range(&self) -> std::ops::Range<u32> {
        self.index_offset..self.index_offset + self.index_count
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: F32x3,
    pub max: F32x3,
}

impl Bounds {
    pub fn center(&self) -> F32x3 {
        (self.min + self.max) * 0.5
    }

    pub fn extent(&self) -> F32x3 {
        self.max - self.min
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub parts: Vec<MeshPart>,
}

impl Mesh {
    pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];

    /// Largest extent of a normalized mesh
    pub const NORMALIZED_EXTENT: f32 = 2.0;

    pub fn triangle() -> Self {
        Self::single_part(Vertex::TRIANGLE.to_vec(), vec![0, 1, 2])
    }

    pub fn quad() -> Self {
        Self::single_part(Vertex::QUAD.to_vec(), Vertex::QUAD_INDICES.to_vec())
    }

    fn single_part(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        let part = MeshPart {
            index_offset: 0,
            index_count: indices.len() as u32,
            color: Self::WHITE,
        };

        Self {
            vertices,
            indices,
            parts: vec![part],
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Bounds of all vertices, `None` for an empty mesh
    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.vertices.first()?.position;

        Some(self.vertices.iter().fold(
            Bounds {
                min: first,
                max: first,
            },
            |bounds, vertex| Bounds {
                min: bounds.min.min(vertex.position),
                max: bounds.max.max(vertex.position),
            },
        ))
    }

    /// Center the mesh on the origin and scale it into the `[-1, 1]` cube.
    ///
    /// Flat meshes keep their proportions; a mesh collapsed into a single point
    /// is only recentered.
    pub fn normalize(&mut self) {
        let Some(bounds) = self.bounds() else {
            return;
        };

        let center = bounds.center();
        let largest = bounds.extent().max_element();
        let scale = if largest > f32::EPSILON {
            Self::NORMALIZED_EXTENT / largest
        } else {
            1.0
        };

        self.vertices
            .iter_mut()
            .for_each(|vertex| vertex.position = (vertex.position - center) * scale);
    }

    /// Check the buffer invariants: parts are ordered, cover the index buffer
    /// and every index points at an existing vertex.
    pub fn is_consistent(&self) -> bool {
        let ordered = self
            .parts
            .windows(2)
            .all(|pair| pair[0].index_offset <= pair[1].index_offset);
        let covered = self
            .parts
            .iter()
            .map(|part| part.index_count as usize)
            .sum::<usize>()
            == self.indices.len();
        let in_range = self
            .indices
            .iter()
            .all(|&index| (index as usize) < self.vertices.len());

        ordered && covered && in_range
    }
}

/// Concatenates sub-meshes into one [`Mesh`]
#[derive(Default)]
pub struct MeshBuilder {
    mesh: Mesh,
    /// Parts pushed so far, including skipped empty ones
    pushed: usize,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sub-mesh.
    ///
    /// `indices` are local to `positions`; `None` means the positions already
    /// form a triangle list. Sub-meshes without triangles are skipped.
    pub fn push_part(
        &mut self,
        positions: &[[f32; 3]],
        indices: Option<&[u32]>,
        color: Color,
    ) -> Result<Option<MeshPart>, MeshError> {
        let part = self.pushed;
        self.pushed += 1;

        let base = self.mesh.vertices.len();
        if base + positions.len() > u32::MAX as usize {
            return Err(MeshError::TooManyVertices);
        }

        let local: Vec<u32> = match indices {
            Some(indices) => {
                if let Some(&index) = indices
                    .iter()
                    .find(|&&index| index as usize >= positions.len())
                {
                    return Err(MeshError::IndexOutOfRange {
                        part,
                        index,
                        vertices: positions.len(),
                    });
                }
                indices.to_vec()
            }
            None => (0..positions.len() as u32).collect(),
        };

        if local.len() % 3 != 0 {
            return Err(MeshError::IncompleteTriangle {
                part,
                count: local.len(),
            });
        }
        if local.is_empty() {
            return Ok(None);
        }

        let mesh_part = MeshPart {
            index_offset: self.mesh.indices.len() as u32,
            index_count: local.len() as u32,
            color,
        };

        self.mesh
            .vertices
            .extend(positions.iter().map(|&position| Vertex::from(position)));
        self.mesh
            .indices
            .extend(local.into_iter().map(|index| index + base as u32));
        self.mesh.parts.push(mesh_part);

        Ok(Some(mesh_part))
    }

    pub fn build(self) -> Result<Mesh, MeshError> {
        if self.mesh.parts.is_empty() {
            Err(MeshError::Empty)
        } else {
            Ok(self.mesh)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = [1.0, 0.0, 0.0, 1.0];
    const BLUE: Color = [0.0, 0.0, 1.0, 1.0];

    fn square() -> [[f32; 3]; 4] {
        [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ]
    }

    #[test]
    fn builtin_shapes_are_consistent() {
        for mesh in [Mesh::triangle(), Mesh::quad()] {
            assert!(mesh.is_consistent());
            assert_eq!(mesh.parts.len(), 1);
        }
        assert_eq!(Mesh::triangle().triangle_count(), 1);
        assert_eq!(Mesh::quad().triangle_count(), 2);
    }

    #[test]
    fn parts_are_rebased_onto_shared_buffers() {
        let mut builder = MeshBuilder::new();
        builder
            .push_part(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]], None, RED)
            .unwrap();
        builder
            .push_part(&square(), Some(&[0, 1, 2, 0, 2, 3]), BLUE)
            .unwrap();
        let mesh = builder.build().unwrap();

        assert_eq!(mesh.vertices.len(), 7);
        assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5, 3, 5, 6]);
        assert_eq!(
            mesh.parts,
            vec![
                MeshPart {
                    index_offset: 0,
                    index_count: 3,
                    color: RED
                },
                MeshPart {
                    index_offset: 3,
                    index_count: 6,
                    color: BLUE
                },
            ]
        );
        assert_eq!(mesh.parts[1].range(), 3..9);
        assert!(mesh.is_consistent());
    }

    #[test]
    fn empty_parts_are_skipped() {
        let mut builder = MeshBuilder::new();
        let empty: [[f32; 3]; 0] = [];
        assert_eq!(builder.push_part(&empty, None, RED), Ok(None));
        builder.push_part(&square(), Some(&[0, 1, 2]), BLUE).unwrap();

        let mesh = builder.build().unwrap();
        assert_eq!(mesh.parts.len(), 1);
        assert_eq!(mesh.parts[0].index_offset, 0);
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut builder = MeshBuilder::new();
        builder.push_part(&square(), Some(&[0, 1, 2]), RED).unwrap();

        assert_eq!(
            builder.push_part(&square(), Some(&[0, 1, 4]), BLUE),
            Err(MeshError::IndexOutOfRange {
                part: 1,
                index: 4,
                vertices: 4
            })
        );
    }

    #[test]
    fn partial_triangle_is_rejected() {
        let mut builder = MeshBuilder::new();
        assert_eq!(
            builder.push_part(&square(), None, RED),
            Err(MeshError::IncompleteTriangle { part: 0, count: 4 })
        );
    }

    #[test]
    fn empty_builder_fails() {
        assert_eq!(MeshBuilder::new().build(), Err(MeshError::Empty));
    }

    #[test]
    fn normalize_fits_unit_cube() {
        let mut builder = MeshBuilder::new();
        builder
            .push_part(&[[0.0, 0.0, 0.0], [4.0, 0.0, 0.0], [0.0, 2.0, 0.0]], None, RED)
            .unwrap();
        let mut mesh = builder.build().unwrap();
        mesh.normalize();

        let bounds = mesh.bounds().unwrap();
        assert_eq!(bounds.min, F32x3::new(-1.0, -0.5, 0.0));
        assert_eq!(bounds.max, F32x3::new(1.0, 0.5, 0.0));
    }

    #[test]
    fn normalize_point_only_recenters() {
        let mut builder = MeshBuilder::new();
        builder
            .push_part(&[[3.0, 3.0, 3.0]; 3], None, RED)
            .unwrap();
        let mut mesh = builder.build().unwrap();
        mesh.normalize();

        assert!(mesh
            .vertices
            .iter()
            .all(|vertex| vertex.position == F32x3::ZERO));
    }

    #[test]
    fn inconsistent_mesh_is_detected() {
        let mut mesh = Mesh::quad();
        mesh.indices[0] = 10;
        assert!(!mesh.is_consistent());

        let mut mesh = Mesh::quad();
        mesh.parts[0].index_count = 3;
        assert!(!mesh.is_consistent());
    }
}
