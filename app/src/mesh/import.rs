//! glTF import.
//!
//! The default scene (or the first one) is walked depth-first. Every triangle
//! primitive under a node becomes one [`MeshPart`](super::MeshPart), placed
//! with the node's world transform and colored with its material's base color.

use std::path::Path;

use common::prof;
use gltf::{buffer::Data, mesh::Mode, Document, Node};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::types::{F32x3, Matrix4};

use super::{Mesh, MeshBuilder, MeshError};

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Unsupported model format {0:?} (expected .gltf or .glb)")]
    UnsupportedFormat(String),
    #[error("Failed to read glTF: {0}")]
    Gltf(#[from] gltf::Error),
    #[error("glTF document has no scene")]
    NoScene,
    #[error("Node {0} is reached twice while walking the scene (cyclic hierarchy)")]
    NodeCycle(usize),
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// Import the model at `path`
pub fn load_file(path: impl AsRef<Path>) -> Result<Mesh, ImportError> {
    let path = path.as_ref();
    prof!("import::load_file");

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    if !matches!(extension.as_str(), "gltf" | "glb") {
        return Err(ImportError::UnsupportedFormat(extension));
    }

    debug!(?path, "Importing model");
    let (document, buffers, _) = gltf::import(path)?;
    let mesh = build(&document, &buffers)?;
    info!(
        ?path,
        vertices = mesh.vertices.len(),
        triangles = mesh.triangle_count(),
        parts = mesh.parts.len(),
        "Model imported"
    );

    Ok(mesh)
}

/// Import a model from the bytes of a `.glb` or a self-contained `.gltf`
pub fn load_slice(bytes: &[u8]) -> Result<Mesh, ImportError> {
    let (document, buffers, _) = gltf::import_slice(bytes)?;
    build(&document, &buffers)
}

fn build(document: &Document, buffers: &[Data]) -> Result<Mesh, ImportError> {
    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or(ImportError::NoScene)?;

    let mut builder = MeshBuilder::new();
    let mut visited = vec![false; document.nodes().len()];

    // Depth-first with an explicit stack, children pushed in reverse to keep
    // document order. Node hierarchies must be trees, so a second visit means
    // a cycle or a shared child.
    let mut stack: Vec<(Node, Matrix4)> = scene
        .nodes()
        .map(|node| (node, Matrix4::IDENTITY))
        .collect();
    stack.reverse();

    while let Some((node, parent)) = stack.pop() {
        let seen = visited
            .get_mut(node.index())
            .ok_or(ImportError::NodeCycle(node.index()))?;
        if *seen {
            return Err(ImportError::NodeCycle(node.index()));
        }
        *seen = true;

        let world = parent * Matrix4::from_cols_array_2d(&node.transform().matrix());
        push_node_mesh(&node, world, buffers, &mut builder)?;

        let children: Vec<_> = node.children().collect();
        stack.extend(children.into_iter().rev().map(|child| (child, world)));
    }

    Ok(builder.build()?)
}

fn push_node_mesh(
    node: &Node,
    world: Matrix4,
    buffers: &[Data],
    builder: &mut MeshBuilder,
) -> Result<(), ImportError> {
    let Some(mesh) = node.mesh() else {
        return Ok(());
    };

    for primitive in mesh.primitives() {
        if primitive.mode() != Mode::Triangles {
            warn!(
                mesh = mesh.name(),
                mode = ?primitive.mode(),
                "Skipping non-triangle primitive"
            );
            continue;
        }

        let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| &data.0[..]));

        let positions: Vec<[f32; 3]> = match reader.read_positions() {
            Some(positions) => positions
                .map(|position| world.transform_point3(F32x3::from(position)).to_array())
                .collect(),
            None => {
                warn!(mesh = mesh.name(), "Skipping primitive without positions");
                continue;
            }
        };
        let indices: Option<Vec<u32>> = reader
            .read_indices()
            .map(|indices| indices.into_u32().collect());
        let color = primitive
            .material()
            .pbr_metallic_roughness()
            .base_color_factor();

        builder.push_part(&positions, indices.as_deref(), color)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshPart;

    const TWO_PARTS: &[u8] = include_bytes!("fixtures/two_parts.gltf");

    #[test]
    fn walks_scene_depth_first() {
        let mesh = load_slice(TWO_PARTS).unwrap();

        // Triangle (3) + child quad (4) + unmaterialed quad (4), point primitive skipped
        assert_eq!(mesh.vertices.len(), 11);
        assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5, 3, 5, 6, 7, 9, 10]);
        assert_eq!(
            mesh.parts,
            vec![
                MeshPart {
                    index_offset: 0,
                    index_count: 3,
                    color: [1.0, 0.0, 0.0, 1.0],
                },
                MeshPart {
                    index_offset: 3,
                    index_count: 6,
                    color: [0.0, 1.0, 0.0, 1.0],
                },
                MeshPart {
                    index_offset: 9,
                    index_count: 3,
                    color: Mesh::WHITE,
                },
            ]
        );
        assert!(mesh.is_consistent());
    }

    #[test]
    fn applies_node_transforms() {
        let mesh = load_slice(TWO_PARTS).unwrap();

        // Root node is untransformed
        assert_eq!(mesh.vertices[1].position, F32x3::new(1.0, 0.0, 0.0));
        // Child node is moved by +2 on X
        assert_eq!(mesh.vertices[3].position, F32x3::new(2.0, 0.0, 0.0));
        assert_eq!(mesh.vertices[5].position, F32x3::new(3.0, 1.0, 0.0));
    }

    #[test]
    fn loads_demo_asset() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../assets/models/scene.gltf");
        let mesh = load_file(path).unwrap();

        assert_eq!(mesh.parts.len(), 2);
        assert_eq!(mesh.vertices.len(), 9);
        assert_eq!(mesh.triangle_count(), 8);
        assert!(mesh.is_consistent());
    }

    #[test]
    fn rejects_unknown_extension() {
        assert!(matches!(
            load_file("model.fbx"),
            Err(ImportError::UnsupportedFormat(ext)) if ext == "fbx"
        ));
        assert!(matches!(
            load_file("model"),
            Err(ImportError::UnsupportedFormat(ext)) if ext.is_empty()
        ));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(matches!(
            load_file("does/not/exist.gltf"),
            Err(ImportError::Gltf(_))
        ));
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(matches!(
            load_slice(b"not a model"),
            Err(ImportError::Gltf(_))
        ));
    }

    #[test]
    fn document_without_triangles_is_empty() {
        let json = br#"{
            "asset": { "version": "2.0" },
            "scene": 0,
            "scenes": [{ "nodes": [0] }],
            "nodes": [{ "name": "Empty" }]
        }"#;

        assert!(matches!(
            load_slice(json),
            Err(ImportError::Mesh(MeshError::Empty))
        ));
    }

    /// Parse without validation so the hierarchy checks run on our side
    fn unvalidated(json: &str) -> Document {
        Document::from_json_without_validation(gltf::json::Root::from_str(json).unwrap())
    }

    #[test]
    fn self_parented_node_is_a_cycle() {
        let document = unvalidated(
            r#"{
                "asset": { "version": "2.0" },
                "scene": 0,
                "scenes": [{ "nodes": [0] }],
                "nodes": [{ "children": [0] }]
            }"#,
        );

        assert!(matches!(
            build(&document, &[]),
            Err(ImportError::NodeCycle(0))
        ));
    }

    #[test]
    fn mutually_parented_nodes_are_a_cycle() {
        let document = unvalidated(
            r#"{
                "asset": { "version": "2.0" },
                "scene": 0,
                "scenes": [{ "nodes": [0] }],
                "nodes": [{ "children": [1] }, { "children": [0] }]
            }"#,
        );

        assert!(matches!(
            build(&document, &[]),
            Err(ImportError::NodeCycle(0))
        ));
    }

    #[test]
    fn deep_hierarchy_does_not_recurse() {
        const DEPTH: usize = 100_000;

        let nodes = (0..DEPTH)
            .map(|i| {
                if i + 1 < DEPTH {
                    format!(r#"{{ "children": [{}] }}"#, i + 1)
                } else {
                    "{}".to_owned()
                }
            })
            .collect::<Vec<_>>()
            .join(",");
        let document = unvalidated(&format!(
            r#"{{
                "asset": {{ "version": "2.0" }},
                "scene": 0,
                "scenes": [{{ "nodes": [0] }}],
                "nodes": [{nodes}]
            }}"#
        ));

        // No meshes anywhere, but the whole chain is walked
        assert!(matches!(
            build(&document, &[]),
            Err(ImportError::Mesh(MeshError::Empty))
        ));
    }
}
