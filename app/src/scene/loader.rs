use std::path::PathBuf;

use tracing::error;

use crate::mesh::{import::ImportError, Mesh};

use super::{controls::Controls, shape::Shape};

/// Last successfully imported mesh and where it came from
pub struct LoadedMesh {
    pub path: PathBuf,
    pub mesh: Mesh,
}

/// Keeps the imported mesh and the status line shown for the last attempt.
///
/// Holds no GPU state: the scene uploads whatever [`ModelLoader::apply`]
/// hands back.
#[derive(Default)]
pub struct ModelLoader {
    current: Option<LoadedMesh>,
    status: Option<String>,
}

impl ModelLoader {
    pub fn current(&self) -> Option<&LoadedMesh> {
        self.current.as_ref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Whether `shape` has something to draw
    pub fn can_show(&self, shape: Shape) -> bool {
        shape != Shape::Model || self.current.is_some()
    }

    /// Record the outcome of importing `path`.
    ///
    /// On success the mesh replaces the current one, the model shape is
    /// selected and the new mesh is returned for upload. On failure the
    /// current mesh is kept; if there is none the shape falls back to the
    /// triangle.
    pub fn apply(
        &mut self,
        path: PathBuf,
        result: Result<Mesh, ImportError>,
        controls: &mut Controls,
    ) -> Option<&Mesh> {
        match result {
            Ok(mesh) => {
                self.status = Some(format!(
                    "Loaded {} parts, {} triangles",
                    mesh.parts.len(),
                    mesh.triangle_count()
                ));
                controls.shape = Shape::Model;

                let loaded = self.current.insert(LoadedMesh { path, mesh });
                Some(&loaded.mesh)
            }
            Err(err) => {
                error!(?path, "Failed to load model: {err}");
                self.status = Some(format!("Failed to load {}: {err}", path.display()));

                if !self.can_show(controls.shape) {
                    controls.shape = Shape::Triangle;
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model_controls() -> Controls {
        Controls {
            shape: Shape::Model,
            ..Default::default()
        }
    }

    #[test]
    fn successful_import_selects_model() {
        let mut loader = ModelLoader::default();
        let mut controls = Controls::default();

        let mesh = loader.apply("quad.gltf".into(), Ok(Mesh::quad()), &mut controls);

        assert_eq!(mesh, Some(&Mesh::quad()));
        assert_eq!(controls.shape, Shape::Model);
        assert_eq!(loader.status(), Some("Loaded 1 parts, 2 triangles"));
        assert_eq!(
            loader.current().map(|loaded| loaded.path.clone()),
            Some(PathBuf::from("quad.gltf"))
        );
    }

    #[test]
    fn failed_import_keeps_previous_mesh() {
        let mut loader = ModelLoader::default();
        let mut controls = model_controls();
        loader.apply("first.gltf".into(), Ok(Mesh::triangle()), &mut controls);

        let mesh = loader.apply(
            "second.obj".into(),
            Err(ImportError::UnsupportedFormat("obj".into())),
            &mut controls,
        );

        assert!(mesh.is_none());
        assert_eq!(controls.shape, Shape::Model);
        let loaded = loader.current().unwrap();
        assert_eq!(loaded.path, PathBuf::from("first.gltf"));
        assert_eq!(loaded.mesh, Mesh::triangle());

        let status = loader.status().unwrap();
        assert!(status.starts_with("Failed to load second.obj"), "{status}");
    }

    #[test]
    fn failed_initial_import_falls_back_to_triangle() {
        let mut loader = ModelLoader::default();
        let mut controls = model_controls();

        let mesh = loader.apply("scene.gltf".into(), Err(ImportError::NoScene), &mut controls);

        assert!(mesh.is_none());
        assert!(loader.current().is_none());
        assert_eq!(controls.shape, Shape::Triangle);
        assert!(loader.status().is_some());
    }

    #[test]
    fn failed_import_leaves_builtin_shape_alone() {
        let mut loader = ModelLoader::default();
        let mut controls = Controls {
            shape: Shape::Quad,
            ..Default::default()
        };

        loader.apply("scene.gltf".into(), Err(ImportError::NoScene), &mut controls);

        assert_eq!(controls.shape, Shape::Quad);
    }

    #[test]
    fn model_shape_needs_a_mesh() {
        let mut loader = ModelLoader::default();
        assert!(loader.can_show(Shape::Triangle));
        assert!(loader.can_show(Shape::Quad));
        assert!(!loader.can_show(Shape::Model));

        loader.apply(
            "quad.gltf".into(),
            Ok(Mesh::quad()),
            &mut Controls::default(),
        );
        assert!(loader.can_show(Shape::Model));
    }
}
