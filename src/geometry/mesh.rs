use crate::error::Result;
use crate::geometry::{MeshBounds, Triangle};
use glam::Vec3;
use std::io::BufReader;
use std::path::Path;

/// Triangle soup handed over by an asset loader.
///
/// `bounds` is only set when the source format carried precomputed bounds; OBJ
/// never does, so those meshes get their box from [`MeshBounds::from_triangles`].
#[derive(Debug, Default, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
    pub bounds: Option<MeshBounds>,
}

impl Mesh {
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self {
            triangles,
            bounds: None,
        }
    }
    pub fn with_bounds(mut self, bounds: MeshBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read(path)?;
        Self::load_obj(&source)
    }
    pub fn load_obj(source: &[u8]) -> Result<Self> {
        let mut reader = BufReader::new(source);
        let (models, _materials) = tobj::load_obj_buf(
            &mut reader,
            &tobj::LoadOptions {
                single_index: true,
                triangulate: true,
                ..Default::default()
            },
            |_matpath| Err(tobj::LoadError::GenericFailure),
        )?;
        let mut triangles = Vec::new();
        for model in models {
            let mesh = model.mesh;
            let position = |i: u32| {
                let i = i as usize * 3;
                Vec3::new(
                    mesh.positions[i],
                    mesh.positions[i + 1],
                    mesh.positions[i + 2],
                )
            };
            for t in mesh.indices.chunks_exact(3) {
                triangles.push(Triangle::new(
                    position(t[0]),
                    position(t[1]),
                    position(t[2]),
                ));
            }
        }
        log::debug!("read {} triangles from OBJ", triangles.len());
        Ok(Self::new(triangles))
    }
}
