//! Asset-to-acceleration-structure pipeline, runnable on a background thread.

use crate::bvh::{write_in_order, BvhConfig, RaytraceTriangle, Tree};
use crate::cache::Object;
use crate::error::{Error, Result};
use crate::geometry::{Mesh, MeshBounds};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// Everything a renderer needs from one load. The cache, the tree and the GPU
/// triangles belong together and are replaced together.
#[derive(Debug, Default, Clone)]
pub struct Model {
    pub object: Object,
    pub tree: Tree,
    pub gpu_triangles: Vec<RaytraceTriangle>,
}

impl Model {
    pub fn bounds(&self) -> &MeshBounds {
        &self.object.bounds
    }
    pub fn view_distance(&self) -> f32 {
        self.object.bounds.view_distance()
    }
}

/// Bounds (when the loader had none), cache, BVH and GPU layout, in that order.
pub fn build_model(mesh: Mesh, config: &BvhConfig) -> Result<Model> {
    let start = Instant::now();
    let bounds = match mesh.bounds {
        Some(bounds) => bounds,
        None => MeshBounds::from_triangles(&mesh.triangles)?,
    };
    let object = Object::new(&mesh.triangles, bounds)?;
    let tree = Tree::build_with(&object, config);
    let gpu_triangles = write_in_order(&object.mesh, &tree.indices);
    log::debug!("model built in {:?}", start.elapsed());
    Ok(Model {
        object,
        tree,
        gpu_triangles,
    })
}

/// A load running on its own thread. The result can be taken exactly once.
#[derive(Debug)]
pub struct LoadTask {
    receiver: Receiver<Result<Model>>,
    handle: Option<JoinHandle<()>>,
}

impl LoadTask {
    pub fn spawn(path: PathBuf, config: BvhConfig) -> Self {
        log::info!("loading {}", path.display());
        Self::spawn_with(move || Mesh::open(&path), config)
    }

    /// Runs `load` and the rest of the pipeline on a worker thread.
    pub fn spawn_with<F>(load: F, config: BvhConfig) -> Self
    where
        F: FnOnce() -> Result<Mesh> + Send + 'static,
    {
        let (tx, rx) = channel();
        let handle = thread::spawn(move || {
            let result = load().and_then(|mesh| build_model(mesh, &config));
            if let Err(e) = &result {
                log::warn!("load failed: {e}");
            }
            // The receiver may already be gone if the task was abandoned.
            let _ = tx.send(result);
        });
        Self {
            receiver: rx,
            handle: Some(handle),
        }
    }

    /// Non-blocking poll; `None` while the worker is still busy or after the result
    /// has been taken.
    pub fn try_take(&mut self) -> Option<Result<Model>> {
        match self.receiver.try_recv() {
            Ok(result) => {
                self.join();
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => self.handle.take().map(|handle| {
                let _ = handle.join();
                Err(Error::WorkerDisconnected)
            }),
        }
    }

    /// Blocks until the worker finishes.
    pub fn wait(mut self) -> Result<Model> {
        let result = self.receiver.recv().map_err(|_| Error::WorkerDisconnected)?;
        self.join();
        result
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
