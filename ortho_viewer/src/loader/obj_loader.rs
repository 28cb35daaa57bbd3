/// Wavefront OBJ loader.
///
/// The file is read in fixed-size chunks, one chunk per `poll`, so the
/// host sees byte progress while it keeps rendering. Once the last chunk
/// is in, the buffer is parsed with `tobj` and every OBJ object becomes a
/// child of a root node named after the file. Materials are not loaded.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use glam::Vec3;
use crate::error::Error;
use crate::scene::{MeshData, ModelNode};
use super::{LoadEvent, ModelLoader};

const SOURCE: &str = "viewer::ObjLoader";

/// Bytes read per `poll`.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// An open file being read into memory.
#[derive(Debug)]
struct PendingRead {
    path: PathBuf,
    file: File,
    buffer: Vec<u8>,
    total: Option<u64>,
}

#[derive(Debug)]
enum ReadState {
    Idle,
    /// `begin` failed; reported by the next poll
    OpenFailed(Error),
    Reading(PendingRead),
    Finished,
}

#[derive(Debug)]
pub struct ObjLoader {
    chunk_size: usize,
    state: ReadState,
}

impl ObjLoader {
    pub fn new() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE)
    }

    /// Smaller chunks give finer progress; zero is treated as one byte.
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self { chunk_size: chunk_size.max(1), state: ReadState::Idle }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// `true` between `begin` and the terminal event.
    pub fn is_loading(&self) -> bool {
        matches!(self.state, ReadState::Reading(_) | ReadState::OpenFailed(_))
    }

    fn asset_error(path: &Path, reason: impl Into<String>) -> Error {
        Error::AssetLoadFailed {
            path: path.display().to_string(),
            reason: reason.into(),
        }
    }

    /// Parse a complete OBJ buffer into a model tree.
    pub fn parse(name: &str, bytes: &[u8]) -> Result<ModelNode, String> {
        let options = tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        };
        let mut reader = bytes;
        let (models, _materials) = tobj::load_obj_buf(&mut reader, &options, |_| {
            Ok((Vec::new(), HashMap::new()))
        })
        .map_err(|e| e.to_string())?;

        let mut root = ModelNode::new(name);
        for model in models {
            let mesh = model.mesh;
            let positions: Vec<Vec3> = mesh
                .positions
                .chunks_exact(3)
                .map(|p| Vec3::new(p[0], p[1], p[2]))
                .collect();
            let normals: Vec<Vec3> = mesh
                .normals
                .chunks_exact(3)
                .map(|n| Vec3::new(n[0], n[1], n[2]))
                .collect();
            if positions.is_empty() {
                continue;
            }
            let mut data = MeshData::new(model.name.clone(), positions, mesh.indices);
            data.normals = normals;
            root = root.with_child(ModelNode::new(model.name).with_mesh(data));
        }

        if root.vertex_count() == 0 {
            return Err("file contains no geometry".to_string());
        }
        Ok(root)
    }

    fn finish(read: PendingRead) -> LoadEvent {
        let name = read
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "model".to_string());

        match Self::parse(&name, &read.buffer) {
            Ok(node) => {
                crate::viewer_debug!(
                    SOURCE,
                    "Parsed '{}': {} objects, {} meshes, {} vertices",
                    read.path.display(),
                    node.children.len(),
                    node.mesh_count(),
                    node.vertex_count()
                );
                LoadEvent::Loaded { node }
            }
            Err(reason) => LoadEvent::Failed { error: Self::asset_error(&read.path, reason) },
        }
    }
}

impl Default for ObjLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelLoader for ObjLoader {
    fn begin(&mut self, path: &str) {
        let path = PathBuf::from(path);
        self.state = match File::open(&path) {
            Ok(file) => {
                let total = file.metadata().ok().map(|m| m.len());
                crate::viewer_trace!(SOURCE, "Reading '{}' ({:?} bytes)", path.display(), total);
                ReadState::Reading(PendingRead {
                    path,
                    file,
                    buffer: Vec::with_capacity(total.unwrap_or(0) as usize),
                    total,
                })
            }
            Err(e) => ReadState::OpenFailed(Self::asset_error(&path, e.to_string())),
        };
    }

    fn poll(&mut self) -> Option<LoadEvent> {
        match std::mem::replace(&mut self.state, ReadState::Finished) {
            ReadState::Idle => {
                self.state = ReadState::Idle;
                None
            }
            ReadState::Finished => None,
            ReadState::OpenFailed(error) => Some(LoadEvent::Failed { error }),
            ReadState::Reading(mut read) => {
                let limit = self.chunk_size as u64;
                match (&mut read.file).take(limit).read_to_end(&mut read.buffer) {
                    Ok(0) => Some(Self::finish(read)),
                    Ok(_) => {
                        let event = LoadEvent::Progress {
                            loaded: read.buffer.len() as u64,
                            total: read.total,
                        };
                        self.state = ReadState::Reading(read);
                        Some(event)
                    }
                    Err(e) => Some(LoadEvent::Failed {
                        error: Self::asset_error(&read.path, e.to_string()),
                    }),
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "obj_loader_tests.rs"]
mod tests;
