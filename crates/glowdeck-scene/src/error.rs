use std::path::PathBuf;

/// Errors surfaced by asset loading.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse glTF {path}: {source}")]
    Gltf {
        path: PathBuf,
        #[source]
        source: gltf::Error,
    },

    #[error("unsupported glTF content: {0}")]
    Unsupported(String),

    #[error("loader thread disconnected before sending a result")]
    WorkerGone,
}
