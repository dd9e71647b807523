use thiserror::Error;

/// Failures while decoding a `data:` URL back into bytes.
#[derive(Debug, Error)]
pub enum DataUrlError {
    #[error("not a base64 data URL")]
    MissingPrefix,
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("could not write {path}: {source}")]
    Write {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}
