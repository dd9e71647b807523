//! Client side of the QR styling service: request payloads, the HTTP
//! transport, data-URL handling, and the submission state machine driven
//! from the frame loop.

pub mod client;
pub mod dataurl;
pub mod error;
pub mod payload;
pub mod submit;

pub use client::{HttpTransport, QrResponse, Transport, TransportError};
pub use dataurl::DOWNLOAD_FILENAME;
pub use error::DataUrlError;
pub use payload::{ColorScheme, GradientKind, ModuleShape, QrRequest};
pub use submit::{EMPTY_URL_MESSAGE, FormState, SubmitFlow, SubmitPhase};
