use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{Receiver, TryRecvError, unbounded};

use crate::client::Transport;
use crate::dataurl;
use crate::payload::{ColorScheme, ModuleShape, QrRequest};

/// Shown when the URL field is empty; no request is issued.
pub const EMPTY_URL_MESSAGE: &str = "Please enter a URL";

/// Everything the form collects for one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub url: String,
    pub module_shape: ModuleShape,
    pub back_color: String,
    pub color: ColorScheme,
    pub logo_path: Option<PathBuf>,
}

/// Where one submission currently stands.
///
/// `Success` and `Failure` are sticky until [`SubmitFlow::acknowledge`]
/// returns the machine to `Idle`, so the panel can keep showing the result.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitPhase {
    Idle,
    EncodingLogo,
    Sending,
    Success { image: String },
    Failure { message: String },
}

enum WorkerEvent {
    Sending,
    Done(Result<String, String>),
}

/// Per-submission state machine:
/// `Idle -> Validating -> (EncodingLogo)? -> Sending -> Success | Failure -> Idle`.
///
/// Validation runs synchronously in [`SubmitFlow::begin`]; encoding and the
/// network round trip happen on a worker thread so the frame loop never
/// blocks. [`SubmitFlow::poll`] is called once per frame to advance the
/// phase. There is no cancellation: a second `begin` while a submission is
/// in flight is ignored.
pub struct SubmitFlow<T: Transport + 'static> {
    transport: Arc<T>,
    phase: SubmitPhase,
    rx: Option<Receiver<WorkerEvent>>,
}

impl<T: Transport + 'static> SubmitFlow<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
            phase: SubmitPhase::Idle,
            rx: None,
        }
    }

    pub fn phase(&self) -> &SubmitPhase {
        &self.phase
    }

    pub fn in_flight(&self) -> bool {
        self.rx.is_some()
    }

    /// Validates and kicks off one submission.
    ///
    /// An empty URL fails immediately with [`EMPTY_URL_MESSAGE`] and issues
    /// no request.
    pub fn begin(&mut self, form: FormState) {
        if self.rx.is_some() {
            log::debug!("submission already in flight, ignoring");
            return;
        }

        let url = form.url.trim().to_string();
        if url.is_empty() {
            self.phase = SubmitPhase::Failure {
                message: EMPTY_URL_MESSAGE.to_string(),
            };
            return;
        }

        self.phase = if form.logo_path.is_some() {
            SubmitPhase::EncodingLogo
        } else {
            SubmitPhase::Sending
        };

        let (tx, rx) = unbounded();
        self.rx = Some(rx);
        let transport = Arc::clone(&self.transport);

        thread::Builder::new()
            .name("glowdeck-qr-submit".into())
            .spawn(move || {
                let logo = match &form.logo_path {
                    Some(path) => match std::fs::read(path) {
                        Ok(bytes) => Some(dataurl::encode_image(&bytes)),
                        Err(e) => {
                            log::error!("could not read logo {}: {e}", path.display());
                            let _ = tx.send(WorkerEvent::Done(Err(format!(
                                "Could not read logo: {e}"
                            ))));
                            return;
                        }
                    },
                    None => None,
                };
                let _ = tx.send(WorkerEvent::Sending);

                let request = QrRequest {
                    url,
                    module_shape: form.module_shape,
                    back_color: form.back_color,
                    color: form.color,
                    logo,
                };
                let result = transport
                    .post_qrcode(&request)
                    .map(|r| r.image)
                    .map_err(|e| e.user_message());
                // Receiver may be gone if the app quit mid-flight.
                let _ = tx.send(WorkerEvent::Done(result));
            })
            .expect("failed to spawn qr submit thread");
    }

    /// Drains worker events, advancing the phase. Non-blocking.
    pub fn poll(&mut self) {
        let Some(rx) = self.rx.take() else { return };
        loop {
            match rx.try_recv() {
                Ok(WorkerEvent::Sending) => {
                    self.phase = SubmitPhase::Sending;
                }
                Ok(WorkerEvent::Done(Ok(image))) => {
                    self.phase = SubmitPhase::Success { image };
                    return;
                }
                Ok(WorkerEvent::Done(Err(message))) => {
                    self.phase = SubmitPhase::Failure { message };
                    return;
                }
                Err(TryRecvError::Empty) => {
                    // Still in flight; keep draining next frame.
                    self.rx = Some(rx);
                    return;
                }
                Err(TryRecvError::Disconnected) => {
                    self.phase = SubmitPhase::Failure {
                        message: crate::client::NETWORK_ERROR.to_string(),
                    };
                    return;
                }
            }
        }
    }

    /// Returns a terminal phase to `Idle`. No-op while in flight.
    pub fn acknowledge(&mut self) {
        if matches!(
            self.phase,
            SubmitPhase::Success { .. } | SubmitPhase::Failure { .. }
        ) && self.rx.is_none()
        {
            self.phase = SubmitPhase::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{QrResponse, TransportError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct FakeTransport {
        calls: AtomicUsize,
        reply: Box<dyn Fn() -> Result<QrResponse, TransportError> + Send + Sync>,
    }

    impl FakeTransport {
        fn replying(
            reply: impl Fn() -> Result<QrResponse, TransportError> + Send + Sync + 'static,
        ) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                reply: Box::new(reply),
            }
        }
    }

    impl Transport for FakeTransport {
        fn post_qrcode(&self, _request: &QrRequest) -> Result<QrResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.reply)()
        }
    }

    fn solid_form(url: &str) -> FormState {
        FormState {
            url: url.into(),
            module_shape: ModuleShape::Square,
            back_color: "#FFFFFF".into(),
            color: ColorScheme::Solid {
                fill_color: "#000000".into(),
            },
            logo_path: None,
        }
    }

    fn poll_until_terminal<T: Transport>(flow: &mut SubmitFlow<T>) -> SubmitPhase {
        for _ in 0..1000 {
            flow.poll();
            match flow.phase() {
                SubmitPhase::Success { .. } | SubmitPhase::Failure { .. } => {
                    return flow.phase().clone();
                }
                _ => thread::sleep(Duration::from_millis(2)),
            }
        }
        panic!("submission never finished");
    }

    #[test]
    fn empty_url_short_circuits_without_a_request() {
        let mut flow = SubmitFlow::new(FakeTransport::replying(|| {
            Ok(QrResponse {
                image: "data:image/png;base64,AAAA".into(),
            })
        }));
        flow.begin(solid_form("   "));

        assert_eq!(
            *flow.phase(),
            SubmitPhase::Failure {
                message: EMPTY_URL_MESSAGE.into()
            }
        );
        assert!(!flow.in_flight());
        assert_eq!(flow.transport.calls.load(Ordering::SeqCst), 0);

        flow.acknowledge();
        assert_eq!(*flow.phase(), SubmitPhase::Idle);
    }

    #[test]
    fn successful_submission_lands_in_success() {
        let mut flow = SubmitFlow::new(FakeTransport::replying(|| {
            Ok(QrResponse {
                image: "data:image/png;base64,AAAA".into(),
            })
        }));
        flow.begin(solid_form("https://example.com"));
        assert_eq!(*flow.phase(), SubmitPhase::Sending);

        let phase = poll_until_terminal(&mut flow);
        assert_eq!(
            phase,
            SubmitPhase::Success {
                image: "data:image/png;base64,AAAA".into()
            }
        );
        assert_eq!(flow.transport.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn server_error_message_reaches_failure_phase() {
        let mut flow = SubmitFlow::new(FakeTransport::replying(|| {
            Err(TransportError::Status {
                body: r#"{ "error": "bad request" }"#.into(),
            })
        }));
        flow.begin(solid_form("https://example.com"));

        let phase = poll_until_terminal(&mut flow);
        assert_eq!(
            phase,
            SubmitPhase::Failure {
                message: "bad request".into()
            }
        );
    }

    #[test]
    fn missing_logo_file_fails_without_a_request() {
        let mut flow = SubmitFlow::new(FakeTransport::replying(|| {
            Ok(QrResponse { image: String::new() })
        }));
        let mut form = solid_form("https://example.com");
        form.logo_path = Some("/nonexistent/glowdeck-logo.png".into());
        flow.begin(form);
        assert_eq!(*flow.phase(), SubmitPhase::EncodingLogo);

        let phase = poll_until_terminal(&mut flow);
        assert!(matches!(phase, SubmitPhase::Failure { .. }));
        assert_eq!(flow.transport.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn begin_while_in_flight_is_ignored() {
        let mut flow = SubmitFlow::new(FakeTransport::replying(|| {
            thread::sleep(Duration::from_millis(50));
            Ok(QrResponse {
                image: "data:image/png;base64,AAAA".into(),
            })
        }));
        flow.begin(solid_form("https://example.com"));
        flow.begin(solid_form("https://other.example"));

        poll_until_terminal(&mut flow);
        assert_eq!(flow.transport.calls.load(Ordering::SeqCst), 1);
    }
}
