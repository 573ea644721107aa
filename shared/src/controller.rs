use crate::config::ApiConfig;
use crate::model::AnalysisResult;
use crate::session::{Notification, RequestState, Ticket, UploadSession};
use crate::upload::{ImageSource, UploadPolicy, UploadRequest, ValidationError};
use std::cell::{Ref, RefCell};
use std::future::Future;
use std::rc::Rc;
use thiserror::Error;

/// Why a request to the analysis service produced no usable payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("failed to build request: {0}")]
    Request(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("server error: {status} - {body}")]
    Status { status: u16, body: String },
    #[error("failed to parse response: {0}")]
    Decode(String),
}

/// Sends one validated image to `endpoint` as a single-field multipart form
/// and decodes the JSON reply.
pub trait AnalysisTransport {
    type File: ImageSource;

    fn analyze(
        &self,
        endpoint: &str,
        request: UploadRequest<Self::File>,
    ) -> impl Future<Output = Result<AnalysisResult, TransportError>>;
}

pub struct UploadController<T> {
    session: Rc<RefCell<UploadSession>>,
    transport: Rc<T>,
    config: ApiConfig,
    policy: UploadPolicy,
}

impl<T> UploadController<T>
where
    T: AnalysisTransport + 'static,
    T::File: 'static,
{
    pub fn new(transport: T, config: ApiConfig) -> Self {
        Self {
            session: Rc::new(RefCell::new(UploadSession::new())),
            transport: Rc::new(transport),
            config,
            policy: UploadPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: UploadPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn state(&self) -> Ref<'_, RequestState> {
        Ref::map(self.session.borrow(), UploadSession::state)
    }

    pub fn notification(&self) -> Option<Notification> {
        self.session.borrow().notification().cloned()
    }

    pub fn dismiss_notification(&self, ticket: Ticket) -> bool {
        self.session.borrow_mut().dismiss_notification(ticket)
    }

    pub fn reset(&self) {
        log::info!("Upload cleared");
        self.session.borrow_mut().reset();
    }

    /// Validates `file` and, if it is acceptable, moves the session to
    /// `Uploading` right away. The returned future performs the request and
    /// resolves to the live state once the response has been applied (or
    /// dropped because a newer submission superseded it).
    ///
    /// A rejected file is never transmitted and leaves the session as it was.
    pub fn submit(
        &self,
        file: T::File,
    ) -> Result<impl Future<Output = RequestState> + use<T>, ValidationError> {
        let request = UploadRequest::new(file, &self.policy).inspect_err(|e| {
            log::warn!("Rejected upload: {}", e);
        })?;

        let ticket = self.session.borrow_mut().begin();
        let endpoint = self.config.analyze_url();
        log::info!(
            "Uploading {} ({} bytes) to {}",
            request.file().file_name(),
            request.file().size(),
            endpoint
        );

        let session = Rc::clone(&self.session);
        let transport = Rc::clone(&self.transport);

        Ok(async move {
            let outcome = transport.analyze(&endpoint, request).await;

            let mut session = session.borrow_mut();
            session.resolve(ticket, outcome);
            session.state().clone()
        })
    }
}
