use crate::controller::TransportError;
use crate::model::AnalysisResult;
use strum_macros::AsRefStr;

/// Shown for every transport or server failure. Error details go to the log,
/// never to the user.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "An error occurred while analyzing the image. Please try again.";

/// How long a transient notification stays on screen.
pub const NOTIFICATION_DURATION_MS: u32 = 6000;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState {
    #[default]
    Idle,
    Uploading,
    Succeeded(AnalysisResult),
    Failed(String),
}

impl RequestState {
    pub fn is_uploading(&self) -> bool {
        matches!(self, RequestState::Uploading)
    }
}

/// Generation number of one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub ticket: Ticket,
    pub kind: NotificationKind,
    pub title: &'static str,
    pub message: &'static str,
}

/// Request lifecycle for one browser session.
///
/// Every [`begin`](Self::begin) hands out a fresh ticket and invalidates all
/// earlier ones; [`resolve`](Self::resolve) only applies an outcome whose
/// ticket is still the latest, so a slow response can never overwrite the
/// state of a newer submission.
#[derive(Debug, Default)]
pub struct UploadSession {
    generation: u64,
    state: RequestState,
    notification: Option<Notification>,
}

impl UploadSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }

    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.state = RequestState::Uploading;
        self.notification = None;
        Ticket(self.generation)
    }

    /// Applies the outcome of `ticket`'s request. Returns `false` (and leaves
    /// the session untouched) when the ticket has been superseded.
    pub fn resolve(
        &mut self,
        ticket: Ticket,
        outcome: Result<AnalysisResult, TransportError>,
    ) -> bool {
        if !self.is_current(ticket) {
            log::debug!(
                "Dropping response for superseded request {:?} (latest is {})",
                ticket,
                self.generation
            );
            return false;
        }

        match outcome {
            Ok(result) => {
                // Soft errors are shown in the results panel, not as a toast.
                self.notification = match result.error_message() {
                    Some(message) => {
                        log::warn!("Analysis service reported: {}", message);
                        None
                    }
                    None => Some(Notification {
                        ticket,
                        kind: NotificationKind::Success,
                        title: "Analysis Complete",
                        message: "The image was analyzed successfully!",
                    }),
                };
                self.state = RequestState::Succeeded(result);
            }
            Err(e) => {
                log::error!("Image analysis failed: {}", e);
                self.state = RequestState::Failed(GENERIC_FAILURE_MESSAGE.to_string());
                self.notification = Some(Notification {
                    ticket,
                    kind: NotificationKind::Error,
                    title: "Analysis Error",
                    message: GENERIC_FAILURE_MESSAGE,
                });
            }
        }

        true
    }

    /// Back to `Idle`; any request still in flight is superseded.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = RequestState::Idle;
        self.notification = None;
    }

    /// Hides the notification raised by `ticket`. A timer belonging to an
    /// older notification does nothing.
    pub fn dismiss_notification(&mut self, ticket: Ticket) -> bool {
        match &self.notification {
            Some(notification) if notification.ticket == ticket => {
                self.notification = None;
                true
            }
            _ => false,
        }
    }
}
