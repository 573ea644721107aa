pub mod config;
pub mod controller;
pub mod model;
pub mod preview;
pub mod render;
pub mod session;
pub mod upload;

pub use config::{ApiConfig, ConfigSources};
pub use controller::{AnalysisTransport, TransportError, UploadController};
pub use model::{AnalysisResult, Landmark};
pub use preview::PreviewSlot;
pub use render::{render, Presentation, ResultTab};
pub use session::{Notification, NotificationKind, RequestState, Ticket, UploadSession};
pub use upload::{ImageSource, UploadPolicy, UploadRequest, ValidationError};
