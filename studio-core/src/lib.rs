pub mod calculations;
pub mod db;
pub mod models;
pub mod notify;
pub mod pipeline;
pub mod validation;

pub use db::repository::{InquiryRepository, RepositoryError};
pub use models::*;
pub use notify::{NotificationError, NotificationMessage, Notifier};
pub use pipeline::{ContactPipeline, NotificationStatus, SubmissionFailure, SubmissionOutcome};
pub use validation::{FieldError, ValidationErrors};
