pub mod audit_log;
pub mod comment;
pub mod download_log;
pub mod scoring_strategy;
pub mod session;
pub mod submission;
pub mod user;

pub use audit_log::{ReviewAction, ReviewAuditRecord};
pub use comment::Comment;
pub use download_log::DownloadRecord;
pub use scoring_strategy::{ScoringStrategy, StrategyChangeRecord};
pub use session::Session;
pub use submission::{Submission, SubmissionStatus};
pub use user::{Role, User};
