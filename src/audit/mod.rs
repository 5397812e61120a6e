//! AI-driven audit selection
//!
//! The core of the portal: a taxpayer's filing is validated, rendered into a
//! fixed analysis prompt, sent to the configured generative model, and the
//! model's JSON reply is validated into an [`AuditAssessment`].
//!
//! Flow: caller record -> `validator` -> `engine` (prompt + model call +
//! response validation) -> assessment or error. Validation failures never
//! reach the model; analysis failures collapse to one generic user-facing
//! message while the cause is logged.

pub mod engine;
pub mod error;
pub mod prompt;
pub mod types;
pub mod validator;

pub use engine::{run_audit_analysis, AuditEngine};
pub use error::{AnalysisError, ValidationError, ANALYSIS_FAILED_MESSAGE};
pub use types::{AuditAssessment, AuditRequest, PreviousAuditStatus};
pub use validator::validate_request;
