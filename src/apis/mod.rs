//! External API clients
//!
//! The only outbound dependency of the portal is the generative-model
//! provider used by the audit risk engine. Each client transforms the
//! unified request/response types in `llm::types` to its provider's wire
//! format and tracks per-client call statistics.

pub mod llm;
pub mod stats;
