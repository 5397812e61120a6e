//! Portal-level static content
//!
//! The dashboard's sample series and headline metrics. Inert configuration,
//! not logic: every value is hard-coded demonstration data.

pub mod data;
