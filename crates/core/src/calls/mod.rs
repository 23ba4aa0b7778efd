//! Outbound call initiation and the in-memory call registry.

mod registry;
mod service;
mod types;

pub use registry::CallRegistry;
pub use service::{normalize_source_number, CallError, CallService};
pub use types::{CallAttempt, InitiatedCall};
