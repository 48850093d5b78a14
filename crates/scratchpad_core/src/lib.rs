//! Core domain logic for the scratchpad tool server.
//! This crate owns the document format, the mutation rules and the security
//! gate; transports only translate calls into `Gateway::handle`.

pub mod clock;
pub mod config;
pub mod document;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod security;
pub mod service;
pub mod store;

pub use clock::{Clock, FixedClock, Stamp, SystemClock};
pub use config::ScratchpadConfig;
pub use document::{EntryKind, Placement, Priority, SectionId, Statistics};
pub use error::{ErrorKind, ScratchpadError, ScratchpadResult};
pub use gateway::{supported_tools, Gateway, ToolOutput, ToolRequest, ToolResponse};
pub use logging::{default_log_level, init_logging, logging_status};
pub use security::RateLimiter;
pub use service::{
    CreatedDocument, DocumentLocation, FocusReceipt, ItemReceipt, LogReceipt, ScratchpadService,
};
pub use store::{DocumentStore, FsDocumentStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
