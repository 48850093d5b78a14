//! Security gate applied before any document mutation.
//!
//! # Responsibility
//! - Bound request rate per gateway instance.
//! - Reject or neutralize untrusted text before it reaches the document.
//! - Confine document locations to allow-listed workspace directories.
//!
//! # Invariants
//! - The blocked-pattern denylist is shared by text and path validation.
//! - Validation failures carry caller-safe messages only.

pub mod path;
pub mod rate_limit;
pub mod sanitize;

pub use path::{validate_filename, validate_path, PathPolicy};
pub use rate_limit::{Admission, RateLimiter};
pub use sanitize::{find_blocked_pattern, sanitize_text, validate_enum};
