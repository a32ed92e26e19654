//! Identifier generation.
//!
//! Record ids are opaque string tokens, not typed UUIDs: legacy data and
//! imported backups may carry arbitrary id strings (the original format never
//! constrained them), so the rest of the codebase treats ids as `String` and
//! only this module decides what a *fresh* id looks like.

use uuid::Uuid;

/// Produce a fresh id token. Unique with overwhelming probability for the
/// lifetime of one data directory.
pub fn generate() -> String {
    Uuid::new_v4().to_string()
}
