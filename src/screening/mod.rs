//! Content screening domain — public API.
//!
//! All profile field text passes through `should_block` before the
//! listener decides on remediation. External code should only use the
//! items exported here.

mod content_check;

pub use content_check::{should_block, split_terms, ContentRules, BUILTIN_WHITELIST};
