//! Profile-Sentry — anti-spam screening for user profile fields.
//!
//! A host CMS calls into this crate from its profile create/update
//! dispatch. The pieces:
//! - Content screening core (screening/) — decides whether a field value
//!   contains disallowed characters or terms
//! - Configuration (config) — blacklist, whitelist, remediation mode
//! - Event listener (listener/) — per-request de-duplication plus
//!   remediation dispatch against host-provided mutation/ban operations

pub mod config;
pub mod listener;
pub mod screening;

pub use config::{ConfigError, RemediationMode, ScreenerConfig};
pub use listener::{ProfileHost, ProfileScreener, ProfileUpdate, ScreenOutcome, SkipReason};
pub use screening::{should_block, ContentRules};
