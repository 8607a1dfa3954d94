//! Profile event handling — de-duplication, gating, and remediation.
//!
//! The host framework (event bus, permissions, user storage,
//! moderation) stays external behind the `ProfileHost` trait. This
//! module owns everything around the screening core: run each profile
//! object at most once per request, skip exempt sessions, and apply the
//! configured remediation when a field is flagged.

use std::collections::{HashMap, HashSet};

use crate::config::{RemediationMode, ScreenerConfig};
use crate::screening::{self, ContentRules};

/// A profile create/update event as delivered by the host dispatch
/// loop — one profile object with its new option values.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    /// Host action name. Only "create" and "update" are screened.
    pub action: String,
    pub object_id: u64,
    pub user_id: u64,
    /// Free-text profile option values keyed by option name.
    pub options: HashMap<String, String>,
}

/// Host-provided mutation and moderation operations.
///
/// Implemented by the integrating application; this crate never touches
/// user storage or the ban subsystem directly.
pub trait ProfileHost {
    /// Whether this user's session is exempt from screening.
    fn can_bypass(&self, user_id: u64) -> bool;

    /// Overwrite the given profile option values.
    fn update_user_options(
        &mut self,
        object_id: u64,
        options: &HashMap<String, String>,
    ) -> Result<(), String>;

    /// Permanently ban the user.
    fn ban_user(&mut self, user_id: u64, reason: &str) -> Result<(), String>;
}

/// What `ProfileScreener::handle` did with one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenOutcome {
    /// Event was not screened at all.
    Skipped(SkipReason),
    /// Screened, nothing disallowed found.
    Clean,
    /// Disallowed content found and the configured remediation applied.
    Remediated {
        /// Option names whose values were flagged (and emptied, unless
        /// the mode is ban-only), sorted for stable output.
        cleared_fields: Vec<String>,
        banned: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Action was neither create nor update.
    IrrelevantAction,
    /// Object already screened during this request.
    AlreadyChecked,
    /// Screening disabled by configuration.
    Disabled,
    /// Session holds the bypass permission.
    Bypass,
}

/// Per-request screening driver.
///
/// Holds the configuration, the derived screening rules, and the set of
/// object ids already processed. The host dispatch loop should create
/// one screener per request so the de-duplication set has request
/// lifetime.
pub struct ProfileScreener {
    config: ScreenerConfig,
    rules: ContentRules,
    checked: HashSet<u64>,
}

impl ProfileScreener {
    pub fn new(config: ScreenerConfig) -> Self {
        let rules = config.rules();
        Self {
            config,
            rules,
            checked: HashSet::new(),
        }
    }

    /// Screen one profile event and apply the configured remediation
    /// through the host.
    ///
    /// Errors are host failures (mutation or ban rejected); screening
    /// itself cannot fail. The object id is marked as checked before
    /// any gating, so a repeat event is skipped even if the first one
    /// was exempt.
    pub fn handle(
        &mut self,
        event: &ProfileUpdate,
        host: &mut dyn ProfileHost,
    ) -> Result<ScreenOutcome, String> {
        if event.action != "create" && event.action != "update" {
            return Ok(ScreenOutcome::Skipped(SkipReason::IrrelevantAction));
        }

        if !self.checked.insert(event.object_id) {
            return Ok(ScreenOutcome::Skipped(SkipReason::AlreadyChecked));
        }

        if !self.config.enabled {
            return Ok(ScreenOutcome::Skipped(SkipReason::Disabled));
        }

        if host.can_bypass(event.user_id) {
            log::debug!("[SCREEN] User {} has bypass permission", event.user_id);
            return Ok(ScreenOutcome::Skipped(SkipReason::Bypass));
        }

        // Flagged fields get their value replaced by the empty string.
        let mut cleared: HashMap<String, String> = HashMap::new();
        for (option, value) in &event.options {
            if screening::should_block(value, &self.rules) {
                cleared.insert(option.clone(), String::new());
            }
        }

        if cleared.is_empty() {
            log::debug!(
                "[SCREEN] Object {} clean ({} fields)",
                event.object_id,
                event.options.len()
            );
            return Ok(ScreenOutcome::Clean);
        }

        let mut cleared_fields: Vec<String> = cleared.keys().cloned().collect();
        cleared_fields.sort();

        log::warn!(
            "[SCREEN] Object {} (user {}): disallowed content in {}",
            event.object_id,
            event.user_id,
            cleared_fields.join(", ")
        );

        let banned = match self.config.mode {
            RemediationMode::Clean => {
                host.update_user_options(event.object_id, &cleared)?;
                false
            }
            RemediationMode::Ban => {
                host.ban_user(event.user_id, &encode_html(&self.config.ban_reason))?;
                true
            }
            RemediationMode::Both => {
                host.update_user_options(event.object_id, &cleared)?;
                host.ban_user(event.user_id, &encode_html(&self.config.ban_reason))?;
                true
            }
        };

        if banned {
            log::info!("[SCREEN] User {} banned", event.user_id);
        }

        Ok(ScreenOutcome::Remediated {
            cleared_fields,
            banned,
        })
    }
}

/// Minimal HTML entity encoding for the ban reason — it ends up in the
/// host's moderation UI.
fn encode_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}
