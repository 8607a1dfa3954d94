//! Integration tests for the profile event listener.
//!
//! Exercises gating, per-request de-duplication, and remediation
//! dispatch against a recording mock host.

use std::collections::HashMap;

use profile_sentry::{
    ProfileHost, ProfileScreener, ProfileUpdate, RemediationMode, ScreenOutcome, ScreenerConfig,
    SkipReason,
};

#[derive(Default)]
struct MockHost {
    bypass_users: Vec<u64>,
    cleared: Vec<(u64, HashMap<String, String>)>,
    bans: Vec<(u64, String)>,
    fail_bans: bool,
}

impl ProfileHost for MockHost {
    fn can_bypass(&self, user_id: u64) -> bool {
        self.bypass_users.contains(&user_id)
    }

    fn update_user_options(
        &mut self,
        object_id: u64,
        options: &HashMap<String, String>,
    ) -> Result<(), String> {
        self.cleared.push((object_id, options.clone()));
        Ok(())
    }

    fn ban_user(&mut self, user_id: u64, reason: &str) -> Result<(), String> {
        if self.fail_bans {
            return Err("moderation subsystem unavailable".to_string());
        }
        self.bans.push((user_id, reason.to_string()));
        Ok(())
    }
}

fn config(mode: RemediationMode) -> ScreenerConfig {
    ScreenerConfig {
        enabled: true,
        blacklist: vec!["spam".to_string()],
        whitelist: Vec::new(),
        mode,
        ban_reason: "Spam <in> profile".to_string(),
    }
}

fn event(action: &str, object_id: u64, user_id: u64, fields: &[(&str, &str)]) -> ProfileUpdate {
    ProfileUpdate {
        action: action.to_string(),
        object_id,
        user_id,
        options: fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

// ── Remediation modes ───────────────────────────────────────────────

#[test]
fn clean_mode_clears_only_offending_fields() {
    let mut screener = ProfileScreener::new(config(RemediationMode::Clean));
    let mut host = MockHost::default();

    let ev = event(
        "update",
        10,
        7,
        &[
            ("aboutMe", "buy spam now"),
            ("homepage", "https://example.com"),
        ],
    );
    let outcome = screener.handle(&ev, &mut host).unwrap();

    assert_eq!(
        outcome,
        ScreenOutcome::Remediated {
            cleared_fields: vec!["aboutMe".to_string()],
            banned: false,
        }
    );
    assert!(host.bans.is_empty(), "clean mode must never ban");
    assert_eq!(host.cleared.len(), 1);
    let (object_id, options) = &host.cleared[0];
    assert_eq!(*object_id, 10);
    assert_eq!(options.get("aboutMe").map(String::as_str), Some(""));
    assert!(
        !options.contains_key("homepage"),
        "clean fields must not be overwritten"
    );
}

#[test]
fn ban_mode_bans_without_touching_fields() {
    let mut screener = ProfileScreener::new(config(RemediationMode::Ban));
    let mut host = MockHost::default();

    let ev = event("create", 11, 8, &[("signature", "spam spam spam")]);
    let outcome = screener.handle(&ev, &mut host).unwrap();

    assert!(matches!(
        outcome,
        ScreenOutcome::Remediated { banned: true, .. }
    ));
    assert!(host.cleared.is_empty(), "ban mode leaves field content alone");
    assert_eq!(host.bans.len(), 1);
    assert_eq!(host.bans[0].0, 8);
}

#[test]
fn both_mode_cleans_and_bans() {
    let mut screener = ProfileScreener::new(config(RemediationMode::Both));
    let mut host = MockHost::default();

    let ev = event("update", 12, 9, &[("aboutMe", "spam here")]);
    let outcome = screener.handle(&ev, &mut host).unwrap();

    assert_eq!(
        outcome,
        ScreenOutcome::Remediated {
            cleared_fields: vec!["aboutMe".to_string()],
            banned: true,
        }
    );
    assert_eq!(host.cleared.len(), 1);
    assert_eq!(host.bans.len(), 1);
}

#[test]
fn ban_reason_is_html_encoded() {
    let mut screener = ProfileScreener::new(config(RemediationMode::Ban));
    let mut host = MockHost::default();

    screener
        .handle(&event("update", 13, 5, &[("aboutMe", "spam")]), &mut host)
        .unwrap();

    assert_eq!(host.bans[0].1, "Spam &lt;in&gt; profile");
}

// ── Gating ──────────────────────────────────────────────────────────

#[test]
fn duplicate_object_is_checked_once() {
    let mut screener = ProfileScreener::new(config(RemediationMode::Both));
    let mut host = MockHost::default();

    let ev = event("update", 20, 7, &[("aboutMe", "spam")]);
    screener.handle(&ev, &mut host).unwrap();
    let second = screener.handle(&ev, &mut host).unwrap();

    assert_eq!(second, ScreenOutcome::Skipped(SkipReason::AlreadyChecked));
    assert_eq!(host.cleared.len(), 1, "no second mutation for the same object");
    assert_eq!(host.bans.len(), 1, "no second ban for the same object");
}

#[test]
fn distinct_objects_are_each_screened() {
    let mut screener = ProfileScreener::new(config(RemediationMode::Clean));
    let mut host = MockHost::default();

    screener
        .handle(&event("update", 21, 7, &[("aboutMe", "spam")]), &mut host)
        .unwrap();
    screener
        .handle(&event("update", 22, 7, &[("aboutMe", "spam")]), &mut host)
        .unwrap();

    assert_eq!(host.cleared.len(), 2);
}

#[test]
fn irrelevant_action_is_ignored() {
    let mut screener = ProfileScreener::new(config(RemediationMode::Both));
    let mut host = MockHost::default();

    let outcome = screener
        .handle(&event("delete", 30, 7, &[("aboutMe", "spam")]), &mut host)
        .unwrap();

    assert_eq!(outcome, ScreenOutcome::Skipped(SkipReason::IrrelevantAction));
    assert!(host.cleared.is_empty());
    assert!(host.bans.is_empty());
}

#[test]
fn disabled_config_never_calls_host() {
    let mut cfg = config(RemediationMode::Both);
    cfg.enabled = false;
    let mut screener = ProfileScreener::new(cfg);
    let mut host = MockHost::default();

    let outcome = screener
        .handle(&event("update", 31, 7, &[("aboutMe", "spam")]), &mut host)
        .unwrap();

    assert_eq!(outcome, ScreenOutcome::Skipped(SkipReason::Disabled));
    assert!(host.cleared.is_empty());
    assert!(host.bans.is_empty());
}

#[test]
fn bypass_permission_skips_screening() {
    let mut screener = ProfileScreener::new(config(RemediationMode::Both));
    let mut host = MockHost {
        bypass_users: vec![7],
        ..MockHost::default()
    };

    let outcome = screener
        .handle(&event("update", 32, 7, &[("aboutMe", "spam")]), &mut host)
        .unwrap();

    assert_eq!(outcome, ScreenOutcome::Skipped(SkipReason::Bypass));
    assert!(host.cleared.is_empty());
    assert!(host.bans.is_empty());
}

// ── Outcomes and failures ───────────────────────────────────────────

#[test]
fn clean_profile_reports_clean_without_host_calls() {
    let mut screener = ProfileScreener::new(config(RemediationMode::Both));
    let mut host = MockHost::default();

    let ev = event(
        "create",
        40,
        7,
        &[("aboutMe", "I like hiking"), ("location", "Berlin")],
    );
    let outcome = screener.handle(&ev, &mut host).unwrap();

    assert_eq!(outcome, ScreenOutcome::Clean);
    assert!(host.cleared.is_empty());
    assert!(host.bans.is_empty());
}

#[test]
fn non_ascii_field_triggers_remediation_without_blacklist_match() {
    let mut screener = ProfileScreener::new(config(RemediationMode::Clean));
    let mut host = MockHost::default();

    let ev = event("update", 41, 7, &[("aboutMe", "Привет")]);
    let outcome = screener.handle(&ev, &mut host).unwrap();

    assert!(matches!(outcome, ScreenOutcome::Remediated { .. }));
    assert_eq!(host.cleared.len(), 1);
}

#[test]
fn host_ban_failure_propagates() {
    let mut screener = ProfileScreener::new(config(RemediationMode::Ban));
    let mut host = MockHost {
        fail_bans: true,
        ..MockHost::default()
    };

    let result = screener.handle(&event("update", 42, 7, &[("aboutMe", "spam")]), &mut host);
    assert!(result.is_err());
}
