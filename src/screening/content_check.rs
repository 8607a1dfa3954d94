//! Pure content screening logic — functional core.
//!
//! This module has zero infrastructure dependencies. It takes a field
//! value and a rule set, and returns a verdict. Two signals collapse
//! into one boolean: a non-ASCII character that survives whitelist
//! stripping (look-alike characters, disguised spam), or a blacklisted
//! term present in the remaining text.

/// Characters that never trigger a block on their own, regardless of
/// user configuration. User whitelists can only widen this set.
pub const BUILTIN_WHITELIST: [&str; 10] = [
    "ß", "ä", "ü", "ö", "´", "€", "°", "“", "„", "–",
];

/// Blacklist terms and whitelisted characters for one screening pass.
///
/// Reconstructed per evaluation from host configuration; holds no
/// state beyond the two lists.
#[derive(Debug, Clone, Default)]
pub struct ContentRules {
    blacklist: Vec<String>,
    whitelist: Vec<String>,
}

impl ContentRules {
    pub fn new(blacklist: Vec<String>, whitelist: Vec<String>) -> Self {
        Self {
            blacklist,
            whitelist,
        }
    }

    /// Build rules from the comma-separated form used by host
    /// configuration constants. Empty segments from trailing commas are
    /// tolerated and ignored during screening.
    pub fn from_csv(blacklist: &str, whitelist: &str) -> Self {
        Self::new(split_terms(blacklist), split_terms(whitelist))
    }
}

/// Split a comma-separated configuration value into discrete terms.
///
/// Empty segments are kept (a trailing comma yields an empty term) —
/// they are no-ops downstream.
pub fn split_terms(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_string).collect()
}

/// Decide whether `text` contains disallowed content.
///
/// The check runs in four steps:
/// 1. Remove every occurrence of each whitelisted entry from the text,
///    user entries first (in configured order), then the built-in set.
///    For each entry, its uppercased form is removed as well. Only the
///    needle is uppercased, never the text — an asymmetry kept for
///    compatibility with existing host configurations (a lowercase
///    whitelist entry also covers its uppercase form, but not the
///    other way around).
/// 2. Strip every non-ASCII character from a working copy.
/// 3. Remove every blacklisted term from that copy.
/// 4. Blocked iff the copy no longer matches the whitelist-stripped
///    text from step 1.
///
/// Total over its inputs: empty text is never blocked, empty terms are
/// ignored, and no configuration can make this panic.
pub fn should_block(text: &str, rules: &ContentRules) -> bool {
    let mut working = text.to_string();

    // Whitelisted entries must not trigger the check. Later entries
    // operate on the already-partially-cleaned string.
    for entry in &rules.whitelist {
        strip_entry(&mut working, entry);
    }
    for entry in BUILTIN_WHITELIST {
        strip_entry(&mut working, entry);
    }

    // Anything outside ASCII that survived the whitelist is suspect.
    let mut clearstring: String = working.chars().filter(|c| c.is_ascii()).collect();

    // Remove blacklisted terms so that their presence shows up as a
    // difference against `working`.
    for term in &rules.blacklist {
        if term.is_empty() {
            continue;
        }
        clearstring = clearstring.replace(term.as_str(), "");
    }

    if clearstring != working {
        log::warn!("[SCREEN] Disallowed content in field value ({} chars)", text.len());
        return true;
    }

    false
}

/// Remove all occurrences of a whitelisted entry and of its uppercased
/// form. Matching is literal substring, not token-based.
fn strip_entry(working: &mut String, entry: &str) {
    if entry.is_empty() {
        return;
    }
    *working = working.replace(entry, "");
    let upper = entry.to_uppercase();
    *working = working.replace(upper.as_str(), "");
}
