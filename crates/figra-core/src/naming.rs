//! Label sanitization and per-pass collision handling.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

static UNSAFE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9A-Za-z_]+").expect("sanitize pattern should compile"));

/// Replace every maximal run of characters outside `[0-9A-Za-z_]` with `_`.
///
/// Case is preserved; callers lowercase first when they want lowercase tokens.
#[must_use]
pub fn sanitize(raw: &str) -> String {
    UNSAFE_RUN.replace_all(raw, "_").into_owned()
}

/// Hands out pass-unique names for sanitized tokens.
///
/// The first occurrence of a token is returned unchanged; the Nth occurrence
/// becomes `{N:02}_{token}`. Counters past 99 widen (`100_token`). A candidate
/// that was already handed out in this pass is skipped, so every returned name
/// is unique even when a raw label already looks like a numbered duplicate.
#[derive(Debug, Default, Clone)]
pub struct NameRegistry {
    counts: HashMap<String, u32>,
    issued: HashSet<String>,
}

impl NameRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve and return the next free name for `token`.
    pub fn register(&mut self, token: &str) -> String {
        let count = self.counts.entry(token.to_string()).or_insert(0);
        loop {
            *count += 1;
            let candidate = if *count == 1 {
                token.to_string()
            } else {
                format!("{:02}_{token}", *count)
            };
            if self.issued.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}
