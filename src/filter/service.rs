use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Duration, Utc};
use parking_lot::{Mutex, RwLock};

use crate::config::FilterConfig;

use super::distance::{fuzzy_threshold, levenshtein};
use super::normalize::normalize;

/// Why a message was classified as spam. Behavioral reasons are checked
/// before lexical ones, so a flooded duplicate is reported as flood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpamReason {
    Flood,
    Duplicate,
    BannedWord,
}

impl SpamReason {
    fn label(&self) -> &'static str {
        match self {
            SpamReason::Flood => "flood",
            SpamReason::Duplicate => "duplicate",
            SpamReason::BannedWord => "banned_word",
        }
    }
}

/// Everything the filter remembers about one user.
#[derive(Debug, Default)]
struct UserRecord {
    last_message_at: Option<DateTime<Utc>>,
    last_message_normalized: Option<String>,
    spam_count: u32,
}

/// Process-wide counters, snapshotted for the /status command.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterStats {
    pub messages_checked: u64,
    pub messages_flagged: u64,
}

/// The spam classifier. One instance lives for the whole process and is
/// shared by all handler tasks.
///
/// A message is spam when any of three rules fires, in this order:
/// faster-than-interval messaging (flood), a repeat of the user's previous
/// message (duplicate, compared on normalized text), or a banned word
/// hiding in the message (exact substring or within a length-dependent
/// edit distance of a token).
pub struct SpamFilter {
    banned_words: RwLock<HashSet<String>>,
    users: Mutex<HashMap<i64, UserRecord>>,
    messages_checked: AtomicU64,
    messages_flagged: AtomicU64,
    min_interval: Duration,
}

impl SpamFilter {
    pub fn new(config: &FilterConfig) -> Self {
        let banned_words = config
            .seed_words
            .iter()
            .map(|word| normalize(word))
            .collect();

        Self {
            banned_words: RwLock::new(banned_words),
            users: Mutex::new(HashMap::new()),
            messages_checked: AtomicU64::new(0),
            messages_flagged: AtomicU64::new(0),
            min_interval: Duration::milliseconds(config.min_message_interval.as_millis() as i64),
        }
    }

    /// Classifies one message. `arrival` is when the process received it,
    /// not the Telegram-side send date.
    ///
    /// Every call counts towards `messages_checked`, flagged ones towards
    /// `messages_flagged` and the user's personal spam count.
    pub fn check(&self, user_id: i64, text: &str, arrival: DateTime<Utc>) -> bool {
        self.messages_checked.fetch_add(1, Ordering::Relaxed);

        if let Some(reason) = self.evaluate_behavior(user_id, text, arrival) {
            self.record_flagged(user_id, reason);
            return true;
        }

        if self.contains_banned_word(text) {
            self.record_flagged(user_id, SpamReason::BannedWord);
            return true;
        }

        false
    }

    /// Flood and duplicate rules. The whole read-then-update runs under one
    /// lock so that concurrent checks for the same user observe each other.
    fn evaluate_behavior(
        &self,
        user_id: i64,
        text: &str,
        arrival: DateTime<Utc>,
    ) -> Option<SpamReason> {
        let mut users = self.users.lock();
        let record = users.entry(user_id).or_default();

        let flooding = record
            .last_message_at
            .map_or(false, |last| arrival.signed_duration_since(last) < self.min_interval);
        record.last_message_at = Some(arrival);
        if flooding {
            // On flood the remembered message text stays what it was, so a
            // later resend of the flooded text is not seen as a duplicate.
            return Some(SpamReason::Flood);
        }

        let normalized = normalize(text);
        let duplicate = record.last_message_normalized.as_deref() == Some(normalized.as_str());
        record.last_message_normalized = Some(normalized);
        if duplicate {
            return Some(SpamReason::Duplicate);
        }

        None
    }

    fn contains_banned_word(&self, text: &str) -> bool {
        let banned = self.banned_words.read();
        text.split_whitespace().any(|token| {
            let token = normalize(token);
            banned.iter().any(|word| token_matches(&token, word))
        })
    }

    fn record_flagged(&self, user_id: i64, reason: SpamReason) {
        self.messages_flagged.fetch_add(1, Ordering::Relaxed);
        let spam_count = {
            let mut users = self.users.lock();
            let record = users.entry(user_id).or_default();
            record.spam_count += 1;
            record.spam_count
        };
        tracing::debug!(
            target: "filter",
            user_id,
            reason = reason.label(),
            spam_count,
            "сообщение распознано как спам"
        );
    }

    /// Adds a word to the banned set. The word is stored normalized, so
    /// "Casino", "CASINO!!!" and "casino" all land on the same entry.
    pub fn add_banned_word(&self, word: &str) {
        self.banned_words.write().insert(normalize(word));
    }

    /// Removes a word from the banned set, comparing normalized forms.
    /// Returns whether the word was present.
    pub fn remove_banned_word(&self, word: &str) -> bool {
        self.banned_words.write().remove(&normalize(word))
    }

    /// Snapshot of the banned set, sorted for stable display.
    pub fn list_banned_words(&self) -> Vec<String> {
        let mut words: Vec<String> = self.banned_words.read().iter().cloned().collect();
        words.sort();
        words
    }

    /// How many of this user's messages have been flagged so far.
    pub fn spam_count_for(&self, user_id: i64) -> u32 {
        self.users
            .lock()
            .get(&user_id)
            .map_or(0, |record| record.spam_count)
    }

    pub fn status_summary(&self) -> FilterStats {
        FilterStats {
            messages_checked: self.messages_checked.load(Ordering::Relaxed),
            messages_flagged: self.messages_flagged.load(Ordering::Relaxed),
        }
    }
}

fn token_matches(token: &str, banned: &str) -> bool {
    token.contains(banned) || levenshtein(token, banned) <= fuzzy_threshold(token.len())
}
