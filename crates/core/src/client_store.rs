//! Client-side persistence markers.
//!
//! The site shell remembers two things between visits: the cookie
//! consent choice and the time of the last form submission (a soft
//! cooldown against accidental double-sends). Storage is injected
//! through [`KvStore`], so the browser shell plugs in its local
//! storage and tests use [`MemoryStore`].

use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Storage seam
// ---------------------------------------------------------------------------

/// String key-value storage with local-storage semantics.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-memory [`KvStore`] for tests and non-persistent shells.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

// ---------------------------------------------------------------------------
// Cookie consent marker
// ---------------------------------------------------------------------------

/// Storage key for the cookie consent choice.
pub const CONSENT_KEY: &str = "edulead.cookie-consent";

/// The visitor's answer to the cookie banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentChoice {
    Accepted,
    Declined,
}

impl ConsentChoice {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Declined => "declined",
        }
    }

    pub fn from_str_stored(s: &str) -> Option<Self> {
        match s {
            "accepted" => Some(Self::Accepted),
            "declined" => Some(Self::Declined),
            _ => None,
        }
    }
}

/// The stored consent choice, if the visitor has answered the banner.
/// A corrupt marker reads as unanswered.
pub fn consent_choice<S: KvStore>(store: &S) -> Option<ConsentChoice> {
    store
        .get(CONSENT_KEY)
        .and_then(|v| ConsentChoice::from_str_stored(&v))
}

/// Whether the banner should be shown on page load.
pub fn needs_consent_prompt<S: KvStore>(store: &S) -> bool {
    consent_choice(store).is_none()
}

/// Persist the visitor's banner answer.
pub fn record_consent<S: KvStore>(store: &mut S, choice: ConsentChoice) {
    store.set(CONSENT_KEY, choice.as_str());
}

/// Forget the stored answer, so the banner shows again.
pub fn clear_consent<S: KvStore>(store: &mut S) {
    store.remove(CONSENT_KEY);
}

// ---------------------------------------------------------------------------
// Submission cooldown marker
// ---------------------------------------------------------------------------

/// Storage key for the last-submission timestamp (epoch seconds).
pub const LAST_SUBMIT_KEY: &str = "edulead.last-submission-at";

/// Minimum seconds between two submissions from the same browser.
pub const SUBMIT_COOLDOWN_SECS: u64 = 60;

/// Whether a submission may be sent at `now` (epoch seconds). A missing
/// or corrupt marker never blocks.
pub fn may_submit<S: KvStore>(store: &S, now: u64) -> bool {
    match store.get(LAST_SUBMIT_KEY).and_then(|v| v.parse::<u64>().ok()) {
        Some(last) => now.saturating_sub(last) >= SUBMIT_COOLDOWN_SECS,
        None => true,
    }
}

/// Record a successful submission at `now` (epoch seconds).
pub fn record_submission<S: KvStore>(store: &mut S, now: u64) {
    store.set(LAST_SUBMIT_KEY, &now.to_string());
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
