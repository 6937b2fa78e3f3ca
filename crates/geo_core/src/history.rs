//! Bounded, newest-first record of completed generations.

use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{NavigationState, PrefilledState, ToolId};

/// The ledger keeps at most this many entries.
pub const HISTORY_CAP: usize = 20;
/// Descriptions longer than this many characters are cut.
pub const DESCRIPTION_LIMIT: usize = 60;
pub const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct HistoryId(u64);

impl HistoryId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for HistoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryItem {
    pub id: HistoryId,
    pub tool: ToolId,
    pub title: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    /// Panel inputs a replay restores, taken from the full description.
    #[serde(skip)]
    pub seed: PrefilledState,
}

impl HistoryItem {
    /// Builds an entry titled after its tool, truncating the description.
    pub fn new(id: HistoryId, tool: ToolId, description: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            tool,
            title: tool.title().to_string(),
            description: truncate_description(description),
            timestamp,
            seed: PrefilledState::from_description(tool, description),
        }
    }
}

/// Cuts `raw` to [`DESCRIPTION_LIMIT`] characters plus [`ELLIPSIS`].
pub fn truncate_description(raw: &str) -> String {
    match raw.char_indices().nth(DESCRIPTION_LIMIT) {
        Some((cut, _)) => format!("{}{}", &raw[..cut], ELLIPSIS),
        None => raw.to_string(),
    }
}

/// Sidebar-style age of an entry relative to `now`.
pub fn format_relative(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else if days == 1 {
        "Yesterday".to_string()
    } else if days < 7 {
        format!("{days}d ago")
    } else {
        timestamp.format("%Y-%m-%d").to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryLedger {
    items: VecDeque<HistoryItem>,
    next_id: u64,
}

impl Default for HistoryLedger {
    fn default() -> Self {
        Self {
            items: VecDeque::with_capacity(HISTORY_CAP + 1),
            next_id: 1,
        }
    }
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates and appends an entry with a fresh id.
    pub fn record(&mut self, tool: ToolId, description: &str, at: DateTime<Utc>) -> HistoryId {
        let id = HistoryId(self.next_id);
        self.append(HistoryItem::new(id, tool, description, at));
        id
    }

    /// Prepends `item`, evicting from the tail past [`HISTORY_CAP`].
    pub fn append(&mut self, item: HistoryItem) {
        self.next_id = self.next_id.max(item.id.0.saturating_add(1));
        self.items.push_front(item);
        self.items.truncate(HISTORY_CAP);
    }

    /// Returns false if no entry had that id.
    pub fn remove(&mut self, id: HistoryId) -> bool {
        match self.items.iter().position(|item| item.id == id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: HistoryId) -> Option<&HistoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Where replaying `id` should land, and the seed for that tool.
    pub fn replay(&self, id: HistoryId) -> Option<(NavigationState, PrefilledState)> {
        let item = self.get(id)?;
        Some((
            NavigationState::input(item.tool),
            item.seed.clone(),
        ))
    }

    pub fn head(&self) -> Option<&HistoryItem> {
        self.items.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn at(minute: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap() + Duration::minutes(minute)
    }

    #[test]
    fn truncation_boundary() {
        let sixty = "a".repeat(60);
        assert_eq!(truncate_description(&sixty), sixty);

        let sixty_one = "b".repeat(61);
        assert_eq!(
            truncate_description(&sixty_one),
            format!("{}...", "b".repeat(60))
        );
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let wide = "é".repeat(61);
        let cut = truncate_description(&wide);
        assert_eq!(cut.chars().count(), 63);
        assert!(cut.starts_with(&"é".repeat(60)));
        assert_eq!(truncate_description(&"é".repeat(60)), "é".repeat(60));
    }

    #[test]
    fn ledger_keeps_twenty_newest_in_order() {
        let mut ledger = HistoryLedger::new();
        for i in 0..25 {
            ledger.record(ToolId::PromptRecommender, &format!("entry {i}"), at(i));
        }
        assert_eq!(ledger.len(), HISTORY_CAP);
        let descriptions: Vec<_> = ledger.iter().map(|item| item.description.clone()).collect();
        let expected: Vec<_> = (5..25).rev().map(|i| format!("entry {i}")).collect();
        assert_eq!(descriptions, expected);
    }

    #[test]
    fn ids_stay_unique_after_eviction_and_removal() {
        let mut ledger = HistoryLedger::new();
        let first = ledger.record(ToolId::ContentRewriter, "a", at(0));
        assert!(ledger.remove(first));
        assert!(!ledger.remove(first));
        let second = ledger.record(ToolId::ContentRewriter, "b", at(1));
        assert_ne!(first, second);
    }

    #[test]
    fn append_advances_the_id_allocator() {
        let mut ledger = HistoryLedger::new();
        ledger.append(HistoryItem::new(
            HistoryId::new(41),
            ToolId::InsightsReport,
            "Courts - Retail",
            at(0),
        ));
        let next = ledger.record(ToolId::InsightsReport, "Gain - Retail", at(1));
        assert_eq!(next, HistoryId::new(42));
        assert_eq!(ledger.head().map(|item| item.id), Some(next));
    }

    #[test]
    fn replay_builds_seed_for_the_entry_tool() {
        let mut ledger = HistoryLedger::new();
        let long = "x".repeat(70);
        let id = ledger.record(ToolId::PromptRecommender, &long, at(0));

        let (navigation, seed) = ledger.replay(id).unwrap();
        assert_eq!(navigation, NavigationState::input(ToolId::PromptRecommender));
        assert_eq!(
            seed,
            PrefilledState::PromptRecommender {
                business_description: long
            }
        );
        assert!(ledger.replay(HistoryId::new(999)).is_none());
    }

    #[test]
    fn relative_labels() {
        let now = at(60 * 24 * 10);
        let ago = |minutes: i64| now - Duration::minutes(minutes);
        assert_eq!(format_relative(ago(0), now), "Just now");
        assert_eq!(format_relative(now + Duration::minutes(3), now), "Just now");
        assert_eq!(format_relative(ago(5), now), "5m ago");
        assert_eq!(format_relative(ago(125), now), "2h ago");
        assert_eq!(format_relative(ago(60 * 30), now), "Yesterday");
        assert_eq!(format_relative(ago(60 * 24 * 3), now), "3d ago");
        assert_eq!(format_relative(ago(60 * 24 * 9), now), "2024-03-02");
    }
}
