//! In-process record of alerts that already produced a draft.

use std::collections::HashSet;
use std::sync::Mutex;

use aidrelay_core::ProcessedAlertKey;

/// Prevents duplicate campaign drafts for the same real-world event across
/// polling cycles.
///
/// Backed by an in-memory set for the process lifetime; a restart forgets
/// history and may re-draft alerts still inside their source-reported
/// window. Accepted: every draft requires admin approval before going live.
#[derive(Debug, Default)]
pub struct DedupLedger {
    processed: Mutex<HashSet<ProcessedAlertKey>>,
}

impl DedupLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has_processed(&self, key: &ProcessedAlertKey) -> bool {
        self.processed.lock().map_or(false, |set| set.contains(key))
    }

    pub fn mark_processed(&self, key: ProcessedAlertKey) {
        if let Ok(mut set) = self.processed.lock() {
            set.insert(key);
        }
    }

    /// Roll back a mark after a failed draft attempt so the next cycle
    /// retries the alert.
    pub fn unmark(&self, key: &ProcessedAlertKey) {
        if let Ok(mut set) = self.processed.lock() {
            set.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aidrelay_core::HazardType;
    use chrono::NaiveDate;

    fn key(location: &str) -> ProcessedAlertKey {
        ProcessedAlertKey {
            hazard_type: HazardType::Flood,
            location: location.to_string(),
            event_day: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        }
    }

    #[test]
    fn mark_then_query_round_trips() {
        let ledger = DedupLedger::new();
        assert!(!ledger.has_processed(&key("majuli")));
        ledger.mark_processed(key("majuli"));
        assert!(ledger.has_processed(&key("majuli")));
        assert!(!ledger.has_processed(&key("silchar")));
    }

    #[test]
    fn unmark_allows_reprocessing() {
        let ledger = DedupLedger::new();
        ledger.mark_processed(key("majuli"));
        ledger.unmark(&key("majuli"));
        assert!(!ledger.has_processed(&key("majuli")));
    }

    #[test]
    fn unmark_of_unknown_key_is_a_no_op() {
        let ledger = DedupLedger::new();
        ledger.unmark(&key("never-marked"));
        assert!(!ledger.has_processed(&key("never-marked")));
    }
}
