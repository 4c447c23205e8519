//! New-boop notifications
//!
//! Turns the "boops since last login" batch into one line per sender.

mod aggregator;

pub use aggregator::{aggregate_by_sender, SenderAggregate};

use crate::model::NewBoop;

/// What the new-boops banner shows
#[derive(Debug, Clone, PartialEq)]
pub struct NewBoopsSummary {
    /// Total boops in the batch
    pub total: usize,
    pub senders: Vec<SenderAggregate>,
}

impl NewBoopsSummary {
    /// Summarize a fetched batch. Returns `None` for an empty batch.
    pub fn from_batch(boops: Vec<NewBoop>) -> Option<Self> {
        if boops.is_empty() {
            return None;
        }

        let total = boops.len();
        let senders = aggregate_by_sender(boops.into_iter().map(Into::into));
        Some(Self { total, senders })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(sender_id: i64, created_at: &str) -> NewBoop {
        serde_json::from_value(serde_json::json!({
            "sender_id": sender_id,
            "sender_name": format!("s{}", sender_id),
            "created_at": created_at,
            "paw_style": "default",
        }))
        .unwrap()
    }

    #[test]
    fn test_empty_batch_has_no_summary() {
        assert!(NewBoopsSummary::from_batch(Vec::new()).is_none());
    }

    #[test]
    fn test_summary_counts_total_and_senders() {
        let summary = NewBoopsSummary::from_batch(vec![
            row(1, "2025-01-01 10:00:00"),
            row(2, "2025-01-01 09:00:00"),
            row(1, "2025-01-01 08:00:00"),
        ])
        .unwrap();

        assert_eq!(summary.total, 3);
        assert_eq!(summary.senders.len(), 2);
        assert_eq!(summary.senders[0].sender_id, 1);
        assert_eq!(summary.senders[0].count, 2);
    }
}
