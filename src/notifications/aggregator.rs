//! Per-sender aggregation of incoming boops

use std::collections::HashMap;

use crate::model::{BoopEvent, PawStyle, Timestamp, UserId};

/// Everything one sender booped us with in a batch
#[derive(Debug, Clone, PartialEq)]
pub struct SenderAggregate {
    pub sender_id: UserId,
    pub sender_name: String,
    pub paw_style: Option<PawStyle>,
    /// Number of boops from this sender, always >= 1
    pub count: usize,
    /// Most recent `created_at` among this sender's boops
    pub latest: Timestamp,
}

impl SenderAggregate {
    fn first(event: BoopEvent) -> Self {
        Self {
            sender_id: event.sender_id,
            sender_name: event.sender_name,
            paw_style: event.paw_style,
            count: 1,
            latest: event.created_at,
        }
    }

    fn absorb(&mut self, event: &BoopEvent) {
        self.count += 1;
        if event.created_at > self.latest {
            self.latest = event.created_at;
        }
    }

    /// Multiplier shown after the sender name: empty for a single boop
    pub fn count_suffix(&self) -> String {
        if self.count > 1 {
            format!(" ×{}", self.count)
        } else {
            String::new()
        }
    }
}

/// Group a batch of boops by sender, most prolific sender first.
///
/// Senders with equal counts keep the order in which they first appear
/// in the batch. Name and paw come from each sender's first boop.
pub fn aggregate_by_sender<I>(events: I) -> Vec<SenderAggregate>
where
    I: IntoIterator<Item = BoopEvent>,
{
    let mut slots: HashMap<UserId, usize> = HashMap::new();
    let mut aggregates: Vec<SenderAggregate> = Vec::new();

    for event in events {
        match slots.get(&event.sender_id) {
            Some(&slot) => aggregates[slot].absorb(&event),
            None => {
                slots.insert(event.sender_id, aggregates.len());
                aggregates.push(SenderAggregate::first(event));
            }
        }
    }

    // sort_by is stable, so ties stay in first-appearance order
    aggregates.sort_by(|a, b| b.count.cmp(&a.count));
    aggregates
}
