//! Favorited user ids
//!
//! Owned by the client state and handed to whatever needs it; the set is
//! only ever touched from the event loop.

use std::collections::HashSet;

use crate::model::UserId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSet {
    ids: HashSet<UserId>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole set with what the server reports
    pub fn replace_all<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = UserId>,
    {
        self.ids = ids.into_iter().collect();
    }

    pub fn contains(&self, id: UserId) -> bool {
        self.ids.contains(&id)
    }

    pub fn insert(&mut self, id: UserId) -> bool {
        self.ids.insert(id)
    }

    pub fn remove(&mut self, id: UserId) -> bool {
        self.ids.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = UserId> + '_ {
        self.ids.iter().copied()
    }
}

impl FromIterator<UserId> for FavoriteSet {
    fn from_iter<T: IntoIterator<Item = UserId>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
