//! User list sections
//!
//! Splits the directory into favorites, boop buddies (mutuals) and
//! everyone else. A user shows up in "everyone" only when they are in
//! neither of the other two sections.

use std::collections::HashSet;

use super::favorites::FavoriteSet;
use crate::model::{User, UserId};

pub const NO_BOOPERS_YET: &str = "No other boopers yet. Invite some friends!";
pub const EVERYONE_IS_CLOSE: &str = "Everyone is either a favorite or boop buddy!";

/// A user plus whether the star is lit
#[derive(Debug, Clone, PartialEq)]
pub struct UserCard {
    pub user: User,
    pub favorited: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserSections {
    pub favorites: Vec<UserCard>,
    pub mutuals: Vec<UserCard>,
    pub everyone: Vec<UserCard>,
}

impl UserSections {
    pub fn build(
        all: Vec<User>,
        favorites: Vec<User>,
        mutuals: Vec<User>,
        favorite_ids: &FavoriteSet,
    ) -> Self {
        let favorite_users: HashSet<UserId> = favorites.iter().map(|u| u.id).collect();
        let mutual_users: HashSet<UserId> = mutuals.iter().map(|u| u.id).collect();

        let favorites = favorites
            .into_iter()
            .map(|user| UserCard {
                user,
                favorited: true,
            })
            .collect();

        let mutuals = mutuals
            .into_iter()
            .map(|user| UserCard {
                favorited: favorite_ids.contains(user.id),
                user,
            })
            .collect();

        let everyone = all
            .into_iter()
            .filter(|u| !favorite_users.contains(&u.id) && !mutual_users.contains(&u.id))
            .map(|user| UserCard {
                favorited: favorite_ids.contains(user.id),
                user,
            })
            .collect();

        Self {
            favorites,
            mutuals,
            everyone,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty() && self.mutuals.is_empty() && self.everyone.is_empty()
    }

    /// Message shown in place of an empty "everyone" list
    pub fn everyone_placeholder(&self) -> Option<&'static str> {
        if self.is_empty() {
            Some(NO_BOOPERS_YET)
        } else if self.everyone.is_empty() {
            Some(EVERYONE_IS_CLOSE)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PawStyle;

    fn user(id: UserId) -> User {
        User {
            id,
            username: Some(format!("u{}", id)),
            display_name: format!("User {}", id),
            tagline: None,
            color_theme: None,
            paw_style: PawStyle::Default,
            last_active: None,
        }
    }

    #[test]
    fn test_everyone_excludes_favorites_and_mutuals() {
        let all = (1..=5).map(user).collect();
        let favorites = vec![user(1)];
        let mutuals = vec![user(2), user(3)];
        let ids: FavoriteSet = [1].into_iter().collect();

        let sections = UserSections::build(all, favorites, mutuals, &ids);

        let everyone: Vec<UserId> = sections.everyone.iter().map(|c| c.user.id).collect();
        assert_eq!(everyone, vec![4, 5]);
        assert!(sections.favorites.iter().all(|c| c.favorited));
        assert_eq!(sections.everyone_placeholder(), None);
    }

    #[test]
    fn test_stars_follow_favorite_ids() {
        // Mutual 2 is also a favorite, but the favorites list is stale
        let ids: FavoriteSet = [2, 4].into_iter().collect();
        let sections = UserSections::build(
            vec![user(2), user(3), user(4)],
            Vec::new(),
            vec![user(2), user(3)],
            &ids,
        );

        assert!(sections.mutuals[0].favorited);
        assert!(!sections.mutuals[1].favorited);
        assert_eq!(sections.everyone.len(), 1);
        assert!(sections.everyone[0].favorited);
    }

    #[test]
    fn test_placeholders() {
        let empty = UserSections::build(Vec::new(), Vec::new(), Vec::new(), &FavoriteSet::new());
        assert_eq!(empty.everyone_placeholder(), Some(NO_BOOPERS_YET));

        let ids: FavoriteSet = [1].into_iter().collect();
        let close = UserSections::build(vec![user(1)], vec![user(1)], Vec::new(), &ids);
        assert_eq!(close.everyone_placeholder(), Some(EVERYONE_IS_CLOSE));
    }
}
