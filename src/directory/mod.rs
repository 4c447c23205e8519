//! User Directory
//!
//! - **FavoriteSet**: the favorited-id set, owned by the client state
//! - **UserSections**: favorites / boop buddies / everyone partition
//! - **Activity**: how recently a user was seen

mod activity;
mod favorites;
mod sections;

pub use activity::Activity;
pub use favorites::FavoriteSet;
pub use sections::{UserCard, UserSections, EVERYONE_IS_CLOSE, NO_BOOPERS_YET};
