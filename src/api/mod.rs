//! REST API Client
//!
//! Typed access to every endpoint of the boop server that the client uses.
//!
//! ## Endpoints
//!
//! - `GET  /api/users`, `/api/users/me`, `/api/users/me/{stats,badges,paws,all-paws}`
//! - `GET  /api/users/me/{favorites,favorite-ids,mutuals,new-boops}`
//! - `POST /api/users/me/seen`, `PUT /api/users/me`
//! - `POST /api/boop`, `GET /api/boops/received`, `GET /api/stats/global`
//! - `POST|DELETE /api/favorites/{id}`
//! - `POST /login`, `POST /register`, `GET /logout`

mod client;
pub mod dto;
mod error;

pub use client::{BoopApi, BoopClient};
pub use dto::{BoopReceipt, ProfileUpdate};
pub use error::{ApiError, ApiResult};
