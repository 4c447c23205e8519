//! Request/Response DTOs
//!
//! Bodies exchanged with the boop server that are not domain models,
//! plus the client-side checks applied before a request is sent.

use serde::{Deserialize, Serialize};

use super::error::{ApiError, ApiResult};
use crate::model::{Badge, PawStyle, UserId};

/// Display name limit enforced on profile updates
pub const MAX_DISPLAY_NAME_LENGTH: usize = 200;

/// Tagline limit enforced on profile updates
pub const MAX_TAGLINE_LENGTH: usize = 300;

/// Display name limit enforced at registration
pub const MAX_REGISTER_DISPLAY_NAME_LENGTH: usize = 50;

pub const USERNAME_LENGTH: std::ops::RangeInclusive<usize> = 3..=20;

pub const MIN_PASSWORD_LENGTH: usize = 4;

/// PUT /api/users/me
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paw_style: Option<PawStyle>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.tagline.is_none()
            && self.color_theme.is_none()
            && self.paw_style.is_none()
    }

    pub fn validate(&self) -> ApiResult<()> {
        if let Some(name) = &self.display_name {
            let len = name.trim().chars().count();
            if len == 0 {
                return Err(ApiError::Validation(
                    "display name cannot be blank".to_string(),
                ));
            }
            if len > MAX_DISPLAY_NAME_LENGTH {
                return Err(ApiError::Validation(format!(
                    "display name must be {} characters or less",
                    MAX_DISPLAY_NAME_LENGTH
                )));
            }
        }

        if let Some(tagline) = &self.tagline {
            if tagline.chars().count() > MAX_TAGLINE_LENGTH {
                return Err(ApiError::Validation(format!(
                    "tagline must be {} characters or less",
                    MAX_TAGLINE_LENGTH
                )));
            }
        }

        if let Some(color) = &self.color_theme {
            let re = regex::Regex::new(r"^#[0-9A-Fa-f]{6}$")
                .map_err(|_| ApiError::Validation("Regex error".to_string()))?;
            if !re.is_match(color) {
                return Err(ApiError::Validation(format!(
                    "color theme must look like #RRGGBB, got {:?}",
                    color
                )));
            }
        }

        Ok(())
    }
}

/// POST /login form
#[derive(Debug, Clone, Serialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.trim().to_lowercase(),
            password: password.to_string(),
        }
    }
}

/// POST /register form
#[derive(Debug, Clone, Serialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub display_name: String,
}

impl RegisterForm {
    pub fn new(username: &str, password: &str, display_name: &str) -> Self {
        Self {
            username: username.trim().to_lowercase(),
            password: password.to_string(),
            display_name: display_name.trim().to_string(),
        }
    }

    pub fn validate(&self) -> ApiResult<()> {
        if self.username.is_empty() || self.password.is_empty() || self.display_name.is_empty() {
            return Err(ApiError::Validation("All fields are required".to_string()));
        }
        if !USERNAME_LENGTH.contains(&self.username.chars().count()) {
            return Err(ApiError::Validation(
                "Username must be 3-20 characters".to_string(),
            ));
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ApiError::Validation(
                "Password must be at least 4 characters".to_string(),
            ));
        }
        if self.display_name.chars().count() > MAX_REGISTER_DISPLAY_NAME_LENGTH {
            return Err(ApiError::Validation(
                "Display name must be 50 characters or less".to_string(),
            ));
        }
        Ok(())
    }
}

/// POST /api/boop
#[derive(Debug, Clone, Serialize)]
pub struct SendBoopRequest {
    pub recipient_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paw_style: Option<PawStyle>,
}

/// Response to POST /api/boop
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BoopReceipt {
    pub success: bool,
    #[serde(default)]
    pub boop_id: Option<i64>,
    #[serde(default)]
    pub new_badges: Vec<Badge>,
}

/// `{"success": bool}` acknowledgement
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// `{"error": "..."}` body returned on 4xx
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
