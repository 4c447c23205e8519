//! Boop REST API Client
//!
//! HTTP client for the boop server. Authentication is the server's
//! session cookie, kept in a cookie jar shared with the real-time socket.

use async_trait::async_trait;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use super::dto::{
    BoopReceipt, ErrorBody, LoginForm, ProfileUpdate, RegisterForm, SendBoopRequest,
    SuccessResponse,
};
use super::error::{ApiError, ApiResult};
use crate::model::{
    Badge, GlobalStats, NewBoop, PawInfo, PawStyle, ReceivedBoop, User, UserId, UserStats,
};

/// Every REST operation the client consumes.
///
/// `BoopClient` is the real implementation; the client state only sees
/// this trait so it can run against a stand-in.
#[async_trait]
pub trait BoopApi: Send + Sync {
    /// All users except the current one, most recently active first
    async fn users(&self) -> ApiResult<Vec<User>>;

    async fn current_user(&self) -> ApiResult<User>;

    async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<User>;

    async fn my_stats(&self) -> ApiResult<UserStats>;

    async fn my_badges(&self) -> ApiResult<Vec<Badge>>;

    async fn unlocked_paws(&self) -> ApiResult<Vec<PawStyle>>;

    async fn all_paws(&self) -> ApiResult<Vec<PawInfo>>;

    /// Boops received since the last login (or the last 24h)
    async fn new_boops(&self) -> ApiResult<Vec<NewBoop>>;

    /// Move the server's "last seen" marker to now
    async fn mark_boops_seen(&self) -> ApiResult<()>;

    async fn send_boop(
        &self,
        recipient_id: UserId,
        paw_style: Option<PawStyle>,
    ) -> ApiResult<BoopReceipt>;

    async fn received_boops(&self) -> ApiResult<Vec<ReceivedBoop>>;

    async fn global_stats(&self) -> ApiResult<GlobalStats>;

    async fn favorites(&self) -> ApiResult<Vec<User>>;

    async fn favorite_ids(&self) -> ApiResult<Vec<UserId>>;

    /// Returns false when the user was already a favorite
    async fn add_favorite(&self, user_id: UserId) -> ApiResult<bool>;

    async fn remove_favorite(&self, user_id: UserId) -> ApiResult<()>;

    /// Users with boops in both directions
    async fn mutuals(&self) -> ApiResult<Vec<User>>;
}

/// reqwest-backed boop server client
pub struct BoopClient {
    http: Client,
    base: Url,
    jar: Arc<Jar>,
}

impl BoopClient {
    /// Create a client for the server at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let jar = Arc::new(Jar::default());
        let http = Client::builder()
            .timeout(timeout)
            .cookie_provider(Arc::clone(&jar))
            .build()?;

        Ok(Self { http, base, jar })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `Cookie` header value carrying the current session, if any
    pub fn cookie_header(&self) -> Option<String> {
        self.jar
            .cookies(&self.base)
            .and_then(|value| value.to_str().ok().map(str::to_string))
    }

    /// Log in with username and password.
    ///
    /// The server answers a failed login by rendering the login page again,
    /// a successful one by redirecting away from it.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<User> {
        let form = LoginForm::new(username, password);
        let response = self
            .http
            .post(self.url("login")?)
            .form(&form)
            .send()
            .await?;

        if landed_on_login(&response) || !response.status().is_success() {
            tracing::warn!(username = %form.username, "Login rejected");
            return Err(ApiError::Unauthorized);
        }

        let user = self.current_user().await?;
        tracing::info!(user_id = user.id, username = %form.username, "Logged in");
        Ok(user)
    }

    /// Create an account and log in as it
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        display_name: &str,
    ) -> ApiResult<User> {
        let form = RegisterForm::new(username, password, display_name);
        form.validate()?;

        let response = self
            .http
            .post(self.url("register")?)
            .form(&form)
            .send()
            .await?;

        if landed_on_login(&response) || !response.status().is_success() {
            return Err(ApiError::Status {
                status: response.status().as_u16(),
                message: "registration rejected (username may be taken)".to_string(),
            });
        }

        self.current_user().await
    }

    pub async fn logout(&self) -> ApiResult<()> {
        let response = self.http.get(self.url("logout")?).send().await?;
        tracing::debug!(status = %response.status(), "Logged out");
        Ok(())
    }

    fn url(&self, path: &str) -> ApiResult<Url> {
        Ok(self.base.join(path)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let request = self.http.get(self.url(path)?);
        self.execute(path, request).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> ApiResult<T> {
        let response = request.send().await?;
        let status = response.status();
        let body = checked_body(response).await?;
        tracing::debug!(path = %path, status = %status, bytes = body.len(), "API response");
        Ok(serde_json::from_str(&body)?)
    }
}

/// True when the request was bounced to the login page
fn landed_on_login(response: &Response) -> bool {
    response.url().path().trim_end_matches('/').ends_with("/login")
}

/// Body of a successful response, or the matching error
async fn checked_body(response: Response) -> ApiResult<String> {
    if landed_on_login(&response) {
        return Err(ApiError::Unauthorized);
    }

    let status = response.status();
    let text = response.text().await?;
    if status.is_success() {
        return Ok(text);
    }

    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);

    Err(match status.as_u16() {
        401 => ApiError::Unauthorized,
        404 => ApiError::NotFound(message),
        code => ApiError::Status {
            status: code,
            message,
        },
    })
}

#[async_trait]
impl BoopApi for BoopClient {
    async fn users(&self) -> ApiResult<Vec<User>> {
        self.get_json("api/users").await
    }

    async fn current_user(&self) -> ApiResult<User> {
        self.get_json("api/users/me").await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<User> {
        update.validate()?;
        let path = "api/users/me";
        let request = self.http.put(self.url(path)?).json(update);
        self.execute(path, request).await
    }

    async fn my_stats(&self) -> ApiResult<UserStats> {
        self.get_json("api/users/me/stats").await
    }

    async fn my_badges(&self) -> ApiResult<Vec<Badge>> {
        self.get_json("api/users/me/badges").await
    }

    async fn unlocked_paws(&self) -> ApiResult<Vec<PawStyle>> {
        self.get_json("api/users/me/paws").await
    }

    async fn all_paws(&self) -> ApiResult<Vec<PawInfo>> {
        self.get_json("api/users/me/all-paws").await
    }

    async fn new_boops(&self) -> ApiResult<Vec<NewBoop>> {
        self.get_json("api/users/me/new-boops").await
    }

    async fn mark_boops_seen(&self) -> ApiResult<()> {
        let path = "api/users/me/seen";
        let request = self.http.post(self.url(path)?);
        let _: SuccessResponse = self.execute(path, request).await?;
        Ok(())
    }

    async fn send_boop(
        &self,
        recipient_id: UserId,
        paw_style: Option<PawStyle>,
    ) -> ApiResult<BoopReceipt> {
        let path = "api/boop";
        let body = SendBoopRequest {
            recipient_id,
            paw_style,
        };
        let request = self.http.post(self.url(path)?).json(&body);
        let receipt: BoopReceipt = self.execute(path, request).await?;

        tracing::info!(
            recipient_id,
            boop_id = ?receipt.boop_id,
            new_badges = receipt.new_badges.len(),
            "Boop sent"
        );
        Ok(receipt)
    }

    async fn received_boops(&self) -> ApiResult<Vec<ReceivedBoop>> {
        self.get_json("api/boops/received").await
    }

    async fn global_stats(&self) -> ApiResult<GlobalStats> {
        self.get_json("api/stats/global").await
    }

    async fn favorites(&self) -> ApiResult<Vec<User>> {
        self.get_json("api/users/me/favorites").await
    }

    async fn favorite_ids(&self) -> ApiResult<Vec<UserId>> {
        self.get_json("api/users/me/favorite-ids").await
    }

    async fn add_favorite(&self, user_id: UserId) -> ApiResult<bool> {
        let path = format!("api/favorites/{}", user_id);
        let request = self.http.post(self.url(&path)?);
        let response: SuccessResponse = self.execute(&path, request).await?;
        Ok(response.success)
    }

    async fn remove_favorite(&self, user_id: UserId) -> ApiResult<()> {
        let path = format!("api/favorites/{}", user_id);
        let request = self.http.delete(self.url(&path)?);
        let _: SuccessResponse = self.execute(&path, request).await?;
        Ok(())
    }

    async fn mutuals(&self) -> ApiResult<Vec<User>> {
        self.get_json("api/users/me/mutuals").await
    }
}
