#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::must_use_candidate
)]

pub mod error;
pub mod models;
pub mod route;

use hyper::{
    body::{self, Buf},
    client::HttpConnector,
    header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Body, Client as HyperClient, Method, Request, StatusCode,
};
use hyper_rustls::HttpsConnector;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    result::Result as StdResult,
    time::Duration,
};

pub use error::Error;
pub use models::member::MemberInfo;
use route::Route;

type Result<T> = StdResult<T, Error>;

pub const API_BASE: &str = "https://discord.com/api/v10";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Bot-authenticated client for the Discord REST API.
///
/// Holds no state between calls besides its configuration. Idle connections
/// are never pooled, so every request opens and closes its own connection.
#[derive(Clone)]
pub struct Client {
    client: HyperClient<HttpsConnector<HttpConnector>>,
    bot_token: SecretString,
    api_base: String,
    timeout: Duration,
}

impl Client {
    pub fn new(bot_token: impl Into<SecretString>) -> Self {
        let connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .build();
        let client = HyperClient::builder()
            .pool_max_idle_per_host(0)
            .build(connector);
        Self {
            client,
            bot_token: bot_token.into(),
            api_base: API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        let api_base = api_base.into();
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn request(&self, route: Route<'_>, method: Method) -> Result<Value> {
        let url = format!("{}{}", self.api_base, route);
        let mut authorization =
            HeaderValue::from_str(&format!("Bot {}", self.bot_token.expose_secret()))?;
        authorization.set_sensitive(true);

        let req = Request::builder()
            .uri(url)
            .method(method)
            .header(AUTHORIZATION, authorization)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(Body::empty())?;

        tokio::time::timeout(self.timeout, self.exchange(req))
            .await
            .map_err(|_| Error::Timeout(self.timeout))?
    }

    async fn exchange(&self, req: Request<Body>) -> Result<Value> {
        let res = self.client.request(req).await?;

        let status = res.status();
        if status != StatusCode::OK {
            return Err(Error::APIError(status));
        }

        let mut buf = body::aggregate(res.into_body()).await?;
        let mut bytes = vec![0; buf.remaining()];
        buf.copy_to_slice(&mut bytes);

        let result = serde_json::from_slice(&bytes)?;
        Ok(result)
    }

    /// Fetches a guild member's roles and avatar hashes.
    pub async fn get_member_info(&self, guild_id: &str, user_id: &str) -> Result<MemberInfo> {
        tracing::debug!(guild_id, user_id, "Fetching guild member");
        let json = self
            .request(Route::GuildMember { guild_id, user_id }, Method::GET)
            .await?;
        Ok(MemberInfo::from_value(guild_id, user_id, &json))
    }

    /// Roles-only view of [`Client::get_member_info`].
    pub async fn get_user_roles(&self, guild_id: &str, user_id: &str) -> Result<Vec<String>> {
        let member = self.get_member_info(guild_id, user_id).await?;
        Ok(member.into_roles())
    }
}

impl Debug for Client {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Client")
            .field("bot_token", &self.bot_token)
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
