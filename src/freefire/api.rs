//! Free Fire profile API client
//!
//! The upstream API returns loosely-typed JSON: numeric fields arrive as
//! numbers or strings depending on the account. Every field is decoded as
//! an optional `serde_json::Value` and substituted with a display
//! placeholder at render time (see `profile.rs`).

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::core::config::profile::{timeout, DEFAULT_SERVER};
use crate::core::error::{AppError, AppResult};

/// Player profile lookup seam.
///
/// The conversation engine reads only `nickname`; the `.cid` command
/// consumes the full profile. Tests substitute this trait with mocks.
#[async_trait]
pub trait ProfileApi: Send + Sync {
    /// Fetch the full profile record for a player UID.
    async fn fetch_player(&self, uid: &str) -> AppResult<PlayerProfile>;

    /// Fetch only the player's nickname.
    ///
    /// Returns `Ok(None)` when the API responds but the player is unknown
    /// (no `basicinfo` section or an `error` marker).
    async fn nickname(&self, uid: &str) -> AppResult<Option<String>>;
}

/// Full profile record as returned by the API.
///
/// Every section and field is optional; missing pieces render as `N/A`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerProfile {
    #[serde(default)]
    pub basicinfo: Option<BasicInfo>,
    #[serde(default)]
    pub petinfo: Option<PetInfo>,
    #[serde(default)]
    pub socialinfo: Option<SocialInfo>,
    #[serde(default)]
    pub creditscoreinfo: Option<CreditScoreInfo>,
    /// Present when the API reports a lookup failure.
    #[serde(default)]
    pub error: Option<Value>,
}

impl PlayerProfile {
    /// True when the record describes a real player.
    pub fn is_found(&self) -> bool {
        self.error.is_none() && self.basicinfo.is_some()
    }

    /// The player's nickname, when present.
    pub fn nickname(&self) -> Option<String> {
        self.basicinfo
            .as_ref()
            .and_then(|basic| basic.nickname.as_ref())
            .and_then(|v| v.as_str().map(str::to_string))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BasicInfo {
    #[serde(default)]
    pub nickname: Option<Value>,
    #[serde(default)]
    pub accountid: Option<Value>,
    #[serde(default)]
    pub region: Option<Value>,
    #[serde(default)]
    pub accounttype: Option<Value>,
    #[serde(default)]
    pub level: Option<Value>,
    #[serde(default)]
    pub exp: Option<Value>,
    #[serde(default)]
    pub liked: Option<Value>,
    #[serde(default)]
    pub createat: Option<Value>,
    #[serde(default)]
    pub lastloginat: Option<Value>,
    #[serde(default)]
    pub rank: Option<Value>,
    #[serde(default)]
    pub rankingpoints: Option<Value>,
    #[serde(default)]
    pub maxrank: Option<Value>,
    #[serde(default)]
    pub csrank: Option<Value>,
    #[serde(default)]
    pub csrankingpoints: Option<Value>,
    #[serde(default)]
    pub hipporank: Option<Value>,
    #[serde(default)]
    pub veteranexpiretime: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PetInfo {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub level: Option<Value>,
    #[serde(default)]
    pub exp: Option<Value>,
    #[serde(default)]
    pub skinid: Option<Value>,
    #[serde(default)]
    pub selectedskillid: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SocialInfo {
    #[serde(default)]
    pub signature: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreditScoreInfo {
    #[serde(default)]
    pub creditscore: Option<Value>,
}

/// HTTP client for the Free Fire profile API.
///
/// No retries; a single request with a 10 second timeout so a slow API
/// cannot stall a conversation turn indefinitely.
pub struct FreeFireClient {
    http: reqwest::Client,
    base_url: String,
}

impl FreeFireClient {
    /// Create a client against the given API base URL.
    pub fn new(base_url: impl Into<String>) -> AppResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout()).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    async fn fetch(&self, uid: &str) -> AppResult<PlayerProfile> {
        let url = format!(
            "{}/get_player_personal_show?server={}&uid={}",
            self.base_url, DEFAULT_SERVER, uid
        );
        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(AppError::HttpStatus(resp.status()));
        }
        Ok(resp.json().await?)
    }
}

#[async_trait]
impl ProfileApi for FreeFireClient {
    async fn fetch_player(&self, uid: &str) -> AppResult<PlayerProfile> {
        self.fetch(uid).await
    }

    async fn nickname(&self, uid: &str) -> AppResult<Option<String>> {
        let profile = self.fetch(uid).await?;
        if !profile.is_found() {
            return Ok(None);
        }
        // A found player with a non-string nickname still displays as N/A.
        Ok(Some(profile.nickname().unwrap_or_else(|| "N/A".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_partial_profiles() {
        let profile: PlayerProfile = serde_json::from_value(json!({
            "basicinfo": { "nickname": "PlayerOne", "level": 62 }
        }))
        .unwrap();

        assert!(profile.is_found());
        assert_eq!(profile.nickname().as_deref(), Some("PlayerOne"));
        assert!(profile.petinfo.is_none());
    }

    #[test]
    fn error_marker_means_not_found() {
        let profile: PlayerProfile = serde_json::from_value(json!({
            "error": "player not found"
        }))
        .unwrap();

        assert!(!profile.is_found());
        assert_eq!(profile.nickname(), None);
    }

    #[test]
    fn missing_basicinfo_means_not_found() {
        let profile: PlayerProfile = serde_json::from_value(json!({})).unwrap();
        assert!(!profile.is_found());
    }
}
