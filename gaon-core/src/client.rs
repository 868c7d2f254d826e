//! HTTP client for the portal backend.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use crate::calendar::school::{SchoolEventResponse, SchoolEventSource};
use crate::chat::ChatBackend;
use crate::error::{GaonError, GaonResult};
use crate::profile::{ProfileBackend, UserConfig};

/// HTTP client for the portal backend
#[derive(Clone)]
pub struct PortalClient {
    http: reqwest::Client,
    base_url: String,
}

// Request/response types matching the portal API

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    response: String,
}

#[derive(Serialize)]
struct NicknameUpdate<'a> {
    nickname: &'a str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealResponse {
    pub date: String,
    #[serde(default)]
    pub school_name: Option<String>,
    #[serde(default)]
    pub items: Vec<Meal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    pub dish: String,
    #[serde(default)]
    pub calories: Option<String>,
    #[serde(default)]
    pub nutrients: Option<String>,
    /// breakfast, lunch or dinner
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableResponse {
    pub date: String,
    #[serde(default)]
    pub school_name: Option<String>,
    #[serde(default)]
    pub items: Vec<TimetableEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableEntry {
    pub period: String,
    pub subject: String,
    #[serde(default)]
    pub teacher: Option<String>,
    #[serde(default)]
    pub classroom: Option<String>,
}

impl PortalClient {
    pub fn new(base_url: &str) -> Self {
        PortalClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /school/event?month=YYYY-MM
    pub async fn school_events(&self, month: &str) -> GaonResult<SchoolEventResponse> {
        self.get_json("/school/event", &[("month", month)]).await
    }

    /// GET /school/meal?day=YYYY-MM-DD
    pub async fn school_meal(&self, day: &str) -> GaonResult<MealResponse> {
        self.get_json("/school/meal", &[("day", day)]).await
    }

    /// GET /school/timetable?day=YYYY-MM-DD
    pub async fn school_timetable(&self, day: &str) -> GaonResult<TimetableResponse> {
        self.get_json("/school/timetable", &[("day", day)]).await
    }

    /// GET /user/me
    pub async fn me(&self) -> GaonResult<UserConfig> {
        self.get_json("/user/me", &[]).await
    }

    /// PUT /user/config
    pub async fn update_config(&self, nickname: &str) -> GaonResult<UserConfig> {
        let path = "/user/config";
        let resp = self
            .http
            .put(self.url(path))
            .json(&NicknameUpdate { nickname })
            .send()
            .await?;

        Self::parse(resp, path).await
    }

    /// POST /api/chat
    pub async fn chat(&self, message: &str) -> GaonResult<String> {
        let path = "/api/chat";
        let resp = self
            .http
            .post(self.url(path))
            .json(&ChatRequest { message })
            .send()
            .await?;

        let body: ChatResponse = Self::parse(resp, path).await?;
        Ok(body.response)
    }

    /// GET /api/timetable in the background; the response is ignored.
    /// Must be called from within a tokio runtime.
    pub fn ping_timetable(&self) -> JoinHandle<()> {
        let request = self.http.get(self.url("/api/timetable"));

        tokio::spawn(async move {
            if let Err(e) = request.send().await {
                tracing::debug!(error = %e, "timetable ping failed");
            }
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> GaonResult<T> {
        tracing::debug!(path, ?query, "GET");
        let resp = self.http.get(self.url(path)).query(query).send().await?;
        Self::parse(resp, path).await
    }

    async fn parse<T: DeserializeOwned>(resp: reqwest::Response, path: &str) -> GaonResult<T> {
        if !resp.status().is_success() {
            return Err(GaonError::Api {
                status: resp.status().as_u16(),
                path: path.to_string(),
            });
        }

        Ok(resp.json().await?)
    }
}

impl SchoolEventSource for PortalClient {
    async fn fetch_month(&self, month: &str) -> GaonResult<SchoolEventResponse> {
        self.school_events(month).await
    }
}

impl ChatBackend for PortalClient {
    async fn reply(&self, message: &str) -> GaonResult<String> {
        self.chat(message).await
    }
}

impl ProfileBackend for PortalClient {
    async fn me(&self) -> GaonResult<UserConfig> {
        PortalClient::me(self).await
    }

    async fn update_nickname(&self, nickname: &str) -> GaonResult<UserConfig> {
        self.update_config(nickname).await
    }
}
