//! Profile editor: nickname display and editing, and logout.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::GaonResult;
use crate::storage::{LOGGED_IN_KEY, STUDENT_ID_KEY, SharedStorage};

pub const DEFAULT_DISPLAY_NAME: &str = "Student";

/// Body of `GET /user/me` and `PUT /user/config`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
}

pub trait ProfileBackend {
    fn me(&self) -> impl Future<Output = GaonResult<UserConfig>> + Send;
    fn update_nickname(&self, nickname: &str) -> impl Future<Output = GaonResult<UserConfig>> + Send;
}

pub struct ProfileEditor<B> {
    storage: SharedStorage,
    backend: B,
    display_name: String,
    editing: bool,
}

impl<B: ProfileBackend> ProfileEditor<B> {
    /// Fetch the profile. The display name is the server nickname, else the
    /// stored student id, else "Student"; a failed fetch falls through the
    /// same chain.
    pub async fn load(storage: SharedStorage, backend: B) -> Self {
        let nickname = match backend.me().await {
            Ok(config) => config.nickname,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load profile");
                None
            }
        };

        let stored_id = storage.get(STUDENT_ID_KEY).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not read stored student id");
            None
        });

        let display_name = [nickname, stored_id]
            .into_iter()
            .flatten()
            .find(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string());

        ProfileEditor {
            storage,
            backend,
            display_name,
            editing: false,
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn begin_edit(&mut self) {
        self.editing = true;
    }

    /// Leave edit mode and save the nickname. On failure the displayed name
    /// is left as it was and the error is returned for the caller to report.
    pub async fn finish_edit(&mut self, nickname: &str) -> GaonResult<String> {
        self.editing = false;
        self.save(nickname).await
    }

    pub async fn save(&mut self, nickname: &str) -> GaonResult<String> {
        let saved = self.backend.update_nickname(nickname.trim()).await?;
        if let Some(name) = saved.nickname {
            self.display_name = name;
        }
        tracing::debug!(nickname = %self.display_name, "profile saved");
        Ok(self.display_name.clone())
    }

    /// Forget the login markers kept in storage.
    pub fn logout(&self) -> GaonResult<()> {
        self.storage.remove(LOGGED_IN_KEY)?;
        self.storage.remove(STUDENT_ID_KEY)?;
        Ok(())
    }
}
