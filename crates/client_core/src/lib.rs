use std::path::Path;

use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use shared::{
    domain::{LessonId, ReactionId, SlideId, SlideType},
    error::ApiError,
    protocol::{ActionResponse, CreateNewLessonRequest, CreateNewSlideRequest, MessageResponse},
};
use tracing::{debug, info, warn};

pub mod actions;
pub mod config;
pub mod controller;
pub mod dialog;
pub mod error;
pub mod forms;
pub mod reorder;
pub mod ui;

pub use actions::Page;
pub use controller::ReorderController;
pub use dialog::SlideTypeDialog;
pub use error::{AdminClientError, AdminResult};
pub use forms::FormFields;
pub use reorder::{MoveDirection, OrderSnapshot, OrderableItem, OrderedList};
pub use ui::{Navigator, Notifier, Route};

use config::Settings;

/// Operations the admin backend exposes to the page.
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn save_order(&self, snapshot: &OrderSnapshot) -> AdminResult<MessageResponse>;
    async fn add_lesson(&self, after: LessonId) -> AdminResult<ActionResponse>;
    async fn add_slide(&self, request: &CreateNewSlideRequest) -> AdminResult<ActionResponse>;
    async fn save_slide(
        &self,
        slide_id: SlideId,
        fields: &Map<String, Value>,
    ) -> AdminResult<ActionResponse>;
    async fn upload_slide_picture(
        &self,
        slide_id: SlideId,
        picture: &Path,
    ) -> AdminResult<MessageResponse>;
    async fn delete_slide(&self, slide_id: SlideId) -> AdminResult<MessageResponse>;
    async fn delete_lesson(&self, lesson_id: LessonId) -> AdminResult<MessageResponse>;
    async fn save_lesson(
        &self,
        lesson_id: LessonId,
        fields: &Map<String, Value>,
    ) -> AdminResult<MessageResponse>;
    async fn save_reactions(&self, fields: &FormFields) -> AdminResult<MessageResponse>;
    async fn delete_reaction(&self, reaction_id: ReactionId) -> AdminResult<MessageResponse>;
    async fn save_texts(&self, fields: &FormFields) -> AdminResult<MessageResponse>;
}

/// HTTP implementation of [`AdminApi`].
#[derive(Debug, Clone)]
pub struct AdminClient {
    http: Client,
    server_url: String,
}

impl AdminClient {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self::with_http(Client::new(), server_url)
    }

    pub fn with_http(http: Client, server_url: impl Into<String>) -> Self {
        let server_url: String = server_url.into();
        Self {
            http,
            server_url: server_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &Settings) -> AdminResult<Self> {
        let http = Client::builder()
            .timeout(settings.request_timeout())
            .build()?;
        Ok(Self::with_http(http, settings.server_url.clone()))
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Absolute URL for a server path or a redirect target.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.server_url, path.trim_start_matches('/'))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> AdminResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let api_error: ApiError = serde_json::from_str(&body).unwrap_or_default();
            let detail = api_error
                .reason()
                .map(str::to_string)
                .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()));
            warn!(%status, detail = detail.as_deref().unwrap_or(""), "admin request rejected");
            return Err(AdminClientError::Status { status, detail });
        }
        Ok(response.json().await?)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> AdminResult<T>
    where
        B: serde::Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        debug!(path, "POST json");
        let response = self.http.post(self.url(path)).json(body).send().await?;
        Self::decode(response).await
    }

    async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: multipart::Form,
    ) -> AdminResult<T> {
        debug!(path, "POST multipart");
        let response = self
            .http
            .post(self.url(path))
            .multipart(form)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> AdminResult<T> {
        debug!(path, "DELETE");
        let response = self.http.delete(self.url(path)).send().await?;
        Self::decode(response).await
    }
}

#[async_trait]
impl AdminApi for AdminClient {
    async fn save_order(&self, snapshot: &OrderSnapshot) -> AdminResult<MessageResponse> {
        let response: MessageResponse = self.post_json(snapshot.endpoint(), snapshot).await?;
        info!(
            endpoint = snapshot.endpoint(),
            items = snapshot.len(),
            "order saved"
        );
        Ok(response)
    }

    async fn add_lesson(&self, after: LessonId) -> AdminResult<ActionResponse> {
        self.post_json("/add-lesson", &CreateNewLessonRequest { lesson_id: after })
            .await
    }

    async fn add_slide(&self, request: &CreateNewSlideRequest) -> AdminResult<ActionResponse> {
        self.post_json("/add-slide", request).await
    }

    async fn save_slide(
        &self,
        slide_id: SlideId,
        fields: &Map<String, Value>,
    ) -> AdminResult<ActionResponse> {
        self.post_json(&format!("/slides/{slide_id}"), fields).await
    }

    async fn upload_slide_picture(
        &self,
        slide_id: SlideId,
        picture: &Path,
    ) -> AdminResult<MessageResponse> {
        let bytes = tokio::fs::read(picture)
            .await
            .map_err(|source| AdminClientError::Io {
                path: picture.to_path_buf(),
                source,
            })?;
        let file_name = picture
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "picture".to_string());
        let mime = mime_guess::from_path(picture).first_or_octet_stream();
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime.essence_str())?;
        let form = multipart::Form::new().part("new_picture", part);
        self.post_multipart(&format!("/slides/{slide_id}/upload_picture"), form)
            .await
    }

    async fn delete_slide(&self, slide_id: SlideId) -> AdminResult<MessageResponse> {
        self.delete(&format!("/slides/{slide_id}")).await
    }

    async fn delete_lesson(&self, lesson_id: LessonId) -> AdminResult<MessageResponse> {
        self.delete(&format!("/lessons/{lesson_id}")).await
    }

    async fn save_lesson(
        &self,
        lesson_id: LessonId,
        fields: &Map<String, Value>,
    ) -> AdminResult<MessageResponse> {
        self.post_json(&format!("/edit-lesson/{lesson_id}"), fields)
            .await
    }

    async fn save_reactions(&self, fields: &FormFields) -> AdminResult<MessageResponse> {
        self.post_multipart("/reactions", fields.to_multipart()).await
    }

    async fn delete_reaction(&self, reaction_id: ReactionId) -> AdminResult<MessageResponse> {
        self.delete(&format!("/reactions/{reaction_id}")).await
    }

    async fn save_texts(&self, fields: &FormFields) -> AdminResult<MessageResponse> {
        self.post_multipart("/texts", fields.to_multipart()).await
    }
}

/// Request body for inserting a new slide; `after` is the slide it follows.
pub fn new_slide_request(
    lesson_id: LessonId,
    slide_type: SlideType,
    after: Option<SlideId>,
) -> CreateNewSlideRequest {
    CreateNewSlideRequest {
        lesson_id,
        slide_type,
        slide_id: after,
    }
}

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
