//! Test doubles for the API and UI seams.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{Map, Value};
use shared::{
    domain::{LessonId, ReactionId, SlideId},
    protocol::{ActionResponse, CreateNewSlideRequest, MessageResponse},
};
use tokio::sync::Notify;

use crate::{
    error::{AdminClientError, AdminResult},
    forms::FormFields,
    reorder::OrderSnapshot,
    ui::{Navigator, Notifier},
    AdminApi,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SaveOrder(OrderSnapshot),
    AddLesson(LessonId),
    AddSlide(CreateNewSlideRequest),
    SaveSlide(SlideId, Map<String, Value>),
    UploadPicture(SlideId, PathBuf),
    DeleteSlide(SlideId),
    DeleteLesson(LessonId),
    SaveLesson(LessonId, Map<String, Value>),
    SaveReactions(FormFields),
    DeleteReaction(ReactionId),
    SaveTexts(FormFields),
}

#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<Call>>,
    fail: bool,
    fail_upload: bool,
    message: Option<String>,
    action: ActionResponse,
    gate: Option<Arc<Notify>>,
}

impl FakeApi {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_action(mut self, action: ActionResponse) -> Self {
        self.action = action;
        self
    }

    pub fn with_failing_upload(mut self) -> Self {
        self.fail_upload = true;
        self
    }

    /// `save_order` waits for the gate before answering.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn slide_requests(&self) -> Vec<CreateNewSlideRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::AddSlide(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("calls lock").push(call);
    }

    fn server_error() -> AdminClientError {
        AdminClientError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: Some("Internal Server Error".into()),
        }
    }

    fn message(&self) -> AdminResult<MessageResponse> {
        if self.fail {
            return Err(Self::server_error());
        }
        Ok(MessageResponse {
            message: self.message.clone().unwrap_or_else(|| "ok".into()),
        })
    }

    fn action(&self) -> AdminResult<ActionResponse> {
        if self.fail {
            return Err(Self::server_error());
        }
        Ok(self.action.clone())
    }
}

#[async_trait]
impl AdminApi for FakeApi {
    async fn save_order(&self, snapshot: &OrderSnapshot) -> AdminResult<MessageResponse> {
        self.record(Call::SaveOrder(snapshot.clone()));
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.message()
    }

    async fn add_lesson(&self, after: LessonId) -> AdminResult<ActionResponse> {
        self.record(Call::AddLesson(after));
        self.action()
    }

    async fn add_slide(&self, request: &CreateNewSlideRequest) -> AdminResult<ActionResponse> {
        self.record(Call::AddSlide(request.clone()));
        self.action()
    }

    async fn save_slide(
        &self,
        slide_id: SlideId,
        fields: &Map<String, Value>,
    ) -> AdminResult<ActionResponse> {
        self.record(Call::SaveSlide(slide_id, fields.clone()));
        self.action()
    }

    async fn upload_slide_picture(
        &self,
        slide_id: SlideId,
        picture: &Path,
    ) -> AdminResult<MessageResponse> {
        self.record(Call::UploadPicture(slide_id, picture.to_path_buf()));
        if self.fail_upload {
            return Err(Self::server_error());
        }
        self.message()
    }

    async fn delete_slide(&self, slide_id: SlideId) -> AdminResult<MessageResponse> {
        self.record(Call::DeleteSlide(slide_id));
        self.message()
    }

    async fn delete_lesson(&self, lesson_id: LessonId) -> AdminResult<MessageResponse> {
        self.record(Call::DeleteLesson(lesson_id));
        self.message()
    }

    async fn save_lesson(
        &self,
        lesson_id: LessonId,
        fields: &Map<String, Value>,
    ) -> AdminResult<MessageResponse> {
        self.record(Call::SaveLesson(lesson_id, fields.clone()));
        self.message()
    }

    async fn save_reactions(&self, fields: &FormFields) -> AdminResult<MessageResponse> {
        self.record(Call::SaveReactions(fields.clone()));
        self.message()
    }

    async fn delete_reaction(&self, reaction_id: ReactionId) -> AdminResult<MessageResponse> {
        self.record(Call::DeleteReaction(reaction_id));
        self.message()
    }

    async fn save_texts(&self, fields: &FormFields) -> AdminResult<MessageResponse> {
        self.record(Call::SaveTexts(fields.clone()));
        self.message()
    }
}

pub struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
    questions: Mutex<Vec<String>>,
    accept: bool,
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self {
            alerts: Mutex::new(Vec::new()),
            questions: Mutex::new(Vec::new()),
            accept: true,
        }
    }
}

impl RecordingNotifier {
    pub fn declining() -> Self {
        Self {
            accept: false,
            ..Self::default()
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().expect("alerts lock").clone()
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().expect("questions lock").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts
            .lock()
            .expect("alerts lock")
            .push(message.to_string());
    }

    fn confirm(&self, question: &str) -> bool {
        self.questions
            .lock()
            .expect("questions lock")
            .push(question.to_string());
        self.accept
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    reloads: Mutex<usize>,
    redirects: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn reloads(&self) -> usize {
        *self.reloads.lock().expect("reloads lock")
    }

    pub fn redirects(&self) -> Vec<String> {
        self.redirects.lock().expect("redirects lock").clone()
    }
}

impl Navigator for RecordingNavigator {
    fn reload(&self) {
        *self.reloads.lock().expect("reloads lock") += 1;
    }

    fn redirect(&self, target: &str) {
        self.redirects
            .lock()
            .expect("redirects lock")
            .push(target.to_string());
    }
}
