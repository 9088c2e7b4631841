//! Page-level actions behind the admin buttons and forms.
//!
//! Every action reports its outcome through the [`Notifier`]; failures are
//! never retried and never end the session.

use std::path::Path;

use shared::{
    domain::{LessonId, ReactionId, SlideId},
    protocol::{ActionResponse, MessageResponse},
};
use tracing::{info, warn};

use crate::{
    error::AdminResult,
    forms::{lesson_json, slide_json, FormFields},
    ui::{Navigator, Notifier, Route},
    AdminApi,
};

pub struct Page<'a> {
    pub(crate) api: &'a dyn AdminApi,
    pub(crate) notifier: &'a dyn Notifier,
    pub(crate) navigator: &'a dyn Navigator,
}

impl<'a> Page<'a> {
    pub fn new(
        api: &'a dyn AdminApi,
        notifier: &'a dyn Notifier,
        navigator: &'a dyn Navigator,
    ) -> Self {
        Self {
            api,
            notifier,
            navigator,
        }
    }

    pub fn open(&self, route: Route) {
        self.navigator.redirect(&route.path());
    }

    /// Follows the server's redirect, if any.
    pub(crate) fn follow(&self, response: &ActionResponse, what: &str) {
        match response.redirect_url.as_deref() {
            Some(target) => self.navigator.redirect(target),
            None => warn!(what, "server returned no redirect"),
        }
    }

    /// Returns `Ok(None)` when the user cancels.
    pub async fn delete_slide(&self, slide_id: SlideId) -> AdminResult<Option<MessageResponse>> {
        if !self
            .notifier
            .confirm(&format!("Are you sure you want to delete slide ID {slide_id}?"))
        {
            info!(%slide_id, "slide deletion cancelled");
            return Ok(None);
        }
        match self.api.delete_slide(slide_id).await {
            Ok(response) => {
                self.notifier
                    .alert(&format!("Slide {slide_id} was deleted."));
                self.navigator.reload();
                Ok(Some(response))
            }
            Err(err) => {
                warn!(%slide_id, error = %err, "slide deletion failed");
                self.notifier.alert("Error deleting the slide.");
                Err(err)
            }
        }
    }

    /// Returns `Ok(None)` when the user cancels.
    pub async fn delete_lesson(
        &self,
        lesson_id: LessonId,
    ) -> AdminResult<Option<MessageResponse>> {
        if !self
            .notifier
            .confirm(&format!("Are you sure you want to delete lesson ID {lesson_id}?"))
        {
            info!(%lesson_id, "lesson deletion cancelled");
            return Ok(None);
        }
        match self.api.delete_lesson(lesson_id).await {
            Ok(response) => {
                self.notifier
                    .alert(&format!("Lesson {lesson_id} was deleted."));
                self.navigator.reload();
                Ok(Some(response))
            }
            Err(err) => {
                warn!(%lesson_id, error = %err, "lesson deletion failed");
                self.notifier.alert("Error deleting the lesson.");
                Err(err)
            }
        }
    }

    /// Returns `Ok(None)` when the user cancels.
    pub async fn delete_reaction(
        &self,
        reaction_id: ReactionId,
    ) -> AdminResult<Option<MessageResponse>> {
        if !self
            .notifier
            .confirm("Are you sure you want to delete this reaction?")
        {
            return Ok(None);
        }
        match self.api.delete_reaction(reaction_id).await {
            Ok(response) => {
                self.notifier.alert(&response.message);
                self.navigator.reload();
                Ok(Some(response))
            }
            Err(err) => {
                self.notifier
                    .alert(&format!("Error deleting the reaction: {err}"));
                Err(err)
            }
        }
    }

    pub async fn add_lesson(&self, after: LessonId) -> AdminResult<ActionResponse> {
        match self.api.add_lesson(after).await {
            Ok(response) => {
                self.follow(&response, "add lesson");
                Ok(response)
            }
            Err(err) => {
                warn!(%after, error = %err, "adding lesson failed");
                self.notifier
                    .alert(&format!("Error adding a lesson: {err}"));
                Err(err)
            }
        }
    }

    /// Uploads the new picture first, when there is one, then saves the
    /// remaining fields. A failed upload is reported and the fields are
    /// still saved.
    pub async fn save_slide(
        &self,
        slide_id: SlideId,
        fields: &FormFields,
        picture: Option<&Path>,
    ) -> AdminResult<ActionResponse> {
        if let Some(picture) = picture {
            match self.api.upload_slide_picture(slide_id, picture).await {
                Ok(_) => self.notifier.alert("Picture uploaded."),
                Err(err) => {
                    warn!(%slide_id, error = %err, "picture upload failed");
                    self.notifier
                        .alert(&format!("Error uploading the picture: {err}"));
                }
            }
        }

        match self.api.save_slide(slide_id, &slide_json(fields)).await {
            Ok(response) => {
                self.follow(&response, "save slide");
                Ok(response)
            }
            Err(err) => {
                self.notifier
                    .alert(&format!("Error updating the slide: {err}"));
                Err(err)
            }
        }
    }

    pub async fn save_lesson(
        &self,
        lesson_id: LessonId,
        fields: &FormFields,
    ) -> AdminResult<MessageResponse> {
        match self.api.save_lesson(lesson_id, &lesson_json(fields)).await {
            Ok(response) => {
                let message = if response.message.is_empty() {
                    "Lesson updated."
                } else {
                    response.message.as_str()
                };
                self.notifier.alert(message);
                self.navigator.reload();
                Ok(response)
            }
            Err(err) => {
                self.notifier.alert(&format!("Error: {err}"));
                Err(err)
            }
        }
    }

    pub async fn save_reactions(&self, fields: &FormFields) -> AdminResult<MessageResponse> {
        match self.api.save_reactions(fields).await {
            Ok(response) => {
                self.notifier.alert(&response.message);
                self.navigator.reload();
                Ok(response)
            }
            Err(err) => {
                self.notifier.alert(&format!("Error while saving: {err}"));
                Err(err)
            }
        }
    }

    /// Texts are saved in place; the page is not reloaded.
    pub async fn save_texts(&self, fields: &FormFields) -> AdminResult<MessageResponse> {
        match self.api.save_texts(fields).await {
            Ok(response) => {
                self.notifier.alert(&response.message);
                Ok(response)
            }
            Err(err) if err.is_transport() => {
                self.notifier.alert("The server is not responding.");
                Err(err)
            }
            Err(err) => {
                self.notifier.alert(&format!("Error while saving: {err}"));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/actions_tests.rs"]
mod tests;
