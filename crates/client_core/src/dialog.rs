use shared::{
    domain::{LessonId, SlideId, SlideType},
    protocol::ActionResponse,
};
use tracing::{info, warn};

use crate::{actions::Page, error::AdminResult, new_slide_request};

/// "New slide" dialog. Holds the lesson and insertion point from the
/// moment it is opened until a slide type is picked or it is dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a dialog does nothing until a slide type is selected"]
pub struct SlideTypeDialog {
    lesson_id: LessonId,
    after: Option<SlideId>,
}

impl SlideTypeDialog {
    pub fn open(lesson_id: LessonId, after: Option<SlideId>) -> Self {
        Self { lesson_id, after }
    }

    pub fn lesson_id(&self) -> LessonId {
        self.lesson_id
    }

    pub fn after(&self) -> Option<SlideId> {
        self.after
    }

    pub fn dismiss(self) {}

    /// Creates the slide and follows the server to its edit page.
    pub async fn select(self, page: &Page<'_>, slide_type: SlideType) -> AdminResult<ActionResponse> {
        let request = new_slide_request(self.lesson_id, slide_type, self.after);
        match page.api.add_slide(&request).await {
            Ok(response) => {
                info!(lesson_id = %self.lesson_id, %slide_type, "slide added");
                page.follow(&response, "add slide");
                Ok(response)
            }
            Err(err) => {
                warn!(lesson_id = %self.lesson_id, error = %err, "adding slide failed");
                page.notifier
                    .alert(&format!("Error adding a new slide: {err}"));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use shared::protocol::ActionResponse;

    use super::*;
    use crate::test_support::{FakeApi, RecordingNavigator, RecordingNotifier};

    #[tokio::test]
    async fn select_uses_context_captured_at_open() {
        let api = FakeApi::default().with_action(ActionResponse {
            message: Some("Slide added successfully. Slide ID: 31".into()),
            redirect_url: Some("/slides/31".into()),
        });
        let notifier = RecordingNotifier::default();
        let navigator = RecordingNavigator::default();
        let page = Page::new(&api, &notifier, &navigator);

        let first = SlideTypeDialog::open(LessonId(4), Some(SlideId(30)));
        let second = SlideTypeDialog::open(LessonId(5), None);
        second.dismiss();
        first
            .select(&page, SlideType::QuizOptions)
            .await
            .expect("add slide");

        let requests = api.slide_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].lesson_id, LessonId(4));
        assert_eq!(requests[0].slide_id, Some(SlideId(30)));
        assert_eq!(requests[0].slide_type, SlideType::QuizOptions);
        assert_eq!(navigator.redirects(), vec!["/slides/31".to_string()]);
    }

    #[tokio::test]
    async fn failed_add_notifies_without_navigation() {
        let api = FakeApi::failing();
        let notifier = RecordingNotifier::default();
        let navigator = RecordingNavigator::default();
        let page = Page::new(&api, &notifier, &navigator);

        let result = SlideTypeDialog::open(LessonId(1), None)
            .select(&page, SlideType::Text)
            .await;

        assert!(result.is_err());
        assert_eq!(notifier.alerts().len(), 1);
        assert!(navigator.redirects().is_empty());
        assert_eq!(navigator.reloads(), 0);
    }
}
