//! Seams between the client logic and whatever presents it to the user.

use std::fmt;

use shared::domain::{LessonId, SlideId};

/// Blocking user notification.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
    /// Returns `true` when the user accepts.
    fn confirm(&self, question: &str) -> bool;
}

/// Page navigation.
pub trait Navigator: Send + Sync {
    /// Re-render from server-confirmed state.
    fn reload(&self);
    fn redirect(&self, target: &str);
}

/// Admin pages reachable from buttons and links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Lessons,
    Lesson(LessonId),
    LessonSlides(LessonId),
    Slide(SlideId),
    Texts,
    Reactions,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Lessons => "/lessons/".to_string(),
            Route::Lesson(id) => format!("/lesson/{id}"),
            Route::LessonSlides(id) => format!("/lesson_{id}/slides"),
            Route::Slide(id) => format!("/slides/{id}"),
            Route::Texts => "/texts/".to_string(),
            Route::Reactions => "/reactions/".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
