use serde::{Deserialize, Serialize};

use crate::domain::{LessonId, SlideId, SlideType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonOrderItem {
    pub lesson_id: LessonId,
    /// 1-based rank of the lesson in the saved order.
    pub lesson_index: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonOrderUpdateRequest {
    pub lessons: Vec<LessonOrderItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideOrderItem {
    pub slide_id: SlideId,
    pub lesson_id: LessonId,
    /// `None` marks the tail of the chain and is sent as `null`.
    pub next_slide_id: Option<SlideId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideOrderUpdateRequest {
    pub slides: Vec<SlideOrderItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNewLessonRequest {
    pub lesson_id: LessonId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNewSlideRequest {
    pub lesson_id: LessonId,
    pub slide_type: SlideType,
    /// Slide the new one is inserted after; `None` starts a fresh chain.
    pub slide_id: Option<SlideId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response of endpoints that may send the browser somewhere else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "redirectUrl")]
    pub redirect_url: Option<String>,
}
