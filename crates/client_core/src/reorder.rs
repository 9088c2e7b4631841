//! In-memory model of an ordered admin list (lessons, or the slides of one
//! lesson) and the snapshot sent to the server when the order is saved.
//!
//! The list is the single source of truth for display order. Moves only
//! touch memory; [`OrderedList::snapshot`] is the one place where the order
//! is turned into a payload.

use std::collections::HashSet;

use serde::Serialize;
use shared::{
    domain::{CollectionKind, LessonId, SlideId},
    protocol::{
        LessonOrderItem, LessonOrderUpdateRequest, SlideOrderItem, SlideOrderUpdateRequest,
    },
};

use crate::error::{AdminClientError, AdminResult};

/// A lesson or slide row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderableItem {
    pub id: i64,
    /// Owning lesson of a slide. Lessons leave this empty.
    pub parent_id: Option<i64>,
}

impl OrderableItem {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            parent_id: None,
        }
    }

    pub fn with_parent(id: i64, parent_id: i64) -> Self {
        Self {
            id,
            parent_id: Some(parent_id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedList {
    items: Vec<OrderableItem>,
}

impl OrderedList {
    pub fn from_items(items: impl IntoIterator<Item = OrderableItem>) -> AdminResult<Self> {
        let items: Vec<OrderableItem> = items.into_iter().collect();
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id) {
                return Err(AdminClientError::DuplicateItem(item.id));
            }
        }
        Ok(Self { items })
    }

    pub fn from_ids(ids: impl IntoIterator<Item = i64>) -> AdminResult<Self> {
        Self::from_items(ids.into_iter().map(OrderableItem::new))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[OrderableItem] {
        &self.items
    }

    pub fn ids(&self) -> Vec<i64> {
        self.items.iter().map(|item| item.id).collect()
    }

    /// 1-based display position.
    pub fn position_of(&self, id: i64) -> Option<usize> {
        self.index_of(id).map(|index| index + 1)
    }

    fn index_of(&self, id: i64) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Returns `Ok(false)` when the item is already first.
    pub fn move_up(&mut self, id: i64) -> AdminResult<bool> {
        let index = self.index_of(id).ok_or(AdminClientError::UnknownItem(id))?;
        if index == 0 {
            return Ok(false);
        }
        self.items.swap(index - 1, index);
        Ok(true)
    }

    /// Returns `Ok(false)` when the item is already last.
    pub fn move_down(&mut self, id: i64) -> AdminResult<bool> {
        let index = self.index_of(id).ok_or(AdminClientError::UnknownItem(id))?;
        if index + 1 >= self.items.len() {
            return Ok(false);
        }
        self.items.swap(index, index + 1);
        Ok(true)
    }

    pub fn apply(&mut self, id: i64, direction: MoveDirection) -> AdminResult<bool> {
        match direction {
            MoveDirection::Up => self.move_up(id),
            MoveDirection::Down => self.move_down(id),
        }
    }

    /// Moves an item to a 1-based position, clamped to the list bounds.
    pub fn move_to(&mut self, id: i64, position: usize) -> AdminResult<bool> {
        let from = self.index_of(id).ok_or(AdminClientError::UnknownItem(id))?;
        let to = position.clamp(1, self.items.len()) - 1;
        if from == to {
            return Ok(false);
        }
        let item = self.items.remove(from);
        self.items.insert(to, item);
        Ok(true)
    }

    pub fn remove(&mut self, id: i64) -> Option<OrderableItem> {
        let index = self.index_of(id)?;
        Some(self.items.remove(index))
    }

    /// Builds the payload for the current display order.
    pub fn snapshot(&self, kind: CollectionKind) -> AdminResult<OrderSnapshot> {
        if self.items.is_empty() {
            return Err(AdminClientError::EmptyCollection);
        }

        let snapshot = match kind {
            CollectionKind::Lessons => OrderSnapshot::Lessons(LessonOrderUpdateRequest {
                lessons: self
                    .items
                    .iter()
                    .zip(1u32..)
                    .map(|(item, lesson_index)| LessonOrderItem {
                        lesson_id: LessonId(item.id),
                        lesson_index,
                    })
                    .collect(),
            }),
            CollectionKind::Slides { lesson_id } => {
                let next_ids = self
                    .items
                    .iter()
                    .skip(1)
                    .map(|next| Some(SlideId(next.id)))
                    .chain(std::iter::once(None));
                OrderSnapshot::Slides(SlideOrderUpdateRequest {
                    slides: self
                        .items
                        .iter()
                        .zip(next_ids)
                        .map(|(item, next_slide_id)| SlideOrderItem {
                            slide_id: SlideId(item.id),
                            lesson_id: item.parent_id.map(LessonId).unwrap_or(lesson_id),
                            next_slide_id,
                        })
                        .collect(),
                })
            }
        };
        Ok(snapshot)
    }
}

/// Full ordered payload for one save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OrderSnapshot {
    Lessons(LessonOrderUpdateRequest),
    Slides(SlideOrderUpdateRequest),
}

impl OrderSnapshot {
    pub fn len(&self) -> usize {
        match self {
            OrderSnapshot::Lessons(request) => request.lessons.len(),
            OrderSnapshot::Slides(request) => request.slides.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            OrderSnapshot::Lessons(_) => "/save-lessons-order",
            OrderSnapshot::Slides(_) => "/save-slides-order",
        }
    }
}

#[cfg(test)]
#[path = "tests/reorder_tests.rs"]
mod tests;
