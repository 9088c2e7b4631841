//! Ties an [`OrderedList`] to the backend and the UI seams.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex, MutexGuard, PoisonError,
};

use shared::{domain::CollectionKind, protocol::MessageResponse};
use tracing::{debug, info, warn};

use crate::{
    error::{AdminClientError, AdminResult},
    reorder::{MoveDirection, OrderedList},
    ui::{Navigator, Notifier},
    AdminApi,
};

pub struct ReorderController<A, N, V> {
    kind: CollectionKind,
    list: Mutex<OrderedList>,
    saving: AtomicBool,
    api: A,
    notifier: N,
    navigator: V,
}

/// Clears the in-flight flag when the save finishes, however it finishes.
struct SaveGuard<'a>(&'a AtomicBool);

impl<'a> SaveGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SaveGuard(flag))
    }
}

impl Drop for SaveGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

fn collection_label(kind: CollectionKind) -> &'static str {
    match kind {
        CollectionKind::Lessons => "lessons",
        CollectionKind::Slides { .. } => "slides",
    }
}

impl<A, N, V> ReorderController<A, N, V>
where
    A: AdminApi,
    N: Notifier,
    V: Navigator,
{
    pub fn new(kind: CollectionKind, list: OrderedList, api: A, notifier: N, navigator: V) -> Self {
        Self {
            kind,
            list: Mutex::new(list),
            saving: AtomicBool::new(false),
            api,
            notifier,
            navigator,
        }
    }

    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    fn list(&self) -> MutexGuard<'_, OrderedList> {
        self.list.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current display order.
    pub fn ids(&self) -> Vec<i64> {
        self.list().ids()
    }

    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::Acquire)
    }

    pub fn move_up(&self, id: i64) -> AdminResult<bool> {
        self.apply(id, MoveDirection::Up)
    }

    pub fn move_down(&self, id: i64) -> AdminResult<bool> {
        self.apply(id, MoveDirection::Down)
    }

    pub fn apply(&self, id: i64, direction: MoveDirection) -> AdminResult<bool> {
        let moved = self.list().apply(id, direction)?;
        debug!(id, ?direction, moved, "reorder");
        Ok(moved)
    }

    pub fn move_to(&self, id: i64, position: usize) -> AdminResult<bool> {
        self.list().move_to(id, position)
    }

    /// Sends the current order in one request.
    ///
    /// On success the server's message is shown and the page reloads. On
    /// failure the user is told and the local order is left untouched.
    /// While a save is pending further saves are refused.
    pub async fn save_order(&self) -> AdminResult<MessageResponse> {
        let label = collection_label(self.kind);
        let Some(_guard) = SaveGuard::acquire(&self.saving) else {
            self.notifier
                .alert(&format!("The {label} order is already being saved."));
            return Err(AdminClientError::SaveInFlight);
        };

        // Lock is released before the request is awaited.
        let snapshot = self.list().snapshot(self.kind);
        let snapshot = match snapshot {
            Ok(snapshot) => snapshot,
            Err(err) => {
                self.notifier
                    .alert(&format!("Could not save the {label} order: {err}"));
                return Err(err);
            }
        };

        match self.api.save_order(&snapshot).await {
            Ok(response) => {
                info!(collection = label, items = snapshot.len(), "order accepted");
                self.notifier.alert(&response.message);
                self.navigator.reload();
                Ok(response)
            }
            Err(err) => {
                warn!(collection = label, error = %err, "saving order failed");
                self.notifier
                    .alert(&format!("Error saving the {label} order: {err}"));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
