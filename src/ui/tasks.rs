//! Background tasks used by the UI for loading and mutating categories
//! without blocking the UI thread.
//!
//! Each request runs on its own thread and reports back with exactly one
//! `TaskUpdate` on the channel. Workers never touch UI state.

use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;

use crate::api::CategoryApi;
use crate::types::{CategoryDraft, CategoryId, TaskUpdate};

/// Spawn a background fetch of the full category list.
pub fn spawn_load(api: Arc<dyn CategoryApi>, tx: Sender<TaskUpdate>, seq: u64) {
    thread::spawn(move || {
        log::debug!("Loading categories (load #{})", seq);
        let result = api.list();
        let _ = tx.send(TaskUpdate::Loaded { seq, result });
    });
}

/// Spawn a background create with the given form payload.
pub fn spawn_create(api: Arc<dyn CategoryApi>, tx: Sender<TaskUpdate>, draft: CategoryDraft) {
    thread::spawn(move || {
        log::debug!("Creating category {:?}", draft.name);
        let result = api.create(&draft);
        let _ = tx.send(TaskUpdate::Created(result));
    });
}

/// Spawn a background update of category `id` with the full form payload.
pub fn spawn_update(
    api: Arc<dyn CategoryApi>,
    tx: Sender<TaskUpdate>,
    id: CategoryId,
    draft: CategoryDraft,
) {
    thread::spawn(move || {
        log::debug!("Updating category {}", id);
        let result = api.update(id, &draft);
        let _ = tx.send(TaskUpdate::Updated { id, result });
    });
}

/// Spawn a background delete of category `id`.
pub fn spawn_delete(api: Arc<dyn CategoryApi>, tx: Sender<TaskUpdate>, id: CategoryId) {
    thread::spawn(move || {
        log::debug!("Deleting category {}", id);
        let result = api.delete(id);
        let _ = tx.send(TaskUpdate::Deleted { id, result });
    });
}
