//! View-model behind the category screen.
//!
//! `CategoryManager` owns the list, the form, the selection and the status
//! banner. Panels read it and call its operations; worker completions are
//! applied in `poll` on the UI thread.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use crate::api::CategoryApi;
use crate::types::{Category, CategoryDraft, CategoryId, FormField, TaskKind, TaskUpdate};

use super::notification::{Notification, NotificationKind, NotificationSlot};
use super::tasks;

pub const MSG_CREATED: &str = "Categoría creada correctamente";
pub const MSG_UPDATED: &str = "Categoría actualizada correctamente";
pub const MSG_DELETED: &str = "Categoría eliminada correctamente";
pub const MSG_CREATE_FAILED: &str = "Error creating category. Please try again.";
pub const MSG_UPDATE_FAILED: &str = "Error updating category. Please try again.";
pub const MSG_DELETE_FAILED: &str = "Error deleting category. Please try again.";

pub struct CategoryManager {
    api: Arc<dyn CategoryApi>,
    tx: Sender<TaskUpdate>,
    rx: Receiver<TaskUpdate>,

    categories: Vec<Category>,
    form: CategoryDraft,
    selected: Option<CategoryId>,
    notification: NotificationSlot,

    // sequencing of in-flight work
    latest_load: u64,
    loads_in_flight: usize,
    mutation: Option<TaskKind>,
}

impl CategoryManager {
    pub fn new(api: Arc<dyn CategoryApi>, notification_ttl: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            api,
            tx,
            rx,
            categories: Vec::new(),
            form: CategoryDraft::default(),
            selected: None,
            notification: NotificationSlot::new(notification_ttl),
            latest_load: 0,
            loads_in_flight: 0,
            mutation: None,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn form(&self) -> &CategoryDraft {
        &self.form
    }

    pub fn selected(&self) -> Option<CategoryId> {
        self.selected
    }

    pub fn is_editing(&self) -> bool {
        self.selected.is_some()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "Actualizar categoría"
        } else {
            "Crear categoría"
        }
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.visible()
    }

    pub fn notification_remaining(&self, now: Instant) -> Option<Duration> {
        self.notification.remaining(now)
    }

    /// A create, update or delete is waiting for the server.
    pub fn is_busy(&self) -> bool {
        self.mutation.is_some()
    }

    pub fn pending_mutation(&self) -> Option<TaskKind> {
        self.mutation
    }

    pub fn is_loading(&self) -> bool {
        self.loads_in_flight > 0
    }

    /// Fetch the whole list. Only the most recently issued load is applied.
    pub fn load(&mut self) {
        self.latest_load += 1;
        self.loads_in_flight += 1;
        tasks::spawn_load(self.api.clone(), self.tx.clone(), self.latest_load);
    }

    /// Create or update from the current form, depending on the selection.
    /// Returns false when refused because another mutation is in flight.
    pub fn submit(&mut self) -> bool {
        if let Some(pending) = self.mutation {
            log::warn!("Submit ignored: {:?} still in flight", pending);
            return false;
        }
        let draft = self.form.clone();
        match self.selected {
            Some(id) => {
                self.mutation = Some(TaskKind::Update(id));
                tasks::spawn_update(self.api.clone(), self.tx.clone(), id, draft);
            }
            None => {
                self.mutation = Some(TaskKind::Create);
                tasks::spawn_create(self.api.clone(), self.tx.clone(), draft);
            }
        }
        true
    }

    /// Delete the selected category. Does nothing without a selection.
    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.selected else {
            log::debug!("Delete ignored: nothing selected");
            return false;
        };
        if let Some(pending) = self.mutation {
            log::warn!("Delete ignored: {:?} still in flight", pending);
            return false;
        }
        self.mutation = Some(TaskKind::Delete(id));
        tasks::spawn_delete(self.api.clone(), self.tx.clone(), id);
        true
    }

    /// Load a copy of `category` into the form and select it.
    pub fn select_for_edit(&mut self, category: &Category) {
        self.selected = Some(category.id);
        self.form = CategoryDraft::from(category);
    }

    pub fn clear(&mut self) {
        self.form = CategoryDraft::default();
        self.selected = None;
    }

    pub fn edit_field(&mut self, field: FormField, value: String) {
        match field {
            FormField::Name => self.form.name = value,
            FormField::Image => self.form.image = value,
        }
    }

    /// Apply finished worker results and expire the banner. Call once per frame.
    pub fn poll(&mut self, now: Instant) {
        while let Ok(update) = self.rx.try_recv() {
            self.apply(update, now);
        }
        self.notification.tick(now);
    }

    fn apply(&mut self, update: TaskUpdate, now: Instant) {
        match update {
            TaskUpdate::Loaded { seq, result } => {
                self.loads_in_flight = self.loads_in_flight.saturating_sub(1);
                if seq != self.latest_load {
                    log::debug!("Dropping stale load #{} (latest #{})", seq, self.latest_load);
                    return;
                }
                match result {
                    Ok(list) => {
                        log::info!("Loaded {} categories", list.len());
                        self.categories = list;
                    }
                    Err(e) => log::error!("Error fetching categories: {}", e),
                }
            }
            TaskUpdate::Created(result) => {
                self.mutation = None;
                match result {
                    Ok(created) => {
                        // form and selection stay as they are; the user may have moved on
                        log::info!("Created category {} ({:?})", created.id, created.name);
                        self.notification.show(NotificationKind::Success, MSG_CREATED, now);
                        self.load();
                    }
                    Err(e) => {
                        log::error!("Error creating category: {}", e);
                        self.notification.show(NotificationKind::Danger, MSG_CREATE_FAILED, now);
                    }
                }
            }
            TaskUpdate::Updated { id, result } => {
                self.mutation = None;
                match result {
                    Ok(_) => {
                        log::info!("Updated category {}", id);
                        self.notification.show(NotificationKind::Success, MSG_UPDATED, now);
                        self.load();
                    }
                    Err(e) => {
                        log::error!("Error updating category {}: {}", id, e);
                        self.notification.show(NotificationKind::Danger, MSG_UPDATE_FAILED, now);
                    }
                }
            }
            TaskUpdate::Deleted { id, result } => {
                self.mutation = None;
                match result {
                    Ok(()) => {
                        log::info!("Deleted category {}", id);
                        self.categories.retain(|c| c.id != id);
                        // any load issued before this point may still carry the deleted row
                        self.latest_load += 1;
                        self.clear();
                        self.notification.show(NotificationKind::Success, MSG_DELETED, now);
                    }
                    Err(e) => {
                        log::error!("Error deleting category {}: {}", id, e);
                        self.notification.show(NotificationKind::Danger, MSG_DELETE_FAILED, now);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use reqwest::StatusCode;

    use crate::api::ApiError;

    const TTL: Duration = Duration::from_millis(3000);

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        List,
        Create(CategoryDraft),
        Update(CategoryId, CategoryDraft),
        Delete(CategoryId),
    }

    #[derive(Default)]
    struct FakeApi {
        store: Mutex<Vec<Category>>,
        calls: Mutex<Vec<Call>>,
        fail_list: AtomicBool,
        fail_mutations: AtomicBool,
    }

    impl FakeApi {
        fn with(categories: Vec<Category>) -> Arc<Self> {
            Arc::new(Self {
                store: Mutex::new(categories),
                ..Default::default()
            })
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn list_calls(&self) -> usize {
            self.calls().iter().filter(|c| **c == Call::List).count()
        }

        fn failure(method: &'static str) -> ApiError {
            ApiError::Status {
                method,
                url: "http://fake/categories".into(),
                status: StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    }

    impl CategoryApi for FakeApi {
        fn list(&self) -> Result<Vec<Category>, ApiError> {
            self.calls.lock().unwrap().push(Call::List);
            if self.fail_list.load(Ordering::SeqCst) {
                return Err(Self::failure("GET"));
            }
            Ok(self.store.lock().unwrap().clone())
        }

        fn create(&self, draft: &CategoryDraft) -> Result<Category, ApiError> {
            self.calls.lock().unwrap().push(Call::Create(draft.clone()));
            if self.fail_mutations.load(Ordering::SeqCst) {
                return Err(Self::failure("POST"));
            }
            let mut store = self.store.lock().unwrap();
            let next = store.iter().map(|c| c.id.0).max().unwrap_or(0) + 1;
            let created = Category {
                id: CategoryId(next),
                name: draft.name.clone(),
                image: draft.image.clone(),
            };
            store.push(created.clone());
            Ok(created)
        }

        fn update(&self, id: CategoryId, draft: &CategoryDraft) -> Result<Category, ApiError> {
            self.calls.lock().unwrap().push(Call::Update(id, draft.clone()));
            if self.fail_mutations.load(Ordering::SeqCst) {
                return Err(Self::failure("PUT"));
            }
            let mut store = self.store.lock().unwrap();
            let entry = store
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| Self::failure("PUT"))?;
            entry.name = draft.name.clone();
            entry.image = draft.image.clone();
            Ok(entry.clone())
        }

        fn delete(&self, id: CategoryId) -> Result<(), ApiError> {
            self.calls.lock().unwrap().push(Call::Delete(id));
            if self.fail_mutations.load(Ordering::SeqCst) {
                return Err(Self::failure("DELETE"));
            }
            self.store.lock().unwrap().retain(|c| c.id != id);
            Ok(())
        }
    }

    impl CategoryManager {
        /// Block until every spawned request has reported back and been applied.
        fn settle(&mut self) {
            while self.loads_in_flight > 0 || self.mutation.is_some() {
                let update = self
                    .rx
                    .recv_timeout(Duration::from_secs(5))
                    .expect("worker should report back");
                self.apply(update, Instant::now());
            }
        }
    }

    fn category(id: u64, name: &str, image: &str) -> Category {
        Category {
            id: CategoryId(id),
            name: name.into(),
            image: image.into(),
        }
    }

    fn shoes() -> Category {
        category(1, "Shoes", "http://x/1.png")
    }

    fn mounted(api: &Arc<FakeApi>) -> CategoryManager {
        let mut manager = CategoryManager::new(api.clone(), TTL);
        manager.load();
        manager.settle();
        manager
    }

    fn type_form(manager: &mut CategoryManager, name: &str, image: &str) {
        manager.edit_field(FormField::Name, name.into());
        manager.edit_field(FormField::Image, image.into());
    }

    #[test]
    fn initial_load_and_select_for_edit() {
        let api = FakeApi::with(vec![shoes()]);
        let mut manager = mounted(&api);

        assert_eq!(manager.categories(), &[shoes()]);
        assert_eq!(manager.submit_label(), "Crear categoría");
        assert!(!manager.is_editing());

        let first = manager.categories()[0].clone();
        manager.select_for_edit(&first);
        assert_eq!(manager.form().name, "Shoes");
        assert_eq!(manager.form().image, "http://x/1.png");
        assert_eq!(manager.selected(), Some(CategoryId(1)));
        assert_eq!(manager.submit_label(), "Actualizar categoría");
        assert!(manager.is_editing());
    }

    #[test]
    fn editing_the_form_leaves_the_list_entry_alone() {
        let api = FakeApi::with(vec![shoes()]);
        let mut manager = mounted(&api);
        let first = manager.categories()[0].clone();
        manager.select_for_edit(&first);

        manager.edit_field(FormField::Name, "Boots".into());
        assert_eq!(manager.form().name, "Boots");
        assert_eq!(manager.form().image, "http://x/1.png");
        assert_eq!(manager.selected(), Some(CategoryId(1)));
        assert_eq!(manager.categories()[0].name, "Shoes");
    }

    #[test]
    fn create_sends_exact_payload_then_reloads() {
        let api = FakeApi::with(vec![shoes()]);
        let mut manager = mounted(&api);

        type_form(&mut manager, "Hats", "http://x/2.png");
        assert!(manager.submit());
        manager.settle();

        let expected = CategoryDraft {
            name: "Hats".into(),
            image: "http://x/2.png".into(),
        };
        assert_eq!(
            api.calls(),
            vec![Call::List, Call::Create(expected), Call::List]
        );
        assert!(manager
            .categories()
            .iter()
            .any(|c| c.name == "Hats" && c.image == "http://x/2.png"));
        assert_eq!(manager.form().name, "Hats");
        assert_eq!(manager.selected(), None);

        let shown = manager.notification().expect("notification");
        assert_eq!(shown.kind, NotificationKind::Success);
        assert_eq!(shown.message, MSG_CREATED);
    }

    #[test]
    fn edits_made_while_create_is_in_flight_survive_completion() {
        let api = FakeApi::with(vec![shoes()]);
        let mut manager = mounted(&api);
        type_form(&mut manager, "Hats", "http://x/2.png");
        assert!(manager.submit());

        let first = manager.categories()[0].clone();
        manager.select_for_edit(&first);
        manager.edit_field(FormField::Name, "Boots".into());
        manager.settle();

        assert_eq!(manager.selected(), Some(CategoryId(1)));
        assert_eq!(manager.form().name, "Boots");
        assert_eq!(manager.form().image, "http://x/1.png");
        assert_eq!(manager.notification().map(|n| n.message.as_str()), Some(MSG_CREATED));
    }

    #[test]
    fn empty_form_is_forwarded_unvalidated() {
        let api = FakeApi::with(vec![]);
        let mut manager = mounted(&api);

        assert!(manager.submit());
        manager.settle();

        assert_eq!(api.calls()[1], Call::Create(CategoryDraft::default()));
    }

    #[test]
    fn update_targets_selected_id_and_shows_server_truth() {
        let api = FakeApi::with(vec![shoes(), category(2, "Hats", "http://x/2.png")]);
        let mut manager = mounted(&api);
        let first = manager.categories()[0].clone();
        manager.select_for_edit(&first);

        manager.edit_field(FormField::Name, "Sneakers".into());
        assert!(manager.submit());
        manager.settle();

        assert!(api.calls().contains(&Call::Update(
            CategoryId(1),
            CategoryDraft {
                name: "Sneakers".into(),
                image: "http://x/1.png".into(),
            }
        )));
        assert_eq!(api.list_calls(), 2);
        assert!(manager.categories().iter().all(|c| c.name != "Shoes"));
        assert_eq!(manager.notification().map(|n| n.message.as_str()), Some(MSG_UPDATED));

        // selecting again shows the updated values
        let refreshed = manager
            .categories()
            .iter()
            .find(|c| c.id == CategoryId(1))
            .cloned()
            .expect("still listed");
        manager.clear();
        manager.select_for_edit(&refreshed);
        assert_eq!(manager.form().name, "Sneakers");
    }

    #[test]
    fn failed_create_keeps_list_and_form_and_shows_danger() {
        let api = FakeApi::with(vec![shoes()]);
        let mut manager = mounted(&api);
        api.fail_mutations.store(true, Ordering::SeqCst);

        type_form(&mut manager, "Hats", "http://x/2.png");
        assert!(manager.submit());
        manager.settle();

        assert_eq!(manager.categories(), &[shoes()]);
        assert_eq!(manager.form().name, "Hats");
        assert_eq!(manager.form().image, "http://x/2.png");
        assert_eq!(api.list_calls(), 1);
        let shown = manager.notification().expect("notification");
        assert_eq!(shown.kind, NotificationKind::Danger);
        assert_eq!(shown.message, MSG_CREATE_FAILED);
    }

    #[test]
    fn failed_update_keeps_selection() {
        let api = FakeApi::with(vec![shoes()]);
        let mut manager = mounted(&api);
        let first = manager.categories()[0].clone();
        manager.select_for_edit(&first);
        api.fail_mutations.store(true, Ordering::SeqCst);

        manager.edit_field(FormField::Name, "Boots".into());
        assert!(manager.submit());
        manager.settle();

        assert_eq!(manager.selected(), Some(CategoryId(1)));
        assert_eq!(manager.form().name, "Boots");
        assert_eq!(manager.categories(), &[shoes()]);
        assert_eq!(
            manager.notification().map(|n| n.kind),
            Some(NotificationKind::Danger)
        );
    }

    #[test]
    fn delete_splices_locally_without_reload() {
        let hats = category(2, "Hats", "http://x/2.png");
        let api = FakeApi::with(vec![shoes(), hats.clone()]);
        let mut manager = mounted(&api);
        let first = manager.categories()[0].clone();
        manager.select_for_edit(&first);

        assert!(manager.delete_selected());
        manager.settle();

        assert_eq!(manager.categories(), &[hats]);
        assert_eq!(api.list_calls(), 1);
        assert!(api.calls().contains(&Call::Delete(CategoryId(1))));
        assert_eq!(manager.selected(), None);
        assert_eq!(manager.form(), &CategoryDraft::default());
        let shown = manager.notification().expect("notification");
        assert_eq!(shown.kind, NotificationKind::Success);
        assert_eq!(shown.message, MSG_DELETED);
    }

    #[test]
    fn failed_delete_leaves_everything_in_place() {
        let api = FakeApi::with(vec![shoes()]);
        let mut manager = mounted(&api);
        let first = manager.categories()[0].clone();
        manager.select_for_edit(&first);
        api.fail_mutations.store(true, Ordering::SeqCst);

        assert!(manager.delete_selected());
        manager.settle();

        assert_eq!(manager.categories(), &[shoes()]);
        assert_eq!(manager.selected(), Some(CategoryId(1)));
        assert_eq!(manager.form().name, "Shoes");
        assert_eq!(manager.notification().map(|n| n.message.as_str()), Some(MSG_DELETE_FAILED));
    }

    #[test]
    fn delete_without_selection_is_silent_noop() {
        let api = FakeApi::with(vec![shoes()]);
        let mut manager = mounted(&api);

        assert!(!manager.delete_selected());
        assert!(!manager.is_busy());
        assert!(manager.notification().is_none());
        assert_eq!(api.calls(), vec![Call::List]);
    }

    #[test]
    fn clear_is_idempotent_and_offline() {
        let api = FakeApi::with(vec![shoes()]);
        let mut manager = mounted(&api);
        let first = manager.categories()[0].clone();
        manager.select_for_edit(&first);

        manager.clear();
        let (form_once, selected_once) = (manager.form().clone(), manager.selected());
        manager.clear();

        assert_eq!(manager.form(), &form_once);
        assert_eq!(manager.selected(), selected_once);
        assert_eq!(manager.form(), &CategoryDraft::default());
        assert_eq!(manager.selected(), None);
        assert!(manager.notification().is_none());
        assert_eq!(api.calls(), vec![Call::List]);
    }

    #[test]
    fn failed_load_is_silent_and_keeps_list() {
        let api = FakeApi::with(vec![shoes()]);
        let mut manager = mounted(&api);
        api.fail_list.store(true, Ordering::SeqCst);

        manager.load();
        manager.settle();

        assert_eq!(manager.categories(), &[shoes()]);
        assert!(manager.notification().is_none());
    }

    #[test]
    fn stale_load_does_not_overwrite_newer_list() {
        let api = FakeApi::with(vec![]);
        let mut manager = CategoryManager::new(api, TTL);
        let now = Instant::now();
        manager.latest_load = 2;
        manager.loads_in_flight = 2;

        manager.apply(
            TaskUpdate::Loaded {
                seq: 2,
                result: Ok(vec![shoes()]),
            },
            now,
        );
        manager.apply(
            TaskUpdate::Loaded {
                seq: 1,
                result: Ok(vec![]),
            },
            now,
        );

        assert_eq!(manager.categories(), &[shoes()]);
        assert!(!manager.is_loading());
    }

    #[test]
    fn load_issued_before_delete_cannot_restore_deleted_row() {
        let hats = category(2, "Hats", "http://x/2.png");
        let api = FakeApi::with(vec![]);
        let mut manager = CategoryManager::new(api, TTL);
        let now = Instant::now();
        manager.categories = vec![shoes(), hats.clone()];
        manager.selected = Some(CategoryId(1));
        // reload after a successful update is still out when the delete lands
        manager.latest_load = 2;
        manager.loads_in_flight = 1;
        manager.mutation = Some(TaskKind::Delete(CategoryId(1)));

        manager.apply(
            TaskUpdate::Deleted {
                id: CategoryId(1),
                result: Ok(()),
            },
            now,
        );
        manager.apply(
            TaskUpdate::Loaded {
                seq: 2,
                result: Ok(vec![shoes(), hats.clone()]),
            },
            now,
        );

        assert_eq!(manager.categories(), &[hats]);
        assert!(!manager.is_loading());
    }

    #[test]
    fn second_submit_is_refused_while_first_is_in_flight() {
        let api = FakeApi::with(vec![]);
        let mut manager = mounted(&api);
        type_form(&mut manager, "Hats", "http://x/2.png");

        assert!(manager.submit());
        assert!(manager.is_busy());
        assert!(!manager.submit());
        manager.settle();

        let creates = api
            .calls()
            .iter()
            .filter(|c| matches!(c, Call::Create(_)))
            .count();
        assert_eq!(creates, 1);
        assert!(!manager.is_busy());
    }

    #[test]
    fn notification_hides_after_ttl_via_poll() {
        let api = FakeApi::with(vec![shoes()]);
        let mut manager = mounted(&api);
        let first = manager.categories()[0].clone();
        manager.select_for_edit(&first);
        manager.delete_selected();
        manager.settle();
        assert!(manager.notification().is_some());

        manager.poll(Instant::now() + TTL + Duration::from_millis(1));
        assert!(manager.notification().is_none());
    }
}
