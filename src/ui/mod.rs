//! Egui-based UI for the Category Manager.
//!
//! This module defines the eframe App, which owns the `CategoryManager`
//! view-model, pumps worker completions every frame and lays out the panels.

use std::sync::Arc;
use std::time::{Duration, Instant};

use eframe::{egui, App};

use crate::api::CategoryApi;
use crate::style::set_light_style;

pub mod list;
pub mod notification;
pub mod panels;
pub mod state;
pub mod tasks;

use state::CategoryManager;

/// Repaint cadence while requests are in flight.
const BUSY_REPAINT: Duration = Duration::from_millis(50);

/// Main eframe application that renders and controls the UI.
pub struct CategoryApp {
    manager: CategoryManager,
    api_base_url: String,
}

impl CategoryApp {
    /// Build the app and kick off the initial list load.
    pub fn new(api: Arc<dyn CategoryApi>, api_base_url: String, notification_ttl: Duration) -> Self {
        let mut manager = CategoryManager::new(api, notification_ttl);
        manager.load();
        Self {
            manager,
            api_base_url,
        }
    }
}

/// Egui frame update: applies finished requests, theme and panel layout.
impl App for CategoryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.manager.poll(now);

        set_light_style(ctx);

        panels::top::show(ctx, &self.api_base_url);
        panels::bottom::show(ctx, &self.manager);
        panels::form::show(ctx, &mut self.manager);
        panels::categories::show(ctx, &mut self.manager);

        // wake up for worker completions and for the banner deadline
        if self.manager.is_busy() || self.manager.is_loading() {
            ctx.request_repaint_after(BUSY_REPAINT);
        } else if let Some(left) = self.manager.notification_remaining(Instant::now()) {
            ctx.request_repaint_after(left);
        }
    }
}
