//! Core data types shared across the application.

use std::fmt;

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::api::ApiError;

/// Server-assigned identifier of a category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub u64);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category record as returned by the remote service.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub image: String,
}

/// Editable payload sent on create and update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CategoryDraft {
    pub name: String,
    pub image: String,
}

impl From<&Category> for CategoryDraft {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            image: category.image.clone(),
        }
    }
}

/// Named form field, used for single-field edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Name,
    Image,
}

/// Mutating request currently in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskKind {
    Create,
    Update(CategoryId),
    Delete(CategoryId),
}

/// Completion message sent from worker threads to the UI.
#[derive(Debug)]
pub enum TaskUpdate {
    Loaded {
        seq: u64,
        result: Result<Vec<Category>, ApiError>,
    },
    Created(Result<Category, ApiError>),
    Updated {
        id: CategoryId,
        result: Result<Category, ApiError>,
    },
    Deleted {
        id: CategoryId,
        result: Result<(), ApiError>,
    },
}

pub struct StateColors {
    pub default: Color32,
    pub hover: Color32,
    pub selected: Option<Color32>, // None = use default theme color
}
