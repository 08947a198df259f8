//! Panels of the main window, rendered in this order every frame.

pub mod bottom;
pub mod categories;
pub mod form;
pub mod top;
