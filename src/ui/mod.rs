//! egui rendering. Widgets read [`crate::state::AppState`]; only the side
//! panel and the top bar mutate it.

pub mod cards;
pub mod format;
pub mod map;
pub mod panels;
