//! API middleware components.
//!
//! - [`todo_filter`]: filter resolution and redirect `Location` patching

pub mod todo_filter;

pub use todo_filter::{
    CurrentFilter, TodoFilterLayer, TodoFilterService, patch_location, resolve_filter,
};
