//! Page-level navigation for the web console.
//!
//! - **Guard**: decides whether a session may open a page, and where to send it otherwise
//! - **Menu**: the role's sidebar and which entry a path highlights

pub mod guard;
pub mod menu;

pub use guard::{RouteDecision, RouteGuard};
pub use menu::{active_item, menu_for, MenuEntry};
