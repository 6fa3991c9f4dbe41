//! Business logic built on top of the repositories and external clients.

pub mod barista;
pub mod email;
pub mod menu;

pub use barista::ChatOutcome;
pub use email::{EmailError, EmailService};
pub use menu::MenuCache;
