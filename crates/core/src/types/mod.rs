//! Core types for Cortado.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod discount;
pub mod email;
pub mod id;
pub mod price;
pub mod status;
pub mod tier;

pub use discount::{DiscountCode, ProductType};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::Price;
pub use status::*;
pub use tier::Tier;
