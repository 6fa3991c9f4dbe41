//! Domain models for the storefront.
//!
//! Row structs derive `sqlx::FromRow` and serialize straight into the JSON
//! API (snake_case, matching the column names the UI already binds to).

pub mod cart;
pub mod drink;
pub mod menu;
pub mod order;
pub mod profile;
pub mod review;
pub mod reward;

pub use cart::{CartLine, CartView};
pub use drink::{CustomDrink, CustomDrinkWithAddons, DrinkAddon};
pub use menu::MenuItem;
pub use order::{Order, OrderHistory, OrderItem, OrderWithItems};
pub use profile::Profile;
pub use review::Review;
pub use reward::{Reward, RewardStatus};
