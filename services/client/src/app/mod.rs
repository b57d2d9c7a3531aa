pub mod admin;
pub mod guard;
pub mod state;
pub mod storefront;

pub use admin::{AdminDashboard, Confirm};
pub use state::AppState;
pub use storefront::Storefront;
