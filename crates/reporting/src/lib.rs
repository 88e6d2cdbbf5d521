pub mod analytics;
pub mod api;
pub mod reports;
pub mod shared;
pub mod store;
