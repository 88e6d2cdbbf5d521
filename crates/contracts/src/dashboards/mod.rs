pub mod dto;

pub use dto::{DashboardBundle, DashboardOutcome};
