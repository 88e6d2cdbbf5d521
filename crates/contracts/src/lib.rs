pub mod dashboards;
pub mod enums;
pub mod reports;
pub mod shared;
