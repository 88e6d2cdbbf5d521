pub mod dto;
pub mod filters;
pub mod result;

pub use filters::{FilterOverrides, PresetPeriodo, ReportFilters};
pub use result::{ApiEnvelope, ReportResult};
