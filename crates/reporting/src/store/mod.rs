pub mod reducer;
pub mod state;
pub mod store;

pub use reducer::{reduce, ReportesAction};
pub use state::{ReportData, ReportesState};
pub use store::ReportesStore;
