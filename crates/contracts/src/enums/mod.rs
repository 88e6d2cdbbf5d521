pub mod report_key;

pub use report_key::ReportKey;
