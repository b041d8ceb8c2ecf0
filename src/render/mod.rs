//! Output rendering

pub mod report;

pub use report::CloneReport;
