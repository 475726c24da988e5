//! Data module - workbook loading and processing

pub mod dates;
mod loader;
mod processor;
mod record;

pub use loader::{DataLoader, Dataset, LoaderError};
pub use processor::{DataProcessor, SectionReport, SortMode};
pub use record::{AttendanceRecord, AttendanceStatus};
