pub mod config;
pub mod errors;
pub mod layout;
pub mod model;
pub mod parser;
pub mod report;
pub mod settings;

// Re-export commonly used types
pub use crate::config::{CliArgs, ConfigError, FioWidthPolicy, RawSettings};
pub use crate::errors::{AppError, AppResult};
pub use crate::layout::{ComposedRow, LayoutConfig, Paginator, ReportSummary};
pub use crate::model::{Column, Record};
