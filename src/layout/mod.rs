//! Report layout engine.
//!
//! Settings are validated into a [`LayoutConfig`], each cell is split into
//! fragments by [`wrap()`], [`compose`] lines the fragments of one record up
//! into physical lines and [`Paginator`] spreads the rows over pages.

pub mod paginate;
pub mod row;
pub mod validate;
pub mod wrap;

pub use paginate::{PageState, Paginator, ReportSummary, PAGE_BREAK_MARKER};
pub use row::{compose, compose_header, ComposedRow};
pub use validate::{validate, LayoutConfig, MIN_PAGE_HEIGHT, SEPARATOR_OVERHEAD};
pub use wrap::{wrap, Delimiters, Fragments};
