//! # gitdag
//!
//! An incremental commit-DAG layout engine for Git repository browsers.
//!
//! `gitdag` turns a topologically-ordered stream of commit descriptors
//! (id + parent ids, newest first, the order `git log` delivers) into
//! drawing directives: a stable `(column, row)` placement per commit, the
//! parent-link edges between placements, and calendar-day markers. Columns
//! are reused from the lowest free gap as lineages terminate, so the graph
//! stays as narrow as the history's true concurrency allows.
//!
//! The engine performs no I/O and knows nothing about git, pixels or
//! widgets: a data source feeds it records, a renderer consumes its output.
//!
//! ## Architecture
//!
//! - [`models`] - Input and output data structures
//! - [`layout`] - The layout engine itself
//! - [`stream`] - Record parsing and sync/async delivery drivers
//!
//! ## Example
//!
//! ```rust
//! use gitdag::{CommitRecord, DagLayout};
//!
//! # fn main() -> Result<(), gitdag::LayoutError> {
//! let mut layout = DagLayout::new();
//! let step = layout.process_commit(&CommitRecord::new("a1b2c3", vec![]))?;
//! assert_eq!((step.entry.column, step.entry.row), (1, 0));
//! let summary = layout.finalize()?;
//! assert!(summary.dangling.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod layout;
pub mod models;
pub mod stream;

pub use layout::{DagLayout, LayoutError};
pub use models::{CommitRecord, DateMark, Edge, EdgeShape, LayoutEntry, LayoutStep, LayoutSummary};
pub use stream::{LayoutStream, RecordParser, StreamError};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
