mod columns;
mod dates;
mod engine;
mod error;

pub use columns::ColumnPool;
pub use dates::{DateEvent, DateTracker};
pub use engine::DagLayout;
pub use error::LayoutError;
