mod commit;
mod layout;

pub use commit::CommitRecord;
pub use layout::{DateMark, Edge, EdgeShape, LayoutEntry, LayoutStep, LayoutSummary};
