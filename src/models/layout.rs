use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Placement assigned to one processed commit.
///
/// Columns are 1-based; column 0 is conventionally left to the consumer as a
/// gutter for date markers. The row is the processing index and never
/// changes. `date_span` is the one field written after creation: it grows on
/// the entry that opened the current calendar bucket while later commits
/// fall into the same bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEntry {
    pub id: String,
    pub column: usize,
    pub row: usize,
    /// Rows a date marker anchored at this entry should cover.
    /// 0 when this row carries no marker.
    pub date_span: usize,
}

/// How a parent-link connector should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeShape {
    /// Child and parent share a column.
    Straight,
    /// Child sits right of the parent, lineages converging left.
    Fork,
    /// Child sits left of the parent, a merge source coming in from the right.
    Merge,
}

/// A connector between a child placement and a parent placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from_column: usize,
    pub from_row: usize,
    pub to_column: usize,
    pub to_row: usize,
    pub shape: EdgeShape,
}

impl Edge {
    /// Build a connector from a child position down to a parent position,
    /// classifying the shape from the column relation.
    pub fn connect(from_column: usize, from_row: usize, to_column: usize, to_row: usize) -> Self {
        let shape = match from_column.cmp(&to_column) {
            std::cmp::Ordering::Equal => EdgeShape::Straight,
            std::cmp::Ordering::Greater => EdgeShape::Fork,
            std::cmp::Ordering::Less => EdgeShape::Merge,
        };
        Self {
            from_column,
            from_row,
            to_column,
            to_row,
            shape,
        }
    }
}

/// A calendar-day marker covering a run of rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateMark {
    pub date: NaiveDate,
    pub from_row: usize,
    pub to_row: usize,
}

/// Everything produced by processing one commit: its placement, the edges
/// that became drawable because both endpoints are now known, and a date
/// marker if this commit closed a calendar bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutStep {
    pub entry: LayoutEntry,
    pub edges: Vec<Edge>,
    pub date_mark: Option<DateMark>,
}

/// End-of-stream report from [`DagLayout::finalize`].
///
/// The dangling edges and the closing date mark are provisional: a consumer
/// that resumes the layout to load more history should discard them and keep
/// only what later steps produce, the same way the reference renderer
/// deletes and redraws its still-open connection lines.
///
/// [`DagLayout::finalize`]: crate::layout::DagLayout::finalize
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSummary {
    /// Terminating connectors for lineages that never reconnected, one per
    /// open link, drawn straight down to the last processed row.
    pub dangling: Vec<Edge>,
    /// Marker for the still-open calendar bucket, if any commit carried a
    /// timestamp.
    pub date_mark: Option<DateMark>,
    /// True when open lineages remain, i.e. the history was truncated and a
    /// follow-up load could reconnect them.
    pub has_more: bool,
    /// Commits processed so far; the skip count for paginated reloads.
    pub processed: usize,
    /// Highest column ever allocated in this run.
    pub width: usize,
}
