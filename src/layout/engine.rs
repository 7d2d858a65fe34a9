use std::collections::{BTreeMap, HashMap};

use tracing::{debug, warn};

use crate::layout::columns::ColumnPool;
use crate::layout::dates::{DateEvent, DateTracker};
use crate::layout::error::LayoutError;
use crate::models::{CommitRecord, Edge, LayoutEntry, LayoutStep, LayoutSummary};

/// One child edge waiting for its parent commit to appear in the stream.
///
/// `origin_*` is the child's own placement, used for edge endpoints; `column`
/// is the lane reserved for this lineage, used only for allocation
/// bookkeeping (the minimum over waiting lanes anchors the parent, the rest
/// are released).
#[derive(Debug, Clone)]
struct OpenLink {
    origin_column: usize,
    origin_row: usize,
    column: usize,
}

/// Incremental commit-DAG layout engine.
///
/// Feed commits in the order the data source delivers them (children before
/// parents, typically newest first) via [`process_commit`]; each call yields
/// the commit's placement and every edge that became drawable. Call
/// [`finalize`] exactly once when the stream ends. To extend a truncated
/// view with more history ("show more"), call [`resume`] and keep feeding;
/// rows, open lineages and the date bucket carry over. Independent layout
/// runs must start from a fresh `DagLayout`.
///
/// [`process_commit`]: DagLayout::process_commit
/// [`finalize`]: DagLayout::finalize
/// [`resume`]: DagLayout::resume
#[derive(Debug, Default)]
pub struct DagLayout {
    row: usize,
    columns: ColumnPool,
    /// Children waiting on a not-yet-seen parent, keyed by parent id.
    open: BTreeMap<String, Vec<OpenLink>>,
    /// Placements of already-processed commits.
    known: HashMap<String, LayoutEntry>,
    dates: DateTracker,
    finalized: bool,
    processed: usize,
}

impl DagLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lay out the next commit of the stream.
    pub fn process_commit(&mut self, commit: &CommitRecord) -> Result<LayoutStep, LayoutError> {
        if self.finalized {
            warn!(id = %commit.id, "process_commit called on a finalized layout");
            return Err(LayoutError::Finalized);
        }
        if self.known.contains_key(&commit.id) {
            warn!(id = %commit.id, "duplicate commit in layout stream");
            return Err(LayoutError::DuplicateCommit {
                id: commit.id.clone(),
            });
        }
        for parent in &commit.parents {
            if self.known.contains_key(parent) {
                warn!(id = %commit.id, %parent, "commit delivered after its parent");
                return Err(LayoutError::OutOfOrder {
                    id: commit.id.clone(),
                    parent: parent.clone(),
                });
            }
        }

        let mut edges = Vec::new();

        // Children already declared this commit as a parent: it lands on the
        // minimum of their reserved lanes and the other lanes converge here.
        let column = match self.open.remove(&commit.id) {
            Some(links) => {
                let column = links
                    .iter()
                    .map(|link| link.column)
                    .min()
                    .expect("open link lists are never empty");
                for link in &links {
                    edges.push(Edge::connect(
                        link.origin_column,
                        link.origin_row,
                        column,
                        self.row,
                    ));
                    if link.column != column {
                        self.columns.release(link.column);
                    }
                }
                column
            }
            None => self.columns.acquire(),
        };

        // A root ends its lineage; nothing continues through its column.
        if commit.parents.is_empty() {
            self.columns.release(column);
        }

        // Reserve a lane per parent: the first continues straight down this
        // commit's column, every further one forks a fresh column.
        for (index, parent) in commit.parents.iter().enumerate() {
            let lane = if index == 0 {
                column
            } else {
                self.columns.acquire()
            };
            self.open.entry(parent.clone()).or_default().push(OpenLink {
                origin_column: column,
                origin_row: self.row,
                column: lane,
            });
        }

        self.known.insert(
            commit.id.clone(),
            LayoutEntry {
                id: commit.id.clone(),
                column,
                row: self.row,
                date_span: 0,
            },
        );

        let date_mark = match self.dates.observe(&commit.id, commit.when, self.row) {
            DateEvent::None => None,
            DateEvent::Extended { head, span } => {
                if let Some(entry) = self.known.get_mut(&head) {
                    entry.date_span = span;
                }
                None
            }
            DateEvent::Closed(mark) => {
                // this commit opens the next bucket
                if let Some(entry) = self.known.get_mut(&commit.id) {
                    entry.date_span = 1;
                }
                Some(mark)
            }
        };

        debug!(
            id = %commit.id,
            column,
            row = self.row,
            edges = edges.len(),
            open = self.open_lineages(),
            "placed commit"
        );

        let entry = self.known[&commit.id].clone();
        self.row += 1;
        self.processed += 1;

        Ok(LayoutStep {
            entry,
            edges,
            date_mark,
        })
    }

    /// Close the current stream.
    ///
    /// Lineages that never reconnected (truncated history, parents outside
    /// the requested window) become provisional straight connectors down to
    /// the last processed row; they are not errors.
    pub fn finalize(&mut self) -> Result<LayoutSummary, LayoutError> {
        if self.finalized {
            return Err(LayoutError::Finalized);
        }
        self.finalized = true;

        let mut dangling: Vec<Edge> = self
            .open
            .values()
            .flatten()
            .map(|link| {
                Edge::connect(
                    link.origin_column,
                    link.origin_row,
                    link.origin_column,
                    self.row,
                )
            })
            .collect();
        dangling.sort_by_key(|edge| (edge.from_row, edge.from_column));

        let summary = LayoutSummary {
            dangling,
            date_mark: self.dates.flush(self.row),
            has_more: !self.open.is_empty(),
            processed: self.processed,
            width: self.columns.high_water(),
        };

        debug!(
            processed = summary.processed,
            width = summary.width,
            dangling = summary.dangling.len(),
            has_more = summary.has_more,
            "layout finalized"
        );

        Ok(summary)
    }

    /// Reopen a finalized layout so a paginated reload can continue it.
    ///
    /// Rows keep counting from where they stopped and lineages left open at
    /// finalize can still reconnect. The consumer should discard the
    /// previous summary's provisional dangling edges and date mark. The
    /// caller re-requests history skipping [`processed`](DagLayout::processed)
    /// commits.
    pub fn resume(&mut self) -> Result<(), LayoutError> {
        if !self.finalized {
            return Err(LayoutError::NotFinalized);
        }
        self.finalized = false;
        debug!(
            row = self.row,
            open = self.open_lineages(),
            "layout resumed for more history"
        );
        Ok(())
    }

    /// Next row to be assigned; equals the number of processed commits.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Commits processed so far across all continuations of this run.
    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Highest column ever allocated in this run.
    pub fn width(&self) -> usize {
        self.columns.high_water()
    }

    /// Columns currently anchored by an open lineage.
    pub fn columns_in_use(&self) -> usize {
        self.columns.in_use()
    }

    /// Child edges still waiting for their parent commit.
    pub fn open_lineages(&self) -> usize {
        self.open.values().map(Vec::len).sum()
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Placement of an already-processed commit.
    pub fn entry(&self, id: &str) -> Option<&LayoutEntry> {
        self.known.get(id)
    }

    /// All placements produced so far, in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = &LayoutEntry> {
        self.known.values()
    }
}
