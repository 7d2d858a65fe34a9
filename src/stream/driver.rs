use futures::{Stream, StreamExt};
use tracing::debug;

use crate::layout::{DagLayout, LayoutError};
use crate::models::{CommitRecord, LayoutStep, LayoutSummary};

/// Pull-based driver: lays out commits as they are drawn from an iterator.
///
/// Each [`try_next`](LayoutStream::try_next) yields the layout step for one
/// record; [`finish`](LayoutStream::finish) drains whatever remains and
/// finalizes. For a paginated reload, resume the layout returned by `finish`
/// and wrap it again with [`with_layout`](LayoutStream::with_layout) around
/// the next batch of records.
pub struct LayoutStream<I> {
    source: I,
    layout: DagLayout,
    complete: bool,
}

impl<I> LayoutStream<I>
where
    I: Iterator<Item = CommitRecord>,
{
    pub fn new(source: I) -> Self {
        Self::with_layout(source, DagLayout::new())
    }

    /// Continue an existing (resumed) layout with a further batch.
    pub fn with_layout(source: I, layout: DagLayout) -> Self {
        Self {
            source,
            layout,
            complete: false,
        }
    }

    pub fn try_next(&mut self) -> Option<Result<LayoutStep, LayoutError>> {
        if self.complete {
            return None;
        }
        match self.source.next() {
            Some(record) => Some(self.layout.process_commit(&record)),
            None => {
                self.complete = true;
                None
            }
        }
    }

    /// Drain any remaining records into the layout and finalize it.
    ///
    /// Steps produced while draining are folded into the layout state; their
    /// placements stay reachable through [`DagLayout::entry`].
    pub fn finish(mut self) -> Result<(DagLayout, LayoutSummary), LayoutError> {
        while let Some(step) = self.try_next() {
            step?;
        }
        let summary = self.layout.finalize()?;
        Ok((self.layout, summary))
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn layout(&self) -> &DagLayout {
        &self.layout
    }
}

impl<I> Iterator for LayoutStream<I>
where
    I: Iterator<Item = CommitRecord>,
{
    type Item = Result<LayoutStep, LayoutError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.try_next()
    }
}

impl<I> std::fmt::Debug for LayoutStream<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutStream")
            .field("row", &self.layout.row())
            .field("open_lineages", &self.layout.open_lineages())
            .field("complete", &self.complete)
            .finish()
    }
}

/// Push-based driver for asynchronous delivery: consumes a stream of records
/// as they arrive, invoking `on_step` per placement, and finalizes when the
/// stream ends. The callback pair mirrors the progress/done protocol the
/// engine was designed against.
pub async fn drive<S, F>(
    layout: &mut DagLayout,
    mut source: S,
    mut on_step: F,
) -> Result<LayoutSummary, LayoutError>
where
    S: Stream<Item = CommitRecord> + Unpin,
    F: FnMut(LayoutStep),
{
    while let Some(record) = source.next().await {
        on_step(layout.process_commit(&record)?);
    }
    debug!(rows = layout.row(), "record stream exhausted");
    layout.finalize()
}
