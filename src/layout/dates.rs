use chrono::{DateTime, NaiveDate, Utc};

use crate::models::DateMark;

/// Tracks the current calendar-day bucket while commits stream in.
///
/// The first timestamped commit opens a bucket anchored at its row; each
/// later commit on the same day widens it, and the first commit on a
/// different day closes it into a [`DateMark`]. The still-open bucket is
/// flushed at finalize.
#[derive(Debug, Clone, Default)]
pub struct DateTracker {
    bucket: Option<Bucket>,
}

#[derive(Debug, Clone)]
struct Bucket {
    date: NaiveDate,
    from_row: usize,
    /// Id of the entry anchored at `from_row`, whose `date_span` grows with
    /// the bucket.
    head: String,
}

/// What one observation did to the bucket state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateEvent {
    /// Commit carried no timestamp, or repeated the current day without an
    /// anchored head to widen.
    None,
    /// The commit extended the current bucket; the named head entry's span
    /// covers `span` rows now.
    Extended { head: String, span: usize },
    /// The commit's day differs from the bucket's: the closed bucket is
    /// returned and a new one opens at this commit.
    Closed(DateMark),
}

impl DateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one commit's timestamp, positioned at `row`, just before the row
    /// counter advances past it.
    pub fn observe(&mut self, id: &str, when: Option<DateTime<Utc>>, row: usize) -> DateEvent {
        let Some(when) = when else {
            return DateEvent::None;
        };
        let date = when.date_naive();

        match &self.bucket {
            None => {
                self.bucket = Some(Bucket {
                    date,
                    from_row: row,
                    head: id.to_string(),
                });
                DateEvent::Extended {
                    head: id.to_string(),
                    span: 1,
                }
            }
            Some(bucket) if bucket.date == date => {
                let head = bucket.head.clone();
                let span = row + 1 - bucket.from_row;
                DateEvent::Extended { head, span }
            }
            Some(bucket) => {
                let mark = DateMark {
                    date: bucket.date,
                    from_row: bucket.from_row,
                    to_row: row,
                };
                self.bucket = Some(Bucket {
                    date,
                    from_row: row,
                    head: id.to_string(),
                });
                DateEvent::Closed(mark)
            }
        }
    }

    /// Flush the open bucket at end of stream; `row` is one past the last
    /// processed row.
    pub fn flush(&self, row: usize) -> Option<DateMark> {
        self.bucket.as_ref().map(|bucket| DateMark {
            date: bucket.date,
            from_row: bucket.from_row,
            to_row: row,
        })
    }
}
