use chrono::DateTime;
use regex::Regex;
use thiserror::Error;
use tracing::warn;

use crate::models::CommitRecord;

/// Errors raised while turning log lines into [`CommitRecord`]s.
#[derive(Error, Debug)]
pub enum StreamError {
    #[error("empty record line")]
    EmptyRecord,

    #[error("record line of {length} bytes exceeds the {limit} byte limit")]
    LineTooLong { length: usize, limit: usize },

    #[error("invalid commit id '{id}'")]
    InvalidId { id: String },

    #[error("invalid commit timestamp '{value}'")]
    InvalidTimestamp { value: String },

    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// Parses the NUL-delimited record lines a data source produces with
/// `git log --pretty='tformat:%H%x00%P%x00%ct'`:
/// commit id, space-separated parent ids, unix timestamp. The parent and
/// timestamp fields may be absent; fields past the third are ignored so
/// richer pretty formats still feed the engine.
///
/// Ids are validated before they reach the layout engine; the engine treats
/// them as opaque, so garbage would otherwise flow through silently.
pub struct RecordParser {
    id_pattern: Regex,
    max_line_length: usize,
}

impl RecordParser {
    pub fn new() -> Result<Self, StreamError> {
        Ok(Self {
            id_pattern: Regex::new(r"^[0-9a-fA-F]{4,64}$")?,
            max_line_length: 4096,
        })
    }

    /// Parse one record line, without its trailing newline.
    pub fn parse_line(&self, line: &str) -> Result<CommitRecord, StreamError> {
        if line.is_empty() {
            return Err(StreamError::EmptyRecord);
        }
        if line.len() > self.max_line_length {
            warn!(length = line.len(), "oversized record line rejected");
            return Err(StreamError::LineTooLong {
                length: line.len(),
                limit: self.max_line_length,
            });
        }

        let mut fields = line.split('\u{0}');
        let id = fields.next().unwrap_or_default().trim();
        self.validate_id(id)?;

        let parents = match fields.next() {
            Some(parent_field) => {
                let mut parents = Vec::new();
                for parent in parent_field.split_whitespace() {
                    self.validate_id(parent)?;
                    parents.push(parent.to_string());
                }
                parents
            }
            None => Vec::new(),
        };

        let when = match fields.next().map(str::trim) {
            Some("") | None => None,
            Some(value) => {
                let seconds: i64 = value
                    .parse()
                    .map_err(|_| StreamError::InvalidTimestamp {
                        value: value.to_string(),
                    })?;
                Some(DateTime::from_timestamp(seconds, 0).ok_or_else(|| {
                    StreamError::InvalidTimestamp {
                        value: value.to_string(),
                    }
                })?)
            }
        };

        Ok(CommitRecord {
            id: id.to_string(),
            parents,
            when,
        })
    }

    fn validate_id(&self, id: &str) -> Result<(), StreamError> {
        if !self.id_pattern.is_match(id) {
            warn!(%id, "rejected malformed commit id");
            return Err(StreamError::InvalidId { id: id.to_string() });
        }
        Ok(())
    }
}
