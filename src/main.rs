use anyhow::Result;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use gitdag::{DagLayout, RecordParser};

/// Reads commit records from stdin, one per line, and writes one JSON layout
/// directive per line to stdout, followed by a summary object at EOF.
///
/// The expected input is what the surrounding application would pipe in:
///
/// ```text
/// git log --pretty='tformat:%H%x00%P%x00%ct' | gitdag
/// ```
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let parser = RecordParser::new()?;
    let mut layout = DagLayout::new();

    let mut lines = BufReader::new(io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let record = match parser.parse_line(line.trim_end()) {
            Ok(record) => record,
            Err(e) => {
                warn!("skipping malformed record: {}", e);
                continue;
            }
        };
        let step = layout.process_commit(&record)?;
        println!("{}", serde_json::to_string(&step)?);
    }

    let summary = layout.finalize()?;
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}
