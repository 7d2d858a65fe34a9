//! Record parsing and delivery-driver tests.

use futures::channel::mpsc;
use futures::SinkExt;
use gitdag::stream::drive;
use gitdag::{CommitRecord, DagLayout, LayoutStream, RecordParser};
use pretty_assertions::assert_eq;

/// What `git log --pretty='tformat:%H%x00%P%x00%ct'` produces for a small
/// diamond-shaped history, newest first.
const LOG: &str = "\
dddd0000\u{0}bbbb0000 cccc0000\u{0}1425920400
cccc0000\u{0}aaaa0000\u{0}1425917454
bbbb0000\u{0}aaaa0000\u{0}1425913200
aaaa0000\u{0}\u{0}1425830400";

fn parsed_records() -> Vec<CommitRecord> {
    let parser = RecordParser::new().unwrap();
    LOG.lines()
        .map(|line| parser.parse_line(line).unwrap())
        .collect()
}

#[test]
fn log_lines_flow_through_the_pull_driver() {
    let records = parsed_records();
    let mut stream = LayoutStream::new(records.into_iter());

    let mut columns = Vec::new();
    while let Some(step) = stream.try_next() {
        columns.push(step.unwrap().entry.column);
    }
    assert!(stream.is_complete());
    assert_eq!(columns, vec![1, 2, 1, 1]);
}

#[test]
fn pull_driver_finish_reports_the_run() {
    let records = parsed_records();
    let (layout, summary) = LayoutStream::new(records.into_iter()).finish().unwrap();
    assert_eq!(summary.processed, 4);
    assert_eq!(summary.width, 2);
    assert!(!summary.has_more);
    assert_eq!(layout.entry("aaaa0000").unwrap().row, 3);
}

#[tokio::test]
async fn async_driver_consumes_a_live_channel() {
    let (mut tx, rx) = mpsc::channel::<CommitRecord>(4);

    let feeder = tokio::spawn(async move {
        for record in parsed_records() {
            tx.send(record).await.unwrap();
        }
    });

    let mut layout = DagLayout::new();
    let mut steps = 0;
    let summary = drive(&mut layout, rx, |_step| steps += 1).await.unwrap();
    feeder.await.unwrap();

    assert_eq!(steps, 4);
    assert_eq!(summary.processed, 4);
    assert!(layout.is_finalized());
}

#[test]
fn steps_serialize_for_downstream_consumers() {
    let records = parsed_records();
    let mut layout = DagLayout::new();
    let step = layout.process_commit(&records[0]).unwrap();

    let json: serde_json::Value = serde_json::to_value(&step).unwrap();
    assert_eq!(json["entry"]["id"], "dddd0000");
    assert_eq!(json["entry"]["column"], 1);
    assert_eq!(json["entry"]["row"], 0);
    assert_eq!(json["edges"], serde_json::json!([]));

    // edge shapes use stable snake_case tags on the wire
    layout.process_commit(&records[1]).unwrap();
    let step = layout.process_commit(&records[2]).unwrap();
    let json = serde_json::to_value(&step).unwrap();
    assert_eq!(json["edges"][0]["shape"], "straight");
}
