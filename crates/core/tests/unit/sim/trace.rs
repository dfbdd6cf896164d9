//! Trace Parsing Tests.

use std::io::Write;

use hawkeye_core::common::TraceError;
use hawkeye_core::sim::trace::{TraceRecord, load, parse};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::NamedTempFile;

const SAMPLE: &str = "\
# addr          pc
0x7ffd1000      0x400a10

4096            0x400a10   # decimal address
0X40 64
";

#[test]
fn parses_hex_decimal_and_comments() {
    let records = parse(SAMPLE).unwrap();
    assert_eq!(
        records,
        vec![
            TraceRecord { addr: 0x7ffd_1000, pc: 0x0040_0a10 },
            TraceRecord { addr: 4096, pc: 0x0040_0a10 },
            TraceRecord { addr: 0x40, pc: 64 },
        ]
    );
}

#[test]
fn empty_text_is_an_empty_trace() {
    assert!(parse("").unwrap().is_empty());
    assert!(parse("# nothing\n\n   \n").unwrap().is_empty());
}

#[rstest]
#[case("0x10\n", 1)]
#[case("0x10 0x20\n0x10 0x20 0x30\n", 2)]
#[case("# header\n0xzz 0x20\n", 2)]
#[case("1 2\n\n3 -4\n", 3)]
#[case("1 0x\n", 1)]
fn malformed_lines_report_line_number(#[case] text: &str, #[case] expected: usize) {
    let err = parse(text).unwrap_err();
    match err {
        TraceError::Parse { line, .. } => assert_eq!(line, expected),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn loads_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SAMPLE.as_bytes()).unwrap();
    file.flush().unwrap();

    let records = load(file.path()).unwrap();
    assert_eq!(records.len(), 3);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load(dir.path().join("absent.trace")).unwrap_err();
    assert!(matches!(err, TraceError::Io(_)));
}
