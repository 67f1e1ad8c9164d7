//! End-to-end tests for the record-formatting command.
//! These drive `app::run` with in-memory and file-backed input.

use simple_json_log::app::{run, RunSummary};
use simple_json_log::SimpleJsonFormatter;
use std::io::{BufReader, Cursor, Write};

fn run_on(input: &str, formatter: SimpleJsonFormatter) -> (RunSummary, String) {
    let mut output = Vec::new();
    let summary = run(&formatter, Cursor::new(input), &mut output).unwrap();
    (summary, String::from_utf8(output).unwrap())
}

#[test]
fn formats_each_record_on_its_own_line() {
    let input = concat!(
        r#"{"TimeStamp":"2021-01-01T00:00:00Z","Level":"Information","MessageTemplate":"hello","Properties":{"name":"Bob"}}"#,
        "\n",
        r#"{"TimeStamp":"2021-01-01T12:30:00+01:00","Level":"Error","MessageTemplate":"failed","Exception":"timeout"}"#,
        "\n",
    );

    let (summary, output) = run_on(input, SimpleJsonFormatter::default());

    assert_eq!(summary, RunSummary { formatted: 2, skipped: 0 });
    let lines: Vec<_> = output.lines().collect();
    assert_eq!(
        lines[0],
        r#"{"TimeStamp":"2021-01-01T00:00:00.0000000Z","Level":"Information","MessageTemplate":"hello","Properties":{"name":"Bob"}}"#
    );
    assert_eq!(
        lines[1],
        r#"{"TimeStamp":"2021-01-01T12:30:00.0000000+01:00","Level":"Error","MessageTemplate":"failed","Exception":"timeout"}"#
    );
}

#[test]
fn malformed_and_blank_lines_are_skipped() {
    let input = concat!(
        "not json\n",
        "\n",
        "   \n",
        r#"{"TimeStamp":"2021-01-01T00:00:00Z","Level":"Shouting","MessageTemplate":"x"}"#,
        "\n",
        r#"{"TimeStamp":"2021-01-01T00:00:00Z","Level":"Debug","MessageTemplate":"kept"}"#,
        "\n",
    );

    let (summary, output) = run_on(input, SimpleJsonFormatter::default());

    assert_eq!(summary, RunSummary { formatted: 1, skipped: 2 });
    assert_eq!(output.lines().count(), 1);
    assert!(output.contains(r#""MessageTemplate":"kept""#));
}

#[test]
fn lines_that_are_not_utf8_are_skipped() {
    let mut input = b"\xff\xfe junk\n".to_vec();
    input.extend_from_slice(
        br#"{"TimeStamp":"2021-01-01T00:00:00Z","Level":"Information","MessageTemplate":"after junk"}"#,
    );
    input.extend_from_slice(b"\r\n");

    let mut output = Vec::new();
    let summary = run(&SimpleJsonFormatter::default(), Cursor::new(input), &mut output).unwrap();

    assert_eq!(summary, RunSummary { formatted: 1, skipped: 1 });
    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed["MessageTemplate"], "after junk");
}

#[test]
fn nested_properties_keep_their_order_and_shape() {
    let input = r#"{"TimeStamp":"2021-01-01T00:00:00Z","Level":"Information","MessageTemplate":"order","Properties":{"Zone":"eu","Order":{"$typeTag":"Order","Id":7,"Total":12.5,"Paid":false,"Lines":["a","b"]},"Note":null}}"#;

    let (_, output) = run_on(input, SimpleJsonFormatter::default());

    assert!(output.ends_with(
        "\"Properties\":{\"Zone\":\"eu\",\"Order\":{\"$typeTag\":\"Order\",\"Id\":7,\"Total\":12.5,\"Paid\":\"false\",\"Lines\":[\"a\",\"b\",]},\"Note\":null}}\n"
    ));
}

#[test]
fn omitted_enclosing_object_can_be_spliced() {
    let input = r#"{"TimeStamp":"2021-01-01T00:00:00Z","Level":"Warning","MessageTemplate":"w","Properties":{"n":1}}"#;

    let (_, output) = run_on(input, SimpleJsonFormatter::new(true));

    let line = output.trim_end();
    assert!(!line.starts_with('{'));
    let spliced = format!("{{\"App\":\"svc\",{}}}", line);
    let parsed: serde_json::Value = serde_json::from_str(&spliced).unwrap();
    assert_eq!(parsed["App"], "svc");
    assert_eq!(parsed["Level"], "Warning");
    assert_eq!(parsed["Properties"]["n"], 1);
}

#[test]
fn reads_records_from_a_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"{{"TimeStamp":"2021-01-01T00:00:00Z","Level":"Fatal","MessageTemplate":"from file"}}"#
    )
    .unwrap();

    let reader = BufReader::new(std::fs::File::open(file.path()).unwrap());
    let mut output = Vec::new();
    let summary = run(&SimpleJsonFormatter::default(), reader, &mut output).unwrap();

    assert_eq!(summary.formatted, 1);
    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed["Level"], "Fatal");
    assert_eq!(parsed["MessageTemplate"], "from file");
}
