use std::fs;
use std::io::Write;

use cuekit_cue::{MemoryLogSink, SpecGenerationOptions, SpecRouteRow, read_route_table};
use cuekit_io_xlsx::{CuesheetError, generate_cuesheet};
use tempfile::tempdir;

#[test]
fn generate_cuesheet_writes_workbook_from_csv() {
    let dir = tempdir().expect("tempdir");
    let path_csv = dir.path().join("route.csv");
    let mut file = fs::File::create(&path_csv).expect("create csv");
    writeln!(file, "Type,Notes,Distance From Start,Elevation Gain,Description").expect("write");
    writeln!(file, "Start,Start of route,0,0,").expect("write");
    writeln!(file, "Right,Turn right onto River Rd,0.08,2,").expect("write");
    writeln!(file, "Control,Control: Village Store,42.7,310,").expect("write");
    writeln!(file, "Slight Left,Turn slightly left onto Hwy 9,44.1,320,").expect("write");
    writeln!(file, "End,End of route,88.25,600,").expect("write");
    drop(file);

    let l_rows = read_route_table(&path_csv).expect("read csv");
    let path_out = dir.path().join("route_cues.xlsx");
    let mut sink = MemoryLogSink::default();
    let layout = generate_cuesheet(
        &path_out,
        &l_rows,
        &SpecGenerationOptions::default(),
        &mut sink,
    )
    .expect("generate");

    let bytes = fs::read(&path_out).expect("read xlsx");
    assert!(!bytes.is_empty());
    assert_eq!(&bytes[..2], b"PK");
    assert_eq!(layout.row_data_last - layout.row_data_first + 1, 5);
    assert!(
        sink.records
            .iter()
            .any(|(_, msg)| msg.starts_with("Wrote 5 cues"))
    );
}

#[test]
fn generate_cuesheet_writes_nothing_for_empty_input() {
    let dir = tempdir().expect("tempdir");
    let path_out = dir.path().join("empty_cues.xlsx");

    let err = generate_cuesheet(
        &path_out,
        &[],
        &SpecGenerationOptions::default(),
        &mut MemoryLogSink::default(),
    )
    .expect_err("empty input");

    assert!(matches!(err, CuesheetError::EmptyCues));
    assert!(!path_out.exists());
}

#[test]
fn generate_cuesheet_writes_nothing_for_invalid_options() {
    let dir = tempdir().expect("tempdir");
    let path_out = dir.path().join("bad_cues.xlsx");
    let l_rows = vec![SpecRouteRow::from(["Start", "Start of route", "0", "0", ""])];
    let opts = SpecGenerationOptions {
        page_break_row_interval: 0,
        ..SpecGenerationOptions::default()
    };

    let err = generate_cuesheet(&path_out, &l_rows, &opts, &mut MemoryLogSink::default())
        .expect_err("zero interval");

    assert!(matches!(err, CuesheetError::Cue(_)));
    assert!(!path_out.exists());
}
