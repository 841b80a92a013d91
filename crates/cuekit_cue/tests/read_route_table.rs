use std::path::Path;

use cuekit_cue::{
    CueError, MemoryLogSink, SpecGenerationOptions, parse_route_rows, read_route_table,
};

fn write_text(path: &Path, txt: &str) {
    std::fs::write(path, txt).expect("write text");
}

#[test]
fn read_and_parse_route_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path_csv = tmp.path().join("route.csv");
    write_text(
        &path_csv,
        "Type,Notes,Distance From Start,Elevation,Description\n\
         Start,Start of route,0,0,\n\
         Right,Turn right onto Test St,0.04,10.0,\n\
         Left,Turn left onto Main St,2.0,15.0,\n\
         Food,Cafe,5.0,20.0,\n\
         Control,Control: Town Hall,10.0,25.0,\n\
         Straight,Continue onto Hwy 7,15.0,25.0,\n\
         End,End of route,20.0,30.0,\n",
    );

    let l_rows = read_route_table(&path_csv).expect("read route table");
    assert_eq!(l_rows.len(), 7);

    let mut sink = MemoryLogSink::default();
    let l_cues = parse_route_rows(&l_rows, &SpecGenerationOptions::default(), &mut sink)
        .expect("parse route");

    assert_eq!(l_cues.len(), 7);
    assert_eq!(l_cues[0].dist.to_string(), "0");
    assert_eq!(l_cues[4].description, "Town Hall");
    assert!(l_cues[4].is_control);
    assert_eq!(l_cues[5].description, "Hwy 7");
    assert_eq!(l_cues[5].turn.as_code(), "CO");
}

#[test]
fn read_missing_file_reports_path() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path_csv = tmp.path().join("missing.csv");

    let err = read_route_table(&path_csv).expect_err("missing file");
    match err {
        CueError::ReadInput { path, source } => {
            assert_eq!(path, path_csv);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn read_directory_is_not_a_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let err = read_route_table(tmp.path()).expect_err("directory");
    assert!(matches!(err, CueError::NotAFile(_)));
}
