//! CSV route-table reader.

use std::fs::File;
use std::io;
use std::path::Path;

use csv::ReaderBuilder;

use crate::spec::{CueError, Result, SpecRouteRow};

/// Read a route export from disk.
///
/// The first line is a header and is discarded. Every data row must carry
/// exactly five fields.
pub fn read_route_table<P: AsRef<Path>>(path: P) -> Result<Vec<SpecRouteRow>> {
    let path_file_in = path.as_ref();
    if path_file_in.exists() && !path_file_in.is_file() {
        return Err(CueError::NotAFile(path_file_in.to_path_buf()));
    }

    let file = File::open(path_file_in).map_err(|source| CueError::ReadInput {
        path: path_file_in.to_path_buf(),
        source,
    })?;
    read_route_table_from_reader(file)
}

/// Read a route export from any UTF-8 byte stream.
pub fn read_route_table_from_reader<R: io::Read>(reader: R) -> Result<Vec<SpecRouteRow>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut l_rows = Vec::new();
    for (n_idx, record) in csv_reader.records().enumerate() {
        let record = record?;
        l_rows.push(SpecRouteRow::from_fields(n_idx, record.iter())?);
    }
    Ok(l_rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_discards_header_and_keeps_quoted_commas() {
        let c_csv = "Type,Notes,Distance From Start,Elevation,Description\n\
                     Start,\"Start of route, here\",0,0,\n\
                     Right,\"Turn right, carefully\",1.5,12.0,\"x, y\"\n";
        let l_rows = read_route_table_from_reader(c_csv.as_bytes()).expect("read csv");

        assert_eq!(l_rows.len(), 2);
        assert_eq!(
            l_rows[0],
            SpecRouteRow::from(["Start", "Start of route, here", "0", "0", ""])
        );
        assert_eq!(l_rows[1].notes, "Turn right, carefully");
        assert_eq!(l_rows[1].extra_description, "x, y");
    }

    #[test]
    fn reader_rejects_wrong_field_count() {
        let c_csv = "Type,Notes,Distance,Elevation,Description\n\
                     Start,Start of route,0,0,\n\
                     Right,Turn right,1.5\n";
        let err = read_route_table_from_reader(c_csv.as_bytes()).expect_err("short row");
        assert!(matches!(
            err,
            CueError::RowShape {
                row: 1,
                expected: 5,
                found: 3
            }
        ));
    }

    #[test]
    fn reader_header_only_is_empty() {
        let l_rows =
            read_route_table_from_reader("Type,Notes,Distance,Elevation,Description\n".as_bytes())
                .expect("read csv");
        assert!(l_rows.is_empty());
    }
}
