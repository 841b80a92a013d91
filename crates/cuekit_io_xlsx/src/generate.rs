//! Route rows to a finished cuesheet workbook.

use std::path::Path;

use cuekit_cue::{LogSink, SpecCue, SpecGenerationOptions, SpecRouteRow, parse_route_rows};

use crate::spec::{CuesheetError, Result, SpecCuesheetLayout};
use crate::writer::CuesheetWriter;

/// Parse `rows`, lay them out and save the workbook to `path_file_out`.
///
/// Nothing is written when parsing or layout fails.
pub fn generate_cuesheet(
    path_file_out: &Path,
    rows: &[SpecRouteRow],
    opts: &SpecGenerationOptions,
    sink: &mut dyn LogSink,
) -> Result<SpecCuesheetLayout> {
    let l_cues = derive_cues(rows, opts, sink)?;

    let mut writer = CuesheetWriter::new(path_file_out);
    let layout = match writer.write_cues(&l_cues, opts, sink) {
        Ok(layout) => layout,
        Err(err) => {
            writer.abandon();
            return Err(err);
        }
    };
    writer.close()?;

    sink.info(&format!(
        "Wrote {} cues to {}",
        l_cues.len(),
        writer.file_out().display()
    ));
    Ok(layout)
}

/// Same as [`generate_cuesheet`], returning the workbook bytes instead.
pub fn render_cuesheet_bytes(
    rows: &[SpecRouteRow],
    opts: &SpecGenerationOptions,
    sink: &mut dyn LogSink,
) -> Result<(Vec<u8>, SpecCuesheetLayout)> {
    let l_cues = derive_cues(rows, opts, sink)?;

    let mut writer = CuesheetWriter::new("");
    let layout = writer.write_cues(&l_cues, opts, sink)?;
    let bytes = writer.save_to_buffer()?;
    writer.abandon();
    Ok((bytes, layout))
}

fn derive_cues(
    rows: &[SpecRouteRow],
    opts: &SpecGenerationOptions,
    sink: &mut dyn LogSink,
) -> Result<Vec<SpecCue>> {
    opts.validate()?;
    let l_cues = parse_route_rows(rows, opts, sink)?;
    if l_cues.is_empty() {
        return Err(CuesheetError::EmptyCues);
    }
    Ok(l_cues)
}

#[cfg(test)]
mod tests {
    use cuekit_cue::{CueError, MemoryLogSink};
    use log::Level;

    use super::*;

    #[test]
    fn render_returns_xlsx_bytes_and_layout() {
        let l_rows = vec![
            SpecRouteRow::from(["Start", "Start of route", "0", "0", ""]),
            SpecRouteRow::from(["End", "End of route", "10.0", "50.0", ""]),
        ];
        let mut sink = MemoryLogSink::default();
        let (bytes, layout) =
            render_cuesheet_bytes(&l_rows, &SpecGenerationOptions::default(), &mut sink)
                .expect("render");

        assert_eq!(&bytes[..2], b"PK");
        assert_eq!(layout.row_data_first, 6);
        assert_eq!(layout.row_data_last, 7);
        assert_eq!(layout.row_legend, 11);
        assert_eq!(layout.print_area, (0, 0, 11, 4));
        assert_eq!(sink.messages_at(Level::Info).len(), 2);
    }

    #[test]
    fn render_rejects_empty_rows() {
        let err = render_cuesheet_bytes(
            &[],
            &SpecGenerationOptions::default(),
            &mut MemoryLogSink::default(),
        )
        .expect_err("empty rows");
        assert!(matches!(err, CuesheetError::EmptyCues));
    }

    #[test]
    fn render_propagates_distance_errors() {
        let l_rows = vec![
            SpecRouteRow::from(["Start", "Start of route", "0", "0", ""]),
            SpecRouteRow::from(["Left", "Turn left onto A", "abc", "0", ""]),
        ];
        let err = render_cuesheet_bytes(
            &l_rows,
            &SpecGenerationOptions::default(),
            &mut MemoryLogSink::default(),
        )
        .expect_err("bad distance");
        assert!(matches!(
            err,
            CuesheetError::Cue(CueError::InvalidDistance { row: 1, .. })
        ));
    }
}
