use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use cuekit_cue::{LogSink, SpecCue, SpecGenerationOptions};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};

use crate::canvas::SheetCanvas;
use crate::layout::layout_cuesheet;
use crate::spec::{
    CuesheetError, Result, SpecCellFormat, SpecCuesheetLayout, SpecSheetHorizontalMerge,
};
use crate::util::{cast_col_num, cast_row_num};

////////////////////////////////////////////////////////////////////////////////
// #region XlsxCanvas

/// [`SheetCanvas`] over one `rust_xlsxwriter` worksheet.
///
/// Each distinct [`SpecCellFormat`] is converted to a `Format` once.
pub struct XlsxSheetCanvas<'a> {
    worksheet: &'a mut Worksheet,
    dict_formats: BTreeMap<SpecCellFormat, Format>,
}

impl<'a> XlsxSheetCanvas<'a> {
    pub fn new(worksheet: &'a mut Worksheet) -> Self {
        Self {
            worksheet,
            dict_formats: BTreeMap::new(),
        }
    }

    fn resolve(&mut self, spec: &SpecCellFormat) -> (&mut Worksheet, &Format) {
        let format = self
            .dict_formats
            .entry(spec.clone())
            .or_insert_with(|| derive_rust_xlsx_format(spec));
        (&mut *self.worksheet, format)
    }
}

impl SheetCanvas for XlsxSheetCanvas<'_> {
    fn write_string(
        &mut self,
        row: usize,
        col: usize,
        text: &str,
        format: &SpecCellFormat,
    ) -> Result<()> {
        if text.is_empty() {
            return self.write_blank(row, col, format);
        }
        let (worksheet, fmt) = self.resolve(format);
        worksheet.write_string_with_format(cast_row_num(row)?, cast_col_num(col)?, text, fmt)?;
        Ok(())
    }

    fn write_number(
        &mut self,
        row: usize,
        col: usize,
        value: f64,
        format: &SpecCellFormat,
    ) -> Result<()> {
        let (worksheet, fmt) = self.resolve(format);
        worksheet.write_number_with_format(cast_row_num(row)?, cast_col_num(col)?, value, fmt)?;
        Ok(())
    }

    fn write_formula(
        &mut self,
        row: usize,
        col: usize,
        formula: &str,
        format: &SpecCellFormat,
    ) -> Result<()> {
        let (worksheet, fmt) = self.resolve(format);
        worksheet.write_formula_with_format(
            cast_row_num(row)?,
            cast_col_num(col)?,
            formula,
            fmt,
        )?;
        Ok(())
    }

    fn write_blank(&mut self, row: usize, col: usize, format: &SpecCellFormat) -> Result<()> {
        let (worksheet, fmt) = self.resolve(format);
        worksheet.write_blank(cast_row_num(row)?, cast_col_num(col)?, fmt)?;
        Ok(())
    }

    fn merge_range(
        &mut self,
        merge: &SpecSheetHorizontalMerge,
        format: &SpecCellFormat,
    ) -> Result<()> {
        let row = cast_row_num(merge.row_idx_start)?;
        let col_start = cast_col_num(merge.col_idx_start)?;
        let col_end = cast_col_num(merge.col_idx_end)?;
        let (worksheet, fmt) = self.resolve(format);
        worksheet.merge_range(row, col_start, row, col_end, &merge.text, fmt)?;
        Ok(())
    }

    fn set_row_height(&mut self, row: usize, height: f64) -> Result<()> {
        self.worksheet.set_row_height(cast_row_num(row)?, height)?;
        Ok(())
    }

    fn set_column_width(&mut self, col: usize, width: f64) -> Result<()> {
        self.worksheet.set_column_width(cast_col_num(col)?, width)?;
        Ok(())
    }

    fn set_print_area(
        &mut self,
        first_row: usize,
        first_col: usize,
        last_row: usize,
        last_col: usize,
    ) -> Result<()> {
        self.worksheet.set_print_area(
            cast_row_num(first_row)?,
            cast_col_num(first_col)?,
            cast_row_num(last_row)?,
            cast_col_num(last_col)?,
        )?;
        Ok(())
    }

    fn set_page_breaks(&mut self, rows: &[usize]) -> Result<()> {
        let l_rows = rows
            .iter()
            .map(|&row| cast_row_num(row))
            .collect::<Result<Vec<_>>>()?;
        self.worksheet.set_page_breaks(&l_rows)?;
        Ok(())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Workbook

/// Single-sheet cuesheet workbook bound to an output path.
pub struct CuesheetWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    if_written: bool,
    if_closed: bool,
}

impl CuesheetWriter {
    /// Create writer bound to `path_file_out`.
    ///
    /// The workbook is buffered in memory until [`Self::close`] is called,
    /// so nothing touches the filesystem before then.
    pub fn new(path_file_out: impl Into<PathBuf>) -> Self {
        Self {
            path_file_out: path_file_out.into(),
            workbook: Workbook::new(),
            if_written: false,
            if_closed: false,
        }
    }

    pub fn file_out(&self) -> &Path {
        &self.path_file_out
    }

    /// Lay `cues` out on a fresh worksheet.
    pub fn write_cues(
        &mut self,
        cues: &[SpecCue],
        opts: &SpecGenerationOptions,
        sink: &mut dyn LogSink,
    ) -> Result<SpecCuesheetLayout> {
        if self.if_closed {
            return Err(CuesheetError::WriteAfterClose);
        }
        if self.if_written {
            return Err(CuesheetError::SheetAlreadyWritten);
        }
        self.if_written = true;

        let worksheet = self.workbook.add_worksheet();
        let mut canvas = XlsxSheetCanvas::new(worksheet);
        layout_cuesheet(cues, opts, &mut canvas, sink)
    }

    /// Serialize the workbook without touching the output path.
    pub fn save_to_buffer(&mut self) -> Result<Vec<u8>> {
        if self.if_closed {
            return Err(CuesheetError::WriteAfterClose);
        }
        Ok(self.workbook.save_to_buffer()?)
    }

    /// Flush workbook to disk. Idempotent.
    ///
    /// A failed save removes whatever partial file it left behind.
    pub fn close(&mut self) -> Result<()> {
        if self.if_closed {
            return Ok(());
        }
        if let Err(source) = self.workbook.save(&self.path_file_out) {
            return Err(CuesheetError::Finalize {
                path: self.path_file_out.clone(),
                source,
                cleanup_error: remove_partial_file(&self.path_file_out),
            });
        }
        self.if_closed = true;
        Ok(())
    }

    /// Close without saving.
    pub fn abandon(&mut self) {
        self.if_closed = true;
    }
}

/// Remove a file left by a failed save; returns the removal failure, if any.
fn remove_partial_file(path: &Path) -> Option<io::Error> {
    if !path.is_file() {
        return None;
    }
    fs::remove_file(path).err()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region FormatConversion

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if let Some(val) = &spec.font_name {
        format = format.set_font_name(val.clone());
    }
    if let Some(val) = spec.font_size {
        format = format.set_font_size(val as f64);
    }
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }

    for val in [&spec.align, &spec.valign].into_iter().flatten() {
        if let Some(align) = derive_format_align(val) {
            format = format.set_align(align);
        }
    }
    if let Some(val) = spec.rotation
        && let Ok(rotation) = i16::try_from(val)
    {
        format = format.set_rotation(rotation);
    }

    if let Some(val) = &spec.num_format {
        format = format.set_num_format(val.clone());
    }
    if let Some(val) = &spec.bg_color {
        format = format.set_background_color(val.as_str());
    }
    if let Some(val) = &spec.font_color {
        format = format.set_font_color(val.as_str());
    }

    if let Some(val) = spec.border {
        format = format.set_border(derive_format_border(val));
    }
    if let Some(val) = &spec.left_color {
        format = format.set_border_left_color(val.as_str());
    }
    if let Some(val) = &spec.right_color {
        format = format.set_border_right_color(val.as_str());
    }

    if spec.text_wrap.unwrap_or(false) {
        format = format.set_text_wrap();
    }

    format
}

fn derive_format_border(border: i64) -> FormatBorder {
    match border {
        1 => FormatBorder::Thin,
        _ => FormatBorder::None,
    }
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    match align.trim().to_ascii_lowercase().as_str() {
        "center" => Some(FormatAlign::Center),
        "top" => Some(FormatAlign::Top),
        "vcenter" | "vertical_center" => Some(FormatAlign::VerticalCenter),
        _ => None,
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use cuekit_cue::{MemoryLogSink, SpecRouteRow, parse_route_rows};
    use tempfile::tempdir;

    use super::*;
    use crate::conf::derive_cuesheet_formats;

    fn sample_cues() -> Vec<SpecCue> {
        let l_rows: Vec<SpecRouteRow> = [
            ["Start", "Start of route", "0", "0", ""],
            ["Left", "Turn left onto Main St", "0.04", "0", ""],
            ["Control", "Control: Bakery", "12.4", "0", ""],
            ["Right", "Turn right onto Hill Rd", "15", "0", ""],
            ["End", "End of route", "30.2", "0", ""],
        ]
        .into_iter()
        .map(SpecRouteRow::from)
        .collect();
        parse_route_rows(
            &l_rows,
            &SpecGenerationOptions::default(),
            &mut MemoryLogSink::default(),
        )
        .expect("parse rows")
    }

    #[test]
    fn writer_saves_xlsx_archive() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("route_cues.xlsx");
        let mut writer = CuesheetWriter::new(&path);

        let layout = writer
            .write_cues(
                &sample_cues(),
                &SpecGenerationOptions::default(),
                &mut MemoryLogSink::default(),
            )
            .expect("write cues");
        assert!(!path.exists());
        writer.close().expect("close");

        assert_eq!(layout.row_data_first, 6);
        let bytes = fs::read(&path).expect("read output");
        assert!(!bytes.is_empty());
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn writer_close_is_idempotent_and_blocks_writes() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("out.xlsx");
        let mut writer = CuesheetWriter::new(&path);
        let opts = SpecGenerationOptions::default();

        writer
            .write_cues(&sample_cues(), &opts, &mut MemoryLogSink::default())
            .expect("write cues");
        writer.close().expect("first close");
        writer.close().expect("second close");

        let err = writer
            .write_cues(&sample_cues(), &opts, &mut MemoryLogSink::default())
            .expect_err("write after close");
        assert!(matches!(err, CuesheetError::WriteAfterClose));
    }

    #[test]
    fn writer_rejects_second_sheet() {
        let mut writer = CuesheetWriter::new("unused.xlsx");
        let opts = SpecGenerationOptions::default();
        writer
            .write_cues(&sample_cues(), &opts, &mut MemoryLogSink::default())
            .expect("write cues");

        let err = writer
            .write_cues(&sample_cues(), &opts, &mut MemoryLogSink::default())
            .expect_err("second write");
        assert!(matches!(err, CuesheetError::SheetAlreadyWritten));
        writer.abandon();
    }

    #[test]
    fn writer_reports_failed_save_without_leaving_file() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("out.xlsx");
        let mut writer = CuesheetWriter::new(&path);
        writer
            .write_cues(
                &sample_cues(),
                &SpecGenerationOptions::default(),
                &mut MemoryLogSink::default(),
            )
            .expect("write cues");

        let err = writer.close().expect_err("missing parent directory");
        assert!(matches!(
            err,
            CuesheetError::Finalize {
                cleanup_error: None,
                ..
            }
        ));
        assert!(!path.exists());
        assert!(!err.to_string().contains("partial file"));
    }

    #[test]
    fn writer_renders_to_buffer() {
        let mut writer = CuesheetWriter::new("unused.xlsx");
        writer
            .write_cues(
                &sample_cues(),
                &SpecGenerationOptions::default(),
                &mut MemoryLogSink::default(),
            )
            .expect("write cues");
        let bytes = writer.save_to_buffer().expect("buffer");
        assert_eq!(&bytes[..2], b"PK");
        writer.abandon();
        assert!(!Path::new("unused.xlsx").exists());
    }

    #[test]
    fn partial_file_is_removed() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("half_written.xlsx");
        fs::write(&path, b"PK\x03\x04").expect("write partial");

        assert!(remove_partial_file(&path).is_none());
        assert!(!path.exists());
        assert!(remove_partial_file(&path).is_none());
    }

    #[test]
    fn partial_file_removal_failure_is_reported() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("out.xlsx");
        let err = CuesheetError::Finalize {
            path: path.clone(),
            source: rust_xlsxwriter::XlsxError::IoError(io::Error::other("disk full")),
            cleanup_error: Some(io::Error::other("busy")),
        };
        let c_msg = err.to_string();
        assert!(c_msg.contains("disk full"));
        assert!(c_msg.contains("partial file left behind: busy"));
    }

    #[test]
    fn canvas_converts_each_format_once() {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        let mut canvas = XlsxSheetCanvas::new(worksheet);
        let formats = derive_cuesheet_formats(true);

        canvas.write_string(0, 0, "A", &formats.cue).expect("write");
        canvas.write_string(1, 0, "B", &formats.cue).expect("write");
        canvas.write_string(2, 0, "", &formats.cue).expect("blank");
        canvas.write_number(0, 1, 1.5, &formats.dist).expect("write");
        assert_eq!(canvas.dict_formats.len(), 2);
    }

    #[test]
    fn format_conversion_applies_highlight_attributes() {
        let spec = SpecCellFormat {
            bold: Some(true),
            bg_color: Some("#C0C0C0".to_string()),
            border: Some(1),
            ..Default::default()
        };
        let expected = Format::new()
            .set_bold()
            .set_background_color("#C0C0C0")
            .set_border(FormatBorder::Thin);
        assert_eq!(derive_rust_xlsx_format(&spec), expected);
    }

    #[test]
    fn align_names_map_to_xlsx_alignment() {
        assert_eq!(derive_format_align(" Center "), Some(FormatAlign::Center));
        assert_eq!(derive_format_align("vcenter"), Some(FormatAlign::VerticalCenter));
        assert_eq!(derive_format_align("diagonal"), None);
        assert_eq!(derive_format_border(1), FormatBorder::Thin);
        assert_eq!(derive_format_border(99), FormatBorder::None);
    }
}
