//! Cuesheet format, layout and error models.

use std::path::PathBuf;

use cuekit_cue::CueError;
use rust_xlsxwriter::XlsxError;

////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Fatal layout/write errors.
#[derive(Debug, thiserror::Error)]
pub enum CuesheetError {
    #[error("No cues to lay out: a cuesheet needs at least one cue")]
    EmptyCues,

    #[error("Distance {value} cannot be written as a spreadsheet number")]
    DistanceOutOfRange { value: String },

    #[error("{axis} index overflow: {value}")]
    GridOverflow { axis: &'static str, value: usize },

    #[error("Cuesheet already written to this workbook")]
    SheetAlreadyWritten,

    #[error("Cannot write after close()")]
    WriteAfterClose,

    #[error(
        "Failed to save {}: {source}{}",
        path.display(),
        derive_cleanup_note(.cleanup_error.as_ref())
    )]
    Finalize {
        path: PathBuf,
        #[source]
        source: XlsxError,
        /// Set when the partial output could not be removed.
        cleanup_error: Option<std::io::Error>,
    },

    #[error("xlsx write error: {0}")]
    Xlsx(#[from] XlsxError),

    #[error(transparent)]
    Cue(#[from] CueError),
}

pub type Result<T> = std::result::Result<T, CuesheetError>;

fn derive_cleanup_note(cleanup_error: Option<&std::io::Error>) -> String {
    cleanup_error
        .map(|err| format!(" (partial file left behind: {err})"))
        .unwrap_or_default()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Cell format specification with named optional attributes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SpecCellFormat {
    /// Font family name.
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: Option<i64>,
    /// Bold style.
    pub bold: Option<bool>,

    /// Horizontal alignment.
    pub align: Option<String>,
    /// Vertical alignment.
    pub valign: Option<String>,
    /// Border style for all sides.
    pub border: Option<i64>,
    /// Text wrap.
    pub text_wrap: Option<bool>,
    /// Text rotation in degrees.
    pub rotation: Option<i64>,

    /// Left border color.
    pub left_color: Option<String>,
    /// Right border color.
    pub right_color: Option<String>,

    /// Number format code.
    pub num_format: Option<String>,
    /// Background fill color.
    pub bg_color: Option<String>,
    /// Font color.
    pub font_color: Option<String>,
}

impl SpecCellFormat {
    /// Return a new format by overlaying `patch` onto `self`.
    pub fn with_(&self, patch: SpecCellFormat) -> SpecCellFormat {
        self.merge(&patch)
    }

    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_name: other.font_name.clone().or_else(|| self.font_name.clone()),
            font_size: other.font_size.or(self.font_size),
            bold: other.bold.or(self.bold),
            align: other.align.clone().or_else(|| self.align.clone()),
            valign: other.valign.clone().or_else(|| self.valign.clone()),
            border: other.border.or(self.border),
            text_wrap: other.text_wrap.or(self.text_wrap),
            rotation: other.rotation.or(self.rotation),
            left_color: other.left_color.clone().or_else(|| self.left_color.clone()),
            right_color: other.right_color.clone().or_else(|| self.right_color.clone()),
            num_format: other.num_format.clone().or_else(|| self.num_format.clone()),
            bg_color: other.bg_color.clone().or_else(|| self.bg_color.clone()),
            font_color: other.font_color.clone().or_else(|| self.font_color.clone()),
        }
    }
}

/// Named format presets used by the layout engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecCuesheetFormats {
    /// Rotated column titles.
    pub title: SpecCellFormat,
    /// "Route Description" column title.
    pub description_title: SpecCellFormat,
    /// Control description cell.
    pub control: SpecCellFormat,
    pub arial_12: SpecCellFormat,
    /// Arial 12 with white side borders.
    pub arial_12_no_border: SpecCellFormat,
    /// Cumulative and interval distances.
    pub dist: SpecCellFormat,
    /// Distance since last control.
    pub dist_since: SpecCellFormat,
    /// Regular cue description.
    pub cue: SpecCellFormat,
    /// Header label rows.
    pub red_title: SpecCellFormat,
    /// Footer rows.
    pub black_title: SpecCellFormat,
    /// Hazard turn/description cells.
    pub danger: SpecCellFormat,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetLayoutSpecification

/// Single-row merge item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSheetHorizontalMerge {
    /// Row index where merge is applied.
    pub row_idx_start: usize,
    /// Start column index (inclusive).
    pub col_idx_start: usize,
    /// End column index (inclusive).
    pub col_idx_end: usize,
    /// Merge display text.
    pub text: String,
}

/// Zero-based column positions for one option set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecCuesheetColumns {
    /// Cumulative distance formulas; always column A.
    pub col_cumulative: usize,
    /// Distance since last control, when enabled.
    pub col_since_control: Option<usize>,
    /// Turn code.
    pub col_turn: usize,
    /// Blank direction column, unless hidden.
    pub col_direction: Option<usize>,
    /// Route description.
    pub col_description: usize,
    /// Interval distance.
    pub col_interval: usize,
    /// Always equal to `col_interval`.
    pub col_last: usize,
    /// Spreadsheet letter of `col_last`.
    pub col_last_letter: String,
}

/// Row positions and pagination produced by one layout call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecCuesheetLayout {
    /// Last used column (zero-based) and its letter.
    pub col_last: usize,
    pub col_last_letter: String,
    /// Column-title row.
    pub row_title: usize,
    pub row_data_first: usize,
    pub row_data_last: usize,
    /// Emergency row; the phone row follows it.
    pub row_footer_first: usize,
    /// Turn-code legend row, one spacer row below the phone row; last row
    /// of the print area.
    pub row_legend: usize,
    /// `(first_row, first_col, last_row, last_col)`.
    pub print_area: (usize, usize, usize, usize),
    /// Every candidate recorded while laying out rows.
    pub page_break_candidates: Vec<usize>,
    /// Breaks installed on the worksheet.
    pub page_breaks: Vec<usize>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_right_side_values() {
        let base = SpecCellFormat {
            font_name: Some("Arial".to_string()),
            font_size: Some(8),
            border: Some(1),
            ..Default::default()
        };
        let merged = base.with_(SpecCellFormat {
            font_size: Some(12),
            bold: Some(true),
            ..Default::default()
        });

        assert_eq!(merged.font_name.as_deref(), Some("Arial"));
        assert_eq!(merged.font_size, Some(12));
        assert_eq!(merged.bold, Some(true));
        assert_eq!(merged.border, Some(1));
        assert_eq!(merged.rotation, None);
    }
}
