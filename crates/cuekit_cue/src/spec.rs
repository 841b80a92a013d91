//! Route row, cue and generation option models.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use rust_decimal::Decimal;

use crate::conf::{
    C_DEFAULT_END_INDICATOR, C_DEFAULT_END_TEXT, C_DEFAULT_EVENT_DATE,
    C_DEFAULT_EVENT_FINISH_LOCATION, C_DEFAULT_EVENT_NAME, C_DEFAULT_EVENT_ORGANIZER,
    C_DEFAULT_EVENT_ORGANIZER_PHONE, C_DEFAULT_EVENT_START_LOCATION, C_DEFAULT_START_TEXT,
    N_DEFAULT_PAGE_BREAK_ROW_INTERVAL, N_FIELDS_ROUTE_ROW, TUP_DEFAULT_CONTROL_CUE_INDICATORS,
};

////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Fatal parsing/reading errors.
#[derive(Debug, thiserror::Error)]
pub enum CueError {
    #[error("Invalid distance {value:?} at data row {row}")]
    InvalidDistance { row: usize, value: String },

    #[error("Negative distance {value:?} at data row {row}")]
    NegativeDistance { row: usize, value: String },

    #[error("Data row {row} has {found} fields, expected {expected}")]
    RowShape {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid generation option: {0}")]
    InvalidOption(String),

    #[error("Path is not a file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, CueError>;

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RouteRow

/// One data row of a route export: `type, notes, distance, elevation, description`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecRouteRow {
    /// Cue type as exported (`Left`, `Control`, `Summit`, ...).
    pub cue_type: String,
    /// Instruction text.
    pub notes: String,
    /// Cumulative distance from the start, as text.
    pub distance_from_start: String,
    /// Elevation, carried but unused.
    pub elevation: String,
    /// Free-form extra description, carried but unused.
    pub extra_description: String,
}

impl SpecRouteRow {
    /// Build a row from exactly [`N_FIELDS_ROUTE_ROW`] fields.
    pub fn from_fields<I, S>(row: usize, fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let l_fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        let n_found = l_fields.len();
        let Ok([cue_type, notes, distance_from_start, elevation, extra_description]) =
            <[String; N_FIELDS_ROUTE_ROW]>::try_from(l_fields)
        else {
            return Err(CueError::RowShape {
                row,
                expected: N_FIELDS_ROUTE_ROW,
                found: n_found,
            });
        };

        Ok(Self {
            cue_type,
            notes,
            distance_from_start,
            elevation,
            extra_description,
        })
    }
}

impl From<[&str; N_FIELDS_ROUTE_ROW]> for SpecRouteRow {
    fn from(fields: [&str; N_FIELDS_ROUTE_ROW]) -> Self {
        let [cue_type, notes, distance_from_start, elevation, extra_description] = fields;
        Self {
            cue_type: cue_type.to_string(),
            notes: notes.to_string(),
            distance_from_start: distance_from_start.to_string(),
            elevation: elevation.to_string(),
            extra_description: extra_description.to_string(),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Cue

/// Short turn code printed in the cuesheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EnumTurnCode {
    /// `CO`
    Continue,
    /// `L`
    Left,
    /// `BL`
    BearLeft,
    /// `R`
    Right,
    /// `BR`
    BearRight,
    /// `TA`
    TurnAround,
    /// `!!`
    Danger,
    /// Empty code for start/finish/control/food/generic rows.
    Blank,
    /// Unrecognized export type, kept verbatim.
    Passthrough(String),
}

impl EnumTurnCode {
    /// Printed code.
    pub fn as_code(&self) -> &str {
        match self {
            Self::Continue => "CO",
            Self::Left => "L",
            Self::BearLeft => "BL",
            Self::Right => "R",
            Self::BearRight => "BR",
            Self::TurnAround => "TA",
            Self::Danger => "!!",
            Self::Blank => "",
            Self::Passthrough(raw) => raw,
        }
    }

    /// Legend label, `None` for codes without a legend entry.
    pub fn legend_label(&self) -> Option<&'static str> {
        match self {
            Self::Continue => Some("Continue On"),
            Self::Left => Some("Left"),
            Self::BearLeft => Some("Bear Left"),
            Self::Right => Some("Right"),
            Self::BearRight => Some("Bear Right"),
            Self::TurnAround => Some("Turn Around"),
            Self::Danger => Some("Danger"),
            Self::Blank | Self::Passthrough(_) => None,
        }
    }

    /// Codes of the fixed vocabulary, in legend order.
    pub fn vocabulary() -> [EnumTurnCode; 7] {
        [
            Self::Continue,
            Self::Left,
            Self::Right,
            Self::BearLeft,
            Self::BearRight,
            Self::TurnAround,
            Self::Danger,
        ]
    }

    pub fn is_passthrough(&self) -> bool {
        matches!(self, Self::Passthrough(_))
    }
}

impl fmt::Display for EnumTurnCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

/// One normalized navigation cue.
///
/// `dist` is the cumulative distance of the *following* export row, i.e. the
/// distance travelled before the next decision point. The last cue carries
/// its own cumulative distance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecCue {
    /// Turn code, or the unrecognized row type passed through.
    pub turn: EnumTurnCode,
    /// Rewritten instruction text.
    pub description: String,
    /// Cumulative distance of the following export row; the last cue keeps its own.
    pub dist: Decimal,
    /// Control/stop row: highlighted, resets the since-control distance.
    pub is_control: bool,
    /// Hazard annotation row.
    pub is_danger: bool,
    /// Designated finish marker.
    pub is_end: bool,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region GenerationOptions

/// Free-text event labels printed in the header and footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecEventDetails {
    pub name: String,
    pub date: String,
    pub organizer: String,
    pub organizer_phone: String,
    pub start_location: String,
    /// Header row is omitted when `None`.
    pub finish_location: Option<String>,
}

impl Default for SpecEventDetails {
    fn default() -> Self {
        Self {
            name: C_DEFAULT_EVENT_NAME.to_string(),
            date: C_DEFAULT_EVENT_DATE.to_string(),
            organizer: C_DEFAULT_EVENT_ORGANIZER.to_string(),
            organizer_phone: C_DEFAULT_EVENT_ORGANIZER_PHONE.to_string(),
            start_location: C_DEFAULT_EVENT_START_LOCATION.to_string(),
            finish_location: Some(C_DEFAULT_EVENT_FINISH_LOCATION.to_string()),
        }
    }
}

/// Options for one cuesheet generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecGenerationOptions {
    /// Add the "distance since last control" column.
    pub include_distance_from_last: bool,
    /// Drop the direction column.
    pub hide_direction: bool,
    /// Render distances with two decimals instead of one.
    pub two_decimals_precision: bool,
    /// Emit one debug trace line per cue.
    pub verbose: bool,
    /// Row types that mark a control.
    pub control_cue_indicators: BTreeSet<String>,
    /// Row type that marks the finish.
    pub end_indicator: String,
    pub start_text: String,
    pub end_text: String,
    /// Regular rows between page-break candidates.
    pub page_break_row_interval: usize,
    pub event_details: SpecEventDetails,
}

impl Default for SpecGenerationOptions {
    fn default() -> Self {
        Self {
            include_distance_from_last: false,
            hide_direction: false,
            two_decimals_precision: true,
            verbose: false,
            control_cue_indicators: TUP_DEFAULT_CONTROL_CUE_INDICATORS
                .iter()
                .map(ToString::to_string)
                .collect(),
            end_indicator: C_DEFAULT_END_INDICATOR.to_string(),
            start_text: C_DEFAULT_START_TEXT.to_string(),
            end_text: C_DEFAULT_END_TEXT.to_string(),
            page_break_row_interval: N_DEFAULT_PAGE_BREAK_ROW_INTERVAL,
            event_details: SpecEventDetails::default(),
        }
    }
}

impl SpecGenerationOptions {
    /// Reject option combinations the layout cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.page_break_row_interval == 0 {
            return Err(CueError::InvalidOption(
                "page_break_row_interval must be >= 1.".to_string(),
            ));
        }
        Ok(())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
