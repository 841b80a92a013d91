//! Stateless helper utilities used by the layout engine.

use cuekit_cue::{SpecEventDetails, SpecGenerationOptions};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::spec::{CuesheetError, Result, SpecCuesheetColumns};

////////////////////////////////////////////////////////////////////////////////
// #region ColumnPlanning

/// Convert zero-based column index to spreadsheet letters (`0 -> A`, `26 -> AA`).
pub fn derive_column_letter(col_idx: usize) -> String {
    let mut l_chars = Vec::new();
    let mut n_rest = col_idx + 1;
    while n_rest > 0 {
        let n_rem = (n_rest - 1) % 26;
        l_chars.push(char::from(b'A' + n_rem as u8));
        n_rest = (n_rest - 1) / 26;
    }
    l_chars.iter().rev().collect()
}

/// Resolve column positions from the option flags.
///
/// Order: cumulative, [since control], turn, [direction], description, interval.
pub fn plan_cuesheet_columns(opts: &SpecGenerationOptions) -> SpecCuesheetColumns {
    let mut n_col = 0usize;
    let mut take_next = || {
        let n_current = n_col;
        n_col += 1;
        n_current
    };

    let col_cumulative = take_next();
    let col_since_control = opts.include_distance_from_last.then(&mut take_next);
    let col_turn = take_next();
    let col_direction = (!opts.hide_direction).then(&mut take_next);
    let col_description = take_next();
    let col_interval = take_next();

    SpecCuesheetColumns {
        col_cumulative,
        col_since_control,
        col_turn,
        col_direction,
        col_description,
        col_interval,
        col_last: col_interval,
        col_last_letter: derive_column_letter(col_interval),
    }
}

/// Header label rows, top to bottom; the finish row is skipped when unset.
pub fn derive_header_lines(event: &SpecEventDetails) -> Vec<&str> {
    let mut l_lines = vec![
        event.name.as_str(),
        event.date.as_str(),
        event.organizer.as_str(),
        event.start_location.as_str(),
    ];
    if let Some(c_finish) = event.finish_location.as_deref() {
        l_lines.push(c_finish);
    }
    l_lines
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RowFormulas

/// Cumulative-distance formula for a data row.
///
/// `row_ref_1based` is the spreadsheet row whose cumulative and interval
/// cells are summed.
pub fn derive_cumulative_formula(row_ref_1based: usize, col_last_letter: &str) -> String {
    format!("=A{row_ref_1based}+{col_last_letter}{row_ref_1based}")
}

/// Drop start/finish candidates; fewer than three candidates yield no breaks.
pub fn prune_page_break_candidates(candidates: &[usize]) -> Vec<usize> {
    if candidates.len() <= 2 {
        return vec![];
    }
    candidates[1..candidates.len() - 1].to_vec()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Conversion

/// Convert an exact decimal to the spreadsheet's number type.
pub fn convert_decimal_to_f64(value: Decimal) -> Result<f64> {
    value
        .to_f64()
        .ok_or_else(|| CuesheetError::DistanceOutOfRange {
            value: value.to_string(),
        })
}

pub fn cast_row_num(value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| CuesheetError::GridOverflow { axis: "row", value })
}

pub fn cast_col_num(value: usize) -> Result<u16> {
    u16::try_from(value).map_err(|_| CuesheetError::GridOverflow {
        axis: "column",
        value,
    })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
