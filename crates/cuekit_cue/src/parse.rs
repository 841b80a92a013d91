//! Route rows to normalized cues.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::conf::{
    C_CONTROL_DESCRIPTION_MARKER, C_DANGER_ROW_TYPE, C_DESCRIPTION_CONTINUE_ONTO,
    C_DESCRIPTION_END_OF_ROUTE, C_DESCRIPTION_START_OF_ROUTE, derive_start_clamp_threshold,
};
use crate::sink::LogSink;
use crate::spec::{CueError, EnumTurnCode, Result, SpecCue, SpecGenerationOptions, SpecRouteRow};

// The bracket is a character class: only the single character after "to " is
// tested against `( s t a y )`, so "to stay" and "to the" are both kept.
static RE_TURN_TO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Turn (left|right) to [^(stay)]").expect("static turn-to pattern")
});

////////////////////////////////////////////////////////////////////////////////
// #region CueAssembly

/// Parse route rows into cues, preserving length and order.
///
/// Each cue's `dist` is the (clamped) raw distance of the next row; the last
/// cue keeps its own raw distance. Any unparseable or negative distance
/// aborts the whole parse.
pub fn parse_route_rows(
    rows: &[SpecRouteRow],
    opts: &SpecGenerationOptions,
    sink: &mut dyn LogSink,
) -> Result<Vec<SpecCue>> {
    let l_dist_raw = rows
        .iter()
        .enumerate()
        .map(|(n_idx, row)| derive_row_distance(n_idx, row))
        .collect::<Result<Vec<_>>>()?;

    let mut l_cues = Vec::with_capacity(rows.len());
    for (n_idx, row) in rows.iter().enumerate() {
        let n_dist_next = l_dist_raw
            .get(n_idx + 1)
            .copied()
            .unwrap_or(l_dist_raw[n_idx]);
        let cue = read_as_cue(row, n_dist_next, opts);
        if cue.turn.is_passthrough() {
            sink.warn(&format!(
                "Unknown direction {:?} at data row {n_idx}, kept as-is",
                row.cue_type
            ));
        }
        l_cues.push(cue);
    }

    let if_has_end = l_cues.iter().any(|cue| cue.is_end);
    sink.debug(&format!(
        "Parsed {} cues; end marker {:?} {}",
        l_cues.len(),
        opts.end_indicator,
        if if_has_end { "present" } else { "absent" }
    ));

    Ok(l_cues)
}

fn derive_row_distance(n_idx: usize, row: &SpecRouteRow) -> Result<Decimal> {
    let n_dist = parse_distance(n_idx, &row.distance_from_start)?;
    if n_idx == 1 && n_dist <= derive_start_clamp_threshold() {
        return Ok(Decimal::ZERO);
    }
    Ok(n_dist)
}

fn read_as_cue(row: &SpecRouteRow, dist: Decimal, opts: &SpecGenerationOptions) -> SpecCue {
    let is_control = opts.control_cue_indicators.contains(&row.cue_type)
        || row.notes.starts_with(C_CONTROL_DESCRIPTION_MARKER);
    let is_danger = row.cue_type.eq_ignore_ascii_case(C_DANGER_ROW_TYPE);
    let is_end = row.cue_type == opts.end_indicator;

    let description = if is_end {
        map_cue_description(&format!("{}: {}", opts.end_text, row.notes), opts)
    } else {
        map_cue_description(&row.notes, opts)
    };

    SpecCue {
        turn: map_direction(&row.cue_type),
        description,
        dist,
        is_control,
        is_danger,
        is_end,
    }
}

/// Parse one distance field as an exact decimal.
///
/// Accepts surrounding whitespace and scientific notation.
pub fn parse_distance(row: usize, value: &str) -> Result<Decimal> {
    let c_value = value.trim();
    let n_dist = Decimal::from_str(c_value)
        .or_else(|_| Decimal::from_scientific(c_value))
        .map_err(|_| CueError::InvalidDistance {
            row,
            value: value.to_string(),
        })?;
    if n_dist.is_sign_negative() && !n_dist.is_zero() {
        return Err(CueError::NegativeDistance {
            row,
            value: value.to_string(),
        });
    }
    Ok(n_dist)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Mapping

/// Map an export row type to a turn code (case-insensitive).
pub fn map_direction(direction: &str) -> EnumTurnCode {
    match direction.to_lowercase().as_str() {
        "straight" => EnumTurnCode::Continue,
        "left" | "sharp left" => EnumTurnCode::Left,
        "slight left" => EnumTurnCode::BearLeft,
        "right" | "sharp right" => EnumTurnCode::Right,
        "slight right" => EnumTurnCode::BearRight,
        "uturn" => EnumTurnCode::TurnAround,
        "danger" => EnumTurnCode::Danger,
        "generic" | "food" | "start" | "end" | "summit" | "control" => EnumTurnCode::Blank,
        _ => EnumTurnCode::Passthrough(direction.to_string()),
    }
}

/// Rewrite an export description into cuesheet wording. First rule wins.
pub fn map_cue_description(description: &str, opts: &SpecGenerationOptions) -> String {
    if description == C_DESCRIPTION_START_OF_ROUTE {
        return opts.start_text.trim().to_string();
    }
    if description == C_DESCRIPTION_END_OF_ROUTE {
        return opts.end_text.trim().to_string();
    }
    if let Some(rest) = description.strip_prefix(C_DESCRIPTION_CONTINUE_ONTO) {
        return rest.trim().to_string();
    }
    if let Some(rest) = description.strip_prefix(C_CONTROL_DESCRIPTION_MARKER) {
        return rest.trim().to_string();
    }

    for c_direction in ["left", "right"] {
        if let Some(rest) = description.strip_prefix(&format!("Turn {c_direction} onto ")) {
            return rest.trim().to_string();
        }
    }
    if let Some(caps) = RE_TURN_TO.captures(description) {
        let n_len_prefix = format!("Turn {} to ", &caps[1]).len();
        return description[n_len_prefix..].trim().to_string();
    }

    description
        .replace("becomes", "b/c")
        .replace("slightly ", "")
        .trim()
        .to_string()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
