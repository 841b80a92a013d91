//! Cue parsing constants and default text presets.

use rust_decimal::Decimal;

/// Number of fields in one route-export row.
pub const N_FIELDS_ROUTE_ROW: usize = 5;
/// Rows between forced page-break candidates.
pub const N_DEFAULT_PAGE_BREAK_ROW_INTERVAL: usize = 40;

/// Row types that mark a control by default.
pub const TUP_DEFAULT_CONTROL_CUE_INDICATORS: [&str; 4] = ["Control", "Start", "End", "Summit"];
/// Row type that marks the finish.
pub const C_DEFAULT_END_INDICATOR: &str = "Summit";
/// Replacement for the export's start-of-route description.
pub const C_DEFAULT_START_TEXT: &str = "DÉPART";
/// Replacement for the export's end-of-route description.
pub const C_DEFAULT_END_TEXT: &str = "ARRIVÉE";

/// Description prefix that also marks a control.
pub const C_CONTROL_DESCRIPTION_MARKER: &str = "Control:";
/// Row type (case-insensitive) of hazard annotations.
pub const C_DANGER_ROW_TYPE: &str = "danger";

pub const C_DESCRIPTION_START_OF_ROUTE: &str = "Start of route";
pub const C_DESCRIPTION_END_OF_ROUTE: &str = "End of route";
pub const C_DESCRIPTION_CONTINUE_ONTO: &str = "Continue onto ";

pub const C_DEFAULT_EVENT_NAME: &str = "INSERT NAME OF RIDE";
pub const C_DEFAULT_EVENT_DATE: &str = "Insert date of Ride";
pub const C_DEFAULT_EVENT_ORGANIZER: &str = "Insert name of Ride Organizer";
pub const C_DEFAULT_EVENT_ORGANIZER_PHONE: &str = "** ORGANIZER'S NUMBER **";
pub const C_DEFAULT_EVENT_START_LOCATION: &str = "Insert Start location";
pub const C_DEFAULT_EVENT_FINISH_LOCATION: &str = "Insert Finish location";

/// Second-row distances at or below this value are clamped to zero.
pub fn derive_start_clamp_threshold() -> Decimal {
    Decimal::new(1, 1)
}
