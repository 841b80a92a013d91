//! Layout constants and format preset factory.

use cuekit_cue::EnumTurnCode;

use crate::spec::{SpecCellFormat, SpecCuesheetFormats};

/// Height of control rows, in points.
pub const N_ROW_HEIGHT_CONTROL: f64 = 25.0;
/// Height of regular cue rows, in points.
pub const N_ROW_HEIGHT_REGULAR: f64 = 15.0;
/// Height of the footer legend row.
pub const N_ROW_HEIGHT_LEGEND: f64 = N_ROW_HEIGHT_CONTROL * 2.0;

/// Total route distance above which column A is widened.
pub const N_DISTANCE_WIDE_COLUMN_THRESHOLD: i64 = 1000;
pub const N_WIDTH_CUMULATIVE_WIDE: f64 = 7.5;
pub const N_WIDTH_CUMULATIVE: f64 = 6.5;
pub const N_WIDTH_NARROW: f64 = 5.6;
pub const N_WIDTH_DESCRIPTION: f64 = 39.0;

pub const C_TITLE_CUMULATIVE: &str = "Dist.(cum.)";
pub const C_TITLE_SINCE_CONTROL: &str = "Dist. Since";
pub const C_TITLE_TURN: &str = "Turn";
pub const C_TITLE_DIRECTION: &str = "Direction";
pub const C_TITLE_DESCRIPTION: &str = "Route Description";
pub const C_TITLE_INTERVAL: &str = "Dist.(int.)";

pub const C_FOOTER_EMERGENCY: &str = "IN CASE OF ABANDONMENT OR EMERGENCY";

/// Footer phone line for `phone`.
pub fn derive_footer_phone_text(phone: &str) -> String {
    format!("PHONE: {phone}")
}

/// Legend spelling out every turn code of the fixed vocabulary.
pub fn derive_turn_code_legend() -> String {
    EnumTurnCode::vocabulary()
        .iter()
        .filter_map(|code| {
            code.legend_label()
                .map(|label| format!("{}={label}", code.as_code()))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the named format presets.
///
/// `two_decimals` selects `0.00` over `0.0` for cumulative/interval distances.
pub fn derive_cuesheet_formats(two_decimals: bool) -> SpecCuesheetFormats {
    let cfg_small = SpecCellFormat {
        font_name: Some("Arial".to_string()),
        font_size: Some(8),
        ..Default::default()
    };
    let cfg_arial_12 = SpecCellFormat {
        font_name: Some("Arial".to_string()),
        font_size: Some(12),
        ..Default::default()
    };
    let cfg_centered = SpecCellFormat {
        align: Some("center".to_string()),
        valign: Some("vcenter".to_string()),
        text_wrap: Some(true),
        ..Default::default()
    };
    let cfg_float_top = SpecCellFormat {
        valign: Some("top".to_string()),
        ..Default::default()
    };
    let cfg_all_border = SpecCellFormat {
        border: Some(1),
        ..Default::default()
    };

    let cfg_arial_12_boxed = cfg_arial_12.merge(&cfg_all_border);
    let cfg_arial_12_top = cfg_arial_12_boxed.merge(&cfg_float_top);

    SpecCuesheetFormats {
        title: cfg_small.merge(&cfg_all_border).with_(SpecCellFormat {
            rotation: Some(90),
            ..Default::default()
        }),
        description_title: cfg_small.merge(&cfg_centered).merge(&cfg_all_border),
        control: cfg_arial_12_boxed.merge(&cfg_centered).with_(SpecCellFormat {
            bold: Some(true),
            bg_color: Some("#C0C0C0".to_string()),
            ..Default::default()
        }),
        arial_12: cfg_arial_12_top.clone(),
        arial_12_no_border: cfg_arial_12_boxed.with_(SpecCellFormat {
            left_color: Some("#FFFFFF".to_string()),
            right_color: Some("#FFFFFF".to_string()),
            ..Default::default()
        }),
        dist: cfg_arial_12_top.with_(SpecCellFormat {
            num_format: Some(if two_decimals { "0.00" } else { "0.0" }.to_string()),
            ..Default::default()
        }),
        dist_since: cfg_arial_12_top.with_(SpecCellFormat {
            num_format: Some("0.0".to_string()),
            ..Default::default()
        }),
        cue: cfg_arial_12_top.with_(SpecCellFormat {
            text_wrap: Some(true),
            ..Default::default()
        }),
        red_title: cfg_arial_12.merge(&cfg_centered).with_(SpecCellFormat {
            font_color: Some("#FF0000".to_string()),
            ..Default::default()
        }),
        black_title: cfg_arial_12.merge(&cfg_centered).with_(SpecCellFormat {
            font_color: Some("#000000".to_string()),
            ..Default::default()
        }),
        danger: cfg_arial_12_boxed.with_(SpecCellFormat {
            bold: Some(true),
            text_wrap: Some(true),
            bg_color: Some("#FFD700".to_string()),
            ..Default::default()
        }),
    }
}
