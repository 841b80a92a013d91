//! Cuesheet layout: header block, cue rows, footer block and pagination.

use cuekit_cue::{LogSink, SpecCue, SpecGenerationOptions};
use rust_decimal::Decimal;

use crate::canvas::SheetCanvas;
use crate::conf::{
    C_FOOTER_EMERGENCY, C_TITLE_CUMULATIVE, C_TITLE_DESCRIPTION, C_TITLE_DIRECTION,
    C_TITLE_INTERVAL, C_TITLE_SINCE_CONTROL, C_TITLE_TURN, N_DISTANCE_WIDE_COLUMN_THRESHOLD,
    N_ROW_HEIGHT_CONTROL, N_ROW_HEIGHT_LEGEND, N_ROW_HEIGHT_REGULAR, N_WIDTH_CUMULATIVE,
    N_WIDTH_CUMULATIVE_WIDE, N_WIDTH_DESCRIPTION, N_WIDTH_NARROW, derive_cuesheet_formats,
    derive_footer_phone_text, derive_turn_code_legend,
};
use crate::spec::{
    CuesheetError, Result, SpecCuesheetColumns, SpecCuesheetFormats, SpecCuesheetLayout,
    SpecSheetHorizontalMerge,
};
use crate::util::{
    convert_decimal_to_f64, derive_cumulative_formula, derive_header_lines,
    plan_cuesheet_columns, prune_page_break_candidates,
};

struct SpecCueRowContext<'a> {
    cue: &'a SpecCue,
    n_idx_cue: usize,
    n_row: usize,
    dist_interval: Decimal,
    dist_since_control: Decimal,
    if_last_row_control: bool,
}

/// Lay `cues` out on `canvas`.
///
/// Cumulative distances are spreadsheet formulas chained through the
/// interval column, so editing one interval recalculates every later row.
/// After a control row the interval carry is rewound, so the next interval
/// is measured from the control point.
pub fn layout_cuesheet(
    cues: &[SpecCue],
    opts: &SpecGenerationOptions,
    canvas: &mut dyn SheetCanvas,
    sink: &mut dyn LogSink,
) -> Result<SpecCuesheetLayout> {
    let Some(cue_last) = cues.last() else {
        return Err(CuesheetError::EmptyCues);
    };
    opts.validate()?;

    let formats = derive_cuesheet_formats(opts.two_decimals_precision);
    let columns = plan_cuesheet_columns(opts);

    let row_title = write_header_block(canvas, &formats, &columns, opts, cue_last.dist)?;
    let row_data_first = row_title + 1;

    let mut dist_since_control = Decimal::ZERO;
    let mut dist_carry = Decimal::ZERO;
    let mut if_last_row_control = false;
    let mut l_page_break_candidates: Vec<usize> = Vec::new();

    for (n_idx_cue, cue) in cues.iter().enumerate() {
        let n_row = row_data_first + n_idx_cue;
        let dist_interval = cue.dist - dist_carry;
        dist_carry = Decimal::ZERO;

        if opts.verbose {
            sink.debug(&format!(
                "cue {n_idx_cue} at {}km {:?}: {dist_interval}km since last",
                cue.dist, cue.description
            ));
        }

        write_cue_row(
            canvas,
            &formats,
            &columns,
            &SpecCueRowContext {
                cue,
                n_idx_cue,
                n_row,
                dist_interval,
                dist_since_control,
                if_last_row_control,
            },
            sink,
        )?;

        if cue.is_control {
            dist_since_control = Decimal::ZERO;
            if_last_row_control = true;
            dist_carry -= dist_interval;
            l_page_break_candidates.push(n_row + 1);
        } else {
            if_last_row_control = false;
            dist_since_control += dist_interval;
            if let Some(&n_row_break_last) = l_page_break_candidates.last()
                && n_row.saturating_sub(n_row_break_last) >= opts.page_break_row_interval
            {
                l_page_break_candidates.push(n_row);
            }
        }

        dist_carry += cue.dist;
    }

    let row_data_last = row_data_first + cues.len() - 1;
    let row_footer_first = row_data_last + 1;
    let row_legend = write_footer_block(canvas, &formats, &columns, opts, row_footer_first)?;

    canvas.set_print_area(0, 0, row_legend, columns.col_last)?;
    let l_page_breaks = prune_page_break_candidates(&l_page_break_candidates);
    if !l_page_breaks.is_empty() {
        canvas.set_page_breaks(&l_page_breaks)?;
    }
    sink.debug(&format!(
        "Page-break candidates {l_page_break_candidates:?}, installed {l_page_breaks:?}"
    ));

    Ok(SpecCuesheetLayout {
        col_last: columns.col_last,
        col_last_letter: columns.col_last_letter,
        row_title,
        row_data_first,
        row_data_last,
        row_footer_first,
        row_legend,
        print_area: (0, 0, row_legend, columns.col_last),
        page_break_candidates: l_page_break_candidates,
        page_breaks: l_page_breaks,
    })
}

fn write_header_block(
    canvas: &mut dyn SheetCanvas,
    formats: &SpecCuesheetFormats,
    columns: &SpecCuesheetColumns,
    opts: &SpecGenerationOptions,
    dist_total: Decimal,
) -> Result<usize> {
    let l_header_lines = derive_header_lines(&opts.event_details);
    for (n_row, c_line) in l_header_lines.iter().enumerate() {
        canvas.merge_range(
            &SpecSheetHorizontalMerge {
                row_idx_start: n_row,
                col_idx_start: 0,
                col_idx_end: columns.col_last,
                text: c_line.to_string(),
            },
            &formats.red_title,
        )?;
    }

    let row_title = l_header_lines.len();
    canvas.write_string(
        row_title,
        columns.col_cumulative,
        C_TITLE_CUMULATIVE,
        &formats.title,
    )?;
    if let Some(col) = columns.col_since_control {
        canvas.write_string(row_title, col, C_TITLE_SINCE_CONTROL, &formats.title)?;
    }
    canvas.write_string(row_title, columns.col_turn, C_TITLE_TURN, &formats.title)?;
    if let Some(col) = columns.col_direction {
        canvas.write_string(row_title, col, C_TITLE_DIRECTION, &formats.title)?;
    }
    canvas.write_string(
        row_title,
        columns.col_description,
        C_TITLE_DESCRIPTION,
        &formats.description_title,
    )?;
    canvas.write_string(
        row_title,
        columns.col_interval,
        C_TITLE_INTERVAL,
        &formats.title,
    )?;

    let n_width_cumulative = if dist_total > Decimal::from(N_DISTANCE_WIDE_COLUMN_THRESHOLD) {
        N_WIDTH_CUMULATIVE_WIDE
    } else {
        N_WIDTH_CUMULATIVE
    };
    canvas.set_column_width(columns.col_cumulative, n_width_cumulative)?;
    for col in (columns.col_cumulative + 1)..columns.col_description {
        canvas.set_column_width(col, N_WIDTH_NARROW)?;
    }
    canvas.set_column_width(columns.col_description, N_WIDTH_DESCRIPTION)?;
    canvas.set_column_width(columns.col_interval, N_WIDTH_NARROW)?;

    Ok(row_title)
}

fn write_cue_row(
    canvas: &mut dyn SheetCanvas,
    formats: &SpecCuesheetFormats,
    columns: &SpecCuesheetColumns,
    ctx: &SpecCueRowContext<'_>,
    sink: &mut dyn LogSink,
) -> Result<()> {
    let SpecCueRowContext {
        cue,
        n_idx_cue,
        n_row,
        dist_interval,
        dist_since_control,
        if_last_row_control,
    } = *ctx;

    match n_idx_cue {
        0 => canvas.write_blank(n_row, columns.col_cumulative, &formats.dist)?,
        1 => canvas.write_number(n_row, columns.col_cumulative, 0.0, &formats.dist)?,
        _ => {
            // Zero-based `n_row` is the 1-based number of the previous row.
            let n_row_ref = if if_last_row_control && n_idx_cue > 2 {
                n_row - 1
            } else {
                n_row
            };
            canvas.write_formula(
                n_row,
                columns.col_cumulative,
                &derive_cumulative_formula(n_row_ref, &columns.col_last_letter),
                &formats.dist,
            )?;
        }
    }

    if let Some(col) = columns.col_since_control {
        canvas.write_number(
            n_row,
            col,
            convert_decimal_to_f64(dist_since_control)?,
            &formats.dist_since,
        )?;
    }

    if cue.is_control {
        sink.info(&format!(
            "Writing control at row {n_row}: {:?}",
            cue.description
        ));

        canvas.write_blank(n_row, columns.col_turn, &formats.arial_12_no_border)?;
        if let Some(col) = columns.col_direction {
            canvas.write_blank(n_row, col, &formats.arial_12)?;
        }
        if n_idx_cue == 0 {
            canvas.merge_range(
                &SpecSheetHorizontalMerge {
                    row_idx_start: n_row,
                    col_idx_start: columns.col_cumulative,
                    col_idx_end: columns.col_description - 1,
                    text: String::new(),
                },
                &formats.arial_12,
            )?;
        }
        canvas.write_string(
            n_row,
            columns.col_description,
            &cue.description,
            &formats.control,
        )?;
        canvas.write_blank(n_row, columns.col_interval, &formats.arial_12)?;
        canvas.set_row_height(n_row, N_ROW_HEIGHT_CONTROL)?;
        return Ok(());
    }

    let (fmt_turn, fmt_description) = if cue.is_danger {
        (&formats.danger, &formats.danger)
    } else {
        (&formats.arial_12, &formats.cue)
    };
    canvas.write_string(n_row, columns.col_turn, cue.turn.as_code(), fmt_turn)?;
    if let Some(col) = columns.col_direction {
        canvas.write_blank(n_row, col, &formats.arial_12)?;
    }
    canvas.write_string(
        n_row,
        columns.col_description,
        &cue.description,
        fmt_description,
    )?;
    canvas.write_number(
        n_row,
        columns.col_interval,
        convert_decimal_to_f64(dist_interval)?,
        &formats.dist,
    )?;
    canvas.set_row_height(n_row, N_ROW_HEIGHT_REGULAR)?;
    Ok(())
}

fn write_footer_block(
    canvas: &mut dyn SheetCanvas,
    formats: &SpecCuesheetFormats,
    columns: &SpecCuesheetColumns,
    opts: &SpecGenerationOptions,
    row_footer_first: usize,
) -> Result<usize> {
    let row_legend = row_footer_first + 3;
    let l_footer_lines = [
        (row_footer_first, C_FOOTER_EMERGENCY.to_string()),
        (
            row_footer_first + 1,
            derive_footer_phone_text(&opts.event_details.organizer_phone),
        ),
        // one spacer row above the legend
        (row_legend, derive_turn_code_legend()),
    ];
    for (n_row, c_line) in l_footer_lines {
        canvas.merge_range(
            &SpecSheetHorizontalMerge {
                row_idx_start: n_row,
                col_idx_start: 0,
                col_idx_end: columns.col_last,
                text: c_line,
            },
            &formats.black_title,
        )?;
    }

    canvas.set_row_height(row_legend, N_ROW_HEIGHT_LEGEND)?;
    Ok(row_legend)
}
