//! Grid-writing capability consumed by the layout engine.

use std::collections::BTreeMap;

use crate::spec::{Result, SpecCellFormat, SpecSheetHorizontalMerge};

/// Zero-based cell writing surface for one worksheet.
pub trait SheetCanvas {
    fn write_string(
        &mut self,
        row: usize,
        col: usize,
        text: &str,
        format: &SpecCellFormat,
    ) -> Result<()>;

    fn write_number(
        &mut self,
        row: usize,
        col: usize,
        value: f64,
        format: &SpecCellFormat,
    ) -> Result<()>;

    fn write_formula(
        &mut self,
        row: usize,
        col: usize,
        formula: &str,
        format: &SpecCellFormat,
    ) -> Result<()>;

    fn write_blank(&mut self, row: usize, col: usize, format: &SpecCellFormat) -> Result<()>;

    fn merge_range(
        &mut self,
        merge: &SpecSheetHorizontalMerge,
        format: &SpecCellFormat,
    ) -> Result<()>;

    fn set_row_height(&mut self, row: usize, height: f64) -> Result<()>;

    fn set_column_width(&mut self, col: usize, width: f64) -> Result<()>;

    fn set_print_area(
        &mut self,
        first_row: usize,
        first_col: usize,
        last_row: usize,
        last_col: usize,
    ) -> Result<()>;

    /// Install horizontal breaks; each break sits above the given row.
    fn set_page_breaks(&mut self, rows: &[usize]) -> Result<()>;
}

/// Value recorded by [`MemoryCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum EnumCanvasValue {
    Blank,
    String(String),
    Number(f64),
    Formula(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpecCanvasCell {
    pub value: EnumCanvasValue,
    pub format: SpecCellFormat,
}

/// Records every canvas call for inspection.
#[derive(Debug, Clone, Default)]
pub struct MemoryCanvas {
    pub cells: BTreeMap<(usize, usize), SpecCanvasCell>,
    pub merges: Vec<(SpecSheetHorizontalMerge, SpecCellFormat)>,
    pub row_heights: BTreeMap<usize, f64>,
    pub col_widths: BTreeMap<usize, f64>,
    pub print_area: Option<(usize, usize, usize, usize)>,
    pub page_breaks: Vec<usize>,
}

impl MemoryCanvas {
    pub fn value_at(&self, row: usize, col: usize) -> Option<&EnumCanvasValue> {
        self.cells.get(&(row, col)).map(|cell| &cell.value)
    }

    pub fn format_at(&self, row: usize, col: usize) -> Option<&SpecCellFormat> {
        self.cells.get(&(row, col)).map(|cell| &cell.format)
    }

    /// Merge anchored at `row`, if any.
    pub fn merge_at_row(&self, row: usize) -> Option<&SpecSheetHorizontalMerge> {
        self.merges
            .iter()
            .map(|(merge, _)| merge)
            .find(|merge| merge.row_idx_start == row)
    }

    fn put(&mut self, row: usize, col: usize, value: EnumCanvasValue, format: &SpecCellFormat) {
        self.cells.insert(
            (row, col),
            SpecCanvasCell {
                value,
                format: format.clone(),
            },
        );
    }
}

impl SheetCanvas for MemoryCanvas {
    fn write_string(
        &mut self,
        row: usize,
        col: usize,
        text: &str,
        format: &SpecCellFormat,
    ) -> Result<()> {
        let value = if text.is_empty() {
            EnumCanvasValue::Blank
        } else {
            EnumCanvasValue::String(text.to_string())
        };
        self.put(row, col, value, format);
        Ok(())
    }

    fn write_number(
        &mut self,
        row: usize,
        col: usize,
        value: f64,
        format: &SpecCellFormat,
    ) -> Result<()> {
        self.put(row, col, EnumCanvasValue::Number(value), format);
        Ok(())
    }

    fn write_formula(
        &mut self,
        row: usize,
        col: usize,
        formula: &str,
        format: &SpecCellFormat,
    ) -> Result<()> {
        self.put(row, col, EnumCanvasValue::Formula(formula.to_string()), format);
        Ok(())
    }

    fn write_blank(&mut self, row: usize, col: usize, format: &SpecCellFormat) -> Result<()> {
        self.put(row, col, EnumCanvasValue::Blank, format);
        Ok(())
    }

    fn merge_range(
        &mut self,
        merge: &SpecSheetHorizontalMerge,
        format: &SpecCellFormat,
    ) -> Result<()> {
        self.write_string(merge.row_idx_start, merge.col_idx_start, &merge.text, format)?;
        for col_idx in (merge.col_idx_start + 1)..=merge.col_idx_end {
            self.put(merge.row_idx_start, col_idx, EnumCanvasValue::Blank, format);
        }
        self.merges.push((merge.clone(), format.clone()));
        Ok(())
    }

    fn set_row_height(&mut self, row: usize, height: f64) -> Result<()> {
        self.row_heights.insert(row, height);
        Ok(())
    }

    fn set_column_width(&mut self, col: usize, width: f64) -> Result<()> {
        self.col_widths.insert(col, width);
        Ok(())
    }

    fn set_print_area(
        &mut self,
        first_row: usize,
        first_col: usize,
        last_row: usize,
        last_col: usize,
    ) -> Result<()> {
        self.print_area = Some((first_row, first_col, last_row, last_col));
        Ok(())
    }

    fn set_page_breaks(&mut self, rows: &[usize]) -> Result<()> {
        self.page_breaks = rows.to_vec();
        Ok(())
    }
}
