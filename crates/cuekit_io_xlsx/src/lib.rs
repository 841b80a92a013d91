//! `cuekit_io_xlsx` v1:
//! Cuesheet layout engine and XLSX writer.
//!
//! - `conf`     : layout constants and format presets
//! - `spec`     : format specs, layout report, errors
//! - `util`     : pure helper functions
//! - `canvas`   : grid-writing capability and in-memory canvas
//! - `layout`   : header/row/footer/pagination layout
//! - `writer`   : `rust_xlsxwriter` backed canvas and workbook lifecycle
//! - `generate` : end-to-end rows -> cuesheet pipeline
pub mod canvas;
pub mod conf;
pub mod generate;
pub mod layout;
pub mod spec;
pub mod util;
pub mod writer;

pub use canvas::{EnumCanvasValue, MemoryCanvas, SheetCanvas, SpecCanvasCell};
pub use conf::{N_ROW_HEIGHT_CONTROL, N_ROW_HEIGHT_REGULAR, derive_cuesheet_formats};
pub use generate::{generate_cuesheet, render_cuesheet_bytes};
pub use layout::layout_cuesheet;
pub use spec::{
    CuesheetError, Result, SpecCellFormat, SpecCuesheetColumns, SpecCuesheetFormats,
    SpecCuesheetLayout, SpecSheetHorizontalMerge,
};
pub use util::{derive_column_letter, plan_cuesheet_columns, prune_page_break_candidates};
pub use writer::{CuesheetWriter, XlsxSheetCanvas};
