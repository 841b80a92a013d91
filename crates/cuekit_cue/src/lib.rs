//! `cuekit_cue` v1:
//! Route-export parsing kernel.
//!
//! Turns the rows of a turn-by-turn route export into normalized cues.
//! - `conf`  : constants and default presets
//! - `spec`  : rows/cues/options/errors
//! - `sink`  : injected diagnostics sink
//! - `parse` : direction/description mapping and cue assembly
//! - `read`  : CSV route-table reader
pub mod conf;
pub mod parse;
pub mod read;
pub mod sink;
pub mod spec;

pub use conf::{
    C_DEFAULT_END_INDICATOR, C_DEFAULT_END_TEXT, C_DEFAULT_START_TEXT, N_FIELDS_ROUTE_ROW,
    N_DEFAULT_PAGE_BREAK_ROW_INTERVAL, TUP_DEFAULT_CONTROL_CUE_INDICATORS,
};
pub use parse::{map_cue_description, map_direction, parse_distance, parse_route_rows};
pub use read::{read_route_table, read_route_table_from_reader};
pub use sink::{LogFacadeSink, LogSink, MemoryLogSink};
pub use spec::{
    CueError, EnumTurnCode, Result, SpecCue, SpecEventDetails, SpecGenerationOptions,
    SpecRouteRow,
};
