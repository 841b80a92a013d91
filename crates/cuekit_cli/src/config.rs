//! TOML config file and option precedence.
//!
//! Precedence: built-in defaults < config file < command-line flags.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use cuekit_cue::SpecGenerationOptions;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpecConfigFile {
    pub event: SpecEventConfig,
    pub options: SpecOptionsConfig,
}

/// `[event]` table. An empty `finish_location` drops the finish header row.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpecEventConfig {
    pub name: Option<String>,
    pub date: Option<String>,
    pub organizer: Option<String>,
    pub organizer_phone: Option<String>,
    pub start_location: Option<String>,
    pub finish_location: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpecOptionsConfig {
    pub include_distance_from_last: Option<bool>,
    pub hide_direction: Option<bool>,
    pub two_decimals_precision: Option<bool>,
    pub verbose: Option<bool>,
    pub control_cue_indicators: Option<Vec<String>>,
    pub end_indicator: Option<String>,
    pub start_text: Option<String>,
    pub end_text: Option<String>,
    pub page_break_row_interval: Option<usize>,
}

/// Command-line flags that override the config file when set.
#[derive(Debug, Default, Clone)]
pub struct SpecCliOverrides {
    pub island: bool,
    pub hidedir: bool,
    pub one_decimal: bool,
    pub verbose: bool,
    pub page_break_interval: Option<usize>,
}

pub fn read_config_file(path: &Path) -> Result<SpecConfigFile> {
    let c_text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&c_text).with_context(|| format!("Invalid config {}", path.display()))
}

impl SpecConfigFile {
    /// Overlay every set field onto `opts`.
    pub fn apply_to(&self, mut opts: SpecGenerationOptions) -> SpecGenerationOptions {
        let event = &self.event;
        let details = &mut opts.event_details;
        if let Some(val) = &event.name {
            details.name = val.clone();
        }
        if let Some(val) = &event.date {
            details.date = val.clone();
        }
        if let Some(val) = &event.organizer {
            details.organizer = val.clone();
        }
        if let Some(val) = &event.organizer_phone {
            details.organizer_phone = val.clone();
        }
        if let Some(val) = &event.start_location {
            details.start_location = val.clone();
        }
        if let Some(val) = &event.finish_location {
            details.finish_location = (!val.trim().is_empty()).then(|| val.clone());
        }

        let cfg = &self.options;
        if let Some(val) = cfg.include_distance_from_last {
            opts.include_distance_from_last = val;
        }
        if let Some(val) = cfg.hide_direction {
            opts.hide_direction = val;
        }
        if let Some(val) = cfg.two_decimals_precision {
            opts.two_decimals_precision = val;
        }
        if let Some(val) = cfg.verbose {
            opts.verbose = val;
        }
        if let Some(val) = &cfg.control_cue_indicators {
            opts.control_cue_indicators = val.iter().cloned().collect();
        }
        if let Some(val) = &cfg.end_indicator {
            opts.end_indicator = val.clone();
        }
        if let Some(val) = &cfg.start_text {
            opts.start_text = val.clone();
        }
        if let Some(val) = &cfg.end_text {
            opts.end_text = val.clone();
        }
        if let Some(val) = cfg.page_break_row_interval {
            opts.page_break_row_interval = val;
        }
        opts
    }
}

/// Resolve the final options and validate them.
pub fn derive_generation_options(
    config: Option<&SpecConfigFile>,
    overrides: &SpecCliOverrides,
) -> Result<SpecGenerationOptions> {
    let mut opts = SpecGenerationOptions::default();
    if let Some(config) = config {
        opts = config.apply_to(opts);
    }

    if overrides.island {
        opts.include_distance_from_last = true;
    }
    if overrides.hidedir {
        opts.hide_direction = true;
    }
    if overrides.one_decimal {
        opts.two_decimals_precision = false;
    }
    if overrides.verbose {
        opts.verbose = true;
    }
    if let Some(val) = overrides.page_break_interval {
        opts.page_break_row_interval = val;
    }

    opts.validate()?;
    Ok(opts)
}
