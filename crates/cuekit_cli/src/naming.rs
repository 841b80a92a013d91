//! Input validation and output naming.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

pub const C_ROUTE_URL_PREFIX: &str = "https://ridewithgps.com/routes/";
pub const C_OUTPUT_SUFFIX: &str = "_cues.xlsx";
pub const C_OUTPUT_FALLBACK: &str = "output_cues.xlsx";

/// A validated RideWithGPS route URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecRouteUrl {
    pub url: String,
    pub route_id: String,
    /// Query/fragment tail, kept on the export URL.
    tail: String,
}

impl SpecRouteUrl {
    /// URL of the route's cue CSV export.
    pub fn csv_export_url(&self) -> String {
        format!("{C_ROUTE_URL_PREFIX}{}.csv{}", self.route_id, self.tail)
    }
}

/// Accept `https://ridewithgps.com/routes/<digits>`, optionally with a query.
pub fn validate_route_url(value: &str) -> Result<SpecRouteUrl> {
    let Some(c_rest) = value.strip_prefix(C_ROUTE_URL_PREFIX) else {
        bail!("Not a valid RideWithGPS URL, must start with {C_ROUTE_URL_PREFIX}: {value}");
    };
    let n_idx_tail = c_rest.find(['?', '#']).unwrap_or(c_rest.len());
    let (c_route_id, c_tail) = c_rest.split_at(n_idx_tail);

    if c_route_id.is_empty() || !c_route_id.chars().all(|ch| ch.is_ascii_digit()) {
        bail!("URL must end in a numeric route id: {value}");
    }
    Ok(SpecRouteUrl {
        url: value.to_string(),
        route_id: c_route_id.to_string(),
        tail: c_tail.to_string(),
    })
}

/// Require an existing file with a `.csv` name.
pub fn validate_csv_path(value: &str) -> Result<PathBuf> {
    if !value.ends_with(".csv") {
        bail!("File must be a CSV file, got: {value}");
    }
    let path = PathBuf::from(value);
    if !path.exists() {
        bail!("File does not exist: {value}");
    }
    Ok(path)
}

/// Output file name: explicit override, then route id, then CSV stem.
pub fn derive_output_file_name(
    output: Option<&str>,
    route: Option<&SpecRouteUrl>,
    path_csv: Option<&Path>,
) -> String {
    if let Some(c_output) = output {
        return c_output.to_string();
    }
    if let Some(route) = route {
        return format!("{}{C_OUTPUT_SUFFIX}", route.route_id);
    }
    path_csv
        .and_then(Path::file_stem)
        .map(|stem| format!("{}{C_OUTPUT_SUFFIX}", stem.to_string_lossy()))
        .unwrap_or_else(|| C_OUTPUT_FALLBACK.to_string())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn route_url_yields_id_and_export_url() {
        let route = validate_route_url("https://ridewithgps.com/routes/1234").expect("valid url");
        assert_eq!(route.route_id, "1234");
        assert_eq!(
            route.csv_export_url(),
            "https://ridewithgps.com/routes/1234.csv"
        );

        let route = validate_route_url("https://ridewithgps.com/routes/98?privacy_code=ab12")
            .expect("valid url with query");
        assert_eq!(route.route_id, "98");
        assert_eq!(
            route.csv_export_url(),
            "https://ridewithgps.com/routes/98.csv?privacy_code=ab12"
        );
    }

    #[test]
    fn route_url_rejects_foreign_or_empty_ids() {
        assert!(validate_route_url("https://example.com/routes/1234").is_err());
        assert!(validate_route_url("https://ridewithgps.com/routes/").is_err());
        assert!(validate_route_url("https://ridewithgps.com/routes/abc").is_err());
        assert!(validate_route_url("https://ridewithgps.com/routes/12/").is_err());
    }

    #[test]
    fn csv_path_must_exist_and_end_in_csv() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("route.csv");
        fs::write(&path, "Type,Notes,Distance,Elevation,Description\n").expect("write");
        let c_path = path.to_string_lossy().to_string();

        assert_eq!(validate_csv_path(&c_path).expect("valid csv"), path);
        assert!(validate_csv_path("route.txt").is_err());
        let c_missing = dir.path().join("missing.csv").to_string_lossy().to_string();
        assert!(validate_csv_path(&c_missing).is_err());
    }

    #[test]
    fn output_name_prefers_override_then_route_then_stem() {
        let route = validate_route_url("https://ridewithgps.com/routes/77").expect("valid url");
        let path_csv = Path::new("files/brevet_200.csv");

        assert_eq!(
            derive_output_file_name(Some("mine.xlsx"), Some(&route), Some(path_csv)),
            "mine.xlsx"
        );
        assert_eq!(
            derive_output_file_name(None, Some(&route), Some(path_csv)),
            "77_cues.xlsx"
        );
        assert_eq!(
            derive_output_file_name(None, None, Some(path_csv)),
            "brevet_200_cues.xlsx"
        );
        assert_eq!(derive_output_file_name(None, None, None), "output_cues.xlsx");
    }
}
