use crate::args::Args;
use crate::lsg::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

pub const DEFAULT_DATA_DIRECTORY: &str = "data";
pub const DEFAULT_LOCAL_BODIES: &str = "csv/local_bodies.csv";
pub const DEFAULT_WARDS: &str = "csv/wards.csv";
pub const DEFAULT_POLLING_STATIONS: &str = "csv/polling_stations.csv";
pub const DEFAULT_PARTY_GROUPS: &str = "csv/party_and_group.csv";
pub const DEFAULT_TRENDS: &str = "csv/trend_detailed_results_2025.csv";

/// The optional JSON configuration file. Every entry may be left out.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(rename = "dataDirectory")]
    pub data_directory: Option<String>,
    #[serde(rename = "localBodies")]
    pub local_bodies: Option<String>,
    pub wards: Option<String>,
    #[serde(rename = "pollingStations")]
    pub polling_stations: Option<String>,
    #[serde(rename = "partyGroups")]
    pub party_groups: Option<String>,
    pub trends: Option<String>,
    pub maps: Option<String>,
}

/// The resolved location of every input.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DataSources {
    pub local_bodies: PathBuf,
    pub wards: PathBuf,
    pub polling_stations: PathBuf,
    pub party_groups: PathBuf,
    pub trends: PathBuf,
    pub maps: PathBuf,
}

impl DataSources {
    /// Command line flags take precedence over the configuration file, which
    /// takes precedence over the defaults. Relative paths are resolved against
    /// the data directory; a relative data directory from the configuration
    /// file is resolved against `config_dir`.
    pub fn resolve(config: &DashboardConfig, config_dir: &Path, args: &Args) -> DataSources {
        let data_dir: PathBuf = match (&args.data_dir, &config.data_directory) {
            (Some(d), _) => PathBuf::from(d),
            (None, Some(d)) => config_dir.join(d),
            (None, None) => config_dir.join(DEFAULT_DATA_DIRECTORY),
        };
        let pick = |arg: &Option<String>, conf: &Option<String>, default: &str| -> PathBuf {
            let p = arg.as_deref().or(conf.as_deref()).unwrap_or(default);
            data_dir.join(p)
        };
        DataSources {
            local_bodies: pick(&args.local_bodies, &config.local_bodies, DEFAULT_LOCAL_BODIES),
            wards: pick(&args.wards, &config.wards, DEFAULT_WARDS),
            polling_stations: pick(
                &args.polling_stations,
                &config.polling_stations,
                DEFAULT_POLLING_STATIONS,
            ),
            party_groups: pick(&args.party_groups, &config.party_groups, DEFAULT_PARTY_GROUPS),
            trends: pick(&args.trends, &config.trends, DEFAULT_TRENDS),
            maps: match args.maps.as_deref().or(config.maps.as_deref()) {
                Some(m) => data_dir.join(m),
                None => data_dir.clone(),
            },
        }
    }
}

pub fn read_config(path: &Path) -> LsgResult<DashboardConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu {
        path: path.display().to_string(),
    })?;
    let config: DashboardConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(config)
}

pub fn read_summary(path: &Path) -> LsgResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu {
        path: path.display().to_string(),
    })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_the_data_directory() {
        let s = DataSources::resolve(&DashboardConfig::default(), Path::new(""), &Args::default());
        assert_eq!(s.local_bodies, PathBuf::from("data/csv/local_bodies.csv"));
        assert_eq!(s.trends, PathBuf::from("data/csv/trend_detailed_results_2025.csv"));
        assert_eq!(s.maps, PathBuf::from("data"));
    }

    #[test]
    fn flags_override_the_configuration() {
        let config: DashboardConfig = serde_json::from_str(
            r#"{"dataDirectory": "inputs", "trends": "live.csv", "wards": "w.xlsx", "maps": "geo"}"#,
        )
        .unwrap();
        let args = Args {
            trends: Some("/tmp/feed.csv".to_string()),
            ..Default::default()
        };
        let s = DataSources::resolve(&config, Path::new("/etc/lsg"), &args);
        assert_eq!(s.trends, PathBuf::from("/tmp/feed.csv"));
        assert_eq!(s.wards, PathBuf::from("/etc/lsg/inputs/w.xlsx"));
        assert_eq!(s.party_groups, PathBuf::from("/etc/lsg/inputs/csv/party_and_group.csv"));
        assert_eq!(s.maps, PathBuf::from("/etc/lsg/inputs/geo"));

        let args = Args {
            data_dir: Some("other".to_string()),
            ..Default::default()
        };
        let s = DataSources::resolve(&config, Path::new("/etc/lsg"), &args);
        assert_eq!(s.wards, PathBuf::from("other/w.xlsx"));
    }

    #[test]
    fn unknown_config_entries_are_ignored() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{"localBodies": "lb.csv", "comment": "test"}"#).unwrap();
        assert_eq!(config.local_bodies, Some("lb.csv".to_string()));
        assert_eq!(config.trends, None);
    }
}
