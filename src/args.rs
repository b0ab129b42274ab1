use clap::Parser;

/// This is a dashboard for the trends of the Kerala local body elections.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON configuration file naming the input tables.
    /// For more information about the file format, read the documentation of the
    /// lsg_trends crate.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (directory, default 'data') The directory that relative input paths are resolved against.
    /// Setting this option overrides the directory that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub data_dir: Option<String>,

    /// (file path) The local body table (CSV or Excel).
    #[clap(long, value_parser)]
    pub local_bodies: Option<String>,

    /// (file path) The ward table (CSV or Excel).
    #[clap(long, value_parser)]
    pub wards: Option<String>,

    /// (file path) The polling station table (CSV or Excel).
    #[clap(long, value_parser)]
    pub polling_stations: Option<String>,

    /// (file path) The table mapping each party to its front.
    #[clap(long, value_parser)]
    pub party_groups: Option<String>,

    /// (file path) The trends feed: one row per candidate and ward.
    #[clap(short, long, value_parser)]
    pub trends: Option<String>,

    /// (directory) The root of the map files.
    #[clap(long, value_parser)]
    pub maps: Option<String>,

    /// (file path, optional) A GeoJSON file to color instead of the map file of the current view.
    #[clap(short, long, value_parser)]
    pub map: Option<String>,

    /// (default 'district' on the state map, 'grama' otherwise) The layer of the map: district, block or grama.
    #[clap(long, value_parser)]
    pub layer: Option<String>,

    /// (district name, optional) Opens the view of this district.
    #[clap(long, value_parser)]
    pub district: Option<String>,

    /// (local body code, optional) Opens the view of this local body. The district is
    /// looked up if it is not given.
    #[clap(short, long, value_parser)]
    pub local_body: Option<String>,

    /// (optional) The statistic of the district table: corporations, municipalities,
    /// grama_panchayats, block_panchayats, district_panchayats, wards, voters or stations.
    #[clap(short, long, value_parser)]
    pub kpi: Option<String>,

    /// (text, optional) Lists the local bodies whose name contains this text.
    #[clap(short, long, value_parser)]
    pub search: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary will be written in JSON format to the given
    /// location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing a summary in JSON format. If provided, lsgtrends will
    /// check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
