use log::{debug, error, info, warn};

use lsg_trends::geometry::*;
use lsg_trends::navigation::{Event, MapLayer, NavigationError, View};
use lsg_trends::registry::{DashboardCounts, DistrictRow, DistrictSummary, Kpi, Registry};
use lsg_trends::builder::TrendBuilder;
use lsg_trends::*;
use snafu::{prelude::*, Snafu};

use std::any::Any;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use geojson::FeatureCollection;
use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::lsg::cache::{QueryCache, QueryKey};
use crate::lsg::config_reader::*;
use crate::lsg::io_common::read_table;
use crate::lsg::io_geo::read_feature_collection;
use crate::lsg::tables::*;

pub mod cache;
pub mod config_reader;
mod io_common;
mod io_csv;
mod io_excel;
mod io_geo;
mod tables;

#[derive(Debug, Snafu)]
pub enum LsgError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The workbook has no worksheet or no header row"))]
    EmptyExcel {},
    #[snafu(display("Error opening file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading the JSON file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error reading the header of {path}"))]
    CsvHeader { source: csv::Error, path: String },
    #[snafu(display("Cannot tell the format of {path}: expected a .csv or .xlsx file"))]
    UnknownTableFormat { path: String },
    #[snafu(display("Error parsing the GeoJSON file {path}"))]
    ParsingGeoJson {
        source: geojson::Error,
        path: String,
    },
    #[snafu(display("{path} is a TopoJSON file: convert it to GeoJSON first"))]
    TopologyNotSupported { path: String },
    #[snafu(display("{path} does not contain features"))]
    NotAFeatureCollection { path: String },
    #[snafu(display("Failed to read the {table} table"))]
    TableThread { table: String },
    #[snafu(display("Invalid view"))]
    Navigation { source: NavigationError },
    #[snafu(display("Unknown KPI {kpi}"))]
    UnknownKpi { kpi: String },
    #[snafu(display("Unknown map layer {layer}"))]
    UnknownLayer { layer: String },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error + Send + Sync>, Some)))]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

pub type LsgResult<T> = Result<T, LsgError>;

pub type TrendResults = BTreeMap<String, LocalBodyResult>;

// ******** Loading ********

fn join_table<T>(
    handle: thread::ScopedJoinHandle<'_, LsgResult<T>>,
    table: &str,
) -> LsgResult<T> {
    match handle.join() {
        Ok(res) => res,
        Err(_) => TableThreadSnafu { table }.fail(),
    }
}

/// Reads the three registry tables in parallel. Any failure fails the whole
/// registry.
pub fn load_registry(sources: &DataSources) -> LsgResult<Registry> {
    info!("load_registry: reading {:?}", sources.local_bodies);
    thread::scope(|s| {
        let lbs = s.spawn(|| {
            read_table(&sources.local_bodies).map(|records| local_bodies_from_records(&records))
        });
        let wards = s.spawn(|| read_table(&sources.wards).map(|records| wards_from_records(&records)));
        let stations = s.spawn(|| {
            read_table(&sources.polling_stations)
                .map(|records| polling_stations_from_records(&records))
        });
        let local_bodies = join_table(lbs, "local bodies")?;
        let wards = join_table(wards, "wards")?;
        let polling_stations = join_table(stations, "polling stations")?;
        info!(
            "load_registry: {} local bodies, {} wards, {} polling stations",
            local_bodies.len(),
            wards.len(),
            polling_stations.len()
        );
        Ok(Registry::new(local_bodies, wards, polling_stations))
    })
}

/// The party groups. A table that cannot be read gives an empty table.
pub fn load_party_groups(path: &Path) -> PartyGroups {
    match read_table(path) {
        Ok(records) => {
            let groups = party_groups_from_records(&records);
            info!("load_party_groups: {} parties", groups.len());
            groups
        }
        Err(e) => {
            warn!(
                "Failed to load party groups from {:?}, every candidate is independent: {}",
                path, e
            );
            PartyGroups::empty()
        }
    }
}

pub fn load_trends(path: &Path, groups: &PartyGroups) -> LsgResult<TrendResults> {
    let records = read_table(path)?;
    let mut builder = TrendBuilder::new(groups);
    builder.add_rows(candidate_rows_from_records(&records));
    debug!("load_trends: {} rows", builder.len());
    Ok(builder.build())
}

/// Everything the views are computed from.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub registry: Arc<Registry>,
    pub results: Arc<TrendResults>,
}

// The cached value, or the outcome of the load started for a miss.
fn settle<T: Any + Send + Sync>(
    cache: &mut QueryCache,
    key: QueryKey,
    hit: Option<Arc<T>>,
    loaded: Option<LsgResult<T>>,
) -> LsgResult<Arc<T>> {
    match (hit, loaded) {
        (Some(v), _) => Ok(v),
        (None, Some(res)) => Ok(cache.insert(key, res?)),
        (None, None) => {
            whatever!("{:?} was neither cached nor loaded", key);
        }
    }
}

/// Loads the registry and the trends through the cache. The two loads run
/// side by side. Failures are logged and replaced by empty data, so that the
/// other panels still show.
pub fn load_dashboard(sources: &DataSources, cache: &mut QueryCache) -> Dashboard {
    let registry_hit = cache.get::<Registry>(&QueryKey::LocalBodies);
    let results_hit = cache.get::<TrendResults>(&QueryKey::Trends);
    let (registry_loaded, results_loaded) = thread::scope(|s| {
        let registry = registry_hit
            .is_none()
            .then(|| s.spawn(|| load_registry(sources)));
        let results = results_hit.is_none().then(|| {
            s.spawn(|| {
                let groups = load_party_groups(&sources.party_groups);
                load_trends(&sources.trends, &groups)
            })
        });
        (
            registry.map(|h| join_table(h, "local bodies")),
            results.map(|h| join_table(h, "trends")),
        )
    });

    let registry = match settle(cache, QueryKey::LocalBodies, registry_hit, registry_loaded) {
        Ok(r) => r,
        Err(e) => {
            error!("Failed to load the local bodies: {}", e);
            Arc::new(Registry::empty())
        }
    };
    let results = match settle(cache, QueryKey::Trends, results_hit, results_loaded) {
        Ok(r) => r,
        Err(e) => {
            warn!("Failed to load the trends from {:?}: {}", sources.trends, e);
            Arc::new(TrendResults::new())
        }
    };
    Dashboard { registry, results }
}

// ******** Views ********

/// Walks from the state overview to the view named on the command line.
pub fn select_view(
    district: Option<&str>,
    local_body: Option<&str>,
    dashboard: &Dashboard,
) -> LsgResult<View> {
    let lb_district: Option<String> = local_body.and_then(|code| {
        dashboard
            .registry
            .local_body(code)
            .map(|lb| lb.district.clone())
            .or_else(|| dashboard.results.get(code).map(|r| r.district.clone()))
    });
    let district: Option<String> = district.map(|d| d.to_string()).or(lb_district);

    let mut view = View::home();
    if let Some(d) = district {
        view = view
            .apply(Event::SelectFeature {
                code: d.clone(),
                district: Some(d),
            })
            .context(NavigationSnafu {})?;
    }
    if let Some(code) = local_body {
        view = view
            .apply(Event::SelectFeature {
                code: code.to_string(),
                district: None,
            })
            .context(NavigationSnafu {})?;
    }
    debug!("select_view: {:?}", view);
    Ok(view)
}

fn seats_js(seats: &SeatTally) -> JSValue {
    json!({"LDF": seats.ldf, "UDF": seats.udf, "NDA": seats.nda, "IND": seats.ind})
}

fn counts_js(c: &DashboardCounts) -> JSValue {
    json!({
        "corporations": c.corporations,
        "municipalities": c.municipalities,
        "gramaPanchayats": c.grama_panchayats,
        "blockPanchayats": c.block_panchayats,
        "districtPanchayats": c.district_panchayats,
        "voters": c.voters,
        "pollingStations": c.polling_stations,
        "totalWards": c.total_wards,
    })
}

fn district_rows_js(rows: &[DistrictRow]) -> Vec<JSValue> {
    rows.iter()
        .map(|r| {
            json!({
                "district": r.district,
                "count": r.kpi_count,
                "totalWards": r.total_wards,
                "voters": r.voters,
                "pollingStations": r.stations,
            })
        })
        .collect()
}

fn district_summary_js(s: &DistrictSummary) -> JSValue {
    json!({
        "district": s.district,
        "localBodies": s.local_bodies,
        "wardsDeclared": s.wards_declared,
        "seats": seats_js(&s.seats),
        "leads": s.leads,
    })
}

fn candidate_js(c: &WardCandidate) -> JSValue {
    json!({"name": c.name, "party": c.party, "group": c.group, "votes": c.votes})
}

fn ward_js(w: &WardResult) -> JSValue {
    let mut js: JSMap<String, JSValue> = JSMap::new();
    js.insert("wardNo".to_string(), json!(w.ward_number));
    js.insert("wardName".to_string(), json!(w.ward_name));
    if let Some(winner) = w.winner() {
        js.insert("status".to_string(), json!("declared"));
        js.insert("winner".to_string(), candidate_js(winner));
    } else if let Some(leader) = w.provisional_leader() {
        js.insert("status".to_string(), json!("leading"));
        js.insert("leading".to_string(), candidate_js(leader));
    } else {
        js.insert("status".to_string(), json!("pending"));
    }
    let candidates: Vec<JSValue> = w.candidates.iter().map(candidate_js).collect();
    js.insert("candidates".to_string(), json!(candidates));
    JSValue::Object(js)
}

// Numeric ward numbers first, by value, then the others as text.
fn ward_order(ward_number: &str) -> (u64, &str) {
    (ward_number.parse::<u64>().unwrap_or(u64::MAX), ward_number)
}

fn trend_js(r: &LocalBodyResult) -> JSValue {
    let mut ordered: Vec<&WardResult> = r.wards.values().collect();
    ordered.sort_by(|a, b| ward_order(&a.ward_number).cmp(&ward_order(&b.ward_number)));
    let wards: Vec<JSValue> = ordered.into_iter().map(ward_js).collect();
    json!({
        "code": r.code,
        "name": r.name,
        "district": r.district,
        "wardsDeclared": r.wards_declared,
        "seats": seats_js(&r.seats),
        "leadingFront": r.leading_front.to_string(),
        "wards": wards,
    })
}

fn district_panel_js(district: &str, dashboard: &Dashboard) -> JSValue {
    let kinds = [
        LocalBodyType::MunicipalCorporation,
        LocalBodyType::Municipality,
        LocalBodyType::GramaPanchayat,
        LocalBodyType::BlockPanchayat,
        LocalBodyType::DistrictPanchayat,
    ];
    let mut by_type: JSMap<String, JSValue> = JSMap::new();
    for kind in kinds.iter() {
        let lbs: Vec<JSValue> = dashboard
            .registry
            .drill_down(district, kind)
            .into_iter()
            .map(|lb| {
                let res = dashboard.registry.result_for(&lb.code, &dashboard.results);
                json!({
                    "code": lb.code,
                    "name": lb.name,
                    "totalWards": lb.total_wards,
                    "wardsDeclared": res.map(|r| r.wards_declared),
                    "leadingFront": res.map(|r| r.leading_front.to_string()),
                })
            })
            .collect();
        if !lbs.is_empty() {
            by_type.insert(kind.label().to_string(), json!(lbs));
        }
    }
    let summary = dashboard
        .registry
        .district_summaries(&dashboard.results, None)
        .into_iter()
        .find(|s| s.district == district)
        .map(|s| district_summary_js(&s));
    json!({"name": district, "summary": summary, "localBodies": by_type})
}

fn local_body_panel_js(code: &str, dashboard: &Dashboard) -> JSValue {
    let detail = dashboard.registry.local_body_detail(code).map(|d| {
        json!({
            "name": d.local_body.name,
            "type": d.local_body.kind.label(),
            "district": d.local_body.district,
            "totalWards": d.local_body.total_wards,
            "registeredWards": d.wards.len(),
            "voters": d.total_voters,
            "pollingStations": d.polling_stations,
        })
    });
    let trend = dashboard.results.get(code).map(trend_js);
    json!({"code": code, "registry": detail, "trends": trend})
}

fn view_js(view: &View) -> JSValue {
    match view {
        View::StateOverview => json!({"kind": "state"}),
        View::DistrictDetail { district, code } => {
            json!({"kind": "district", "district": district, "code": code})
        }
        View::LocalBodyDetail {
            district,
            district_code,
            code,
        } => {
            json!({"kind": "localBody", "district": district, "districtCode": district_code, "code": code})
        }
    }
}

fn painted_features_js(view: &View, fc: &FeatureCollection, results: &TrendResults) -> Vec<JSValue> {
    let painted = match view {
        View::LocalBodyDetail { code, .. } => {
            let res = results.get(code);
            paint_collection(fc, |f| color_ward_feature(f, res))
        }
        _ => paint_collection(fc, |f| color_feature(f, results)),
    };
    painted
        .features
        .iter()
        .map(|f| {
            let info = describe_feature(f, results);
            json!({
                "code": info.code,
                "name": info.name,
                "district": info.district,
                "ward": feature_ward_number(f),
                "fill": f.property(FILL_COLOR_PROPERTY),
            })
        })
        .collect()
}

/// The map panel. A map that cannot be loaded is reported in the panel and
/// does not fail the summary.
pub fn map_panel_js(
    view: &View,
    layer: MapLayer,
    map_path: &Path,
    cache: &mut QueryCache,
    results: &TrendResults,
) -> JSValue {
    let file = map_path.display().to_string();
    let loaded = cache.get_or_load(QueryKey::Map(file.clone()), || {
        read_feature_collection(map_path)
    });
    match loaded {
        Ok(fc) => {
            let features = painted_features_js(view, &fc, results);
            json!({"file": file, "layer": layer.tag(), "features": features})
        }
        Err(e) => {
            warn!("Failed to load the map {}: {}", file, e);
            json!({"file": file, "layer": layer.tag(), "mapError": e.to_string()})
        }
    }
}

pub fn build_summary_js(
    dashboard: &Dashboard,
    view: &View,
    kpi: Option<Kpi>,
    map_panel: JSValue,
) -> JSValue {
    let registry = &dashboard.registry;
    let kind = kpi.and_then(|k| k.local_body_type());
    let summaries: Vec<JSValue> = registry
        .district_summaries(&dashboard.results, kind.as_ref())
        .iter()
        .map(district_summary_js)
        .collect();
    let mut js = json!({
        "view": view_js(view),
        "counts": counts_js(&registry.counts()),
        "kpi": kpi.map(|k| k.label()),
        "districtTable": district_rows_js(&registry.district_table(kpi)),
        "districtTrends": summaries,
        "map": map_panel,
    });
    match view {
        View::StateOverview => {}
        View::DistrictDetail { district, .. } => {
            js["district"] = district_panel_js(district, dashboard);
        }
        View::LocalBodyDetail { district, code, .. } => {
            js["district"] = district_panel_js(district, dashboard);
            js["localBody"] = local_body_panel_js(code, dashboard);
        }
    }
    js
}

fn search_js(registry: &Registry, term: &str) -> Vec<JSValue> {
    registry
        .search(term)
        .into_iter()
        .map(|lb| json!({"code": lb.code, "name": lb.name, "type": lb.kind.label(), "district": lb.district}))
        .collect()
}

fn write_summary(out: Option<&str>, pretty: &str) -> LsgResult<()> {
    match out {
        None | Some("stdout") | Some("") => {
            println!("{}", pretty);
            Ok(())
        }
        Some(path) => {
            info!("Writing the summary to {}", path);
            fs::write(path, pretty).context(WritingOutputSnafu { path })
        }
    }
}

fn check_reference(reference_path: &str, pretty: &str) -> LsgResult<()> {
    let summary_ref = read_summary(Path::new(reference_path))?;
    let pretty_ref = serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_ref != pretty {
        warn!("Found differences with the reference summary");
        print_diff(pretty_ref.as_str(), pretty, "\n");
        whatever!("Difference detected between computed summary and reference summary")
    }
    Ok(())
}

pub fn run_dashboard(args: &Args) -> LsgResult<()> {
    let (config, base_dir) = match &args.config {
        Some(p) => {
            let config_p = Path::new(p.as_str());
            let config = read_config(config_p)?;
            let base = config_p
                .parent()
                .map(|d| d.to_path_buf())
                .unwrap_or_default();
            (config, base)
        }
        None => (DashboardConfig::default(), PathBuf::new()),
    };
    debug!("run_dashboard: config: {:?}", config);
    let sources = DataSources::resolve(&config, &base_dir, args);
    info!("run_dashboard: sources: {:?}", sources);

    let kpi = match &args.kpi {
        Some(k) => Some(Kpi::parse(k).context(UnknownKpiSnafu { kpi: k.clone() })?),
        None => None,
    };

    let mut cache = QueryCache::new();
    let dashboard = load_dashboard(&sources, &mut cache);

    let view = select_view(
        args.district.as_deref(),
        args.local_body.as_deref(),
        &dashboard,
    )?;
    let layer = match &args.layer {
        Some(l) => MapLayer::parse(l).context(UnknownLayerSnafu { layer: l.clone() })?,
        None => MapLayer::default_for(&view),
    };
    let map_path = match &args.map {
        Some(m) => PathBuf::from(m),
        None => sources.maps.join(view.map_request(layer).relative_path()),
    };
    let map_panel = map_panel_js(&view, layer, &map_path, &mut cache, &dashboard.results);

    let mut summary_js = build_summary_js(&dashboard, &view, kpi, map_panel);
    if let Some(term) = &args.search {
        summary_js["search"] = json!(search_js(&dashboard.registry, term));
    }

    let pretty = serde_json::to_string_pretty(&summary_js).context(ParsingJsonSnafu {})?;
    write_summary(args.out.as_deref(), &pretty)?;

    if let Some(reference) = &args.reference {
        check_reference(reference, &pretty)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lsgtrends-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("csv")).unwrap();
        dir
    }

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    fn write_tables(dir: &Path) {
        write(
            dir,
            "csv/local_bodies.csv",
            "Local Body Code,Local Body Name,Local Body Type,District,Ward Count\n\
             G01001,Kunjathur,Grama Panchayat,KASARGOD,3\n\
             M01001,Kasaragod,Municipality,Kasargod,2\n\
             D01001,Kasaragod,District Panchayat,Kasargod,17\n",
        );
        write(
            dir,
            "csv/wards.csv",
            "Ward Code,Ward Name,Local Body Code,Total,Males,Females,Others\n\
             G01001001,North,G01001,1000,500,500,0\n\
             G01001002,South,G01001,800,400,400,0\n\
             M01001001,Fort,M01001,1200,,,\n",
        );
        write(
            dir,
            "csv/polling_stations.csv",
            "PS No,PS Name,Ward Code,Local Body Code\n\
             1,LP School,G01001001,G01001\n\
             2,UP School,G01001002,G01001\n\
             3,Town Hall,M01001001,M01001\n",
        );
        write(
            dir,
            "csv/party_and_group.csv",
            "Party,Party Group\nCPI(M),LDF\nINC,UDF\nBJP,NDA\n",
        );
        write(
            dir,
            "csv/trend_detailed_results_2025.csv",
            "District,LB_Code,LB_Name,Ward_No,Ward_Name,Candidate_Name,Party,Votes,Status\n\
             Kasargod,G01001,Kunjathur,1,North,A,CPI(M),400,Won\n\
             Kasargod,G01001,Kunjathur,1,North,B,INC,350,\n\
             Kasargod,G01001,Kunjathur,2,South,C,BJP,0,Leading\n\
             Kasargod,G01001,Kunjathur,2,South,D,INC,0,\n\
             Kasargod,M01001,Kasaragod,1,Fort,E,INC,610,\n",
        );
    }

    fn sources(dir: &Path) -> DataSources {
        let args = Args {
            data_dir: Some(dir.display().to_string()),
            ..Default::default()
        };
        DataSources::resolve(&DashboardConfig::default(), Path::new(""), &args)
    }

    #[test]
    fn dashboard_from_csv_files() {
        let dir = scratch_dir("dashboard");
        write_tables(&dir);
        let mut cache = QueryCache::new();
        let dashboard = load_dashboard(&sources(&dir), &mut cache);

        assert_eq!(dashboard.registry.local_bodies.len(), 3);
        assert_eq!(dashboard.registry.districts(), vec!["Kasaragod".to_string()]);
        let counts = dashboard.registry.counts();
        assert_eq!(counts.voters, 3000);
        assert_eq!(counts.polling_stations, 3);

        let g = dashboard.results.get("G01001").unwrap();
        assert_eq!(g.wards_declared, 1);
        assert_eq!(g.leading_front.to_string(), "LDF");
        assert_eq!(g.district, "Kasaragod");

        let view = select_view(None, Some("G01001"), &dashboard).unwrap();
        assert_eq!(
            view,
            View::LocalBodyDetail {
                district: "Kasaragod".to_string(),
                district_code: "Kasaragod".to_string(),
                code: "G01001".to_string()
            }
        );
        let js = build_summary_js(&dashboard, &view, None, json!(null));
        assert_eq!(js["localBody"]["trends"]["leadingFront"], json!("LDF"));
        assert_eq!(js["localBody"]["trends"]["wards"][1]["status"], json!("leading"));
        assert_eq!(js["localBody"]["registry"]["pollingStations"], json!(2));
        assert_eq!(js["districtTrends"][0]["seats"]["UDF"], json!(1));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn cached_trends_are_kept_while_the_registry_loads() {
        let dir = scratch_dir("cached");
        write_tables(&dir);
        let mut cache = QueryCache::new();
        let cached = cache.insert(QueryKey::Trends, TrendResults::new());
        let dashboard = load_dashboard(&sources(&dir), &mut cache);
        assert_eq!(dashboard.registry.local_bodies.len(), 3);
        assert!(Arc::ptr_eq(&dashboard.results, &cached));
        assert!(cache.contains(&QueryKey::LocalBodies));

        let again = load_dashboard(&sources(&dir), &mut cache);
        assert!(Arc::ptr_eq(&again.registry, &dashboard.registry));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn wards_are_listed_by_number() {
        let rows: Vec<CandidateRow> = ["10", "2", "1", "B"]
            .iter()
            .map(|w| CandidateRow {
                local_body_code: "G01001".to_string(),
                ward_number: w.to_string(),
                candidate_name: format!("c{}", w),
                party_label: "INC".to_string(),
                vote_count: 5,
                ..Default::default()
            })
            .collect();
        let res = aggregate(&rows, &PartyGroups::empty());
        let js = trend_js(&res["G01001"]);
        let order: Vec<&str> = js["wards"]
            .as_array()
            .unwrap()
            .iter()
            .map(|w| w["wardNo"].as_str().unwrap())
            .collect();
        assert_eq!(order, vec!["1", "2", "10", "B"]);
    }

    #[test]
    fn missing_tables_give_empty_panels() {
        let dir = scratch_dir("missing");
        let mut cache = QueryCache::new();
        let dashboard = load_dashboard(&sources(&dir), &mut cache);
        assert!(dashboard.registry.local_bodies.is_empty());
        assert!(dashboard.results.is_empty());
        // Failures are not cached.
        assert!(!cache.contains(&QueryKey::LocalBodies));
        let js = build_summary_js(&dashboard, &View::home(), Some(Kpi::Voters), json!(null));
        assert_eq!(js["counts"]["voters"], json!(0));
        assert_eq!(js["districtTable"], json!([]));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_party_groups_make_everyone_independent() {
        let dir = scratch_dir("noparty");
        write_tables(&dir);
        fs::remove_file(dir.join("csv/party_and_group.csv")).unwrap();
        let mut cache = QueryCache::new();
        let dashboard = load_dashboard(&sources(&dir), &mut cache);
        let g = dashboard.results.get("G01001").unwrap();
        assert_eq!(g.seats.ind, 1);
        assert_eq!(g.leading_front.to_string(), "IND");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn map_errors_stay_in_the_map_panel() {
        let dir = scratch_dir("maps");
        write(&dir, "topology.json", r#"{"type": "Topology", "objects": {}}"#);
        write(
            &dir,
            "wards.json",
            r#"{"type": "FeatureCollection", "features": [
                {"type": "Feature", "geometry": null, "properties": {"Ward_No": 1}},
                {"type": "Feature", "geometry": null, "properties": {"Ward_No": "7"}}
            ]}"#,
        );
        let mut cache = QueryCache::new();
        let results = TrendResults::new();
        let home = View::home();

        let js = map_panel_js(&home, MapLayer::District, &dir.join("topology.json"), &mut cache, &results);
        assert!(js["mapError"].as_str().unwrap().contains("TopoJSON"));
        let js = map_panel_js(&home, MapLayer::District, &dir.join("nothing.json"), &mut cache, &results);
        assert!(js.get("mapError").is_some());

        let lb = View::LocalBodyDetail {
            district: "Kasaragod".to_string(),
            district_code: "D01".to_string(),
            code: "G01001".to_string(),
        };
        let js = map_panel_js(&lb, MapLayer::Grama, &dir.join("wards.json"), &mut cache, &results);
        assert_eq!(js["features"][0]["fill"], json!("#e2e8f0"));
        assert_eq!(js["features"][1]["ward"], json!("7"));
        assert!(cache.contains(&QueryKey::Map(dir.join("wards.json").display().to_string())));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn unknown_local_body_cannot_be_opened() {
        let dashboard = Dashboard {
            registry: Arc::new(Registry::empty()),
            results: Arc::new(TrendResults::new()),
        };
        let res = select_view(None, Some("X"), &dashboard);
        assert!(matches!(res, Err(LsgError::Navigation { .. })));
        let view = select_view(Some("wayanad"), None, &dashboard).unwrap();
        assert_eq!(view.district(), Some("Wayanad"));
    }
}
