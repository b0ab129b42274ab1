// Map files.

use geojson::{FeatureCollection, GeoJson};

use crate::lsg::*;

/// Parses a GeoJSON document into a feature collection. A single feature is
/// accepted as a collection of one. TopoJSON documents are rejected.
pub fn parse_feature_collection(contents: &str, path: &str) -> LsgResult<FeatureCollection> {
    let value: JSValue = serde_json::from_str(contents).context(ParsingJsonSnafu {})?;
    if value.get("type").and_then(|t| t.as_str()) == Some("Topology") {
        return TopologyNotSupportedSnafu { path }.fail();
    }
    let gj = GeoJson::from_json_value(value).context(ParsingGeoJsonSnafu { path })?;
    match gj {
        GeoJson::FeatureCollection(fc) => Ok(fc),
        GeoJson::Feature(f) => Ok(FeatureCollection {
            bbox: None,
            features: vec![f],
            foreign_members: None,
        }),
        GeoJson::Geometry(_) => NotAFeatureCollectionSnafu { path }.fail(),
    }
}

pub fn read_feature_collection(path: &Path) -> LsgResult<FeatureCollection> {
    let p = path.display().to_string();
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path: p.clone() })?;
    let fc = parse_feature_collection(&contents, &p)?;
    debug!("read_feature_collection: {}: {} features", p, fc.features.len());
    Ok(fc)
}
