//! Joins map features to the aggregated trends and picks their fill colors.
//!
//! The map files come from several sources and do not agree on the names of
//! their properties. Each piece of information is looked up through an ordered
//! list of candidate keys; the first key holding a non-empty value wins.

use geojson::{Feature, FeatureCollection, JsonValue};
use log::debug;

use std::collections::BTreeMap;
use std::fmt::Display;

use crate::config::*;
use crate::registry::normalize_district_name;

pub const CODE_KEYS: &[&str] = &["SEC_Kerala_code", "LSG_code", "LGD_Code"];
pub const NAME_KEYS: &[&str] = &["English Label", "LSGI_NAME", "LSGD"];
pub const DISTRICT_KEYS: &[&str] = &["District", "DISTRICT", "District_N"];
pub const WARD_KEYS: &[&str] = &["Ward_No", "ward_no", "Ward No", "WARD_NO", "Ward"];

/// Property injected in painted features.
pub const FILL_COLOR_PROPERTY: &str = "_fillColor";

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn from_hex(hex: u32) -> Rgb {
        Rgb(
            ((hex >> 16) & 0xff) as u8,
            ((hex >> 8) & 0xff) as u8,
            (hex & 0xff) as u8,
        )
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Features without trends, and local bodies without a clear leader.
pub const DEFAULT_COLOR: Rgb = Rgb::from_hex(0x94a3b8);
pub const HUNG_COLOR: Rgb = Rgb::from_hex(0x64748b);
/// Wards the feed does not mention.
pub const NO_WARD_DATA_COLOR: Rgb = Rgb::from_hex(0xe2e8f0);

const LDF_COLOR: Rgb = Rgb::from_hex(0xef4444);
const UDF_COLOR: Rgb = Rgb::from_hex(0x2768f5);
const NDA_COLOR: Rgb = Rgb::from_hex(0xf97316);

pub fn front_color(leading: LeadingFront) -> Rgb {
    match leading {
        LeadingFront::Front(Front::Ldf) => LDF_COLOR,
        LeadingFront::Front(Front::Udf) => UDF_COLOR,
        LeadingFront::Front(Front::Nda) => NDA_COLOR,
        LeadingFront::Hung => HUNG_COLOR,
        LeadingFront::Front(Front::Ind) | LeadingFront::NotAvailable => DEFAULT_COLOR,
    }
}

pub fn ward_winner_color(front: Front) -> Rgb {
    match front {
        Front::Ldf => LDF_COLOR,
        Front::Udf => UDF_COLOR,
        Front::Nda => NDA_COLOR,
        Front::Ind => HUNG_COLOR,
    }
}

/// Lighter shades for wards that are not declared yet.
pub fn ward_leading_color(front: Front) -> Rgb {
    match front {
        Front::Ldf => Rgb::from_hex(0xfca5a5),
        Front::Udf => UDF_COLOR,
        Front::Nda => Rgb::from_hex(0xfdba74),
        Front::Ind => Rgb::from_hex(0xcbd5e1),
    }
}

// Numbers are accepted as well as strings: some files store codes and ward
// numbers as integers.
fn value_to_key(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) if !s.is_empty() => Some(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                (i != 0).then(|| i.to_string())
            } else {
                match n.as_f64() {
                    Some(f) if f == 0.0 => None,
                    Some(f) if f.fract() == 0.0 => Some(format!("{}", f as i64)),
                    _ => Some(n.to_string()),
                }
            }
        }
        _ => None,
    }
}

/// The first usable value among the given property keys.
pub fn probe_property(feature: &Feature, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| feature.property(*key).and_then(value_to_key))
}

pub fn feature_code(feature: &Feature) -> Option<String> {
    probe_property(feature, CODE_KEYS)
}

pub fn feature_name(feature: &Feature) -> Option<String> {
    probe_property(feature, NAME_KEYS)
}

pub fn feature_district(feature: &Feature) -> Option<String> {
    probe_property(feature, DISTRICT_KEYS).map(|d| normalize_district_name(&d))
}

pub fn feature_ward_number(feature: &Feature) -> Option<String> {
    probe_property(feature, WARD_KEYS)
}

/// The fill color of a local body feature. Features without a code or
/// without trends get the default color.
pub fn color_feature(feature: &Feature, results: &BTreeMap<String, LocalBodyResult>) -> Rgb {
    match feature_code(feature).and_then(|code| results.get(&code)) {
        Some(res) => front_color(res.leading_front),
        None => {
            debug!(
                "color_feature: no trends for feature {:?}",
                feature_code(feature)
            );
            DEFAULT_COLOR
        }
    }
}

/// The fill color of a ward feature inside one local body.
///
/// Declared wards take the color of the winner's front. Other wards take a
/// lighter shade for the provisional leader, if there is one.
pub fn color_ward_feature(feature: &Feature, result: Option<&LocalBodyResult>) -> Rgb {
    let ward = match (result, feature_ward_number(feature)) {
        (Some(res), Some(no)) => res.wards.get(&no),
        _ => None,
    };
    let ward = match ward {
        Some(w) => w,
        None => return NO_WARD_DATA_COLOR,
    };
    if let Some(winner) = ward.winner() {
        ward_winner_color(winner.front)
    } else if let Some(leader) = ward.provisional_leader() {
        ward_leading_color(leader.front)
    } else {
        NO_WARD_DATA_COLOR
    }
}

/// A copy of the collection with the color of every feature stored in the
/// [`FILL_COLOR_PROPERTY`] property.
pub fn paint_collection<F>(collection: &FeatureCollection, painter: F) -> FeatureCollection
where
    F: Fn(&Feature) -> Rgb,
{
    let mut painted = collection.clone();
    for feature in painted.features.iter_mut() {
        let color = painter(feature);
        feature.set_property(FILL_COLOR_PROPERTY, color.to_string());
    }
    painted
}

/// What a map shows for a feature under the pointer.
#[derive(PartialEq, Debug, Clone)]
pub struct FeatureInfo<'a> {
    pub code: Option<String>,
    pub name: String,
    pub district: Option<String>,
    pub result: Option<&'a LocalBodyResult>,
}

pub fn describe_feature<'a>(
    feature: &Feature,
    results: &'a BTreeMap<String, LocalBodyResult>,
) -> FeatureInfo<'a> {
    let code = feature_code(feature);
    let result = code.as_ref().and_then(|c| results.get(c));
    FeatureInfo {
        name: feature_name(feature).unwrap_or_default(),
        district: feature_district(feature),
        code,
        result,
    }
}
