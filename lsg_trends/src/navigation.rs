//! The drill-down through the dashboard views.
//!
//! The state overview leads to a district, the district to one of its local
//! bodies. Each step back goes up exactly one level; `Home` goes straight to
//! the overview.

use log::debug;

use std::error::Error;
use std::fmt::Display;
use std::path::PathBuf;

use crate::registry::{normalize_district_name, tile_district_key, STATE_NAME};

#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum View {
    StateOverview,
    /// `code` is the feature that was selected on the state map.
    DistrictDetail { district: String, code: String },
    /// `district_code` is the `code` of the district view it was opened from.
    LocalBodyDetail {
        district: String,
        district_code: String,
        code: String,
    },
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Event {
    SelectFeature {
        code: String,
        district: Option<String>,
    },
    Back,
    Home,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum NavigationError {
    /// A feature selected on the state map did not name its district.
    MissingDistrict { code: String },
    EmptyCode,
    InvalidTransition { from: View, event: Event },
}

impl Error for NavigationError {}

impl Display for NavigationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NavigationError::MissingDistrict { code } => {
                write!(f, "feature {} has no district", code)
            }
            NavigationError::EmptyCode => write!(f, "selected feature has no code"),
            NavigationError::InvalidTransition { from, event } => {
                write!(f, "cannot apply {:?} to view {:?}", event, from)
            }
        }
    }
}

/// The layers of tiles that a map can show.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum MapLayer {
    District,
    Block,
    Grama,
}

impl MapLayer {
    pub fn parse(s: &str) -> Option<MapLayer> {
        match s.trim().to_lowercase().as_str() {
            "district" => Some(MapLayer::District),
            "block" => Some(MapLayer::Block),
            "grama" => Some(MapLayer::Grama),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            MapLayer::District => "district",
            MapLayer::Block => "block",
            MapLayer::Grama => "grama",
        }
    }

    /// The layer shown first when entering a view.
    pub fn default_for(view: &View) -> MapLayer {
        match view {
            View::StateOverview => MapLayer::District,
            _ => MapLayer::Grama,
        }
    }

    fn state_file(&self) -> &'static str {
        match self {
            MapLayer::District => "districts.json",
            MapLayer::Block => "block-panchayats.json",
            MapLayer::Grama => "grama-panchayats.json",
        }
    }
}

/// The geometry file a view needs, relative to the maps directory.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum MapRequest {
    StateTiles { layer: MapLayer },
    DistrictTiles { tile_key: String, layer: MapLayer },
    LocalBodyWards { district: String, code: String },
}

impl MapRequest {
    pub fn relative_path(&self) -> PathBuf {
        let mut p = PathBuf::new();
        match self {
            MapRequest::StateTiles { layer } => {
                p.push("topojson");
                p.push(STATE_NAME);
                p.push(layer.state_file());
            }
            MapRequest::DistrictTiles { tile_key, layer } => {
                p.push("topojson");
                p.push(STATE_NAME);
                p.push("district_maps");
                p.push(format!("{}_{}.json", tile_key, layer.tag()));
            }
            MapRequest::LocalBodyWards { district, code } => {
                p.push("geojson");
                p.push(STATE_NAME);
                p.push("districts");
                p.push(district);
                p.push(format!("{}.json", code));
            }
        }
        p
    }
}

impl View {
    pub fn home() -> View {
        View::StateOverview
    }

    pub fn district(&self) -> Option<&str> {
        match self {
            View::StateOverview => None,
            View::DistrictDetail { district, .. } | View::LocalBodyDetail { district, .. } => {
                Some(district.as_str())
            }
        }
    }

    /// Applies an event. The current view is left as is when the event does
    /// not apply.
    pub fn apply(&self, event: Event) -> Result<View, NavigationError> {
        let next = match (self, event) {
            (_, Event::SelectFeature { code, .. }) if code.trim().is_empty() => {
                return Err(NavigationError::EmptyCode)
            }
            (View::StateOverview, Event::SelectFeature { code, district }) => {
                let district = district
                    .as_deref()
                    .map(normalize_district_name)
                    .filter(|d| !d.is_empty())
                    .ok_or_else(|| NavigationError::MissingDistrict { code: code.clone() })?;
                View::DistrictDetail { district, code }
            }
            (
                View::DistrictDetail {
                    district,
                    code: district_code,
                },
                Event::SelectFeature { code, .. },
            ) => View::LocalBodyDetail {
                district: district.clone(),
                district_code: district_code.clone(),
                code,
            },
            (View::DistrictDetail { .. }, Event::Back | Event::Home) => View::StateOverview,
            (
                View::LocalBodyDetail {
                    district,
                    district_code,
                    ..
                },
                Event::Back,
            ) => View::DistrictDetail {
                district: district.clone(),
                code: district_code.clone(),
            },
            (View::LocalBodyDetail { .. }, Event::Home) => View::StateOverview,
            (from, event) => {
                return Err(NavigationError::InvalidTransition {
                    from: from.clone(),
                    event,
                })
            }
        };
        debug!("View::apply: {:?} -> {:?}", self, next);
        Ok(next)
    }

    pub fn map_request(&self, layer: MapLayer) -> MapRequest {
        match self {
            View::StateOverview => MapRequest::StateTiles { layer },
            View::DistrictDetail { district, .. } => MapRequest::DistrictTiles {
                tile_key: tile_district_key(district),
                layer,
            },
            View::LocalBodyDetail { district, code, .. } => MapRequest::LocalBodyWards {
                district: district.clone(),
                code: code.clone(),
            },
        }
    }
}

impl Default for View {
    fn default() -> Self {
        View::StateOverview
    }
}
