//! The administrative registry: local bodies, wards and polling stations,
//! joined to the aggregated trends by local body code.
//!
//! Two district-name rules live here and they do not agree with each other on
//! purpose. [`normalize_district_name`] produces the official spelling used as
//! the district key of the registry. [`tile_district_key`] produces the key of
//! the per-district map files, which were published under a misspelled name
//! for one district.

use log::debug;

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::config::*;

/// Name used to select every district at once.
pub const STATE_NAME: &str = "Kerala";

const SEARCH_LIMIT: usize = 10;

// Common spellings in the source tables mapped to the official district names.
const REGISTRY_DISTRICT_OVERRIDES: [(&str, &str); 2] = [
    ("Kasargod", "Kasaragod"),
    ("Thiruvanathapuram", "Thiruvananthapuram"),
];

// The map files use this spelling for their directory and file names.
const TILE_DISTRICT_OVERRIDES: [(&str, &str); 1] =
    [("Thiruvananthapuram", "Thiruvanathapuram")];

fn title_case_words(s: &str) -> String {
    let mut res = String::with_capacity(s.len());
    let mut prev_is_word = false;
    for c in s.chars() {
        let is_word = c.is_alphanumeric() || c == '_';
        if is_word && !prev_is_word {
            res.extend(c.to_uppercase());
        } else {
            res.push(c);
        }
        prev_is_word = is_word;
    }
    res
}

fn apply_overrides(name: String, overrides: &[(&str, &str)]) -> String {
    overrides
        .iter()
        .find(|(from, _)| *from == name)
        .map(|(_, to)| to.to_string())
        .unwrap_or(name)
}

/// Canonical district name: trimmed, every word capitalized, known
/// misspellings corrected.
pub fn normalize_district_name(raw: &str) -> String {
    let titled = title_case_words(&raw.trim().to_lowercase());
    apply_overrides(titled, &REGISTRY_DISTRICT_OVERRIDES)
}

/// Key of the per-district map files. Only the first letter of the whole
/// name is capitalized.
pub fn tile_district_key(district: &str) -> String {
    let trimmed = district.trim();
    let mut chars = trimmed.chars();
    let key = match chars.next() {
        Some(first) => {
            let mut s: String = first.to_uppercase().collect();
            s.push_str(&chars.as_str().to_lowercase());
            s
        }
        None => String::new(),
    };
    apply_overrides(key, &TILE_DISTRICT_OVERRIDES)
}

/// The statistics selected on the dashboard.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Kpi {
    Corporations,
    Municipalities,
    GramaPanchayats,
    BlockPanchayats,
    DistrictPanchayats,
    Voters,
    TotalWards,
    PollingStations,
}

impl Kpi {
    /// The local body type behind a KPI, for the KPIs that count bodies.
    pub fn local_body_type(&self) -> Option<LocalBodyType> {
        match self {
            Kpi::Corporations => Some(LocalBodyType::MunicipalCorporation),
            Kpi::Municipalities => Some(LocalBodyType::Municipality),
            Kpi::GramaPanchayats => Some(LocalBodyType::GramaPanchayat),
            Kpi::BlockPanchayats => Some(LocalBodyType::BlockPanchayat),
            Kpi::DistrictPanchayats => Some(LocalBodyType::DistrictPanchayat),
            Kpi::Voters | Kpi::TotalWards | Kpi::PollingStations => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Kpi::Corporations => "Corporations",
            Kpi::Municipalities => "Municipalities",
            Kpi::GramaPanchayats => "Grama Panchayats",
            Kpi::BlockPanchayats => "Block Panchayats",
            Kpi::DistrictPanchayats => "District Panchayats",
            Kpi::Voters => "Total Voters",
            Kpi::TotalWards => "Total Wards",
            Kpi::PollingStations => "Polling Stations",
        }
    }

    pub fn parse(s: &str) -> Option<Kpi> {
        let compact: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect();
        let k = match compact.as_str() {
            "corporations" => Kpi::Corporations,
            "municipalities" => Kpi::Municipalities,
            "gramapanchayats" => Kpi::GramaPanchayats,
            "blockpanchayats" => Kpi::BlockPanchayats,
            "districtpanchayats" => Kpi::DistrictPanchayats,
            "voters" | "totalvoters" => Kpi::Voters,
            "totalwards" | "wards" => Kpi::TotalWards,
            "pollingstations" | "stations" => Kpi::PollingStations,
            _ => return None,
        };
        Some(k)
    }
}

/// The statewide headline numbers.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct DashboardCounts {
    pub corporations: usize,
    pub municipalities: usize,
    pub grama_panchayats: usize,
    pub block_panchayats: usize,
    pub district_panchayats: usize,
    /// Voters registered in the wards of base-tier bodies.
    pub voters: u64,
    /// Polling stations of base-tier bodies.
    pub polling_stations: usize,
    pub total_wards: u64,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DistrictRow {
    pub district: String,
    pub kpi_count: u64,
    pub total_wards: u64,
    pub voters: u64,
    pub stations: usize,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct LocalBodyDetail {
    pub local_body: LocalBody,
    pub wards: Vec<Ward>,
    pub total_voters: u64,
    pub polling_stations: usize,
}

/// Trends rolled up over the local bodies of one district.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DistrictSummary {
    pub district: String,
    pub local_bodies: usize,
    pub wards_declared: u32,
    pub seats: SeatTally,
    /// Number of local bodies per leading front, keyed by its display name
    /// (a front tag, Hung or N/A).
    pub leads: BTreeMap<String, usize>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Registry {
    pub local_bodies: Vec<LocalBody>,
    pub wards: Vec<Ward>,
    pub polling_stations: Vec<PollingStation>,
}

impl Registry {
    pub fn new(
        local_bodies: Vec<LocalBody>,
        wards: Vec<Ward>,
        polling_stations: Vec<PollingStation>,
    ) -> Registry {
        Registry {
            local_bodies,
            wards,
            polling_stations,
        }
    }

    pub fn empty() -> Registry {
        Registry::default()
    }

    pub fn local_body(&self, code: &str) -> Option<&LocalBody> {
        self.local_bodies.iter().find(|lb| lb.code == code)
    }

    /// The trends of a registered local body. None when either side does not
    /// know the code.
    pub fn result_for<'a>(
        &self,
        code: &str,
        results: &'a BTreeMap<String, LocalBodyResult>,
    ) -> Option<&'a LocalBodyResult> {
        self.local_body(code)?;
        results.get(code)
    }

    /// All district names, sorted.
    pub fn districts(&self) -> Vec<String> {
        let ds: BTreeSet<&String> = self.local_bodies.iter().map(|lb| &lb.district).collect();
        ds.into_iter().cloned().collect()
    }

    fn count_kind(&self, kind: &LocalBodyType) -> usize {
        self.local_bodies.iter().filter(|lb| lb.kind == *kind).count()
    }

    fn voters_in(&self, codes: &HashSet<&str>) -> u64 {
        self.wards
            .iter()
            .filter(|w| codes.contains(w.local_body_code.as_str()))
            .map(|w| w.total_voters)
            .sum()
    }

    fn stations_in(&self, codes: &HashSet<&str>) -> usize {
        self.polling_stations
            .iter()
            .filter(|ps| codes.contains(ps.local_body_code.as_str()))
            .count()
    }

    // Stations of a district panchayat are those of the grama panchayats of
    // its district.
    fn district_gp_codes(&self, district: &str) -> HashSet<&str> {
        self.local_bodies
            .iter()
            .filter(|lb| lb.district == district && lb.kind == LocalBodyType::GramaPanchayat)
            .map(|lb| lb.code.as_str())
            .collect()
    }

    pub fn counts(&self) -> DashboardCounts {
        let base_codes: HashSet<&str> = self
            .local_bodies
            .iter()
            .filter(|lb| lb.kind.is_base_tier())
            .map(|lb| lb.code.as_str())
            .collect();
        DashboardCounts {
            corporations: self.count_kind(&LocalBodyType::MunicipalCorporation),
            municipalities: self.count_kind(&LocalBodyType::Municipality),
            grama_panchayats: self.count_kind(&LocalBodyType::GramaPanchayat),
            block_panchayats: self.count_kind(&LocalBodyType::BlockPanchayat),
            district_panchayats: self.count_kind(&LocalBodyType::DistrictPanchayat),
            voters: self.voters_in(&base_codes),
            polling_stations: self.stations_in(&base_codes),
            total_wards: self.local_bodies.iter().map(|lb| lb.total_wards as u64).sum(),
        }
    }

    /// One row per district for the selected KPI.
    ///
    /// KPIs that count a type of local body only report on bodies of that
    /// type, and districts without such bodies are left out. The other KPIs
    /// report the base-tier totals of every district.
    pub fn district_table(&self, kpi: Option<Kpi>) -> Vec<DistrictRow> {
        let kind = kpi.and_then(|k| k.local_body_type());
        let mut rows: Vec<DistrictRow> = Vec::new();
        for district in self.districts() {
            let district_lbs: Vec<&LocalBody> = self
                .local_bodies
                .iter()
                .filter(|lb| lb.district == district)
                .collect();
            let all_wards: u64 = district_lbs.iter().map(|lb| lb.total_wards as u64).sum();

            let row = if let Some(kind) = &kind {
                let selected: Vec<&&LocalBody> =
                    district_lbs.iter().filter(|lb| lb.kind == *kind).collect();
                if selected.is_empty() {
                    debug!("district_table: no {:?} in {}", kind, district);
                    continue;
                }
                let codes: HashSet<&str> = selected.iter().map(|lb| lb.code.as_str()).collect();
                let stations = if *kind == LocalBodyType::DistrictPanchayat {
                    self.stations_in(&self.district_gp_codes(&district))
                } else {
                    self.stations_in(&codes)
                };
                DistrictRow {
                    kpi_count: selected.len() as u64,
                    total_wards: selected.iter().map(|lb| lb.total_wards as u64).sum(),
                    voters: self.voters_in(&codes),
                    stations,
                    district,
                }
            } else {
                let base_codes: HashSet<&str> = district_lbs
                    .iter()
                    .filter(|lb| lb.kind.is_base_tier())
                    .map(|lb| lb.code.as_str())
                    .collect();
                let kpi_count = match kpi {
                    Some(Kpi::TotalWards) => all_wards,
                    _ => district_lbs.len() as u64,
                };
                DistrictRow {
                    kpi_count,
                    total_wards: all_wards,
                    voters: self.voters_in(&base_codes),
                    stations: self.stations_in(&base_codes),
                    district,
                }
            };
            rows.push(row);
        }
        rows
    }

    pub fn local_body_detail(&self, code: &str) -> Option<LocalBodyDetail> {
        let lb = self.local_body(code)?;
        let wards: Vec<Ward> = self
            .wards
            .iter()
            .filter(|w| w.local_body_code == lb.code)
            .cloned()
            .collect();
        let total_voters = wards.iter().map(|w| w.total_voters).sum();
        let polling_stations = if lb.kind == LocalBodyType::DistrictPanchayat {
            self.stations_in(&self.district_gp_codes(&lb.district))
        } else {
            self.polling_stations
                .iter()
                .filter(|ps| ps.local_body_code == lb.code)
                .count()
        };
        Some(LocalBodyDetail {
            local_body: lb.clone(),
            wards,
            total_voters,
            polling_stations,
        })
    }

    /// The local bodies of a type in a district, or in the whole state when
    /// the district is [`STATE_NAME`].
    pub fn drill_down(&self, district: &str, kind: &LocalBodyType) -> Vec<&LocalBody> {
        self.local_bodies
            .iter()
            .filter(|lb| lb.kind == *kind)
            .filter(|lb| district == STATE_NAME || lb.district == district)
            .collect()
    }

    /// Local bodies whose name contains the term, ignoring case. Returns at
    /// most ten bodies, nothing for an empty term.
    pub fn search(&self, term: &str) -> Vec<&LocalBody> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.local_bodies
            .iter()
            .filter(|lb| lb.name.to_lowercase().contains(&needle))
            .take(SEARCH_LIMIT)
            .collect()
    }

    /// Rolls the trends up by district. The district of a local body comes
    /// from the registry when the code is registered and from the feed
    /// otherwise. When a type is given, only registered bodies of that type
    /// are included.
    pub fn district_summaries(
        &self,
        results: &BTreeMap<String, LocalBodyResult>,
        kind: Option<&LocalBodyType>,
    ) -> Vec<DistrictSummary> {
        let mut by_district: BTreeMap<String, DistrictSummary> = BTreeMap::new();
        for res in results.values() {
            let registered = self.local_body(&res.code);
            if let Some(kind) = kind {
                match registered {
                    Some(lb) if lb.kind == *kind => {}
                    _ => continue,
                }
            }
            let district = registered
                .map(|lb| lb.district.clone())
                .unwrap_or_else(|| res.district.clone());
            let summary = by_district
                .entry(district.clone())
                .or_insert_with(|| DistrictSummary {
                    district,
                    local_bodies: 0,
                    wards_declared: 0,
                    seats: SeatTally::default(),
                    leads: BTreeMap::new(),
                });
            summary.local_bodies += 1;
            summary.wards_declared += res.wards_declared;
            summary.seats += res.seats;
            *summary.leads.entry(res.leading_front.to_string()).or_insert(0) += 1;
        }
        by_district.into_values().collect()
    }
}
