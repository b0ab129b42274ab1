// ********* Input data structures ***********

use std::collections::BTreeMap;
use std::fmt::Display;

/// The default front tag, used for every party that is not listed in the
/// party groups table.
pub const DEFAULT_GROUP: &str = "IND";

/// One row of the trends feed: one candidate standing in one ward.
///
/// Rows come straight from the feed and may be incomplete. An empty local body
/// code makes the row unusable, a missing vote count is read as zero.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct CandidateRow {
    pub district: String,
    pub local_body_code: String,
    pub local_body_name: String,
    pub ward_number: String,
    pub ward_name: String,
    pub candidate_name: String,
    pub party_label: String,
    /// Zero means that no result has been declared yet.
    pub vote_count: u64,
    /// Free text such as "Leading" or "Won". Advisory only.
    pub status_hint: String,
}

/// The political fronts that seats are tallied against.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Front {
    Ldf,
    Udf,
    Nda,
    /// Independents and every party outside the three main fronts.
    Ind,
}

impl Front {
    pub const ALL: [Front; 4] = [Front::Ldf, Front::Udf, Front::Nda, Front::Ind];

    /// Maps a front tag to its seat bucket. Any tag that is not one of the
    /// three main fronts is counted with the independents.
    pub fn from_tag(tag: &str) -> Front {
        match tag.trim().to_uppercase().as_str() {
            "LDF" => Front::Ldf,
            "UDF" => Front::Udf,
            "NDA" => Front::Nda,
            _ => Front::Ind,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Front::Ldf => "LDF",
            Front::Udf => "UDF",
            Front::Nda => "NDA",
            Front::Ind => DEFAULT_GROUP,
        }
    }
}

impl Display for Front {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

// ******** Output data structures *********

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct WardCandidate {
    pub name: String,
    /// The party label, trimmed and upper-cased.
    pub party: String,
    /// The front tag from the party groups table (IND when unknown).
    pub group: String,
    pub front: Front,
    pub votes: u64,
}

/// The outcome of a single ward.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct WardResult {
    pub ward_number: String,
    pub ward_name: String,
    /// Sorted by decreasing number of votes. Candidates with the same number
    /// of votes keep the order of the feed.
    pub candidates: Vec<WardCandidate>,
    // Index into candidates. Only ever 0 when set.
    pub(crate) winner_idx: Option<usize>,
    /// The last candidate flagged as leading by the feed, if any.
    pub leading: Option<WardCandidate>,
}

impl WardResult {
    /// The declared winner: the top candidate, provided they received at
    /// least one vote.
    pub fn winner(&self) -> Option<&WardCandidate> {
        self.winner_idx.and_then(|idx| self.candidates.get(idx))
    }

    pub fn is_declared(&self) -> bool {
        self.winner().is_some()
    }

    /// The candidate to display as ahead when nothing is declared yet: the
    /// leading hint from the feed, or else the top candidate if they have
    /// votes. None when the ward is declared.
    pub fn provisional_leader(&self) -> Option<&WardCandidate> {
        if self.is_declared() {
            return None;
        }
        self.leading
            .as_ref()
            .or_else(|| self.candidates.first().filter(|c| c.votes > 0))
    }
}

/// Declared seats per front.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct SeatTally {
    pub ldf: u32,
    pub udf: u32,
    pub nda: u32,
    pub ind: u32,
}

impl SeatTally {
    pub fn get(&self, front: Front) -> u32 {
        match front {
            Front::Ldf => self.ldf,
            Front::Udf => self.udf,
            Front::Nda => self.nda,
            Front::Ind => self.ind,
        }
    }

    pub fn add_seat(&mut self, front: Front) {
        match front {
            Front::Ldf => self.ldf += 1,
            Front::Udf => self.udf += 1,
            Front::Nda => self.nda += 1,
            Front::Ind => self.ind += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.ldf + self.udf + self.nda + self.ind
    }

    /// A single front with the most seats, Hung when several fronts share
    /// the maximum, N/A when no seat is declared.
    pub fn leading_front(&self) -> LeadingFront {
        let max_seats = Front::ALL.iter().map(|f| self.get(*f)).max().unwrap_or(0);
        if max_seats == 0 {
            return LeadingFront::NotAvailable;
        }
        let leaders: Vec<Front> = Front::ALL
            .iter()
            .filter(|f| self.get(**f) == max_seats)
            .cloned()
            .collect();
        match leaders.as_slice() {
            [front] => LeadingFront::Front(*front),
            _ => LeadingFront::Hung,
        }
    }
}

impl std::ops::AddAssign for SeatTally {
    fn add_assign(&mut self, rhs: SeatTally) {
        self.ldf += rhs.ldf;
        self.udf += rhs.udf;
        self.nda += rhs.nda;
        self.ind += rhs.ind;
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum LeadingFront {
    Front(Front),
    /// Two or more fronts tied on the most declared seats.
    Hung,
    /// No declared seat yet.
    NotAvailable,
}

impl Display for LeadingFront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeadingFront::Front(front) => write!(f, "{}", front),
            LeadingFront::Hung => write!(f, "Hung"),
            LeadingFront::NotAvailable => write!(f, "N/A"),
        }
    }
}

/// The aggregated trends of one local body.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct LocalBodyResult {
    pub code: String,
    pub name: String,
    pub district: String,
    /// Keyed by the ward number as written in the feed.
    pub wards: BTreeMap<String, WardResult>,
    pub seats: SeatTally,
    pub wards_declared: u32,
    pub leading_front: LeadingFront,
}

// ********* Registry structures **********

#[derive(Eq, PartialEq, Debug, Clone, Hash, Ord, PartialOrd)]
pub enum LocalBodyType {
    MunicipalCorporation,
    Municipality,
    GramaPanchayat,
    BlockPanchayat,
    DistrictPanchayat,
    Other(String),
}

impl LocalBodyType {
    pub fn parse(label: &str) -> LocalBodyType {
        match label.trim().to_lowercase().as_str() {
            "municipal corporation" | "corporation" => LocalBodyType::MunicipalCorporation,
            "municipality" => LocalBodyType::Municipality,
            "grama panchayat" => LocalBodyType::GramaPanchayat,
            "block panchayat" => LocalBodyType::BlockPanchayat,
            "district panchayat" => LocalBodyType::DistrictPanchayat,
            _ => LocalBodyType::Other(label.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            LocalBodyType::MunicipalCorporation => "Municipal Corporation",
            LocalBodyType::Municipality => "Municipality",
            LocalBodyType::GramaPanchayat => "Grama Panchayat",
            LocalBodyType::BlockPanchayat => "Block Panchayat",
            LocalBodyType::DistrictPanchayat => "District Panchayat",
            LocalBodyType::Other(s) => s.as_str(),
        }
    }

    /// Corporations, municipalities and grama panchayats own the wards that
    /// voters are registered in. Block and district panchayats are built on
    /// top of them.
    pub fn is_base_tier(&self) -> bool {
        matches!(
            self,
            LocalBodyType::MunicipalCorporation
                | LocalBodyType::Municipality
                | LocalBodyType::GramaPanchayat
        )
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct LocalBody {
    pub code: String,
    pub name: String,
    pub kind: LocalBodyType,
    /// Normalized with `normalize_district_name`.
    pub district: String,
    pub total_wards: u32,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Ward {
    pub code: String,
    pub name: String,
    /// Taken from the last three characters of the ward code.
    pub number: u32,
    pub local_body_code: String,
    pub total_voters: u64,
    pub male_voters: u64,
    pub female_voters: u64,
    pub other_voters: u64,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PollingStation {
    pub number: u32,
    pub name: String,
    pub ward_code: String,
    pub local_body_code: String,
}
