mod config;
pub mod builder;
pub mod geometry;
pub mod manual;
pub mod navigation;
pub mod party;
pub mod registry;

use log::{debug, info};

use std::collections::BTreeMap;

pub use crate::config::*;
pub use crate::party::PartyGroups;
pub use crate::registry::normalize_district_name;

// **** Private structures ****

// A ward while rows are still being collected.
#[derive(Debug, Clone)]
struct PendingWard {
    ward_name: String,
    // In the order of the feed.
    candidates: Vec<WardCandidate>,
    leading: Option<WardCandidate>,
}

#[derive(Debug, Clone)]
struct PendingLocalBody {
    name: String,
    district: String,
    wards: BTreeMap<String, PendingWard>,
}

fn is_leading_status(status: &str) -> bool {
    status.trim().eq_ignore_ascii_case("leading")
}

/// Aggregates the rows of the trends feed into one result per local body,
/// keyed by local body code.
///
/// Arguments:
/// * `rows` the rows of the feed, in the order of the feed
/// * `groups` the party groups used to assign candidates to fronts
///
/// Rows without a local body code are dropped. The winner of a ward is the
/// candidate with the most votes, provided that number is not zero; the status
/// column of the feed never decides a winner. The function keeps no state
/// between calls.
pub fn aggregate(
    rows: &[CandidateRow],
    groups: &PartyGroups,
) -> BTreeMap<String, LocalBodyResult> {
    info!(
        "aggregate: processing {:?} rows with {:?} party groups",
        rows.len(),
        groups.len()
    );

    let mut pending: BTreeMap<String, PendingLocalBody> = BTreeMap::new();
    let mut skipped: usize = 0;

    for (idx, row) in rows.iter().enumerate() {
        let lb_code = row.local_body_code.trim();
        if lb_code.is_empty() {
            debug!("aggregate: row {}: no local body code, skipping", idx);
            skipped += 1;
            continue;
        }

        let lb = pending
            .entry(lb_code.to_string())
            .or_insert_with(|| PendingLocalBody {
                name: row.local_body_name.trim().to_string(),
                district: normalize_district_name(&row.district),
                wards: BTreeMap::new(),
            });

        // The local body is known even if this row cannot be placed in a ward.
        let ward_no = row.ward_number.trim();
        if ward_no.is_empty() {
            debug!("aggregate: row {}: no ward number for {}, skipping", idx, lb_code);
            skipped += 1;
            continue;
        }

        let ward = lb
            .wards
            .entry(ward_no.to_string())
            .or_insert_with(|| PendingWard {
                ward_name: row.ward_name.trim().to_string(),
                candidates: Vec::new(),
                leading: None,
            });

        let group = groups.resolve(&row.party_label).to_string();
        let candidate = WardCandidate {
            name: row.candidate_name.trim().to_string(),
            party: party::normalize_party(&row.party_label),
            front: Front::from_tag(&group),
            group,
            votes: row.vote_count,
        };

        if is_leading_status(&row.status_hint) {
            ward.leading = Some(candidate.clone());
        }
        ward.candidates.push(candidate);
    }

    if skipped > 0 {
        debug!("aggregate: skipped {} incomplete rows", skipped);
    }

    let results: BTreeMap<String, LocalBodyResult> = pending
        .into_iter()
        .map(|(code, lb)| {
            let res = finalize_local_body(code.clone(), lb);
            (code, res)
        })
        .collect();
    info!("aggregate: {} local bodies with trends", results.len());
    results
}

fn finalize_ward(ward_number: String, pw: PendingWard) -> WardResult {
    let mut candidates = pw.candidates;
    // sort_by is stable: equal vote counts keep the order of the feed.
    candidates.sort_by(|a, b| b.votes.cmp(&a.votes));

    let winner_idx = match candidates.first() {
        Some(top) if top.votes > 0 => Some(0),
        _ => None,
    };

    WardResult {
        ward_number,
        ward_name: pw.ward_name,
        candidates,
        winner_idx,
        leading: pw.leading,
    }
}

fn finalize_local_body(code: String, lb: PendingLocalBody) -> LocalBodyResult {
    let mut seats = SeatTally::default();
    let mut wards_declared: u32 = 0;
    let mut wards: BTreeMap<String, WardResult> = BTreeMap::new();

    for (ward_no, pw) in lb.wards {
        let wr = finalize_ward(ward_no.clone(), pw);
        if let Some(winner) = wr.winner() {
            wards_declared += 1;
            seats.add_seat(winner.front);
        }
        wards.insert(ward_no, wr);
    }

    let leading_front = seats.leading_front();
    debug!(
        "finalize_local_body: {}: {} wards declared, seats {:?}, leading {}",
        code, wards_declared, seats, leading_front
    );

    LocalBodyResult {
        code,
        name: lb.name,
        district: lb.district,
        wards,
        seats,
        wards_declared,
        leading_front,
    }
}
