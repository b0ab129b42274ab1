use std::collections::BTreeMap;

pub use crate::config::*;
use crate::party::PartyGroups;

/// A builder for collecting the rows of a trends feed.
///
/// Readers that stream the feed can push rows as they are parsed and
/// aggregate once at the end.
///
/// ```
/// use lsg_trends::builder::TrendBuilder;
/// use lsg_trends::{CandidateRow, PartyGroups};
///
/// let groups = PartyGroups::from_pairs(vec![("INC", "UDF")]);
/// let mut builder = TrendBuilder::new(&groups);
///
/// builder.add_row(CandidateRow {
///     local_body_code: "G07001".to_string(),
///     ward_number: "1".to_string(),
///     candidate_name: "Anna".to_string(),
///     party_label: "INC".to_string(),
///     vote_count: 412,
///     ..Default::default()
/// });
///
/// let results = builder.build();
/// assert_eq!(results["G07001"].leading_front.to_string(), "UDF");
/// ```
pub struct TrendBuilder {
    pub(crate) _groups: PartyGroups,
    pub(crate) _rows: Vec<CandidateRow>,
}

impl TrendBuilder {
    pub fn new(groups: &PartyGroups) -> TrendBuilder {
        TrendBuilder {
            _groups: groups.clone(),
            _rows: Vec::new(),
        }
    }

    /// Replaces the party groups. The rows already added are kept.
    pub fn groups(self, groups: &PartyGroups) -> TrendBuilder {
        TrendBuilder {
            _groups: groups.clone(),
            _rows: self._rows,
        }
    }

    /// Adds a row. Incomplete rows are accepted here and dropped at
    /// aggregation time.
    pub fn add_row(&mut self, row: CandidateRow) {
        self._rows.push(row);
    }

    pub fn add_rows<I: IntoIterator<Item = CandidateRow>>(&mut self, rows: I) {
        self._rows.extend(rows);
    }

    pub fn len(&self) -> usize {
        self._rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self._rows.is_empty()
    }

    pub fn build(&self) -> BTreeMap<String, LocalBodyResult> {
        crate::aggregate(&self._rows, &self._groups)
    }
}
