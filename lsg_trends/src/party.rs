use std::collections::HashMap;

use log::debug;

use crate::config::{Front, DEFAULT_GROUP};

/// Lookup table from party labels to front tags.
///
/// Both sides are stored trimmed and upper-cased. A party that is missing from
/// the table belongs to the independents. An empty table is a valid table: when
/// the party groups file cannot be read, every candidate is independent and the
/// rest of the aggregation proceeds.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct PartyGroups {
    groups: HashMap<String, String>,
}

pub fn normalize_party(raw: &str) -> String {
    raw.trim().to_uppercase()
}

impl PartyGroups {
    pub fn empty() -> PartyGroups {
        PartyGroups::default()
    }

    /// Builds the table from (party, group) pairs. Pairs with an empty side
    /// are skipped. A party listed twice takes the last group.
    pub fn from_pairs<I, P, G>(pairs: I) -> PartyGroups
    where
        I: IntoIterator<Item = (P, G)>,
        P: AsRef<str>,
        G: AsRef<str>,
    {
        let mut groups: HashMap<String, String> = HashMap::new();
        for (party, group) in pairs {
            let party = normalize_party(party.as_ref());
            let group = normalize_party(group.as_ref());
            if party.is_empty() || group.is_empty() {
                debug!("PartyGroups: skipping incomplete pair {:?} {:?}", party, group);
                continue;
            }
            groups.insert(party, group);
        }
        PartyGroups { groups }
    }

    /// The front tag of a party. Never fails.
    pub fn resolve(&self, raw_label: &str) -> &str {
        self.groups
            .get(&normalize_party(raw_label))
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_GROUP)
    }

    pub fn front(&self, raw_label: &str) -> Front {
        Front::from_tag(self.resolve(raw_label))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
