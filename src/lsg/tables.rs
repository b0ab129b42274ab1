// Mapping of table records to the registry, party groups and trends.

use crate::lsg::io_common::{parse_count, TableRecord};
use crate::lsg::*;

// The ward number is the last three characters of the ward code.
fn ward_number_from_code(code: &str) -> u32 {
    let tail: Vec<char> = code.chars().rev().take(3).collect();
    let tail: String = tail.into_iter().rev().collect();
    tail.parse::<u32>().unwrap_or(0)
}

// Numeric ward numbers are keyed by their value, so that "01" and "1.0" join
// the map feature with `Ward_No: 1`.
fn normalize_ward_number(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<u64>() {
        return n.to_string();
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 => format!("{}", f as u64),
        _ => raw.to_string(),
    }
}

pub fn local_bodies_from_records(records: &[TableRecord]) -> Vec<LocalBody> {
    records
        .iter()
        .filter(|r| !r.get("Local Body Code").is_empty())
        .map(|r| LocalBody {
            code: r.get("Local Body Code").to_string(),
            name: r.get("Local Body Name").to_string(),
            kind: LocalBodyType::parse(r.get("Local Body Type")),
            district: normalize_district_name(r.get("District")),
            total_wards: parse_count(r.get("Ward Count")) as u32,
        })
        .collect()
}

pub fn wards_from_records(records: &[TableRecord]) -> Vec<Ward> {
    records
        .iter()
        .filter(|r| !r.get("Ward Code").is_empty())
        .map(|r| Ward {
            code: r.get("Ward Code").to_string(),
            name: r.get("Ward Name").to_string(),
            number: ward_number_from_code(r.get("Ward Code")),
            local_body_code: r.get("Local Body Code").to_string(),
            total_voters: parse_count(r.get("Total")),
            male_voters: parse_count(r.get("Males")),
            female_voters: parse_count(r.get("Females")),
            other_voters: parse_count(r.get("Others")),
        })
        .collect()
}

pub fn polling_stations_from_records(records: &[TableRecord]) -> Vec<PollingStation> {
    records
        .iter()
        .filter(|r| !r.get("Local Body Code").is_empty())
        .map(|r| PollingStation {
            number: parse_count(r.get("PS No")) as u32,
            name: r.get("PS Name").to_string(),
            ward_code: r.get("Ward Code").to_string(),
            local_body_code: r.get("Local Body Code").to_string(),
        })
        .collect()
}

pub fn party_groups_from_records(records: &[TableRecord]) -> PartyGroups {
    PartyGroups::from_pairs(
        records
            .iter()
            .map(|r| (r.get("Party"), r.get("Party Group"))),
    )
}

/// Rows are mapped as they are; incomplete rows are dropped by the
/// aggregation.
pub fn candidate_rows_from_records(records: &[TableRecord]) -> Vec<CandidateRow> {
    records
        .iter()
        .inspect(|r| {
            if r.get("LB_Code").is_empty() {
                debug!("candidate_rows_from_records: line {}: no LB_Code", r.lineno);
            }
        })
        .map(|r| CandidateRow {
            district: r.get("District").to_string(),
            local_body_code: r.get("LB_Code").to_string(),
            local_body_name: r.get("LB_Name").to_string(),
            ward_number: normalize_ward_number(r.get("Ward_No")),
            ward_name: r.get("Ward_Name").to_string(),
            candidate_name: r.get("Candidate_Name").to_string(),
            party_label: r.get("Party").to_string(),
            vote_count: parse_count(r.get("Votes")),
            status_hint: r.get("Status").to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(lineno: usize, pairs: Vec<(&str, &str)>) -> TableRecord {
        TableRecord::from_pairs(lineno, pairs)
    }

    #[test]
    fn local_bodies() {
        let lbs = local_bodies_from_records(&[
            rec(
                2,
                vec![
                    ("Local Body Code", "G01001"),
                    ("Local Body Name", "Kunjathur"),
                    ("Local Body Type", "Grama Panchayat"),
                    ("District", "KASARGOD"),
                    ("Ward Count", "15"),
                ],
            ),
            rec(3, vec![("Local Body Code", ""), ("Local Body Name", "Ghost")]),
            rec(
                4,
                vec![
                    ("Local Body Code", "C13001"),
                    ("Local Body Type", "Municipal Corporation"),
                    ("District", "thiruvanathapuram"),
                ],
            ),
        ]);
        assert_eq!(lbs.len(), 2);
        assert_eq!(lbs[0].district, "Kasaragod");
        assert_eq!(lbs[0].kind, LocalBodyType::GramaPanchayat);
        assert_eq!(lbs[0].total_wards, 15);
        assert_eq!(lbs[1].district, "Thiruvananthapuram");
        assert_eq!(lbs[1].total_wards, 0);
    }

    #[test]
    fn wards() {
        let wards = wards_from_records(&[rec(
            2,
            vec![
                ("Ward Code", "G01001012"),
                ("Ward Name", "Hill"),
                ("Local Body Code", "G01001"),
                ("Total", "1520"),
                ("Males", "760"),
                ("Females", "758"),
                ("Others", ""),
            ],
        )]);
        assert_eq!(wards[0].number, 12);
        assert_eq!(wards[0].total_voters, 1520);
        assert_eq!(wards[0].other_voters, 0);
        assert_eq!(ward_number_from_code("AB"), 0);
        assert_eq!(ward_number_from_code("X7"), 7);
    }

    #[test]
    fn polling_stations_need_a_local_body() {
        let ps = polling_stations_from_records(&[
            rec(2, vec![("PS No", "4"), ("PS Name", "LP School"), ("Local Body Code", "G01001")]),
            rec(3, vec![("PS No", "5"), ("PS Name", "Orphan")]),
            rec(4, vec![("PS Name", "Unnumbered"), ("Local Body Code", "G01001")]),
        ]);
        assert_eq!(ps.len(), 2);
        assert_eq!(ps[0].number, 4);
        assert_eq!(ps[1].number, 0);
    }

    #[test]
    fn trend_rows() {
        let groups = party_groups_from_records(&[
            rec(2, vec![("Party", "INC"), ("Party Group", "UDF")]),
            rec(3, vec![("Party", "BJP")]),
        ]);
        assert_eq!(groups.len(), 1);

        let rows = candidate_rows_from_records(&[rec(
            2,
            vec![
                ("District", "Ernakulam"),
                ("LB_Code", "M07001"),
                ("Ward_No", "1"),
                ("Candidate_Name", "A"),
                ("Party", "INC"),
                ("Votes", "412"),
                ("Status", "Leading"),
            ],
        )]);
        assert_eq!(rows[0].vote_count, 412);
        let res = aggregate(&rows, &groups);
        assert_eq!(res["M07001"].seats.udf, 1);
    }

    fn candidate(ward: &str, name: &str, party: &str, votes: &str) -> TableRecord {
        rec(
            2,
            vec![
                ("LB_Code", "G07001"),
                ("Ward_No", ward),
                ("Candidate_Name", name),
                ("Party", party),
                ("Votes", votes),
            ],
        )
    }

    #[test]
    fn grouped_vote_counts_pick_the_right_winner() {
        let groups = PartyGroups::from_pairs(vec![("INC", "UDF"), ("BJP", "NDA")]);
        let rows = candidate_rows_from_records(&[
            candidate("1", "A", "INC", "1,204"),
            candidate("1", "B", "BJP", "500"),
        ]);
        assert_eq!(rows[0].vote_count, 1204);
        assert_eq!(rows[1].vote_count, 500);
        let res = aggregate(&rows, &groups);
        let ward = &res["G07001"].wards["1"];
        assert_eq!(ward.winner().map(|c| c.name.as_str()), Some("A"));
        assert_eq!(res["G07001"].seats.udf, 1);
    }

    #[test]
    fn ward_numbers() {
        assert_eq!(normalize_ward_number(" 01 "), "1");
        assert_eq!(normalize_ward_number("12.0"), "12");
        assert_eq!(normalize_ward_number("12A"), "12A");
        assert_eq!(normalize_ward_number(""), "");
    }

    #[test]
    fn padded_ward_numbers_join_the_ward_map() {
        let groups = PartyGroups::from_pairs(vec![("INC", "UDF")]);
        let rows = candidate_rows_from_records(&[candidate("01", "A", "INC", "300")]);
        let res = aggregate(&rows, &groups);
        let keys: Vec<&str> = res["G07001"].wards.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["1"]);

        let mut properties = geojson::JsonObject::new();
        properties.insert("Ward_No".to_string(), geojson::JsonValue::from(1));
        let feature = geojson::Feature {
            bbox: None,
            geometry: None,
            id: None,
            properties: Some(properties),
            foreign_members: None,
        };
        let color = color_ward_feature(&feature, res.get("G07001"));
        assert_eq!(color, Rgb::from_hex(0x2768f5));
        assert_ne!(color, NO_WARD_DATA_COLOR);
    }
}
