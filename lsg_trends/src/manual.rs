/*!

This is the long-form manual for `lsg_trends` and `lsgtrends`.

## Input tables

The following tables are read, either as CSV files (`.csv`) or as Excel
workbooks (`.xlsx`, first worksheet). The first row holds the column names;
columns are looked up by name and extra columns are ignored.

### Local bodies

```text
Local Body Code,Local Body Name,Local Body Type,District,Ward Count
G01001,Kunjathur,Grama Panchayat,Kasargod,15
```

The type is one of `Municipal Corporation`, `Municipality`, `Grama Panchayat`,
`Block Panchayat`, `District Panchayat`. The district is normalized: every
word is capitalized and the known misspellings (`Kasargod`,
`Thiruvanathapuram`) are corrected.

### Wards

```text
Ward Code,Ward Name,Local Body Code,Total,Males,Females,Others
G01001001,Kunjathur,G01001,1520,760,758,2
```

The ward number is taken from the last three characters of the ward code.
Missing or unreadable counts are read as zero.

### Polling stations

```text
PS No,PS Name,Ward Code,Local Body Code
1,Govt. LP School,G01001001,G01001
```

Rows without a local body code are skipped.

### Party groups

```text
Party,Party Group
CPI(M),LDF
INC,UDF
```

Parties are matched after trimming and upper-casing. A party that is not in
this table is counted with the independents (`IND`). When this table cannot be
read, every candidate is independent.

### Trends

```text
District,LB_Code,LB_Name,Ward_No,Ward_Name,Candidate_Name,Party,Votes,Status
ERNAKULAM,M07001,Aluva,1,Thottakkattukara,A. Candidate,INC,412,Leading
```

One row per candidate and ward. The winner of a ward is the candidate with
the most votes, provided that number is not zero. `Status` is only used as a
hint for undeclared wards: the last candidate marked `Leading` is shown as
ahead.

`Votes` may group digits with `,` or `_` (`1,204`). Any other text counts as
zero votes. Numeric ward numbers are read by value, so `01` is ward `1`.

## Maps

Map files are GeoJSON feature collections, looked up under the maps directory:

- `topojson/Kerala/districts.json`, `block-panchayats.json`,
  `grama-panchayats.json` for the state overview
- `topojson/Kerala/district_maps/<District>_<layer>.json` for a district,
  where the layer is one of `district`, `block`, `grama`
- `geojson/Kerala/districts/<District>/<code>.json` for the wards of a
  local body

The district names used in the file names follow the published files: the
capital is spelled `Thiruvanathapuram`. TopoJSON files must be converted to
GeoJSON beforehand.

The local body code of a feature is read from the first non-empty property
among `SEC_Kerala_code`, `LSG_code`, `LGD_Code`. The name comes from
`English Label`, `LSGI_NAME` or `LSGD`, the district from `District`,
`DISTRICT` or `District_N`, and the ward number from `Ward_No`, `ward_no`,
`Ward No`, `WARD_NO` or `Ward`.

## Configuration

`lsgtrends` reads its inputs from a data directory with the default file
names below. A JSON configuration file may override any of them; the command
line flags override the configuration file.

```json
{
  "dataDirectory": "data",
  "localBodies": "csv/local_bodies.csv",
  "wards": "csv/wards.csv",
  "pollingStations": "csv/polling_stations.csv",
  "partyGroups": "csv/party_and_group.csv",
  "trends": "csv/trend_detailed_results_2025.csv",
  "maps": "maps"
}
```

Relative paths are resolved against `dataDirectory`, which is itself resolved
against the directory of the configuration file.

 */
