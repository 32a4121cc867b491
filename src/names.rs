// src/names.rs

use serde::Deserialize;

/// One element of the countries response. Only `name.common` is read.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct CountryRecord {
    pub name: CountryName,
}

#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct CountryName {
    pub common: String,
}

/// Sorted common names, duplicates kept.
pub type NameList = Vec<String>;

/// Decode a response body into records.
pub fn parse_records(body: &[u8]) -> serde_json::Result<Vec<CountryRecord>> {
    serde_json::from_slice(body)
}

/// Pull out every common name and sort by code point.
pub fn sorted_names(records: Vec<CountryRecord>) -> NameList {
    let mut names: NameList = records.into_iter().map(|r| r.name.common).collect();
    // `str` ordering is byte-wise on UTF-8, which is code-point order.
    names.sort();
    names
}
