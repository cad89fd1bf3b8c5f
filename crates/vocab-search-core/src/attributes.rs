//! Comma-serialized attribute values
//!
//! Scope lists and the selection are exchanged with the host as single
//! strings such as `"a,b,c"`. Empty entries are dropped in both directions.

/// Split a comma-serialized attribute into its non-empty entries
pub fn parse_comma_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join entries into a comma-serialized attribute, skipping empty entries
pub fn to_comma_list<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(AsRef::as_ref)
        .filter(|entry| !entry.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}
