use std::collections::BTreeSet;

/// Split a raw comma-delimited qualifier list into the set of cell qualifiers
/// to fetch.
///
/// Tokens are taken exactly as written: surrounding whitespace is preserved,
/// and duplicate tokens collapse. Splitting an empty string yields a set
/// containing the empty string, not an empty set; row fetcher factories see
/// that value as-is.
pub fn derive_qualifiers(qualifies_csv: &str) -> BTreeSet<String> {
    qualifies_csv.split(',').map(str::to_string).collect()
}
