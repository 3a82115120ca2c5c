//! Query-string builders for the arXiv API
//!
//! arXiv expects `search_query` to be a boolean expression over field
//! prefixed terms (`all:`, `ti:`, `au:` ...) with `+AND+` standing for the
//! space-separated `AND` operator. Terms are inserted verbatim; any escaping
//! happens when the full URL is parsed by the transport.

/// Field prefix used for every keyword and negative keyword.
const ALL_FIELDS: &str = "all:";
const AND: &str = "+AND+";

/// Join terms as `all:<t1>+AND+all:<t2>...`.
fn join_all_fields(terms: &[String]) -> String {
    terms
        .iter()
        .map(|term| format!("{}{}", ALL_FIELDS, term))
        .collect::<Vec<_>>()
        .join(AND)
}

/// Percent-encode decoded terms so they stay inside `search_query`.
///
/// Inbound values arrive decoded, so `&`, `#` or `%` in a term would otherwise
/// split the query-string or start a fragment.
pub fn encode_terms(terms: &[String]) -> Vec<String> {
    terms
        .iter()
        .map(|term| urlencoding::encode(term).into_owned())
        .collect()
}

/// Build the upstream query-string for a structured keyword search.
///
/// `keywords` is expected to be non-empty; callers validate that before
/// getting here. An empty `negatives` slice adds no `NOT` group at all.
pub fn build_query(keywords: &[String], limit: u32, negatives: &[String], start: u32) -> String {
    let positives = join_all_fields(keywords);
    let exclusions = if negatives.is_empty() {
        String::new()
    } else {
        format!("{}NOT+({})", AND, join_all_fields(negatives))
    };

    format!(
        "search_query={}{}&max_results={}&start={}",
        positives, exclusions, limit, start
    )
}

/// Build the query-string for a free-form search.
///
/// `exclude_fields` is appended only when `negative` is non-empty. arXiv does
/// not document an `exclude_fields` parameter, so upstream ignores it.
pub fn build_free_query(keywords: &str, limit: &str, negative: &str) -> String {
    let mut query = format!("search_query={}&max_results={}", keywords, limit);
    if !negative.is_empty() {
        query.push_str("&exclude_fields=");
        query.push_str(negative);
    }
    query
}
