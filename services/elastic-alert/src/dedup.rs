//! Deduplication keys for matches

/// Hex MD5 of the ids concatenated in order, without a separator.
///
/// Order matters: callers wanting set semantics must sort first.
pub fn dedup_key(ids: &[String]) -> String {
    let mut context = md5::Context::new();
    for id in ids {
        context.consume(id.as_bytes());
    }
    format!("{:x}", context.compute())
}
