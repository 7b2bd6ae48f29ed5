// packages/engine/src/utils/ids.rs
//! Opaque identifier generation
//!
//! Identifiers look like `job_1718000000000_01j0abcd5xkq7mz3`: kind prefix,
//! creation time in milliseconds, then the lowercase random part of a
//! monotonic ULID. The monotonic generator bumps the random part when
//! two ids land in the same millisecond, so ids never repeat within a
//! process.

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use ulid::{Generator, Ulid};

/// Length of the Crockford-encoded random part of a ULID
const SUFFIX_LEN: usize = 16;

static GENERATOR: Lazy<Mutex<Generator>> = Lazy::new(|| Mutex::new(Generator::new()));

/// Generate a new identifier for `kind` (e.g. `"job"`, `"brand"`, `"persona"`)
pub fn new_id(kind: &str) -> String {
    let ulid = next_ulid();
    let encoded = ulid.to_string();
    let suffix = encoded[encoded.len() - SUFFIX_LEN..].to_ascii_lowercase();
    format!("{}_{}_{}", kind, ulid.timestamp_ms(), suffix)
}

fn next_ulid() -> Ulid {
    // Overflow only happens after 2^80 ids in one millisecond; a fresh
    // ULID is still unique with overwhelming probability.
    GENERATOR.lock().generate().unwrap_or_else(|_| Ulid::new())
}

/// Parsed form of an identifier produced by [`new_id`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedId<'a> {
    pub kind: &'a str,
    pub timestamp_ms: u64,
    pub suffix: &'a str,
}

/// Split an identifier into kind, timestamp and suffix.
///
/// The kind may itself contain underscores; the last two segments are always
/// the timestamp and the suffix.
pub fn parse_id(id: &str) -> Option<ParsedId<'_>> {
    let (rest, suffix) = id.rsplit_once('_')?;
    let (kind, timestamp) = rest.rsplit_once('_')?;

    if kind.is_empty() || !is_valid_suffix(suffix) {
        return None;
    }

    let timestamp_ms = timestamp.parse().ok()?;
    Some(ParsedId {
        kind,
        timestamp_ms,
        suffix,
    })
}

/// Check that `id` was produced by [`new_id`] for `kind`
pub fn matches_kind(id: &str, kind: &str) -> bool {
    parse_id(id).map_or(false, |parsed| parsed.kind == kind)
}

fn is_valid_suffix(suffix: &str) -> bool {
    suffix.len() >= 5
        && suffix
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
}
