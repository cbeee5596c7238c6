//! Graffiti line generation.
//!
//! A graffiti line is what gets appended to a marker file: a fixed prefix,
//! a UTC timestamp at whole-second precision, and a short random tag.
//! Uniqueness is best-effort only; the timestamp plus tag can collide under
//! rapid invocation, which is acceptable for this tool.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::distr::Alphanumeric;

pub const GRAFFITI_PREFIX: &str = "# mark";

/// Tag length in characters, mixed-case alphanumeric.
pub const TAG_LEN: usize = 4;

pub fn random_tag<R: Rng>(rng: &mut R) -> String {
    (0..TAG_LEN).map(|_| char::from(rng.sample(Alphanumeric))).collect()
}

/// Produce one graffiti line, including the trailing newline.
///
/// Time and randomness are supplied by the caller so tests can fix both.
pub fn line<R: Rng>(now: DateTime<Utc>, rng: &mut R) -> String {
    format!(
        "{} {}-{}\n",
        GRAFFITI_PREFIX,
        now.format("%Y%m%d%H%M%S"),
        random_tag(rng)
    )
}
