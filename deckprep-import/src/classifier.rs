//! Land / Nonland classification
//!
//! An entry is a land iff its `card_type` contains `"Land"` (so hybrid
//! types such as "Artifact Land" count). Failed lookups have an empty type
//! and land in `Nonland`, still contributing their quantity.

use crate::types::{AnnotatedEntry, Bucket, BucketKind, Classification};

/// Partition annotated entries into Land and Nonland buckets
///
/// Entries keep their relative order within each bucket.
pub fn classify(entries: &[AnnotatedEntry]) -> Classification {
    let (lands, nonlands): (Vec<AnnotatedEntry>, Vec<AnnotatedEntry>) =
        entries.iter().cloned().partition(AnnotatedEntry::is_land);

    Classification {
        land: Bucket::new(BucketKind::Land, lands),
        nonland: Bucket::new(BucketKind::Nonland, nonlands),
    }
}
