//! Optional content-classifier hook.
//!
//! The selector can consult a classifier after the size filter, e.g. to
//! skip scanned-image-only documents. No classifier ships by default; this
//! trait is the extension point.

use crate::transport::RemoteEntry;

/// Pluggable predicate deciding whether an entry that already passed the
/// size filter should still be admitted.
pub trait ContentClassifier {
    fn keep(&self, entry: &RemoteEntry) -> bool;
}
