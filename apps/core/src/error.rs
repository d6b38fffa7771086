use thiserror::Error;

/// A rule's static hotel mapping referenced an id the injected catalog does
/// not contain.
///
/// This never escapes [`crate::ConciergeEngine::classify`]; the composer
/// logs the miss and drops the id from the outgoing payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("catalog lookup miss: unknown hotel id `{id}`")]
pub struct CatalogLookupMiss {
    /// The id that failed to resolve.
    pub id: String,
}
