use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Validation failures of the neighbor computation.
///
/// Every variant is raised synchronously, before any distance comparison
/// runs; there is no partial success. Messages carry the offending values so
/// callers can report which invariant failed.
#[derive(Debug, Error)]
pub enum Error {
    /// The domain itself is malformed: non-positive side length, or a
    /// particle placed outside `[0, L] x [0, L]`.
    #[error("invalid domain: {0}")]
    InvalidDomain(String),

    /// A particle carries an illegal radius (negative or non-finite).
    #[error("invalid particle: {0}")]
    InvalidParticle(String),

    /// The search parameters violate a precondition of the cell index
    /// method: zero grid divisions, non-positive interaction radius, or a
    /// cell side that does not exceed the interaction radius.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failed_invariant() {
        let e = Error::InvalidConfiguration(
            "interaction radius must be positive, got -2".to_string(),
        );
        let msg = e.to_string();
        assert!(msg.contains("invalid configuration"));
        assert!(msg.contains("-2"));
    }
}
