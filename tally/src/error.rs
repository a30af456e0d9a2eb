use thiserror::Error;

#[derive(Debug, Error)]
pub enum TallyError {
    /// The tally cannot proceed at all without the bonded-stake total; this
    /// aborts the whole call, unlike per-account failures which are skipped.
    #[error("failed to get total bonded tokens: {0}")]
    TotalBondedUnavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}
