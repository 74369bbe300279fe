use thiserror::Error;

/// Fatal startup misconfiguration. The only way to hit this today is a
/// page size of zero, which would make every page slice empty forever.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("page size must be positive, got {0}")]
    NonPositivePageSize(usize),
}
