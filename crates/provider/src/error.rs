use thiserror::Error;

/// Errors raised by the upstream RPC collaborator.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The transport or the remote endpoint failed.
    #[error(transparent)]
    Transport(#[from] alloy_transport::TransportError),

    /// The endpoint answered with a shape the indexer cannot use.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}
