use crate::domain_model::*;
use tokio_util::sync::CancellationToken;

#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends `request` and returns whatever status the server answered with.
    /// Must resolve to `TransportError::Cancelled` once `cancel` fires.
    async fn send(
        &self,
        request: ApiRequest,
        cancel: CancellationToken,
    ) -> Result<ApiResponse, TransportError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request cancelled")]
    Cancelled,
    #[error("request timed out")]
    Timeout,
    #[error("connection error: {0}")]
    Connect(String),
    #[error("transport error: {0}")]
    Other(String),
}
