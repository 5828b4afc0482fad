use crate::domain_model::*;
use crate::domain_port::TransportError;
use tokio_util::sync::CancellationToken;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("request failed with status {status}")]
    Status { status: u16, body: String },
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("no refresh token available")]
    NoRefreshToken,
    #[error("token refresh rejected: {0}")]
    RefreshRejected(String),
}

impl ApiError {
    /// True when the session could not be recovered and a forced logout ran.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::NoRefreshToken | ApiError::RefreshRejected(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Transport(TransportError::Cancelled))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[async_trait::async_trait]
pub trait ApiClient: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.send_with_cancel(request, CancellationToken::new())
            .await
    }

    /// Sends `request`; the caller keeps a clone of `cancel` to abort it.
    async fn send_with_cancel(
        &self,
        request: ApiRequest,
        cancel: CancellationToken,
    ) -> Result<ApiResponse, ApiError>;
}
