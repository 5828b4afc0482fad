use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::HttpTransport;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub const TOKEN_PATH: &str = "/oauth/token";

/// Client without any hooks. Token refresh goes through here so it is never
/// intercepted by the authenticated pipeline.
pub struct PublicClient {
    transport: Arc<dyn HttpTransport>,
}

impl PublicClient {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    pub async fn exchange_refresh_token(
        &self,
        refresh_token: &RefreshToken,
    ) -> Result<TokenPair, ApiError> {
        let request = ApiRequest::post_form(
            TOKEN_PATH,
            vec![
                ("grant_type".to_string(), "refresh_token".to_string()),
                (
                    "refresh_token".to_string(),
                    refresh_token.as_str().to_string(),
                ),
            ],
        )
        .with_header(AUTHORIZATION, "Basic ");

        let response = self.send(request).await?;
        let grant: TokenGrant = response
            .json()
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(grant.into())
    }
}

#[async_trait::async_trait]
impl ApiClient for PublicClient {
    async fn send_with_cancel(
        &self,
        request: ApiRequest,
        cancel: CancellationToken,
    ) -> Result<ApiResponse, ApiError> {
        let response = self.transport.send(request, cancel).await?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(ApiError::Status {
                status: response.status,
                body: response.text(),
            })
        }
    }
}
