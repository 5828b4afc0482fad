use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use crate::logger::*;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Client that attaches the stored bearer token to every call and recovers
/// from expired access tokens.
///
/// The pipeline is an explicit chain around the transport:
/// - before dispatch: register the caller's cancellation token and attach
///   `Authorization: Bearer <access token>`; with no access token stored the
///   session is torn down and the call is cancelled before it leaves.
/// - after dispatch: unregister on success or on any non-401 failure; on a
///   401, join or lead the single-flight refresh and replay the call with
///   the new access token through the public client.
pub struct AuthenticatedClient {
    transport: Arc<dyn HttpTransport>,
    public: Arc<PublicClient>,
    store: Arc<SecureStore>,
    redirect: Arc<LoginRedirect>,
    registry: CancellationRegistry,
    refresh_gate: RefreshGate,
}

impl AuthenticatedClient {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        public: Arc<PublicClient>,
        store: Arc<SecureStore>,
        redirect: Arc<LoginRedirect>,
    ) -> Self {
        Self {
            transport,
            public,
            store,
            redirect,
            registry: CancellationRegistry::new(),
            refresh_gate: RefreshGate::new(),
        }
    }

    /// Requests dispatched and not yet settled.
    pub fn in_flight(&self) -> usize {
        self.registry.len()
    }

    /// Requests parked behind the refresh in flight.
    pub fn queued_waiters(&self) -> usize {
        self.refresh_gate.queued()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh_gate.is_refreshing()
    }

    pub fn cancel_all(&self) -> usize {
        self.registry.cancel_all()
    }

    /// Cancels everything in flight, then clears the session and redirects
    /// to the login route.
    pub fn force_logout(&self) {
        let cancelled = self.registry.cancel_all();
        if cancelled > 0 {
            info!(cancelled, "cancelled in-flight requests");
        }
        self.redirect.navigate_to_login();
    }

    fn before_request(&self, request: &mut ApiRequest, cancel: &CancellationToken) -> RequestId {
        let id = self.registry.register(cancel.clone());

        match self.store.get::<AccessToken>(LocalKey::AccessToken) {
            Some(token) => request.set_header(AUTHORIZATION, token.bearer()),
            None => {
                warn!(request_id = %id, path = %request.path, "no access token stored");
                self.force_logout();
            }
        }
        id
    }

    async fn replay(
        &self,
        mut request: ApiRequest,
        token: &AccessToken,
        cancel: CancellationToken,
    ) -> Result<ApiResponse, ApiError> {
        request.set_header(AUTHORIZATION, token.bearer());
        self.public.send_with_cancel(request, cancel).await
    }

    async fn recover_unauthorized(
        &self,
        id: &RequestId,
        request: ApiRequest,
        cancel: CancellationToken,
    ) -> Result<ApiResponse, ApiError> {
        match self.refresh_gate.enter() {
            RefreshTicket::Follower(rx) => {
                debug!(request_id = %id, "refresh in flight, waiting");
                let outcome = tokio::select! {
                    biased;
                    outcome = rx => outcome.unwrap_or(Err(RefreshFailure::Abandoned)),
                    _ = cancel.cancelled() => {
                        self.registry.remove(id);
                        return Err(TransportError::Cancelled.into());
                    }
                };
                let result = match outcome {
                    Ok(token) => self.replay(request, &token, cancel).await,
                    Err(failure) => Err(failure.into()),
                };
                self.registry.remove(id);
                result
            }
            RefreshTicket::Leader(lease) => {
                let outcome = self.refresh_tokens().await;
                // queued callers learn the outcome before the session is torn down
                let released = lease.settle(&outcome);
                if outcome.is_err() {
                    self.force_logout();
                }
                match outcome {
                    Ok(token) => {
                        info!(request_id = %id, released, "access token refreshed");
                        let result = self.replay(request, &token, cancel).await;
                        self.registry.remove(id);
                        result
                    }
                    Err(failure) => {
                        warn!(request_id = %id, released, error = %failure, "token refresh failed");
                        self.registry.remove(id);
                        Err(failure.into())
                    }
                }
            }
        }
    }

    async fn refresh_tokens(&self) -> RefreshOutcome {
        let Some(refresh_token) = self.store.get::<RefreshToken>(LocalKey::RefreshToken) else {
            return Err(RefreshFailure::NoRefreshToken);
        };

        info!("access token rejected, refreshing");
        match self.public.exchange_refresh_token(&refresh_token).await {
            Ok(pair) => {
                self.store.set(LocalKey::AccessToken, &pair.access_token);
                self.store.set(LocalKey::RefreshToken, &pair.refresh_token);
                Ok(pair.access_token)
            }
            Err(e) => Err(RefreshFailure::Rejected(e.to_string())),
        }
    }
}

#[async_trait::async_trait]
impl ApiClient for AuthenticatedClient {
    async fn send_with_cancel(
        &self,
        mut request: ApiRequest,
        cancel: CancellationToken,
    ) -> Result<ApiResponse, ApiError> {
        let id = self.before_request(&mut request, &cancel);
        if cancel.is_cancelled() {
            self.registry.remove(&id);
            return Err(TransportError::Cancelled.into());
        }

        debug!(request_id = %id, method = %request.method, path = %request.path, "dispatching");
        match self.transport.send(request.clone(), cancel.clone()).await {
            Ok(response) if response.is_success() => {
                self.registry.remove(&id);
                Ok(response)
            }
            Ok(response) if response.is_unauthorized() => {
                self.recover_unauthorized(&id, request, cancel).await
            }
            Ok(response) => {
                self.registry.remove(&id);
                Err(ApiError::Status {
                    status: response.status,
                    body: response.text(),
                })
            }
            Err(e) => {
                self.registry.remove(&id);
                Err(e.into())
            }
        }
    }
}
