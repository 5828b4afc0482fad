use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_port::*;
use crate::infra_crypto::*;
use crate::infra_http::*;
use crate::infra_kv::*;
use crate::infra_nav::*;
use crate::logger::*;
use crate::settings::Settings;
use anyhow::anyhow;
use std::sync::Arc;
use std::time::Duration;

/// Everything the console screens talk to, wired from settings.
pub struct Console {
    pub session_service: Arc<dyn SessionService>,
    pub public_api: Arc<PublicClient>,
    pub private_api: Arc<AuthenticatedClient>,
    pub store: Arc<SecureStore>,
    pub navigator: Arc<InMemoryNavigator>,
    redirect: Arc<LoginRedirect>,
}

impl Console {
    pub fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let backend: Arc<dyn KvBackend> = match settings.storage.backend.as_str() {
            "memory" => Arc::new(MemoryKvBackend::new()),
            "file" => {
                let path = settings
                    .storage
                    .path
                    .as_deref()
                    .ok_or_else(|| anyhow!("storage.path is required for the file backend"))?;
                Arc::new(FileKvBackend::new(path))
            }
            other => return Err(anyhow!("Unknown storage backend: {}", other)),
        };
        let cipher: Arc<dyn ValueCipher> =
            Arc::new(AesGcmCipher::new(&settings.crypto.secret_key).map_err(|e| anyhow!(e))?);
        let store = Arc::new(SecureStore::new(backend, cipher));

        let transport: Arc<dyn HttpTransport> = Arc::new(
            ReqwestTransport::try_new(
                &settings.api.url,
                Duration::from_millis(settings.api.timeout_ms),
            )
            .map_err(|e| anyhow!(e))?,
        );

        Ok(Self::assemble(
            store,
            transport,
            Arc::new(InMemoryNavigator::new(DEFAULT_HOME_ROUTE)),
            &settings.session.login_route,
        ))
    }

    /// Wires the clients around an existing store and transport.
    pub fn assemble(
        store: Arc<SecureStore>,
        transport: Arc<dyn HttpTransport>,
        navigator: Arc<InMemoryNavigator>,
        login_route: &str,
    ) -> Self {
        let redirect = Arc::new(LoginRedirect::new(
            store.clone(),
            navigator.clone(),
            login_route,
            DEFAULT_HOME_ROUTE,
        ));
        let public_api = Arc::new(PublicClient::new(transport.clone()));
        let private_api = Arc::new(AuthenticatedClient::new(
            transport,
            public_api.clone(),
            store.clone(),
            redirect.clone(),
        ));
        let session_service: Arc<dyn SessionService> =
            Arc::new(RealSessionService::new(store.clone(), redirect.clone()));

        info!(login_route, "console ready");

        Self {
            session_service,
            public_api,
            private_api,
            store,
            navigator,
            redirect,
        }
    }

    /// Drops the stored session without redirecting, like the logout
    /// button of the console.
    pub fn logout(&self) {
        self.session_service.logout();
        info!("logged out");
    }

    pub fn login_route(&self) -> &str {
        self.redirect.login_route()
    }

    pub fn shutdown(&self) {
        let cancelled = self.private_api.cancel_all();
        info!(cancelled, "console shut down");
    }
}
