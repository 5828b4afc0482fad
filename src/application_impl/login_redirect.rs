use crate::application_impl::SecureStore;
use crate::domain_port::Navigator;
use crate::logger::*;
use std::sync::Arc;

pub const DEFAULT_LOGIN_ROUTE: &str = "/login";
pub const DEFAULT_HOME_ROUTE: &str = "/";

/// Tears the local session down and sends the console to its login entry.
/// Once a new session starts, `leave_login` moves back to the home route so
/// the next forced logout is not mistaken for a repeat.
pub struct LoginRedirect {
    store: Arc<SecureStore>,
    navigator: Arc<dyn Navigator>,
    login_route: String,
    home_route: String,
}

impl LoginRedirect {
    pub fn new(
        store: Arc<SecureStore>,
        navigator: Arc<dyn Navigator>,
        login_route: impl Into<String>,
        home_route: impl Into<String>,
    ) -> Self {
        Self {
            store,
            navigator,
            login_route: login_route.into(),
            home_route: home_route.into(),
        }
    }

    pub fn login_route(&self) -> &str {
        &self.login_route
    }

    /// Clears the whole store and replaces the location with the login
    /// route. Does nothing when already there; returns whether it acted.
    pub fn navigate_to_login(&self) -> bool {
        if self.navigator.current_route() == self.login_route {
            debug!(route = %self.login_route, "already on login route");
            return false;
        }
        warn!(route = %self.login_route, "session lost, redirecting to login");
        self.store.clear_all();
        self.navigator.replace(&self.login_route);
        true
    }

    /// Replaces the login route with the home route. Does nothing anywhere
    /// else; returns whether it acted.
    pub fn leave_login(&self) -> bool {
        if self.navigator.current_route() != self.login_route {
            return false;
        }
        info!(route = %self.home_route, "session started, leaving login");
        self.navigator.replace(&self.home_route);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_model::LocalKey;
    use crate::infra_crypto::AesGcmCipher;
    use crate::infra_kv::MemoryKvBackend;
    use crate::infra_nav::InMemoryNavigator;

    #[test]
    fn second_redirect_is_a_no_op() {
        let backend = Arc::new(MemoryKvBackend::new());
        let cipher = Arc::new(AesGcmCipher::new("0123456789abcdef0123456789abcdef").unwrap());
        let store = Arc::new(SecureStore::new(backend.clone(), cipher));
        let navigator = Arc::new(InMemoryNavigator::new("/lessons/phonetic"));
        let redirect = LoginRedirect::new(
            store.clone(),
            navigator.clone(),
            DEFAULT_LOGIN_ROUTE,
            DEFAULT_HOME_ROUTE,
        );

        store.set(LocalKey::AccessToken, "a");
        assert!(redirect.navigate_to_login());
        assert!(backend.is_empty());
        assert_eq!(navigator.current_route(), "/login");

        // anything written after the redirect stays untouched by a repeat
        store.set("draft", &"phonetic lesson");
        assert!(!redirect.navigate_to_login());
        assert_eq!(store.get::<String>("draft").as_deref(), Some("phonetic lesson"));
        assert_eq!(navigator.history(), vec!["/login".to_string()]);

        assert!(redirect.leave_login());
        assert!(!redirect.leave_login());
        assert_eq!(navigator.current_route(), "/");

        // back off the login route, the guard arms again
        assert!(redirect.navigate_to_login());
        assert_eq!(store.get::<String>("draft"), None);
    }
}
