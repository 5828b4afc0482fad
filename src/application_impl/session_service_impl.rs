use crate::application_impl::{LoginRedirect, SecureStore};
use crate::application_port::SessionService;
use crate::domain_model::*;
use std::sync::Arc;

pub struct RealSessionService {
    store: Arc<SecureStore>,
    redirect: Arc<LoginRedirect>,
}

impl RealSessionService {
    pub fn new(store: Arc<SecureStore>, redirect: Arc<LoginRedirect>) -> Self {
        Self { store, redirect }
    }
}

impl SessionService for RealSessionService {
    fn current_user(&self) -> Option<User> {
        self.store.get(LocalKey::User)
    }

    fn access_token(&self) -> Option<AccessToken> {
        self.store.get(LocalKey::AccessToken)
    }

    fn refresh_token(&self) -> Option<RefreshToken> {
        self.store.get(LocalKey::RefreshToken)
    }

    fn start_session(&self, user: &User, tokens: &TokenPair) {
        self.store.set(LocalKey::User, user);
        self.store.set(LocalKey::AccessToken, &tokens.access_token);
        self.store.set(LocalKey::RefreshToken, &tokens.refresh_token);
        self.redirect.leave_login();
    }

    fn logout(&self) {
        for key in LocalKey::ALL {
            self.store.remove(key);
        }
    }
}
