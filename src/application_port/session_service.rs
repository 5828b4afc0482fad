use crate::domain_model::*;

pub trait SessionService: Send + Sync {
    fn current_user(&self) -> Option<User>;
    fn access_token(&self) -> Option<AccessToken>;
    fn refresh_token(&self) -> Option<RefreshToken>;
    /// Persists the profile and token pair handed out by a successful login.
    fn start_session(&self, user: &User, tokens: &TokenPair);
    /// Removes the profile and both tokens; other stored keys are kept.
    fn logout(&self);
}
