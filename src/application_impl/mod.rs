mod authenticated_client;
mod cancel_registry;
mod login_redirect;
mod public_client;
mod refresh_gate;
mod secure_store;
mod session_service_impl;

pub use authenticated_client::*;
pub use cancel_registry::*;
pub use login_redirect::*;
pub use public_client::*;
pub use refresh_gate::*;
pub use secure_store::*;
pub use session_service_impl::*;
