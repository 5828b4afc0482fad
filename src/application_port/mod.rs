mod api_client;
mod session_service;

pub use api_client::*;
pub use session_service::*;
