mod credential;
mod http;
mod local_key;
mod request_id;
mod user;

pub use credential::*;
pub use http::*;
pub use local_key::*;
pub use request_id::*;
pub use user::*;
