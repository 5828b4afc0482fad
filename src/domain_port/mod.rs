// storage

mod cipher;
mod kv_backend;

pub use cipher::*;
pub use kv_backend::*;

// runtime

mod navigator;
mod transport;

pub use navigator::*;
pub use transport::*;
