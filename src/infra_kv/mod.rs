mod file_kv_backend;
mod memory_kv_backend;

pub use file_kv_backend::*;
pub use memory_kv_backend::*;
