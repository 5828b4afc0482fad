mod in_memory_navigator;

pub use in_memory_navigator::*;
