pub mod classifier;
pub mod slots;
pub mod types;

pub use classifier::*;
pub use types::*;
