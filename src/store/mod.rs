pub mod file;
pub mod memory;
pub mod open;
pub mod store;
pub mod types;

pub use file::*;
pub use memory::*;
pub use open::*;
pub use store::*;
pub use types::*;
