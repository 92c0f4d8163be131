pub mod speech;
pub mod text;

pub use speech::*;
