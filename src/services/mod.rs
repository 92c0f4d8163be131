pub mod lookup;
pub mod web;

pub use lookup::*;
pub use web::WebInfoSource;
