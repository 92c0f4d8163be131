pub mod config;
pub mod inputs;
pub mod kernel;
pub mod outputs;
pub mod services;
pub mod store;

// Re-export specific items if needed for convenient access
pub use kernel::dispatch::Dispatcher;
pub use kernel::intent::{classify, Classification, IntentKind};
