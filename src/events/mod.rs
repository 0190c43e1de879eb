pub mod builder_listener;
pub mod chain;
pub mod listener;

pub use builder_listener::BuilderListener;
pub use chain::EventManager;
pub use listener::{FnListener, PathEvent, PathListener, PATH_EVENT};
