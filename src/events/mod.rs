pub mod bus;
pub mod types;

pub use bus::InputBus;
pub use types::{InputEvent, Key, KeyPress};
