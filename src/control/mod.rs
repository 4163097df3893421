//! Moving parameter changes from the control side onto the audio path.
//!
//! Commands are decoded off the audio thread and turned into
//! [`LevelMessage`]s with every rate already derived. The audio thread drains
//! them between blocks and only stores the values, so every change lands on a
//! sample boundary.

pub mod message;
#[cfg(feature = "rtrb")]
pub mod shared;

pub use message::{LevelCommand, LevelMessage, MessageReceiver};
#[cfg(feature = "rtrb")]
pub use shared::{LevelHandle, SharedLevelTracker};
