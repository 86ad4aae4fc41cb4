// Logs module - Record formatting, fan-out and rotation

pub mod format;
mod logger;
pub mod rotate;
pub mod writer;

pub use format::CallSite;
pub use logger::Logger;
pub use rotate::{Rotation, MAX_ROTATE_ATTEMPTS};
