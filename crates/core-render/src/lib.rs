//! Screen composition.
//!
//! Each refresh builds the complete frame (text rows, status bar, message
//! bar, cursor placement) into one growable byte buffer and hands it to the
//! terminal in a single write. Nothing is written while the frame is being
//! assembled, so a half-drawn screen is never visible.

pub mod escape;
pub mod frame;
pub mod status;
pub mod viewport;

pub use frame::{Compositor, WELCOME_TITLE};
pub use status::{StatusContext, build_status};
pub use viewport::scroll;
