//! Application services
//!
//! Wiring between runtime configuration and the core notes widget.

mod notes;

pub use notes::open_widget;
