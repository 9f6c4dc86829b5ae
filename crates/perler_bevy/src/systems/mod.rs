//! Beadizer lifecycle systems.

mod lifecycle;

pub use lifecycle::*;
