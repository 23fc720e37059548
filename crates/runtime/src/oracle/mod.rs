//! Static world data.
//!
//! The map is immutable for the whole run; everything that moves lives in
//! [`game_core::World`].
mod map;

pub use map::{AsciiMap, MapError, StaticMap};
