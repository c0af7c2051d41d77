mod booking;
mod map;

pub use booking::*;
pub use map::*;
