mod pinpoint;

pub use pinpoint::*;
