pub mod atlas;
pub mod colors;
pub mod details;
pub mod selection;
pub mod stats;

pub use atlas::*;
pub use colors::language_color;
pub use details::*;
pub use selection::*;
pub use stats::*;
