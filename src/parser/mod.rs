pub mod line;
pub mod source;

pub use line::*;
pub use source::*;
