//! Rendering of arguments, return values and failures into sink lines.

mod args;
mod outcome;
mod traceback;

pub use args::*;
pub use outcome::*;
pub use traceback::*;
