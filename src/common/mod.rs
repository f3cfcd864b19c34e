pub use errors::*;

pub mod timestamp;

mod errors;
mod macros;
