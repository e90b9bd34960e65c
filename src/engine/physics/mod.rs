pub mod body;
pub mod gravity;
pub mod vec_field;

pub use body::*;
