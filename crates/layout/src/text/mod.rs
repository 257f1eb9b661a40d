//! Line breaking.

mod wrapper;

pub use wrapper::wrap_text;
