//! Model module containing data structures

mod forecast;

pub use forecast::{Bounds, Forecast};
