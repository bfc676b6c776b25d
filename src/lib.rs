pub mod combinations;
pub mod config;
pub mod error;
pub mod expression;
pub mod input;
pub mod interpolate;
pub mod recover;
pub mod share;
pub mod tally;

pub use combinations::*;
pub use config::*;
pub use error::*;
pub use expression::*;
pub use input::*;
pub use interpolate::*;
pub use recover::*;
pub use share::*;
pub use tally::*;
