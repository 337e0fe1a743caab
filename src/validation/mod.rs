//! Tool argument validation
//!
//! [`extract`] coerces one named argument into a typed value; [`Validator`]
//! chains many extractions over one request and aggregates their errors.

mod error;
pub mod extract;
mod validator;

pub use error::ValidationError;
pub use extract::{extract, FromArg};
pub use validator::{Validator, EXPAND_KEY};
