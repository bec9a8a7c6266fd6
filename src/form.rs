//! Generated forms for function entries and the return-value protocol that
//! turns their results into viewer layers.

mod adapter;
mod error;
mod params;
mod scale;
mod schema;

#[cfg(test)]
mod tests;

pub use adapter::{FormHandle, FunctionForm};
pub use error::{FormError, Result};
pub use params::{FunctionInputs, InputLayer, InputValue};
pub use scale::{DEFAULT_POINT_SIZE, align_scale, point_size};
pub use schema::{FunctionOutput, FunctionSpec, ParamKind, ParamSpec};
