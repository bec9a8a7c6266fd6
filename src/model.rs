mod argument;
mod error;
mod layer;


pub use argument::{Argument, FormArguments};
pub use error::{ModelError, Result};
pub use layer::{DataKind, FormId, Layer, LayerData, LayerId, LayerProps, SurfaceMesh};
