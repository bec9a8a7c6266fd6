mod error;
mod io;
mod settings;


pub use error::{ConfigError, Result};
pub use io::{load_config, save_config};
pub use settings::MenuConfig;
