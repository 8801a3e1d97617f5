pub mod error;
pub mod loader;

pub use error::{Result, StoreError};
pub use loader::{FactFormat, builtin, load_path, parse_str};
