pub mod config;
pub mod error;
pub mod probe;
pub mod providers;
pub mod report;
pub mod traits;
pub mod types;

pub use config::*;
pub use error::{ErrorKind, RerankError, error_chain};
pub use probe::*;
pub use report::render_outcome;
pub use traits::*;
pub use types::*;
