pub mod config;
pub mod descriptor;
pub mod error;
pub mod evaluation;
pub mod providers;
pub mod session;
pub mod types;

pub use descriptor::Descriptor;
pub use error::{ModsysError, Result};
pub use session::Session;

pub use serde_json;
