pub mod constants;
pub mod lib;
pub mod validation;

pub use lib::{load_config, parse_config};
