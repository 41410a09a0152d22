pub mod database;
pub mod setting;
pub mod util;

pub const CLI_NAME: &str = "lake";

// logging constants
pub const LAKE_LOGLEVEL: &str = "LAKE_LOGLEVEL";
