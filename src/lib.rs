pub mod config;
pub mod logging;
pub mod present;
pub mod version;
