pub mod error;
pub mod level;
pub mod logger;
pub mod monitor;
pub mod projection;
pub mod status;
