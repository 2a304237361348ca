pub mod drum;
pub mod projection;
pub mod reading;
pub mod status;
