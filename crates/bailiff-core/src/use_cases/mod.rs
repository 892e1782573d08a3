pub mod authorization;
pub mod status;
