pub mod staff;
pub mod status;
