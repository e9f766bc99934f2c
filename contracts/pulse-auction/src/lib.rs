pub mod contract;
pub mod curve;
pub mod error;
pub mod state;
