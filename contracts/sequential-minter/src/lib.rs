pub mod contract;
pub mod error;
pub mod state;
mod utils;
