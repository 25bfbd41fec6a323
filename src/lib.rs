pub mod annotate;
pub mod bed;
pub mod cli;
pub mod combine;
pub mod commands;
pub mod utils;
