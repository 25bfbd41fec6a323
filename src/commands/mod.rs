pub mod annotate;
pub mod combine;
pub mod convert;
pub mod expand;
pub mod remove;
