#[macro_use]
extern crate tracing;

pub mod address;
pub mod assign;
pub mod cli;
pub mod cluster;
pub mod error;
pub mod services;
pub mod store;
