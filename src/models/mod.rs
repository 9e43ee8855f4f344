//! Typed records exchanged between the repositories, the core logic
//! and the CLI.

pub mod audit;
pub mod company;
pub mod customer;
pub mod service;
pub mod status;
pub mod transaction;
