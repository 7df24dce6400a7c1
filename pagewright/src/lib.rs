//! Pagewright's page assembler, tasks and configuration, exposed for the
//! binary and for integration tests.
pub mod cli;
pub mod config;
pub mod error;
pub mod page;
pub mod tasks;
