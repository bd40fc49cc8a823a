//! tempdroplet: create, inspect and delete throwaway DigitalOcean droplets.
//!
//! The binary in `main.rs` parses flags, resolves a [`config::Config`], and
//! hands one [`cmd::Invocation`] to [`cmd::dispatch`] together with a
//! [`api::DigitalOceanClient`].

pub mod api;
pub mod cmd;
pub mod config;
pub mod error;
pub mod utils;

pub use error::DropletError;
