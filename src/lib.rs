//! GPT copymaker: a single-page copywriting tool backed by a stateless
//! prompt relay.

pub mod config;
pub mod error;
pub mod relay;
pub mod routes;
pub mod wizard;
