//! Scripts for deploying the DID registry contracts to LACChain-style
//! gas-model networks.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod artifacts;
pub mod cli;
pub mod commands;
pub mod constants;
pub mod errors;
pub mod utils;
