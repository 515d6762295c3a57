//! Definitions of errors that can occur during execution of the deploy scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during execution of the deploy scripts
#[derive(Debug)]
pub enum ScriptError {
    /// Error reading or parsing a contract build artifact
    ArtifactLoad(String),
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// Error constructing constructor calldata for a contract
    CalldataConstruction(String),
    /// The gas-model credential expired before the transaction was submitted
    CredentialExpired(u64),
    /// Error deploying a contract
    ContractDeployment(String),
    /// The network did not confirm the deployment within the bounded wait,
    /// in seconds
    ConfirmationTimeout(u64),
    /// One or more deployments in a run failed; carries the failed and
    /// attempted counts
    DeploymentsFailed(usize, usize),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::ArtifactLoad(s) => write!(f, "error loading artifact: {}", s),
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            ScriptError::CalldataConstruction(s) => write!(f, "error constructing calldata: {}", s),
            ScriptError::CredentialExpired(expiry) => {
                write!(f, "gas-model credential expired at unix time {}", expiry)
            }
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::ConfirmationTimeout(secs) => {
                write!(f, "no confirmation from the network after {}s", secs)
            }
            ScriptError::DeploymentsFailed(failed, attempted) => {
                write!(f, "{} of {} deployments failed", failed, attempted)
            }
        }
    }
}

impl Error for ScriptError {}
