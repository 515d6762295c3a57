//! Constants used in the deploy scripts

/// The file name of the `DIDRegistry` build artifact
pub const DID_REGISTRY_ARTIFACT: &str = "DIDRegistry.json";

/// The file name of the `DIDRegistryRecoverable` build artifact
pub const DID_REGISTRY_RECOVERABLE_ARTIFACT: &str = "DIDRegistryRecoverable.json";

/// The default directory containing contract build artifacts
/// (Truffle build layout)
pub const DEFAULT_ARTIFACTS_DIR: &str = "build/contracts";

/// The default gas limit for a deployment transaction
pub const DEFAULT_GAS_LIMIT: u64 = 11_500_000;

/// The default gas price for a deployment transaction.
///
/// Gas-model networks subsidize transaction costs through the sponsoring
/// node, so the price is zero.
pub const DEFAULT_GAS_PRICE: u64 = 0;

/// The number of confirmations to wait for the contract deployment transaction
pub const NUM_DEPLOY_CONFIRMATIONS: usize = 0;

/// The default number of seconds to wait for the network to confirm a
/// deployment before giving up
pub const DEFAULT_CONFIRMATION_TIMEOUT_SECS: u64 = 60;

/// The constructor arguments used in the canonical `DIDRegistry`
/// deployment: the minimum key rotation time in seconds
pub const DID_REGISTRY_DEFAULT_ARGS: [&str; 1] = ["3600"];

/// The constructor arguments used in the canonical `DIDRegistryRecoverable`
/// deployment: the minimum key rotation time, the minimum & maximum number
/// of controllers used in recovery, and the recovery reset window in seconds
pub const DID_REGISTRY_RECOVERABLE_DEFAULT_ARGS: [&str; 4] = ["3600", "3", "5", "86400"];

/// The name of the environment variable holding the deployer's private key
pub const PRIV_KEY_ENV_VAR: &str = "DEPLOYER_PRIV_KEY";

/// The name of the environment variable holding the network RPC URL
pub const RPC_URL_ENV_VAR: &str = "RPC_URL";

/// The name of the environment variable holding the sponsoring node address
pub const NODE_ADDRESS_ENV_VAR: &str = "NODE_ADDRESS";

/// The name of the environment variable holding the gas-model credential
/// expiration timestamp
pub const CREDENTIAL_EXPIRY_ENV_VAR: &str = "CREDENTIAL_EXPIRY";
