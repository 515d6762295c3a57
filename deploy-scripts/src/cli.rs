//! Definitions of CLI arguments and commands for the deploy scripts

use std::{
    fmt::{self, Display},
    path::PathBuf,
    str::FromStr,
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use ethers::types::Address;

use crate::{
    commands::{deploy, show_artifact},
    constants::{
        CREDENTIAL_EXPIRY_ENV_VAR, DEFAULT_ARTIFACTS_DIR, DEFAULT_CONFIRMATION_TIMEOUT_SECS,
        DEFAULT_GAS_LIMIT, DEFAULT_GAS_PRICE, DID_REGISTRY_ARTIFACT, DID_REGISTRY_DEFAULT_ARGS,
        DID_REGISTRY_RECOVERABLE_ARTIFACT, DID_REGISTRY_RECOVERABLE_DEFAULT_ARGS,
        NODE_ADDRESS_ENV_VAR, PRIV_KEY_ENV_VAR, RPC_URL_ENV_VAR,
    },
    errors::ScriptError,
    utils::setup_client,
};

/// The CLI for the deploy scripts
#[derive(Parser)]
pub struct Cli {
    /// Private key of the deployer.
    ///
    /// Required when deploying; `show-artifact` works without it.
    #[arg(short, long, env = PRIV_KEY_ENV_VAR, hide_env_values = true)]
    pub priv_key: Option<String>,

    /// Network RPC URL.
    ///
    /// Required when deploying; `show-artifact` works without it.
    #[arg(short, long, env = RPC_URL_ENV_VAR)]
    pub rpc_url: Option<String>,

    /// Address of the sponsoring gas-model node, in hex
    #[arg(short, long, env = NODE_ADDRESS_ENV_VAR)]
    pub node_address: String,

    /// Unix timestamp at which the deployer's gas-model credential expires
    #[arg(short, long, env = CREDENTIAL_EXPIRY_ENV_VAR)]
    pub expiration: u64,

    /// Gas limit applied to each deployment transaction
    #[arg(long, default_value_t = DEFAULT_GAS_LIMIT)]
    pub gas_limit: u64,

    /// Gas price applied to each deployment transaction
    #[arg(long, default_value_t = DEFAULT_GAS_PRICE)]
    pub gas_price: u64,

    /// Seconds to wait for the network to confirm a deployment
    #[arg(long, default_value_t = DEFAULT_CONFIRMATION_TIMEOUT_SECS)]
    pub confirmation_timeout: u64,

    /// Directory containing the contract build artifacts
    #[arg(long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: PathBuf,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Builds the immutable per-run deployment configuration from the
    /// parsed CLI arguments
    pub fn deployment_config(&self) -> Result<DeploymentConfig, ScriptError> {
        DeploymentConfig::new(
            &self.node_address,
            self.expiration,
            self.gas_limit,
            self.gas_price,
            self.confirmation_timeout,
            self.artifacts_dir.clone(),
        )
    }
}

/// The subcommands of the deploy scripts
#[derive(Subcommand)]
pub enum Command {
    /// Deploy one or more DID registry contracts
    Deploy(DeployArgs),
    /// Load a build artifact and report its constructor signature and
    /// bytecode size, without touching the network
    ShowArtifact(ShowArtifactArgs),
}

impl Command {
    /// Dispatches the subcommand.
    ///
    /// The RPC client is only constructed for subcommands that submit
    /// transactions, so purely local subcommands need neither credentials
    /// nor a reachable endpoint.
    pub async fn run(
        self,
        priv_key: Option<String>,
        rpc_url: Option<String>,
        config: DeploymentConfig,
    ) -> Result<(), ScriptError> {
        match self {
            Command::Deploy(args) => {
                let priv_key = priv_key.ok_or_else(|| {
                    ScriptError::ClientInitialization(
                        "missing deployer private key".to_string(),
                    )
                })?;
                let rpc_url = rpc_url.ok_or_else(|| {
                    ScriptError::ClientInitialization("missing network RPC URL".to_string())
                })?;

                let client = setup_client(&priv_key, &rpc_url).await?;
                deploy(args, &config, client).await
            }
            Command::ShowArtifact(args) => show_artifact(args, &config),
        }
    }
}

/// Deploy one or more DID registry contracts.
///
/// The requested contracts are deployed concurrently; one contract's
/// failure does not abort the others.
#[derive(Args)]
pub struct DeployArgs {
    /// The contract(s) to deploy
    #[arg(short, long, required = true)]
    pub contract: Vec<DidContract>,

    /// Constructor arguments, overriding the contract's canonical defaults.
    ///
    /// May only be given when deploying a single contract.
    #[arg(short = 'a', long = "constructor-arg")]
    pub constructor_args: Vec<String>,
}

/// Inspect a contract build artifact
#[derive(Args)]
pub struct ShowArtifactArgs {
    /// The contract whose artifact to inspect
    #[arg(short, long)]
    pub contract: DidContract,
}

/// The DID registry contracts known to the deploy scripts
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum DidContract {
    /// The base DID registry contract
    DidRegistry,
    /// The DID registry variant supporting controller-based key recovery
    DidRegistryRecoverable,
}

impl DidContract {
    /// The build artifact file name for this contract
    pub fn artifact_file(&self) -> &'static str {
        match self {
            DidContract::DidRegistry => DID_REGISTRY_ARTIFACT,
            DidContract::DidRegistryRecoverable => DID_REGISTRY_RECOVERABLE_ARTIFACT,
        }
    }

    /// The constructor arguments used in the canonical deployment of
    /// this contract
    pub fn default_constructor_args(&self) -> Vec<String> {
        let args: &[&str] = match self {
            DidContract::DidRegistry => &DID_REGISTRY_DEFAULT_ARGS,
            DidContract::DidRegistryRecoverable => &DID_REGISTRY_RECOVERABLE_DEFAULT_ARGS,
        };

        args.iter().map(|s| s.to_string()).collect()
    }
}

impl Display for DidContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DidContract::DidRegistry => write!(f, "did-registry"),
            DidContract::DidRegistryRecoverable => write!(f, "did-registry-recoverable"),
        }
    }
}

/// Immutable per-run deployment configuration, shared read-only across
/// concurrent deployments
#[derive(Debug, Clone)]
pub struct DeploymentConfig {
    /// Address of the sponsoring gas-model node
    pub node_address: Address,
    /// Unix timestamp at which the deployer's gas-model credential expires
    pub credential_expiry: u64,
    /// Gas limit for each deployment transaction
    pub gas_limit: u64,
    /// Gas price for each deployment transaction
    pub gas_price: u64,
    /// Seconds to wait for the network to confirm a deployment
    pub confirmation_timeout_secs: u64,
    /// Directory containing the contract build artifacts
    pub artifacts_dir: PathBuf,
}

impl DeploymentConfig {
    /// Validates the raw configuration values and builds the config
    pub fn new(
        node_address: &str,
        credential_expiry: u64,
        gas_limit: u64,
        gas_price: u64,
        confirmation_timeout_secs: u64,
        artifacts_dir: PathBuf,
    ) -> Result<Self, ScriptError> {
        let node_address = Address::from_str(node_address).map_err(|e| {
            ScriptError::ClientInitialization(format!("invalid node address: {}", e))
        })?;

        Ok(DeploymentConfig {
            node_address,
            credential_expiry,
            gas_limit,
            gas_price,
            confirmation_timeout_secs,
            artifacts_dir,
        })
    }
}
