//! Implementations of the deploy script subcommands

use std::{sync::Arc, time::Duration};

use ethers::{contract::ContractFactory, providers::Middleware, types::Address};
use futures::future::join_all;
use tokio::time::timeout;
use tracing::{error, info};

use crate::{
    artifacts::ContractArtifact,
    cli::{DeployArgs, DeploymentConfig, DidContract, ShowArtifactArgs},
    constants::NUM_DEPLOY_CONFIRMATIONS,
    errors::ScriptError,
    utils::{check_credential_expiry, tokenize_constructor_args},
};

/// Deploys the requested contracts concurrently, reporting each outcome
/// independently.
///
/// Returns an error iff at least one deployment failed, after all
/// deployments have been attempted.
pub async fn deploy(
    args: DeployArgs,
    config: &DeploymentConfig,
    client: Arc<impl Middleware>,
) -> Result<(), ScriptError> {
    if !args.constructor_args.is_empty() && args.contract.len() > 1 {
        return Err(ScriptError::CalldataConstruction(
            "explicit constructor arguments require a single contract".to_string(),
        ));
    }

    let deployments = args.contract.iter().map(|&contract| {
        let client = client.clone();
        let constructor_args = if args.constructor_args.is_empty() {
            contract.default_constructor_args()
        } else {
            args.constructor_args.clone()
        };

        async move {
            let res = deploy_did_contract(contract, &constructor_args, config, client).await;
            (contract, res)
        }
    });

    let mut failures = 0;
    for (contract, res) in join_all(deployments).await {
        match res {
            Ok(address) => info!("{} deployed at {:#x}", contract, address),
            Err(e) => {
                failures += 1;
                error!("{} deployment failed: {}", contract, e);
            }
        }
    }

    if failures > 0 {
        return Err(ScriptError::DeploymentsFailed(failures, args.contract.len()));
    }

    Ok(())
}

/// Loads a contract's build artifact and deploys it
async fn deploy_did_contract(
    contract: DidContract,
    constructor_args: &[String],
    config: &DeploymentConfig,
    client: Arc<impl Middleware>,
) -> Result<Address, ScriptError> {
    let artifact_path = config.artifacts_dir.join(contract.artifact_file());
    let artifact = ContractArtifact::from_file(&artifact_path)?;

    info!(
        "deploying {} ({} bytes of bytecode), sponsored by node {:#x}",
        contract,
        artifact.bytecode.len(),
        config.node_address,
    );

    deploy_contract(&artifact, constructor_args, config, client).await
}

/// Deploys a single contract: builds the deployment transaction from the
/// artifact's bytecode and the tokenized constructor arguments, applies the
/// configured fee parameters, submits it, and awaits confirmation under a
/// bounded wait.
pub async fn deploy_contract(
    artifact: &ContractArtifact,
    constructor_args: &[String],
    config: &DeploymentConfig,
    client: Arc<impl Middleware>,
) -> Result<Address, ScriptError> {
    check_credential_expiry(config.credential_expiry)?;

    let tokens = tokenize_constructor_args(&artifact.constructor_params(), constructor_args)?;

    let factory = ContractFactory::new(artifact.abi.clone(), artifact.bytecode.clone(), client);

    let mut deployer = factory
        .deploy_tokens(tokens)
        .map_err(|e| ScriptError::CalldataConstruction(e.to_string()))?
        .confirmations(NUM_DEPLOY_CONFIRMATIONS);

    // Gas-model networks do not price gas, so the fee parameters are fixed
    // by configuration rather than estimated
    deployer.tx.set_gas(config.gas_limit);
    deployer.tx.set_gas_price(config.gas_price);

    let contract = timeout(
        Duration::from_secs(config.confirmation_timeout_secs),
        deployer.send(),
    )
    .await
    .map_err(|_| ScriptError::ConfirmationTimeout(config.confirmation_timeout_secs))?
    .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

    Ok(contract.address())
}

/// Loads a build artifact and reports its constructor signature and
/// bytecode size
pub fn show_artifact(
    args: ShowArtifactArgs,
    config: &DeploymentConfig,
) -> Result<(), ScriptError> {
    let artifact_path = config.artifacts_dir.join(args.contract.artifact_file());
    let artifact = ContractArtifact::from_file(&artifact_path)?;

    info!(
        "{}: {}, {} bytes of creation bytecode",
        args.contract,
        artifact.constructor_signature(),
        artifact.bytecode.len(),
    );

    Ok(())
}
