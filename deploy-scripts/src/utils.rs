//! Utilities for the deploy scripts

use std::{
    str::FromStr,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use ethers::{
    abi::{ParamType, Token},
    middleware::SignerMiddleware,
    providers::{Http, Middleware, Provider},
    signers::{LocalWallet, Signer},
    types::{Address, U256},
};

use crate::errors::ScriptError;

/// Sets up the client with which to submit deployment transactions,
/// instantiating a signer middleware from the deployer's private key and
/// the network RPC URL
pub async fn setup_client(
    priv_key: &str,
    rpc_url: &str,
) -> Result<Arc<impl Middleware>, ScriptError> {
    let provider = Provider::<Http>::try_from(rpc_url)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    let wallet = LocalWallet::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    let chain_id = provider
        .get_chainid()
        .await
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?
        .as_u64();

    let client = Arc::new(SignerMiddleware::new(
        provider,
        wallet.with_chain_id(chain_id),
    ));

    Ok(client)
}

/// Checks that the gas-model credential is still valid, rejecting the
/// deployment before submission if the expiry has passed
pub fn check_credential_expiry(expiry: u64) -> Result<(), ScriptError> {
    // A clock before the unix epoch is treated as time zero
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    if expiry <= now {
        return Err(ScriptError::CredentialExpired(expiry));
    }

    Ok(())
}

/// Tokenizes raw constructor arguments against the parameter types declared
/// by the contract's constructor
pub fn tokenize_constructor_args(
    params: &[ParamType],
    args: &[String],
) -> Result<Vec<Token>, ScriptError> {
    if params.len() != args.len() {
        return Err(ScriptError::CalldataConstruction(format!(
            "constructor expects {} arguments, got {}",
            params.len(),
            args.len(),
        )));
    }

    params
        .iter()
        .zip(args)
        .map(|(kind, raw)| tokenize_arg(kind, raw))
        .collect()
}

/// Tokenizes a single raw argument as the given parameter type
fn tokenize_arg(kind: &ParamType, raw: &str) -> Result<Token, ScriptError> {
    match kind {
        ParamType::Uint(_) => U256::from_dec_str(raw)
            .map(Token::Uint)
            .map_err(|e| ScriptError::CalldataConstruction(format!("`{}`: {}", raw, e))),
        ParamType::Int(_) => {
            let val: i128 = raw
                .parse()
                .map_err(|e| ScriptError::CalldataConstruction(format!("`{}`: {}", raw, e)))?;

            // Negative values are two's-complement encoded over 256 bits
            let token = if val < 0 {
                Token::Int(U256::MAX - U256::from(val.unsigned_abs()) + U256::one())
            } else {
                Token::Int(U256::from(val.unsigned_abs()))
            };

            Ok(token)
        }
        ParamType::Address => Address::from_str(raw)
            .map(Token::Address)
            .map_err(|e| ScriptError::CalldataConstruction(format!("`{}`: {}", raw, e))),
        ParamType::Bool => raw
            .parse()
            .map(Token::Bool)
            .map_err(|_| ScriptError::CalldataConstruction(format!("`{}` is not a bool", raw))),
        ParamType::String => Ok(Token::String(raw.to_string())),
        ParamType::Bytes => {
            let stripped = raw.strip_prefix("0x").unwrap_or(raw);
            hex::decode(stripped)
                .map(Token::Bytes)
                .map_err(|e| ScriptError::CalldataConstruction(format!("`{}`: {}", raw, e)))
        }
        other => Err(ScriptError::CalldataConstruction(format!(
            "unsupported constructor parameter type: {}",
            other,
        ))),
    }
}

#[cfg(test)]
mod tests {
    //! Tests for credential validation and constructor-argument tokenization

    use ethers::{
        abi::{ParamType, Token},
        types::{Address, U256},
    };

    use super::{check_credential_expiry, tokenize_constructor_args};
    use crate::errors::ScriptError;

    /// A unix timestamp comfortably in the future (2100-01-01)
    const FUTURE_EXPIRY: u64 = 4_102_444_800;

    /// Converts string literals into owned argument strings
    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    /// A future expiry passes the credential check
    #[test]
    fn test_valid_credential() {
        assert!(check_credential_expiry(FUTURE_EXPIRY).is_ok());
    }

    /// A past expiry is rejected
    #[test]
    fn test_expired_credential() {
        let res = check_credential_expiry(1_736_394_529);
        assert!(matches!(res, Err(ScriptError::CredentialExpired(_))));
    }

    /// A decimal string tokenizes as a uint
    #[test]
    fn test_tokenize_uint() {
        let tokens = tokenize_constructor_args(&[ParamType::Uint(256)], &args(&["3600"])).unwrap();
        assert_eq!(tokens, vec![Token::Uint(U256::from(3600u64))]);
    }

    /// The canonical recoverable-registry arguments tokenize as four uints
    #[test]
    fn test_tokenize_recoverable_registry_args() {
        let params = vec![ParamType::Uint(256); 4];
        let tokens =
            tokenize_constructor_args(&params, &args(&["3600", "3", "5", "86400"])).unwrap();

        assert_eq!(
            tokens,
            vec![
                Token::Uint(U256::from(3600u64)),
                Token::Uint(U256::from(3u64)),
                Token::Uint(U256::from(5u64)),
                Token::Uint(U256::from(86400u64)),
            ],
        );
    }

    /// Address, bool, string, and bytes arguments all tokenize
    #[test]
    fn test_tokenize_mixed_types() {
        let params = vec![
            ParamType::Address,
            ParamType::Bool,
            ParamType::String,
            ParamType::Bytes,
        ];
        let tokens = tokenize_constructor_args(
            &params,
            &args(&[
                "0x47e179ec197488593b187f80a00eb0da91f1b9d0",
                "true",
                "did:lac:main",
                "0xdeadbeef",
            ]),
        )
        .unwrap();

        assert_eq!(
            tokens[0],
            Token::Address(
                "0x47e179ec197488593b187f80a00eb0da91f1b9d0"
                    .parse::<Address>()
                    .unwrap()
            ),
        );
        assert_eq!(tokens[1], Token::Bool(true));
        assert_eq!(tokens[2], Token::String("did:lac:main".to_string()));
        assert_eq!(tokens[3], Token::Bytes(vec![0xde, 0xad, 0xbe, 0xef]));
    }

    /// Negative int arguments are two's-complement encoded
    #[test]
    fn test_tokenize_negative_int() {
        let tokens = tokenize_constructor_args(&[ParamType::Int(256)], &args(&["-1"])).unwrap();
        assert_eq!(tokens, vec![Token::Int(U256::MAX)]);
    }

    /// An argument-count mismatch is a calldata error
    #[test]
    fn test_tokenize_arity_mismatch() {
        let res = tokenize_constructor_args(&[ParamType::Uint(256)], &args(&["3600", "3"]));
        assert!(matches!(res, Err(ScriptError::CalldataConstruction(_))));
    }

    /// A non-numeric uint argument is a calldata error
    #[test]
    fn test_tokenize_bad_uint() {
        let res = tokenize_constructor_args(&[ParamType::Uint(256)], &args(&["an hour"]));
        assert!(matches!(res, Err(ScriptError::CalldataConstruction(_))));
    }

    /// Composite parameter types are rejected rather than mis-encoded
    #[test]
    fn test_tokenize_unsupported_type() {
        let params = vec![ParamType::FixedArray(Box::new(ParamType::Uint(256)), 2)];
        let res = tokenize_constructor_args(&params, &args(&["3600"]));
        assert!(matches!(res, Err(ScriptError::CalldataConstruction(_))));
    }
}
