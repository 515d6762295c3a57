//! Loading and validation of Truffle-style contract build artifacts

use std::{fs, path::Path};

use ethers::{
    abi::{Contract, ParamType},
    types::Bytes,
};
use serde_json::Value;

use crate::errors::ScriptError;

/// A compiled contract: its ABI and its creation bytecode.
///
/// Loaded once per deployment from a Truffle-style build artifact of the
/// form `{"abi": [...], "bytecode": "0x..."}`, and immutable thereafter.
#[derive(Debug, Clone)]
pub struct ContractArtifact {
    /// The contract ABI
    pub abi: Contract,
    /// The contract creation bytecode
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Load an artifact from a build artifact JSON file
    pub fn from_file(path: &Path) -> Result<Self, ScriptError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ScriptError::ArtifactLoad(format!("{}: {}", path.display(), e)))?;

        Self::from_json_str(&contents)
    }

    /// Parse an artifact from its JSON representation
    pub fn from_json_str(json: &str) -> Result<Self, ScriptError> {
        let artifact: Value =
            serde_json::from_str(json).map_err(|e| ScriptError::ArtifactLoad(e.to_string()))?;

        let abi_value = artifact
            .get("abi")
            .ok_or_else(|| ScriptError::ArtifactLoad("artifact is missing `abi`".to_string()))?;

        let abi: Contract = serde_json::from_value(abi_value.clone())
            .map_err(|e| ScriptError::ArtifactLoad(e.to_string()))?;

        let bytecode_hex = artifact
            .get("bytecode")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ScriptError::ArtifactLoad("artifact is missing `bytecode`".to_string())
            })?;

        let bytecode_hex = bytecode_hex.strip_prefix("0x").unwrap_or(bytecode_hex);
        if bytecode_hex.is_empty() {
            return Err(ScriptError::ArtifactLoad(
                "artifact bytecode is empty".to_string(),
            ));
        }

        let bytecode = hex::decode(bytecode_hex)
            .map(Bytes::from)
            .map_err(|e| ScriptError::ArtifactLoad(format!("invalid bytecode hex: {}", e)))?;

        Ok(ContractArtifact { abi, bytecode })
    }

    /// The declared parameter types of the contract's constructor.
    ///
    /// Empty when the ABI declares no constructor, in which case the
    /// contract takes no constructor arguments.
    pub fn constructor_params(&self) -> Vec<ParamType> {
        self.abi
            .constructor
            .as_ref()
            .map(|c| c.inputs.iter().map(|input| input.kind.clone()).collect())
            .unwrap_or_default()
    }

    /// A human-readable rendering of the constructor signature
    pub fn constructor_signature(&self) -> String {
        let params = self
            .constructor_params()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");

        format!("constructor({})", params)
    }
}

#[cfg(test)]
mod tests {
    //! Tests for artifact loading and validation

    use std::fs;

    use ethers::abi::ParamType;

    use super::ContractArtifact;
    use crate::errors::ScriptError;

    /// The `DIDRegistry` fixture artifact
    const DID_REGISTRY_FIXTURE: &str = include_str!("../fixtures/DIDRegistry.json");

    /// The `DIDRegistryRecoverable` fixture artifact
    const DID_REGISTRY_RECOVERABLE_FIXTURE: &str =
        include_str!("../fixtures/DIDRegistryRecoverable.json");

    /// A well-formed fixture parses into an ABI and nonempty bytecode
    #[test]
    fn test_parse_well_formed_artifact() {
        let artifact = ContractArtifact::from_json_str(DID_REGISTRY_FIXTURE).unwrap();

        assert!(!artifact.bytecode.is_empty());
        assert_eq!(artifact.constructor_params(), vec![ParamType::Uint(256)]);
        assert_eq!(artifact.constructor_signature(), "constructor(uint256)");
    }

    /// The recoverable registry fixture declares a four-argument constructor
    #[test]
    fn test_parse_recoverable_artifact() {
        let artifact = ContractArtifact::from_json_str(DID_REGISTRY_RECOVERABLE_FIXTURE).unwrap();

        assert_eq!(artifact.constructor_params().len(), 4);
        assert_eq!(
            artifact.constructor_signature(),
            "constructor(uint256,uint256,uint256,uint256)"
        );
    }

    /// An artifact without a `bytecode` field fails to load
    #[test]
    fn test_missing_bytecode() {
        let res = ContractArtifact::from_json_str(r#"{"abi": []}"#);
        assert!(matches!(res, Err(ScriptError::ArtifactLoad(_))));
    }

    /// An artifact with an empty `bytecode` field fails to load
    #[test]
    fn test_empty_bytecode() {
        let res = ContractArtifact::from_json_str(r#"{"abi": [], "bytecode": "0x"}"#);
        assert!(matches!(res, Err(ScriptError::ArtifactLoad(_))));
    }

    /// An artifact with non-hex bytecode fails to load
    #[test]
    fn test_invalid_bytecode_hex() {
        let res = ContractArtifact::from_json_str(r#"{"abi": [], "bytecode": "0xzzzz"}"#);
        assert!(matches!(res, Err(ScriptError::ArtifactLoad(_))));
    }

    /// An artifact without an `abi` field fails to load
    #[test]
    fn test_missing_abi() {
        let res = ContractArtifact::from_json_str(r#"{"bytecode": "0x6001"}"#);
        assert!(matches!(res, Err(ScriptError::ArtifactLoad(_))));
    }

    /// An ABI without a constructor entry yields no constructor parameters
    #[test]
    fn test_no_constructor() {
        let artifact =
            ContractArtifact::from_json_str(r#"{"abi": [], "bytecode": "0x6001"}"#).unwrap();

        assert!(artifact.constructor_params().is_empty());
        assert_eq!(artifact.constructor_signature(), "constructor()");
    }

    /// Loading from a file on disk behaves the same as parsing from a string
    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("DIDRegistry.json");
        fs::write(&path, DID_REGISTRY_FIXTURE).unwrap();

        let artifact = ContractArtifact::from_file(&path).unwrap();
        assert_eq!(artifact.constructor_params(), vec![ParamType::Uint(256)]);
    }

    /// A missing artifact file surfaces as an artifact-load error
    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let res = ContractArtifact::from_file(&dir.path().join("NoSuchContract.json"));
        assert!(matches!(res, Err(ScriptError::ArtifactLoad(_))));
    }
}
