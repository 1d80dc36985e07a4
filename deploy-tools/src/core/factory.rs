// Copyright 2026, SolDisc Developers
// For licensing, see licenses/COPYRIGHT.md at the repository root

//! Contract factories: creation code plus constructor argument encoding.

use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt, Specifier},
    json_abi::{Constructor, JsonAbi, StateMutability},
    primitives::{Bytes, U256},
};

use crate::core::artifact::{Artifact, ArtifactError, ArtifactStore};

/// Runtime code size limit from EIP-170.
pub const MAX_CODE_SIZE: usize = 24_576;

/// Init code size limit from EIP-3860.
pub const MAX_INITCODE_SIZE: usize = 2 * MAX_CODE_SIZE;

#[derive(Debug, thiserror::Error)]
pub enum FactoryError {
    #[error("{0}")]
    Artifact(#[from] ArtifactError),

    #[error("constructor of {contract} takes {want} argument(s), got {got}")]
    ArgumentCount {
        contract: String,
        want: usize,
        got: usize,
    },
    #[error("could not parse constructor argument {param}: {source}")]
    InvalidArgument {
        param: String,
        source: alloy::dyn_abi::Error,
    },
    #[error("attempting to send Ether to non-payable constructor of {0}")]
    NonPayable(String),
    #[error(
        "{contract} {kind} is {size} bytes, over the {limit} byte limit \
         (set allow_unlimited_contract_size on the network to skip this check)"
    )]
    CodeTooLarge {
        contract: String,
        kind: &'static str,
        size: usize,
        limit: usize,
    },
}

/// Sizes of the code a deployment would create.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodeSize {
    pub runtime: usize,
    pub initcode: usize,
}

impl CodeSize {
    pub fn check(&self, contract: &str) -> Result<(), FactoryError> {
        if self.runtime > MAX_CODE_SIZE {
            return Err(FactoryError::CodeTooLarge {
                contract: contract.to_string(),
                kind: "runtime code",
                size: self.runtime,
                limit: MAX_CODE_SIZE,
            });
        }
        if self.initcode > MAX_INITCODE_SIZE {
            return Err(FactoryError::CodeTooLarge {
                contract: contract.to_string(),
                kind: "init code",
                size: self.initcode,
                limit: MAX_INITCODE_SIZE,
            });
        }
        Ok(())
    }
}

/// Builds deployment code for a compiled contract.
#[derive(Clone, Debug)]
pub struct ContractFactory {
    artifact: Artifact,
    bytecode: Bytes,
}

impl ContractFactory {
    /// Factory for a contract by bare or fully qualified name.
    pub fn get(store: &ArtifactStore, name: &str) -> Result<Self, FactoryError> {
        Self::new(store.read(name)?)
    }

    pub fn new(artifact: Artifact) -> Result<Self, FactoryError> {
        let bytecode = artifact.creation_code()?;
        Ok(Self { artifact, bytecode })
    }

    pub fn name(&self) -> &str {
        &self.artifact.contract_name
    }

    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    pub fn abi(&self) -> &JsonAbi {
        &self.artifact.abi
    }

    pub fn bytecode(&self) -> &Bytes {
        &self.bytecode
    }

    pub fn constructor(&self) -> Option<&Constructor> {
        self.artifact.abi.constructor()
    }

    /// ABI-encodes constructor arguments given as strings.
    pub fn encode_constructor_args(
        &self,
        args: &[String],
        value: U256,
    ) -> Result<Vec<u8>, FactoryError> {
        let Some(constructor) = self.constructor() else {
            if !args.is_empty() {
                return Err(FactoryError::ArgumentCount {
                    contract: self.name().to_string(),
                    want: 0,
                    got: args.len(),
                });
            }
            if !value.is_zero() {
                return Err(FactoryError::NonPayable(self.name().to_string()));
            }
            return Ok(Vec::new());
        };

        if constructor.state_mutability != StateMutability::Payable && !value.is_zero() {
            return Err(FactoryError::NonPayable(self.name().to_string()));
        }
        if args.len() != constructor.inputs.len() {
            return Err(FactoryError::ArgumentCount {
                contract: self.name().to_string(),
                want: constructor.inputs.len(),
                got: args.len(),
            });
        }

        let mut values = Vec::<DynSolValue>::with_capacity(args.len());
        for (arg, param) in args.iter().zip(constructor.inputs.iter()) {
            let value = param
                .resolve()
                .and_then(|ty| ty.coerce_str(arg))
                .map_err(|source| FactoryError::InvalidArgument {
                    param: param.to_string(),
                    source,
                })?;
            values.push(value);
        }
        constructor
            .abi_encode_input(&values)
            .map_err(|source| FactoryError::InvalidArgument {
                param: "constructor".to_string(),
                source,
            })
    }

    /// Creation code followed by the encoded constructor arguments.
    pub fn deploy_code(&self, args: &[String], value: U256) -> Result<Bytes, FactoryError> {
        let encoded = self.encode_constructor_args(args, value)?;
        let mut code = Vec::with_capacity(self.bytecode.len() + encoded.len());
        code.extend_from_slice(&self.bytecode);
        code.extend(encoded);
        Ok(code.into())
    }

    /// Code sizes for deploying `deploy_code`.
    pub fn code_size(&self, deploy_code: &[u8]) -> Result<CodeSize, FactoryError> {
        Ok(CodeSize {
            runtime: self.artifact.runtime_code()?.len(),
            initcode: deploy_code.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::core::artifact::testing::*;

    fn factory(abi: serde_json::Value, deployed: &str) -> ContractFactory {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(
            dir.path(),
            "contracts/Token.sol",
            "Token",
            abi,
            COUNTER_BYTECODE,
            deployed,
        );
        ContractFactory::get(&ArtifactStore::new(dir.path()), "Token").unwrap()
    }

    fn token_abi(state_mutability: &str) -> serde_json::Value {
        json!([{
            "type": "constructor",
            "stateMutability": state_mutability,
            "inputs": [
                { "name": "supply", "type": "uint256", "internalType": "uint256" },
                { "name": "owner", "type": "address", "internalType": "address" }
            ]
        }])
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn no_constructor() {
        let factory = factory(json!([]), COUNTER_RUNTIME);
        assert!(factory.constructor().is_none());

        let code = factory.deploy_code(&[], U256::ZERO).unwrap();
        assert_eq!(code, *factory.bytecode());

        assert!(matches!(
            factory.deploy_code(&args(&["1"]), U256::ZERO),
            Err(FactoryError::ArgumentCount {
                want: 0,
                got: 1,
                ..
            })
        ));
        assert!(matches!(
            factory.deploy_code(&[], U256::from(1)),
            Err(FactoryError::NonPayable(_))
        ));
    }

    #[test]
    fn encodes_constructor_arguments() {
        let factory = factory(token_abi("nonpayable"), COUNTER_RUNTIME);
        let owner = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

        let encoded = factory
            .encode_constructor_args(&args(&["1000", owner]), U256::ZERO)
            .unwrap();
        assert_eq!(encoded.len(), 64);
        assert_eq!(U256::from_be_slice(&encoded[..32]), U256::from(1000));
        assert_eq!(
            hex::encode(&encoded[44..64]),
            "f39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );

        let code = factory
            .deploy_code(&args(&["1000", owner]), U256::ZERO)
            .unwrap();
        assert_eq!(code.len(), factory.bytecode().len() + 64);
        assert!(code.starts_with(factory.bytecode()));
    }

    #[test]
    fn constructor_argument_errors() {
        let factory = factory(token_abi("nonpayable"), COUNTER_RUNTIME);

        assert!(matches!(
            factory.encode_constructor_args(&args(&["1000"]), U256::ZERO),
            Err(FactoryError::ArgumentCount {
                want: 2,
                got: 1,
                ..
            })
        ));
        assert!(matches!(
            factory.encode_constructor_args(&args(&["lots", "0x00"]), U256::ZERO),
            Err(FactoryError::InvalidArgument { .. })
        ));
        assert!(matches!(
            factory.encode_constructor_args(
                &args(&["1", "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"]),
                U256::from(5)
            ),
            Err(FactoryError::NonPayable(_))
        ));
    }

    #[test]
    fn payable_constructor_accepts_value() {
        let factory = factory(token_abi("payable"), COUNTER_RUNTIME);
        let encoded = factory.encode_constructor_args(
            &args(&["1", "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"]),
            U256::from(5),
        );
        assert!(encoded.is_ok());
    }

    #[test]
    fn code_size_limits() {
        let oversized = format!("0x{}", "00".repeat(MAX_CODE_SIZE + 1));
        let factory = factory(json!([]), &oversized);
        let code = factory.deploy_code(&[], U256::ZERO).unwrap();

        let size = factory.code_size(&code).unwrap();
        assert_eq!(size.runtime, MAX_CODE_SIZE + 1);
        assert_eq!(size.initcode, 22);
        assert!(matches!(
            size.check("Token"),
            Err(FactoryError::CodeTooLarge {
                kind: "runtime code",
                ..
            })
        ));

        let initcode = CodeSize {
            runtime: 10,
            initcode: MAX_INITCODE_SIZE + 1,
        };
        assert!(matches!(
            initcode.check("Token"),
            Err(FactoryError::CodeTooLarge {
                kind: "init code",
                ..
            })
        ));
        assert!(CodeSize {
            runtime: MAX_CODE_SIZE,
            initcode: MAX_INITCODE_SIZE
        }
        .check("Token")
        .is_ok());
    }
}
