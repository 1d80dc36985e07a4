// Copyright 2026, SolDisc Developers
// For licensing, see licenses/COPYRIGHT.md at the repository root

//! Compiled contract artifacts in the `hh-sol-artifact-1` JSON format.
//!
//! Artifacts live at `<artifacts>/<source name>/<contract name>.json`, next to a `.dbg.json`
//! file pointing at the compiler build info used for explorer verification.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use alloy::{json_abi::JsonAbi, primitives::Bytes};
use serde::Deserialize;

use crate::utils::decode0x;

const BUILD_INFO_DIR: &str = "build-info";
const DEBUG_SUFFIX: &str = ".dbg.json";

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),
    #[error("failed to parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("artifact for contract {name} not found in {}", .dir.display())]
    NotFound { name: String, dir: PathBuf },
    #[error("multiple artifacts for contract {name}, use one of: {}", .candidates.join(", "))]
    Ambiguous {
        name: String,
        candidates: Vec<String>,
    },
    #[error("contract {0} has no creation bytecode (abstract contract or interface)")]
    NotDeployable(String),
    #[error("contract {name} requires linking libraries: {}", .libraries.join(", "))]
    UnlinkedLibraries {
        name: String,
        libraries: Vec<String>,
    },
    #[error("contract {name} has malformed bytecode: {source}")]
    InvalidBytecode {
        name: String,
        source: hex::FromHexError,
    },
    #[error("no build info recorded for contract {0}")]
    MissingBuildInfo(String),
}

/// A compiled contract.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    #[serde(rename = "_format", default)]
    pub format: String,
    pub contract_name: String,
    pub source_name: String,
    pub abi: JsonAbi,
    pub bytecode: String,
    #[serde(default)]
    pub deployed_bytecode: String,
    #[serde(default)]
    pub link_references: BTreeMap<String, BTreeMap<String, serde_json::Value>>,

    #[serde(skip)]
    path: PathBuf,
}

impl Artifact {
    /// Reads an artifact file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let mut artifact: Artifact =
            serde_json::from_str(&contents).map_err(|source| ArtifactError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        artifact.path = path.to_path_buf();
        Ok(artifact)
    }

    /// `<source name>:<contract name>`
    pub fn fully_qualified_name(&self) -> String {
        format!("{}:{}", self.source_name, self.contract_name)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creation bytecode, checked to be deployable as is.
    pub fn creation_code(&self) -> Result<Bytes, ArtifactError> {
        if is_empty_code(&self.bytecode) {
            return Err(ArtifactError::NotDeployable(self.contract_name.clone()));
        }
        let libraries = self.unlinked_libraries();
        if !libraries.is_empty() || self.bytecode.contains("__$") {
            return Err(ArtifactError::UnlinkedLibraries {
                name: self.contract_name.clone(),
                libraries,
            });
        }
        self.decode(&self.bytecode)
    }

    /// Runtime bytecode, empty when the artifact does not record it.
    pub fn runtime_code(&self) -> Result<Bytes, ArtifactError> {
        if is_empty_code(&self.deployed_bytecode) {
            return Ok(Bytes::new());
        }
        self.decode(&self.deployed_bytecode)
    }

    fn unlinked_libraries(&self) -> Vec<String> {
        self.link_references
            .iter()
            .flat_map(|(source, libraries)| {
                libraries
                    .keys()
                    .map(move |library| format!("{source}:{library}"))
            })
            .collect()
    }

    fn decode(&self, code: &str) -> Result<Bytes, ArtifactError> {
        decode0x(code)
            .map(Bytes::from)
            .map_err(|source| ArtifactError::InvalidBytecode {
                name: self.contract_name.clone(),
                source,
            })
    }
}

fn is_empty_code(code: &str) -> bool {
    let code = code.trim();
    code.is_empty() || code == "0x"
}

/// Compiler input and version for a compilation job.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    pub solc_version: String,
    pub solc_long_version: String,
    /// Solidity standard JSON input.
    pub input: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct DebugFile {
    #[serde(rename = "buildInfo")]
    build_info: PathBuf,
}

/// Directory of compiled artifacts.
#[derive(Clone, Debug)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Reads the artifact for a bare (`Token`) or fully qualified (`contracts/Token.sol:Token`)
    /// contract name.
    pub fn read(&self, name: &str) -> Result<Artifact, ArtifactError> {
        let path = self.find(name)?;
        debug!(@grey, "reading artifact {}", path.display());
        Artifact::read(path)
    }

    /// Locates the artifact file for a contract name.
    pub fn find(&self, name: &str) -> Result<PathBuf, ArtifactError> {
        if let Some((source, contract)) = name.rsplit_once(':') {
            let path = self.dir.join(source).join(format!("{contract}.json"));
            return if path.is_file() {
                Ok(path)
            } else {
                Err(self.not_found(name))
            };
        }

        let mut candidates = self.search(&glob::Pattern::escape(name))?;
        match candidates.len() {
            0 => Err(self.not_found(name)),
            1 => Ok(candidates.remove(0)),
            _ => Err(ArtifactError::Ambiguous {
                name: name.to_string(),
                candidates: candidates
                    .iter()
                    .map(|path| self.qualified_name(path))
                    .collect(),
            }),
        }
    }

    /// Every deployable artifact in the store, sorted by fully qualified name.
    pub fn all(&self) -> Result<Vec<Artifact>, ArtifactError> {
        let mut artifacts = Vec::new();
        for path in self.search("*")? {
            let artifact = Artifact::read(&path)?;
            if !is_empty_code(&artifact.bytecode) {
                artifacts.push(artifact);
            }
        }
        artifacts.sort_by_key(Artifact::fully_qualified_name);
        Ok(artifacts)
    }

    /// Build info of the compilation that produced `artifact`.
    pub fn build_info(&self, artifact: &Artifact) -> Result<BuildInfo, ArtifactError> {
        let debug_path = artifact
            .path()
            .with_file_name(format!("{}{DEBUG_SUFFIX}", artifact.contract_name));
        if !debug_path.is_file() {
            return Err(ArtifactError::MissingBuildInfo(
                artifact.contract_name.clone(),
            ));
        }
        let debug: DebugFile = read_json(&debug_path)?;

        let base = debug_path.parent().unwrap_or(&self.dir);
        let path = base.join(debug.build_info);
        if !path.is_file() {
            return Err(ArtifactError::MissingBuildInfo(
                artifact.contract_name.clone(),
            ));
        }
        read_json(&path)
    }

    /// Artifact files whose stem matches `stem_pattern`, sorted.
    fn search(&self, stem_pattern: &str) -> Result<Vec<PathBuf>, ArtifactError> {
        let dir = glob::Pattern::escape(&self.dir.to_string_lossy());
        let pattern = format!("{dir}/**/{stem_pattern}.json");

        let mut paths: Vec<PathBuf> = glob::glob(&pattern)?
            .filter_map(Result::ok)
            .filter(|path| self.is_artifact_path(path))
            .collect();
        paths.sort();
        Ok(paths)
    }

    fn is_artifact_path(&self, path: &Path) -> bool {
        let in_build_info = path
            .strip_prefix(&self.dir)
            .map(|rel| rel.starts_with(BUILD_INFO_DIR))
            .unwrap_or(false);
        let is_debug = path
            .file_name()
            .map(|name| name.to_string_lossy().ends_with(DEBUG_SUFFIX))
            .unwrap_or(false);
        path.is_file() && !in_build_info && !is_debug
    }

    fn qualified_name(&self, path: &Path) -> String {
        let source = path
            .parent()
            .and_then(|parent| parent.strip_prefix(&self.dir).ok())
            .unwrap_or(Path::new(""));
        let contract = path.file_stem().unwrap_or_default();
        format!("{}:{}", source.display(), contract.to_string_lossy())
    }

    fn not_found(&self, name: &str) -> ArtifactError {
        ArtifactError::NotFound {
            name: name.to_string(),
            dir: self.dir.clone(),
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|source| ArtifactError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Helpers for writing artifact fixtures in tests.
#[cfg(test)]
pub(crate) mod testing {
    use std::{fs, path::Path};

    use serde_json::json;

    pub const COUNTER_BYTECODE: &str = "0x600a600c600039600a6000f3602a60005260206000f3";
    pub const COUNTER_RUNTIME: &str = "0x602a60005260206000f3";

    pub fn write_artifact(
        dir: &Path,
        source: &str,
        name: &str,
        abi: serde_json::Value,
        bytecode: &str,
        deployed: &str,
    ) {
        let artifact = json!({
            "_format": "hh-sol-artifact-1",
            "contractName": name,
            "sourceName": source,
            "abi": abi,
            "bytecode": bytecode,
            "deployedBytecode": deployed,
            "linkReferences": {},
            "deployedLinkReferences": {},
        });
        let parent = dir.join(source);
        fs::create_dir_all(&parent).unwrap();
        fs::write(parent.join(format!("{name}.json")), artifact.to_string()).unwrap();
    }

    pub fn write_counter(dir: &Path, source: &str, name: &str) {
        write_artifact(
            dir,
            source,
            name,
            json!([]),
            COUNTER_BYTECODE,
            COUNTER_RUNTIME,
        );
    }
}
