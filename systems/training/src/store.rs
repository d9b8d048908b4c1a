//! JSON persistence of trained policies.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::evolution::Champion;
use crate::network::Network;

/// Failures while loading or saving a policy file.
#[derive(Debug, Error)]
pub enum PolicyStoreError {
    /// No file at the path.
    #[error("no saved policy at {}", path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },
    /// The file exists but could not be read.
    #[error("failed to read saved policy {}", path.display())]
    Read {
        /// File being read.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
    /// The file is not a saved policy.
    #[error("saved policy {} is malformed", path.display())]
    Malformed {
        /// File being parsed.
        path: PathBuf,
        /// Parse failure.
        #[source]
        source: serde_json::Error,
    },
    /// The network's parameters do not match its declared shape.
    #[error("saved policy {} has inconsistent network dimensions", path.display())]
    Shape {
        /// File being parsed.
        path: PathBuf,
    },
    /// The policy could not be serialized.
    #[error("failed to encode policy")]
    Encode(#[source] serde_json::Error),
    /// The file could not be written.
    #[error("failed to write saved policy {}", path.display())]
    Write {
        /// File being written.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
}

/// Champion network as stored on disk.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedPolicy {
    /// Generation the network was scored in.
    pub generation: u32,
    /// Score it earned.
    pub fitness: u32,
    /// The network itself.
    pub network: Network,
}

impl From<Champion> for SavedPolicy {
    fn from(champion: Champion) -> Self {
        Self {
            generation: champion.generation,
            fitness: champion.fitness,
            network: champion.network,
        }
    }
}

impl SavedPolicy {
    /// Reads and validates a policy file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PolicyStoreError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                PolicyStoreError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                PolicyStoreError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let policy: Self =
            serde_json::from_str(&text).map_err(|source| PolicyStoreError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;
        if !policy.network.is_well_formed() {
            return Err(PolicyStoreError::Shape {
                path: path.to_path_buf(),
            });
        }

        tracing::info!(path = %path.display(), fitness = policy.fitness, "policy loaded");
        Ok(policy)
    }

    /// Writes the policy as pretty-printed JSON, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PolicyStoreError> {
        let path = path.as_ref();
        let text = serde_json::to_string_pretty(self).map_err(PolicyStoreError::Encode)?;
        fs::write(path, text).map_err(|source| PolicyStoreError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), fitness = self.fitness, "policy saved");
        Ok(())
    }
}
