use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tunables for [`Cube3::solve`](crate::cube::Cube3::solve).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Upper bound on the passes of every repeat-until-done loop in the
    /// solver.
    pub max_loop_iterations: usize,
    /// Deepest lookahead tried for a cross edge once depth 4 fails.
    pub cross_fallback_depth: usize,
    /// Reject states that cannot be reached from the solved cube before
    /// solving.
    pub check_legality: bool,
    /// Split every lookahead search over the first move on scoped threads.
    pub parallel_search: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_loop_iterations: 32,
            cross_fallback_depth: 6,
            check_legality: true,
            parallel_search: false,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read the configuration file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid solver configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

impl SolverConfig {
    /// Parses a TOML document. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Fails on malformed TOML, unknown keys, or mistyped values.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// # Errors
    ///
    /// Fails if the file cannot be read or does not parse.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
