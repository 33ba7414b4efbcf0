//! Results files: a TOML list of state reports.
//!
//! ```toml
//! [[result]]
//! name = "California"
//! votes_a = 1000
//! votes_b = 900
//! seats = 32
//! ```

use anyhow::{Context, Result};
use seatledger_core::{Error, StateResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsFile {
    #[serde(default, rename = "result")]
    pub results: Vec<StateResult>,
}

/// An entry that would be rejected by a ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Problem {
    /// Zero-based position in the file.
    pub index: usize,
    pub error: Error,
}

impl ResultsFile {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read results file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid results file {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Everything a ledger would reject, in file order. Duplicates are
    /// reported for every repeat after the first valid occurrence.
    pub fn check(&self) -> Vec<Problem> {
        let mut seen = BTreeSet::new();
        let mut problems = Vec::new();

        for (index, result) in self.results.iter().enumerate() {
            if let Err(error) = result.validate() {
                problems.push(Problem { index, error });
                continue;
            }
            if !seen.insert(result.name.as_str()) {
                problems.push(Problem {
                    index,
                    error: Error::DuplicateState {
                        state: result.name.clone(),
                    },
                });
            }
        }

        problems
    }
}
