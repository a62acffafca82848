use std::{fmt::Display, fs::File, io::BufReader, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Which tags the Viterbi decoder may assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateSpace {
    /// Only tags that were followed by another tag somewhere in training.
    /// A tag that only ever ends a sentence can never be decoded.
    #[default]
    Predecessors,
    /// Every tag observed in training.
    AllTags,
}

impl FromStr for StateSpace {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "predecessors" => Ok(Self::Predecessors),
            "all_tags" => Ok(Self::AllTags),
            _ => Err(Error::InvalidParameter(format!(
                "state_space: unknown value {s:?} (expected predecessors or all_tags)"
            ))),
        }
    }
}

impl Display for StateSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Predecessors => write!(f, "predecessors"),
            Self::AllTags => write!(f, "all_tags"),
        }
    }
}

/// Estimation and decoding parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HmmOptions {
    /// Additive smoothing constant `k`.
    pub smoothing: f64,
    pub state_space: StateSpace,
}

impl Default for HmmOptions {
    fn default() -> Self {
        Self {
            smoothing: Self::DEFAULT_SMOOTHING,
            state_space: StateSpace::default(),
        }
    }
}

impl HmmOptions {
    pub const DEFAULT_SMOOTHING: f64 = 1e-5;

    /// Loads options from a JSON file; missing fields keep their defaults.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let f = File::open(path)?;
        let opts: Self = serde_json::from_reader(BufReader::new(f))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Sets a single parameter from its textual form, as given by `-p name=value`.
    /// On error `self` is left unchanged.
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        let mut next = self.clone();
        match name {
            "smoothing" => {
                next.smoothing = value.parse().map_err(|_| {
                    Error::InvalidParameter(format!("smoothing: not a number: {value:?}"))
                })?;
            }
            "state_space" => next.state_space = value.parse()?,
            _ => return Err(Error::InvalidParameter(format!("unknown parameter: {name}"))),
        }
        next.validate()?;
        *self = next;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.smoothing.is_finite() && self.smoothing > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "smoothing must be a finite positive number, got {}",
                self.smoothing
            )));
        }
        Ok(())
    }
}
