use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{ApiStrategy, CodeStrategy, DifferenceStrategy, IncompatibleStrategy, NoOpStrategy};
use crate::errors::JarDiffError;

/// Named strategy chains selectable from configuration and the CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Declaration, constant value and code changes
    #[default]
    Api,
    /// Constant value and code changes only
    Code,
    /// Changes that break clients compiled against the old version
    Incompatible,
    /// Every class and feature present on both sides
    #[serde(rename = "noop")]
    NoOp,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::Api,
        StrategyKind::Code,
        StrategyKind::Incompatible,
        StrategyKind::NoOp,
    ];

    /// Assemble the strategy chain this kind names
    pub fn build(self) -> Box<dyn DifferenceStrategy + Send + Sync> {
        match self {
            StrategyKind::Api => Box::new(ApiStrategy::new(CodeStrategy)),
            StrategyKind::Code => Box::new(CodeStrategy),
            StrategyKind::Incompatible => Box::new(IncompatibleStrategy::new(NoOpStrategy)),
            StrategyKind::NoOp => Box::new(NoOpStrategy),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Api => "api",
            StrategyKind::Code => "code",
            StrategyKind::Incompatible => "incompatible",
            StrategyKind::NoOp => "noop",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = JarDiffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| JarDiffError::UnknownStrategy {
                name: s.to_string(),
            })
    }
}
