use crate::template::Syntax;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// What happens to a placeholder with no value in the mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum UnresolvedPolicy {
    /// Leave the marker in place and report the name.
    #[default]
    Keep,
    /// Substitute nothing and report the name.
    Empty,
    /// Fail the whole render.
    Fail,
}

impl std::fmt::Display for UnresolvedPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UnresolvedPolicy::Keep => "keep",
            UnresolvedPolicy::Empty => "empty",
            UnresolvedPolicy::Fail => "fail",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub syntax: Syntax,
    pub policy: UnresolvedPolicy,
    /// Warn about mapping entries the template never uses.
    pub strict: bool,
}

impl RenderOptions {
    pub fn with_policy(mut self, policy: UnresolvedPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_syntax(mut self, syntax: Syntax) -> Self {
        self.syntax = syntax;
        self
    }
}
