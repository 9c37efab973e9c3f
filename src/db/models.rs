/// Data models
///
/// `ScopeRecord` maps to the `scopes` table. `CommitType` and
/// `ComposedMessage` only live for the length of a composition session.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// A scope remembered for a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ScopeRecord {
    pub project: String,
    pub scope: String,
}

/// Commit types offered at the type prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    Build,
    Ci,
    Docs,
    Feat,
    Fix,
    Perf,
    Refactor,
    Test,
}

impl CommitType {
    pub const ALL: [CommitType; 8] = [
        CommitType::Build,
        CommitType::Ci,
        CommitType::Docs,
        CommitType::Feat,
        CommitType::Fix,
        CommitType::Perf,
        CommitType::Refactor,
        CommitType::Test,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Build => "build",
            CommitType::Ci => "ci",
            CommitType::Docs => "docs",
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Perf => "perf",
            CommitType::Refactor => "refactor",
            CommitType::Test => "test",
        }
    }

    /// Names in completion order
    pub fn candidates() -> Vec<String> {
        Self::ALL.iter().map(|t| t.as_str().to_string()).collect()
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CommitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown commit type: {}", s))
    }
}

/// The three fields of a structured commit header
///
/// `commit_type` is a plain string: the type prompt is advisory and accepts
/// values outside [`CommitType::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposedMessage {
    pub commit_type: String,
    pub scope: String,
    pub summary: String,
}

impl ComposedMessage {
    /// `type(scope): summary` followed by a blank line for the body
    pub fn render(&self) -> String {
        format!("{}({}): {}\n\n", self.commit_type, self.scope, self.summary)
    }

    /// Whether the type is one of the known commit types
    pub fn known_type(&self) -> Option<CommitType> {
        self.commit_type.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let message = ComposedMessage {
            commit_type: "feat".to_string(),
            scope: "parser".to_string(),
            summary: "support nested grammars".to_string(),
        };

        assert_eq!(message.render(), "feat(parser): support nested grammars\n\n");
    }

    #[test]
    fn test_render_keeps_unknown_type() {
        let message = ComposedMessage {
            commit_type: "chore".to_string(),
            scope: "deps".to_string(),
            summary: "bump sqlx".to_string(),
        };

        assert_eq!(message.render(), "chore(deps): bump sqlx\n\n");
        assert!(message.known_type().is_none());
    }

    #[test]
    fn test_commit_type_candidates() {
        let names = CommitType::candidates();
        assert_eq!(
            names,
            vec!["build", "ci", "docs", "feat", "fix", "perf", "refactor", "test"]
        );
    }

    #[test]
    fn test_commit_type_parse() {
        assert_eq!("perf".parse::<CommitType>().unwrap(), CommitType::Perf);
        assert_eq!(CommitType::Refactor.to_string(), "refactor");
        assert!("Feat".parse::<CommitType>().is_err());
    }
}
