use serde::{Deserialize, Serialize};

/// A GitLab group (namespace) visible to the scanning token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: u64,
    pub name: String,
}

/// A GitLab project whose job traces get archived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
}

/// A CI job in a terminal state (success, failed or canceled).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: u64,
}

/// Outcome of looking up a project's display name by id.
///
/// The placeholder variant already holds the substituted `"Project {id}"`
/// name, so callers never have to decide on a fallback themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectName {
    Resolved(String),
    Placeholder(String),
}

impl ProjectName {
    pub fn placeholder(project_id: u64) -> Self {
        Self::Placeholder(format!("Project {project_id}"))
    }

    pub fn into_project(self, project_id: u64) -> Project {
        let name = match self {
            Self::Resolved(name) | Self::Placeholder(name) => name,
        };
        Project {
            id: project_id,
            name,
        }
    }
}
