use std::fmt;

use log::{info, warn};

use crate::archive::{ArchiveReport, TraceArchiver};
use crate::error::Result;
use crate::output::PhaseSpinner;
use crate::providers::gitlab::{GitLabClient, Group, Project};

/// Which traversal decides the set of projects to archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanMode {
    /// Every group visible to the token, then all of their projects.
    Full,
    /// Projects of the given groups only.
    Groups(Vec<u64>),
    /// The given projects, without any group traversal.
    Projects(Vec<u64>),
}

impl ScanMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Groups(_) => "groups",
            Self::Projects(_) => "projects",
        }
    }
}

#[derive(Debug)]
pub enum ScanOutcome {
    /// Listing succeeded but returned nothing to archive (`"groups"` or `"projects"`).
    NothingFound(&'static str),
    Completed(ArchiveReport),
}

/// Drives one scan run: resolves the project set for a [`ScanMode`] and
/// hands it to the [`TraceArchiver`].
///
/// Listing failures abort the run; per-job failures are absorbed by the
/// archiver and show up in the report.
pub struct Scanner {
    client: GitLabClient,
    archiver: TraceArchiver,
}

impl Scanner {
    pub fn new(client: GitLabClient, archiver: TraceArchiver) -> Self {
        Self { client, archiver }
    }

    pub async fn run(&self, mode: &ScanMode) -> Result<ScanOutcome> {
        info!("Starting {} scan against {}", mode.name(), self.client.api_url());

        let projects = match mode {
            ScanMode::Full => match discover_all_projects(&self.client).await? {
                Discovery::Projects(projects) => projects,
                Discovery::NoGroups => return Ok(ScanOutcome::NothingFound("groups")),
            },
            ScanMode::Groups(group_ids) => {
                let targets: Vec<GroupTarget> =
                    group_ids.iter().copied().map(GroupTarget::from).collect();
                projects_for_groups(&self.client, &targets).await?
            }
            ScanMode::Projects(project_ids) => {
                return self.archive_project_ids(project_ids).await;
            }
        };

        if projects.is_empty() {
            return Ok(ScanOutcome::NothingFound("projects"));
        }

        let report = self.archiver.archive(&self.client, &projects).await?;
        Ok(ScanOutcome::Completed(report))
    }

    /// Projects mode: ids are known up front, so each one is named and
    /// archived in turn.
    async fn archive_project_ids(&self, project_ids: &[u64]) -> Result<ScanOutcome> {
        self.archiver.prepare().await?;
        info!("Starting to fetch job traces for {} projects", project_ids.len());

        let mut report = ArchiveReport::start();
        for &project_id in project_ids {
            let project = self
                .client
                .project_name(project_id)
                .await
                .into_project(project_id);
            report
                .projects
                .push(self.archiver.archive_project(&self.client, &project).await?);
        }

        Ok(ScanOutcome::Completed(report.finish()))
    }
}

/// A group whose projects get listed. Full scans know the group's name;
/// explicit group ids do not.
#[derive(Debug, Clone, PartialEq, Eq)]
struct GroupTarget {
    id: u64,
    name: Option<String>,
}

impl From<u64> for GroupTarget {
    fn from(id: u64) -> Self {
        Self { id, name: None }
    }
}

impl From<&Group> for GroupTarget {
    fn from(group: &Group) -> Self {
        Self {
            id: group.id,
            name: Some(group.name.clone()),
        }
    }
}

impl fmt::Display for GroupTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "group '{name}' ({})", self.id),
            None => write!(f, "group {}", self.id),
        }
    }
}

enum Discovery {
    NoGroups,
    Projects(Vec<Project>),
}

async fn discover_all_projects(client: &GitLabClient) -> Result<Discovery> {
    let spinner = PhaseSpinner::start("Fetching groups");
    let groups = match client.list_groups().await {
        Ok(groups) => groups,
        Err(e) => {
            spinner.abandon();
            return Err(e);
        }
    };
    spinner.finish(&format!("Fetched {} groups", groups.len()));

    if groups.is_empty() {
        warn!("No groups found");
        return Ok(Discovery::NoGroups);
    }

    let targets: Vec<GroupTarget> = groups.iter().map(GroupTarget::from).collect();
    let projects = projects_for_groups(client, &targets).await?;
    Ok(Discovery::Projects(projects))
}

/// Concatenates the projects of each group, in group order. A project
/// reachable through several groups appears once per group.
async fn projects_for_groups(
    client: &GitLabClient,
    groups: &[GroupTarget],
) -> Result<Vec<Project>> {
    let spinner = PhaseSpinner::start("Fetching projects");
    let mut projects = Vec::new();

    for group in groups {
        match client.list_group_projects(group.id).await {
            Ok(group_projects) => {
                info!("Found {} projects in {group}", group_projects.len());
                projects.extend(group_projects);
            }
            Err(e) => {
                spinner.abandon();
                return Err(e);
            }
        }
    }

    spinner.finish(&format!(
        "Fetched {} projects across {} groups",
        projects.len(),
        groups.len()
    ));
    if projects.is_empty() {
        warn!("No projects found");
    }

    Ok(projects)
}
