use log::{debug, info, warn};
use serde::Deserialize;

use super::client::GitLabClient;
use super::types::{Group, Job, Project, ProjectName};
use crate::error::Result;

/// GitLab's `Guest` role, the lowest access tier included in listings.
const MIN_ACCESS_LEVEL_GUEST: &str = "10";

/// Terminal job states; queued and running jobs have no final trace yet.
const FINISHED_JOB_SCOPES: [&str; 3] = ["success", "failed", "canceled"];

fn access_params() -> Vec<(&'static str, String)> {
    vec![
        ("all_available", "true".to_string()),
        ("min_access_level", MIN_ACCESS_LEVEL_GUEST.to_string()),
        ("include_subgroups", "true".to_string()),
    ]
}

#[derive(Deserialize)]
struct ProjectLookup {
    name: Option<String>,
}

impl GitLabClient {
    /// Lists every group the token can see with at least guest access.
    pub async fn list_groups(&self) -> Result<Vec<Group>> {
        let groups: Vec<Group> = self.fetch_paginated("groups", &access_params()).await?;
        info!("Fetched {} groups", groups.len());
        Ok(groups)
    }

    /// Lists the projects of one group.
    ///
    /// `include_subgroups` is sent for parity with the group listing even
    /// though the projects endpoint ignores it.
    pub async fn list_group_projects(&self, group_id: u64) -> Result<Vec<Project>> {
        let projects: Vec<Project> = self
            .fetch_paginated(&format!("groups/{group_id}/projects"), &access_params())
            .await?;
        debug!("Fetched {} projects for group {group_id}", projects.len());
        Ok(projects)
    }

    /// Looks up a project's display name.
    ///
    /// Never fails: any lookup problem yields [`ProjectName::Placeholder`].
    pub async fn project_name(&self, project_id: u64) -> ProjectName {
        match self
            .get_json::<ProjectLookup>(&format!("projects/{project_id}"))
            .await
        {
            Ok(ProjectLookup { name: Some(name) }) => ProjectName::Resolved(name),
            Ok(ProjectLookup { name: None }) => {
                warn!("Project {project_id} has no name, using placeholder");
                ProjectName::placeholder(project_id)
            }
            Err(e) => {
                warn!("Could not fetch name for project {project_id}: {e}");
                ProjectName::placeholder(project_id)
            }
        }
    }

    /// Lists a project's finished jobs.
    pub async fn list_jobs(&self, project_id: u64) -> Result<Vec<Job>> {
        let params: Vec<(&str, String)> = FINISHED_JOB_SCOPES
            .iter()
            .map(|scope| ("scope[]", (*scope).to_string()))
            .collect();

        let jobs: Vec<Job> = self
            .fetch_paginated(&format!("projects/{project_id}/jobs"), &params)
            .await?;
        info!("Fetched {} jobs for project {project_id}", jobs.len());
        Ok(jobs)
    }
}
