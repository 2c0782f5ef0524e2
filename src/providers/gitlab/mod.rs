mod client;
mod resolvers;
mod trace;
mod types;

pub use client::GitLabClient;
pub use types::{Group, Job, Project, ProjectName};
