pub mod github;

use std::path::Path;

use async_trait::async_trait;

use crate::config::{self, BoardTarget};
use crate::error::Result;
use crate::model::project::Project;
use crate::model::raw::{ProjectNode, ProjectRef};
use crate::model::record::ProjectSnapshot;

use github::{ClientConfig, GitHubClient};

/// Where project boards come from.
#[async_trait]
pub trait ProjectSource: Send + Sync {
    fn name(&self) -> &str;
    async fn resolve_project(&self, login: &str, number: u32) -> Result<ProjectRef>;
    async fn fetch_items(&self, project_id: &str) -> Result<ProjectNode>;
}


/// Resolves the project, fetches its items and flattens them.
pub async fn load_project(
    source: &dyn ProjectSource,
    login: &str,
    number: u32,
    created_field: &str,
) -> Result<Project> {
    let project_ref = source.resolve_project(login, number).await?;
    log::info!(
        "{}: project #{number} of {login} is {} ({})",
        source.name(),
        project_ref.title,
        project_ref.id
    );

    let node = source.fetch_items(&project_ref.id).await?;
    let project = Project::from_node(node, created_field)?;
    log::info!("Loaded {} items from {}", project.items().len(), project.details().title);
    Ok(project)
}

pub fn create_source(target: &BoardTarget, http: reqwest::Client) -> Result<GitHubClient> {
    let token = config::read_token(&target.token_file)?;
    let config = ClientConfig {
        endpoint: target.endpoint.clone(),
        features: target.features.clone(),
        ..ClientConfig::new(token)
    };
    Ok(GitHubClient::with_http_client(config, http))
}

pub async fn open_project(target: &BoardTarget) -> Result<Project> {
    open_project_with(target, github::http_client()?).await
}

pub async fn open_project_with(target: &BoardTarget, http: reqwest::Client) -> Result<Project> {
    let source = create_source(target, http)?;
    load_project(
        &source,
        &target.username,
        target.project_number,
        &target.created_field,
    )
    .await
}

pub async fn fetch_project_snapshot(target: &BoardTarget) -> Result<ProjectSnapshot> {
    Ok(open_project(target).await?.into_snapshot())
}

/// Latest state of a board on github.com: its details and one flat record per item.
///
/// The CLI and board view go through [`fetch_project_snapshot`] so config can
/// point them at another endpoint.
#[allow(dead_code)]
pub async fn fetch_latest_project_items(
    token_path: &Path,
    username: &str,
    project_number: u32,
) -> Result<ProjectSnapshot> {
    let target = BoardTarget::with_defaults(
        token_path.to_path_buf(),
        username.to_string(),
        project_number,
    );
    fetch_project_snapshot(&target).await
}
