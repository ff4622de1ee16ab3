use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::ProjectSource;
use crate::error::{BoardError, Result};
use crate::model::raw::{ProjectNode, ProjectRef};

pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/graphql";
pub const PROJECTS_NEXT_FEATURE: &str = "projects_next_graphql";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: String,
    pub token: String,
    /// Value of the `GraphQL-Features` opt-in header.
    pub features: String,
}

impl ClientConfig {
    pub fn new(token: String) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token,
            features: PROJECTS_NEXT_FEATURE.to_string(),
        }
    }
}

/// HTTP client with the User-Agent GitHub insists on.
pub fn http_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .user_agent(concat!("ghboard/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

pub struct GitHubClient {
    config: ClientConfig,
    client: reqwest::Client,
}

impl GitHubClient {
    pub fn with_http_client(config: ClientConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    async fn run_query<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T> {
        let body = serde_json::json!({ "query": query, "variables": variables });
        let resp = self
            .client
            .post(&self.config.endpoint)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .header("Authorization", format!("token {}", self.config.token))
            .header("GraphQL-Features", &self.config.features)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            return Err(BoardError::Request {
                status: status.as_u16(),
                query: query.to_string(),
            });
        }

        let gql: GqlResponse<T> = resp.json().await?;
        for error in &gql.errors {
            log::warn!("GitHub GraphQL error: {}", error.message);
        }
        gql.data.ok_or_else(|| {
            let messages: Vec<&str> = gql.errors.iter().map(|e| e.message.as_str()).collect();
            if messages.is_empty() {
                BoardError::MissingData("data")
            } else {
                BoardError::GraphQl(messages.join("; "))
            }
        })
    }
}

const PROJECT_QUERY: &str = r#"query($login: String!, $number: Int!) {
  user(login: $login) {
    projectNext(number: $number) {
      id
      title
    }
  }
}"#;

const ITEMS_QUERY: &str = r#"query($id: ID!) {
  node(id: $id) {
    ... on ProjectNext {
      title
      url
      items(first: 100) {
        nodes {
          title
          id
          fieldValues(first: 100) {
            nodes {
              createdAt
              creator { login }
              databaseId
              id
              projectField { name settings }
              value
            }
          }
        }
      }
    }
  }
}"#;

#[derive(Deserialize)]
struct GqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GqlError>,
}

#[derive(Deserialize)]
struct GqlError {
    message: String,
}

#[derive(Deserialize)]
struct UserData {
    user: Option<User>,
}

#[derive(Deserialize)]
struct User {
    #[serde(rename = "projectNext")]
    project_next: Option<ProjectRef>,
}

#[derive(Deserialize)]
struct NodeData {
    node: Option<ProjectNode>,
}

#[async_trait]
impl ProjectSource for GitHubClient {
    fn name(&self) -> &str {
        "GitHub"
    }

    async fn resolve_project(&self, login: &str, number: u32) -> Result<ProjectRef> {
        log::debug!("Resolving project #{number} of {login}");
        let data: UserData = self
            .run_query(
                PROJECT_QUERY,
                serde_json::json!({ "login": login, "number": number }),
            )
            .await?;

        data.user
            .and_then(|u| u.project_next)
            .ok_or_else(|| BoardError::ProjectNotFound {
                login: login.to_string(),
                number,
            })
    }

    async fn fetch_items(&self, project_id: &str) -> Result<ProjectNode> {
        log::debug!("Fetching items of project {project_id}");
        let data: NodeData = self
            .run_query(ITEMS_QUERY, serde_json::json!({ "id": project_id }))
            .await?;
        data.node.ok_or(BoardError::MissingData("node"))
    }
}
