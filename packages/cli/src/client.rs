use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use common::api::{ApiErrorBody, ExecutionRequest, NewTestCaseRequest, RunResponse};
use common::{Problem, Submission, TestCase, TestCases, TestResult};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use workspace_core::api::{JudgeService, ProblemCatalog};
use workspace_core::WorkspaceError;

use crate::config::ServerConfig;

/// HTTP client for the platform API, implementing both workspace ports.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ServerConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "API request");
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, WorkspaceError> {
        let response = builder.send().await.map_err(transport_error)?;
        let response = check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|error| WorkspaceError::Parse(error.to_string()))
    }

    async fn send_no_content(&self, builder: RequestBuilder) -> Result<(), WorkspaceError> {
        let response = builder.send().await.map_err(transport_error)?;
        check_status(response).await?;
        Ok(())
    }
}

/// Map a transport failure, distinguishing timeouts for the message only;
/// both surface as dismissible network errors.
fn transport_error(error: reqwest::Error) -> WorkspaceError {
    if error.is_timeout() {
        WorkspaceError::Network("request timed out".to_string())
    } else {
        WorkspaceError::Network(error.to_string())
    }
}

/// Turn a non-success response into a server error, keeping the server's
/// message verbatim when the body carries one.
async fn check_status(response: Response) -> Result<Response, WorkspaceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.json::<ApiErrorBody>().await.unwrap_or_default();
    Err(WorkspaceError::server(body.code, body.message))
}

#[async_trait]
impl JudgeService for ApiClient {
    async fn run(&self, request: ExecutionRequest) -> Result<Vec<TestResult>, WorkspaceError> {
        let response: RunResponse = self
            .send(self.request(Method::POST, "/submissions/run").json(&request))
            .await?;
        Ok(response.test_results)
    }

    async fn submit(&self, request: ExecutionRequest) -> Result<Submission, WorkspaceError> {
        self.send(self.request(Method::POST, "/submissions").json(&request))
            .await
    }
}

#[async_trait]
impl ProblemCatalog for ApiClient {
    async fn problem(&self, problem_id: i32) -> Result<Problem, WorkspaceError> {
        self.send(self.request(Method::GET, &format!("/problems/{problem_id}")))
            .await
    }

    async fn test_cases(&self, problem_id: i32) -> Result<TestCases, WorkspaceError> {
        let default: Vec<TestCase> = self
            .send(self.request(Method::GET, &format!("/problems/{problem_id}/testcases")))
            .await?;

        // Custom cases require a signed-in user; treat a denial as "none"
        // rather than failing the whole workspace.
        let custom = match self
            .send::<Vec<TestCase>>(self.request(
                Method::GET,
                &format!("/problems/{problem_id}/testcases/custom"),
            ))
            .await
        {
            Ok(cases) => cases,
            Err(WorkspaceError::Server { code, .. }) => {
                debug!(problem_id, ?code, "Custom test cases unavailable");
                Vec::new()
            }
            Err(error) => return Err(error),
        };

        Ok(TestCases { default, custom })
    }

    async fn add_custom_test_case(
        &self,
        problem_id: i32,
        test_case: NewTestCaseRequest,
    ) -> Result<TestCase, WorkspaceError> {
        self.send(
            self.request(
                Method::POST,
                &format!("/problems/{problem_id}/testcases/custom"),
            )
            .json(&test_case),
        )
        .await
    }

    async fn update_test_case(
        &self,
        test_case_id: i32,
        test_case: NewTestCaseRequest,
    ) -> Result<TestCase, WorkspaceError> {
        self.send(
            self.request(Method::PUT, &format!("/testcases/{test_case_id}"))
                .json(&test_case),
        )
        .await
    }

    async fn delete_test_case(&self, test_case_id: i32) -> Result<(), WorkspaceError> {
        self.send_no_content(self.request(Method::DELETE, &format!("/testcases/{test_case_id}")))
            .await
    }
}
