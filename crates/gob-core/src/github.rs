//! Minimal GitHub issues client: list a repository's issues, comment on one.

use crate::error::{GobError, Result};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};

const USER_AGENT: &str = concat!("gob/", env!("CARGO_PKG_VERSION"));
const API_VERSION: &str = "2022-11-28";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    pub html_url: String,
    pub comments_url: String,
}

/// Query parameters for listing issues.
#[derive(Debug, Clone, Default)]
pub struct IssueQuery {
    pub since: Option<String>,
    pub labels: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
}

impl IssueQuery {
    fn pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("since", self.since.as_deref()),
            ("labels", self.labels.as_deref()),
            ("sort", self.sort.as_deref()),
            ("direction", self.direction.as_deref()),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k, v)))
        .collect()
    }
}

pub struct IssuesClient {
    http: Client,
    api_url: String,
    token: String,
}

impl IssuesClient {
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Token comes from `GITHUB_TOKEN`.
    pub fn from_env(api_url: impl Into<String>) -> Result<Self> {
        let token = std::env::var("GITHUB_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or(GobError::MissingToken)?;
        Ok(Self::new(api_url, token))
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("Accept", "application/vnd.github+json")
            .header("Authorization", format!("Bearer {}", self.token))
            .header("X-GitHub-Api-Version", API_VERSION)
            .header("User-Agent", USER_AGENT)
    }

    fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GobError::GitHub {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    pub fn list_issues(&self, owner: &str, repo: &str, query: &IssueQuery) -> Result<Vec<Issue>> {
        let url = format!("{}/repos/{owner}/{repo}/issues", self.api_url);
        tracing::debug!(%url, "listing issues");
        let response = self
            .authorized(self.http.get(&url))
            .query(&query.pairs())
            .send()?;
        Ok(Self::check(response)?.json()?)
    }

    pub fn post_comment(&self, comments_url: &str, body: &str) -> Result<()> {
        tracing::debug!(url = comments_url, "posting comment");
        let response = self
            .authorized(self.http.post(comments_url))
            .json(&serde_json::json!({ "body": body }))
            .send()?;
        Self::check(response)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn issue_json(number: u64, server: &str) -> serde_json::Value {
        serde_json::json!({
            "number": number,
            "title": format!("Team meeting {number}"),
            "body": "QOTW: \"What did you ship?\"",
            "html_url": format!("https://github.com/github/premium-support/issues/{number}"),
            "comments_url": format!("{server}/repos/github/premium-support/issues/{number}/comments"),
        })
    }

    #[test]
    fn list_issues_sends_query_and_auth() {
        let mut server = mockito::Server::new();
        let body = serde_json::json!([issue_json(42, &server.url()), issue_json(41, &server.url())]);
        let mock = server
            .mock("GET", "/repos/github/premium-support/issues")
            .match_header("authorization", "Bearer t0ken")
            .match_header("x-github-api-version", API_VERSION)
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("labels".into(), "team-meeting".into()),
                Matcher::UrlEncoded("direction".into(), "desc".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create();

        let client = IssuesClient::new(server.url(), "t0ken");
        let query = IssueQuery {
            labels: Some("team-meeting".into()),
            direction: Some("desc".into()),
            ..Default::default()
        };
        let issues = client
            .list_issues("github", "premium-support", &query)
            .unwrap();

        mock.assert();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].number, 42);
        assert!(issues[0].body.as_deref().unwrap().contains("QOTW"));
    }

    #[test]
    fn error_status_is_reported() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/repos/github/premium-support/issues")
            .with_status(401)
            .with_body("Bad credentials")
            .create();

        let client = IssuesClient::new(server.url(), "bad");
        let err = client
            .list_issues("github", "premium-support", &IssueQuery::default())
            .unwrap_err();
        assert!(matches!(err, GobError::GitHub { status: 401, ref body } if body == "Bad credentials"));
    }

    #[test]
    fn post_comment_sends_body() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/repos/github/premium-support/issues/42/comments")
            .match_body(Matcher::Json(serde_json::json!({ "body": "hello" })))
            .with_status(201)
            .with_body("{}")
            .create();

        let client = IssuesClient::new(server.url(), "t0ken");
        let url = format!("{}/repos/github/premium-support/issues/42/comments", server.url());
        client.post_comment(&url, "hello").unwrap();
        mock.assert();
    }
}
