use crate::config::WeeklyUpdateConfig;
use crate::error::{GobError, Result};
use crate::github::{Issue, IssueQuery, IssuesClient};
use regex::Regex;
use std::sync::OnceLock;

pub const STATIC_QUESTION: &str = "**How have you been this week?**";
pub const STATIC_ANSWER: &str = "Chillin' 🤙";

pub const QUESTIONS: &[&str] = &[
    "**Your response to the question of the week (QOTW)**",
    "**Do you have any accounts at risk?**",
    "**What other challenges are you working on?**",
    "**What did you learn this week that others should know? Is it worth reduxing?**",
    "**Anything else that's on your mind?**",
    "**Any upcoming time off?**",
    "**Any L&D?**",
];

static QOTW_RE: OnceLock<Regex> = OnceLock::new();

fn qotw_re() -> &'static Regex {
    QOTW_RE.get_or_init(|| Regex::new(r#"(?:QOTW|BONUS QOTW):\s*"([^"]+)""#).unwrap())
}

/// Quoted questions of the week from a meeting issue body, in order.
pub fn questions_of_the_week(body: &str) -> Vec<String> {
    qotw_re()
        .captures_iter(body)
        .map(|c| c[1].to_string())
        .collect()
}

/// Newest issue carrying the team-meeting label.
pub fn latest_issue(client: &IssuesClient, cfg: &WeeklyUpdateConfig) -> Result<Issue> {
    let query = IssueQuery {
        since: Some(cfg.since.clone()),
        labels: Some(cfg.labels.clone()),
        sort: Some("created".into()),
        direction: Some("desc".into()),
    };
    client
        .list_issues(&cfg.owner, &cfg.repo, &query)?
        .into_iter()
        .next()
        .ok_or(GobError::NoIssues)
}

/// Markdown comment body: the static check-in first, then each question
/// followed by its answer.
pub fn compose(answers: &[(String, String)]) -> String {
    let mut lines = vec![STATIC_QUESTION.to_string(), STATIC_ANSWER.to_string()];
    for (question, answer) in answers {
        lines.push(question.clone());
        lines.push(answer.clone());
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_questions() {
        let body = "Agenda\nQOTW: \"Favourite tool?\"\nnotes\nBONUS QOTW: \"Best bug this week?\"\nQOTW: unquoted";
        assert_eq!(
            questions_of_the_week(body),
            vec!["Favourite tool?", "Best bug this week?"]
        );
        assert!(questions_of_the_week("no questions here").is_empty());
    }

    #[test]
    fn compose_puts_static_answer_first() {
        let body = compose(&[(QUESTIONS[1].to_string(), "None".to_string())]);
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(
            lines,
            vec![STATIC_QUESTION, STATIC_ANSWER, QUESTIONS[1], "None"]
        );
    }

    #[test]
    fn latest_issue_takes_first_or_reports_none() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/repos/github/premium-support/issues")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body("[]")
            .create();
        let cfg = WeeklyUpdateConfig {
            api_url: server.url(),
            ..Default::default()
        };
        let client = IssuesClient::new(&cfg.api_url, "t0ken");
        assert!(matches!(
            latest_issue(&client, &cfg),
            Err(GobError::NoIssues)
        ));
    }
}
