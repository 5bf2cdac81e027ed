use crate::output::{print_json, success};
use crate::prompt;
use anyhow::Context;
use clap::Subcommand;
use gob_core::{config::Config, github::IssuesClient, weekly};
use std::path::Path;

#[derive(Subcommand)]
pub enum WuSubcommand {
    /// Open the latest team-meeting issue in the browser
    Get,
    /// Answer the weekly questions and post them as a comment
    Post,
}

pub fn run(root: &Path, subcmd: WuSubcommand, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let client = IssuesClient::from_env(&config.weekly_update.api_url)?;
    let issue = weekly::latest_issue(&client, &config.weekly_update)
        .context("failed to fetch the latest team-meeting issue")?;

    match subcmd {
        WuSubcommand::Get => {
            if json {
                return print_json(&issue);
            }
            println!("#{} {}", issue.number, issue.title);
            if let Err(e) = open::that(&issue.html_url) {
                tracing::warn!(url = %issue.html_url, error = %e, "could not open browser");
                println!("{}", issue.html_url);
            }
            Ok(())
        }
        WuSubcommand::Post => post(&client, &issue, json),
    }
}

fn post(client: &IssuesClient, issue: &gob_core::github::Issue, json: bool) -> anyhow::Result<()> {
    let body = issue.body.as_deref().unwrap_or_default();
    for question in weekly::questions_of_the_week(body) {
        eprintln!("📆 {question}");
    }

    let mut answers = Vec::with_capacity(weekly::QUESTIONS.len());
    for question in weekly::QUESTIONS {
        let answer = prompt::ask(question.trim_matches('*'))?;
        answers.push((question.to_string(), answer));
    }

    let comment = weekly::compose(&answers);
    client
        .post_comment(&issue.comments_url, &comment)
        .context("failed to post weekly update")?;

    if json {
        print_json(&serde_json::json!({ "issue": issue.number, "posted": true }))?;
    } else {
        success(&format!("Weekly update posted to #{}.", issue.number));
    }
    Ok(())
}
