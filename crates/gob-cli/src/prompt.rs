use gob_core::confirm::Confirm;
use std::io::{BufRead, Write};

/// Confirmation read from the terminal. Prompts go to stderr so `--json`
/// output on stdout stays parseable. End of input counts as "no".
pub struct TerminalPrompt {
    assume_yes: bool,
}

impl TerminalPrompt {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Confirm for TerminalPrompt {
    fn confirm(&mut self, prompt: &str) -> gob_core::Result<bool> {
        if self.assume_yes {
            tracing::debug!(prompt, "confirmed by --yes");
            return Ok(true);
        }
        eprint!("{prompt} [y/N]: ");
        std::io::stderr().flush()?;

        let mut input = String::new();
        if std::io::stdin().lock().read_line(&mut input)? == 0 {
            return Ok(false);
        }
        let answer = input.trim().to_ascii_lowercase();
        Ok(matches!(answer.as_str(), "y" | "yes"))
    }
}

/// Free-form answer to a question, read from stdin.
pub fn ask(question: &str) -> anyhow::Result<String> {
    eprint!("❓ {question}: ");
    std::io::stderr().flush()?;
    let mut input = String::new();
    std::io::stdin().lock().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}
