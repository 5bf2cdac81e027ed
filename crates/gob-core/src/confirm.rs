//! Yes/no decisions for destructive operations.
//!
//! The lifecycle never reads the terminal itself. Callers hand in something
//! that implements [`Confirm`]: the CLI passes a stdin prompt, tests pass a
//! closure with a fixed answer.

use crate::error::Result;

pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Ok(self(prompt))
    }
}

/// Outcome of an operation gated on confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Done,
    Cancelled,
}

impl Decision {
    pub fn is_done(self) -> bool {
        self == Decision::Done
    }
}

/// Ask `confirm`, run `action` only on yes.
pub(crate) fn gated<C, F>(confirm: &mut C, prompt: &str, action: F) -> Result<Decision>
where
    C: Confirm + ?Sized,
    F: FnOnce() -> Result<()>,
{
    if !confirm.confirm(prompt)? {
        tracing::info!(prompt, "declined");
        return Ok(Decision::Cancelled);
    }
    action()?;
    Ok(Decision::Done)
}
