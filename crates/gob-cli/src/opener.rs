use std::path::Path;
use std::process::Command;

/// Open `path` in the configured editor, `$EDITOR`, or the platform opener.
/// Best effort: failures are logged, never returned.
pub fn open_path(path: &Path, editor: Option<&str>) {
    let editor = editor
        .map(str::to_string)
        .or_else(|| std::env::var("EDITOR").ok())
        .filter(|e| !e.trim().is_empty());

    match editor {
        Some(editor) => {
            let mut parts = editor.split_whitespace();
            let Some(program) = parts.next() else {
                return;
            };
            tracing::debug!(%editor, path = %path.display(), "launching editor");
            match Command::new(program).args(parts).arg(path).status() {
                Ok(status) if !status.success() => {
                    tracing::warn!(%editor, %status, "editor exited with failure");
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(%editor, error = %e, "could not launch editor"),
            }
        }
        None => {
            if let Err(e) = open::that(path) {
                tracing::warn!(path = %path.display(), error = %e, "could not open path");
            }
        }
    }
}
