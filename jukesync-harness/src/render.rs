//! External template renderer invocation.
//!
//! UI tests run against real server-rendered markup. The server exposes a
//! management command that renders a named template into head and body
//! fragments; this module shells out to it and leaves the fragment files
//! behind for [`TestDocument`](crate::TestDocument) to pick up.

use crate::error::{HarnessError, Result};
use std::path::Path;
use std::process::Command;
use tracing::error;

/// File name of the rendered head fragment
pub const HEAD_FRAGMENT: &str = "head.html";

/// File name of the rendered body fragment
pub const BODY_FRAGMENT: &str = "body.html";

/// Handle to the external template rendering command.
///
/// The renderer is invoked with four positional arguments appended after
/// any base arguments: template name, head fragment path, body fragment
/// path, and the JSON-encoded options bag (empty string when no options
/// are given).
pub struct TemplateRenderer {
    program: String,
    args: Vec<String>,
    envs: Vec<(String, String)>,
}

impl TemplateRenderer {
    /// Create a renderer around the given program
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
        }
    }

    /// Add a base argument passed before the positional ones
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Set an environment variable for the renderer process
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Render `template` into `head.html`/`body.html` under `out_dir`.
    ///
    /// A renderer that exits non-zero is reported by logging its stderr,
    /// not by failing: the fixture is best-effort and the calling test
    /// decides what a missing fragment means.
    ///
    /// # Errors
    ///
    /// Returns an error if the renderer process cannot be launched or the
    /// options bag cannot be serialized.
    pub fn render(
        &self,
        template: &str,
        options: Option<&serde_json::Value>,
        out_dir: &Path,
    ) -> Result<()> {
        let options_json = options
            .map(serde_json::to_string)
            .transpose()?
            .unwrap_or_default();

        let head_path = out_dir.join(HEAD_FRAGMENT);
        let body_path = out_dir.join(BODY_FRAGMENT);

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(template)
            .arg(&head_path)
            .arg(&body_path)
            .arg(&options_json)
            .envs(self.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .output()
            .map_err(|source| HarnessError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            error!(
                "Renderer exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr)
            );
        }

        Ok(())
    }
}
