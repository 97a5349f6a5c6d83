//! Template rendering and merging into the virtual tree.
//!
//! Templates are plain text with `{{name}}` placeholders substituted from a
//! flat key/value record — no control flow. Rendered files mount under a
//! caller-chosen root so one template set can serve multiple projects.

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::error::TreeError;
use crate::tree::Tree;

/// Flat key/value record substituted into template bodies.
pub type TemplateVars = BTreeMap<String, String>;

/// One named template file, with a path relative to the mount point.
#[derive(Debug, Clone)]
pub struct TemplateFile {
    path: Utf8PathBuf,
    body: String,
}

impl TemplateFile {
    /// Creates a template file from a mount-relative path and body text.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>, body: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            body: body.into(),
        }
    }

    /// Returns the mount-relative path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns the unrendered body text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Substitutes `{{name}}` placeholders in `body` from `vars`.
///
/// Unknown placeholders are left verbatim so a missing key is visible in the
/// output rather than silently erased.
#[must_use]
pub fn render(body: &str, vars: &TemplateVars) -> String {
    let mut output = String::with_capacity(body.len());
    let mut rest = body;
    while let Some(open) = rest.find("{{") {
        let Some(head) = rest.get(..open) else { break };
        output.push_str(head);
        let Some(after_open) = rest.get(open.saturating_add(2)..) else {
            rest = "";
            break;
        };
        match after_open.find("}}") {
            Some(close) => {
                let name = after_open.get(..close).unwrap_or_default();
                match vars.get(name.trim()) {
                    Some(value) => output.push_str(value),
                    None => {
                        output.push_str("{{");
                        output.push_str(name);
                        output.push_str("}}");
                    }
                }
                rest = after_open.get(close.saturating_add(2)..).unwrap_or_default();
            }
            None => {
                // Unterminated placeholder: keep the literal text.
                output.push_str("{{");
                rest = after_open;
            }
        }
    }
    output.push_str(rest);
    output
}

impl Tree {
    /// Renders `files` against `vars` and creates them under `mount`.
    ///
    /// # Errors
    ///
    /// Fails with [`TreeError::PathOccupied`] when a rendered path collides
    /// with an existing file. Files created before the collision remain in
    /// the tree; callers needing atomicity snapshot externally.
    pub fn merge_template(
        &mut self,
        mount: impl AsRef<Utf8Path>,
        files: &[TemplateFile],
        vars: &TemplateVars,
    ) -> Result<(), TreeError> {
        let mount = mount.as_ref();
        debug!(mount = %mount, files = files.len(), "merging rendered templates");
        for file in files {
            let target = mount.join(file.path());
            self.create(target, render(file.body(), vars))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{TemplateFile, TemplateVars, render};
    use crate::error::TreeError;
    use crate::tree::Tree;

    fn vars(pairs: &[(&str, &str)]) -> TemplateVars {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[rstest]
    #[case("no placeholders", "no placeholders")]
    #[case("name: {{project}}", "name: demo")]
    #[case("{{project}}/{{project}}", "demo/demo")]
    #[case("{{ project }}", "demo")]
    #[case("{{missing}} stays", "{{missing}} stays")]
    #[case("dangling {{open", "dangling {{open")]
    fn render_substitutes_flat_variables(#[case] body: &str, #[case] expected: &str) {
        let vars = vars(&[("project", "demo")]);
        assert_eq!(render(body, &vars), expected);
    }

    #[test]
    fn merge_creates_rendered_files_under_mount() {
        let mut tree = Tree::new();
        let files = vec![
            TemplateFile::new("manifest.json", "{\"name\": \"{{project}}\"}"),
            TemplateFile::new("assets/icon.txt", "icon for {{project}}"),
        ];
        tree.merge_template("apps/demo", &files, &vars(&[("project", "demo")]))
            .expect("merge");

        assert_eq!(
            tree.read("apps/demo/manifest.json"),
            Some("{\"name\": \"demo\"}")
        );
        assert_eq!(tree.read("apps/demo/assets/icon.txt"), Some("icon for demo"));
    }

    #[test]
    fn merge_rejects_colliding_paths() {
        let mut tree = Tree::from_files([("apps/demo/manifest.json", "existing")]);
        let files = vec![TemplateFile::new("manifest.json", "new")];
        let result = tree.merge_template("apps/demo", &files, &TemplateVars::new());
        assert!(matches!(result, Err(TreeError::PathOccupied { .. })));
        assert_eq!(tree.read("apps/demo/manifest.json"), Some("existing"));
    }
}
