//! `MiniJinja` environment holding the stubs

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use minijinja::{AutoEscape, Environment};
use serde_json::Value;

use super::stubs;

/// Renders named stubs against a JSON context
#[derive(Debug)]
pub struct StubRenderer {
    env: Environment<'static>,
}

impl StubRenderer {
    /// Renderer with only the built-in stubs
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in stub fails to compile.
    pub fn new() -> Result<Self> {
        Self::with_overrides(None)
    }

    /// Renderer where `<name>.stub` files in `stubs_dir` replace built-ins
    ///
    /// Missing override files are not an error; the built-in stub is used.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be read or a stub fails to
    /// compile.
    pub fn with_overrides(stubs_dir: Option<&Path>) -> Result<Self> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);

        for &(name, source) in stubs::BUILTIN {
            let override_path = stubs_dir
                .map(|dir| dir.join(format!("{name}.stub")))
                .filter(|path| path.is_file());

            if let Some(path) = override_path {
                let custom = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read stub {}", path.display()))?;
                tracing::debug!(stub = name, path = %path.display(), "using stub override");
                env.add_template_owned(name.to_string(), custom)
                    .with_context(|| format!("Invalid stub {}", path.display()))?;
            } else {
                env.add_template(name, source)
                    .with_context(|| format!("Invalid built-in stub '{name}'"))?;
            }
        }

        Ok(Self { env })
    }

    /// Render the stub called `name`
    ///
    /// # Errors
    ///
    /// Returns an error if the stub does not exist or rendering fails.
    pub fn render(&self, name: &str, context: &Value) -> Result<String> {
        let template = self
            .env
            .get_template(name)
            .with_context(|| format!("Unknown stub '{name}'"))?;
        template
            .render(context)
            .with_context(|| format!("Failed to render stub '{name}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_stubs_compile() {
        let renderer = StubRenderer::new().unwrap();
        for (name, _) in stubs::BUILTIN {
            assert!(renderer.env.get_template(name).is_ok(), "{name} missing");
        }
    }

    #[test]
    fn test_override_replaces_builtin() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("seeder.stub"), "seed {{ model }}\n").unwrap();

        let renderer = StubRenderer::with_overrides(Some(dir.path())).unwrap();
        let rendered = renderer.render("seeder", &json!({ "model": "Post" })).unwrap();
        assert_eq!(rendered, "seed Post\n");
    }

    #[test]
    fn test_no_html_escaping() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("routes.stub"), "{{ value }}").unwrap();

        let renderer = StubRenderer::with_overrides(Some(dir.path())).unwrap();
        let rendered = renderer.render("routes", &json!({ "value": "<a & 'b'>" })).unwrap();
        assert_eq!(rendered, "<a & 'b'>");
    }

    #[test]
    fn test_unknown_stub() {
        let renderer = StubRenderer::new().unwrap();
        assert!(renderer.render("policy", &json!({})).is_err());
    }
}
