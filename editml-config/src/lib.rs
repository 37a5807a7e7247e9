//! Shared configuration loader for the EditML toolchain.
//!
//! `defaults/editml.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific settings on top
//! of those defaults via [`Loader`] before deserializing into [`EditmlConfig`].
//!
//! The CLI layers, lowest first: embedded defaults, `.editml.toml` in the working
//! directory, the `--config` file, `EDITML_*` environment variables, then flags.
//! Environment keys use `__` between table and key, e.g.
//! `EDITML_RENDERING__MAX_NESTING_DEPTH=3`.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, Map, ValueKind};
use editml_parser::editml::formats::TreevizOptions;
use editml_parser::{ParseOptions, RenderOptions};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/editml.default.toml");

/// Per-project configuration file, looked up in a project directory.
pub const PROJECT_CONFIG_FILE: &str = ".editml.toml";

/// Prefix of environment variables that override configuration keys.
pub const ENV_PREFIX: &str = "EDITML";

/// Top-level configuration consumed by EditML applications.
#[derive(Debug, Clone, Deserialize)]
pub struct EditmlConfig {
    pub parsing: ParsingConfig,
    pub rendering: RenderingConfig,
    pub debug: DebugConfig,
}

/// Mirrors the parser's [`ParseOptions`].
#[derive(Debug, Clone, Deserialize)]
pub struct ParsingConfig {
    pub strip_debug_comments: bool,
    pub report_discarded_spans: bool,
    pub report_unknown_escapes: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderingConfig {
    pub max_nesting_depth: usize,
    pub format: OutputFormat,
}

/// Controls the `--debug` dump.
#[derive(Debug, Clone, Deserialize)]
pub struct DebugConfig {
    pub show_line_numbers: bool,
    pub preview_chars: usize,
}

/// What the CLI prints on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Clean,
    Markup,
    AstTreeviz,
    AstJson,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Clean,
        OutputFormat::Markup,
        OutputFormat::AstTreeviz,
        OutputFormat::AstJson,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Clean => "clean",
            OutputFormat::Markup => "markup",
            OutputFormat::AstTreeviz => "ast-treeviz",
            OutputFormat::AstJson => "ast-json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl EditmlConfig {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            strip_debug_comments: self.parsing.strip_debug_comments,
            report_discarded_spans: self.parsing.report_discarded_spans,
            report_unknown_escapes: self.parsing.report_unknown_escapes,
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            max_nesting_depth: self.rendering.max_nesting_depth,
            parse: self.parse_options(),
        }
    }

    pub fn treeviz_options(&self) -> TreevizOptions {
        TreevizOptions {
            show_line_numbers: self.debug.show_line_numbers,
            preview_chars: self.debug.preview_chars,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer `.editml.toml` from `dir` when it exists.
    pub fn with_project_file(self, dir: impl AsRef<Path>) -> Self {
        self.with_optional_file(dir.as_ref().join(PROJECT_CONFIG_FILE))
    }

    /// Layer `EDITML_*` variables from the process environment.
    pub fn with_env(self) -> Self {
        self.with_environment(None)
    }

    fn with_environment(mut self, source: Option<Map<String, String>>) -> Self {
        let environment = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(source);
        self.builder = self.builder.add_source(environment);
        self
    }

    /// Apply a single key/value override (useful for CLI flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<EditmlConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<EditmlConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert!(config.parsing.strip_debug_comments);
        assert_eq!(config.rendering.max_nesting_depth, 8);
        assert_eq!(config.rendering.format, OutputFormat::Clean);
        assert!(config.debug.show_line_numbers);
        assert_eq!(config.debug.preview_chars, 50);
    }

    #[test]
    fn defaults_match_parser_defaults() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.parse_options(), ParseOptions::default());
        assert_eq!(config.render_options(), RenderOptions::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("rendering.format", "ast-json")
            .expect("override to apply")
            .set_override("rendering.max_nesting_depth", 2i64)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.rendering.format, OutputFormat::AstJson);
        assert_eq!(config.render_options().max_nesting_depth, 2);
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[parsing]\nstrip_debug_comments = false").expect("write config");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert!(!config.parse_options().strip_debug_comments);
        // Keys the file does not mention keep their defaults.
        assert!(config.parse_options().report_unknown_escapes);
    }

    #[test]
    fn missing_required_file_fails() {
        let result = Loader::new().with_file("/nonexistent/editml.toml").build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/editml.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.rendering.format, OutputFormat::Clean);
    }

    #[test]
    fn rejects_unknown_format() {
        let result = Loader::new()
            .set_override("rendering.format", "html")
            .expect("override to apply")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn layers_project_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(
            dir.path().join(PROJECT_CONFIG_FILE),
            "[rendering]\nformat = \"markup\"\n",
        )
        .expect("write project config");

        let config = Loader::new()
            .with_project_file(dir.path())
            .build()
            .expect("config to build");
        assert_eq!(config.rendering.format, OutputFormat::Markup);
    }

    #[test]
    fn project_file_is_optional() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = Loader::new()
            .with_project_file(dir.path())
            .build()
            .expect("config to build");
        assert_eq!(config.rendering.format, OutputFormat::Clean);
    }

    #[test]
    fn environment_overrides_files() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(
            dir.path().join(PROJECT_CONFIG_FILE),
            "[rendering]\nmax_nesting_depth = 4\n",
        )
        .expect("write project config");
        let vars = Map::from([
            ("EDITML_RENDERING__MAX_NESTING_DEPTH".to_string(), "2".to_string()),
            ("EDITML_PARSING__STRIP_DEBUG_COMMENTS".to_string(), "false".to_string()),
            ("UNRELATED_RENDERING__FORMAT".to_string(), "markup".to_string()),
        ]);

        let config = Loader::new()
            .with_project_file(dir.path())
            .with_environment(Some(vars))
            .build()
            .expect("config to build");
        assert_eq!(config.rendering.max_nesting_depth, 2);
        assert!(!config.parsing.strip_debug_comments);
        assert_eq!(config.rendering.format, OutputFormat::Clean);
    }

    #[test]
    fn flag_overrides_beat_environment() {
        let vars = Map::from([("EDITML_RENDERING__FORMAT".to_string(), "markup".to_string())]);
        let config = Loader::new()
            .with_environment(Some(vars))
            .set_override("rendering.format", "ast-json")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.rendering.format, OutputFormat::AstJson);
    }
}
