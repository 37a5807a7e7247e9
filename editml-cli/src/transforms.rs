//! CLI-specific transforms
//!
//! Every output format runs the same parse step. Only `clean` goes on to resolve
//! structure, which is the one step that can refuse to produce output. The other
//! formats dump the parsed nodes through the parser's [`FormatRegistry`].

use editml_config::{EditmlConfig, OutputFormat};
use editml_parser::editml::ast::{has_errors, Document, Issue};
use editml_parser::editml::formats::{to_treeviz_str_with, FormatRegistry};
use editml_parser::{parse_with, render_clean_view_with};

const CLEAN_DESCRIPTION: &str = "Edits resolved: additions kept, deletions dropped, moves placed";

/// All available output formats with their descriptions, `clean` first.
pub fn available_formats() -> Vec<(String, String)> {
    let registry = FormatRegistry::with_defaults();
    let mut formats = vec![("clean".to_string(), CLEAN_DESCRIPTION.to_string())];
    for name in registry.list_formats() {
        let description = registry
            .get(&name)
            .map(|formatter| formatter.description().to_string())
            .unwrap_or_default();
        formats.push((name, description));
    }
    formats
}

/// Result of running one input through the pipeline.
#[derive(Debug)]
pub struct Transformed {
    pub nodes: Document,
    /// `None` when a structural conflict stopped rendering.
    pub output: Option<String>,
    pub parse_issues: Vec<Issue>,
    pub render_issues: Vec<Issue>,
}

impl Transformed {
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.parse_issues.iter().chain(self.render_issues.iter())
    }

    /// True when the run should exit with a failure status.
    pub fn failed(&self) -> bool {
        self.output.is_none() || has_errors(&self.parse_issues) || has_errors(&self.render_issues)
    }
}

/// Execute the configured format on `source`
pub fn execute(source: &str, config: &EditmlConfig) -> Result<Transformed, String> {
    let (nodes, parse_issues) = parse_with(source, &config.parse_options());
    let mut render_issues = Vec::new();

    let output = match config.rendering.format {
        OutputFormat::Clean => match render_clean_view_with(&nodes, &config.render_options()) {
            Ok(rendered) => {
                render_issues = rendered.issues;
                Some(rendered.text)
            }
            Err(conflict) => {
                render_issues.push(conflict.to_issue());
                None
            }
        },
        dump => Some(
            FormatRegistry::with_defaults()
                .serialize(&nodes, dump.name())
                .map_err(|e| e.to_string())?,
        ),
    };

    Ok(Transformed {
        nodes,
        output,
        parse_issues,
        render_issues,
    })
}

/// The `--debug` dump: numbered input, parsed nodes, then both issue lists.
pub fn debug_dump(source: &str, transformed: &Transformed, config: &EditmlConfig) -> String {
    let mut out = String::from("=== input ===\n");
    for (index, line) in source.lines().enumerate() {
        out.push_str(&format!("{:>4} | {}\n", index + 1, line));
    }

    out.push_str("=== nodes ===\n");
    out.push_str(&to_treeviz_str_with(
        &transformed.nodes,
        &config.treeviz_options(),
    ));

    for (title, issues) in [
        ("parse issues", &transformed.parse_issues),
        ("render issues", &transformed.render_issues),
    ] {
        out.push_str(&format!("=== {} ({}) ===\n", title, issues.len()));
        for issue in issues {
            out.push_str(&format!("{}\n", issue));
        }
    }
    out
}
