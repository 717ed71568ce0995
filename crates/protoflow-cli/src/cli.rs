//! Command-line interface for the protoflow editor
//!
//! Each invocation is one editing interaction: the session is loaded from the
//! configuration file (or created from the default protocol when the file does
//! not exist), one command is applied, and mutated state is written back.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::listing::format_listing;
use protoflow::core::logging::{init_logging, LOG_FORMAT_ENV, LOG_LEVEL_ENV};
use protoflow::diagram::{export_pretty, Session, DEFAULT_EXPORT_FILENAME};
use protoflow::render::{OutputFormat, RenderConfig};

/// Protoflow - edit the incident management protocol flowchart
#[derive(Parser)]
#[command(name = "protoflow")]
#[command(about = "Edit, export, import and render an incident management protocol flowchart")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file holding the diagram
    #[arg(short, long, global = true, default_value = DEFAULT_EXPORT_FILENAME)]
    pub file: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the default protocol to the configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// List nodes, edges and dangling references
    Show {
        /// Print a JSON summary instead of the listing
        #[arg(long)]
        json: bool,

        /// When to use colors in output
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
        color: ColorChoice,
    },

    /// Change the text of an existing node (`\n` starts a new line)
    SetNode { id: String, text: String },

    /// Add a node, or overwrite one with the same ID
    AddNode { id: String, text: String },

    /// Replace the edge at INDEX
    SetEdge {
        index: usize,
        source: String,
        target: String,
        #[arg(default_value = "")]
        label: String,
    },

    /// Append an edge
    AddEdge {
        source: String,
        target: String,
        #[arg(default_value = "")]
        label: String,
    },

    /// Write the configuration document
    Export {
        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Indent the document
        #[arg(long)]
        pretty: bool,
    },

    /// Replace the diagram with a configuration document
    Import {
        /// Document to import (use - for stdin)
        input: PathBuf,
    },

    /// Render the diagram for a graph tool
    Render {
        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = FormatChoice::Dot)]
        format: FormatChoice,

        /// Prefix node text with the node ID
        #[arg(long)]
        prefix_ids: bool,

        /// Wrap node text to this many columns (0 disables wrapping)
        #[arg(long, default_value_t = 0)]
        wrap: usize,
    },

    /// Check every edge for references to unknown nodes
    Validate,
}

/// Supported render formats
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum FormatChoice {
    Dot,
    Mermaid,
    Json,
}

impl From<FormatChoice> for OutputFormat {
    fn from(value: FormatChoice) -> Self {
        match value {
            FormatChoice::Dot => OutputFormat::Dot,
            FormatChoice::Mermaid => OutputFormat::Mermaid,
            FormatChoice::Json => OutputFormat::Json,
        }
    }
}

/// When to colorize output
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Use colors if stdout is a terminal and NO_COLOR is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl ColorChoice {
    fn enabled(self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                std::env::var("NO_COLOR").is_err()
                    && crossterm::tty::IsTty::is_tty(&std::io::stdout())
            }
        }
    }
}

/// Turn the two-character sequence `\n` into a line break
pub fn unescape_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}

/// Main CLI application
pub struct ProtoflowApp {
    file: PathBuf,
}

impl ProtoflowApp {
    /// Create an application bound to a configuration file
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }

    /// Run the application with the given CLI arguments
    pub fn run(cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level_str = std::env::var(LOG_LEVEL_ENV)
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var(LOG_FORMAT_ENV)
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Protoflow v{}", env!("CARGO_PKG_VERSION"));
            eprintln!("Using {}", cli.file.display());
        }

        let app = Self::new(cli.file);
        app.execute(cli.command, cli.verbose)
    }

    /// Apply one command to the configuration file
    pub fn execute(&self, command: Commands, verbose: bool) -> Result<()> {
        match command {
            Commands::Init { force } => self.init_command(force),
            Commands::Show { json, color } => self.show_command(json, color),
            Commands::SetNode { id, text } => self.set_node_command(&id, &text),
            Commands::AddNode { id, text } => self.add_node_command(&id, &text),
            Commands::SetEdge {
                index,
                source,
                target,
                label,
            } => self.set_edge_command(index, &source, &target, &label),
            Commands::AddEdge {
                source,
                target,
                label,
            } => self.add_edge_command(&source, &target, &label),
            Commands::Export { output, pretty } => self.export_command(output, pretty),
            Commands::Import { input } => self.import_command(&input, verbose),
            Commands::Render {
                output,
                format,
                prefix_ids,
                wrap,
            } => self.render_command(output, format.into(), RenderConfig::new(prefix_ids, wrap)),
            Commands::Validate => self.validate_command(),
        }
    }

    /// Load the session from the configuration file
    ///
    /// A missing file yields a fresh session holding the default protocol.
    pub fn load_session(&self) -> Result<Session> {
        let mut session = Session::new();
        if self.file.exists() {
            let bytes = fs::read(&self.file)
                .with_context(|| format!("Failed to read '{}'", self.file.display()))?;
            let report = session
                .import(&bytes)
                .with_context(|| format!("Failed to load '{}'", self.file.display()))?;
            debug!(
                node_count = report.node_count,
                edge_count = report.edge_count,
                "Session loaded"
            );
        } else {
            debug!(file = %self.file.display(), "No configuration file, using default protocol");
        }
        Ok(session)
    }

    /// Write the session back to the configuration file
    ///
    /// The document goes to a temporary file in the same directory which is
    /// then renamed over the target, so readers see either the old document
    /// or the new one.
    pub fn save_session(&self, session: &mut Session) -> Result<()> {
        let dir = match self.file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to stage '{}'", self.file.display()))?;
        staged
            .write_all(&session.export())
            .and_then(|()| staged.as_file().sync_all())
            .with_context(|| format!("Failed to write '{}'", self.file.display()))?;
        staged
            .persist(&self.file)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to replace '{}'", self.file.display()))?;
        debug!(file = %self.file.display(), "Session saved");
        Ok(())
    }

    fn init_command(&self, force: bool) -> Result<()> {
        if self.file.exists() && !force {
            bail!(
                "'{}' already exists (use --force to overwrite)",
                self.file.display()
            );
        }
        let mut session = Session::new();
        session.reset();
        self.save_session(&mut session)?;
        println!("Wrote default protocol to {}", self.file.display());
        Ok(())
    }

    fn show_command(&self, json: bool, color: ColorChoice) -> Result<()> {
        let mut session = self.load_session()?;
        let diagram = session.diagram();

        if json {
            let warnings: Vec<String> = diagram
                .dangling_references()
                .iter()
                .map(|w| w.to_string())
                .collect();
            let summary = serde_json::json!({
                "file": self.file.display().to_string(),
                "node_count": diagram.node_count(),
                "edge_count": diagram.edge_count(),
                "warnings": warnings,
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            print!("{}", format_listing(diagram, color.enabled()));
        }
        Ok(())
    }

    fn set_node_command(&self, id: &str, text: &str) -> Result<()> {
        let mut session = self.load_session()?;
        session
            .diagram_mut()
            .set_node_label(id, unescape_newlines(text))
            .map_err(|e| anyhow!("{} (use add-node to create it)", e))?;
        self.save_session(&mut session)?;
        println!("Updated node {}", id);
        Ok(())
    }

    fn add_node_command(&self, id: &str, text: &str) -> Result<()> {
        let mut session = self.load_session()?;
        if session.diagram_mut().add_node(id, unescape_newlines(text)) {
            self.save_session(&mut session)?;
            println!("Added node {}", id);
        } else {
            println!("Ignored: node ID and text must both be non-empty");
        }
        Ok(())
    }

    fn set_edge_command(&self, index: usize, source: &str, target: &str, label: &str) -> Result<()> {
        let mut session = self.load_session()?;
        let warnings = session
            .diagram_mut()
            .try_update_edge(index, source, target, label)?;
        self.save_session(&mut session)?;
        println!("Updated edge {}", index);
        for warning in warnings {
            eprintln!("warning: {}", warning);
        }
        Ok(())
    }

    fn add_edge_command(&self, source: &str, target: &str, label: &str) -> Result<()> {
        let mut session = self.load_session()?;
        let outcome = session.diagram_mut().add_edge(source, target, label);
        if !outcome.applied {
            println!("Ignored: edge source and target must both be non-empty");
            return Ok(());
        }
        self.save_session(&mut session)?;
        println!("Added edge {}", session.diagram().edge_count() - 1);
        for warning in outcome.warnings {
            eprintln!("warning: {}", warning);
        }
        Ok(())
    }

    fn export_command(&self, output: Option<PathBuf>, pretty: bool) -> Result<()> {
        let mut session = self.load_session()?;
        let document = if pretty {
            export_pretty(session.diagram())
        } else {
            session.export()
        };
        let output = output.unwrap_or_else(|| PathBuf::from("-"));
        self.write_output(Some(output), &String::from_utf8_lossy(&document))
    }

    fn import_command(&self, input: &Path, verbose: bool) -> Result<()> {
        let bytes = read_input_bytes(input)?;
        if verbose {
            eprintln!("Read {} bytes of input", bytes.len());
        }

        // The stored document is replaced wholesale, so it is never parsed here.
        let mut session = Session::new();
        let report = session
            .import(&bytes)
            .with_context(|| format!("Failed to import '{}'", input.display()))?;
        self.save_session(&mut session)?;

        info!(file = %self.file.display(), "Configuration imported");
        println!(
            "Configuration imported successfully! ({} nodes, {} edges)",
            report.node_count, report.edge_count
        );
        for warning in &report.warnings {
            eprintln!("warning: {}", warning);
        }
        Ok(())
    }

    fn render_command(
        &self,
        output: Option<PathBuf>,
        format: OutputFormat,
        config: RenderConfig,
    ) -> Result<()> {
        let mut session = self.load_session()?;
        let rendered = format.render(session.diagram(), &config);
        debug!(%format, output_len = rendered.len(), "Rendered diagram");
        self.write_output(output, &rendered)
    }

    fn validate_command(&self) -> Result<()> {
        let mut session = self.load_session()?;
        let warnings = session.diagram().dangling_references();
        if warnings.is_empty() {
            println!("✓ No dangling edge references");
            return Ok(());
        }
        for warning in &warnings {
            println!("✗ {}", warning);
        }
        Err(anyhow!("{} dangling edge reference(s)", warnings.len()))
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        let stdout_content = if content.is_empty() || content.ends_with('\n') {
            content.to_string()
        } else {
            format!("{}\n", content)
        };

        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                print!("{}", stdout_content);
                io::stdout().flush()?;
            }
        }
        Ok(())
    }
}

/// Read a document from a file, or from stdin for `-`
pub fn read_input_bytes(input: &Path) -> Result<Vec<u8>> {
    if input.to_string_lossy() == "-" {
        let mut content = Vec::new();
        io::stdin().read_to_end(&mut content)?;
        Ok(content)
    } else {
        fs::read(input).map_err(|e| anyhow!("Failed to read input file '{}': {}", input.display(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use protoflow::diagram::{import, Diagram};
    use tempfile::tempdir;

    fn app_in(dir: &tempfile::TempDir) -> ProtoflowApp {
        ProtoflowApp::new(dir.path().join(DEFAULT_EXPORT_FILENAME))
    }

    fn saved(app: &ProtoflowApp) -> Diagram {
        import(&fs::read(&app.file).unwrap()).unwrap()
    }

    #[test]
    fn test_cli_parsing_defaults() {
        let cli = Cli::try_parse_from(["protoflow", "show"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("flowchart_config.json"));
        assert!(!cli.verbose);
        assert_eq!(cli.log_level, LogLevel::Warn);
        match cli.command {
            Commands::Show { json, color } => {
                assert!(!json);
                assert_eq!(color, ColorChoice::Auto);
            }
            _ => panic!("Expected Show command"),
        }
    }

    #[test]
    fn test_cli_parsing_global_file_after_subcommand() {
        let cli = Cli::try_parse_from(["protoflow", "validate", "--file", "other.json"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("other.json"));
    }

    #[test]
    fn test_cli_parsing_add_edge_default_label() {
        let cli = Cli::try_parse_from(["protoflow", "add-edge", "Q", "R"]).unwrap();
        match cli.command {
            Commands::AddEdge {
                source,
                target,
                label,
            } => {
                assert_eq!(source, "Q");
                assert_eq!(target, "R");
                assert_eq!(label, "");
            }
            _ => panic!("Expected AddEdge command"),
        }
    }

    #[test]
    fn test_cli_parsing_render_options() {
        let cli = Cli::try_parse_from([
            "protoflow",
            "render",
            "--format",
            "mermaid",
            "--prefix-ids",
            "--wrap",
            "20",
        ])
        .unwrap();
        match cli.command {
            Commands::Render {
                output,
                format,
                prefix_ids,
                wrap,
            } => {
                assert!(output.is_none());
                assert_eq!(format, FormatChoice::Mermaid);
                assert!(prefix_ids);
                assert_eq!(wrap, 20);
            }
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn test_cli_rejects_negative_edge_index() {
        assert!(Cli::try_parse_from(["protoflow", "set-edge", "-1", "A", "B"]).is_err());
    }

    #[test]
    fn test_unescape_newlines() {
        assert_eq!(unescape_newlines("Is anyone\\ninjured?"), "Is anyone\ninjured?");
        assert_eq!(unescape_newlines("plain"), "plain");
    }

    #[test]
    fn test_missing_file_loads_default_protocol() {
        let dir = tempdir().unwrap();
        let app = app_in(&dir);
        let mut session = app.load_session().unwrap();
        assert_eq!(session.diagram().node_count(), 17);
        assert!(!app.file.exists());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        let app = app_in(&dir);
        app.execute(Commands::Init { force: false }, false).unwrap();
        assert!(app.execute(Commands::Init { force: false }, false).is_err());
        app.execute(Commands::Init { force: true }, false).unwrap();
        assert_eq!(saved(&app), Diagram::default_protocol());
    }

    #[test]
    fn test_add_node_and_edge_persist() {
        let dir = tempdir().unwrap();
        let app = app_in(&dir);
        app.execute(
            Commands::AddNode {
                id: "R".to_string(),
                text: "New Step".to_string(),
            },
            false,
        )
        .unwrap();
        app.execute(
            Commands::AddEdge {
                source: "Q".to_string(),
                target: "R".to_string(),
                label: String::new(),
            },
            false,
        )
        .unwrap();

        let diagram = saved(&app);
        assert_eq!(diagram.node_count(), 18);
        assert_eq!(diagram.edge_count(), 17);
        assert_eq!(diagram.edge(16).map(|e| e.as_tuple()), Some(("Q", "R", "")));
    }

    #[test]
    fn test_ignored_add_node_does_not_write() {
        let dir = tempdir().unwrap();
        let app = app_in(&dir);
        app.execute(
            Commands::AddNode {
                id: String::new(),
                text: "orphan".to_string(),
            },
            false,
        )
        .unwrap();
        assert!(!app.file.exists());
    }

    #[test]
    fn test_set_node_unknown_id_fails() {
        let dir = tempdir().unwrap();
        let app = app_in(&dir);
        let result = app.execute(
            Commands::SetNode {
                id: "Z".to_string(),
                text: "x".to_string(),
            },
            false,
        );
        assert!(result.unwrap_err().to_string().contains("add-node"));
    }

    #[test]
    fn test_set_edge_out_of_range_fails() {
        let dir = tempdir().unwrap();
        let app = app_in(&dir);
        let result = app.execute(
            Commands::SetEdge {
                index: 40,
                source: "A".to_string(),
                target: "B".to_string(),
                label: String::new(),
            },
            false,
        );
        assert!(result.is_err());
        assert!(!app.file.exists());
    }

    #[test]
    fn test_failed_import_keeps_file() {
        let dir = tempdir().unwrap();
        let app = app_in(&dir);
        app.execute(Commands::Init { force: false }, false).unwrap();
        let before = fs::read(&app.file).unwrap();

        let bad = dir.path().join("bad.json");
        fs::write(&bad, r#"{"nodes":{"A":"x"}}"#).unwrap();
        assert!(app.execute(Commands::Import { input: bad }, false).is_err());
        assert_eq!(fs::read(&app.file).unwrap(), before);
    }

    #[test]
    fn test_import_over_truncated_session_file() {
        let dir = tempdir().unwrap();
        let app = app_in(&dir);
        fs::write(&app.file, r#"{"nodes":{"A":"x"},"edg"#).unwrap();
        assert!(app.execute(Commands::Show { json: true, color: ColorChoice::Never }, false).is_err());

        let doc = dir.path().join("doc.json");
        fs::write(&doc, protoflow::default_document()).unwrap();
        app.execute(Commands::Import { input: doc }, false).unwrap();
        assert_eq!(saved(&app), Diagram::default_protocol());
    }

    #[test]
    fn test_save_leaves_no_staging_files() {
        let dir = tempdir().unwrap();
        let app = app_in(&dir);
        app.execute(Commands::Init { force: false }, false).unwrap();
        app.execute(
            Commands::AddNode {
                id: "R".to_string(),
                text: "New Step".to_string(),
            },
            false,
        )
        .unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from(DEFAULT_EXPORT_FILENAME)]);
        assert_eq!(saved(&app).node_count(), 18);
    }

    #[test]
    fn test_import_replaces_file() {
        let dir = tempdir().unwrap();
        let app = app_in(&dir);
        let doc = dir.path().join("doc.json");
        fs::write(&doc, r#"{"nodes":{"X":"Only"},"edges":[]}"#).unwrap();

        app.execute(Commands::Import { input: doc }, false).unwrap();
        let diagram = saved(&app);
        assert_eq!(diagram.node_count(), 1);
        assert_eq!(diagram.node_label("X"), Some("Only"));
    }

    #[test]
    fn test_export_and_render_to_files() {
        let dir = tempdir().unwrap();
        let app = app_in(&dir);
        let exported = dir.path().join("export.json");
        let rendered = dir.path().join("flow.dot");

        app.execute(
            Commands::Export {
                output: Some(exported.clone()),
                pretty: true,
            },
            false,
        )
        .unwrap();
        app.execute(
            Commands::Render {
                output: Some(rendered.clone()),
                format: FormatChoice::Dot,
                prefix_ids: true,
                wrap: 0,
            },
            false,
        )
        .unwrap();

        let diagram = import(&fs::read(&exported).unwrap()).unwrap();
        assert_eq!(diagram, Diagram::default_protocol());
        let dot = fs::read_to_string(&rendered).unwrap();
        assert!(dot.contains("\"A\" [label=\"A: Violent incident occurs\"];"));
    }

    #[test]
    fn test_validate_reports_dangling_edges() {
        let dir = tempdir().unwrap();
        let app = app_in(&dir);
        app.execute(Commands::Validate, false).unwrap();

        app.execute(
            Commands::AddEdge {
                source: "Q".to_string(),
                target: "Z".to_string(),
                label: String::new(),
            },
            false,
        )
        .unwrap();
        assert!(app.execute(Commands::Validate, false).is_err());
    }
}
