use clap::Parser;
use std::path::PathBuf;

use crate::models::Agent;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Industry adoption statistics for AI coding agents
#[derive(Parser, Debug, Clone)]
#[command(
    name = "industry-adoption",
    about = "Industry adoption statistics and charts for AI coding agents",
    version
)]
pub struct Settings {
    /// Report to generate
    #[arg(long, default_value = "all", value_parser = ["summary", "chart", "web", "all"])]
    pub report: String,

    /// Input root containing adoption_timing/ and predictions/
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Destination for CSV summary tables
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Destination for PNG charts
    #[arg(long, default_value = "figures")]
    pub figures_dir: PathBuf,

    /// Destination for web JSON exports
    #[arg(long, default_value = "web")]
    pub web_dir: PathBuf,

    /// Comma-separated agent keys to process
    #[arg(long, value_delimiter = ',', default_value = "claude,copilot,codex")]
    pub agents: Vec<String>,

    /// Industries drawn individually in charts; the rest become "Other" (1-30)
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u32).range(1..=30))]
    pub top_n: u32,

    /// TrueType font used for chart labels; common system fonts are tried otherwise
    #[arg(long)]
    pub chart_font: Option<PathBuf>,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`Settings::load`] but with an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    /// `--debug` overrides the log level.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Whether the `report` selection includes `name`.
    pub fn wants(&self, name: &str) -> bool {
        self.report == "all" || self.report == name
    }

    /// Requested agents, deduplicated, in the order given. An empty list
    /// falls back to the default agents.
    pub fn agents(&self) -> Vec<Agent> {
        let mut out: Vec<Agent> = Vec::new();
        for key in self.agents.iter().filter(|k| !k.trim().is_empty()) {
            let agent = Agent::from_key(key);
            if !out.contains(&agent) {
                out.push(agent);
            }
        }
        if out.is_empty() {
            return Agent::defaults();
        }
        out
    }

    pub fn top_n(&self) -> usize {
        self.top_n as usize
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
