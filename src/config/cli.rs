use crate::config::toml_config::RulesFile;
use crate::domain::model::RulesConfig;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, Validate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "kyykka-score")]
#[command(about = "Validate kyykkä throws and round scores and compute team totals")]
pub struct CliConfig {
    /// Path to a TOML rules file
    #[arg(short, long, env = "KYYKKA_RULES")]
    pub config: Option<PathBuf>,

    #[arg(long, allow_hyphen_values = true)]
    pub throw_min: Option<i32>,

    #[arg(long, allow_hyphen_values = true)]
    pub throw_max: Option<i32>,

    #[arg(long, allow_hyphen_values = true)]
    pub round_min: Option<i32>,

    #[arg(long, allow_hyphen_values = true)]
    pub round_max: Option<i32>,

    /// Sentinel throw codes, comma separated (e.g. H,F,E)
    #[arg(long, value_delimiter = ',')]
    pub sentinels: Vec<String>,

    /// Accept an empty throw as this sentinel instead of rejecting it
    #[arg(long)]
    pub empty_throw: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_log: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Validate single throws
    Throw {
        #[arg(required = true, allow_hyphen_values = true)]
        values: Vec<String>,
    },
    /// Validate round totals
    Round {
        #[arg(required = true, allow_hyphen_values = true)]
        values: Vec<String>,
    },
    /// Sum score_<team>_<round>=<value> fields leniently
    Totals {
        fields: Vec<String>,

        /// Print totals as JSON
        #[arg(long)]
        json: bool,
    },
    /// Commit score_<team>_<round>=<value> fields one by one, as a form would
    Sheet {
        fields: Vec<String>,

        #[arg(long)]
        json: bool,
    },
}

impl CliConfig {
    /// 讀取規則檔（若有），再套用命令列覆蓋
    pub fn load_rules_config(&self) -> Result<RulesConfig> {
        let base = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading rules from: {}", path.display());
                let file = RulesFile::from_file(path)?;
                file.validate()?;
                file.rules
            }
            None => RulesConfig::default(),
        };
        Ok(self.apply_overrides(base))
    }

    pub fn apply_overrides(&self, mut config: RulesConfig) -> RulesConfig {
        if let Some(v) = self.throw_min {
            config.single_throw_min = v;
        }
        if let Some(v) = self.throw_max {
            config.single_throw_max = v;
        }
        if let Some(v) = self.round_min {
            config.round_score_min = v;
        }
        if let Some(v) = self.round_max {
            config.round_score_max = v;
        }
        if !self.sentinels.is_empty() {
            config.sentinels = self.sentinels.clone();
        }
        if let Some(code) = &self.empty_throw {
            config.empty_throw_sentinel = Some(code.clone());
        }
        config
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        for code in &self.sentinels {
            validate_non_empty_string("--sentinels", code)?;
        }
        if let Some(code) = &self.empty_throw {
            validate_non_empty_string("--empty-throw", code)?;
        }
        Ok(())
    }
}

/// Split `name=value`; a missing `=` means an empty value.
pub fn split_field(arg: &str) -> (&str, &str) {
    arg.split_once('=').unwrap_or((arg, ""))
}
