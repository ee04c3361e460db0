use anyhow::Context;
use clap::Parser;
use kyykka_score::config::cli::{split_field, Command};
use kyykka_score::domain::model::FieldOutcome;
use kyykka_score::utils::error::ErrorSeverity;
use kyykka_score::utils::{logger, validation::Validate};
use kyykka_score::{
    classify, compute_totals, validate_round, validate_throw, CliConfig, ScoreError, ScoreField,
    ScoreRules, ScoreSheet, TeamTotals, TracingNotifier,
};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_log {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    let rules = match load_rules(&config) {
        Ok(rules) => rules,
        Err(e) => {
            tracing::error!(
                "❌ Could not load score rules: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(exit_code(e.severity()));
        }
    };

    let all_accepted = run(&config.command, &rules)?;
    if !all_accepted {
        std::process::exit(exit_code(ErrorSeverity::Medium));
    }
    Ok(())
}

fn load_rules(config: &CliConfig) -> Result<ScoreRules, ScoreError> {
    config.validate()?;
    let rules_config = config.load_rules_config()?;
    ScoreRules::from_config(&rules_config)
}

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

/// Returns false when any input was rejected.
fn run(command: &Command, rules: &ScoreRules) -> anyhow::Result<bool> {
    match command {
        Command::Throw { values } => {
            let mut all_accepted = true;
            for raw in values {
                match validate_throw(rules, raw) {
                    Ok(throw) => {
                        let kind = classify(&throw);
                        println!("{} -> {} ({} pts)", raw, throw, kind.points());
                    }
                    Err(e) => {
                        all_accepted = false;
                        println!("{} -> rejected: {}", raw, rules.throw_rejection_message());
                        tracing::info!("{}", e);
                    }
                }
            }
            Ok(all_accepted)
        }
        Command::Round { values } => {
            let mut all_accepted = true;
            for raw in values {
                match validate_round(rules, raw) {
                    Ok(value) => println!("{} -> {}", raw, value),
                    Err(e) => {
                        all_accepted = false;
                        println!("{} -> rejected: {}", raw, rules.round_rejection_message());
                        tracing::info!("{}", e);
                    }
                }
            }
            Ok(all_accepted)
        }
        Command::Totals { fields, json } => {
            let totals = compute_totals(fields.iter().map(|f| split_field(f)));
            print_totals(&totals, *json)?;
            Ok(true)
        }
        Command::Sheet { fields, json } => {
            let mut sheet = ScoreSheet::new(rules, TracingNotifier);
            let mut all_accepted = true;
            for arg in fields {
                let (name, raw) = split_field(arg);
                let Some(field) = ScoreField::parse(name) else {
                    tracing::warn!("Ignoring unknown field '{}'", name);
                    continue;
                };
                if let FieldOutcome::Rejected { message } = sheet.commit_round(field, raw) {
                    all_accepted = false;
                    eprintln!("❌ {}: {}", field.name(), message);
                }
            }
            if !sheet.totals_in_bounds() {
                tracing::warn!(
                    "Totals fall outside [{}, {}]",
                    rules.total_score_min(),
                    rules.total_score_max()
                );
            }
            print_totals(&sheet.totals(), *json)?;
            Ok(all_accepted)
        }
    }
}

fn print_totals(totals: &TeamTotals, json: bool) -> anyhow::Result<()> {
    if json {
        let rendered = serde_json::to_string(totals).context("rendering totals as JSON")?;
        println!("{}", rendered);
    } else {
        println!("team1-total: {}", totals.team1_total);
        println!("team2-total: {}", totals.team2_total);
    }
    Ok(())
}
