//! Price line items with a markup tactic
//!
//! Loads a tactic, a parameter set and a list of line items, runs every item
//! through the engine and prints the results.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use markup_content::{
    ConfigLoader, ItemLoader, MarkupTactic, ParameterLoader, PricedItem, PricingSummary,
    TacticLoader, price_items,
};
use markup_core::{CalculationIssue, EngineConfig, MarkupEngine, MarkupError};

use crate::config::CliConfig;

/// Price line items with a tactic and a parameter set
#[derive(Parser)]
pub struct Calc {
    /// Tactic file (JSON)
    #[arg(short, long, value_name = "FILE")]
    tactic: PathBuf,

    /// Parameter set file (TOML)
    #[arg(short, long, value_name = "FILE")]
    parameters: PathBuf,

    /// Line items file (JSON array)
    #[arg(short, long, value_name = "FILE")]
    items: PathBuf,

    /// Engine configuration file (TOML), overrides MARKUP_CONFIG
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// One row per item with totals
    Table,
    /// Full results as JSON
    Json,
}

impl Calc {
    pub fn execute(self, cli_config: &CliConfig) -> Result<()> {
        let engine_config = match self.config.as_ref().or(cli_config.engine_config.as_ref()) {
            Some(path) => ConfigLoader::load(path)
                .with_context(|| format!("Failed to load engine config {}", path.display()))?,
            None => EngineConfig::default(),
        };

        let tactic = TacticLoader::load(&self.tactic)?;
        let parameters = ParameterLoader::load(&self.parameters)?;
        let items = ItemLoader::load(&self.items)?;

        for problem in tactic.validate_parameters(&parameters.parameters) {
            tracing::warn!("{}", problem);
        }

        let engine = MarkupEngine::new(engine_config);
        let priced = price_items(&engine, &tactic, &parameters.parameters, &items);
        let summary = PricingSummary::from_priced(&priced);

        match self.format {
            OutputFormat::Table => print_table(&engine, &tactic, &priced, &summary),
            OutputFormat::Json => print_json(&tactic, &priced, &summary)?,
        }

        Ok(())
    }
}

fn print_table(
    engine: &MarkupEngine,
    tactic: &MarkupTactic,
    priced: &[PricedItem],
    summary: &PricingSummary,
) {
    println!("{} {}", style("Tactic:").bold().cyan(), tactic.name);
    println!();
    println!(
        "{}",
        style(format!(
            "{:>4}  {:<12} {:<18} {:>16} {:>16} {:>9}",
            "#", "ID", "Type", "Base", "Commercial", "Coef."
        ))
        .bold()
    );

    for (i, p) in priced.iter().enumerate() {
        let row = format!(
            "{:>4}  {:<12} {:<18} {:>16} {:>16} {:>9.4}",
            i + 1,
            p.item.id.as_deref().unwrap_or("-"),
            p.item.item_type,
            engine.format_cost(p.item.base_amount),
            engine.format_cost(p.result.commercial_cost),
            p.result.markup_coefficient,
        );
        if p.result.is_clean() {
            println!("{}", row);
        } else {
            println!("{}", style(row).yellow());
            for issue in p.result.issues() {
                println!("        {} {}", issue_marker(issue), issue);
            }
        }
    }

    println!();
    println!(
        "{} {} item(s), {} with issues, {} needing tactic fixes",
        style("Items:").bold().cyan(),
        summary.items,
        summary.items_with_issues,
        summary.items_needing_author
    );
    println!(
        "{} {}",
        style("Base total:").bold().cyan(),
        engine.format_cost(summary.base_total)
    );
    println!(
        "{} {} ({:+.2}%)",
        style("Commercial total:").bold().cyan(),
        engine.format_cost(summary.commercial_total),
        summary.percentage_markup()
    );
}

/// Yellow when the value is still usable, red when the tactic author has to act.
fn issue_marker(issue: &CalculationIssue) -> console::StyledObject<&'static str> {
    if issue.severity().is_recoverable() {
        style("!").yellow().bold()
    } else {
        style("!").red().bold()
    }
}

fn print_json(tactic: &MarkupTactic, priced: &[PricedItem], summary: &PricingSummary) -> Result<()> {
    let output = serde_json::json!({
        "tactic": tactic.name,
        "items": priced,
        "summary": summary,
    });
    let json = serde_json::to_string_pretty(&output).context("Failed to serialize results")?;
    println!("{}", json);
    Ok(())
}
