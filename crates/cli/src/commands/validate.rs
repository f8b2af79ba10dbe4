//! Check a tactic before it is used for pricing

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;
use markup_content::{ParameterLoader, TacticLoader};

/// Check a tactic's sequences, optionally against a parameter set
#[derive(Parser)]
pub struct Validate {
    /// Tactic file (JSON)
    #[arg(short, long, value_name = "FILE")]
    tactic: PathBuf,

    /// Parameter set to check parameter operands against (TOML)
    #[arg(short, long, value_name = "FILE")]
    parameters: Option<PathBuf>,
}

impl Validate {
    pub fn execute(self) -> Result<()> {
        let tactic = TacticLoader::load(&self.tactic)?;

        let mut problems = tactic.validate();
        if let Some(path) = &self.parameters {
            let parameters = ParameterLoader::load(path)?;
            problems.extend(tactic.validate_parameters(&parameters.parameters));
        }

        if problems.is_empty() {
            println!(
                "{} {} ({} sequence(s))",
                style("OK").bold().green(),
                tactic.name,
                tactic.sequences.len()
            );
            return Ok(());
        }

        println!("{} {}", style("Tactic:").bold().cyan(), tactic.name);
        for problem in &problems {
            println!("  {} {}", style("✗").red().bold(), problem);
        }

        anyhow::bail!(
            "{} problem(s) found in {}",
            problems.len(),
            self.tactic.display()
        )
    }
}
