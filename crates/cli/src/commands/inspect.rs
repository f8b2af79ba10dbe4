//! Show what a tactic computes

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;
use markup_content::TacticLoader;

/// Show a tactic's sequences and the parameters they read
#[derive(Parser)]
pub struct Inspect {
    /// Tactic file (JSON)
    #[arg(short, long, value_name = "FILE")]
    tactic: PathBuf,
}

impl Inspect {
    pub fn execute(self) -> Result<()> {
        let tactic = TacticLoader::load(&self.tactic)?;

        println!("{} {}", style("Tactic:").bold().cyan(), tactic.name);
        if let Some(description) = &tactic.description {
            println!("{} {}", style("Description:").bold().cyan(), description);
        }
        println!();

        for (item_type, steps) in &tactic.sequences {
            println!("{}", style(format!("{}:", item_type)).bold().yellow());
            if steps.is_empty() {
                println!("  (empty)");
            }
            for (i, step) in steps.iter().enumerate() {
                match &step.name {
                    Some(name) => println!("  {:>2}. {}  {}", i + 1, step, style(name).dim()),
                    None => println!("  {:>2}. {}", i + 1, step),
                }
            }
            println!();
        }

        let parameters = tactic.referenced_parameters();
        println!("{}", style("Parameters:").bold().yellow());
        if parameters.is_empty() {
            println!("  (none)");
        } else {
            println!("  {}", parameters.join(", "));
        }

        Ok(())
    }
}
