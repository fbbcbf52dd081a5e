//! `bomtally init` command - create the data file

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::data_path;
use crate::cli::GlobalOpts;
use crate::core::persist::PersistError;
use crate::core::workspace::{Workspace, WorkspaceError};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Seed the data file with the demo data set (Car, Frame, Engine, ...)
    #[arg(long)]
    pub seed: bool,

    /// Overwrite an existing data file
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, global: &GlobalOpts) -> Result<()> {
    let path = data_path(global)?;

    match Workspace::init(&path, args.seed, args.force) {
        Ok(ws) => {
            if !global.quiet {
                println!(
                    "{} Initialized data file at {}",
                    style("✓").green(),
                    style(ws.path().display()).cyan()
                );
                if args.seed {
                    println!(
                        "  Seeded {} materials",
                        style(ws.store().material_count()).cyan()
                    );
                }
                println!();
                println!("Next steps:");
                println!(
                    "  {} Create a material",
                    style("bomtally mat new --name Widget --cost 1.50").yellow()
                );
                println!(
                    "  {} List materials with costs",
                    style("bomtally mat list").yellow()
                );
                println!(
                    "  {} Add a BOM line",
                    style("bomtally bom add 1 --name Bolt --qty 4 --cost 0.25").yellow()
                );
            }
            Ok(())
        }
        Err(WorkspaceError::Persist(PersistError::AlreadyExists(path))) => {
            println!(
                "{} Data file already exists at {}",
                style("!").yellow(),
                style(path.display()).cyan()
            );
            println!();
            println!(
                "Use {} to reinitialize",
                style("bomtally init --force").yellow()
            );
            Ok(())
        }
        Err(e) => Err(e).into_diagnostic(),
    }
}
