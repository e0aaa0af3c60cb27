//! Branches command - list the supported ANGLE branches

use crate::cli::args::{BranchesArgs, OutputFormat};
use crate::error::AngleResult;
use crate::resolver::{default_branch, SUPPORTED_BRANCHES};
use crate::ui::{self, UiContext};
use serde::Serialize;

/// Execute the branches command
pub fn execute(args: BranchesArgs) -> AngleResult<()> {
    match args.format {
        OutputFormat::Table => print_branch_table(),
        OutputFormat::Json => print_branch_json()?,
        OutputFormat::Plain => {
            for branch in SUPPORTED_BRANCHES {
                println!("{}", branch);
            }
        }
    }
    Ok(())
}

fn print_branch_table() {
    let ctx = UiContext::detect();
    ui::section(&ctx, "Supported ANGLE branches (newest first)");
    for branch in SUPPORTED_BRANCHES {
        if *branch == default_branch() {
            ui::step_ok_detail(&ctx, branch, "default");
        } else {
            ui::step_ok(&ctx, branch);
        }
    }
}

#[derive(Serialize)]
struct BranchJson {
    name: &'static str,
    default: bool,
}

fn branch_entries() -> Vec<BranchJson> {
    SUPPORTED_BRANCHES
        .iter()
        .copied()
        .map(|branch| BranchJson {
            name: branch,
            default: branch == default_branch(),
        })
        .collect()
}

fn print_branch_json() -> AngleResult<()> {
    println!("{}", serde_json::to_string_pretty(&branch_entries())?);
    Ok(())
}
