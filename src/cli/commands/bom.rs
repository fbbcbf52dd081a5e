//! `bomtally bom` command - BOM line item management

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{format_money, open_workspace, truncate_str};
use crate::cli::GlobalOpts;
use crate::core::cost;
use crate::core::material::MaterialId;
use crate::core::mutate::{ComponentRef, LineEdit};
use crate::core::store::Store;

#[derive(Subcommand, Debug)]
pub enum BomCommands {
    /// Show a material's BOM table
    Show(ShowArgs),

    /// Add a line item to a material's BOM
    Add(AddArgs),

    /// Edit a line item's quantity or unit cost
    Edit(EditArgs),

    /// Remove a line item by position
    Rm(RmArgs),
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Parent material id
    pub parent: MaterialId,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Parent material id
    pub parent: MaterialId,

    /// Component material id
    #[arg(long, short = 'C', conflicts_with = "name")]
    pub component: Option<MaterialId>,

    /// Component name; a new leaf material is created when no exact match
    /// exists, with its base cost set to the line's unit cost
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Quantity of the component consumed (>= 1)
    #[arg(long, short = 'Q')]
    pub qty: u32,

    /// Unit cost snapshot for this line
    #[arg(long, short = 'c')]
    pub cost: f64,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Parent material id
    pub parent: MaterialId,

    /// Line position (0-based, as shown by `bom show`)
    pub index: usize,

    /// New quantity
    #[arg(long, short = 'Q', conflicts_with = "cost")]
    pub qty: Option<u32>,

    /// New unit cost
    #[arg(long, short = 'c')]
    pub cost: Option<f64>,
}

#[derive(clap::Args, Debug)]
pub struct RmArgs {
    /// Parent material id
    pub parent: MaterialId,

    /// Line position (0-based, as shown by `bom show`)
    pub index: usize,
}

/// Run a BOM subcommand
pub fn run(cmd: BomCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        BomCommands::Show(args) => run_show(args, global),
        BomCommands::Add(args) => run_add(args, global),
        BomCommands::Edit(args) => run_edit(args, global),
        BomCommands::Rm(args) => run_rm(args, global),
    }
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let ws = open_workspace(global)?;
    let store = ws.store();
    let material = store.material(args.parent).into_diagnostic()?;

    println!(
        "BOM for {} (id {})",
        style(&material.name).bold(),
        material.id
    );
    print_bom_table(store, args.parent)?;
    Ok(())
}

/// Print a material's BOM as an aligned table with line costs and the
/// computed total. Shared with `mat show`.
pub(crate) fn print_bom_table(store: &Store, parent: MaterialId) -> Result<()> {
    let items = store.bom_items(parent);
    if items.is_empty() {
        let material = store.material(parent).into_diagnostic()?;
        println!(
            "No line items; leaf material with base cost {}.",
            style(format_money(material.base_cost)).cyan()
        );
        return Ok(());
    }

    println!(
        "{:<4} {:<24} {:>6} {:>12} {:>12}",
        style("#").bold(),
        style("COMPONENT").bold(),
        style("QTY").bold(),
        style("UNIT COST").bold(),
        style("LINE COST").bold()
    );
    println!("{}", "-".repeat(62));

    for (index, item) in items.iter().enumerate() {
        let name = store
            .material(item.component_id)
            .map(|m| m.name.clone())
            .unwrap_or_else(|_| format!("<missing {}>", item.component_id));
        println!(
            "{:<4} {:<24} {:>6} {:>12} {:>12}",
            index,
            truncate_str(&name, 22),
            item.quantity,
            format_money(item.unit_cost),
            format_money(item.line_cost())
        );
    }

    let computed = cost::computed_cost(store, parent).unwrap_or(0.0);
    println!();
    println!(
        "Total cost of BOM: {}",
        style(format_money(computed)).cyan()
    );
    if let Some(value) = store.override_for(parent) {
        println!(
            "Override in effect: {}",
            style(format_money(value)).yellow()
        );
    }
    Ok(())
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let component = match (args.component, args.name) {
        (Some(id), None) => ComponentRef::Id(id),
        (None, Some(name)) => ComponentRef::Name(name),
        _ => return Err(miette::miette!("pass exactly one of --component or --name")),
    };

    let mut ws = open_workspace(global)?;
    let component_id = ws
        .add_line_item(args.parent, component, args.qty, args.cost)
        .into_diagnostic()?;

    if !global.quiet {
        let store = ws.store();
        let component_name = store.material(component_id).into_diagnostic()?.name.clone();
        let parent_name = store.material(args.parent).into_diagnostic()?.name.clone();
        let line = store.bom_items(args.parent).len() - 1;
        println!(
            "{} Added {} x{} to {} (line {})",
            style("✓").green(),
            style(&component_name).cyan(),
            args.qty,
            style(&parent_name).cyan(),
            line
        );
        println!(
            "  Cost of {} is now {}",
            parent_name,
            style(format_money(
                cost::cost(store, args.parent).into_diagnostic()?
            ))
            .cyan()
        );
    }
    Ok(())
}

fn run_edit(args: EditArgs, global: &GlobalOpts) -> Result<()> {
    let edit = match (args.qty, args.cost) {
        (Some(qty), None) => LineEdit::Quantity(qty),
        (None, Some(cost)) => LineEdit::UnitCost(cost),
        _ => return Err(miette::miette!("pass exactly one of --qty or --cost")),
    };

    let mut ws = open_workspace(global)?;
    ws.edit_line_item(args.parent, args.index, edit)
        .into_diagnostic()?;

    if !global.quiet {
        let store = ws.store();
        let parent_name = &store.material(args.parent).into_diagnostic()?.name;
        println!(
            "{} Updated line {} of {}; cost is now {}",
            style("✓").green(),
            args.index,
            style(parent_name).cyan(),
            style(format_money(
                cost::cost(store, args.parent).into_diagnostic()?
            ))
            .cyan()
        );
    }
    Ok(())
}

fn run_rm(args: RmArgs, global: &GlobalOpts) -> Result<()> {
    let mut ws = open_workspace(global)?;
    let removed = ws
        .delete_line_item(args.parent, args.index)
        .into_diagnostic()?;

    if !global.quiet {
        let store = ws.store();
        let component_name = store
            .material(removed.component_id)
            .map(|m| m.name.clone())
            .unwrap_or_else(|_| format!("<missing {}>", removed.component_id));
        let parent_name = &store.material(args.parent).into_diagnostic()?.name;
        println!(
            "{} Removed {} x{} from {}",
            style("✓").green(),
            style(&component_name).cyan(),
            removed.quantity,
            style(parent_name).cyan()
        );
        if store.bom_items(args.parent).is_empty() {
            println!(
                "  {} is a leaf again; cost falls back to its base cost",
                parent_name
            );
        }
    }
    Ok(())
}
