//! `bomtally mat` command - material management

use clap::{Subcommand, ValueEnum};
use console::style;
use dialoguer::{theme::ColorfulTheme, Input};
use miette::{IntoDiagnostic, Result};
use std::fmt;

use crate::cli::commands::bom::print_bom_table;
use crate::cli::helpers::{escape_csv, format_money, open_workspace, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::cost;
use crate::core::material::MaterialId;
use crate::core::store::Store;

#[derive(Subcommand, Debug)]
pub enum MatCommands {
    /// List materials with effective costs
    List(ListArgs),

    /// Create a new material
    New(NewArgs),

    /// Show a material and its BOM
    Show(ShowArgs),

    /// Print a material's effective cost
    Cost(CostArgs),

    /// Set a material's base (leaf) cost
    SetCost(SetCostArgs),

    /// Set a manual cost override
    Override(OverrideArgs),

    /// Clear a cost override (revert to the computed roll-up)
    Reset(ResetArgs),
}

/// List sort columns
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListColumn {
    Id,
    Name,
    Cost,
}

impl fmt::Display for ListColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListColumn::Id => write!(f, "id"),
            ListColumn::Name => write!(f, "name"),
            ListColumn::Cost => write!(f, "cost"),
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Search in material names
    #[arg(long)]
    pub search: Option<String>,

    /// Sort by column
    #[arg(long, default_value = "id")]
    pub sort: ListColumn,

    /// Reverse sort order
    #[arg(long, short = 'r')]
    pub reverse: bool,

    /// Limit number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Material name
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Base (leaf) cost
    #[arg(long, short = 'c')]
    pub cost: Option<f64>,

    /// Interactive mode (prompt for fields)
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Material id
    pub id: MaterialId,
}

#[derive(clap::Args, Debug)]
pub struct CostArgs {
    /// Material id
    pub id: MaterialId,
}

#[derive(clap::Args, Debug)]
pub struct SetCostArgs {
    /// Material id
    pub id: MaterialId,

    /// New base cost (>= 0)
    pub value: f64,
}

#[derive(clap::Args, Debug)]
pub struct OverrideArgs {
    /// Material id
    pub id: MaterialId,

    /// Override cost (>= 0); supersedes the computed roll-up while the
    /// material has BOM items
    pub value: f64,
}

#[derive(clap::Args, Debug)]
pub struct ResetArgs {
    /// Material id
    pub id: MaterialId,
}

/// Run a material subcommand
pub fn run(cmd: MatCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        MatCommands::List(args) => run_list(args, global),
        MatCommands::New(args) => run_new(args, global),
        MatCommands::Show(args) => run_show(args, global),
        MatCommands::Cost(args) => run_cost(args, global),
        MatCommands::SetCost(args) => run_set_cost(args, global),
        MatCommands::Override(args) => run_override(args, global),
        MatCommands::Reset(args) => run_reset(args, global),
    }
}

struct ListRow {
    id: MaterialId,
    name: String,
    cost: f64,
    kind: &'static str,
    overridden: bool,
}

fn kind_of(store: &Store, id: MaterialId) -> &'static str {
    if store.bom_items(id).is_empty() {
        "leaf"
    } else {
        "assembly"
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let ws = open_workspace(global)?;
    let store = ws.store();

    let mut rows: Vec<ListRow> = Vec::new();
    for material in store.materials() {
        if let Some(ref search) = args.search {
            if !material
                .name
                .to_lowercase()
                .contains(&search.to_lowercase())
            {
                continue;
            }
        }
        rows.push(ListRow {
            id: material.id,
            name: material.name.clone(),
            cost: cost::cost(store, material.id).into_diagnostic()?,
            kind: kind_of(store, material.id),
            overridden: !store.bom_items(material.id).is_empty()
                && store.override_for(material.id).is_some(),
        });
    }

    match args.sort {
        ListColumn::Id => rows.sort_by_key(|r| r.id),
        ListColumn::Name => rows.sort_by(|a, b| a.name.cmp(&b.name)),
        ListColumn::Cost => rows.sort_by(|a, b| a.cost.total_cmp(&b.cost)),
    }
    if args.reverse {
        rows.reverse();
    }
    if let Some(limit) = args.limit {
        rows.truncate(limit);
    }

    if args.count {
        println!("{}", rows.len());
        return Ok(());
    }
    if rows.is_empty() {
        println!("No materials found.");
        return Ok(());
    }

    let format = match global.format {
        OutputFormat::Auto => OutputFormat::Table,
        f => f,
    };

    match format {
        OutputFormat::Json => {
            let values: Vec<serde_json::Value> = rows
                .iter()
                .map(|r| {
                    serde_json::json!({
                        "id": r.id,
                        "name": r.name,
                        "cost": r.cost,
                        "kind": r.kind,
                        "overridden": r.overridden,
                    })
                })
                .collect();
            let json = serde_json::to_string_pretty(&values).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Csv => {
            println!("id,name,cost,kind,overridden");
            for r in &rows {
                println!(
                    "{},{},{},{},{}",
                    r.id,
                    escape_csv(&r.name),
                    format_money(r.cost),
                    r.kind,
                    r.overridden
                );
            }
        }
        OutputFormat::Id => {
            for r in &rows {
                println!("{}", r.id);
            }
        }
        OutputFormat::Table | OutputFormat::Auto => {
            println!(
                "{:<6} {:<28} {:>12} {:<10}",
                style("ID").bold(),
                style("NAME").bold(),
                style("COST").bold(),
                style("KIND").bold()
            );
            println!("{}", "-".repeat(59));
            for r in &rows {
                let marker = if r.overridden { "*" } else { "" };
                println!(
                    "{:<6} {:<28} {:>12} {:<10}",
                    r.id,
                    truncate_str(&r.name, 26),
                    format!("{}{}", format_money(r.cost), marker),
                    r.kind
                );
            }
            println!();
            println!(
                "{} material(s) found. {} marks an overridden cost.",
                style(rows.len()).cyan(),
                style("*").yellow()
            );
        }
    }

    Ok(())
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let (name, base_cost) = if args.interactive {
        let theme = ColorfulTheme::default();
        let name: String = Input::with_theme(&theme)
            .with_prompt("Name")
            .with_initial_text(args.name.unwrap_or_default())
            .interact_text()
            .into_diagnostic()?;
        let cost_str: String = Input::with_theme(&theme)
            .with_prompt("Base cost")
            .default(format_money(args.cost.unwrap_or(0.0)))
            .interact_text()
            .into_diagnostic()?;
        let base_cost: f64 = cost_str
            .trim()
            .parse()
            .map_err(|_| miette::miette!("invalid cost: {}", cost_str))?;
        (name, base_cost)
    } else {
        let name = args
            .name
            .ok_or_else(|| miette::miette!("pass --name, or use -i for interactive mode"))?;
        (name, args.cost.unwrap_or(0.0))
    };

    let mut ws = open_workspace(global)?;
    let id = ws.add_material(&name, base_cost).into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Created material {} (id {})",
            style("✓").green(),
            style(&name).cyan(),
            id
        );
    }
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let ws = open_workspace(global)?;
    let store = ws.store();
    let material = store.material(args.id).into_diagnostic()?;
    let effective = cost::cost(store, args.id).into_diagnostic()?;

    println!("{} (id {})", style(&material.name).bold(), material.id);
    println!("  Kind:      {}", kind_of(store, args.id));
    println!("  Base cost: {}", format_money(material.base_cost));
    if let Some(value) = store.override_for(args.id) {
        let state = if store.bom_items(args.id).is_empty() {
            " (dormant)"
        } else {
            ""
        };
        println!("  Override:  {}{}", format_money(value), state);
    }
    println!("  Cost:      {}", style(format_money(effective)).cyan());
    println!("  Created:   {}", material.created.format("%Y-%m-%d %H:%M"));
    println!();
    print_bom_table(store, args.id)?;
    Ok(())
}

fn run_cost(args: CostArgs, global: &GlobalOpts) -> Result<()> {
    let ws = open_workspace(global)?;
    let effective = cost::cost(ws.store(), args.id).into_diagnostic()?;
    println!("{}", format_money(effective));
    Ok(())
}

fn run_set_cost(args: SetCostArgs, global: &GlobalOpts) -> Result<()> {
    let mut ws = open_workspace(global)?;
    ws.set_base_cost(args.id, args.value).into_diagnostic()?;

    if !global.quiet {
        let store = ws.store();
        let material = store.material(args.id).into_diagnostic()?;
        println!(
            "{} Set base cost of {} to {}",
            style("✓").green(),
            style(&material.name).cyan(),
            style(format_money(args.value)).cyan()
        );
        if !store.bom_items(args.id).is_empty() {
            println!(
                "  {} is an assembly; its cost stays the roll-up until the BOM empties",
                material.name
            );
        }
    }
    Ok(())
}

fn run_override(args: OverrideArgs, global: &GlobalOpts) -> Result<()> {
    let mut ws = open_workspace(global)?;
    ws.set_override(args.id, args.value).into_diagnostic()?;

    if !global.quiet {
        let store = ws.store();
        let material = store.material(args.id).into_diagnostic()?;
        println!(
            "{} Override cost of {} set to {}",
            style("✓").green(),
            style(&material.name).cyan(),
            style(format_money(args.value)).cyan()
        );
        if store.bom_items(args.id).is_empty() {
            println!(
                "  {} has no BOM items; the override stays dormant until it gains some",
                material.name
            );
        }
    }
    Ok(())
}

fn run_reset(args: ResetArgs, global: &GlobalOpts) -> Result<()> {
    let mut ws = open_workspace(global)?;
    ws.clear_override(args.id).into_diagnostic()?;

    if !global.quiet {
        let store = ws.store();
        let material = store.material(args.id).into_diagnostic()?;
        println!(
            "{} Cleared override on {}; cost is now {}",
            style("✓").green(),
            style(&material.name).cyan(),
            style(format_money(
                cost::cost(store, args.id).into_diagnostic()?
            ))
            .cyan()
        );
    }
    Ok(())
}
