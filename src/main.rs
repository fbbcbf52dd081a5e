use clap::Parser;
use miette::Result;

use bomtally::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix
    // piping. Without this, piping to `head`, `grep -q`, etc. causes a panic
    // on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Init(args) => bomtally::cli::commands::init::run(args, &global),
        Commands::Mat(cmd) => bomtally::cli::commands::mat::run(cmd, &global),
        Commands::Bom(cmd) => bomtally::cli::commands::bom::run(cmd, &global),
        Commands::Completions(args) => bomtally::cli::commands::completions::run(args),
    }
}
