use clap::Parser;
use dpt::cli::{Cli, Commands};
use miette::Result;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    // This is standard practice for CLI tools that output to stdout.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    // Install miette's fancy error handler for beautiful diagnostics
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
        Commands::Init(args) => dpt::cli::commands::init::run(args),
        Commands::Catalog(cmd) => dpt::cli::commands::catalog::run(cmd, &global),
        Commands::Spec(cmd) => dpt::cli::commands::spec::run(cmd, &global),
        Commands::Panel(args) => dpt::cli::commands::panel::run(args, &global),
        Commands::Price(args) => dpt::cli::commands::price::run(args, &global),
        Commands::Completions(args) => dpt::cli::commands::completions::run(args),
    }
}
