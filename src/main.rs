use clap::Parser;
use deevault::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    deevault::logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Put {
            ref name,
            ref value,
        } => deevault::cli::commands::put::execute(&cli, name, value.as_deref()),
        Commands::Get { ref name } => deevault::cli::commands::get::execute(&cli, name),
        Commands::Delete { ref name } => deevault::cli::commands::delete::execute(&cli, name),
        Commands::List => deevault::cli::commands::list::execute(&cli),
    };

    if let Err(e) = result {
        deevault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
