mod commands;
mod output;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "dga",
    version,
    about = "Transformer fault diagnosis from dissolved gas analysis"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Diagnose a single gas reading
    Diagnose(commands::diagnose::DiagnoseArgs),
    /// Classify a labeled batch of readings and report accuracy
    Batch(commands::batch::BatchArgs),
    /// Inspect the built-in rule sets
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
}

#[derive(Subcommand)]
enum RulesAction {
    /// List the available classification modes
    List,
    /// Explain a rule set in plain language
    Explain {
        /// Mode name: scoring or tree
        mode: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Diagnose(args) => commands::diagnose::run(args),
        Commands::Batch(args) => commands::batch::run(args),
        Commands::Rules { action } => match action {
            RulesAction::List => commands::rules::list(),
            RulesAction::Explain { mode } => commands::rules::explain(&mode),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
