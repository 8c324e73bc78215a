use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Turn the ML starter template into a named project", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the template checkout as a named project
    Init {
        /// Project name (letters, digits, underscores; not starting with a digit)
        #[arg(long)]
        name: Option<String>,

        /// One-line project description
        #[arg(long)]
        description: Option<String>,

        /// Project author
        #[arg(long)]
        author: Option<String>,

        /// Project type (vanilla, cpp)
        #[arg(long = "variant", alias = "type")]
        variant: Option<String>,

        /// Delete the initializer script afterwards (true/false)
        #[arg(long)]
        remove: Option<bool>,

        /// Show what would change without touching any files
        #[arg(long)]
        dry_run: bool,

        /// Template root (defaults to the current directory)
        #[arg(long)]
        root: Option<PathBuf>,

        /// Config file (defaults to <root>/starter.toml if present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Never prompt; missing values are an error
        #[arg(long)]
        no_input: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Check that the template layout is complete
    Doctor {
        /// Template root (defaults to the current directory)
        #[arg(long)]
        root: Option<PathBuf>,

        /// Config file (defaults to <root>/starter.toml if present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output results as JSON
        #[arg(short, long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            name,
            description,
            author,
            variant,
            remove,
            dry_run,
            root,
            config,
            no_input,
            verbose,
        } => {
            commands::init::execute(commands::init::InitCommand {
                name,
                description,
                author,
                variant,
                remove,
                dry_run,
                root,
                config,
                no_input,
                verbose,
            })?;
        }
        Commands::Doctor { root, config, json } => {
            let exit_code = commands::doctor::execute(root, config, json)?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
