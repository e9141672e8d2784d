use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod common;

use commands::{
    check_command, init_command, mkdir_command, mv_command, open_command, rename_command,
    rm_command, show_command, touch_command, vfolder_command,
};
use common::project_root;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "prj")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Project root directory (overrides PROJECT_ROOT)
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new project with an empty document
    Init,
    /// Print the project tree
    Show,
    /// Create a folder at a logical path
    Mkdir {
        /// Folder path to create
        path: String,
    },
    /// Create a file at a logical path
    Touch {
        /// File path to create
        path: String,
        /// Optional content for the file
        #[arg(short, long)]
        content: Option<String>,
    },
    /// Rename an entry in place
    Rename {
        /// Logical path of the entry
        path: String,
        /// New name (not a path)
        name: String,
    },
    /// Move an entry into another folder
    Mv {
        /// Logical path of the entry
        path: String,
        /// Logical path of the destination folder ("." for the root)
        dest: String,
    },
    /// Delete an entry (folders recursively)
    Rm {
        /// Logical path of the entry
        path: String,
    },
    /// Sweep the change watchers and report external edits
    Check,
    /// Reveal an entry in the platform file browser
    Open {
        /// Logical path of the entry
        path: String,
    },
    /// Register a virtual folder pointing at a directory elsewhere
    Vfolder {
        /// Target directory the virtual folder redirects to
        target: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    diagnostics::init_diagnostics();

    let cli = Cli::parse();
    let root = project_root(cli.project.clone())?;

    match &cli.command {
        Commands::Init => init_command(&root).await,
        Commands::Show => show_command(&root).await,
        Commands::Mkdir { path } => mkdir_command(&root, path).await,
        Commands::Touch { path, content } => touch_command(&root, path, content.as_deref()).await,
        Commands::Rename { path, name } => rename_command(&root, path, name).await,
        Commands::Mv { path, dest } => mv_command(&root, path, dest).await,
        Commands::Rm { path } => rm_command(&root, path).await,
        Commands::Check => check_command(&root).await,
        Commands::Open { path } => open_command(&root, path).await,
        Commands::Vfolder { target } => vfolder_command(&root, target).await,
    }
}
