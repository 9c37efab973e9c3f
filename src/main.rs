// commit-scopes - type(scope): summary without remembering every scope
//
// This is the main entry point. Parses CLI args and dispatches to handlers.

use clap::{Parser, Subcommand};
use commit_scopes_lib::{
    config::DB_PATH_ENV,
    core::{
        Composer, CwdProjectResolver, MessageBuffer, ProjectResolver, ScopeStore, StringBuffer,
        TerminalPrompter,
    },
    db::CommitType,
    git::{prepare_commit_msg, HookInstaller, MessageSource},
    logging, Config, Result,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Compose structured commit messages with per-project scope completion.
#[derive(Parser)]
#[command(name = "commit-scopes")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose a message interactively.
    Compose {
        /// Project name to cache scopes under (default: detected).
        #[arg(short, long)]
        project: Option<String>,

        /// Insert at the top of this file instead of printing.
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Entry point for git's prepare-commit-msg hook.
    #[command(name = "prepare-commit-msg")]
    PrepareCommitMsg {
        /// Message file git is about to open.
        file: PathBuf,

        /// Where the message came from (message, template, merge, squash, commit).
        source: Option<String>,

        /// Commit object name, for -c/-C/--amend.
        sha: Option<String>,
    },

    /// List remembered scopes for a project.
    Scopes {
        #[arg(short, long)]
        project: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// List projects with remembered scopes.
    Projects {
        #[arg(long)]
        json: bool,
    },

    /// Remember a scope without composing a message.
    Remember {
        scope: String,

        #[arg(short, long)]
        project: Option<String>,
    },

    /// List the commit types offered for completion.
    Types,

    /// Install the prepare-commit-msg hook in this repository.
    Install {
        /// Replace an existing hook not written by commit-scopes.
        #[arg(long)]
        force: bool,
    },

    /// Remove the prepare-commit-msg hook from this repository.
    Uninstall,

    /// Show configuration, cache and hook status.
    Status,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            logging::init(cli.verbose, None);
            eprintln!("✗ {}", e.user_message());
            return ExitCode::FAILURE;
        }
    };
    logging::init(cli.verbose, config.log_filter.as_deref());

    match run(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("✗ {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, config: Config) -> Result<()> {
    let store = Arc::new(ScopeStore::new(&config.database_path));

    match command {
        Commands::Compose { project, file } => handle_compose(store, project, file).await,
        Commands::PrepareCommitMsg { file, source, sha: _ } => {
            handle_prepare(store, file, source).await
        }
        Commands::Scopes { project, json } => handle_scopes(store, project, json).await,
        Commands::Projects { json } => handle_projects(store, json).await,
        Commands::Remember { scope, project } => handle_remember(store, scope, project).await,
        Commands::Types => {
            for commit_type in CommitType::ALL {
                println!("{}", commit_type);
            }
            Ok(())
        }
        Commands::Install { force } => handle_install(force),
        Commands::Uninstall => handle_uninstall(),
        Commands::Status => handle_status(store, &config).await,
    }
}

/// `--project` wins, otherwise the directory name of the enclosing project
fn resolver(project: Option<String>) -> impl ProjectResolver {
    move || -> Result<String> {
        match &project {
            Some(name) => Ok(name.clone()),
            None => CwdProjectResolver::new().resolve(),
        }
    }
}

async fn handle_compose(
    store: Arc<ScopeStore>,
    project: Option<String>,
    file: Option<PathBuf>,
) -> Result<()> {
    let mut composer = Composer::new(store, TerminalPrompter::new(), resolver(project));

    if let Some(file) = file {
        // Same path git takes, minus the source check
        prepare_commit_msg(&mut composer, &file, &MessageSource::Fresh).await?;
        return Ok(());
    }

    let mut buffer = StringBuffer::new();
    composer.compose(&mut buffer).await?;
    if buffer.is_modified() {
        print!("{}", buffer.content());
    }

    Ok(())
}

async fn handle_prepare(
    store: Arc<ScopeStore>,
    file: PathBuf,
    source: Option<String>,
) -> Result<()> {
    let source = MessageSource::from_arg(source.as_deref());
    let mut composer = Composer::new(store, TerminalPrompter::new(), resolver(None));

    prepare_commit_msg(&mut composer, &file, &source).await?;
    Ok(())
}

async fn handle_scopes(store: Arc<ScopeStore>, project: Option<String>, json: bool) -> Result<()> {
    let project = resolver(project).resolve()?;
    let scopes = store.try_scopes_for_project(&project).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&scopes)?);
    } else if scopes.is_empty() {
        println!("No scopes remembered for '{}'.", project);
    } else {
        println!("\nScopes for {}:", project);
        println!("{}", "=".repeat(60));
        for scope in &scopes {
            println!("  {}", scope);
        }
        println!("{}", "=".repeat(60));
    }

    Ok(())
}

async fn handle_projects(store: Arc<ScopeStore>, json: bool) -> Result<()> {
    let db = store.open().await?;

    if json {
        let records = db.all_scopes().await?;
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    let projects = db.projects().await?;
    if projects.is_empty() {
        println!("No projects yet.");
    } else {
        for project in projects {
            let count = db.scopes_for_project(&project).await?.len();
            println!("{:<30} {} scope(s)", project, count);
        }
    }

    Ok(())
}

async fn handle_remember(store: Arc<ScopeStore>, scope: String, project: Option<String>) -> Result<()> {
    let project = resolver(project).resolve()?;
    store.save_scope(&project, &scope).await?;
    println!("✓ Remembered '{}' for {}", scope, project);
    Ok(())
}

fn handle_install(force: bool) -> Result<()> {
    let installer = HookInstaller::discover(std::env::current_dir()?)?;
    let path = installer.install(force)?;

    println!("✓ Installed {}", path.display());
    println!("\nRun `git commit` without -m to compose a message.");
    Ok(())
}

fn handle_uninstall() -> Result<()> {
    let installer = HookInstaller::discover(std::env::current_dir()?)?;

    if installer.uninstall()? {
        println!("✓ Removed {}", installer.hook_path().display());
    } else {
        println!("No commit-scopes hook installed.");
    }
    println!("Note: remembered scopes were not removed.");
    Ok(())
}

async fn handle_status(store: Arc<ScopeStore>, config: &Config) -> Result<()> {
    println!("\ncommit-scopes Status");
    println!("{}", "=".repeat(60));

    match Config::default_file() {
        Ok(file) if file.exists() => println!("\nConfig:        {}", file.display()),
        Ok(file) => println!("\nConfig:        {} (not found, using defaults)", file.display()),
        Err(e) => println!("\nConfig:        unavailable ({})", e),
    }

    println!("\nScope cache:");
    println!("  Path:        {}", config.database_path.display());
    if std::env::var_os(DB_PATH_ENV).is_some() {
        println!("  (from ${})", DB_PATH_ENV);
    }
    match store.open().await {
        Ok(db) => {
            let stats = db.stats().await?;
            println!("  Projects:    {}", stats.total_projects);
            println!("  Scopes:      {}", stats.total_scopes);
        }
        Err(e) => println!("  Unavailable: {}", e),
    }

    println!("\nCurrent project:");
    match CwdProjectResolver::new().resolve() {
        Ok(project) => println!("  {}", project),
        Err(_) => println!("  Unknown"),
    }

    println!("\nGit hook:");
    match HookInstaller::discover(std::env::current_dir()?) {
        Ok(installer) if installer.is_installed() => {
            println!("  ✓ Installed at {}", installer.hook_path().display())
        }
        Ok(_) => println!("  ✗ Not installed"),
        Err(_) => println!("  Not inside a git repository"),
    }

    println!("{}", "=".repeat(60));

    Ok(())
}
