use anyhow::Result;
use clap::Parser;
use railpkg::commands::{self, config::Config};
use railpkg::runtime::RealRuntime;
use std::path::PathBuf;

/// railpkg - installed content manager for railway simulator packages
///
/// Keeps track of installed routes, trains and other content, checks package
/// dependencies, and works out where the files of a content archive belong.
///
/// Examples:
///   railpkg check manifest.json     # Which dependencies are missing?
///   railpkg classify ./extracted    # Where do these files go?
#[derive(Parser, Debug)]
#[command(author, version = env!("RAILPKG_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Package database file (also via RAILPKG_DATABASE)
    #[arg(
        long = "database",
        short = 'd',
        env = "RAILPKG_DATABASE",
        value_name = "PATH",
        global = true
    )]
    pub database: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List installed packages
    List,

    /// Record a package as installed
    Add(AddArgs),

    /// Show the unmet dependencies of a package manifest
    Check(ManifestArgs),

    /// Show which installed packages depend on the given packages
    Impact(IdsArgs),

    /// Remove packages from the database
    Remove(RemoveArgs),

    /// Work out the install root for an extracted archive
    Classify(DirArgs),

    /// Remove empty directories left behind after an uninstall
    Clean(DirArgs),
}

#[derive(clap::Args, Debug)]
pub struct ManifestArgs {
    /// Package manifest (JSON)
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Package manifest (JSON)
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// Add even if dependencies are not installed
    #[arg(long)]
    pub force: bool,
}

#[derive(clap::Args, Debug)]
pub struct IdsArgs {
    /// Package identities
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    /// Package identities
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<String>,

    /// Do not ask for confirmation when other packages would break
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Prune empty directories under this folder afterwards
    #[arg(long, value_name = "DIR")]
    pub clean: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct DirArgs {
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = RealRuntime;

    match cli.command {
        Commands::List => {
            let config = Config::new(&runtime, cli.database)?;
            commands::list(runtime, config)?
        }
        Commands::Add(args) => {
            let config = Config::new(&runtime, cli.database)?;
            commands::add(runtime, &args.manifest, args.force, config)?
        }
        Commands::Check(args) => {
            let config = Config::new(&runtime, cli.database)?;
            commands::check(runtime, &args.manifest, config)?
        }
        Commands::Impact(args) => {
            let config = Config::new(&runtime, cli.database)?;
            commands::impact(runtime, args.ids, config)?
        }
        Commands::Remove(args) => {
            let config = Config::new(&runtime, cli.database)?;
            commands::remove(runtime, args.ids, args.yes, args.clean, config)?
        }
        Commands::Classify(args) => commands::classify(runtime, &args.dir)?,
        Commands::Clean(args) => commands::clean(runtime, &args.dir)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_check_parsing() {
        let cli = Cli::try_parse_from(["railpkg", "check", "pkg.json"]).unwrap();
        match cli.command {
            Commands::Check(args) => assert_eq!(args.manifest, PathBuf::from("pkg.json")),
            _ => panic!("Expected Check command"),
        }
        assert_eq!(cli.database, None);
    }

    #[test]
    fn test_cli_global_database_parsing() {
        let cli = Cli::try_parse_from(["railpkg", "--database", "/tmp/db.json", "list"]).unwrap();
        assert_eq!(cli.database, Some(PathBuf::from("/tmp/db.json")));

        let cli = Cli::try_parse_from(["railpkg", "list", "-d", "/tmp/db.json"]).unwrap();
        assert_eq!(cli.database, Some(PathBuf::from("/tmp/db.json")));
    }

    #[test]
    fn test_cli_remove_parsing() {
        let cli =
            Cli::try_parse_from(["railpkg", "remove", "a", "b", "-y", "--clean", "/games"]).unwrap();
        match cli.command {
            Commands::Remove(args) => {
                assert_eq!(args.ids, vec!["a", "b"]);
                assert!(args.yes);
                assert_eq!(args.clean, Some(PathBuf::from("/games")));
            }
            _ => panic!("Expected Remove command"),
        }
    }

    #[test]
    fn test_cli_impact_requires_ids() {
        assert!(Cli::try_parse_from(["railpkg", "impact"]).is_err());
    }

    #[test]
    fn test_cli_no_subcommand_fails() {
        assert!(Cli::try_parse_from(["railpkg"]).is_err());
    }
}
