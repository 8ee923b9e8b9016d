use clap::{Parser, Subcommand};
use clap_complete::Shell;

const EXAMPLES: &str = "\
Examples:
  mixtura add micro git                    resolve each name across providers
  mixtura add flatpak#Spotify,Discord      comma list on one provider
  mixtura add nixpkgs#vim flatpak#equibop  mixed providers in one call
  mixtura search \"web browser\" flatpak#spotify
  mixtura upgrade                          upgrade everything everywhere
  mixtura upgrade flatpak                  upgrade one provider
  mixtura gc nixpkgs                       garbage collect the Nix store";

#[derive(Parser, Debug)]
#[command(
    name = "mixtura",
    about = "Mixed together. Running everywhere.",
    long_about = "One package vocabulary over Nix, Flatpak and Homebrew",
    version,
    after_help = EXAMPLES,
    arg_required_else_help = true,
    term_width = 80
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalFlags {
    /// Show backend command lines and their output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Only print results and errors
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Never prompt; pick exact-name matches, skip anything still ambiguous
    #[arg(short = 'y', long = "yes", global = true)]
    pub yes: bool,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install packages ([provider#]name)
    #[command(visible_alias = "install")]
    Add {
        /// Packages to install, e.g. git, flatpak#Spotify, nixpkgs#vim,micro
        #[arg(value_name = "SPEC", required = true)]
        packages: Vec<String>,
    },

    /// Remove installed packages ([provider#]name)
    #[command(visible_alias = "rm")]
    Remove {
        /// Packages to remove
        #[arg(value_name = "SPEC", required = true)]
        packages: Vec<String>,
    },

    /// Upgrade everything, whole providers, or single packages
    Upgrade {
        /// Provider names and/or package specifiers (empty = every provider)
        #[arg(value_name = "PROVIDER|SPEC")]
        targets: Vec<String>,
    },

    /// Search providers for packages
    Search {
        /// Queries; `provider#query` searches only that provider
        #[arg(value_name = "QUERY", required = true)]
        queries: Vec<String>,

        /// Results shown per provider (0 = all)
        #[arg(short = 'l', long, value_name = "N")]
        limit: Option<usize>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// List installed packages
    #[command(visible_alias = "ls")]
    List {
        /// Only this provider
        provider: Option<String>,
    },

    /// Show registered providers and whether their backend is installed
    Providers,

    /// Garbage collect backends that support it (nixpkgs: `nix store gc`)
    Gc {
        /// Only this provider
        provider: Option<String>,
    },

    /// Generate shell completions
    #[command(hide = true)]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
