use booksite::{check, config, export, nav, output, scan};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "booksite")]
#[command(about = "Site config and sidebar outline for the Effective TypeScript book")]
#[command(long_about = "\
Site config and sidebar outline for the Effective TypeScript book

Builds the configuration a static documentation engine renders the book
with, and checks that every sidebar link lands on a real document.

Project structure:

  ./
  ├── site.toml                    # Overrides for the stock config (optional)
  └── docs/                        # src_dir
      ├── index.md                 # Home page (excluded from the sidebar)
      ├── ch-intro/
      │   ├── ts-vs-js.md          # Item 1
      │   └── ...
      └── ch-migrate/
          └── ...

Sidebar labels are \"Item N: <title>\" with N running 1..83 across all
chapters. Links are clean paths: /ch-intro/ts-vs-js → docs/ch-intro/ts-vs-js.md.

Run 'booksite gen-config' to generate a documented site.toml.")]
#[command(version)]
struct Cli {
    /// Project root containing site.toml and the content directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Config file to use instead of <root>/site.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check sidebar and nav links against the content directory
    Check,
    /// Print the resolved sidebar tree
    Sidebar,
    /// Print the previous and next pages around a link
    Neighbors {
        /// Sidebar link or document path, e.g. /ch-intro/ts-vs-js
        link: String,
    },
    /// List the documents found in the content directory
    Scan,
    /// Write the engine-facing config as JSON
    Export {
        /// Output file (stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the "edit this page" URL for a document
    EditUrl {
        /// Document path relative to the content directory
        path: String,
    },
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Check => {
            let site = load(&cli.root, cli.config.as_deref())?;
            let src = site.src_path(&cli.root);
            println!("==> Checking {}", src.display());
            let content = scan::scan(&src)?;
            let report = check::check(&site, &content);
            output::print_check_report(&report);
            if report.has_errors() {
                std::process::exit(1);
            }
            println!("==> Links are valid");
        }
        Command::Sidebar => {
            let site = load(&cli.root, cli.config.as_deref())?;
            output::print_sidebar(&site.sidebar());
        }
        Command::Neighbors { link } => {
            let site = load(&cli.root, cli.config.as_deref())?;
            let sidebar = site.sidebar();
            let neighbors = nav::neighbors(&sidebar, &link)
                .ok_or_else(|| format!("no sidebar page links to {link}"))?;
            let footer = &site.theme.doc_footer;
            output::print_neighbors(&neighbors, &footer.prev, &footer.next);
        }
        Command::Scan => {
            let site = load(&cli.root, cli.config.as_deref())?;
            let content = scan::scan(&site.src_path(&cli.root))?;
            output::print_scan_output(&content);
        }
        Command::Export { output: path } => {
            let site = load(&cli.root, cli.config.as_deref())?;
            match path {
                Some(path) => {
                    export::write_json(&site, &path)?;
                    println!("==> Wrote {}", path.display());
                }
                None => println!("{}", export::to_json(&site)?),
            }
        }
        Command::EditUrl { path } => {
            let site = load(&cli.root, cli.config.as_deref())?;
            let edit_link = site
                .theme
                .edit_link
                .as_ref()
                .ok_or("theme.edit_link is not configured")?;
            println!("{}", edit_link.url_for(&path));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load `--config` when given, otherwise `<root>/site.toml`.
fn load(root: &Path, config_path: Option<&Path>) -> Result<config::SiteConfig, config::ConfigError> {
    match config_path {
        Some(path) => config::load_config_file(path),
        None => config::load_config(root),
    }
}
