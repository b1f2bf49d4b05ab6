use clap::{Parser, Subcommand, ValueEnum};
use leafpress::config::{self, Settings};
use leafpress::output;
use leafpress::scaffold::{self, Author};
use leafpress::site::Site;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Info,
    Debug,
}

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

#[derive(Parser)]
#[command(name = "leafpress")]
#[command(about = "Static site generator for directories of markup files")]
#[command(long_about = "\
Static site generator for directories of markup files

Every file with a known markup extension becomes a page; everything else is
copied along with the nearest page that lives above it.

Project structure:

  project/
  ├── _lib/config.toml        # Settings (optional)
  ├── _templates/             # Named templates (default.html built in)
  ├── index.md                # → index.html
  ├── loose.png               # Root static file → copied to output root
  └── blog/
      ├── first-post.md       # → blog/first-post.html
      ├── diagram.svg         # Copied next to first-post.html
      └── img/photo.jpg       # Static-only dir → belongs to blog/

Pages start with `key: value` headers, ended by the first other line:

  title: First post
  date: 2024-03-01
  tags: rust, web
  status: live | hidden | draft
  template: post.html | self
  url: default | pretty | <rule> | <literal path>

Drafts and pages dated in the future are not built.

Run 'leafpress init' to start a project, or 'leafpress gen-config' to print a
documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Log level; RUST_LOG takes precedence when set
    #[arg(long, value_enum, default_value = "info", global = true)]
    logging: LogLevel,

    #[command(subcommand)]
    command: Command,
}

/// Shared arguments for commands that read a project.
#[derive(clap::Args)]
struct ProjectArgs {
    /// Project directory
    #[arg(default_value = ".")]
    project: PathBuf,

    /// Output directory (default: <project>/_output)
    #[arg(long)]
    output: Option<PathBuf>,

    /// strftime format for `date:` and `updated:` headers
    #[arg(long)]
    date_format: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline: discover → parse → render → copy statics
    Build(ProjectArgs),
    /// List the pages a build would write, without writing anything
    Check {
        #[command(flatten)]
        project: ProjectArgs,
        /// Print the pages as JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Create a starter project: config, default template and a first page
    #[command(alias = "quickstart")]
    Init {
        /// Project directory (created if missing)
        #[arg(default_value = ".")]
        project: PathBuf,
        /// Author name (default: login name)
        #[arg(long)]
        author: Option<String>,
        /// Author email (default: <login>@example.org)
        #[arg(long)]
        email: Option<String>,
        /// Website URL
        #[arg(long)]
        url: Option<String>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.logging.directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Build(args) => {
            let site = load_site(&args)?;
            info!(
                project = %site.settings().project_dir.display(),
                output = %site.settings().output_dir.display(),
                "building"
            );
            let report = site.build()?;
            output::print_build_report(&report);
        }
        Command::Check { project, json } => {
            let site = load_site(&project)?;
            let pages = site.check()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&pages.pages)?);
            } else {
                output::print_page_list(&pages);
            }
        }
        Command::Init {
            project,
            author,
            email,
            url,
        } => {
            let mut details = Author::for_login(&login_name());
            if let Some(name) = author {
                details.name = name;
            }
            if let Some(email) = email {
                details.email = email;
            }
            if let Some(url) = url {
                details.website_url = url;
            }
            let report = scaffold::quickstart(&project, &details)?;
            output::print_scaffold_report(&report);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Settings from the project's config file, with command-line overrides.
fn load_site(args: &ProjectArgs) -> Result<Site, Box<dyn std::error::Error>> {
    let mut settings = Settings::load(&args.project)?;
    if let Some(out) = &args.output {
        settings = settings.with_output_dir(std::path::absolute(out)?);
    }
    if let Some(format) = &args.date_format {
        settings = settings.with_date_format(format.clone());
    }
    Ok(Site::new(settings)?)
}

fn login_name() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "author".to_string())
}
