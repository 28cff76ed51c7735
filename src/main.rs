use clap::{Parser, Subcommand};
use env_logger::Env;
use hokage_site::assemble::{self, BuildPaths, BuildReport};
use hokage_site::collect::DocumentError;
use hokage_site::markdown::PulldownRenderer;
use hokage_site::types::Collection;
use hokage_site::{collect, config, output, stats};
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit status once a batch has finished: 1 when any document was skipped.
fn batch_status(failures: &[DocumentError]) -> u8 {
    if failures.is_empty() { 0 } else { 1 }
}

fn build_status(report: &BuildReport) -> u8 {
    batch_status(&report.failures)
}

#[derive(Parser)]
#[command(name = "hokage-site")]
#[command(about = "Static site builder for the NPO Hokage website")]
#[command(long_about = "\
Static site builder for the NPO Hokage website

Markdown documents become HTML pages sharing one layout. Each run wipes the
output directory and rebuilds it.

Content structure:

  website/
  ├── content/
  │   ├── config.toml             # Site config (optional)
  │   ├── services/               # Service pages → dist/work/{slug}.html
  │   │   └── homepage.md
  │   └── pages/                  # Standalone pages → dist/{slug}.html (optional)
  │       └── about.md
  └── public/
      └── images/                 # Copied verbatim → dist/images/
          └── services/homepage.jpg

Front matter (optional, between --- lines):
  title:          page title (default: Service / Page)
  slug:           output file name (default: file name without .md)
  imagePosition:  CSS object-position of the hero image (default: center center)

Run 'hokage-site gen-config' to print a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory holding services/ and pages/
    #[arg(long, default_value = "website/content", global = true)]
    content: PathBuf,

    /// Output directory (wiped on every build)
    #[arg(long, default_value = "website/dist", global = true)]
    output: PathBuf,

    /// Public directory whose images/ is copied into the output
    #[arg(long, default_value = "website/public", global = true)]
    public: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Build the whole site (the default)
    Build,
    /// Collect and render every document without writing anything
    Check {
        /// Print page descriptors as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print body character counts of service documents as CSV
    Stats,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let paths = BuildPaths {
        content_dir: cli.content,
        output_dir: cli.output,
        public_dir: cli.public,
    };

    match cli.command.unwrap_or(Command::Build) {
        Command::Build => {
            let site_config = config::load_config(&paths.content_dir)?;
            let report = assemble::build(&site_config, &paths, |event| {
                output::print_build_event(&event)
            })?;
            output::print_build_summary(&report, &paths.output_dir);
            return Ok(ExitCode::from(build_status(&report)));
        }
        Command::Check { json } => {
            let site_config = config::load_config(&paths.content_dir)?;
            let renderer = PulldownRenderer;
            let mut checked = collect::collect(
                &paths.services_dir(),
                Collection::Service,
                &site_config,
                &renderer,
            )?;
            match collect::collect(&paths.pages_dir(), Collection::Page, &site_config, &renderer)
            {
                Ok(pages) => {
                    checked.pages.extend(pages.pages);
                    checked.failures.extend(pages.failures);
                }
                Err(err) => log::warn!("continuing without standalone pages: {err}"),
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&checked.pages)?);
            } else {
                output::print_check_output(&checked.pages);
            }
            for failure in &checked.failures {
                eprintln!("! {failure}");
            }
            return Ok(ExitCode::from(batch_status(&checked.failures)));
        }
        Command::Stats => {
            let counts = stats::collect_stats(&paths.services_dir())?;
            output::print_stats_csv(&counts);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(ExitCode::SUCCESS)
}
