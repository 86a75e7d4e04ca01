use clap::{Parser, Subcommand};
use simple_blog::{build, config, output, template};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "simple-blog")]
#[command(about = "Static site generator for dated blog posts")]
#[command(long_about = "\
Static site generator for dated blog posts

Your filesystem is the data source. Post directories are named for their
topic, post files are named for their publication date, and an index.md
makes a directory a generic page instead of a post.

Content structure:

  blog/
  ├── config.toml                  # Site config (optional)
  ├── assets/                      # Skipped during scan
  │   └── templates/
  │       ├── page.tpl             # Per-document template
  │       └── index.tpl            # Homepage template
  ├── articles/
  │   ├── first-post/
  │   │   └── 2024-01-10.md        # Post, dated by filename
  │   └── older-post/
  │       └── 2023-12-05.md
  └── notes/
      └── about-me/
          └── index.md             # Generic page (nav only, not homepage)

Each document renders to <group>/<subgroup>/index.html next to its source,
and the homepage (newest posts first) lands at the root as index.html.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Output directory (defaults to the content directory)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the whole site
    Build,
    /// Scan and classify content without building
    Scan {
        /// Emit the inventory as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate content and templates without writing output
    Check,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let output_root = cli.output.clone().unwrap_or_else(|| cli.source.clone());

    match cli.command {
        Command::Build => {
            let site = config::load_config(&cli.source)?;
            init_thread_pool(&site.build);
            let templates = template::Templates::load(&cli.source, &site.templates)?;

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    println!("{}", output::format_build_event(&event));
                }
            });
            let summary = build::build(&cli.source, &output_root, &site, &templates, Some(tx))?;
            printer.join().unwrap();
            output::print_build_summary(&summary);
        }
        Command::Scan { json } => {
            let site = config::load_config(&cli.source)?;
            let inventory = build::inventory(&cli.source, &site)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&inventory)?);
            } else {
                output::print_scan_output(&inventory);
            }
        }
        Command::Check => {
            let site = config::load_config(&cli.source)?;
            template::Templates::load(&cli.source, &site.templates)?;
            let inventory = build::inventory(&cli.source, &site)?;
            output::print_scan_output(&inventory);
            println!("==> Content is valid");
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool from build config.
///
/// Caps at the number of available CPU cores — user can constrain down,
/// not up.
fn init_thread_pool(build: &config::BuildConfig) {
    let threads = config::effective_threads(build);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
