//! packscan CLI - wishlist image block and catalog extraction tool

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use packscan::{
    ImageExt, JsonFormat, LayoutConfig, LayoutMode, PassConfig, PassRegistry, PassReport, RepeatPolicy,
    ResolveOptions, ScanOptions,
};

#[derive(Parser)]
#[command(name = "packscan")]
#[command(version)]
#[command(about = "Extract wishlist image blocks and catalog structure to JSON", long_about = None)]
struct Cli {
    /// Directory holding the export (inputs and outputs are relative to it)
    #[arg(long, global = true, env = "PACKSCAN_ROOT", default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Map image identifiers to the extension found on disk
    #[command(alias = "ext")]
    Extensions {
        /// Image directory
        #[arg(long, value_name = "DIR", default_value = "images")]
        images_dir: PathBuf,

        #[command(flatten)]
        probe: ProbeArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Group images under the numbered block markers in the markup
    Blocks {
        /// Markup document
        #[arg(short, long, value_name = "FILE", default_value = "wishlistpacks.html")]
        input: PathBuf,

        #[command(flatten)]
        scan: ScanArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Slice the markup's images into the catalog layout
    Structure {
        /// Markup document
        #[arg(short, long, value_name = "FILE", default_value = "wishlistpacks.html")]
        input: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Convert the ordered identifier list to a JSON array
    Index {
        /// Newline-delimited identifier list
        #[arg(short, long, value_name = "FILE", default_value = "original_order.txt")]
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Run every pass with default file names
    All {
        #[command(flatten)]
        probe: ProbeArgs,

        #[command(flatten)]
        scan: ScanArgs,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// List available passes
    Passes,

    /// Show version information
    Version,
}

#[derive(Args)]
struct ProbeArgs {
    /// Number of identifiers to probe (image1..imageN)
    #[arg(long, default_value = "205")]
    count: u32,

    /// Identifier prefix
    #[arg(long, default_value = "image")]
    prefix: String,

    /// Extensions to probe, in order of preference
    #[arg(long, value_delimiter = ',', default_value = "jpg,png", value_parser = parse_ext)]
    extensions: Vec<ImageExt>,

    /// Check file magic bytes against the extension
    #[arg(long)]
    verify: bool,
}

fn parse_ext(s: &str) -> Result<ImageExt, String> {
    ImageExt::from_suffix(s).ok_or_else(|| format!("unsupported image extension '{}'", s))
}

#[derive(Args)]
struct ScanArgs {
    /// Merge blocks whose label appears more than once instead of keeping the last
    #[arg(long)]
    merge_repeated: bool,
}

#[derive(Args)]
struct LayoutArgs {
    /// Layout table (JSON); the built-in wishlist layout is used if omitted
    #[arg(long, value_name = "FILE")]
    layout: Option<PathBuf>,

    /// Truncate out-of-range slices instead of failing
    #[arg(long)]
    lenient: bool,
}

#[derive(Args)]
struct OutputArgs {
    /// Output file (relative to the root)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print JSON to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,
}

impl ProbeArgs {
    fn apply(&self, options: ResolveOptions) -> ResolveOptions {
        options
            .with_count(self.count)
            .with_prefix(self.prefix.clone())
            .with_extensions(self.extensions.clone())
            .with_verify_content(self.verify)
    }
}

impl ScanArgs {
    fn options(&self) -> ScanOptions {
        let policy = if self.merge_repeated {
            RepeatPolicy::Merge
        } else {
            RepeatPolicy::Reset
        };
        ScanOptions::new().with_repeat_policy(policy)
    }
}

impl LayoutArgs {
    fn apply(&self, config: PassConfig) -> Result<PassConfig, Box<dyn std::error::Error>> {
        let mode = if self.lenient {
            LayoutMode::Lenient
        } else {
            LayoutMode::Strict
        };
        let mut config = config.with_layout_mode(mode);
        if let Some(ref path) = self.layout {
            let layout = LayoutConfig::from_file(config.resolve_path(path))?;
            config = config.with_layout(layout);
        }
        Ok(config)
    }
}

impl OutputArgs {
    fn apply(&self, pass: &str, config: PassConfig) -> PassConfig {
        let mut config = config
            .with_json_format(json_format(self.compact))
            .with_write_output(!self.stdout);
        if let Some(ref path) = self.output {
            config = config.with_output(pass, path);
        }
        config
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let root = cli.root;
    log::debug!("Export root: {}", root.display());

    let result = match cli.command {
        Some(Commands::Extensions {
            images_dir,
            probe,
            output,
        }) => cmd_extensions(&root, images_dir, &probe, &output),
        Some(Commands::Blocks {
            input,
            scan,
            output,
        }) => cmd_blocks(&root, input, &scan, &output),
        Some(Commands::Structure {
            input,
            layout,
            output,
        }) => cmd_structure(&root, input, &layout, &output),
        Some(Commands::Index { input, output }) => cmd_index(&root, input, &output),
        Some(Commands::All {
            probe,
            scan,
            layout,
            compact,
        }) => cmd_all(&root, &probe, &scan, &layout, compact),
        Some(Commands::Passes) => {
            cmd_passes();
            Ok(())
        }
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: packscan <COMMAND>".yellow());
            println!("       packscan --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_extensions(
    root: &Path,
    images_dir: PathBuf,
    probe: &ProbeArgs,
    output: &OutputArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let resolve = probe.apply(ResolveOptions::new().with_images_dir(images_dir));
    let config = PassConfig::new()
        .with_root(root)
        .with_resolve_options(resolve);
    run_one("extensions", output.apply("extensions", config), output.stdout)
}

fn cmd_blocks(
    root: &Path,
    input: PathBuf,
    scan: &ScanArgs,
    output: &OutputArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = PassConfig::new()
        .with_root(root)
        .with_html(input)
        .with_scan_options(scan.options());
    run_one("blocks", output.apply("blocks", config), output.stdout)
}

fn cmd_structure(
    root: &Path,
    input: PathBuf,
    layout: &LayoutArgs,
    output: &OutputArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = PassConfig::new().with_root(root).with_html(input);
    let config = layout.apply(config)?;
    run_one("structure", output.apply("structure", config), output.stdout)
}

fn cmd_index(
    root: &Path,
    input: PathBuf,
    output: &OutputArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = PassConfig::new().with_root(root).with_order_list(input);
    run_one("index", output.apply("index", config), output.stdout)
}

fn cmd_all(
    root: &Path,
    probe: &ProbeArgs,
    scan: &ScanArgs,
    layout: &LayoutArgs,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = PassConfig::new()
        .with_root(root)
        .with_resolve_options(probe.apply(ResolveOptions::new()))
        .with_scan_options(scan.options())
        .with_json_format(json_format(compact));
    let config = layout.apply(config)?;

    let registry = PassRegistry::with_defaults();
    let names = registry.names();

    let pb = ProgressBar::new(names.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    let mut reports = Vec::with_capacity(names.len());
    for name in names {
        pb.set_message(format!("Running {}...", name));
        reports.push(registry.run(name, &config)?);
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    println!();
    for report in &reports {
        print_report(report);
    }

    println!("{}", "Output files:".green().bold());
    let last = reports.len().saturating_sub(1);
    for (i, report) in reports.iter().enumerate() {
        if let Some(ref path) = report.output {
            let branch = if i == last { "└─" } else { "├─" };
            println!("  {} {}", branch.dimmed(), path.display());
        }
    }

    Ok(())
}

fn run_one(
    name: &str,
    config: PassConfig,
    to_stdout: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let registry = PassRegistry::with_defaults();
    let report = registry.run(name, &config)?;

    if to_stdout {
        for warning in &report.warnings {
            eprintln!("{} {}", "Warning:".yellow(), warning);
        }
        println!("{}", report.json);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &PassReport) {
    println!("{}", report.pass.cyan().bold());
    for warning in &report.warnings {
        println!("  {} {}", "Warning:".yellow(), warning);
    }
    for line in &report.details {
        println!("  {}", line);
    }
    if let Some(ref path) = report.output {
        println!("  {} {}", "Saved to".green(), path.display());
    }
    println!();
}

fn cmd_passes() {
    let registry = PassRegistry::with_defaults();
    println!("{}", "Available passes".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for name in registry.names() {
        if let Some(pass) = registry.get(name) {
            println!(
                "{:<12} {} {}",
                name.bold(),
                pass.description(),
                format!("-> {}", pass.default_output()).dimmed()
            );
        }
    }
}

fn cmd_version() {
    println!("{} {}", "packscan".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Wishlist catalog extraction tool");
    println!();
    println!("License: MIT");
}
