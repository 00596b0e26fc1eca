use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::Path;
use tracing_subscriber::EnvFilter;

// Import from pagetree-core (re-exported by the CLI library)
use pagetree::{
    default_output_path, open_source, resolve_config_path, user_config_path, DocumentProcessor,
    Outline, OutlineConfig, OutlineMode, OutlineReport, OutputFormat, PipelineTimer,
};

#[derive(Parser)]
#[command(name = "pagetree")]
#[command(about = "Turn extracted document text into paragraph outlines and mindmaps")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Show available config options and exit
    #[arg(long, global = true)]
    show_configs: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Split a document into paragraphs (flat) or a section tree (hierarchical)
    Upload {
        #[command(flatten)]
        common: CommonArgs,

        /// Outline mode: flat or hierarchical
        #[arg(short, long, default_value = "flat")]
        mode: OutlineMode,
    },
    /// Build a document -> paragraph -> summary mindmap
    Mindmap {
        #[command(flatten)]
        common: CommonArgs,

        /// Outline to reduce: flat, or hierarchical (needs container_policy: first_leaf)
        #[arg(short, long, default_value = "flat")]
        mode: OutlineMode,

        /// Root title (defaults to the input file name without extension)
        #[arg(short, long)]
        title: Option<String>,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Document to process: .xhtml/.html (Tika output) or form-feed separated text
    #[arg(short, long)]
    input: String,

    /// Path to custom config file (YAML format)
    #[arg(short, long)]
    config: Option<String>,

    /// Output file path (if not specified, auto-generated based on input)
    #[arg(short, long)]
    output: Option<String>,

    /// Output format: json or yaml
    #[arg(short = 'f', long, default_value = "json")]
    format: OutputFormat,

    /// Enable detailed profiling of all pipeline steps
    #[arg(long)]
    profile: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    println!("🌳 Pagetree Document Outliner");

    if cli.show_configs {
        show_help();
        return Ok(());
    }

    let Some(command) = cli.command else {
        show_help();
        return Ok(());
    };

    let (common, suffix) = match &command {
        Command::Upload { common, .. } => (common, "pagetree"),
        Command::Mindmap { common, .. } => (common, "mindmap"),
    };

    // Check if input file exists
    if !Path::new(&common.input).exists() {
        println!("⚠️  Input document not found at: {}", common.input);
        println!("   Please check the file path.");
        return Ok(());
    }

    let config_path = resolve_config_path(common.config.as_deref());
    tracing::debug!(config = ?config_path, "resolved config path");
    let config = load_config(config_path.as_deref())?;
    let processor = DocumentProcessor::with_config(config)?;

    println!("📄 Processing: {}", common.input);
    let source = open_source(Path::new(&common.input))
        .with_context(|| format!("Failed to open {}", common.input))?;
    println!("📑 Pages: {}", source.page_count());

    let mut timer = PipelineTimer::new(common.profile);
    let result = match &command {
        Command::Upload { mode, .. } => {
            processor.upload_report(source.as_ref(), *mode, &mut timer)
        }
        Command::Mindmap { mode, title, .. } => {
            processor.mindmap_report(source.as_ref(), *mode, title.as_deref(), &mut timer)
        }
    };
    print_timings(&timer);

    match result {
        Ok(report) => {
            println!("✅ Successfully processed document");
            print_metrics(&report);

            let output_path = common.output.clone().unwrap_or_else(|| {
                default_output_path(
                    Path::new(&common.input),
                    common.config.as_deref().map(Path::new),
                    suffix,
                    common.format,
                )
            });
            report.save_with_format(&output_path, common.format)?;
            println!("💾 Results saved to: {}", output_path);
        }
        Err(e) => {
            eprintln!("❌ Processing failed: {e:#}");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// A config the user asked for must load; the per-user file only falls back
/// to defaults when it is broken.
fn load_config(path: Option<&Path>) -> Result<OutlineConfig> {
    let Some(path) = path else {
        println!("📋 Using default config");
        return Ok(OutlineConfig::default());
    };

    let path_str = path.to_str().context("Config path is not valid UTF-8")?;
    let is_user_default = user_config_path().as_deref() == Some(path);
    if is_user_default {
        println!("📋 Loaded config from: {}", path.display());
        Ok(OutlineConfig::load_with_fallback(Some(path_str)))
    } else {
        let config = OutlineConfig::load_from_file(path_str)
            .with_context(|| format!("Failed to load config {}", path.display()))?;
        println!("📋 Loaded config from: {}", path.display());
        Ok(config)
    }
}

fn print_timings(timer: &PipelineTimer) {
    if timer.steps().is_empty() {
        return;
    }

    println!("\n📊 Performance Summary:");
    for timing in timer.steps() {
        println!(
            "   {:.<35} {:.0}ms ({:.1}%)",
            timing.step,
            timing.elapsed.as_millis(),
            timer.percent_of_total(timing)
        );
    }
    println!("   {:.<35} {:.0}ms", "Total", timer.total().as_millis());
}

fn print_metrics(report: &OutlineReport) {
    println!("📊 Outline metrics:");
    println!("   - Pages: {}", report.source.page_count);
    match &report.outline {
        Outline::Paragraphs(paragraphs) => {
            let nodes: usize = paragraphs.iter().map(|p| p.node_count()).sum();
            println!("   - Top-level nodes: {}", paragraphs.len());
            println!("   - Total nodes: {}", nodes);
        }
        Outline::Mindmap(root) => {
            println!("   - Sections: {}", root.children.len());
            println!("   - Depth: {}", root.depth());
        }
    }
}

fn show_help() {
    println!("\n📋 Available Configuration Options:");
    println!("  --config <path>         Load custom config file");
    println!("  --input <path>          Document to process");
    println!("  --output <path>         Output file path (auto-generated if not specified)");
    println!("  --format <fmt>          Output format: json or yaml");
    println!("  --mode <mode>           flat or hierarchical (mindmap over hierarchical needs");
    println!("                          mindmap.container_policy: first_leaf)");
    println!("  --title <title>         mindmap only: root title");
    println!("  --profile               Print per-step timings");

    println!("\n📄 Input Formats:");
    println!("  .xhtml / .html  - Tika XHTML, one <div class=\"page\"> per page");
    println!("  anything else   - plain text, pages separated by form feeds (pdftotext)");

    println!("\n📁 Config lookup:");
    println!("  1. --config <path>");
    match user_config_path() {
        Some(path) => println!("  2. {}", path.display()),
        None => println!("  2. <config dir>/pagetree/config.yaml"),
    }
    println!("  3. built-in defaults");

    if let Ok(yaml) = OutlineConfig::default().to_yaml() {
        println!("\n🔧 Default config:");
        for line in yaml.lines() {
            println!("  {line}");
        }
    }

    println!("\n📝 Usage Examples:");
    println!("  pagetree upload -i book.txt");
    println!("  pagetree upload -i book.xhtml --mode hierarchical -f yaml");
    println!("  pagetree mindmap -i book.txt -t \"Soil Science\" -o mindmap.json");
    println!("  pagetree mindmap -i book.txt --mode hierarchical -c first_leaf.yaml");
}
