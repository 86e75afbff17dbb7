//! notelayout CLI - OCR cache to interactive HTML layout

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use notelayout::{parse_document_dir, render, Document, NoteLayout};

#[derive(Parser)]
#[command(name = "notelayout")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Render handwritten-note OCR caches to interactive HTML", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble a cache directory into one interactive layout document
    Render {
        /// Directory holding page_<N>.json OCR cache files
        #[arg(value_name = "CACHE_DIR")]
        cache_dir: PathBuf,

        /// Output HTML file
        #[arg(short, long, value_name = "FILE", default_value = "layout.html")]
        output: PathBuf,

        /// Document title
        #[arg(long, default_value = "Note Layout")]
        title: String,

        /// Canvas width in pixels
        #[arg(long, default_value = "720")]
        width: f32,

        /// Canvas height in pixels
        #[arg(long, default_value = "960")]
        height: f32,

        /// Overlap ratio above which blocks are nudged apart
        #[arg(long, default_value = "0.25")]
        overlap_threshold: f32,

        /// Disable parallel page processing
        #[arg(long)]
        sequential: bool,
    },

    /// Export the link structure as a markdown outline
    Outline {
        /// Directory holding page_<N>.json OCR cache files
        #[arg(value_name = "CACHE_DIR")]
        cache_dir: PathBuf,

        /// Output markdown file
        #[arg(short, long, value_name = "FILE", default_value = "outline.md")]
        output: PathBuf,
    },

    /// Write per-page debug overlays and the OCR preview table
    Debug {
        /// Directory holding page_<N>.json OCR cache files
        #[arg(value_name = "CACHE_DIR")]
        cache_dir: PathBuf,

        /// Output directory for debug artifacts
        #[arg(short, long, value_name = "DIR", default_value = "debug")]
        output: PathBuf,
    },

    /// Show cache information (pages, blocks, links)
    Info {
        /// Directory holding page_<N>.json OCR cache files
        #[arg(value_name = "CACHE_DIR")]
        cache_dir: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render {
            cache_dir,
            output,
            title,
            width,
            height,
            overlap_threshold,
            sequential,
        } => cmd_render(RenderArgs {
            cache_dir,
            output,
            title,
            width,
            height,
            overlap_threshold,
            sequential,
        }),
        Commands::Outline { cache_dir, output } => cmd_outline(cache_dir, output),
        Commands::Debug { cache_dir, output } => cmd_debug(cache_dir, output),
        Commands::Info { cache_dir } => cmd_info(cache_dir),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

struct RenderArgs {
    cache_dir: PathBuf,
    output: PathBuf,
    title: String,
    width: f32,
    height: f32,
    overlap_threshold: f32,
    sequential: bool,
}

fn cmd_render(args: RenderArgs) -> notelayout::Result<()> {
    let mut builder = NoteLayout::new()
        .with_title(args.title)
        .with_canvas(args.width, args.height)
        .with_overlap_threshold(args.overlap_threshold);
    if args.sequential {
        builder = builder.sequential();
    }

    let result = builder.load_dir(&args.cache_dir)?;
    let pages = result.document().page_count();
    result.to_file(&args.output)?;

    println!(
        "{} {} page{} -> {}",
        "rendered".green().bold(),
        pages,
        if pages == 1 { "" } else { "s" },
        args.output.display()
    );
    Ok(())
}

fn cmd_outline(cache_dir: PathBuf, output: PathBuf) -> notelayout::Result<()> {
    let document = parse_document_dir(&cache_dir)?;
    render::render_outline_to_file(&document, &output)?;

    println!(
        "{} outline of {} page{} -> {}",
        "wrote".green().bold(),
        document.page_count(),
        if document.page_count() == 1 { "" } else { "s" },
        output.display()
    );
    Ok(())
}

fn cmd_debug(cache_dir: PathBuf, output: PathBuf) -> notelayout::Result<()> {
    let document = parse_document_dir(&cache_dir)?;

    let bar = ProgressBar::new(document.page_count() as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} {msg}")
            .expect("valid progress template"),
    );

    std::fs::create_dir_all(&output)?;
    let mut skipped = 0usize;
    for page in &document.pages {
        bar.set_message(format!("page {}", page.index));
        let out = output.join(format!("overlay_{}.png", page.index));
        // A page whose overlay fails is reported and skipped; the
        // remaining pages and the preview are still produced.
        match render::render_page_overlay(page, &out) {
            Ok(()) => {}
            Err(notelayout::Error::MissingSourceImage(_)) => {
                log::warn!("page {}: no source image, skipping overlay", page.index);
                skipped += 1;
            }
            Err(e) => {
                log::warn!("page {}: overlay failed ({e}), skipping", page.index);
                skipped += 1;
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    let preview = output.join("preview.html");
    render::write_preview_html(&document.pages, &preview)?;

    println!(
        "{} overlays for {} page{} ({} skipped) -> {}",
        "wrote".green().bold(),
        document.page_count(),
        if document.page_count() == 1 { "" } else { "s" },
        skipped,
        output.display()
    );
    Ok(())
}

fn cmd_info(cache_dir: PathBuf) -> notelayout::Result<()> {
    let document = parse_document_dir(&cache_dir)?;
    print_info(&document);

    if let Err(e) = document.validate_page_indices() {
        println!("{} {}", "warning:".yellow().bold(), e);
    }
    Ok(())
}

fn print_info(document: &Document) {
    println!("{}: {}", "pages".bold(), document.page_count());
    for page in &document.pages {
        let links: usize = page.blocks.iter().map(|b| b.links.len()).sum();
        let shapes = page.blocks.iter().filter(|b| b.shape.is_outline()).count();
        println!(
            "  page {:>3}: {:>3} blocks, {:>3} links, {:>3} shapes{}",
            page.index,
            page.block_count(),
            links,
            shapes,
            match &page.source_image {
                Some(p) => format!(", image {}", p.display()),
                None => String::new(),
            }
        );
    }
}
