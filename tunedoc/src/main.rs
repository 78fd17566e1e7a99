//! tunedoc - tuning guide content tool
//!
//! A CLI for ingesting tuning guide drafts into structured block
//! documents and rendering them as HTML reading pages.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;

use tunedoc::cli::{Cli, Commands};
use tunedoc::html_renderer;
use tunedoc::ingest;
use tunedoc::sections::{find_section, split_into_sections};
use tunedoc::site_config::SiteConfig;
use tunedoc::store::GuideStore;
use tunedoc::view_model::build_view_model;

/// Exit code for the distinct "not found" outcome, as opposed to a failure
const EXIT_NOT_FOUND: i32 = 2;

/// Main entry point for the tunedoc CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ingest {
            request,
            store,
            site,
            verbose,
        } => {
            init_logging(verbose);
            handle_ingest_command(&request, &store, site.as_deref())?;
        }

        Commands::Show { id, store, site } => {
            handle_show_command(&id, &store, site.as_deref())?;
        }

        Commands::List { store } => {
            handle_list_command(&store)?;
        }

        Commands::Render {
            id,
            section,
            output,
            store,
            site,
            verbose,
        } => {
            init_logging(verbose);
            handle_render_command(&id, section.as_deref(), &output, &store, site.as_deref())?;
        }
    }

    Ok(())
}

/// Initialize logging when verbose output is requested
fn init_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}

/// Handle the ingest command
fn handle_ingest_command(request_path: &Path, store_path: &Path, site: Option<&Path>) -> Result<()> {
    println!("Ingesting guide...");
    println!("Request: {}", request_path.display());
    println!("Store: {}", store_path.display());

    // display-name tables are validated up front so a broken site.toml
    // fails before anything is written
    let _config = load_site_config(site)?;

    let payload = std::fs::read_to_string(request_path)
        .with_context(|| format!("Failed to read request file {}", request_path.display()))?;
    let request = ingest::parse_request(&payload)
        .with_context(|| format!("Failed to parse request file {}", request_path.display()))?;

    println!("\n[Stage 1/3] Validating request...");
    let valid = ingest::validate(request).context("Request validation failed")?;
    println!("✓ {} ({} / {})", valid.title, valid.level_id, valid.category_id);

    println!("\n[Stage 2/3] Transforming content...");
    let guide = ingest::build_guide(valid).context("Failed to transform content")?;
    println!("✓ {} blocks", guide.blocks.len());

    println!("\n[Stage 3/3] Saving guide...");
    let store = GuideStore::open(store_path)
        .with_context(|| format!("Failed to open store at {}", store_path.display()))?;
    store.save(&guide).context("Failed to save guide")?;
    println!("✓ Saved: {}", guide.id);

    Ok(())
}

/// Handle the show command
fn handle_show_command(id: &str, store_path: &Path, site: Option<&Path>) -> Result<()> {
    let config = load_site_config(site)?;
    let store = GuideStore::open(store_path)
        .with_context(|| format!("Failed to open store at {}", store_path.display()))?;

    let Some(guide) = store.load(id).context("Failed to load guide")? else {
        println!("Guide not found: {}", id);
        std::process::exit(EXIT_NOT_FOUND);
    };

    let view = build_view_model(&guide, &guide.blocks, &config);

    println!("{} [{}]", guide.title, guide.id);
    println!(
        "{} · {} · {} min read · {}",
        view.level_name, view.category_name, view.estimated_read_time, guide.status
    );
    if let Some(summary) = &guide.summary {
        println!("{}", summary);
    }

    if !view.toc.is_empty() {
        println!("\nContents:");
        for item in &view.toc {
            let indent = "  ".repeat(item.level.saturating_sub(1) as usize);
            println!("  {}{} (#{})", indent, item.title, item.id);
        }
    }

    let sections = split_into_sections(&guide.blocks, &config.labels.intro_title);
    println!("\nSections:");
    for section in &sections {
        println!(
            "  {} - {} ({} blocks)",
            section.id,
            section.title,
            section.blocks.len()
        );
    }

    Ok(())
}

/// Handle the list command
fn handle_list_command(store_path: &Path) -> Result<()> {
    let store = GuideStore::open(store_path)
        .with_context(|| format!("Failed to open store at {}", store_path.display()))?;
    let guides = store.list().context("Failed to list guides")?;

    if guides.is_empty() {
        println!("No guides stored in {}", store_path.display());
        return Ok(());
    }

    for guide in &guides {
        println!(
            "{} - {} [{}] ({} blocks)",
            guide.id,
            guide.title,
            guide.status,
            guide.blocks.len()
        );
    }

    Ok(())
}

/// Handle the render command
fn handle_render_command(
    id: &str,
    section_id: Option<&str>,
    output: &Path,
    store_path: &Path,
    site: Option<&Path>,
) -> Result<()> {
    let config = load_site_config(site)?;
    let store = GuideStore::open(store_path)
        .with_context(|| format!("Failed to open store at {}", store_path.display()))?;

    let Some(guide) = store.load(id).context("Failed to load guide")? else {
        println!("Guide not found: {}", id);
        std::process::exit(EXIT_NOT_FOUND);
    };

    let html = match section_id {
        None => {
            let view = build_view_model(&guide, &guide.blocks, &config);
            html_renderer::render_guide_page(&view)
        }
        Some(section_id) => {
            let sections = split_into_sections(&guide.blocks, &config.labels.intro_title);
            let Some((index, section)) = find_section(&sections, section_id) else {
                println!("Section not found: {}/{}", id, section_id);
                std::process::exit(EXIT_NOT_FOUND);
            };

            let view = build_view_model(&guide, section.blocks, &config);
            let prev = index.checked_sub(1).and_then(|i| sections.get(i));
            let next = sections.get(index + 1);
            html_renderer::render_section_page(&view, section, prev, next)
        }
    };

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(output, html)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("✓ Successfully wrote: {}", output.display());
    Ok(())
}

/// Load site configuration, falling back to the built-in defaults
fn load_site_config(site: Option<&Path>) -> Result<SiteConfig> {
    match site {
        Some(path) => SiteConfig::load(path)
            .with_context(|| format!("Failed to load site config from {}", path.display())),
        None => Ok(SiteConfig::default()),
    }
}
