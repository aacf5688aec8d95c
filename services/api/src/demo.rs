use crate::infra::{sample_catalog, StaticCatalogProvider};
use clap::Args;
use directory_hub::catalog::{CatalogProvider, Directory};
use directory_hub::config::AppConfig;
use directory_hub::error::AppError;
use directory_hub::featured::{build_subcategory_filter_nav, segment_featured_listings};
use directory_hub::routing::{resolve_request, Disposition, REDIRECT_STATUS};
use serde_json::json;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct RouteResolveArgs {
    /// Catalog JSON file (defaults to the built-in sample catalog)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Inbound Host header value
    #[arg(long)]
    pub(crate) hostname: String,
    /// Inbound request path (leading slash)
    #[arg(long)]
    pub(crate) path: String,
    /// Raw query string, without the leading '?'
    #[arg(long)]
    pub(crate) query: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct FeaturedArgs {
    /// Catalog JSON file (defaults to the built-in sample catalog)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Directory slug to segment
    #[arg(long)]
    pub(crate) slug: String,
    /// Also print the subcategory filter navigation
    #[arg(long)]
    pub(crate) subcategories: bool,
}

pub(crate) fn run_route_resolve(args: RouteResolveArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let directories = load_catalog(args.catalog)?;

    let disposition = resolve_request(
        &directories,
        &config.routing,
        &args.hostname,
        &args.path,
        args.query.as_deref(),
    );

    let payload = match disposition {
        Disposition::PassThrough => json!({ "disposition": "pass_through" }),
        Disposition::Rewrite { path } => json!({ "disposition": "rewrite", "path": path }),
        Disposition::Redirect { location } => json!({
            "disposition": "redirect",
            "location": location,
            "status": REDIRECT_STATUS,
        }),
    };
    println!("{}", serde_json::to_string_pretty(&payload).unwrap_or_default());
    Ok(())
}

pub(crate) fn run_featured_preview(args: FeaturedArgs) -> Result<(), AppError> {
    let directories = load_catalog(args.catalog)?;
    let Some(directory) = directory_hub::catalog::find_directory_by_slug(&directories, &args.slug)
    else {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "error": format!("unknown directory '{}'", args.slug),
            }))
            .unwrap_or_default()
        );
        return Ok(());
    };

    let mut payload = json!({
        "directory": directory.slug,
        "featured": segment_featured_listings(directory),
    });
    if args.subcategories {
        payload["subcategories"] = json!(build_subcategory_filter_nav(directory, None));
    }
    println!("{}", serde_json::to_string_pretty(&payload).unwrap_or_default());
    Ok(())
}

fn load_catalog(path: Option<PathBuf>) -> Result<Vec<Directory>, AppError> {
    let provider = match path {
        Some(path) => StaticCatalogProvider::from_file(&path)?,
        None => StaticCatalogProvider::new(sample_catalog()),
    };
    Ok(provider.fetch_directory_catalog()?)
}
