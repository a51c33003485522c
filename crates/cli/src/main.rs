mod config;

use anyhow::{Context, Result, anyhow};
use card_pipeline::{CardData, CardView, CollapsedCards, PageSize, SortDirection};
use card_store::{FileStore, SharedStore};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use config::CardConfigFile;
use fleet_context::{ClusterInfo, GlobalFilterProvider, GlobalFilters, Selection};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Fleet Cards - filter, sort and page through dashboard card data
#[derive(Parser)]
#[command(name = "fleet-cards")]
#[command(about = "Card data-view pipeline for multi-cluster dashboards", long_about = None)]
struct Cli {
    /// JSON array of records shown by the card
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// JSON card configuration
    #[arg(short, long)]
    card: Option<PathBuf>,

    /// File holding persisted card state
    #[arg(short, long, default_value = ".fleet-cards/state.json")]
    store: PathBuf,

    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Dashboard-wide filters applied to every card
#[derive(Args)]
struct GlobalArgs {
    /// Restrict to a cluster (repeatable, none = all clusters)
    #[arg(long = "cluster", global = true)]
    clusters: Vec<String>,

    /// Restrict to a status (repeatable, none = all statuses)
    #[arg(long = "status", global = true)]
    statuses: Vec<String>,

    /// Global free-text query
    #[arg(long, global = true, default_value = "")]
    query: String,
}

impl GlobalArgs {
    fn to_filters(&self) -> GlobalFilters {
        GlobalFilters {
            clusters: Selection::only(self.clusters.iter().cloned()),
            statuses: Selection::only(self.statuses.iter().cloned()),
            search: self.query.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print one page of the card
    View {
        /// Card-local search text
        #[arg(long, default_value = "")]
        search: String,

        /// Sort field (defaults to the card's default sort)
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending
        #[arg(long, conflicts_with = "asc")]
        desc: bool,

        /// Sort ascending
        #[arg(long)]
        asc: bool,

        /// Page to show (clamped to the last page)
        #[arg(long, default_value = "1")]
        page: usize,

        /// Items per page, or "unlimited"
        #[arg(long)]
        page_size: Option<PageSize>,

        /// Print the view model as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a cluster to the card's local filter, or remove it
    ToggleCluster {
        /// Cluster name
        name: String,
    },

    /// Clear the card's local cluster filter
    ClearClusters,

    /// Collapse a card, or expand it if already collapsed
    Collapse {
        /// Card id (defaults to the --card config's id)
        card_id: Option<String>,
    },

    /// List clusters offered in the card's cluster dropdown
    Clusters {
        /// JSON array of clusters with name and reachability
        #[arg(long)]
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let store: SharedStore = Arc::new(
        FileStore::open(&cli.store)
            .with_context(|| format!("Failed to open state file {}", cli.store.display()))?,
    );
    let provider = GlobalFilterProvider::new(cli.global.to_filters());

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::View {
            search,
            sort,
            desc,
            asc,
            page,
            page_size,
            json,
        } => {
            let card = load_card(cli.card.as_deref())?;
            let records = load_records(cli.data.as_deref())?;
            let direction = if desc {
                Some(SortDirection::Desc)
            } else if asc {
                Some(SortDirection::Asc)
            } else {
                None
            };
            let request = ViewRequest {
                search,
                sort,
                direction,
                page,
                page_size,
            };
            handle_view(&card, &records, &provider, store, request, json)?
        }
        Commands::ToggleCluster { name } => {
            let card = load_card(cli.card.as_deref())?;
            handle_toggle_cluster(&card, &provider, store, &name)?
        }
        Commands::ClearClusters => {
            let card = load_card(cli.card.as_deref())?;
            handle_clear_clusters(&card, &provider, store)?
        }
        Commands::Collapse { card_id } => {
            let card_id = collapse_target(card_id, cli.card.as_deref())?;
            handle_collapse(store, &card_id)
        }
        Commands::Clusters { file } => {
            let card = cli.card.as_deref().map(CardConfigFile::load).transpose()?;
            handle_clusters(card.as_ref(), &provider, store, &file)?
        }
    }

    Ok(())
}

struct ViewRequest {
    search: String,
    sort: Option<String>,
    direction: Option<SortDirection>,
    page: usize,
    page_size: Option<PageSize>,
}

fn load_card(path: Option<&Path>) -> Result<CardConfigFile> {
    let path = path.ok_or_else(|| anyhow!("--card is required for this command"))?;
    CardConfigFile::load(path)
}

/// Explicit id, else the id of the card passed with `--card`.
fn collapse_target(card_id: Option<String>, card: Option<&Path>) -> Result<String> {
    match card_id {
        Some(id) => Ok(id),
        None => Ok(load_card(card)?.card_id().to_string()),
    }
}

fn load_records(path: Option<&Path>) -> Result<Vec<Value>> {
    let path = path.ok_or_else(|| anyhow!("--data is required for this command"))?;
    let raw = fs::read_to_string(path).with_context(|| format!("Failed to read records {}", path.display()))?;
    let records: Vec<Value> =
        serde_json::from_str(&raw).with_context(|| format!("Records in {} must be a JSON array", path.display()))?;
    info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

fn build_card(card: &CardConfigFile, provider: &GlobalFilterProvider, store: SharedStore) -> CardData<Value> {
    CardData::new(card.to_card_config(), provider.context(), store)
}

/// Handle the 'view' command
fn handle_view(
    card: &CardConfigFile,
    records: &[Value],
    provider: &GlobalFilterProvider,
    store: SharedStore,
    request: ViewRequest,
    json: bool,
) -> Result<()> {
    let mut data = build_card(card, provider, store);

    if let Some(page_size) = request.page_size {
        data.set_page_size(page_size);
    }
    data.set_search(request.search);
    if let Some(sort) = request.sort {
        if !data.sort().options().iter().any(|o| o.field == sort) {
            return Err(anyhow!("Unknown sort field '{}'", sort));
        }
        data.set_sort_field(sort);
    }
    if let Some(direction) = request.direction {
        data.set_sort_direction(direction);
    }

    // Navigation clamps against the last computed total
    data.recompute(records);
    data.go_to_page(request.page);
    let view = data.recompute(records);

    if json {
        let output = serde_json::json!({
            "title": card.title,
            "items": view.items,
            "pagination": view.pagination,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_view(card, &data, &view);
    }
    Ok(())
}

/// Handle the 'toggle-cluster' command
fn handle_toggle_cluster(
    card: &CardConfigFile,
    provider: &GlobalFilterProvider,
    store: SharedStore,
    name: &str,
) -> Result<()> {
    if card.storage_key.is_none() {
        return Err(anyhow!("Card '{}' has no storage_key, its cluster filter cannot persist", card.title));
    }
    let mut data = build_card(card, provider, store);
    data.toggle_cluster(name);
    print_local_clusters(card, &data);
    Ok(())
}

/// Handle the 'clear-clusters' command
fn handle_clear_clusters(card: &CardConfigFile, provider: &GlobalFilterProvider, store: SharedStore) -> Result<()> {
    let mut data = build_card(card, provider, store);
    data.clear_cluster_filter();
    print_local_clusters(card, &data);
    Ok(())
}

/// Handle the 'collapse' command
fn handle_collapse(store: SharedStore, card_id: &str) {
    let mut registry = CollapsedCards::new(store);
    let collapsed = registry.toggle(card_id);
    let state = if collapsed { "collapsed".yellow() } else { "expanded".green() };
    println!("{} Card '{}' {}", "✓".green(), card_id, state);

    if !registry.collapsed().is_empty() {
        let ids: Vec<&str> = registry.collapsed().iter().map(String::as_str).collect();
        println!("Collapsed cards: {}", ids.join(", "));
    }
}

/// Handle the 'clusters' command
fn handle_clusters(
    card: Option<&CardConfigFile>,
    provider: &GlobalFilterProvider,
    store: SharedStore,
    file: &Path,
) -> Result<()> {
    let raw = fs::read_to_string(file).with_context(|| format!("Failed to read clusters {}", file.display()))?;
    let clusters: Vec<ClusterInfo> =
        serde_json::from_str(&raw).with_context(|| format!("Invalid cluster list in {}", file.display()))?;

    let selected = card
        .map(|card| build_card(card, provider, store).filters().local_clusters().clone())
        .unwrap_or_default();
    let available = fleet_context::available_clusters_for_filter(&clusters, &provider.snapshot());

    println!("{}", "Available clusters:".bold().blue());
    if available.is_empty() {
        println!("  (no reachable clusters)");
    }
    for name in &available {
        let marker = if selected.contains(name) { "●".green() } else { "○".normal() };
        println!("  {} {}", marker, name);
    }

    let unreachable: Vec<&str> = clusters
        .iter()
        .filter(|c| !c.is_reachable())
        .map(|c| c.name.as_str())
        .collect();
    if !unreachable.is_empty() {
        println!("{} {}", "Unreachable:".dimmed(), unreachable.join(", ").dimmed());
    }
    Ok(())
}

fn print_local_clusters(card: &CardConfigFile, data: &CardData<Value>) {
    let clusters = data.filters().local_clusters();
    if clusters.is_empty() {
        println!("{} '{}' shows all clusters", "✓".green(), card.title);
    } else {
        let names: Vec<&str> = clusters.iter().map(String::as_str).collect();
        println!("{} '{}' filtered to: {}", "✓".green(), card.title, names.join(", ").cyan());
    }
}

/// Helper function to format and print one page of a card
fn print_view(card: &CardConfigFile, data: &CardData<Value>, view: &CardView<'_, Value>) {
    let meta = &view.pagination;
    println!("{}", card.title.bold().blue());

    let mut scope: Vec<String> = Vec::new();
    if !data.filters().search().is_empty() {
        scope.push(format!("search '{}'", data.filters().search()));
    }
    if data.filters().has_local_cluster_filter() {
        let names: Vec<&str> = data.filters().local_clusters().iter().map(String::as_str).collect();
        scope.push(format!("clusters {}", names.join(", ")));
    }
    if !data.sort().field().is_empty() {
        scope.push(format!("sorted by {} {}", data.sort().field(), data.sort().direction()));
    }
    if !scope.is_empty() {
        println!("{}", scope.join(" · ").dimmed());
    }

    if view.items.is_empty() {
        println!("  {}", "No matching items".yellow());
    }
    let fields = card.display_fields();
    for (offset, item) in view.items.iter().enumerate() {
        let columns: Vec<String> = fields
            .iter()
            .map(|field| format!("{}={}", field.dimmed(), display_value(item, field)))
            .collect();
        println!("{}. {}", (meta.start_index + offset + 1).to_string().green(), columns.join("  "));
    }

    if meta.needs_pagination {
        println!(
            "Page {}/{} ({}-{} of {})",
            meta.current_page,
            meta.total_pages,
            meta.start_index + 1,
            meta.end_index,
            meta.total_items
        );
    } else {
        println!("{} items", meta.total_items);
    }
}

fn display_value(item: &Value, field: &str) -> String {
    card_pipeline::Field::key(field).value(item).unwrap_or_else(|| "-".to_string())
}
