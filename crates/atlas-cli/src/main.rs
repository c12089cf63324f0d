//! Memory Atlas CLI - Geotagged memory journal
//!
//! Records memories to a local JSON file and prints the mood, region,
//! streak and badge analytics derived from them.

mod config;
mod store;

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use atlas::{
    export_file_name, relative_date, share_text, Analytics, ExportFormat, MemoryDraft,
    MemoryRecord, MemoryService, Mood, SystemClock,
};
use clap::{Args, Parser, Subcommand};
use colored::{ColoredString, Colorize};
use dialoguer::{Confirm, Input};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use store::JsonFileStore;

#[derive(Parser)]
#[command(name = "atlas")]
#[command(about = "Memory Atlas - geotagged memories with mood analytics", long_about = None)]
#[command(version)]
struct Cli {
    /// Show debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a memory (prompts for anything not given)
    Add(MemoryArgs),

    /// Edit a memory; omitted fields keep their value
    Edit {
        /// Memory ID
        id: String,
        #[command(flatten)]
        fields: MemoryArgs,
        #[command(flatten)]
        removals: EditArgs,
    },

    /// Remove a memory
    Remove {
        /// Memory ID
        id: String,
    },

    /// Delete ALL memories
    Clear {
        /// Skip confirmation
        #[arg(long)]
        yes: bool,
    },

    /// List memories in stored order
    List,

    /// Memories grouped by year, newest first
    Timeline,

    /// Dashboard statistics
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Unlocked badges
    Badges {
        /// Include locked badges with progress
        #[arg(short, long)]
        all: bool,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify the mood of some text
    Classify {
        /// Text to classify
        text: String,
    },

    /// Region of a coordinate
    Region {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },

    /// Export memories to a file
    Export {
        /// Output format: json, markdown
        #[arg(short, long)]
        format: Option<String>,
        /// Output path (defaults to memory-atlas-YYYY-MM-DD.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Profile summary and share text
    Profile,

    /// Show current configuration
    Config {
        /// Set the memory data file
        #[arg(long)]
        data_file: Option<PathBuf>,
    },
}

#[derive(Args, Default)]
struct MemoryArgs {
    /// Title
    #[arg(short, long)]
    title: Option<String>,
    /// Description
    #[arg(short, long)]
    description: Option<String>,
    /// Latitude (-90 to 90)
    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,
    /// Longitude (-180 to 180)
    #[arg(long, allow_negative_numbers = true)]
    lng: Option<f64>,
    /// Date of the memory (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    date: Option<String>,
    /// Tags (comma-separated, e.g., "beach,family")
    #[arg(long, value_delimiter = ',')]
    tags: Vec<String>,
    /// Generated narrative
    #[arg(long)]
    story: Option<String>,
    /// Photo references
    #[arg(long = "photo")]
    photos: Vec<String>,
    /// Video links
    #[arg(long = "video")]
    videos: Vec<String>,
    /// Hide from sharing
    #[arg(long)]
    private: bool,
}

/// Edit-only switches that take values away from a memory
#[derive(Args, Default)]
struct EditArgs {
    /// Make a private memory shareable again
    #[arg(long, conflicts_with = "private")]
    public: bool,
    /// Remove a tag (repeatable)
    #[arg(long = "remove-tag")]
    remove_tags: Vec<String>,
    /// Remove every tag before adding any given with --tags
    #[arg(long)]
    clear_tags: bool,
    /// Remove every photo before adding any given with --photo
    #[arg(long)]
    clear_photos: bool,
    /// Remove every video link before adding any given with --video
    #[arg(long)]
    clear_videos: bool,
    /// Drop the generated narrative
    #[arg(long, conflicts_with = "story")]
    clear_story: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();
    init_logging(cli.verbose);

    let config = Config::load()?;

    match cli.command {
        Commands::Add(args) => cmd_add(&config, args),
        Commands::Edit {
            id,
            fields,
            removals,
        } => cmd_edit(&config, &id, fields, removals),
        Commands::Remove { id } => cmd_remove(&config, &id),
        Commands::Clear { yes } => cmd_clear(&config, yes),
        Commands::List => cmd_list(&config),
        Commands::Timeline => cmd_timeline(&config),
        Commands::Stats { json } => cmd_stats(&config, json),
        Commands::Badges { all, json } => cmd_badges(&config, all, json),
        Commands::Classify { text } => cmd_classify(&config, &text),
        Commands::Region { latitude, longitude } => cmd_region(&config, latitude, longitude),
        Commands::Export { format, output } => cmd_export(&config, format, output),
        Commands::Profile => cmd_profile(&config),
        Commands::Config { data_file } => cmd_config(config, data_file),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn analytics(config: &Config) -> Analytics {
    Analytics::new(config.analytics.clone(), Arc::new(SystemClock))
}

fn open_service(config: &Config) -> Result<MemoryService<JsonFileStore>> {
    let path = config.data_path()?;
    tracing::debug!("Using data file {:?}", path);
    Ok(MemoryService::new(
        Arc::new(JsonFileStore::new(path)),
        analytics(config),
    ))
}

// ============================================
// Command Implementations
// ============================================

fn cmd_add(config: &Config, args: MemoryArgs) -> Result<()> {
    let service = open_service(config)?;
    let today = service.analytics().clock().now().date_naive();

    let draft = MemoryDraft {
        title: prompt_if_missing(args.title, "Title")?,
        description: prompt_if_missing(args.description, "Description")?,
        latitude: prompt_number_if_missing(args.lat, "Latitude")?,
        longitude: prompt_number_if_missing(args.lng, "Longitude")?,
        date: args
            .date
            .unwrap_or_else(|| today.format("%Y-%m-%d").to_string()),
        photos: args.photos,
        video_links: args.videos,
        ai_story: args.story,
        tags: Vec::new(),
        is_private: args.private,
    };
    let draft = with_tags(draft, &args.tags);

    let memory = service.create(draft)?;
    let region = service.analytics().region_of(memory.latitude, memory.longitude).to_string();

    println!(
        "{} Memory saved [{}] in {}",
        "✓".green(),
        mood_label(memory.mood),
        region.cyan()
    );
    println!("  {}", memory.id.dimmed());
    Ok(())
}

fn cmd_edit(config: &Config, id: &str, args: MemoryArgs, removals: EditArgs) -> Result<()> {
    let service = open_service(config)?;
    let current = service.get(id)?;
    let draft = apply_edit(current.to_draft(), args, removals);

    let memory = service.update(id, draft)?;
    println!(
        "{} Memory updated [{}]",
        "✓".green(),
        mood_label(memory.mood)
    );
    Ok(())
}

fn cmd_remove(config: &Config, id: &str) -> Result<()> {
    let service = open_service(config)?;
    if !service.delete(id)? {
        bail!("Memory '{}' not found", id);
    }
    println!("{} Memory '{}' removed", "✓".green(), id);
    Ok(())
}

fn cmd_clear(config: &Config, yes: bool) -> Result<()> {
    let confirmed = yes
        || Confirm::new()
            .with_prompt("Delete ALL memories? This cannot be undone")
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;

    if !confirmed {
        println!("Cancelled.");
        return Ok(());
    }

    let removed = open_service(config)?.clear()?;
    println!("{} Removed {} memories", "✓".green(), removed);
    Ok(())
}

fn cmd_list(config: &Config) -> Result<()> {
    let service = open_service(config)?;
    let memories = service.list()?;

    if memories.is_empty() {
        println!("No memories yet.");
        println!("\n{}", "Add one with:".dimmed());
        println!("  atlas add --title <TITLE> --description <TEXT> --lat <LAT> --lng <LNG>");
        return Ok(());
    }

    println!("{}", "Memories:".bold());
    for memory in &memories {
        print_memory_line(&service, memory);
    }
    Ok(())
}

fn cmd_timeline(config: &Config) -> Result<()> {
    let service = open_service(config)?;
    let groups = service.timeline()?;

    if groups.is_empty() {
        println!("No memories yet.");
        return Ok(());
    }

    let total: usize = groups.iter().map(|g| g.memories.len()).sum();
    let plural = if groups.len() > 1 { "s" } else { "" };
    println!("{} memories across {} year{}", total, groups.len(), plural);

    for group in groups {
        println!("\n{}", group.year.to_string().bold());
        for memory in &group.memories {
            print_memory_line(&service, memory);
        }
    }
    Ok(())
}

fn cmd_stats(config: &Config, json: bool) -> Result<()> {
    let service = open_service(config)?;
    let dashboard = service.dashboard()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    if dashboard.stats.total_memories == 0 {
        println!("No data to display. Create some memories to see your analytics.");
        return Ok(());
    }

    let stats = &dashboard.stats;
    println!("{}", "Memory Analytics".bold());
    println!("  Total memories:    {}", stats.total_memories.to_string().cyan());
    println!("  Regions visited:   {}", stats.regions_visited.to_string().cyan());
    println!("  Day streak:        {}", stats.streak_days.to_string().cyan());
    println!("  Badges earned:     {}", dashboard.badges.len().to_string().cyan());

    println!("\n{}", "Mood breakdown:".bold());
    for share in &dashboard.mood_shares {
        println!(
            "  {:<10} {:>4} {:>4}%",
            mood_label(Some(share.mood)),
            share.count,
            share.percentage
        );
    }

    match &dashboard.dominant_mood {
        Some(top) => println!(
            "\n{} {} ({}% of memories, {} total)",
            "Most common mood:".bold(),
            mood_label(Some(top.mood)),
            top.percentage,
            top.count
        ),
        None => println!("\n{} No data", "Most common mood:".bold()),
    }

    println!(
        "{} {} of {} memories ({}%)",
        "AI stories:".bold(),
        dashboard.stories,
        stats.total_memories,
        dashboard.story_percentage
    );
    println!("{} {}%", "Public:".bold(), dashboard.public_percentage);

    println!("\n{}", "Memories per month:".bold());
    for bucket in &dashboard.monthly {
        println!("  {}  {}", bucket.label(), "█".repeat(bucket.count).green());
    }
    Ok(())
}

fn cmd_badges(config: &Config, all: bool, json: bool) -> Result<()> {
    let service = open_service(config)?;

    if all {
        let progress = service.badge_progress()?;
        if json {
            println!("{}", serde_json::to_string_pretty(&progress)?);
            return Ok(());
        }
        println!("{}", "Badges:".bold());
        for item in progress {
            let state = if item.unlocked {
                "unlocked".green()
            } else {
                "locked".dimmed()
            };
            println!(
                "  {} {} [{}/{}] {} - {}",
                item.badge.icon,
                item.badge.name.cyan(),
                item.current.min(item.badge.requirement.threshold),
                item.badge.requirement.threshold,
                state,
                item.badge.description.dimmed()
            );
        }
        return Ok(());
    }

    let badges = service.badges()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&badges)?);
        return Ok(());
    }
    if badges.is_empty() {
        println!("No badges earned yet. Keep creating memories to unlock achievements!");
        return Ok(());
    }

    println!("{}", "Badges:".bold());
    for badge in badges {
        let unlocked = badge
            .unlocked_at
            .map(|at| format!("Unlocked {}", at.format("%Y-%m-%d")))
            .unwrap_or_default();
        println!(
            "  {} {} - {} {}",
            badge.icon,
            badge.name.cyan(),
            badge.description,
            unlocked.dimmed()
        );
    }
    Ok(())
}

fn cmd_classify(config: &Config, text: &str) -> Result<()> {
    let analysis = analytics(config).classify(text);
    println!(
        "{} (score {:.2}, confidence {:.2})",
        mood_label(Some(analysis.mood)),
        analysis.score,
        analysis.confidence
    );
    Ok(())
}

fn cmd_region(config: &Config, latitude: f64, longitude: f64) -> Result<()> {
    println!("{}", analytics(config).region_of(latitude, longitude));
    Ok(())
}

fn cmd_export(config: &Config, format: Option<String>, output: Option<PathBuf>) -> Result<()> {
    let format = match format {
        Some(f) => f.parse::<ExportFormat>().map_err(anyhow::Error::msg)?,
        None => config.default_export_format,
    };

    let service = open_service(config)?;
    let content = service.export(format)?;
    let now = service.analytics().clock().now();
    let path = output.unwrap_or_else(|| PathBuf::from(export_file_name(format, now)));

    fs::write(&path, content).with_context(|| format!("Failed to write export to {:?}", path))?;
    println!("{} Exported {} to {:?}", "✓".green(), format, path);
    Ok(())
}

fn cmd_profile(config: &Config) -> Result<()> {
    let service = open_service(config)?;
    let summary = service.profile()?;

    println!("{}", "Profile:".bold());
    println!("  Total memories:        {}", summary.total_memories);
    println!("  Public / private:      {} / {}", summary.public_memories, summary.private_memories);
    println!("  With AI stories:       {}", summary.memories_with_stories);
    println!("  With photos:           {}", summary.memories_with_photos);
    println!("  With videos:           {}", summary.memories_with_videos);

    match share_text(&summary) {
        Some(text) => println!("\n{}\n  {}", "Share:".bold(), text),
        None => println!("\n{}", "No public memories to share".yellow()),
    }
    Ok(())
}

fn cmd_config(mut config: Config, data_file: Option<PathBuf>) -> Result<()> {
    if let Some(path) = data_file {
        config.set_data_file(path);
        config.save()?;
        println!("{} Data file updated", "✓".green());
    }

    println!("{}", "Configuration:".bold());
    println!("  Path: {:?}", Config::config_path()?);
    println!("  Data file: {:?}", config.data_path()?);
    println!("  Default export format: {}", config.default_export_format.to_string().cyan());
    println!(
        "  Rule tables: {} mood sets, {} regions, {} badges",
        config.analytics.sentiment.categories.len(),
        config.analytics.geo.regions.len(),
        config.analytics.badges.badges.len()
    );
    Ok(())
}

// ============================================
// Helpers
// ============================================

fn print_memory_line(service: &MemoryService<JsonFileStore>, memory: &MemoryRecord) {
    let now = service.analytics().clock().now();
    let when = relative_date(memory.calendar_date(), now);
    let region = service.analytics().region_of(memory.latitude, memory.longitude);
    let lock = if memory.is_private { " 🔒" } else { "" };

    println!(
        "  {} {} [{}] {} {}{}",
        memory.id.chars().take(8).collect::<String>().dimmed(),
        truncate_string(&memory.title, 40).cyan(),
        mood_label(memory.mood),
        region,
        when.dimmed(),
        lock
    );
}

/// Overlay edit arguments on a record's current form data. Removals apply
/// before additions, so `--clear-tags --tags a` leaves exactly `a`.
fn apply_edit(mut draft: MemoryDraft, args: MemoryArgs, removals: EditArgs) -> MemoryDraft {
    if let Some(title) = args.title {
        draft.title = title;
    }
    if let Some(description) = args.description {
        draft.description = description;
    }
    if let Some(lat) = args.lat {
        draft.latitude = lat;
    }
    if let Some(lng) = args.lng {
        draft.longitude = lng;
    }
    if let Some(date) = args.date {
        draft.date = date;
    }

    if removals.clear_story {
        draft.ai_story = None;
    } else if args.story.is_some() {
        draft.ai_story = args.story;
    }

    if removals.clear_photos {
        draft.photos.clear();
    }
    draft.photos.extend(args.photos);
    if removals.clear_videos {
        draft.video_links.clear();
    }
    draft.video_links.extend(args.videos);

    if args.private {
        draft.is_private = true;
    } else if removals.public {
        draft.is_private = false;
    }

    if removals.clear_tags {
        draft.tags.clear();
    }
    for tag in &removals.remove_tags {
        if !draft.remove_tag(tag) {
            tracing::debug!("Tag {:?} not on memory, nothing to remove", tag);
        }
    }
    with_tags(draft, &args.tags)
}

fn with_tags(mut draft: MemoryDraft, tags: &[String]) -> MemoryDraft {
    for tag in tags {
        draft.add_tag(tag);
    }
    draft
}

fn prompt_if_missing(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Input::new()
            .with_prompt(prompt)
            .interact_text()
            .with_context(|| format!("Failed to read {}", prompt.to_lowercase())),
    }
}

fn prompt_number_if_missing(value: Option<f64>, prompt: &str) -> Result<f64> {
    match value {
        Some(v) => Ok(v),
        None => Input::<f64>::new()
            .with_prompt(prompt)
            .interact_text()
            .with_context(|| format!("Failed to read {}", prompt.to_lowercase())),
    }
}

fn mood_label(mood: Option<Mood>) -> ColoredString {
    let mood = mood.unwrap_or_default();
    let label = mood.to_string();
    match mood {
        Mood::Happy => label.yellow(),
        Mood::Excited => label.red(),
        Mood::Nostalgic => label.magenta(),
        Mood::Sad => label.bright_black(),
        Mood::Neutral => label.blue(),
    }
}

/// Truncate string safely for UTF-8 (by char count, not bytes)
fn truncate_string(s: &str, max_chars: usize) -> String {
    let chars: Vec<char> = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        format!("{}...", chars.into_iter().collect::<String>())
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current() -> MemoryDraft {
        MemoryDraft {
            title: "Harbour".to_string(),
            description: "Boats at dusk".to_string(),
            latitude: 38.7,
            longitude: -9.1,
            date: "2024-05-01".to_string(),
            photos: vec!["dusk.jpg".to_string()],
            video_links: vec!["https://example.com/v/1".to_string()],
            ai_story: Some("The boats came home".to_string()),
            tags: vec!["sea".to_string(), "evening".to_string()],
            is_private: true,
        }
    }

    #[test]
    fn test_edit_without_arguments_keeps_everything() {
        let draft = apply_edit(current(), MemoryArgs::default(), EditArgs::default());
        assert_eq!(draft, current());
    }

    #[test]
    fn test_edit_can_make_memory_public() {
        let removals = EditArgs {
            public: true,
            ..Default::default()
        };
        let draft = apply_edit(current(), MemoryArgs::default(), removals);
        assert!(!draft.is_private);
    }

    #[test]
    fn test_edit_removes_before_adding() {
        let args = MemoryArgs {
            tags: vec!["boats".to_string()],
            photos: vec!["new.jpg".to_string()],
            ..Default::default()
        };
        let removals = EditArgs {
            remove_tags: vec!["sea".to_string(), "missing".to_string()],
            clear_photos: true,
            clear_videos: true,
            clear_story: true,
            ..Default::default()
        };
        let draft = apply_edit(current(), args, removals);

        assert_eq!(draft.tags, vec!["evening".to_string(), "boats".to_string()]);
        assert_eq!(draft.photos, vec!["new.jpg".to_string()]);
        assert!(draft.video_links.is_empty());
        assert_eq!(draft.ai_story, None);
        assert!(draft.is_private);
    }

    #[test]
    fn test_edit_clear_tags_then_add() {
        let args = MemoryArgs {
            tags: vec!["a".to_string()],
            ..Default::default()
        };
        let removals = EditArgs {
            clear_tags: true,
            ..Default::default()
        };
        let draft = apply_edit(current(), args, removals);
        assert_eq!(draft.tags, vec!["a".to_string()]);
    }

    #[test]
    fn test_public_and_private_conflict() {
        let parsed = Cli::try_parse_from(["atlas", "edit", "abc", "--private", "--public"]);
        assert!(parsed.is_err());

        let parsed = Cli::try_parse_from(["atlas", "edit", "abc", "--public", "--remove-tag", "x"]);
        assert!(parsed.is_ok());
    }
}
