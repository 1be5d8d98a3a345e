//! `joebot` CLI: resolve date phrases and preview events from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Resolve a standalone phrase (evening rule and forward bias apply)
//! joebot parse "Friday 7"
//!
//! # Pin the reference instant and zone
//! joebot parse "tomorrow at 2pm" --now 2024-03-04T18:00:00Z --tz America/Los_Angeles
//!
//! # Find the first phrase in prose
//! joebot extract "Team sync tomorrow at 2pm in the lounge" --json
//!
//! # Render an instant the way the event form shows it
//! joebot format 2024-03-09T03:00:00Z
//!
//! # Prefill an event form from one line of text
//! joebot draft "Board games Friday 7 at the community hall"
//!
//! # Validate and preview an event
//! joebot event --guild 1 --title "Board games" --shortname board-games \
//!     --date "Friday 7" --location "Community hall" --category 42
//! ```
//!
//! Logging goes to stderr; set `JOEBOT_LOG` (or `RUST_LOG`) to e.g. `debug`.

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use clap::{Args, Parser, Subcommand};
use joebot_events::{
    BotConfig, ChannelPlacement, CreateEventRequest, EventFormDefaults, EventService,
    EventSubmission, GuildId, GuildStore, MemoryChannelProvisioner, MemoryEventStore,
    MemoryGuildStore, ParentChannel,
};
use serde_json::json;
use when_engine::{ReferenceContext, ResolvedInstant};

#[derive(Parser)]
#[command(
    name = "joebot",
    version,
    about = "Natural-language event dates and event previews"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    frame: FrameArgs,
}

#[derive(Args)]
struct FrameArgs {
    /// Reference instant as RFC 3339 (defaults to the current time)
    #[arg(long, global = true)]
    now: Option<String>,

    /// IANA timezone (defaults to JOEBOT_TIMEZONE, then America/Los_Angeles)
    #[arg(long, global = true)]
    tz: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve text that holds only a date/time phrase
    Parse {
        /// The phrase, e.g. "Friday 7"
        text: String,
    },
    /// Find and resolve the first date/time phrase in prose
    Extract {
        /// Free text, e.g. "Team sync tomorrow at 2pm in the lounge"
        text: String,
    },
    /// Render an RFC 3339 instant in the event form's display style
    Format {
        /// Instant to render, e.g. 2024-03-09T03:00:00Z
        instant: String,
    },
    /// Prefill an event form from one line of text
    Draft {
        /// Event description with an embedded date
        text: String,
    },
    /// Validate an event submission and preview the result
    Event(EventArgs),
}

#[derive(Args)]
struct EventArgs {
    #[arg(long)]
    title: String,

    /// Channel name: lowercase letters, digits, and dashes
    #[arg(long)]
    shortname: String,

    #[arg(long)]
    date: String,

    #[arg(long)]
    location: String,

    #[arg(long, default_value = "")]
    description: String,

    /// Create a text channel under this category
    #[arg(long, conflicts_with = "thread_parent")]
    category: Option<u64>,

    /// Create a public thread in this text channel
    #[arg(long)]
    thread_parent: Option<u64>,

    /// Community default parent category, as set with the category command
    #[arg(long)]
    default_category: Option<u64>,

    /// Community the event belongs to
    #[arg(long)]
    guild: Option<u64>,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = load_config(&cli.frame)?;
    let ctx = config.context(reference_now(&cli.frame)?);
    let as_json = cli.frame.json;

    match cli.command {
        Commands::Parse { text } => {
            let resolved = when_engine::parse_standalone(&text, &ctx)
                .with_context(|| format!("No date or time found in '{}'", text))?;
            if as_json {
                print_json(&json!({
                    "input": text,
                    "resolved": resolved,
                    "display": when_engine::format(Some(&resolved), &ctx),
                }))?;
            } else {
                print_instant(&resolved, &ctx);
            }
        }
        Commands::Extract { text } => {
            let found = when_engine::extract_from_prose(&text, &ctx)
                .with_context(|| format!("No date or time found in '{}'", text))?;
            let residual = found.residual(&text);
            if as_json {
                print_json(&json!({
                    "matched_text": found.matched_text,
                    "span": [found.span.start, found.span.end],
                    "residual": residual,
                    "resolved": found.resolved,
                    "display": when_engine::format(Some(&found.resolved), &ctx),
                }))?;
            } else {
                println!("Matched:  {}", found.matched_text);
                println!("Residual: {}", residual);
                print_instant(&found.resolved, &ctx);
            }
        }
        Commands::Format { instant } => {
            let utc = when_engine::parse_rfc3339(&instant)?;
            let resolved = ResolvedInstant::at(utc, ctx.timezone());
            let shown = when_engine::format(Some(&resolved), &ctx);
            if as_json {
                print_json(&json!({ "input": instant, "display": shown }))?;
            } else {
                println!("{}", shown);
            }
        }
        Commands::Draft { text } => {
            let form = config.event_form("draft", EventFormDefaults::from_prose(&text, &ctx));
            if as_json {
                print_json(&form)?;
            } else {
                let defaults = &form.defaults;
                println!("Title:        {}", defaults.title);
                println!("Channel Name: {}", defaults.shortname);
                println!("Date:         {}", defaults.date);
                println!("Expires in:   {}s", form.timeout_secs);
            }
        }
        Commands::Event(args) => run_event(args, &ctx, as_json)?,
    }

    Ok(())
}

/// Logging to stderr, filtered by `JOEBOT_LOG`, then `RUST_LOG`, default `warn`.
fn init_logging() {
    let filter = std::env::var("JOEBOT_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(&filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
    tracing::debug!(%filter, "joebot: log filter");
}

fn load_config(frame: &FrameArgs) -> Result<BotConfig> {
    let mut config = BotConfig::from_env().context("Invalid configuration")?;
    if let Some(tz) = frame.tz.as_deref() {
        config.timezone = when_engine::parse_timezone(tz)?;
    }
    Ok(config)
}

/// The reference instant, captured once for the whole command.
fn reference_now(frame: &FrameArgs) -> Result<DateTime<Utc>> {
    match frame.now.as_deref() {
        Some(raw) => Ok(when_engine::parse_rfc3339(raw)?),
        None => Ok(Utc::now()),
    }
}

fn run_event(args: EventArgs, ctx: &ReferenceContext, as_json: bool) -> Result<()> {
    let parent = match (args.category, args.thread_parent) {
        (Some(id), _) => Some(ParentChannel::category(id)),
        (None, Some(id)) => Some(ParentChannel::text(id)),
        (None, None) => None,
    };
    let guild = args.guild.map(GuildId);

    let mut guilds = MemoryGuildStore::new();
    if let (Some(guild), Some(id)) = (guild, args.default_category) {
        guilds.set_default_parent(guild, Some(ParentChannel::category(id)))?;
    }
    let mut service = EventService::new(
        MemoryEventStore::new(),
        MemoryChannelProvisioner::default(),
        guilds,
    );

    let created = service.create(
        CreateEventRequest {
            guild,
            parent,
            submission: EventSubmission {
                title: args.title,
                shortname: args.shortname,
                date: args.date,
                location: args.location,
                description: args.description,
            },
        },
        ctx,
    )?;

    if as_json {
        return print_json(&created);
    }
    println!("Event #{}: {}", created.event.id, created.embed.title);
    println!("Placement: {}", describe_placement(&created.placement));
    let start = ResolvedInstant::at(created.event.start, ctx.timezone());
    println!("Starts:    {}", when_engine::format(Some(&start), ctx));
    for field in &created.embed.fields {
        println!("-- {} --", field.name);
        println!("{}", field.value);
    }
    Ok(())
}

fn describe_placement(placement: &ChannelPlacement) -> String {
    match placement {
        ChannelPlacement::PublicThread { parent } => format!("public thread in {}", parent),
        ChannelPlacement::TextChannel {
            category: Some(category),
        } => format!("text channel under {}", category),
        ChannelPlacement::TextChannel { category: None } => {
            "text channel at the server root".to_string()
        }
    }
}

fn print_instant(resolved: &ResolvedInstant, ctx: &ReferenceContext) {
    println!("{}", when_engine::format(Some(resolved), ctx));
    println!(
        "{}",
        resolved.utc().to_rfc3339_opts(SecondsFormat::Secs, true)
    );
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
