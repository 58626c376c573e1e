//! Command-line surface: the TUI by default, plus one-shot commands for scripting.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::api::{GuestApi, HttpGuestApi, HttpMessageWall, MessageWallApi};
use crate::config::{save_api_base_url, Config};
use crate::directory::{GuestDirectory, SearchOutcome};
use crate::refresh::RefreshBus;
use crate::rsvp::{RsvpChoice, RsvpFlow};
use crate::util::{self, pluralize};
use crate::views::{format_timestamp, EntourageView, GuestBookSnapshot, MessageWallView, RosterBody};

#[derive(Parser, Debug)]
#[command(name = "vows", author, version, about)]
pub struct Cli {
    /// Directory for config and logs (defaults to ~/.vows)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the guest API base URL for this run
    #[arg(long, global = true, env = "VOWS_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search the guest list by name
    Search { query: String },
    /// Record an RSVP for a guest on the list
    Rsvp(RsvpArgs),
    /// Ask to be added to the guest list
    Request(RequestArgs),
    /// Show everyone who is attending
    Guests,
    /// Show the wedding entourage
    Entourage,
    /// Read or post to the message wall
    Messages {
        #[command(subcommand)]
        action: Option<MessagesAction>,
    },
    /// Inspect or edit the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Attendance {
    Yes,
    No,
}

impl From<Attendance> for RsvpChoice {
    fn from(value: Attendance) -> Self {
        match value {
            Attendance::Yes => RsvpChoice::Yes,
            Attendance::No => RsvpChoice::No,
        }
    }
}

#[derive(Args, Debug)]
pub struct RsvpArgs {
    /// Guest name exactly as it appears on the list (case-insensitive)
    pub name: String,
    #[arg(long, value_enum)]
    pub attending: Attendance,
    /// Party size, required when attending
    #[arg(long)]
    pub guests: Option<String>,
    #[arg(long, default_value = "")]
    pub message: String,
    #[arg(long, default_value = "")]
    pub email: String,
    /// Overwrite an answer that is already on file
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct RequestArgs {
    pub name: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    #[arg(long, default_value = "1")]
    pub guests: String,
    #[arg(long, default_value = "")]
    pub message: String,
}

#[derive(Subcommand, Debug)]
pub enum MessagesAction {
    /// List messages, newest first
    List,
    /// Post a message
    Post { name: String, message: String },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the config file location
    Path,
    /// Print the effective settings
    Show,
    /// Persist a new guest API base URL
    SetApiUrl { url: String },
}

/// Build the HTTP clients described by the config
pub fn connect(config: &Config) -> Result<(Arc<dyn GuestApi>, Option<Arc<dyn MessageWallApi>>)> {
    let api = HttpGuestApi::new(config.api.base_url.clone(), config.request_timeout())
        .context("Failed to create guest API client")?;
    let wall = match config.message_wall_endpoints() {
        Some(endpoints) => Some(Arc::new(
            HttpMessageWall::new(endpoints, config.request_timeout())
                .context("Failed to create message wall client")?,
        ) as Arc<dyn MessageWallApi>),
        None => None,
    };
    Ok((Arc::new(api), wall))
}

/// Run a one-shot command, writing human-readable output to `out`
pub async fn run_command(
    command: Command,
    config: &Config,
    api: Arc<dyn GuestApi>,
    wall: Option<Arc<dyn MessageWallApi>>,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Search { query } => search(api, config, &query, out).await,
        Command::Rsvp(args) => rsvp(api, config, args, out).await,
        Command::Request(args) => request(api, config, args, out).await,
        Command::Guests => guests(api, out).await,
        Command::Entourage => entourage(api, out).await,
        Command::Messages { action } => {
            let Some(wall) = wall else {
                bail!("Message wall is not configured (set [message_wall] script_url)");
            };
            messages(wall, action.unwrap_or(MessagesAction::List), out).await
        }
        Command::Config { action } => config_command(config, action, out),
    }
}

async fn loaded_flow(api: Arc<dyn GuestApi>, config: &Config) -> Result<RsvpFlow> {
    let mut flow = RsvpFlow::new(api, RefreshBus::new(), config.flow_timing());
    flow.load_directory(Instant::now()).await?;
    Ok(flow)
}

async fn search(
    api: Arc<dyn GuestApi>,
    config: &Config,
    query: &str,
    out: &mut impl Write,
) -> Result<()> {
    let mut flow = loaded_flow(api, config).await?;
    flow.set_query(query);
    match flow.outcome() {
        SearchOutcome::Hidden => {}
        SearchOutcome::Matches(_) => {
            for guest in flow.matches() {
                writeln!(out, "{}\t{}", guest.name, guest.status().display_name())?;
            }
        }
        SearchOutcome::NoMatch { request_name } => {
            writeln!(out, "No guest named \"{request_name}\" on the list.")?;
            writeln!(out, "Use `vows request \"{request_name}\"` to ask for an invitation.")?;
        }
    }
    Ok(())
}

async fn rsvp(
    api: Arc<dyn GuestApi>,
    config: &Config,
    args: RsvpArgs,
    out: &mut impl Write,
) -> Result<()> {
    let mut flow = loaded_flow(api, config).await?;
    if !flow.select_by_name(&args.name) {
        bail!("No guest named \"{}\" on the list", args.name.trim());
    }
    if let Some(guest) = flow.selected().filter(|g| g.has_responded()) {
        if !args.force {
            bail!(
                "{} has already responded ({}); pass --force to change it",
                guest.name,
                guest.status().display_name()
            );
        }
    }

    let form = flow.form_mut();
    form.choice = Some(args.attending.into());
    if let Some(guests) = args.guests {
        form.guest = guests;
    }
    form.message = args.message;
    form.email = args.email;

    flow.submit(Instant::now()).await?;
    if let Some(text) = flow.notice().success_text() {
        writeln!(out, "{text}")?;
    }
    Ok(())
}

async fn request(
    api: Arc<dyn GuestApi>,
    config: &Config,
    args: RequestArgs,
    out: &mut impl Write,
) -> Result<()> {
    let mut flow = RsvpFlow::new(api, RefreshBus::new(), config.flow_timing());
    flow.open_request_with(&args.name);
    if let Some(form) = flow.request_mut() {
        form.email = args.email;
        form.phone = args.phone;
        form.guest = args.guests;
        form.message = args.message;
    }
    flow.submit_request(Instant::now()).await?;
    if let Some(text) = flow.notice().success_text() {
        writeln!(out, "{text}")?;
    }
    Ok(())
}

async fn guests(api: Arc<dyn GuestApi>, out: &mut impl Write) -> Result<()> {
    let directory = GuestDirectory::fetch(api.as_ref()).await?;
    let snapshot = GuestBookSnapshot::from_guests(directory.guests());
    let summary = directory.summary();

    writeln!(out, "{}", snapshot.headline())?;
    writeln!(out, "{}", snapshot.entry_line())?;
    writeln!(
        out,
        "Attending: {}  Declined: {}  Awaiting reply: {}",
        summary.attending_entries, summary.declined_entries, summary.pending_entries
    )?;
    for guest in &snapshot.entries {
        let size = guest.party_size();
        writeln!(
            out,
            "  {}  {} {}",
            guest.name,
            size,
            pluralize(size as usize, "guest", "guests")
        )?;
        if !guest.message.trim().is_empty() {
            writeln!(out, "      \"{}\"", guest.message.trim())?;
        }
    }
    Ok(())
}

async fn entourage(api: Arc<dyn GuestApi>, out: &mut impl Write) -> Result<()> {
    let view = EntourageView::new(api);
    view.refresh().await?;
    for section in view.snapshot().roster() {
        writeln!(out, "{}", section.title)?;
        match &section.body {
            RosterBody::Single(entries) => {
                for entry in entries {
                    writeln!(out, "  {}", entry.name)?;
                }
            }
            RosterBody::Pairs(rows) => {
                for row in rows {
                    let left = row.left.as_ref().map(|e| e.name.as_str()).unwrap_or("");
                    let right = row.right.as_ref().map(|e| e.name.as_str()).unwrap_or("");
                    writeln!(out, "  {left:<32}{right}")?;
                }
            }
        }
    }
    Ok(())
}

async fn messages(
    wall: Arc<dyn MessageWallApi>,
    action: MessagesAction,
    out: &mut impl Write,
) -> Result<()> {
    let view = MessageWallView::new(wall);
    match action {
        MessagesAction::List => {
            view.refresh().await?;
            let snapshot = view.snapshot();
            if snapshot.messages.is_empty() {
                writeln!(out, "No Messages Yet")?;
            }
            for message in &snapshot.messages {
                writeln!(out, "{} ({})", message.name, format_timestamp(&message.timestamp))?;
                writeln!(out, "  {}", message.message)?;
            }
        }
        MessagesAction::Post { name, message } => {
            view.post(&name, &message).await?;
            writeln!(out, "{}", crate::views::message_wall::POST_SENT)?;
        }
    }
    Ok(())
}

fn config_command(config: &Config, action: ConfigAction, out: &mut impl Write) -> Result<()> {
    match action {
        ConfigAction::Path => writeln!(out, "{}", util::data_paths().config_file().display())?,
        ConfigAction::Show => {
            writeln!(out, "api.base_url = {}", config.api.base_url)?;
            match config.api.request_timeout_secs {
                Some(secs) => writeln!(out, "api.request_timeout_secs = {secs}")?,
                None => writeln!(out, "api.request_timeout_secs = (none)")?,
            }
            let wall = if config.message_wall_endpoints().is_some() {
                "enabled"
            } else {
                "disabled"
            };
            writeln!(out, "message_wall = {wall}")?;
            writeln!(out, "display.show_entourage = {}", config.display.show_entourage)?;
            writeln!(
                out,
                "display.show_message_wall = {}",
                config.display.show_message_wall
            )?;
        }
        ConfigAction::SetApiUrl { url } => {
            save_api_base_url(&url)?;
            writeln!(out, "Saved api.base_url = {url}")?;
        }
    }
    Ok(())
}
