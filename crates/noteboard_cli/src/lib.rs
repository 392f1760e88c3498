//! Command line front end for the noteboard.
//!
//! # Responsibility
//! - Map parsed arguments onto [`Board`] operations.
//! - Render entries and notifications as plain text or JSON.
//!
//! # Invariants
//! - Every command runs against a freshly refreshed board.
//! - Output goes to the writer handed to [`run`]; logs go to stderr or files.

pub mod cli;

use anyhow::{anyhow, bail, Context, Result};
use cli::args::{Args, Command};
use log::{debug, info};
use noteboard_core::{
    core_version, default_log_level, init_logging, init_stderr_logging, Board, BoardCommand,
    BoardConfig, Clock, Entry, EntryId, EntryKind, EntryListQuery, EntryRepository,
    NotificationVariant, SqliteEntryRepository, SystemClock,
};
use std::io::Write;

const PREVIEW_CHARS: usize = 60;

/// Executes one command, writing user-facing output to `out`.
pub fn run<W: Write>(args: Args, out: &mut W) -> Result<()> {
    let config = match &args.config {
        Some(path) => BoardConfig::load(path)?,
        None => BoardConfig::default(),
    };
    init_cli_logging(args.verbose, &config)?;
    debug!(
        "event=cli_start module=cli command={}",
        args.command.name()
    );

    if let Command::Version = args.command {
        writeln!(out, "noteboard {}", core_version())?;
        return Ok(());
    }

    let db_path = args.db.clone().unwrap_or_else(|| config.storage.db_path.clone());
    let conn = noteboard_core::db::open_db(&db_path)
        .with_context(|| format!("failed to open board database `{}`", db_path.display()))?;
    info!("event=cli_db_open module=cli status=ok");

    let mut board = Board::new(SqliteEntryRepository::new(&conn), SystemClock, config.board);
    board.refresh();
    execute(&mut board, args.command, out)?;
    write_notifications(&board, out)?;
    Ok(())
}

fn init_cli_logging(verbose: u8, config: &BoardConfig) -> Result<()> {
    let level = match verbose {
        0 => None,
        1 => Some("debug"),
        _ => Some("trace"),
    };
    if let Some(level) = level {
        return init_stderr_logging(level).map_err(|err| anyhow!(err));
    }
    let Some(dir) = &config.logging.dir else {
        return Ok(());
    };
    let level = config
        .logging
        .level
        .as_deref()
        .unwrap_or_else(|| default_log_level());
    init_logging(level, &dir.to_string_lossy()).map_err(|err| anyhow!(err))
}

fn execute<R, C, W>(board: &mut Board<R, C>, command: Command, out: &mut W) -> Result<()>
where
    R: EntryRepository,
    C: Clock + Clone,
    W: Write,
{
    match command {
        Command::List {
            kind,
            json,
            include_deleted,
        } => {
            let kind = kind.map(EntryKind::from);
            let entries = if include_deleted {
                board.gateway().list_with(&EntryListQuery {
                    kind,
                    include_deleted: true,
                })?
            } else {
                board
                    .entries()
                    .iter()
                    .filter(|entry| kind.map_or(true, |kind| entry.kind == kind))
                    .cloned()
                    .collect()
            };
            if json {
                serde_json::to_writer_pretty(&mut *out, &entries)?;
                writeln!(out)?;
            } else {
                write_columns(&entries, kind, out)?;
            }
        }
        Command::AddNote { text } => {
            let entry = board.create_note(&text.join(" "))?;
            writeln!(out, "created note {}", entry.id)?;
        }
        Command::AddTask { text } => {
            let entry = board.create_task(&text.join(" "))?;
            writeln!(out, "created task {}", entry.id)?;
        }
        Command::Show { id, json } => {
            let entry = board
                .gateway()
                .get(id, true)?
                .ok_or_else(|| anyhow!("entry not found: {id}"))?;
            if json {
                serde_json::to_writer_pretty(&mut *out, &entry)?;
                writeln!(out)?;
            } else {
                write_entry_detail(&entry, out)?;
            }
        }
        Command::Edit { id, text } => {
            board.select(id)?;
            board.input(&text.join(" "));
            match board.blur()? {
                Some(entry) => writeln!(out, "updated {}", entry.id)?,
                None => writeln!(out, "unchanged {id}")?,
            }
        }
        Command::Done { id } => {
            let entry = board.set_done(id, true)?;
            writeln!(out, "done {}", entry.id)?;
        }
        Command::Undone { id } => {
            let entry = board.set_done(id, false)?;
            writeln!(out, "undone {}", entry.id)?;
        }
        Command::Delete { id } => {
            board.delete(id)?;
        }
        Command::Restore { id } => {
            board.restore(id)?;
        }
        Command::Move { id, to_index } => {
            let kind = board
                .entry(id)
                .map(|entry| entry.kind)
                .ok_or_else(|| anyhow!("entry is not on the board: {id}"))?;
            let column = board.column(kind);
            let Some(over) = column.get(to_index) else {
                bail!(
                    "position {to_index} is out of range for {} ({} entries)",
                    kind.title(),
                    column.len()
                );
            };
            if board.reorder(kind, id, over.id)? {
                writeln!(out, "moved {id} to {to_index}")?;
            } else {
                writeln!(out, "unchanged {id}")?;
            }
        }
        Command::Resize { id, height } => {
            let entry = board.resize(id, height)?;
            writeln!(out, "resized {} to {}x{}", entry.id, entry.width, entry.height)?;
        }
        Command::Version => writeln!(out, "noteboard {}", core_version())?,
    }
    Ok(())
}

fn write_columns<W: Write>(entries: &[Entry], only: Option<EntryKind>, out: &mut W) -> Result<()> {
    let kinds = match only {
        Some(kind) => vec![kind],
        None => vec![EntryKind::Note, EntryKind::Task],
    };
    for kind in kinds {
        writeln!(out, "{}", kind.title())?;
        let column: Vec<&Entry> = entries.iter().filter(|entry| entry.kind == kind).collect();
        if column.is_empty() {
            writeln!(out, "  (empty)")?;
        }
        for (index, entry) in column.into_iter().enumerate() {
            writeln!(out, "  {index:>2}. {}", entry_line(entry))?;
        }
    }
    Ok(())
}

fn entry_line(entry: &Entry) -> String {
    let marker = match entry.kind {
        EntryKind::Task if entry.is_done => "[x] ",
        EntryKind::Task => "[ ] ",
        EntryKind::Note => "",
    };
    let deleted = if entry.is_active() { "" } else { " (deleted)" };
    format!("{marker}{} {}{deleted}", entry.id, preview(&entry.content))
}

fn preview(content: &str) -> String {
    let first_line = content.lines().next().unwrap_or_default();
    let mut preview: String = first_line.chars().take(PREVIEW_CHARS).collect();
    if first_line.chars().count() > PREVIEW_CHARS || content.lines().nth(1).is_some() {
        preview.push_str("...");
    }
    preview
}

fn write_entry_detail<W: Write>(entry: &Entry, out: &mut W) -> Result<()> {
    writeln!(out, "id:       {}", entry.id)?;
    writeln!(out, "kind:     {}", entry.kind)?;
    if entry.kind == EntryKind::Task {
        writeln!(out, "done:     {}", entry.is_done)?;
    }
    writeln!(out, "rank:     {}", entry.order_rank)?;
    writeln!(out, "size:     {}x{}", entry.width, entry.height)?;
    if let Some(deleted_at) = entry.deleted_at {
        writeln!(out, "deleted:  {deleted_at}")?;
    }
    writeln!(out, "created:  {}", entry.created_at)?;
    writeln!(out, "updated:  {}", entry.updated_at)?;
    writeln!(out)?;
    writeln!(out, "{}", entry.content)?;
    Ok(())
}

fn write_notifications<R, C, W>(board: &Board<R, C>, out: &mut W) -> Result<()>
where
    R: EntryRepository,
    C: Clock + Clone,
    W: Write,
{
    for notification in board.notifications() {
        let label = variant_label(notification.variant);
        match notification.action.as_ref().map(|action| (&action.label, action.payload)) {
            Some((action, BoardCommand::Restore(id))) => writeln!(
                out,
                "[{label}] {} ({action}: {})",
                notification.message,
                restore_hint(id)
            )?,
            None => writeln!(out, "[{label}] {}", notification.message)?,
        }
    }
    Ok(())
}

fn variant_label(variant: NotificationVariant) -> &'static str {
    match variant {
        NotificationVariant::Default => "info",
        NotificationVariant::Success => "ok",
        NotificationVariant::Warning => "warn",
        NotificationVariant::Destructive => "error",
    }
}

fn restore_hint(id: EntryId) -> String {
    format!("noteboard restore {id}")
}
