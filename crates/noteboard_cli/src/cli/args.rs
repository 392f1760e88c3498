use clap::{Parser, Subcommand, ValueEnum};
use noteboard_core::EntryKind;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(author, version, about = "Note and task board", long_about = None)]
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to the board database (overrides the config file)
    #[arg(long, value_name = "DB", global = true)]
    pub db: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace), logged to stderr
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Note,
    Task,
}

impl From<KindArg> for EntryKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Note => EntryKind::Note,
            KindArg::Task => EntryKind::Task,
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List entries column by column
    List {
        /// Only show one column
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,

        /// Print entries as JSON
        #[arg(long)]
        json: bool,

        /// Include soft-deleted entries
        #[arg(long)]
        include_deleted: bool,
    },

    /// Create a note
    AddNote {
        #[arg(value_name = "TEXT", required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Create a task
    AddTask {
        #[arg(value_name = "TEXT", required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Show one entry, deleted or not
    Show {
        #[arg(value_name = "ID")]
        id: Uuid,

        #[arg(long)]
        json: bool,
    },

    /// Replace an entry's text
    Edit {
        #[arg(value_name = "ID")]
        id: Uuid,

        #[arg(value_name = "TEXT", required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Mark a task as done
    Done {
        #[arg(value_name = "ID")]
        id: Uuid,
    },

    /// Mark a task as not done
    Undone {
        #[arg(value_name = "ID")]
        id: Uuid,
    },

    /// Soft-delete an entry
    Delete {
        #[arg(value_name = "ID")]
        id: Uuid,
    },

    /// Bring back a soft-deleted entry
    Restore {
        #[arg(value_name = "ID")]
        id: Uuid,
    },

    /// Move an entry to a position within its column
    Move {
        #[arg(value_name = "ID")]
        id: Uuid,

        /// Zero-based target position
        #[arg(value_name = "TO_INDEX")]
        to_index: usize,
    },

    /// Set a card's height in pixels
    Resize {
        #[arg(value_name = "ID")]
        id: Uuid,

        #[arg(value_name = "HEIGHT")]
        height: i64,
    },

    /// Print the core version
    Version,
}

impl Command {
    /// Subcommand name as typed, for log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::List { .. } => "list",
            Self::AddNote { .. } => "add-note",
            Self::AddTask { .. } => "add-task",
            Self::Show { .. } => "show",
            Self::Edit { .. } => "edit",
            Self::Done { .. } => "done",
            Self::Undone { .. } => "undone",
            Self::Delete { .. } => "delete",
            Self::Restore { .. } => "restore",
            Self::Move { .. } => "move",
            Self::Resize { .. } => "resize",
            Self::Version => "version",
        }
    }
}
