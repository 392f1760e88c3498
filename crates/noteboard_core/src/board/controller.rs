//! Board composition root.
//!
//! # Responsibility
//! - Own the entry store, selection, view mode, card sessions and
//!   notifications for one board.
//! - Turn user actions into gateway calls followed by a refetch.
//! - Apply one failure policy to every mutation.
//!
//! # Invariants
//! - Listing failures never surface as errors; the board just empties.
//! - Every failed mutation is logged, shown as a destructive notification
//!   and returned to the caller.
//! - A failed reorder refetches so local order matches the backend.
//! - At most one card is in editing mode at a time.
//! - Interactive resize sessions only exist in the tile view.

use crate::board::card::{clamp_height, CardEditor, ResizeHandle};
use crate::board::collision::{closest_center, Rect};
use crate::board::reorder::plan_reorder;
use crate::board::store::EntryStore;
use crate::board::view::{layout, Slot, ViewMode};
use crate::clock::Clock;
use crate::config::BoardSettings;
use crate::model::entry::{Entry, EntryDraft, EntryId, EntryKind, EntryPatch};
use crate::notify::{
    Notification, NotificationCenter, NotificationId, NotificationVariant, ShowOptions,
};
use crate::repo::entry_repo::{EntryRepository, RepoError};
use crate::service::entry_gateway::EntryGateway;
use log::{debug, warn};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DELETED_MESSAGE: &str = "Entry deleted";
pub const RESTORED_MESSAGE: &str = "Entry restored";
pub const UNDO_LABEL: &str = "Undo";

pub type BoardResult<T> = Result<T, BoardError>;

#[derive(Debug)]
pub enum BoardError {
    /// Blank content was submitted for a new entry.
    EmptyContent,
    /// The entry is not on the board.
    UnknownEntry(EntryId),
    /// Done state was set on an entry that is not a task.
    NotATask(EntryId),
    /// Interactive resize was started outside the tile view.
    ResizeUnavailable(ViewMode),
    /// Backend write failed.
    Repo(RepoError),
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "entry content cannot be blank"),
            Self::UnknownEntry(id) => write!(f, "entry is not on the board: {id}"),
            Self::NotATask(id) => write!(f, "only tasks can be marked done: {id}"),
            Self::ResizeUnavailable(_) => write!(f, "cards can only be resized in tile view"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for BoardError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// What a notification action asks the board to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardCommand {
    Restore(EntryId),
}

/// Headless note/task board.
pub struct Board<R: EntryRepository, C: Clock + Clone> {
    gateway: EntryGateway<R, C>,
    store: EntryStore,
    notifications: NotificationCenter<BoardCommand, C>,
    settings: BoardSettings,
    view_mode: ViewMode,
    editor: Option<CardEditor>,
    resizing: HashMap<EntryId, ResizeHandle>,
}

impl<R: EntryRepository, C: Clock + Clone> Board<R, C> {
    /// Builds an empty board; call [`Self::refresh`] to load entries.
    pub fn new(repo: R, clock: C, settings: BoardSettings) -> Self {
        let notifications = NotificationCenter::with_ttl(clock.clone(), settings.notification_ttl_ms);
        Self {
            gateway: EntryGateway::new(repo, clock),
            store: EntryStore::default(),
            notifications,
            settings,
            view_mode: ViewMode::default(),
            editor: None,
            resizing: HashMap::new(),
        }
    }

    pub fn gateway(&self) -> &EntryGateway<R, C> {
        &self.gateway
    }

    pub fn entries(&self) -> &[Entry] {
        self.store.entries()
    }

    pub fn entry(&self, id: EntryId) -> Option<&Entry> {
        self.store.get(id)
    }

    /// Entries of one kind in display order.
    pub fn column(&self, kind: EntryKind) -> Vec<Entry> {
        self.store.column(kind)
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn toggle_view(&mut self) -> ViewMode {
        self.view_mode = self.view_mode.toggled();
        if self.view_mode != ViewMode::Tile {
            self.resizing.clear();
        }
        self.view_mode
    }

    /// Slots for one column in the current view mode.
    pub fn layout(&self, kind: EntryKind) -> Vec<Slot> {
        layout(
            &self.column(kind),
            self.view_mode,
            &self.settings.layout_metrics(),
        )
    }

    /// Replaces local state with a full fetch.
    pub fn refresh(&mut self) {
        self.store.replace_all(self.gateway.list());
        if let Some(id) = self.selected() {
            match self.store.get(id) {
                Some(entry) => {
                    if let Some(editor) = self.editor.as_mut() {
                        editor.sync_content(&entry.content);
                    }
                }
                None => self.editor = None,
            }
        }
        let store = &self.store;
        self.resizing.retain(|id, handle| match store.get(*id) {
            Some(entry) => {
                handle.sync_from_entry(entry);
                true
            }
            None => false,
        });
    }

    pub fn create_note(&mut self, content: &str) -> BoardResult<Entry> {
        self.create(EntryKind::Note, content)
    }

    pub fn create_task(&mut self, content: &str) -> BoardResult<Entry> {
        self.create(EntryKind::Task, content)
    }

    /// Creates an entry with the configured default size and selects it.
    pub fn create(&mut self, kind: EntryKind, content: &str) -> BoardResult<Entry> {
        if content.trim().is_empty() {
            return Err(BoardError::EmptyContent);
        }
        let draft = EntryDraft::new(
            kind,
            content,
            self.settings.default_entry_width,
            self.settings.default_entry_height,
        );
        let created = self
            .gateway
            .create(&draft)
            .map_err(|err| self.fail("create", err))?;
        self.refresh();
        if self.store.get(created.id).is_some() {
            self.select(created.id)?;
        }
        Ok(created)
    }

    pub fn selected(&self) -> Option<EntryId> {
        self.editor.as_ref().map(CardEditor::entry_id)
    }

    pub fn editor(&self) -> Option<&CardEditor> {
        self.editor.as_ref()
    }

    /// Puts `id` into editing, committing any other card being edited.
    pub fn select(&mut self, id: EntryId) -> BoardResult<()> {
        if self.selected() == Some(id) {
            return Ok(());
        }
        let mut editor = CardEditor::new(self.store.get(id).ok_or(BoardError::UnknownEntry(id))?);
        self.blur()?;
        editor.select();
        self.editor = Some(editor);
        Ok(())
    }

    /// Replaces the selected card's edit buffer.
    pub fn input(&mut self, text: &str) {
        if let Some(editor) = self.editor.as_mut() {
            editor.input(text);
        }
    }

    /// Leaves editing; issues one content update when the text changed.
    ///
    /// The edit is merged into local state before the round trip and is
    /// not rolled back when the backend rejects it.
    pub fn blur(&mut self) -> BoardResult<Option<Entry>> {
        let Some(mut editor) = self.editor.take() else {
            return Ok(None);
        };
        let Some(content) = editor.blur() else {
            return Ok(None);
        };
        let id = editor.entry_id();
        let patch = EntryPatch::content(content);
        self.store
            .merge_patch(id, &patch, self.gateway.clock().now_ms());
        let updated = self
            .gateway
            .update(id, &patch)
            .map_err(|err| self.fail("update", err))?;
        self.store.upsert(updated.clone());
        Ok(Some(updated))
    }

    /// Checks or unchecks a task. Notes carry no done state.
    pub fn set_done(&mut self, id: EntryId, is_done: bool) -> BoardResult<Entry> {
        let entry = self.store.get(id).ok_or(BoardError::UnknownEntry(id))?;
        if entry.kind != EntryKind::Task {
            return Err(BoardError::NotATask(id));
        }
        self.update(id, EntryPatch::done(is_done))
    }

    /// Sends a partial update and refetches.
    pub fn update(&mut self, id: EntryId, patch: EntryPatch) -> BoardResult<Entry> {
        let updated = self
            .gateway
            .update(id, &patch)
            .map_err(|err| self.fail("update", err))?;
        self.refresh();
        Ok(updated)
    }

    /// Soft-deletes immediately and offers an undo notification.
    ///
    /// A pending edit on the same card is committed first so undo brings
    /// back the edited text.
    pub fn delete(&mut self, id: EntryId) -> BoardResult<NotificationId> {
        if self.selected() == Some(id) {
            self.blur()?;
        }
        self.gateway
            .soft_delete(id)
            .map_err(|err| self.fail("delete", err))?;
        self.refresh();
        Ok(self.notifications.show(
            DELETED_MESSAGE,
            ShowOptions::default().with_action(UNDO_LABEL, BoardCommand::Restore(id)),
        ))
    }

    /// Clears the tombstone and refetches.
    pub fn restore(&mut self, id: EntryId) -> BoardResult<()> {
        self.gateway
            .restore(id)
            .map_err(|err| self.fail("restore", err))?;
        self.refresh();
        self.notifications.show(
            RESTORED_MESSAGE,
            ShowOptions::variant(NotificationVariant::Success),
        );
        Ok(())
    }

    /// Runs a notification's action, if it is still live.
    ///
    /// Returns whether an action ran.
    pub fn invoke_notification(&mut self, id: NotificationId) -> BoardResult<bool> {
        match self.notifications.invoke_action(id) {
            Some(BoardCommand::Restore(entry_id)) => {
                self.restore(entry_id)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn dismiss_notification(&mut self, id: NotificationId) -> bool {
        self.notifications.dismiss(id)
    }

    pub fn notifications(&self) -> Vec<&Notification<BoardCommand>> {
        self.notifications.active().collect()
    }

    /// Drops expired notifications; returns how many went away.
    pub fn tick(&mut self) -> usize {
        self.notifications.expire()
    }

    /// Moves `active` to `over`'s position within `kind` and persists the
    /// whole column's ranks.
    ///
    /// Returns `false` when nothing moved and nothing was persisted.
    pub fn reorder(&mut self, kind: EntryKind, active: EntryId, over: EntryId) -> BoardResult<bool> {
        let Some(reordered) = plan_reorder(&self.column(kind), active, over) else {
            debug!("event=board_reorder module=board status=skipped kind={kind}");
            return Ok(false);
        };
        if let Err(err) = self.gateway.reorder(&reordered) {
            let err = self.fail("reorder", err);
            self.refresh();
            return Err(err);
        }
        self.refresh();
        Ok(true)
    }

    /// Drops `active` wherever `dragged` lands, using nearest-center
    /// collision against the column's current slots.
    pub fn drop_at(&mut self, kind: EntryKind, active: EntryId, dragged: Rect) -> BoardResult<bool> {
        let slots = self.layout(kind);
        let Some(over) = closest_center(&dragged, slots.into_iter().map(|slot| (slot.id, slot.rect)))
        else {
            return Ok(false);
        };
        self.reorder(kind, active, over)
    }

    /// Starts a resize drag. Only available in the tile view.
    pub fn begin_resize(&mut self, id: EntryId) -> BoardResult<()> {
        if self.view_mode != ViewMode::Tile {
            return Err(BoardError::ResizeUnavailable(self.view_mode));
        }
        let entry = self.store.get(id).ok_or(BoardError::UnknownEntry(id))?;
        self.resizing
            .entry(id)
            .or_insert_with(|| ResizeHandle::new(entry))
            .begin();
        Ok(())
    }

    /// Live height while dragging; nothing is persisted yet.
    pub fn resize_drag(&mut self, id: EntryId, dy: i64) -> Option<i64> {
        self.resizing.get_mut(&id).map(|handle| handle.drag_to(dy))
    }

    /// Rendered `(width, height)` of a card, including an in-progress drag.
    pub fn card_size(&self, id: EntryId) -> Option<(i64, i64)> {
        match self.resizing.get(&id) {
            Some(handle) => Some(handle.size()),
            None => self.store.get(id).map(crate::board::card::display_size),
        }
    }

    /// Finishes a drag and persists the final height.
    pub fn end_resize(&mut self, id: EntryId) -> BoardResult<Option<Entry>> {
        let Some(height) = self.resizing.get_mut(&id).and_then(ResizeHandle::end) else {
            return Ok(None);
        };
        self.resize(id, height).map(Some)
    }

    /// Persists a new card height (clamped to the card limits).
    pub fn resize(&mut self, id: EntryId, height: i64) -> BoardResult<Entry> {
        self.update(id, EntryPatch::height(clamp_height(height)))
    }

    fn fail(&mut self, operation: &str, err: RepoError) -> BoardError {
        warn!("event=board_{operation} module=board status=error error={err}");
        self.notifications.show(
            format!("Could not {operation} entry: {err}"),
            ShowOptions::variant(NotificationVariant::Destructive),
        );
        BoardError::Repo(err)
    }
}
