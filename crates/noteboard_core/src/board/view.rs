//! Column filtering and slot layout for list and tile modes.
//!
//! # Invariants
//! - A column only ever contains entries of one kind, in store order.
//! - `layout` yields exactly one slot per entry, in the same order.

use crate::board::card::display_size;
use crate::board::collision::Rect;
use crate::model::entry::{Entry, EntryId, EntryKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    List,
    #[default]
    Tile,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::List => Self::Tile,
            Self::Tile => Self::List,
        }
    }
}

/// Geometry knobs for [`layout`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    pub tile_columns: usize,
    pub tile_column_width: f64,
    pub gap: f64,
    pub list_row_height: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            tile_columns: 3,
            tile_column_width: 200.0,
            gap: 12.0,
            list_row_height: 48.0,
        }
    }
}

/// Where one entry is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Slot {
    pub id: EntryId,
    pub rect: Rect,
}

/// Entries of `kind`, preserving order.
pub fn filter_kind(entries: &[Entry], kind: EntryKind) -> Vec<Entry> {
    entries
        .iter()
        .filter(|entry| entry.kind == kind)
        .cloned()
        .collect()
}

/// Lays a column out as stacked rows or as a shortest-column-first tile grid.
pub fn layout(column: &[Entry], mode: ViewMode, metrics: &LayoutMetrics) -> Vec<Slot> {
    match mode {
        ViewMode::List => list_layout(column, metrics),
        ViewMode::Tile => tile_layout(column, metrics),
    }
}

fn list_layout(column: &[Entry], metrics: &LayoutMetrics) -> Vec<Slot> {
    let row_width = metrics.tile_column_width * metrics.tile_columns.max(1) as f64;
    column
        .iter()
        .enumerate()
        .map(|(index, entry)| Slot {
            id: entry.id,
            rect: Rect::new(
                0.0,
                index as f64 * (metrics.list_row_height + metrics.gap),
                row_width,
                metrics.list_row_height,
            ),
        })
        .collect()
}

fn tile_layout(column: &[Entry], metrics: &LayoutMetrics) -> Vec<Slot> {
    let mut column_heights = vec![0.0_f64; metrics.tile_columns.max(1)];
    column
        .iter()
        .map(|entry| {
            let (_, height) = display_size(entry);
            let mut target = 0;
            for (index, used) in column_heights.iter().enumerate() {
                if *used < column_heights[target] {
                    target = index;
                }
            }
            let x = target as f64 * (metrics.tile_column_width + metrics.gap);
            let y = column_heights[target];
            column_heights[target] += height as f64 + metrics.gap;
            Slot {
                id: entry.id,
                rect: Rect::new(x, y, metrics.tile_column_width, height as f64),
            }
        })
        .collect()
}
