//! Drop-target geometry and payload assembly for drag reordering.
//!
//! During a drag the rendered order is rewritten locally on every pointer
//! move; on drop the settled order is submitted to the server as the full
//! canonical order. The geometry mirrors the usual list-drag rule: insert
//! before the first row whose vertical midpoint is still below the pointer.

use crate::api::OrderEntry;

/// Vertical extent of one rendered playlist row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowBounds {
    pub id: String,
    pub top: f32,
    pub height: f32,
}

impl RowBounds {
    fn midpoint(&self) -> f32 {
        self.top + self.height / 2.0
    }
}

/// Build row bounds for `ids` laid out as consecutive rows of `row_height`
/// starting at `top`, skipping the first `scroll` entries.
pub fn rows_for_list(ids: &[String], top: u16, row_height: u16, scroll: usize) -> Vec<RowBounds> {
    ids.iter()
        .skip(scroll)
        .enumerate()
        .map(|(i, id)| RowBounds {
            id: id.clone(),
            top: top as f32 + (i as u16 * row_height) as f32,
            height: row_height as f32,
        })
        .collect()
}

/// The id of the row the dragged element should be inserted before.
///
/// Candidates are the rows whose midpoint lies below `pointer_y`; among
/// them the one with the smallest strictly-negative `pointer - midpoint`
/// offset wins (the closest row from above). `None` means the dragged row
/// goes last. `rows` must not include the dragged row itself.
pub fn drop_target(rows: &[RowBounds], pointer_y: f32) -> Option<&str> {
    let mut best: Option<(f32, &RowBounds)> = None;

    for row in rows {
        let offset = pointer_y - row.midpoint();
        if offset < 0.0 {
            match best {
                Some((best_offset, _)) if offset <= best_offset => {}
                _ => best = Some((offset, row)),
            }
        }
    }

    best.map(|(_, row)| row.id.as_str())
}

/// Rebuild `order` with `dragged` moved in front of `insert_before`
/// (or to the end when `insert_before` is `None`).
pub fn apply_move(order: &[String], dragged: &str, insert_before: Option<&str>) -> Vec<String> {
    let mut result: Vec<String> = order.iter().filter(|id| *id != dragged).cloned().collect();

    let at = insert_before
        .and_then(|target| result.iter().position(|id| id == target))
        .unwrap_or(result.len());
    result.insert(at, dragged.to_string());
    result
}

/// Map a settled rendered order to the reorder submission payload:
/// zero-based positions matching row order exactly.
pub fn order_payload(order: &[String]) -> Vec<OrderEntry> {
    order
        .iter()
        .enumerate()
        .map(|(position, id)| OrderEntry {
            song_id: id.clone(),
            position,
        })
        .collect()
}
