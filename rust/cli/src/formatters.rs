//! Terminal rendering for cards, calls and round results.
//!
//! Grids print one row per line under a `B I N G O` header. Plain numbers are
//! unmarked, `(n)` is a marked cell and `[n]` a cell of the winning pattern. The free
//! space prints as `**`.
//!
//! ```rust
//! use shopbingo_cli::formatters::format_recent;
//! assert_eq!(format_recent(&[75, 3]), "75 3");
//! ```

use std::fmt::Write as _;

use shopbingo_engine::announce::Announcement;
use shopbingo_engine::called::CalledSet;
use shopbingo_engine::caller::Call;
use shopbingo_engine::card::{CardGrid, Coord, GRID_SIZE, all_columns};
use shopbingo_engine::round::{Resolution, RoundResult};

const CELL_WIDTH: usize = 5;

/// Renders a card grid with marked and highlighted cells.
pub fn format_grid(grid: &CardGrid, called: &CalledSet, highlight: &[Coord]) -> String {
    let mut s = String::new();
    for column in all_columns() {
        let _ = write!(s, "{:^w$}", column.letter(), w = CELL_WIDTH);
    }
    s.push('\n');
    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            let coord = Coord::new(row, col);
            let label = match grid.at(coord) {
                Some(n) => n.to_string(),
                None => "**".to_string(),
            };
            let cell = if highlight.contains(&coord) {
                format!("[{}]", label)
            } else if grid.is_marked_at(coord, called) && grid.at(coord).is_some() {
                format!("({})", label)
            } else {
                label
            };
            let _ = write!(s, "{:^w$}", cell, w = CELL_WIDTH);
        }
        s.push('\n');
    }
    s
}

/// `Call 7: G-52`
pub fn format_call(index: usize, call: Call) -> String {
    format!("Call {}: {}", index, call)
}

/// Most recent calls first, space separated.
pub fn format_recent(recent: &[u8]) -> String {
    recent
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_announcement(announcement: &Announcement) -> String {
    match announcement {
        Announcement::Speech { text, lang } => format!("Announce [{}]: {}", lang, text),
        Announcement::Clip(file) => format!("Announce [clip]: {}", file),
    }
}

/// One-line summary of a resolved round.
pub fn format_result_summary(result: &RoundResult) -> String {
    match result.resolution {
        Resolution::Exhausted => format!(
            "Round {}: all numbers called, no winner",
            result.round_id
        ),
        Resolution::AutoCheck | Resolution::ManualCheck => {
            let ids = result
                .winner_ids()
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "Round {}: BINGO on card {} ({}) after {} calls",
                result.round_id, ids, result.pattern, result.calls
            )
        }
    }
}
