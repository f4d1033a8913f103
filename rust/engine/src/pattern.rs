//! Winning pattern evaluation.
//!
//! Every matcher is a pure function of a [`CardGrid`] and a [`CalledSet`] and returns the
//! cells that make up the satisfied pattern, or `None`. Line-based patterns share
//! [`completed_lines`], which scans rows top to bottom, then columns left to right, then the
//! main diagonal and the anti-diagonal. Whenever a pattern needs only some of the completed
//! lines, the earliest lines in that scan order are the ones reported.
//!
//! ```
//! use shopbingo_engine::called::CalledSet;
//! use shopbingo_engine::card::{BingoCard, Coord};
//! use shopbingo_engine::pattern::{evaluate, WinningPattern};
//!
//! let card = BingoCard::new(
//!     1,
//!     [
//!         [Some(1), Some(2), Some(3), Some(4), Some(5)],
//!         [Some(16), Some(17), Some(18), Some(19), Some(20)],
//!         [Some(31), Some(32), None, Some(34), Some(35)],
//!         [Some(46), Some(47), Some(48), Some(49), Some(50)],
//!         [Some(61), Some(62), Some(63), Some(64), Some(65)],
//!     ],
//! )
//! .unwrap();
//! let called: CalledSet = [1, 16, 31, 46, 61].into_iter().collect();
//! let cells = evaluate(WinningPattern::OneLine, &card.grid(), &called).unwrap();
//! assert_eq!(cells, (0..5).map(|c| Coord::new(0, c)).collect::<Vec<_>>());
//! assert!(evaluate(WinningPattern::FourCorners, &card.grid(), &called).is_none());
//! ```

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::called::CalledSet;
use crate::card::{is_marked, CardGrid, Coord, GRID_SIZE};
use crate::errors::PatternParseError;

const CENTER: usize = GRID_SIZE / 2;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Row,
    Col,
    Diag,
}

/// A full row, column or diagonal of the grid.
///
/// Diagonal index 0 runs top-left to bottom-right, index 1 top-right to bottom-left.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Line {
    pub kind: LineKind,
    pub index: usize,
    pub coords: [Coord; GRID_SIZE],
}

impl Line {
    pub fn row(index: usize) -> Self {
        Self {
            kind: LineKind::Row,
            index,
            coords: std::array::from_fn(|c| Coord::new(index, c)),
        }
    }

    pub fn col(index: usize) -> Self {
        Self {
            kind: LineKind::Col,
            index,
            coords: std::array::from_fn(|r| Coord::new(r, index)),
        }
    }

    pub fn diag(index: usize) -> Self {
        Self {
            kind: LineKind::Diag,
            index,
            coords: std::array::from_fn(|i| {
                if index == 0 {
                    Coord::new(i, i)
                } else {
                    Coord::new(i, GRID_SIZE - 1 - i)
                }
            }),
        }
    }

    /// All twelve lines in scan order.
    pub fn all() -> Vec<Line> {
        let mut v = Vec::with_capacity(2 * GRID_SIZE + 2);
        v.extend((0..GRID_SIZE).map(Line::row));
        v.extend((0..GRID_SIZE).map(Line::col));
        v.push(Line::diag(0));
        v.push(Line::diag(1));
        v
    }

    fn mask(&self) -> u32 {
        self.coords
            .iter()
            .fold(0, |m, c| m | 1 << (c.row * GRID_SIZE + c.col))
    }

    /// Two lines cross when they share at least one cell.
    pub fn crosses(&self, other: &Line) -> bool {
        self.mask() & other.mask() != 0
    }

    pub fn is_complete(&self, grid: &CardGrid, called: &CalledSet) -> bool {
        self.coords.iter().all(|c| is_marked(grid.at(*c), called))
    }
}

/// Every fully marked line, in scan order.
pub fn completed_lines(grid: &CardGrid, called: &CalledSet) -> Vec<Line> {
    Line::all()
        .into_iter()
        .filter(|l| l.is_complete(grid, called))
        .collect()
}

/// Searches for `k` pairwise non-crossing lines among `lines`.
///
/// Backtracks over combinations in slice order, abandons a branch as soon as the newest
/// line crosses one already chosen, and returns the first complete combination found.
pub fn find_non_crossing(lines: &[Line], k: usize) -> Option<Vec<Line>> {
    fn search(lines: &[Line], start: usize, k: usize, combo: &mut Vec<Line>) -> bool {
        if combo.len() == k {
            return true;
        }
        for i in start..lines.len() {
            // not enough lines left to fill the combination
            if lines.len() - i < k - combo.len() {
                break;
            }
            let candidate = lines[i];
            if combo.iter().any(|l| l.crosses(&candidate)) {
                continue;
            }
            combo.push(candidate);
            if search(lines, i + 1, k, combo) {
                return true;
            }
            combo.pop();
        }
        false
    }

    if k == 0 || lines.len() < k {
        return None;
    }
    let mut combo = Vec::with_capacity(k);
    if search(lines, 0, k, &mut combo) {
        Some(combo)
    } else {
        None
    }
}

/// Closed set of winning patterns a round can be configured with.
///
/// Names round-trip through [`fmt::Display`] / [`FromStr`] and serde as the labels
/// operators see, e.g. `"Inner Corners + Center"` or `"4 Lines Any Direction"`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WinningPattern {
    OneLine,
    TwoLines,
    FullHouse,
    FourCorners,
    Cross,
    InnerCornersAndCenter,
    TwoVerticalOneHorizontal,
    TwoHorizontalTwoVertical,
    XPlusOneHorizontal,
    LargeTPlusDiagonal,
    /// At least `n` completed lines of any kind, `n` in 3..=6.
    AnyDirection(u8),
    /// Exactly `n` pairwise non-crossing completed lines, `n` in 3..=4.
    NonCrossing(u8),
    /// Any of the patterns above.
    All,
}

impl WinningPattern {
    pub fn any_direction(lines: u8) -> Option<Self> {
        (3..=6)
            .contains(&lines)
            .then_some(WinningPattern::AnyDirection(lines))
    }

    pub fn non_crossing(lines: u8) -> Option<Self> {
        (3..=4)
            .contains(&lines)
            .then_some(WinningPattern::NonCrossing(lines))
    }

    /// Every single pattern, i.e. everything `All` combines.
    pub fn singles() -> Vec<WinningPattern> {
        use WinningPattern::*;
        vec![
            OneLine,
            TwoLines,
            FullHouse,
            FourCorners,
            Cross,
            InnerCornersAndCenter,
            TwoVerticalOneHorizontal,
            TwoHorizontalTwoVertical,
            XPlusOneHorizontal,
            LargeTPlusDiagonal,
            AnyDirection(3),
            AnyDirection(4),
            AnyDirection(5),
            AnyDirection(6),
            NonCrossing(3),
            NonCrossing(4),
        ]
    }

    /// Every selectable pattern, `All` first.
    pub fn catalog() -> Vec<WinningPattern> {
        let mut v = vec![WinningPattern::All];
        v.extend(Self::singles());
        v
    }

    pub fn name(&self) -> String {
        match self {
            WinningPattern::OneLine => "1 Line".into(),
            WinningPattern::TwoLines => "2 Lines".into(),
            WinningPattern::FullHouse => "Full House".into(),
            WinningPattern::FourCorners => "Four Corners".into(),
            WinningPattern::Cross => "Cross".into(),
            WinningPattern::InnerCornersAndCenter => "Inner Corners + Center".into(),
            WinningPattern::TwoVerticalOneHorizontal => "2 Vertical + 1 Horizontal".into(),
            WinningPattern::TwoHorizontalTwoVertical => "2 Horizontal + 2 Vertical".into(),
            WinningPattern::XPlusOneHorizontal => "X + 1 Horizontal".into(),
            WinningPattern::LargeTPlusDiagonal => "Large T + Diagonal".into(),
            WinningPattern::AnyDirection(n) => format!("{} Lines Any Direction", n),
            WinningPattern::NonCrossing(n) => format!("{} Non Crossing Lines", n),
            WinningPattern::All => "All".into(),
        }
    }
}

impl fmt::Display for WinningPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for WinningPattern {
    type Err = PatternParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        WinningPattern::catalog()
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PatternParseError(wanted.to_string()))
    }
}

impl TryFrom<String> for WinningPattern {
    type Error = PatternParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WinningPattern> for String {
    fn from(p: WinningPattern) -> Self {
        p.name()
    }
}

/// Evaluates `pattern` and returns the deduplicated winning cells, or `None`.
pub fn evaluate(pattern: WinningPattern, grid: &CardGrid, called: &CalledSet) -> Option<Vec<Coord>> {
    Matcher::new(grid, called).evaluate(pattern)
}

pub fn is_satisfied(pattern: WinningPattern, grid: &CardGrid, called: &CalledSet) -> bool {
    evaluate(pattern, grid, called).is_some()
}

pub fn one_line(grid: &CardGrid, called: &CalledSet) -> Option<Vec<Coord>> {
    evaluate(WinningPattern::OneLine, grid, called)
}

pub fn two_lines(grid: &CardGrid, called: &CalledSet) -> Option<Vec<Coord>> {
    evaluate(WinningPattern::TwoLines, grid, called)
}

pub fn full_house(grid: &CardGrid, called: &CalledSet) -> Option<Vec<Coord>> {
    evaluate(WinningPattern::FullHouse, grid, called)
}

pub fn four_corners(grid: &CardGrid, called: &CalledSet) -> Option<Vec<Coord>> {
    evaluate(WinningPattern::FourCorners, grid, called)
}

pub fn cross(grid: &CardGrid, called: &CalledSet) -> Option<Vec<Coord>> {
    evaluate(WinningPattern::Cross, grid, called)
}

pub fn inner_corners_and_center(grid: &CardGrid, called: &CalledSet) -> Option<Vec<Coord>> {
    evaluate(WinningPattern::InnerCornersAndCenter, grid, called)
}

pub fn lines_any_direction(grid: &CardGrid, called: &CalledSet, n: u8) -> Option<Vec<Coord>> {
    evaluate(WinningPattern::AnyDirection(n), grid, called)
}

pub fn non_crossing_lines(grid: &CardGrid, called: &CalledSet, n: u8) -> Option<Vec<Coord>> {
    evaluate(WinningPattern::NonCrossing(n), grid, called)
}

pub fn all_patterns(grid: &CardGrid, called: &CalledSet) -> Option<Vec<Coord>> {
    evaluate(WinningPattern::All, grid, called)
}

/// Evaluation context: completed lines are scanned once and shared by every pattern.
struct Matcher<'a> {
    grid: &'a CardGrid,
    called: &'a CalledSet,
    lines: Vec<Line>,
}

impl<'a> Matcher<'a> {
    fn new(grid: &'a CardGrid, called: &'a CalledSet) -> Self {
        Self {
            grid,
            called,
            lines: completed_lines(grid, called),
        }
    }

    fn evaluate(&self, pattern: WinningPattern) -> Option<Vec<Coord>> {
        use WinningPattern::*;
        let cells = match pattern {
            OneLine => self.first_lines_all(1),
            TwoLines => self.first_lines_all(2),
            FullHouse => self.fixed(all_cells()),
            FourCorners => self.fixed(four_corner_cells()),
            Cross => self.fixed(cross_cells()),
            InnerCornersAndCenter => self.fixed(inner_corner_cells()),
            TwoVerticalOneHorizontal => {
                let cols = self.of_kind(LineKind::Col);
                let rows = self.of_kind(LineKind::Row);
                (cols.len() >= 2 && !rows.is_empty())
                    .then(|| flatten(cols[..2].iter().chain(&rows[..1])))
            }
            TwoHorizontalTwoVertical => {
                let rows = self.of_kind(LineKind::Row);
                let cols = self.of_kind(LineKind::Col);
                (rows.len() >= 2 && cols.len() >= 2)
                    .then(|| flatten(rows[..2].iter().chain(&cols[..2])))
            }
            XPlusOneHorizontal => {
                let diags = self.of_kind(LineKind::Diag);
                let rows = self.of_kind(LineKind::Row);
                (diags.len() == 2 && !rows.is_empty())
                    .then(|| flatten(diags.iter().chain(&rows[..1])))
            }
            LargeTPlusDiagonal => {
                let top = self.find(LineKind::Row, 0);
                let middle = self.find(LineKind::Col, CENTER);
                let diag = self.of_kind(LineKind::Diag).into_iter().next();
                match (top, middle, diag) {
                    (Some(t), Some(m), Some(d)) => Some(flatten([t, m, d].iter())),
                    _ => None,
                }
            }
            AnyDirection(n) => {
                let n = usize::from(n);
                (n > 0 && self.lines.len() >= n).then(|| flatten(self.lines[..n].iter()))
            }
            NonCrossing(n) => {
                find_non_crossing(&self.lines, usize::from(n)).map(|set| flatten(set.iter()))
            }
            All => self.union_of_singles(),
        };
        cells.map(dedupe)
    }

    /// Satisfied with at least `min` lines; reports every completed line.
    fn first_lines_all(&self, min: usize) -> Option<Vec<Coord>> {
        (self.lines.len() >= min).then(|| flatten(self.lines.iter()))
    }

    fn fixed(&self, cells: Vec<Coord>) -> Option<Vec<Coord>> {
        let marked = cells
            .iter()
            .all(|c| self.grid.is_marked_at(*c, self.called));
        marked.then_some(cells)
    }

    fn of_kind(&self, kind: LineKind) -> Vec<Line> {
        self.lines.iter().filter(|l| l.kind == kind).copied().collect()
    }

    fn find(&self, kind: LineKind, index: usize) -> Option<Line> {
        self.lines
            .iter()
            .find(|l| l.kind == kind && l.index == index)
            .copied()
    }

    fn union_of_singles(&self) -> Option<Vec<Coord>> {
        let mut union = Vec::new();
        let mut any = false;
        for p in WinningPattern::singles() {
            if let Some(cells) = self.evaluate(p) {
                any = true;
                union.extend(cells);
            }
        }
        any.then_some(union)
    }
}

fn flatten<'l>(lines: impl Iterator<Item = &'l Line>) -> Vec<Coord> {
    lines.flat_map(|l| l.coords).collect()
}

/// Removes repeated cells, keeping first occurrences in order.
pub fn dedupe(cells: Vec<Coord>) -> Vec<Coord> {
    let mut seen = HashSet::with_capacity(cells.len());
    cells.into_iter().filter(|c| seen.insert(*c)).collect()
}

fn all_cells() -> Vec<Coord> {
    (0..GRID_SIZE)
        .flat_map(|r| (0..GRID_SIZE).map(move |c| Coord::new(r, c)))
        .collect()
}

fn four_corner_cells() -> Vec<Coord> {
    let last = GRID_SIZE - 1;
    vec![
        Coord::new(0, 0),
        Coord::new(0, last),
        Coord::new(last, 0),
        Coord::new(last, last),
    ]
}

fn cross_cells() -> Vec<Coord> {
    let mut v: Vec<Coord> = (0..GRID_SIZE).map(|c| Coord::new(CENTER, c)).collect();
    v.extend(
        (0..GRID_SIZE)
            .filter(|r| *r != CENTER)
            .map(|r| Coord::new(r, CENTER)),
    );
    v
}

fn inner_corner_cells() -> Vec<Coord> {
    vec![
        Coord::new(1, 1),
        Coord::new(1, 3),
        Coord::new(3, 1),
        Coord::new(3, 3),
        Coord::new(CENTER, CENTER),
    ]
}
