//! # shopbingo-engine: Bingo Round Engine Core
//!
//! Rules and state for a single 75-ball bingo round in a shop setting. Validates cards,
//! draws numbers without replacement from a seedable RNG, evaluates winning patterns and
//! drives the round through its lifecycle. Timers, audio and network reporting are
//! injected collaborators, so the whole round can be stepped deterministically.
//!
//! ## Core Modules
//!
//! - [`card`] - Card records (column-major), validation and the row-major [`card::CardGrid`]
//! - [`called`] - Called-number set and ordered call history
//! - [`caller`] - Uniform draw without replacement over 1..=75
//! - [`pattern`] - Winning patterns and the non-crossing line search
//! - [`round`] - Round configuration and the [`round::RoundEngine`] state machine
//! - [`catalog`] - Shop card catalogs and the built-in 400-card set
//! - [`collaborators`] - Scheduler, reporting, announcer and observer seams
//! - [`announce`] - Announcement rendering per language
//! - [`errors`] - Error types for engine operations
//!
//! ## Quick Start
//!
//! ```rust
//! use shopbingo_engine::called::CalledSet;
//! use shopbingo_engine::catalog::generate_cards;
//! use shopbingo_engine::pattern::{evaluate, WinningPattern};
//!
//! let card = &generate_cards(1, 42)[0];
//! let grid = card.grid();
//!
//! // Mark every number on the first row
//! let called: CalledSet = (0..5).filter_map(|c| grid.cell(0, c)).collect();
//! let cells = evaluate(WinningPattern::OneLine, &grid, &called);
//! assert_eq!(cells.map(|c| c.len()), Some(5));
//! ```
//!
//! ## Deterministic Calling
//!
//! ```rust
//! use shopbingo_engine::caller::NumberCaller;
//!
//! let mut a = NumberCaller::new_with_seed(42);
//! let mut b = NumberCaller::new_with_seed(42);
//! for _ in 0..75 {
//!     assert_eq!(a.draw_next(), b.draw_next());
//! }
//! assert!(a.draw_next().is_err());
//! ```

pub mod announce;
pub mod called;
pub mod caller;
pub mod card;
pub mod catalog;
pub mod collaborators;
pub mod errors;
pub mod pattern;
pub mod round;
