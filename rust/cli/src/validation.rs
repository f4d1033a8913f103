//! Input parsing and validation for operator commands.
//!
//! Card selections and called-number lists come from flags; round commands come from the
//! operator prompt during a manual round.

use std::collections::BTreeSet;

use shopbingo_engine::called::MAX_NUMBER;
use shopbingo_engine::card::CardId;
use shopbingo_engine::round::Mode;

/// One line typed at the round prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum OperatorCommand {
    /// Empty line: draw the next number
    Next,
    /// Claim a win for a card
    Check(CardId),
    Pause,
    Resume,
    SwitchMode(Mode),
    Restart,
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse an operator line (case-insensitive).
///
/// ```rust
/// # use shopbingo_cli::validation::{parse_operator_input, OperatorCommand};
/// assert_eq!(parse_operator_input(""), OperatorCommand::Next);
/// assert_eq!(parse_operator_input("check 12"), OperatorCommand::Check(12));
/// assert_eq!(parse_operator_input("c 12"), OperatorCommand::Check(12));
/// assert_eq!(parse_operator_input("q"), OperatorCommand::Quit);
/// ```
pub fn parse_operator_input(input: &str) -> OperatorCommand {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some(first) = parts.first() else {
        return OperatorCommand::Next;
    };

    match *first {
        "n" | "next" => OperatorCommand::Next,
        "q" | "quit" => OperatorCommand::Quit,
        "p" | "pause" => OperatorCommand::Pause,
        "r" | "resume" => OperatorCommand::Resume,
        "auto" => OperatorCommand::SwitchMode(Mode::Auto),
        "manual" => OperatorCommand::SwitchMode(Mode::Manual),
        "restart" => OperatorCommand::Restart,
        "c" | "check" => {
            let Some(id) = parts.get(1) else {
                return OperatorCommand::Invalid(
                    "Check requires a card id (e.g., 'check 12')".to_string(),
                );
            };
            match id.parse::<CardId>() {
                Ok(id) if id > 0 => OperatorCommand::Check(id),
                _ => OperatorCommand::Invalid(format!("Invalid card id '{}'", id)),
            }
        }
        other => OperatorCommand::Invalid(format!(
            "Unrecognized command '{}'. Valid commands: <enter>, check <id>, pause, resume, auto, manual, restart, q",
            other
        )),
    }
}

/// Upper bound on the cards one round can sell.
pub const MAX_SELECTED_CARDS: u32 = 1_000;

/// Parse a card selection such as `"1,2,10-15"`.
pub fn parse_card_list(input: &str) -> Result<BTreeSet<CardId>, String> {
    let mut ids = BTreeSet::new();
    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if let Some((lo, hi)) = part.split_once('-') {
            let lo = parse_card_id(lo)?;
            let hi = parse_card_id(hi)?;
            if lo > hi || hi - lo >= MAX_SELECTED_CARDS {
                return Err(format!("Invalid card range '{}'", part));
            }
            ids.extend(lo..=hi);
        } else {
            ids.insert(parse_card_id(part)?);
        }
        if ids.len() > MAX_SELECTED_CARDS as usize {
            return Err(format!(
                "at most {} cards can be selected",
                MAX_SELECTED_CARDS
            ));
        }
    }
    if ids.is_empty() {
        return Err("at least one card must be selected".to_string());
    }
    Ok(ids)
}

fn parse_card_id(s: &str) -> Result<CardId, String> {
    match s.trim().parse::<CardId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(format!("Invalid card id '{}'", s.trim())),
    }
}

/// Parse a called-number list such as `"1,16,31"`. Duplicates collapse.
pub fn parse_called_list(input: &str) -> Result<Vec<u8>, String> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let n: u8 = part
            .parse()
            .map_err(|_| format!("Invalid number '{}'", part))?;
        if !(1..=MAX_NUMBER).contains(&n) {
            return Err(format!("Number {} is outside 1..={}", n, MAX_NUMBER));
        }
        if seen.insert(n) {
            out.push(n);
        }
    }
    Ok(out)
}

/// Validate a commission rate given on the command line.
pub fn validate_commission(rate: f64) -> Result<(), String> {
    if !(0.0..=1.0).contains(&rate) {
        return Err(format!("commission must be within 0..=1, got {}", rate));
    }
    Ok(())
}
