use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::card::{all_columns, BingoCard, CardId, Column, FREE_ROW, GRID_SIZE};
use crate::errors::CatalogError;

/// Size of the built-in card set.
pub const DEFAULT_CARD_COUNT: u32 = 400;

const DEFAULT_CATALOG_SEED: u64 = 0x1616_B1A6;

/// Supplies the cards available to a shop.
pub trait CardCatalog {
    /// Cards for `shop_id`, or the default set when the shop has none.
    fn cards(&self, shop_id: Option<&str>) -> Vec<BingoCard>;
}

/// Parses a JSON array of card records, rejecting malformed cards and duplicate ids.
pub fn parse_cards(json: &str) -> Result<Vec<BingoCard>, CatalogError> {
    let cards: Vec<BingoCard> = serde_json::from_str(json)?;
    let mut seen = HashSet::with_capacity(cards.len());
    for c in &cards {
        if !seen.insert(c.card_id()) {
            return Err(CatalogError::DuplicateId(c.card_id()));
        }
    }
    Ok(cards)
}

pub fn load_cards_file<P: AsRef<Path>>(path: P) -> Result<Vec<BingoCard>, CatalogError> {
    let text = fs::read_to_string(path)?;
    parse_cards(&text)
}

/// Generates `count` standard cards with ids `1..=count`.
///
/// Each column holds five distinct numbers from its own range and the centre is free.
/// The same seed always yields the same set.
pub fn generate_cards(count: u32, seed: u64) -> Vec<BingoCard> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(count as usize);
    for card_id in 1..=count {
        let mut columns = [[None; GRID_SIZE]; GRID_SIZE];
        for column in all_columns() {
            let mut pool: Vec<u8> = column.range().collect();
            pool.shuffle(&mut rng);
            for (row, n) in pool.into_iter().take(GRID_SIZE).enumerate() {
                columns[column.index()][row] = Some(n);
            }
        }
        columns[Column::N.index()][FREE_ROW] = None;
        match BingoCard::new(card_id, columns) {
            Ok(card) => out.push(card),
            Err(e) => {
                debug_assert!(false, "generated card {} failed validation: {}", card_id, e);
                tracing::error!(card_id, error = %e, "generated card failed validation");
            }
        }
    }
    out
}

/// The built-in card set used when no shop catalog is available.
pub fn default_cards() -> Vec<BingoCard> {
    generate_cards(DEFAULT_CARD_COUNT, DEFAULT_CATALOG_SEED)
}

pub fn find_card(cards: &[BingoCard], card_id: CardId) -> Option<&BingoCard> {
    cards.iter().find(|c| c.card_id() == card_id)
}

/// Looks up `<dir>/<shop_id>.json` and falls back to the built-in set on any failure.
#[derive(Debug, Clone)]
pub struct DirectoryCatalog {
    dir: PathBuf,
    fallback: Vec<BingoCard>,
}

impl DirectoryCatalog {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            dir: dir.into(),
            fallback: default_cards(),
        }
    }

    pub fn with_fallback<P: Into<PathBuf>>(dir: P, fallback: Vec<BingoCard>) -> Self {
        Self {
            dir: dir.into(),
            fallback,
        }
    }

    fn shop_file(&self, shop_id: &str) -> Option<PathBuf> {
        let safe = !shop_id.is_empty()
            && shop_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        safe.then(|| self.dir.join(format!("{}.json", shop_id)))
    }
}

impl CardCatalog for DirectoryCatalog {
    fn cards(&self, shop_id: Option<&str>) -> Vec<BingoCard> {
        let Some(shop_id) = shop_id else {
            tracing::debug!("no shop id, using default cards");
            return self.fallback.clone();
        };
        let Some(path) = self.shop_file(shop_id) else {
            tracing::warn!(shop_id, "shop id is not a valid file name, using default cards");
            return self.fallback.clone();
        };
        match load_cards_file(&path) {
            Ok(cards) => {
                tracing::info!(shop_id, count = cards.len(), "loaded shop card catalog");
                cards
            }
            Err(e) => {
                tracing::warn!(
                    shop_id,
                    path = %path.display(),
                    error = %e,
                    "shop catalog unavailable, using default cards"
                );
                self.fallback.clone()
            }
        }
    }
}

/// A fixed in-memory card list.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    cards: Vec<BingoCard>,
}

impl StaticCatalog {
    pub fn new(cards: Vec<BingoCard>) -> Self {
        Self { cards }
    }
}

impl CardCatalog for StaticCatalog {
    fn cards(&self, _shop_id: Option<&str>) -> Vec<BingoCard> {
        self.cards.clone()
    }
}
