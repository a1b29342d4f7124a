// ===== keyforge-core/src/layout.rs =====
use crate::consts::{STANDARD_ALPHABET, STANDARD_ROWS, WIDE_ROWS};
use crate::error::{KeyForgeError, KfResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A grid coordinate. `col` ranges over the row's width; `row` is 0..3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub col: usize,
    pub row: usize,
}

impl Position {
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

/// Left-pinky (0) through right-pinky (7). Left hand is `0..=3`, right hand
/// is `4..=7`; index fingers are `3` and `4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Finger {
    LeftPinky = 0,
    LeftRing = 1,
    LeftMiddle = 2,
    LeftIndex = 3,
    RightIndex = 4,
    RightMiddle = 5,
    RightRing = 6,
    RightPinky = 7,
}

impl Finger {
    pub const ALL: [Finger; 8] = [
        Finger::LeftPinky,
        Finger::LeftRing,
        Finger::LeftMiddle,
        Finger::LeftIndex,
        Finger::RightIndex,
        Finger::RightMiddle,
        Finger::RightRing,
        Finger::RightPinky,
    ];

    #[inline(always)]
    pub fn from_u8(v: u8) -> KfResult<Self> {
        Self::ALL
            .into_iter()
            .find(|f| *f as u8 == v)
            .ok_or_else(|| KeyForgeError::Layout(format!("finger index out of range: {v}")))
    }

    #[inline(always)]
    pub fn is_left(self) -> bool {
        (self as u8) < 4
    }

    #[inline(always)]
    pub fn is_index(self) -> bool {
        matches!(self, Finger::LeftIndex | Finger::RightIndex)
    }
}

/// Row widths for a layout's grid; either the standard 30-key variant or the
/// wide 33-key variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowWidths(pub [usize; 3]);

impl RowWidths {
    pub fn standard() -> Self {
        Self(STANDARD_ROWS)
    }

    pub fn wide() -> Self {
        Self(WIDE_ROWS)
    }

    pub fn is_wide(self) -> bool {
        self.0 == WIDE_ROWS
    }

    pub fn positions(self) -> impl Iterator<Item = Position> {
        let widths = self.0;
        (0..3).flat_map(move |row| (0..widths[row]).map(move |col| Position::new(col, row)))
    }
}

/// A keyboard layout: a key grid plus the bidirectional grapheme/position
/// maps and finger assignment derived from it.
///
/// Invariant (L1): `keymap[keys[r][c]] == (c, r)` for every `(r, c)`.
/// Invariant (L3): `fingermatrix`/`fingermap` never change after construction;
/// only `keys`+`keymap` mutate on swap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layout {
    pub name: String,
    pub widths: RowWidths,
    pub keys: Vec<Vec<String>>,
    pub keymap: HashMap<String, Position>,
    pub fingermatrix: HashMap<Position, Finger>,
    pub fingermap: HashMap<Finger, Vec<Position>>,
    pub total: f64,
}

impl Layout {
    /// Parses the 7-line textual layout form: name, 3 key rows, 3
    /// finger-matrix rows, all whitespace-separated.
    pub fn load(text: &str, total: f64) -> KfResult<Self> {
        let lines: Vec<&str> = text.lines().collect();
        if lines.len() < 7 {
            return Err(KeyForgeError::Layout(format!(
                "expected 7 lines (name + 3 key rows + 3 finger rows), got {}",
                lines.len()
            )));
        }
        let name = lines[0].trim().to_string();
        let key_rows: Vec<Vec<String>> = lines[1..4]
            .iter()
            .map(|l| l.split_whitespace().map(|s| s.to_string()).collect())
            .collect();
        let widths = RowWidths([key_rows[0].len(), key_rows[1].len(), key_rows[2].len()]);

        let mut fingermatrix = HashMap::new();
        for (row, line) in lines[4..7].iter().enumerate() {
            for (col, tok) in line.split_whitespace().enumerate() {
                let f: u8 = tok.parse().map_err(|_| {
                    KeyForgeError::Layout(format!("non-integer finger cell: {tok:?}"))
                })?;
                fingermatrix.insert(Position::new(col, row), Finger::from_u8(f)?);
            }
        }

        let mut fingermap: HashMap<Finger, Vec<Position>> = HashMap::new();
        for (&pos, &finger) in &fingermatrix {
            fingermap.entry(finger).or_default().push(pos);
        }
        for positions in fingermap.values_mut() {
            positions.sort_by_key(|p| (p.row, p.col));
        }

        let keymap = gen_keymap(&key_rows);

        Ok(Layout {
            name,
            widths,
            keys: key_rows,
            keymap,
            fingermatrix,
            fingermap,
            total,
        })
    }

    #[inline(always)]
    pub fn grapheme_at(&self, pos: Position) -> &str {
        &self.keys[pos.row][pos.col]
    }

    #[inline(always)]
    pub fn finger_at(&self, pos: Position) -> Option<Finger> {
        self.fingermatrix.get(&pos).copied()
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.widths.positions()
    }

    /// Deep copy; the copy shares no mutable containers with the source, a
    /// requirement for worker safety under parallel optimization.
    pub fn deep_copy(&self) -> Self {
        self.clone()
    }

    /// Exchanges the graphemes at `a` and `b`, then repairs the keymap
    /// entries for the two graphemes now occupying those positions. O(1);
    /// preserves invariant L1.
    #[inline(always)]
    pub fn swap(&mut self, a: Position, b: Position) {
        if a == b {
            return;
        }
        let ga = std::mem::take(&mut self.keys[a.row][a.col]);
        let gb = std::mem::take(&mut self.keys[b.row][b.col]);
        self.keymap.insert(ga.clone(), b);
        self.keymap.insert(gb.clone(), a);
        self.keys[b.row][b.col] = ga;
        self.keys[a.row][a.col] = gb;
    }

    /// Against the fixed alphabet `a..z,./;'`, returns `(duplicates, missing)`.
    pub fn duplicates_and_missing(&self) -> (Vec<String>, Vec<String>) {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for row in &self.keys {
            for g in row {
                *seen.entry(g.as_str()).or_insert(0) += 1;
            }
        }
        let duplicates = STANDARD_ALPHABET
            .chars()
            .map(|c| c.to_string())
            .filter(|g| seen.get(g.as_str()).copied().unwrap_or(0) > 1)
            .collect();
        let missing = STANDARD_ALPHABET
            .chars()
            .map(|c| c.to_string())
            .filter(|g| !seen.contains_key(g.as_str()))
            .collect();
        (duplicates, missing)
    }
}

/// Rebuilds the grapheme->position inverse map from a key grid.
pub fn gen_keymap(keys: &[Vec<String>]) -> HashMap<String, Position> {
    let mut keymap = HashMap::new();
    for (row, cols) in keys.iter().enumerate() {
        for (col, g) in cols.iter().enumerate() {
            keymap.insert(g.clone(), Position::new(col, row));
        }
    }
    keymap
}
