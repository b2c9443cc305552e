//! # Grid Patterns
//!
//! Detects geometric arrangements of filled cells on the crafting grid. A grid may match
//! several patterns at once; each pattern is tested independently against its fixed cell
//! sets.

use super::{CraftingGrid, GRID_SIZE};
use crate::game::ItemType;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

const LINEAR: &[&[usize]] = &[
    &[0, 1, 2],
    &[3, 4, 5],
    &[6, 7, 8],
    &[0, 3, 6],
    &[1, 4, 7],
    &[2, 5, 8],
];

const DIAGONAL: &[&[usize]] = &[&[0, 4, 8], &[2, 4, 6]];

const SQUARE: &[&[usize]] = &[&[0, 1, 3, 4], &[1, 2, 4, 5], &[3, 4, 6, 7], &[4, 5, 7, 8]];

const CROSS: &[&[usize]] = &[&[1, 3, 4, 5, 7]];

// A corner and its two edge neighbours, without the center
const TRIANGLE: &[&[usize]] = &[&[0, 1, 3], &[1, 2, 5], &[3, 6, 7], &[5, 7, 8]];

// The center does not matter
const CIRCLE: &[&[usize]] = &[&[0, 1, 2, 3, 5, 6, 7, 8]];

const L_SHAPE: &[&[usize]] = &[&[0, 3, 6, 7], &[2, 5, 8, 7], &[0, 1, 2, 3], &[0, 1, 2, 5]];

/// The seven recognised grid patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternType {
    Linear,
    Diagonal,
    Square,
    Cross,
    Triangle,
    Circle,
    LShape,
}

impl PatternType {
    /// Every pattern, in detection order.
    pub fn all() -> [PatternType; 7] {
        [
            PatternType::Linear,
            PatternType::Diagonal,
            PatternType::Square,
            PatternType::Cross,
            PatternType::Triangle,
            PatternType::Circle,
            PatternType::LShape,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            PatternType::Linear => "linear",
            PatternType::Diagonal => "diagonal",
            PatternType::Square => "square",
            PatternType::Cross => "cross",
            PatternType::Triangle => "triangle",
            PatternType::Circle => "circle",
            PatternType::LShape => "l-shape",
        }
    }

    /// Cell sets, any one of which fully filled produces this pattern.
    pub fn cell_sets(self) -> &'static [&'static [usize]] {
        match self {
            PatternType::Linear => LINEAR,
            PatternType::Diagonal => DIAGONAL,
            PatternType::Square => SQUARE,
            PatternType::Cross => CROSS,
            PatternType::Triangle => TRIANGLE,
            PatternType::Circle => CIRCLE,
            PatternType::LShape => L_SHAPE,
        }
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A matched pattern and the cells that formed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternMatch {
    pub pattern: PatternType,
    /// Union of every fully filled cell set, ascending
    pub cells: Vec<usize>,
}

/// Everything pattern detection found on a grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternAnalysis {
    pub matches: Vec<PatternMatch>,
}

impl PatternAnalysis {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn patterns(&self) -> Vec<PatternType> {
        self.matches.iter().map(|m| m.pattern).collect()
    }

    pub fn contains(&self, pattern: PatternType) -> bool {
        self.matches.iter().any(|m| m.pattern == pattern)
    }

    /// Comma-joined pattern names, or None when nothing matched.
    pub fn pattern_tag(&self) -> Option<String> {
        if self.matches.is_empty() {
            return None;
        }
        let names: Vec<&str> = self.matches.iter().map(|m| m.pattern.name()).collect();
        Some(names.join(","))
    }

    /// Which matched patterns each cell belongs to.
    pub fn cell_patterns(&self) -> BTreeMap<usize, Vec<PatternType>> {
        let mut map: BTreeMap<usize, Vec<PatternType>> = BTreeMap::new();
        for matched in &self.matches {
            for cell in &matched.cells {
                map.entry(*cell).or_default().push(matched.pattern);
            }
        }
        map
    }
}

/// Finds every pattern formed by the grid's filled cells.
///
/// # Examples
///
/// ```
/// use runeforge::{analyze_grid, CraftingGrid, PatternType};
///
/// let grid = CraftingGrid::from_cells([
///     Some("iron"), Some("iron"), Some("iron"),
///     None, None, None,
///     None, None, None,
/// ]);
/// let analysis = analyze_grid(&grid);
/// assert_eq!(analysis.patterns(), vec![PatternType::Linear]);
/// assert_eq!(analysis.pattern_tag().as_deref(), Some("linear"));
/// ```
pub fn analyze_grid(grid: &CraftingGrid) -> PatternAnalysis {
    let filled: [bool; GRID_SIZE] = std::array::from_fn(|i| grid.is_filled(i));

    let matches = PatternType::all()
        .into_iter()
        .filter_map(|pattern| {
            let cells: BTreeSet<usize> = pattern
                .cell_sets()
                .iter()
                .filter(|set| set.iter().all(|&i| filled[i]))
                .flat_map(|set| set.iter().copied())
                .collect();
            if cells.is_empty() {
                None
            } else {
                Some(PatternMatch {
                    pattern,
                    cells: cells.into_iter().collect(),
                })
            }
        })
        .collect();

    PatternAnalysis { matches }
}

/// Bonus a pattern grants to a crafted item of a given type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternBonus {
    pub stat_bonus: BTreeMap<String, i32>,
    /// Rarity tiers added to the crafted item
    pub rarity_boost: u32,
    pub description: String,
}

impl PatternBonus {
    pub fn new(rarity_boost: u32, description: &str) -> Self {
        Self {
            stat_bonus: BTreeMap::new(),
            rarity_boost,
            description: description.to_string(),
        }
    }

    pub fn with_stat(mut self, name: &str, amount: i32) -> Self {
        self.stat_bonus.insert(name.to_string(), amount);
        self
    }
}

/// Static table of pattern bonuses keyed by pattern and crafted item type.
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    bonuses: HashMap<(PatternType, ItemType), PatternBonus>,
}

impl PatternRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pattern: PatternType, item_type: ItemType, bonus: PatternBonus) {
        self.bonuses.insert((pattern, item_type), bonus);
    }

    pub fn get(&self, pattern: PatternType, item_type: ItemType) -> Option<&PatternBonus> {
        self.bonuses.get(&(pattern, item_type))
    }

    /// Bonuses of every matched pattern that apply to `item_type`, in match order.
    pub fn bonuses_for(&self, analysis: &PatternAnalysis, item_type: ItemType) -> Vec<&PatternBonus> {
        analysis
            .matches
            .iter()
            .filter_map(|m| self.get(m.pattern, item_type))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.bonuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }
}
