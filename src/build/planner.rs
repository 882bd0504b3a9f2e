//! Pick-and-place build planning over a quantized color grid
//!
//! The planner visits cells in row-major order (y ascending, then x
//! ascending). Each cell produces four actions: travel to the staging bin of
//! its color, pick a brick, travel to the cell, place the brick. Codes that
//! are not bin keys are classified by keyword before falling back to the
//! layout's default bin.

use std::collections::HashMap;
use std::fmt;

use crate::color::ColorCode;
use crate::io::error::{PixelMapError, Result};
use crate::spatial::Grid;

/// Planar position in build space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coordinate {
    /// Horizontal position
    pub x: i32,
    /// Vertical position
    pub y: i32,
}

impl Coordinate {
    /// Create a coordinate
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// One atomic step of a build sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Travel to a coordinate
    Move {
        /// Destination
        to: Coordinate,
    },
    /// Pick a brick from the bin of a color
    Pick {
        /// Resolved bin key
        color: ColorCode,
    },
    /// Place the held brick at the current position
    Place,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move { to } => write!(f, "Move {to}"),
            Self::Pick { color } => write!(f, "Pick {color}"),
            Self::Place => f.write_str("Place"),
        }
    }
}

/// Staging coordinates per bin key, with a designated default bin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinLayout {
    bins: HashMap<ColorCode, Coordinate>,
    default_key: ColorCode,
}

impl BinLayout {
    /// Build a layout from bin coordinates and the default bin key
    ///
    /// # Errors
    ///
    /// Returns `MissingDefaultBin` if `default_key` has no coordinate
    pub fn new(bins: HashMap<ColorCode, Coordinate>, default_key: ColorCode) -> Result<Self> {
        if !bins.contains_key(&default_key) {
            return Err(PixelMapError::MissingDefaultBin {
                key: default_key.to_string(),
            });
        }
        Ok(Self { bins, default_key })
    }

    /// Bins for the reference brick palette, lined up left of the build area
    pub fn reference() -> Self {
        let bins = [
            ('R', -2),
            ('U', -3),
            ('Y', -4),
            ('G', -5),
            ('W', -6),
            ('B', -7),
        ]
        .into_iter()
        .map(|(code, x)| (ColorCode::from(code), Coordinate::new(x, 0)))
        .collect();

        Self {
            bins,
            default_key: ColorCode::from('B'),
        }
    }

    /// Staging coordinate of a bin key
    pub fn staging(&self, key: &ColorCode) -> Option<Coordinate> {
        self.bins.get(key).copied()
    }

    /// Check if a bin key has a staging coordinate
    pub fn contains(&self, key: &ColorCode) -> bool {
        self.bins.contains_key(key)
    }

    /// Key of the catch-all bin
    pub const fn default_key(&self) -> &ColorCode {
        &self.default_key
    }

    /// Staging coordinate of the catch-all bin
    pub fn default_staging(&self) -> Coordinate {
        self.staging(&self.default_key).unwrap_or_default()
    }

    /// Number of bins
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Always false for a validated layout
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

impl Default for BinLayout {
    fn default() -> Self {
        Self::reference()
    }
}

/// Keywords that route a free-text color name to a bin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackRule {
    /// Lowercase substrings, any of which matches
    pub keywords: Vec<String>,
    /// Bin key the rule routes to
    pub bin: ColorCode,
}

impl FallbackRule {
    /// Create a rule from keywords and a target bin
    pub fn new<I, S>(keywords: I, bin: impl Into<ColorCode>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
            bin: bin.into(),
        }
    }

    /// Check if a lowercase name contains any keyword
    pub fn matches(&self, lowercase_name: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| lowercase_name.contains(keyword.as_str()))
    }
}

/// Ordered keyword rules for classifying free-text color names
///
/// Rules are evaluated in order and the first match wins. Names matching no
/// rule are left unclassified so the caller can use its default bin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorClassifier {
    rules: Vec<FallbackRule>,
}

impl ColorClassifier {
    /// Create a classifier from rules in priority order
    pub const fn new(rules: Vec<FallbackRule>) -> Self {
        Self { rules }
    }

    /// Rules for the reference brick bins
    pub fn reference() -> Self {
        Self::new(vec![
            FallbackRule::new(["red", "reddish"], 'R'),
            FallbackRule::new(["blue"], 'U'),
            FallbackRule::new(["yellow"], 'Y'),
            FallbackRule::new(["green", "lime", "olive"], 'G'),
            FallbackRule::new(["white"], 'W'),
        ])
    }

    /// Rules in priority order
    pub fn rules(&self) -> &[FallbackRule] {
        &self.rules
    }

    /// Bin key of the first rule matching a name, case-insensitively
    pub fn classify(&self, name: &str) -> Option<&ColorCode> {
        let lowercase_name = name.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowercase_name))
            .map(|rule| &rule.bin)
    }
}

impl Default for ColorClassifier {
    fn default() -> Self {
        Self::reference()
    }
}

/// Turns quantized grids into pick-and-place action sequences
pub struct BuildPlanner<'a> {
    bins: &'a BinLayout,
    classifier: &'a ColorClassifier,
}

impl<'a> BuildPlanner<'a> {
    /// Create a planner over a validated bin layout
    pub const fn new(bins: &'a BinLayout, classifier: &'a ColorClassifier) -> Self {
        Self { bins, classifier }
    }

    /// Resolve a cell code to the bin it is picked from
    ///
    /// Direct bin keys win, then classifier rules whose bin exists, then the
    /// default bin.
    pub fn resolve_bin(&self, code: &ColorCode) -> (&'a ColorCode, Coordinate) {
        let bins = self.bins;
        if let Some((key, &staging)) = bins.bins.get_key_value(code) {
            return (key, staging);
        }

        self.classifier
            .classify(code.as_str())
            .and_then(|rule_bin| bins.bins.get_key_value(rule_bin))
            .map_or_else(
                || (bins.default_key(), bins.default_staging()),
                |(key, &staging)| (key, staging),
            )
    }

    /// Plan the full build of a grid
    ///
    /// Emits exactly four actions per cell in row-major order.
    pub fn plan(&self, grid: &Grid<ColorCode>) -> Vec<Action> {
        let mut actions = Vec::with_capacity(grid.rows() * grid.cols() * 4);

        for ((x, y), code) in grid.cells() {
            let (bin, staging) = self.resolve_bin(code);
            actions.push(Action::Move { to: staging });
            actions.push(Action::Pick { color: bin.clone() });
            actions.push(Action::Move {
                to: Coordinate::new(x as i32, y as i32),
            });
            actions.push(Action::Place);
        }

        actions
    }
}
