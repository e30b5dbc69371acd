//! Vocabulary tokens for `NOUN IS PROPERTY` statements.
//!
//! Nouns and properties are closed enums sized to the game's vocabulary so
//! that the conflict and throttle tables are exhaustive `match` expressions
//! instead of string comparisons. The only open-ended token is the fusion
//! property, synthesized by the resolver from other properties.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Prefix of every synthesized fusion property name.
pub const FUSION_PREFIX: &str = "FUSION_";

fn normalize_word(word: &str) -> Result<String, ValidationError> {
    let w = word.trim();
    if w.is_empty() {
        return Err(ValidationError::EmptyToken);
    }
    Ok(w.to_ascii_uppercase())
}

/// Subject of a rule: a piece type or the generic block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Noun {
    /// The straight piece.
    I,
    /// The square piece.
    O,
    /// The T piece.
    T,
    /// The S piece.
    S,
    /// The Z piece.
    Z,
    /// The J piece.
    J,
    /// The L piece.
    L,
    /// Every locked cell on the board.
    Block,
}

impl Noun {
    /// All nouns, in display order.
    pub const ALL: [Noun; 8] = [
        Noun::I,
        Noun::O,
        Noun::T,
        Noun::S,
        Noun::Z,
        Noun::J,
        Noun::L,
        Noun::Block,
    ];

    /// Returns the keyword used in rule statements.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::I => "I",
            Self::O => "O",
            Self::T => "T",
            Self::S => "S",
            Self::Z => "Z",
            Self::J => "J",
            Self::L => "L",
            Self::Block => "BLOCK",
        }
    }
}

impl fmt::Display for Noun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Noun {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let word = normalize_word(s)?;
        Noun::ALL
            .into_iter()
            .find(|n| n.as_str() == word)
            .ok_or(ValidationError::UnknownNoun { word })
    }
}

/// A composite property synthesized from conflicting properties.
///
/// Components are always simple properties, kept sorted by keyword, so the
/// canonical name does not depend on the order the conflicting rules were
/// encountered in and always parses back.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FusionProperty {
    components: Vec<Property>,
}

impl FusionProperty {
    /// Builds a fusion from its component properties.
    ///
    /// Nested fusions are flattened into their simple components. Returns
    /// `None` when there is nothing to fuse.
    #[must_use]
    pub fn new(components: Vec<Property>) -> Option<Self> {
        let mut flat = Vec::with_capacity(components.len());
        for p in components {
            match p {
                Property::Fusion(inner) => flat.extend(inner.components),
                simple => flat.push(simple),
            }
        }
        if flat.is_empty() {
            return None;
        }
        flat.sort_by_cached_key(Property::to_string);
        Some(Self { components: flat })
    }

    /// The sorted component properties.
    #[must_use]
    pub fn components(&self) -> &[Property] {
        &self.components
    }
}

impl fmt::Display for FusionProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(FUSION_PREFIX)?;
        for (i, p) in self.components.iter().enumerate() {
            if i > 0 {
                f.write_str("_")?;
            }
            write!(f, "{p}")?;
        }
        Ok(())
    }
}

/// Behavior bound to a noun by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Property {
    /// Locks in place and blocks movement.
    Solid,
    /// Passes through other cells.
    Ghost,
    /// Clearing it wins the game.
    Win,
    /// Touching it loses the game.
    Lose,
    /// Stops falling.
    Freeze,
    /// Falls faster.
    Fast,
    /// Falls slower.
    Slow,
    /// Dissolves shielded cells.
    Melt,
    /// Protects against destruction.
    Shield,
    /// Explodes on lock.
    Bomb,
    /// Restores destroyed cells.
    Heal,
    /// Duplicates on lock.
    Multiply,
    /// Spawns extra pieces.
    Spawn,
    /// Turns into another piece.
    Transform,
    /// Jumps to another column.
    Teleport,
    /// Strikes the board.
    Lightning,
    /// Pulls nearby cells.
    Magnet,
    /// Rises instead of falling.
    Float,
    /// Drops to the floor.
    Sink,
    /// Red coloring.
    Red,
    /// Blue coloring.
    Blue,
    /// Green coloring.
    Green,
    /// Yellow coloring.
    Yellow,
    /// Purple coloring.
    Purple,
    /// Orange coloring.
    Orange,
    /// Cyan coloring.
    Cyan,
    /// Synthesized by fusion resolution.
    Fusion(FusionProperty),
}

impl Property {
    /// Every non-fusion property.
    pub const SIMPLE: [Property; 26] = [
        Property::Solid,
        Property::Ghost,
        Property::Win,
        Property::Lose,
        Property::Freeze,
        Property::Fast,
        Property::Slow,
        Property::Melt,
        Property::Shield,
        Property::Bomb,
        Property::Heal,
        Property::Multiply,
        Property::Spawn,
        Property::Transform,
        Property::Teleport,
        Property::Lightning,
        Property::Magnet,
        Property::Float,
        Property::Sink,
        Property::Red,
        Property::Blue,
        Property::Green,
        Property::Yellow,
        Property::Purple,
        Property::Orange,
        Property::Cyan,
    ];

    /// Returns the keyword of a simple property, or `None` for fusions.
    #[must_use]
    pub const fn keyword(&self) -> Option<&'static str> {
        let kw = match self {
            Self::Solid => "SOLID",
            Self::Ghost => "GHOST",
            Self::Win => "WIN",
            Self::Lose => "LOSE",
            Self::Freeze => "FREEZE",
            Self::Fast => "FAST",
            Self::Slow => "SLOW",
            Self::Melt => "MELT",
            Self::Shield => "SHIELD",
            Self::Bomb => "BOMB",
            Self::Heal => "HEAL",
            Self::Multiply => "MULTIPLY",
            Self::Spawn => "SPAWN",
            Self::Transform => "TRANSFORM",
            Self::Teleport => "TELEPORT",
            Self::Lightning => "LIGHTNING",
            Self::Magnet => "MAGNET",
            Self::Float => "FLOAT",
            Self::Sink => "SINK",
            Self::Red => "RED",
            Self::Blue => "BLUE",
            Self::Green => "GREEN",
            Self::Yellow => "YELLOW",
            Self::Purple => "PURPLE",
            Self::Orange => "ORANGE",
            Self::Cyan => "CYAN",
            Self::Fusion(_) => return None,
        };
        Some(kw)
    }

    /// Creates a fusion property from components, or `None` if empty.
    #[must_use]
    pub fn fusion(components: Vec<Property>) -> Option<Self> {
        FusionProperty::new(components).map(Self::Fusion)
    }

    /// Returns true for the mutually exclusive piece colors.
    #[must_use]
    pub const fn is_color(&self) -> bool {
        matches!(
            self,
            Self::Red | Self::Blue | Self::Green | Self::Yellow | Self::Purple | Self::Orange | Self::Cyan
        )
    }

    /// Returns true if this property was synthesized by fusion.
    #[must_use]
    pub const fn is_fusion(&self) -> bool {
        matches!(self, Self::Fusion(_))
    }

    fn parse_simple(word: &str) -> Option<Self> {
        Property::SIMPLE
            .into_iter()
            .find(|p| p.keyword() == Some(word))
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fusion(fusion) => write!(f, "{fusion}"),
            simple => f.write_str(simple.keyword().unwrap_or_default()),
        }
    }
}

impl FromStr for Property {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let word = normalize_word(s)?;

        if let Some(rest) = word.strip_prefix(FUSION_PREFIX) {
            let mut components = Vec::new();
            for part in rest.split('_') {
                let Some(p) = Property::parse_simple(part) else {
                    return Err(ValidationError::UnknownProperty { word: word.clone() });
                };
                components.push(p);
            }
            return Property::fusion(components).ok_or(ValidationError::UnknownProperty { word });
        }

        Property::parse_simple(&word).ok_or(ValidationError::UnknownProperty { word })
    }
}

impl Serialize for Property {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Property {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
