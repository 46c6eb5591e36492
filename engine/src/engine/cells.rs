// engine/src/engine/cells.rs
#![forbid(unsafe_code)]

/// Reward classification of a block and of the cells it fills.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Tier {
    Normal,
    Gold,
    GameCoin,
}

/// Display palette for Normal blocks.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Color {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl Color {
    pub const ALL: [Color; 6] = [
        Color::Red,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Blue,
        Color::Purple,
    ];

    pub fn glyph(self) -> char {
        match self {
            Color::Red => 'r',
            Color::Orange => 'o',
            Color::Yellow => 'y',
            Color::Green => 'g',
            Color::Blue => 'b',
            Color::Purple => 'p',
        }
    }
}

/// One grid cell. Only Normal cells carry a color; Gold and GameCoin use a fixed marker.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Normal(Option<Color>),
    Gold,
    GameCoin,
}

impl Cell {
    /// The cell a block of `tier` writes. `color` is dropped for non-Normal tiers.
    pub fn filled(tier: Tier, color: Option<Color>) -> Self {
        match tier {
            Tier::Normal => Cell::Normal(color),
            Tier::Gold => Cell::Gold,
            Tier::GameCoin => Cell::GameCoin,
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn tier(self) -> Option<Tier> {
        match self {
            Cell::Empty => None,
            Cell::Normal(_) => Some(Tier::Normal),
            Cell::Gold => Some(Tier::Gold),
            Cell::GameCoin => Some(Tier::GameCoin),
        }
    }

    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Normal(color) => color,
            _ => None,
        }
    }

    /// Stable occupancy code: 0 = empty, 1 = normal, 2 = gold, 3 = gamecoin.
    pub fn idx(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Normal(_) => 1,
            Cell::Gold => 2,
            Cell::GameCoin => 3,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Normal(Some(color)) => color.glyph(),
            Cell::Normal(None) => '#',
            Cell::Gold => '$',
            Cell::GameCoin => '@',
        }
    }
}
