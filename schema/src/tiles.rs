use serde::{Deserialize, Serialize};

/// One tile of the overworld grid. The numeric codes match the map data
/// files: 0 = path, 1 = tall grass, 2 = wall, 3 = healing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Path,
    Grass,
    Wall,
    Heal,
}

impl TileKind {
    /// Decode a raw map code. Returns `None` for unknown codes so that map
    /// loading can reject malformed data instead of guessing.
    pub fn from_code(code: u8) -> Option<TileKind> {
        match code {
            0 => Some(TileKind::Path),
            1 => Some(TileKind::Grass),
            2 => Some(TileKind::Wall),
            3 => Some(TileKind::Heal),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            TileKind::Path => 0,
            TileKind::Grass => 1,
            TileKind::Wall => 2,
            TileKind::Heal => 3,
        }
    }
}
