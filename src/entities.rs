/// All game entity types and their per-kind data tables. No behaviour lives
/// here; see `ship` for movement, shooting and damage.

use std::fmt;

// ── Render commands ───────────────────────────────────────────────────────────

/// Foreground colour of a drawn cell region.  Mapped onto a terminal colour by
/// the display surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellColor {
    White,
    Red,
    Cyan,
    Magenta,
    Green,
    Yellow,
    DarkGrey,
}

/// One cell-region redraw: `text` painted left-to-right starting at `(x, y)`.
/// A blank `text` erases whatever was there.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderCommand {
    pub x: i32,
    pub y: i32,
    pub text: String,
    pub color: CellColor,
}

impl RenderCommand {
    pub fn new(x: i32, y: i32, text: impl Into<String>, color: CellColor) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            color,
        }
    }

    /// Blank out `width` cells starting at `(x, y)`.
    pub fn erase(x: i32, y: i32, width: usize) -> Self {
        Self::new(x, y, " ".repeat(width), CellColor::White)
    }

    pub fn is_erase(&self) -> bool {
        self.text.chars().all(|c| c == ' ')
    }
}

// ── Grid geometry ─────────────────────────────────────────────────────────────

/// Largest valid column and row of the play grid (both inclusive).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub max_x: i32,
    pub max_y: i32,
}

impl Bounds {
    pub fn new(max_x: i32, max_y: i32) -> Self {
        Self { max_x, max_y }
    }
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
    Left,
    Right,
    None,
}

impl MoveDirection {
    /// `(dx, dy)` for a single step; y grows downward.
    pub fn delta(self) -> (i32, i32) {
        match self {
            MoveDirection::Up => (0, -1),
            MoveDirection::Down => (0, 1),
            MoveDirection::Left => (-1, 0),
            MoveDirection::Right => (1, 0),
            MoveDirection::None => (0, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            MoveDirection::Up => MoveDirection::Down,
            MoveDirection::Down => MoveDirection::Up,
            MoveDirection::Left => MoveDirection::Right,
            MoveDirection::Right => MoveDirection::Left,
            MoveDirection::None => MoveDirection::None,
        }
    }
}

// ── Difficulty ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Middle,
    Hard,
    Extreme,
}

impl Difficulty {
    /// Out-of-range levels clamp to the nearest valid one.
    pub fn from_level(level: i64) -> Self {
        match level.clamp(0, 3) {
            0 => Difficulty::Easy,
            1 => Difficulty::Middle,
            2 => Difficulty::Hard,
            _ => Difficulty::Extreme,
        }
    }

    pub fn player_health(self) -> i32 {
        const PLAYER_HEALTH: [i32; 4] = [12, 6, 3, 1];
        PLAYER_HEALTH[self as usize]
    }
}

// ── Ships ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShipKind {
    Player,
    EnemyLight,
    EnemyMedium,
    EnemyHeavy,
}

/// One row of a multi-line sprite, placed relative to the ship's centre.
#[derive(Clone, Copy, Debug)]
pub struct SpriteRow {
    pub dx: i32,
    pub dy: i32,
    pub glyphs: &'static str,
}

impl SpriteRow {
    const fn new(dx: i32, dy: i32, glyphs: &'static str) -> Self {
        Self { dx, dy, glyphs }
    }

    pub fn width(&self) -> usize {
        self.glyphs.chars().count()
    }
}

//   A
//  | |
// <=-=>
const PLAYER_SPRITE: &[SpriteRow] = &[
    SpriteRow::new(0, -1, "A"),
    SpriteRow::new(-1, 0, "| |"),
    SpriteRow::new(-2, 1, "<=-=>"),
];

// <v>
const LIGHT_SPRITE: &[SpriteRow] = &[SpriteRow::new(-1, 0, "<v>")];

// [===]
//  ( )
//   v
const MEDIUM_SPRITE: &[SpriteRow] = &[
    SpriteRow::new(-2, -1, "[===]"),
    SpriteRow::new(-1, 0, "( )"),
    SpriteRow::new(0, 1, "v"),
];

// <[-----]>
//   #####
//    %%%
//     V
const HEAVY_SPRITE: &[SpriteRow] = &[
    SpriteRow::new(-4, -1, "<[-----]>"),
    SpriteRow::new(-2, 0, "#####"),
    SpriteRow::new(-1, 1, "%%%"),
    SpriteRow::new(0, 2, "V"),
];

impl ShipKind {
    pub fn is_enemy(self) -> bool {
        self != ShipKind::Player
    }

    pub fn sprite(self) -> &'static [SpriteRow] {
        match self {
            ShipKind::Player => PLAYER_SPRITE,
            ShipKind::EnemyLight => LIGHT_SPRITE,
            ShipKind::EnemyMedium => MEDIUM_SPRITE,
            ShipKind::EnemyHeavy => HEAVY_SPRITE,
        }
    }

    /// Half-extents `(offset_x, offset_y)` of the axis-aligned hit box.
    pub fn half_extents(self) -> (i32, i32) {
        match self {
            ShipKind::Player => (2, 1),
            ShipKind::EnemyLight => (1, 0),
            ShipKind::EnemyMedium => (2, 1),
            ShipKind::EnemyHeavy => (4, 2),
        }
    }

    /// Starting health for enemies.  The player's comes from `Difficulty`.
    pub fn base_health(self) -> i32 {
        match self {
            ShipKind::Player => Difficulty::Easy.player_health(),
            ShipKind::EnemyLight => 2,
            ShipKind::EnemyMedium => 4,
            ShipKind::EnemyHeavy => 10,
        }
    }

    /// Minimum milliseconds between shots.
    pub fn cooldown_ms(self) -> u64 {
        match self {
            ShipKind::Player => 250,
            ShipKind::EnemyLight => 1500,
            ShipKind::EnemyMedium => 1100,
            ShipKind::EnemyHeavy => 800,
        }
    }

    pub fn color(self) -> CellColor {
        match self {
            ShipKind::Player => CellColor::White,
            ShipKind::EnemyLight => CellColor::Green,
            ShipKind::EnemyMedium => CellColor::Yellow,
            ShipKind::EnemyHeavy => CellColor::Cyan,
        }
    }

    /// Inclusive `(min_x, max_x, min_y, max_y)` the ship centre is clamped to.
    pub fn legal_area(self, bounds: Bounds) -> (i32, i32, i32, i32) {
        let Bounds { max_x, max_y } = bounds;
        match self {
            ShipKind::Player => (2, max_x - 2, max_y / 3 * 2, max_y - 1),
            ShipKind::EnemyLight => (1, max_x - 1, 0, max_y / 2),
            ShipKind::EnemyMedium => (2, max_x - 2, 1, max_y / 2),
            ShipKind::EnemyHeavy => (4, max_x - 4, 1, max_y / 2),
        }
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

// ── Session result ────────────────────────────────────────────────────────────

/// Returned by the simulation loop once the player is gone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub kills: u32,
    pub rounds_survived: u32,
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Enemies destroyed: {}, rounds survived: {}",
            self.kills, self.rounds_survived
        )
    }
}
