/// Ship and bullet behaviour.  Each operation returns the render commands it
/// produced; nothing here draws directly.

use crate::entities::{
    Bounds, BulletOwner, CellColor, Difficulty, MoveDirection, RenderCommand, ShipKind,
};
use crate::error::SimCondition;

const FLASH_COLOR: CellColor = CellColor::Red;
const BULLET_GLYPH: &str = "*";

/// Independent-axis box test: two boxes overlap when they are closer than the
/// sum of their half-extents plus one on both axes at once.
pub fn boxes_overlap(a: (i32, i32), a_ext: (i32, i32), b: (i32, i32), b_ext: (i32, i32)) -> bool {
    (a.0 - b.0).abs() < a_ext.0 + b_ext.0 + 1 && (a.1 - b.1).abs() < a_ext.1 + b_ext.1 + 1
}

fn clamp_into_area(kind: ShipKind, bounds: Bounds, (x, y): (i32, i32)) -> (i32, i32) {
    let (min_x, max_x, min_y, max_y) = kind.legal_area(bounds);
    (x.clamp(min_x, max_x.max(min_x)), y.clamp(min_y, max_y.max(min_y)))
}

// ── Ship ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Ship {
    kind: ShipKind,
    x: i32,
    y: i32,
    health: i32,
    last_shot_ms: Option<u64>,
    hit_flash: bool,
    bounds: Bounds,
}

impl Ship {
    /// Create a ship of `kind` centred at `(x, y)`, clamped into its legal area.
    pub fn new(kind: ShipKind, x: i32, y: i32, bounds: Bounds) -> Self {
        let (x, y) = clamp_into_area(kind, bounds, (x, y));
        Self {
            kind,
            x,
            y,
            health: kind.base_health(),
            last_shot_ms: None,
            hit_flash: false,
            bounds,
        }
    }

    pub fn player(difficulty: Difficulty, x: i32, y: i32, bounds: Bounds) -> Self {
        Self {
            health: difficulty.player_health(),
            ..Self::new(ShipKind::Player, x, y, bounds)
        }
    }

    pub fn kind(&self) -> ShipKind {
        self.kind
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn is_flashing(&self) -> bool {
        self.hit_flash
    }

    pub fn half_extents(&self) -> (i32, i32) {
        self.kind.half_extents()
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// True when `(px, py)` lies inside this ship's hit box.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        let (ox, oy) = self.half_extents();
        (px - self.x).abs() <= ox && (py - self.y).abs() <= oy
    }

    pub fn overlaps(&self, other: &Ship) -> bool {
        boxes_overlap(
            self.position(),
            self.half_extents(),
            other.position(),
            other.half_extents(),
        )
    }

    /// Where the centre would end up after moving one step in `dir`,
    /// including clamping.  Does not move the ship.
    pub fn position_after(&self, dir: MoveDirection) -> (i32, i32) {
        let (dx, dy) = dir.delta();
        clamp_into_area(self.kind, self.bounds, (self.x + dx, self.y + dy))
    }

    /// Apply one step of movement, then clamp.  Reports `OutOfBounds` when
    /// the clamp had to pull the ship back.
    pub fn step(&mut self, dir: MoveDirection) -> Result<(), SimCondition> {
        let (dx, dy) = dir.delta();
        let wanted = (self.x + dx, self.y + dy);
        let (x, y) = clamp_into_area(self.kind, self.bounds, wanted);
        self.x = x;
        self.y = y;
        if (x, y) != wanted {
            Err(SimCondition::OutOfBounds)
        } else {
            Ok(())
        }
    }

    /// Move (unless `dir` is `None`) and redraw.  Erase commands for the old
    /// position always precede the draw commands for the new one.
    pub fn update(&mut self, dir: MoveDirection) -> Vec<RenderCommand> {
        let mut commands = Vec::new();
        if dir != MoveDirection::None {
            commands.extend(self.erase_commands());
            if let Err(cond) = self.step(dir) {
                tracing::trace!(kind = ?self.kind, %cond, "ship move");
            }
        }

        let color = if dir == MoveDirection::None && self.hit_flash {
            self.hit_flash = false;
            FLASH_COLOR
        } else {
            self.kind.color()
        };
        commands.extend(self.draw_commands(color));
        commands
    }

    /// Fire if the cooldown allows.  The heavy enemy fires a pair of bullets
    /// either side of its centre.
    pub fn shoot(&mut self, now_ms: u64) -> Result<Vec<Bullet>, SimCondition> {
        let cooldown = self.kind.cooldown_ms();
        if let Some(last) = self.last_shot_ms {
            let elapsed = now_ms.saturating_sub(last);
            if elapsed < cooldown {
                return Err(SimCondition::CooldownNotElapsed {
                    remaining_ms: cooldown - elapsed,
                });
            }
        }
        self.last_shot_ms = Some(now_ms);

        let (_, oy) = self.half_extents();
        let bullets = match self.kind {
            ShipKind::Player => vec![Bullet::new(
                self.x,
                self.y - oy - 1,
                MoveDirection::Up,
                BulletOwner::Player,
            )],
            ShipKind::EnemyHeavy => vec![
                Bullet::new(self.x - 2, self.y + oy + 1, MoveDirection::Down, BulletOwner::Enemy),
                Bullet::new(self.x + 2, self.y + oy + 1, MoveDirection::Down, BulletOwner::Enemy),
            ],
            ShipKind::EnemyLight | ShipKind::EnemyMedium => vec![Bullet::new(
                self.x,
                self.y + oy + 1,
                MoveDirection::Down,
                BulletOwner::Enemy,
            )],
        };
        Ok(bullets)
    }

    /// Take one point of damage and flash.
    pub fn hit(&mut self) -> Vec<RenderCommand> {
        self.health -= 1;
        self.hit_flash = true;
        self.draw_commands(FLASH_COLOR)
    }

    pub fn explode(&self) -> Vec<RenderCommand> {
        self.erase_commands()
    }

    fn erase_commands(&self) -> Vec<RenderCommand> {
        self.kind
            .sprite()
            .iter()
            .map(|row| RenderCommand::erase(self.x + row.dx, self.y + row.dy, row.width()))
            .collect()
    }

    fn draw_commands(&self, color: CellColor) -> Vec<RenderCommand> {
        self.kind
            .sprite()
            .iter()
            .map(|row| RenderCommand::new(self.x + row.dx, self.y + row.dy, row.glyphs, color))
            .collect()
    }
}

// ── Bullet ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bullet {
    pub x: i32,
    pub y: i32,
    pub y_delta: i32,
    pub owner: BulletOwner,
}

impl Bullet {
    /// Only `Up` and `Down` move a bullet; anything else leaves it parked.
    pub fn new(x: i32, y: i32, dir: MoveDirection, owner: BulletOwner) -> Self {
        let y_delta = match dir {
            MoveDirection::Up => -1,
            MoveDirection::Down => 1,
            _ => 0,
        };
        Self { x, y, y_delta, owner }
    }

    pub fn is_enemy(&self) -> bool {
        self.owner == BulletOwner::Enemy
    }

    pub fn in_bounds(&self, bounds: Bounds) -> bool {
        (0..=bounds.max_y).contains(&self.y)
    }

    fn color(&self) -> CellColor {
        match self.owner {
            BulletOwner::Player => CellColor::Cyan,
            BulletOwner::Enemy => CellColor::Magenta,
        }
    }

    /// On a logic tick: erase, advance, draw.  Otherwise just redraw in place.
    pub fn update(&mut self, is_logic_tick: bool) -> Vec<RenderCommand> {
        let mut commands = Vec::with_capacity(2);
        if is_logic_tick {
            commands.push(self.explode());
            self.y += self.y_delta;
        }
        commands.push(RenderCommand::new(self.x, self.y, BULLET_GLYPH, self.color()));
        commands
    }

    pub fn explode(&self) -> RenderCommand {
        RenderCommand::erase(self.x, self.y, BULLET_GLYPH.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_is_exclusive_at_the_gap() {
        // Light enemies (1, 0): centres 3 apart leave a one-cell gap.
        assert!(!boxes_overlap((0, 0), (1, 0), (3, 0), (1, 0)));
        assert!(boxes_overlap((0, 0), (1, 0), (2, 0), (1, 0)));
        // Far apart vertically never overlaps.
        assert!(!boxes_overlap((0, 0), (1, 0), (0, 2), (1, 0)));
    }

    #[test]
    fn position_after_does_not_move() {
        let ship = Ship::new(ShipKind::EnemyLight, 10, 5, Bounds::new(40, 30));
        assert_eq!(ship.position_after(MoveDirection::Left), (9, 5));
        assert_eq!(ship.position(), (10, 5));

        let edge = Ship::new(ShipKind::EnemyLight, 1, 5, Bounds::new(40, 30));
        assert_eq!(edge.position_after(MoveDirection::Left), (1, 5));
    }
}
