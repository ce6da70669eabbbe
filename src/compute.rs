/// The simulation loop.
///
/// `Game` owns the player, the enemy and bullet collections, the pacer and
/// the background.  Every outer iteration is either a render-only tick
/// (redraw in place) or a logic tick (input, spawning, AI, collisions), the
/// two alternating.  All randomness comes through the injected `rng`, so a
/// seeded generator reproduces spawn and AI sequences exactly.

use std::io;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

use crate::background::Background;
use crate::config::{
    GameConfig, ENEMY_FIRE_CHANCE, HEAVY_SPAWN_PERCENT, MEDIUM_SPAWN_PERCENT,
    OPPOSITE_MOVE_CHANCE,
};
use crate::display::DisplaySurface;
use crate::entities::{
    Bounds, Difficulty, MoveDirection, RenderCommand, SessionSummary, ShipKind,
};
use crate::error::SimCondition;
use crate::input::InputSource;
use crate::pacer::{Clock, FramePacer};
use crate::ship::{boxes_overlap, Bullet, Ship};

// ── Spawning ──────────────────────────────────────────────────────────────────

/// Heavy, medium and light enemies come up 10%, 30% and 60% of the time.
pub fn roll_enemy_kind(rng: &mut impl Rng) -> ShipKind {
    let roll = rng.gen_range(0..100);
    if roll < HEAVY_SPAWN_PERCENT {
        ShipKind::EnemyHeavy
    } else if roll < HEAVY_SPAWN_PERCENT + MEDIUM_SPAWN_PERCENT {
        ShipKind::EnemyMedium
    } else {
        ShipKind::EnemyLight
    }
}

/// Pick a centre for a new `kind` enemy inside its legal area whose box stays
/// clear of every ship in `placed`.  Gives up after `retries` attempts.
pub fn find_spawn_position(
    rng: &mut impl Rng,
    kind: ShipKind,
    bounds: Bounds,
    placed: &[Ship],
    retries: u32,
) -> Result<(i32, i32), SimCondition> {
    let (min_x, max_x, min_y, max_y) = kind.legal_area(bounds);
    let ext = kind.half_extents();

    for _ in 0..retries {
        let pos = (
            rng.gen_range(min_x..=max_x.max(min_x)),
            rng.gen_range(min_y..=max_y.max(min_y)),
        );
        let clear = placed
            .iter()
            .all(|other| !boxes_overlap(pos, ext, other.position(), other.half_extents()));
        if clear {
            return Ok(pos);
        }
    }
    Err(SimCondition::NoValidSpawnPosition { attempts: retries })
}

/// Keep `desired` if it is clear.  Otherwise take the opposite move with
/// probability `OPPOSITE_MOVE_CHANCE` when that one is clear, else hold still.
pub fn resolve_enemy_move(
    rng: &mut impl Rng,
    desired: MoveDirection,
    is_clear: impl Fn(MoveDirection) -> bool,
) -> MoveDirection {
    if is_clear(desired) {
        return desired;
    }
    let opposite = desired.opposite();
    if is_clear(opposite) && rng.gen_bool(OPPOSITE_MOVE_CHANCE) {
        opposite
    } else {
        MoveDirection::None
    }
}

fn move_is_clear(enemies: &[Ship], i: usize, dir: MoveDirection) -> bool {
    if dir == MoveDirection::None {
        return true;
    }
    let enemy = &enemies[i];
    let pos = enemy.position_after(dir);
    let ext = enemy.half_extents();
    enemies
        .iter()
        .enumerate()
        .filter(|&(j, other)| j != i && other.is_alive())
        .all(|(_, other)| !boxes_overlap(pos, ext, other.position(), other.half_extents()))
}

// ── Game ──────────────────────────────────────────────────────────────────────

pub struct Game<I: InputSource, R: Rng, C: Clock> {
    config: GameConfig,
    bounds: Bounds,
    input: I,
    rng: R,
    pacer: FramePacer<C>,
    background: Background<StdRng>,
    player: Option<Ship>,
    enemies: Vec<Ship>,
    bullets: Vec<Bullet>,
    summary: SessionSummary,
    /// Frame parity: `true` means the next frame runs game logic.
    logic_frame: bool,
}

impl<I: InputSource, R: Rng, C: Clock> Game<I, R, C> {
    /// The player starts centred on the second-to-last row.  The background
    /// gets its own generator, seeded once from `rng`.
    pub fn new(
        config: GameConfig,
        bounds: Bounds,
        difficulty: Difficulty,
        input: I,
        mut rng: R,
        clock: C,
    ) -> Self {
        let background = Background::new(bounds, StdRng::seed_from_u64(rng.gen()));
        let player = Ship::player(difficulty, bounds.max_x / 2, bounds.max_y - 1, bounds);
        Self {
            config,
            bounds,
            input,
            rng,
            pacer: FramePacer::new(config.fps, clock),
            background,
            player: Some(player),
            enemies: Vec::new(),
            bullets: Vec::new(),
            summary: SessionSummary::default(),
            logic_frame: false,
        }
    }

    pub fn player(&self) -> Option<&Ship> {
        self.player.as_ref()
    }

    pub fn enemies(&self) -> &[Ship] {
        &self.enemies
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn summary(&self) -> SessionSummary {
        self.summary
    }

    pub fn is_over(&self) -> bool {
        self.player.is_none()
    }

    pub fn insert_enemy(&mut self, enemy: Ship) {
        self.enemies.push(enemy);
    }

    pub fn insert_bullet(&mut self, bullet: Bullet) {
        self.bullets.push(bullet);
    }

    /// Drive frames into `surface` until the player dies or exit is
    /// requested.  The exit flag is only checked between frames.
    pub fn run<D: DisplaySurface>(&mut self, surface: &mut D) -> io::Result<SessionSummary> {
        info!(
            max_x = self.bounds.max_x,
            max_y = self.bounds.max_y,
            fps = self.config.fps,
            "session started"
        );

        while !self.input.exit_requested() {
            self.pacer.update();
            if self.player.is_none() {
                self.pacer.final_pause();
                break;
            }

            let commands = self.next_frame();
            surface.present(&commands)?;

            if self.player.is_none() {
                self.pacer.pause();
            }
        }

        info!(
            kills = self.summary.kills,
            rounds = self.summary.rounds_survived,
            "session finished"
        );
        Ok(self.summary)
    }

    /// Produce one frame, alternating render-only and logic ticks.
    pub fn next_frame(&mut self) -> Vec<RenderCommand> {
        let commands = if self.logic_frame {
            self.logic_tick()
        } else {
            self.render_tick()
        };
        self.logic_frame = !self.logic_frame;
        commands
    }

    /// Redraw every live entity where it stands.  No state changes except
    /// consuming a pending hit flash.
    pub fn render_tick(&mut self) -> Vec<RenderCommand> {
        let mut commands = Vec::new();
        if let Some(player) = self.player.as_mut() {
            commands.extend(player.update(MoveDirection::None));
        }
        for enemy in self.enemies.iter_mut().filter(|e| e.is_alive()) {
            commands.extend(enemy.update(MoveDirection::None));
        }
        for bullet in &mut self.bullets {
            commands.extend(bullet.update(false));
        }
        commands
    }

    pub fn logic_tick(&mut self) -> Vec<RenderCommand> {
        let mut commands = self.background.update();

        self.move_player(&mut commands);
        if self.enemies.is_empty() {
            self.spawn_round();
        }
        self.update_enemies(&mut commands);
        self.update_bullets(&mut commands);
        self.check_player(&mut commands);

        commands
    }

    // ── 1. Player ────────────────────────────────────────────────────────────

    fn move_player(&mut self, commands: &mut Vec<RenderCommand>) {
        let controls = self.input.controls();
        let now = self.pacer.now_ms();
        let Some(player) = self.player.as_mut() else {
            return;
        };

        let dir = controls.direction();
        commands.extend(player.update(dir));
        if dir == MoveDirection::None && controls.shoot {
            match player.shoot(now) {
                Ok(bullets) => self.bullets.extend(bullets),
                Err(cond) => trace!(%cond, "player shot"),
            }
        }
    }

    // ── 2. Spawning ──────────────────────────────────────────────────────────

    fn spawn_round(&mut self) {
        self.summary.rounds_survived += 1;

        let lo = self.config.min_spawn.min(self.config.max_spawn);
        let hi = self.config.min_spawn.max(self.config.max_spawn);
        let requested = self.rng.gen_range(lo..=hi);

        for _ in 0..requested {
            let kind = roll_enemy_kind(&mut self.rng);
            match find_spawn_position(
                &mut self.rng,
                kind,
                self.bounds,
                &self.enemies,
                self.config.spawn_retries,
            ) {
                Ok((x, y)) => self.enemies.push(Ship::new(kind, x, y, self.bounds)),
                Err(cond) => debug!(?kind, %cond, "spawn skipped"),
            }
        }

        info!(
            round = self.summary.rounds_survived,
            requested,
            spawned = self.enemies.len(),
            "round started"
        );
    }

    // ── 3. Enemy AI ──────────────────────────────────────────────────────────

    fn update_enemies(&mut self, commands: &mut Vec<RenderCommand>) {
        let player_x = self.player.as_ref().map(Ship::x);
        let now = self.pacer.now_ms();
        let mut destroyed = vec![false; self.enemies.len()];
        let mut fired = Vec::new();

        for i in 0..self.enemies.len() {
            if !self.enemies[i].is_alive() {
                self.summary.kills += 1;
                debug!(kind = ?self.enemies[i].kind(), kills = self.summary.kills, "enemy destroyed");
                commands.extend(self.enemies[i].explode());
                destroyed[i] = true;
                continue;
            }

            let dir = self.choose_enemy_direction(i, player_x);
            commands.extend(self.enemies[i].update(dir));

            if self.rng.gen_bool(ENEMY_FIRE_CHANCE) {
                match self.enemies[i].shoot(now) {
                    Ok(bullets) => fired.extend(bullets),
                    Err(cond) => trace!(%cond, "enemy shot"),
                }
            }
        }

        let mut flags = destroyed.into_iter();
        self.enemies.retain(|_| !flags.next().unwrap_or(false));
        self.bullets.extend(fired);
    }

    /// Horizontal moves chase the player, vertical ones are random.  A move
    /// that would overlap another enemy may be swapped for its opposite;
    /// otherwise the enemy holds still.
    fn choose_enemy_direction(&mut self, i: usize, player_x: Option<i32>) -> MoveDirection {
        let enemy_x = self.enemies[i].x();
        let desired = if self.rng.gen_bool(0.5) {
            match player_x {
                Some(px) if px < enemy_x => MoveDirection::Left,
                Some(px) if px > enemy_x => MoveDirection::Right,
                Some(_) => MoveDirection::None,
                None if self.rng.gen_bool(0.5) => MoveDirection::Left,
                None => MoveDirection::Right,
            }
        } else if self.rng.gen_bool(0.5) {
            MoveDirection::Up
        } else {
            MoveDirection::Down
        };

        let enemies = &self.enemies;
        resolve_enemy_move(&mut self.rng, desired, |dir| move_is_clear(enemies, i, dir))
    }

    // ── 4. Bullets ───────────────────────────────────────────────────────────

    fn update_bullets(&mut self, commands: &mut Vec<RenderCommand>) {
        let mut spent = vec![false; self.bullets.len()];

        for (bi, bullet) in self.bullets.iter_mut().enumerate() {
            if !bullet.in_bounds(self.bounds) {
                commands.push(bullet.explode());
                spent[bi] = true;
                continue;
            }

            let target = if bullet.is_enemy() {
                self.player
                    .as_mut()
                    .filter(|p| p.is_alive() && p.contains(bullet.x, bullet.y))
            } else {
                self.enemies
                    .iter_mut()
                    .find(|e| e.is_alive() && e.contains(bullet.x, bullet.y))
            };

            match target {
                Some(ship) => {
                    commands.extend(ship.hit());
                    debug!(kind = ?ship.kind(), health = ship.health(), "ship hit");
                    commands.push(bullet.explode());
                    spent[bi] = true;
                }
                None => {
                    let moved = bullet.update(true);
                    if bullet.in_bounds(self.bounds) {
                        commands.extend(moved);
                    } else {
                        // Left the grid: keep only the erase of the last drawn cell.
                        commands.extend(moved.into_iter().filter(RenderCommand::is_erase));
                        spent[bi] = true;
                    }
                }
            }
        }

        let mut flags = spent.into_iter();
        self.bullets.retain(|_| !flags.next().unwrap_or(false));
    }

    // ── 5. Player death ──────────────────────────────────────────────────────

    fn check_player(&mut self, commands: &mut Vec<RenderCommand>) {
        if let Some(player) = self.player.as_ref().filter(|p| !p.is_alive()) {
            commands.extend(player.explode());
            info!(kills = self.summary.kills, "player destroyed");
            self.player = None;
        }
    }
}
