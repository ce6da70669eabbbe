/// Scrolling starfield drawn behind the ships.  Purely cosmetic: it owns its
/// own RNG and nothing in the simulation ever reads it.

use std::collections::VecDeque;

use rand::Rng;

use crate::entities::{Bounds, CellColor, RenderCommand};

const GLYPH: &str = "|";
/// Chance per column, out of 1000, that a new row gets a glyph there.
const SPARSITY: u32 = 10;

pub struct Background<R: Rng> {
    /// Occupied columns for each grid row, top row first.
    rows: VecDeque<Vec<i32>>,
    bounds: Bounds,
    rng: R,
}

impl<R: Rng> Background<R> {
    pub fn new(bounds: Bounds, mut rng: R) -> Self {
        let rows = (0..=bounds.max_y.max(0))
            .map(|_| random_row(&mut rng, bounds.max_x))
            .collect();
        Self { rows, bounds, rng }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Occupied columns of grid row `y`.
    pub fn row(&self, y: usize) -> Option<&[i32]> {
        self.rows.get(y).map(Vec::as_slice)
    }

    /// Scroll every row down by one and generate a fresh top row.
    pub fn update(&mut self) -> Vec<RenderCommand> {
        let mut commands = Vec::new();
        let last = self.rows.len().saturating_sub(1);

        for (y, row) in self.rows.iter().enumerate() {
            let y = y as i32;
            for &x in row {
                commands.push(RenderCommand::erase(x, y, GLYPH.len()));
                if (y as usize) < last {
                    commands.push(RenderCommand::new(x, y + 1, GLYPH, CellColor::DarkGrey));
                }
            }
        }

        self.rows.pop_back();
        let top = random_row(&mut self.rng, self.bounds.max_x);
        commands.extend(
            top.iter()
                .map(|&x| RenderCommand::new(x, 0, GLYPH, CellColor::DarkGrey)),
        );
        self.rows.push_front(top);
        commands
    }
}

fn random_row(rng: &mut impl Rng, max_x: i32) -> Vec<i32> {
    (0..max_x)
        .filter(|_| rng.gen_range(0..1000) < SPARSITY)
        .collect()
}
