use space_invader::background::Background;
use space_invader::entities::{Bounds, CellColor};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_background(seed: u64) -> Background<StdRng> {
    Background::new(Bounds::new(200, 10), StdRng::seed_from_u64(seed))
}

#[test]
fn one_row_per_grid_row() {
    let bg = make_background(1);
    assert_eq!(bg.row_count(), 11);
    assert!(bg.row(11).is_none());
}

#[test]
fn update_shifts_every_row_down() {
    let mut bg = make_background(2);
    let before: Vec<Vec<i32>> = (0..bg.row_count()).map(|y| bg.row(y).unwrap().to_vec()).collect();

    bg.update();

    assert_eq!(bg.row_count(), before.len());
    for y in 0..before.len() - 1 {
        assert_eq!(bg.row(y + 1).unwrap(), before[y].as_slice());
    }
}

#[test]
fn update_emits_erase_and_redraw_per_glyph() {
    let mut bg = make_background(3);
    let rows = bg.row_count();
    let moving: usize = (0..rows - 1).map(|y| bg.row(y).unwrap().len()).sum();
    let dropped = bg.row(rows - 1).unwrap().len();

    let commands = bg.update();
    let fresh = bg.row(0).unwrap().len();

    assert_eq!(commands.len(), 2 * moving + dropped + fresh);
    assert_eq!(commands.iter().filter(|c| c.is_erase()).count(), moving + dropped);
    assert!(commands
        .iter()
        .filter(|c| !c.is_erase())
        .all(|c| c.text == "|" && c.color == CellColor::DarkGrey));
    // Nothing is drawn below the last grid row.
    assert!(commands.iter().filter(|c| !c.is_erase()).all(|c| c.y <= 10));
}

#[test]
fn glyphs_are_sparse() {
    let mut bg = make_background(4);
    let mut total = 0;
    for _ in 0..100 {
        bg.update();
        total += bg.row(0).unwrap().len();
    }
    // 100 rows x 200 columns at 1% is about 200 glyphs.
    assert!(total > 50 && total < 500, "total {total}");
}
