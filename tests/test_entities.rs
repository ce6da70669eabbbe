use space_invader::entities::*;

#[test]
fn difficulty_clamps_out_of_range_levels() {
    assert_eq!(Difficulty::from_level(-5), Difficulty::Easy);
    assert_eq!(Difficulty::from_level(0), Difficulty::Easy);
    assert_eq!(Difficulty::from_level(2), Difficulty::Hard);
    assert_eq!(Difficulty::from_level(3), Difficulty::Extreme);
    assert_eq!(Difficulty::from_level(99), Difficulty::Extreme);
}

#[test]
fn player_health_table() {
    assert_eq!(Difficulty::Easy.player_health(), 12);
    assert_eq!(Difficulty::Middle.player_health(), 6);
    assert_eq!(Difficulty::Hard.player_health(), 3);
    assert_eq!(Difficulty::Extreme.player_health(), 1);
}

#[test]
fn heavier_enemies_fire_more_often() {
    assert!(ShipKind::Player.cooldown_ms() < ShipKind::EnemyHeavy.cooldown_ms());
    assert!(ShipKind::EnemyHeavy.cooldown_ms() < ShipKind::EnemyMedium.cooldown_ms());
    assert!(ShipKind::EnemyMedium.cooldown_ms() < ShipKind::EnemyLight.cooldown_ms());
}

#[test]
fn sprites_fit_inside_half_extents() {
    for kind in [
        ShipKind::Player,
        ShipKind::EnemyLight,
        ShipKind::EnemyMedium,
        ShipKind::EnemyHeavy,
    ] {
        let (ox, oy) = kind.half_extents();
        for row in kind.sprite() {
            assert!(row.dx >= -ox, "{kind:?} row starts left of its box");
            assert!(row.dx + row.width() as i32 - 1 <= ox, "{kind:?} row ends right of its box");
            assert!(row.dy.abs() <= oy, "{kind:?} row outside vertical extent");
        }
    }
}

#[test]
fn enemies_are_confined_to_upper_half() {
    let bounds = Bounds::new(80, 40);
    for kind in [ShipKind::EnemyLight, ShipKind::EnemyMedium, ShipKind::EnemyHeavy] {
        let (_, _, min_y, max_y) = kind.legal_area(bounds);
        assert!(min_y >= 0);
        assert_eq!(max_y, 20);
    }
    let (_, _, min_y, max_y) = ShipKind::Player.legal_area(bounds);
    assert_eq!(min_y, 26);
    assert_eq!(max_y, 39);
}

#[test]
fn direction_opposites() {
    assert_eq!(MoveDirection::Up.opposite(), MoveDirection::Down);
    assert_eq!(MoveDirection::Left.opposite(), MoveDirection::Right);
    assert_eq!(MoveDirection::None.opposite(), MoveDirection::None);
    assert_eq!(MoveDirection::Down.delta(), (0, 1));
}

#[test]
fn erase_command_is_blank_of_same_width() {
    let erase = RenderCommand::erase(4, 2, 5);
    assert_eq!(erase.text, "     ");
    assert!(erase.is_erase());
    assert!(!RenderCommand::new(4, 2, "<v>", CellColor::Green).is_erase());
}

#[test]
fn summary_display() {
    let summary = SessionSummary {
        kills: 7,
        rounds_survived: 3,
    };
    assert_eq!(summary.to_string(), "Enemies destroyed: 7, rounds survived: 3");
}
