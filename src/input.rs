/// Input Source: five held-control flags plus an exit flag.
///
/// The flags are written by the key-reader thread and read once per logic
/// tick.  A flag flipping mid-tick is simply seen on the next tick, so plain
/// relaxed atomics are all the synchronisation needed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::entities::MoveDirection;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Up,
    Down,
    Left,
    Right,
    Shoot,
}

const CONTROLS: [Control; 5] = [
    Control::Up,
    Control::Down,
    Control::Left,
    Control::Right,
    Control::Shoot,
];

/// Snapshot of the held controls for one logic tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub shoot: bool,
}

impl Controls {
    /// At most one direction is honoured, checked in up/down/left/right order.
    pub fn direction(&self) -> MoveDirection {
        if self.up {
            MoveDirection::Up
        } else if self.down {
            MoveDirection::Down
        } else if self.left {
            MoveDirection::Left
        } else if self.right {
            MoveDirection::Right
        } else {
            MoveDirection::None
        }
    }
}

pub trait InputSource {
    fn controls(&self) -> Controls;
    fn exit_requested(&self) -> bool;
}

impl<T: InputSource + ?Sized> InputSource for Arc<T> {
    fn controls(&self) -> Controls {
        (**self).controls()
    }

    fn exit_requested(&self) -> bool {
        (**self).exit_requested()
    }
}

#[derive(Debug, Default)]
pub struct ControlState {
    held: [AtomicBool; 5],
    exit: AtomicBool,
}

impl ControlState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&self, control: Control) {
        self.held[control as usize].store(true, Ordering::Relaxed);
    }

    pub fn release(&self, control: Control) {
        self.held[control as usize].store(false, Ordering::Relaxed);
    }

    pub fn request_exit(&self) {
        self.exit.store(true, Ordering::Relaxed);
    }

    fn is_held(&self, control: Control) -> bool {
        self.held[control as usize].load(Ordering::Relaxed)
    }
}

impl InputSource for ControlState {
    fn controls(&self) -> Controls {
        Controls {
            up: self.is_held(Control::Up),
            down: self.is_held(Control::Down),
            left: self.is_held(Control::Left),
            right: self.is_held(Control::Right),
            shoot: self.is_held(Control::Shoot),
        }
    }

    fn exit_requested(&self) -> bool {
        self.exit.load(Ordering::Relaxed)
    }
}

// ── Terminal key reader ───────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Control(Control),
    Exit,
}

/// Arrows and WASD steer, Space shoots, Esc/Q quits.
pub fn map_key(code: KeyCode, modifiers: KeyModifiers) -> Option<KeyAction> {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(KeyAction::Exit),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(KeyAction::Exit),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(KeyAction::Control(Control::Up))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(KeyAction::Control(Control::Down))
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(KeyAction::Control(Control::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(KeyAction::Control(Control::Right))
        }
        KeyCode::Char(' ') => Some(KeyAction::Control(Control::Shoot)),
        _ => None,
    }
}

/// A key with no press/repeat event for this long counts as released.  Only
/// used on terminals that never report release events; OS key repeat fires
/// well inside this window, so a held key keeps refreshing itself.
const HOLD_WINDOW: Duration = Duration::from_millis(130);
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Blocking loop feeding terminal key events into `state` until exit is
/// requested.  `reports_release` says whether the terminal sends proper
/// release events (keyboard enhancement); otherwise keys expire after
/// `HOLD_WINDOW`.
pub fn read_keys(state: Arc<ControlState>, reports_release: bool) {
    let mut last_seen: [Option<Instant>; 5] = [None; 5];

    while !state.exit_requested() {
        match event::poll(POLL_INTERVAL) {
            Ok(true) => match event::read() {
                Ok(Event::Key(KeyEvent {
                    code,
                    modifiers,
                    kind,
                    ..
                })) => match (map_key(code, modifiers), kind) {
                    (Some(KeyAction::Exit), KeyEventKind::Press) => state.request_exit(),
                    (Some(KeyAction::Control(control)), KeyEventKind::Release) => {
                        state.release(control);
                        last_seen[control as usize] = None;
                    }
                    (Some(KeyAction::Control(control)), _) => {
                        state.press(control);
                        last_seen[control as usize] = Some(Instant::now());
                    }
                    _ => {}
                },
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(%err, "terminal event read failed, exiting");
                    state.request_exit();
                }
            },
            Ok(false) => {}
            Err(err) => {
                tracing::warn!(%err, "terminal event poll failed, exiting");
                state.request_exit();
            }
        }

        if !reports_release {
            for control in CONTROLS {
                let seen = &mut last_seen[control as usize];
                if seen.is_some_and(|at| at.elapsed() > HOLD_WINDOW) {
                    state.release(control);
                    *seen = None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_priority_is_up_down_left_right() {
        let c = Controls {
            left: true,
            down: true,
            ..Controls::default()
        };
        assert_eq!(c.direction(), MoveDirection::Down);
        assert_eq!(Controls::default().direction(), MoveDirection::None);
    }

    #[test]
    fn press_and_release_round_trip() {
        let state = ControlState::new();
        state.press(Control::Shoot);
        assert!(state.controls().shoot);
        state.release(Control::Shoot);
        assert!(!state.controls().shoot);
        assert!(!state.exit_requested());
        state.request_exit();
        assert!(state.exit_requested());
    }

    #[test]
    fn wasd_and_arrows_map_to_same_control() {
        let none = KeyModifiers::NONE;
        assert_eq!(map_key(KeyCode::Char('a'), none), map_key(KeyCode::Left, none));
        assert_eq!(map_key(KeyCode::Char('w'), none), Some(KeyAction::Control(Control::Up)));
        assert_eq!(
            map_key(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(KeyAction::Exit)
        );
        assert_eq!(map_key(KeyCode::Char('x'), none), None);
    }
}
