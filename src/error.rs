use std::fmt;

/// Outcomes the simulation skips over rather than fails on.  Each is
/// returned to the caller, which logs it and carries on with the tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimCondition {
    /// A move would have left the ship's legal area; the position was clamped.
    OutOfBounds,
    /// `shoot` was called before the ship's cooldown elapsed.
    CooldownNotElapsed { remaining_ms: u64 },
    /// Spawn placement ran out of retries without a free spot.
    NoValidSpawnPosition { attempts: u32 },
}

impl fmt::Display for SimCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds => write!(f, "move clamped to legal area"),
            Self::CooldownNotElapsed { remaining_ms } => {
                write!(f, "shot cooldown not elapsed: {remaining_ms} ms remaining")
            }
            Self::NoValidSpawnPosition { attempts } => {
                write!(f, "no free spawn position after {attempts} attempts")
            }
        }
    }
}

impl std::error::Error for SimCondition {}
