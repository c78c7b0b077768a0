//! Calm/storm weather: state machine, rain particles and lightning.

mod lightning;
mod rain;

pub use lightning::FlashLight;
pub use rain::RainField;

use crate::params::WeatherBundle;

/// Two-state weather toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeatherState {
    #[default]
    Calm,
    Storm,
}

impl WeatherState {
    /// The opposite state
    pub fn toggled(self) -> Self {
        match self {
            Self::Calm => Self::Storm,
            Self::Storm => Self::Calm,
        }
    }

    pub fn is_storm(self) -> bool {
        self == Self::Storm
    }

    /// Full visual bundle implied by this state
    pub fn bundle(self) -> WeatherBundle {
        match self {
            Self::Calm => WeatherBundle::calm(),
            Self::Storm => WeatherBundle::storm(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_calm() {
        assert_eq!(WeatherState::default(), WeatherState::Calm);
        assert!(!WeatherState::default().is_storm());
    }

    #[test]
    fn test_double_toggle_is_identity() {
        for state in [WeatherState::Calm, WeatherState::Storm] {
            assert_ne!(state.toggled(), state);
            assert_eq!(state.toggled().toggled(), state);
            assert_eq!(state.toggled().toggled().bundle(), state.bundle());
        }
    }
}
