//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::controls::{parse_control_value, ControlInputs, ControlName};
use crate::frame::ContextConfig;
use crate::params::NormalMapVariant;

/// Normal map shape family as spelled on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NormalMapArg {
    Circles,
    Ellipses,
}

impl From<NormalMapArg> for NormalMapVariant {
    fn from(arg: NormalMapArg) -> Self {
        match arg {
            NormalMapArg::Circles => NormalMapVariant::Circles,
            NormalMapArg::Ellipses => NormalMapVariant::WrappedEllipses,
        }
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "Stormsea")]
#[command(about = "Ocean under a scattering sky, with a storm mode", long_about = None)]
pub struct Args {
    /// Initial wind strength (0-12)
    #[arg(long, value_name = "VALUE", default_value = "6")]
    pub wind: String,

    /// Initial wave height (0-6)
    #[arg(long, value_name = "VALUE", default_value = "1")]
    pub wave_height: String,

    /// Initial breeze direction, which places the sun (degrees)
    #[arg(long, value_name = "DEGREES", default_value = "180")]
    pub breeze: String,

    /// Initial current direction, which turns the water (degrees)
    #[arg(long, value_name = "DEGREES", default_value = "0")]
    pub current: String,

    /// Disable the wind control
    #[arg(long)]
    pub no_wind: bool,

    /// Disable the wave height control
    #[arg(long)]
    pub no_wave_height: bool,

    /// Disable the breeze control
    #[arg(long)]
    pub no_breeze: bool,

    /// Disable the current control
    #[arg(long)]
    pub no_current: bool,

    /// Disable the storm toggle
    #[arg(long)]
    pub no_storm_toggle: bool,

    /// Start in storm weather
    #[arg(long)]
    pub storm: bool,

    /// Seed for rain and lightning
    #[arg(long, value_name = "SEED", default_value = "0")]
    pub seed: u64,

    /// Normal map shapes
    #[arg(long, value_enum, default_value = "circles")]
    pub normal_map: NormalMapArg,

    /// Window width (pixels)
    #[arg(long, value_name = "PIXELS", default_value = "1280")]
    pub width: u32,

    /// Window height (pixels)
    #[arg(long, value_name = "PIXELS", default_value = "720")]
    pub height: u32,

    /// Write the generated normal map to a PNG and exit
    #[arg(long, value_name = "PATH")]
    pub dump_normal_map: Option<PathBuf>,
}

impl Args {
    /// Initial control values
    ///
    /// Unparsable or out-of-range values are rejected and the control keeps
    /// its default.
    pub fn control_inputs(&self) -> ControlInputs {
        let mut inputs = ControlInputs::default();
        let raw_values = [
            (ControlName::Wind, &self.wind, self.no_wind),
            (ControlName::WaveHeight, &self.wave_height, self.no_wave_height),
            (ControlName::Breeze, &self.breeze, self.no_breeze),
            (ControlName::CurrentDirection, &self.current, self.no_current),
        ];
        for (name, raw, disabled) in raw_values {
            if disabled {
                inputs.remove(name);
            } else if !inputs.set(name, parse_control_value(raw)) {
                log::warn!(
                    "Ignoring --{} {:?}, keeping {:?}",
                    name.id(),
                    raw,
                    inputs.get(name)
                );
            }
        }
        inputs.storm_toggle = !self.no_storm_toggle;
        inputs
    }

    /// Build the startup configuration
    pub fn context_config(&self) -> ContextConfig {
        let mut config = ContextConfig {
            inputs: self.control_inputs(),
            seed: self.seed,
            start_in_storm: self.storm,
            ..Default::default()
        };
        config.normal_map.variant = self.normal_map.into();
        config.render.window_width = self.width.max(1);
        config.render.window_height = self.height.max(1);
        config
    }
}
