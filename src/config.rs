use log::LevelFilter;

use crate::constants::{DEFAULT_DEBUG_HEIGHT, DEFAULT_DEBUG_WIDTH};

/// Command line settings.
///
/// ```text
/// flappy-term [FRAMES] [--seed N] [--verbose]
/// flappy-term --debug [WIDTH HEIGHT [FRAMES]] [--seed N] [--verbose]
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub debug: bool,
    pub width: u16,
    pub height: u16,
    pub max_frames: Option<u64>,
    pub seed: Option<u64>,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            debug: false,
            width: DEFAULT_DEBUG_WIDTH,
            height: DEFAULT_DEBUG_HEIGHT,
            max_frames: None,
            seed: None,
            verbose: false,
        }
    }
}

impl Config {
    /// Parses arguments without the program name. Numbers that fail to
    /// parse fall back to their defaults.
    pub fn from_args(args: &[String]) -> Self {
        let mut config = Config::default();
        let mut positional: Vec<&str> = Vec::new();

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--seed" => config.seed = iter.next().and_then(|s| s.parse().ok()),
                "--verbose" => config.verbose = true,
                other => positional.push(other),
            }
        }

        config.debug = positional.first() == Some(&"--debug");
        if config.debug {
            if positional.len() >= 3 {
                config.width = positional[1].parse().unwrap_or(DEFAULT_DEBUG_WIDTH);
                config.height = positional[2].parse().unwrap_or(DEFAULT_DEBUG_HEIGHT);
            }
            config.max_frames = positional.get(3).and_then(|s| s.parse().ok());
        } else {
            config.max_frames = positional.first().and_then(|s| s.parse().ok());
        }
        config
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose { LevelFilter::Debug } else { LevelFilter::Info }
    }
}
