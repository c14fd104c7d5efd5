//! crates/logging/src/config.rs
//! Verbosity configuration built from `-v` counts and `--debug` tokens.

use super::levels::{FlagLevels, LogFlag};

/// Per-category verbosity configuration.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct VerbosityConfig {
    /// Level of every category.
    pub levels: FlagLevels,
}

impl VerbosityConfig {
    /// Create a new configuration from a verbose level.
    ///
    /// Level 0 leaves only warnings and errors visible. Higher levels open the
    /// probe lifecycle first, then transfer and device detail.
    pub fn from_verbose_level(level: u8) -> Self {
        let mut config = Self::default();
        let levels = &mut config.levels;

        match level {
            0 => {}
            1 => {
                levels.probe = 1;
                levels.summary = 1;
            }
            2 => {
                levels.probe = 2;
                levels.summary = 1;
                levels.transfer = 1;
                levels.device = 1;
                levels.pacing = 1;
            }
            3 => {
                levels.set_all(2);
            }
            _ => {
                levels.set_all(3);
            }
        }

        config
    }

    /// Returns `true` when an event of `level` for `flag` should be emitted.
    pub fn allows(&self, flag: LogFlag, level: u8) -> bool {
        self.levels.get(flag) >= level
    }

    /// Apply a single flag token (e.g., "transfer2", "device", "all3").
    pub fn apply_flag(&mut self, token: &str) -> Result<(), String> {
        let (name, level) = parse_flag_token(token)?;

        if name == "all" {
            self.levels.set_all(level);
            return Ok(());
        }

        let flag = LogFlag::from_name(name).ok_or_else(|| format!("unknown debug flag: {name}"))?;
        self.levels.set(flag, level);
        Ok(())
    }

    /// Apply a comma-separated list of flag tokens.
    pub fn apply_flags(&mut self, tokens: &str) -> Result<(), String> {
        tokens
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .try_for_each(|token| self.apply_flag(token))
    }
}

/// Parse a flag token like "transfer2" into ("transfer", 2) or "device" into ("device", 1).
fn parse_flag_token(token: &str) -> Result<(&str, u8), String> {
    if token.is_empty() {
        return Err("empty flag token".to_string());
    }

    match token.find(|c: char| c.is_ascii_digit()) {
        Some(0) => Err(format!("flag token has no name: {token}")),
        Some(pos) => {
            let name = &token[..pos];
            let level = token[pos..]
                .parse::<u8>()
                .map_err(|_| format!("invalid level in flag: {token}"))?;
            Ok((name, level))
        }
        None => Ok((token, 1)),
    }
}
