//! crates/logging/src/levels.rs
//! Diagnostic categories and the verbosity level assigned to each.

/// Diagnostic categories understood by the harness.
///
/// Every category owns a tracing target under the `lpc::` prefix so that
/// events can be filtered per category.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LogFlag {
    /// Probe start, finish, and outcome.
    Probe,
    /// Chunk-level progress of writer and reader tasks.
    Transfer,
    /// Opening, closing, and syncing device handles.
    Device,
    /// Operator pacing prompts.
    Pacing,
    /// End-of-run summary.
    Summary,
}

impl LogFlag {
    /// Every category, in display order.
    pub const ALL: [Self; 5] = [
        Self::Probe,
        Self::Transfer,
        Self::Device,
        Self::Pacing,
        Self::Summary,
    ];

    /// Name used by `--debug` tokens.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Probe => "probe",
            Self::Transfer => "transfer",
            Self::Device => "device",
            Self::Pacing => "pacing",
            Self::Summary => "summary",
        }
    }

    /// Tracing target owned by this category.
    #[must_use]
    pub const fn target(self) -> &'static str {
        match self {
            Self::Probe => "lpc::probe",
            Self::Transfer => "lpc::transfer",
            Self::Device => "lpc::device",
            Self::Pacing => "lpc::pacing",
            Self::Summary => "lpc::summary",
        }
    }

    /// Looks up a category by its `--debug` name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.name() == name)
    }

    /// Maps a tracing target to a category.
    ///
    /// Nested targets such as `lpc::transfer::reader` resolve to their parent
    /// category; targets outside the `lpc::` namespace map to `None`.
    #[must_use]
    pub fn from_target(target: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| {
            let base = flag.target();
            target == base
                || target
                    .strip_prefix(base)
                    .is_some_and(|rest| rest.starts_with("::"))
        })
    }
}

/// Verbosity level for each [`LogFlag`].
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct FlagLevels {
    /// Probe lifecycle level.
    pub probe: u8,
    /// Transfer progress level.
    pub transfer: u8,
    /// Device handle level.
    pub device: u8,
    /// Pacing prompt level.
    pub pacing: u8,
    /// Summary level.
    pub summary: u8,
}

impl FlagLevels {
    /// Get the level for a specific flag.
    pub fn get(&self, flag: LogFlag) -> u8 {
        match flag {
            LogFlag::Probe => self.probe,
            LogFlag::Transfer => self.transfer,
            LogFlag::Device => self.device,
            LogFlag::Pacing => self.pacing,
            LogFlag::Summary => self.summary,
        }
    }

    /// Set the level for a specific flag.
    pub fn set(&mut self, flag: LogFlag, level: u8) {
        match flag {
            LogFlag::Probe => self.probe = level,
            LogFlag::Transfer => self.transfer = level,
            LogFlag::Device => self.device = level,
            LogFlag::Pacing => self.pacing = level,
            LogFlag::Summary => self.summary = level,
        }
    }

    /// Set every flag to the same level.
    pub fn set_all(&mut self, level: u8) {
        for flag in LogFlag::ALL {
            self.set(flag, level);
        }
    }
}
