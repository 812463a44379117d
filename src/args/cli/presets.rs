use crate::args::PositiveUsize;

/// Named test sizes selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestPreset {
    Quick,
    Standard,
    Endurance,
    /// No preset flag: connections/requests come from flags, config, or defaults.
    Custom,
}

/// Quick level: 10 connections, 100 requests.
const QUICK_LOAD: (usize, usize) = (10, 100);
/// Standard level: 20 connections, 2000 requests.
const STANDARD_LOAD: (usize, usize) = (20, 2000);
/// Endurance level: 30 connections, 5000 requests.
const ENDURANCE_LOAD: (usize, usize) = (30, 5000);

impl TestPreset {
    #[must_use]
    pub const fn from_flags(quick: bool, standard: bool, endurance: bool) -> Self {
        if quick {
            TestPreset::Quick
        } else if endurance {
            TestPreset::Endurance
        } else if standard {
            TestPreset::Standard
        } else {
            TestPreset::Custom
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TestPreset::Quick => "QUICK",
            TestPreset::Standard => "STANDARD",
            TestPreset::Endurance => "ENDURANCE",
            TestPreset::Custom => "CUSTOM",
        }
    }

    /// Connections and request count fixed by the preset, if any.
    #[must_use]
    pub fn load(self) -> Option<(PositiveUsize, PositiveUsize)> {
        let (connections, requests) = match self {
            TestPreset::Quick => QUICK_LOAD,
            TestPreset::Standard => STANDARD_LOAD,
            TestPreset::Endurance => ENDURANCE_LOAD,
            TestPreset::Custom => return None,
        };
        let connections = PositiveUsize::try_from(connections).ok()?;
        let requests = PositiveUsize::try_from(requests).ok()?;
        Some((connections, requests))
    }
}
