//! Operating modes, selected by name on the command line.

use std::fmt;
use std::str::FromStr;

use crate::options::UsageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    FindBitmask,
    FindColorHorizontal,
    FindColorVertical,
    TraceBitmask,
    TraceHorizontal,
    TraceMainColor,
    TraceMouse,
    TraceVertical,
}

impl ScanMode {
    pub const ALL: [ScanMode; 8] = [
        ScanMode::FindBitmask,
        ScanMode::FindColorHorizontal,
        ScanMode::FindColorVertical,
        ScanMode::TraceBitmask,
        ScanMode::TraceHorizontal,
        ScanMode::TraceMainColor,
        ScanMode::TraceMouse,
        ScanMode::TraceVertical,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ScanMode::FindBitmask => "find bitmask",
            ScanMode::FindColorHorizontal => "find color horizontal",
            ScanMode::FindColorVertical => "find color vertical",
            ScanMode::TraceBitmask => "trace bitmask",
            ScanMode::TraceHorizontal => "trace horizontal",
            ScanMode::TraceMainColor => "trace main color",
            ScanMode::TraceMouse => "trace mouse",
            ScanMode::TraceVertical => "trace vertical",
        }
    }

    /// Range is given as `width,height` rather than a single length.
    pub fn is_tuple_range(self) -> bool {
        matches!(
            self,
            ScanMode::TraceBitmask | ScanMode::FindBitmask | ScanMode::TraceMainColor
        )
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, ScanMode::TraceHorizontal | ScanMode::FindColorHorizontal)
    }

    /// Trace modes echo a mouse-derived origin before their output.
    pub fn is_trace(self) -> bool {
        matches!(
            self,
            ScanMode::TraceHorizontal
                | ScanMode::TraceVertical
                | ScanMode::TraceBitmask
                | ScanMode::TraceMouse
        )
    }

    pub fn requires_run_length(self) -> bool {
        matches!(self, ScanMode::FindColorHorizontal | ScanMode::FindColorVertical)
    }

    pub fn requires_bitmask(self) -> bool {
        self == ScanMode::FindBitmask
    }

    pub fn requires_color(self) -> bool {
        matches!(
            self,
            ScanMode::FindBitmask
                | ScanMode::FindColorHorizontal
                | ScanMode::FindColorVertical
                | ScanMode::TraceBitmask
        )
    }
}

impl FromStr for ScanMode {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScanMode::ALL
            .into_iter()
            .find(|m| m.name() == s.trim())
            .ok_or_else(|| UsageError::UnknownMode(s.to_string()))
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
