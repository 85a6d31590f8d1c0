use std::fmt;
use std::str::FromStr;

/// Lifecycle of a physical asset.
///
/// `CheckedOut` is entered and left only through checkout and return;
/// `Retired` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetStatus {
    Available,
    CheckedOut,
    UnderMaintenance,
    Retired,
}

impl AssetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetStatus::Available => "Available",
            AssetStatus::CheckedOut => "CheckedOut",
            AssetStatus::UnderMaintenance => "UnderMaintenance",
            AssetStatus::Retired => "Retired",
        }
    }

    pub fn can_check_out(&self) -> bool {
        *self == AssetStatus::Available
    }

    pub fn can_return(&self) -> bool {
        *self == AssetStatus::CheckedOut
    }

    /// Whether a plain update may move an asset from `self` to `next`.
    pub fn can_update_to(&self, next: AssetStatus) -> bool {
        use AssetStatus::*;
        if *self == next {
            return true;
        }
        matches!(
            (*self, next),
            (Available, UnderMaintenance)
                | (UnderMaintenance, Available)
                | (Available, Retired)
                | (UnderMaintenance, Retired)
        )
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(AssetStatus::Available),
            "CheckedOut" => Ok(AssetStatus::CheckedOut),
            "UnderMaintenance" => Ok(AssetStatus::UnderMaintenance),
            "Retired" => Ok(AssetStatus::Retired),
            other => Err(format!("Unknown asset status: {other}")),
        }
    }
}
