//! Fixed heat-risk bands for WBGT and THI.

use std::fmt;

/// WBGT risk band (°C).
///
/// | Range         | Category        |
/// |---------------|-----------------|
/// | < 25          | Safe            |
/// | 25 – < 28     | Caution         |
/// | 28 – < 31     | Extreme Caution |
/// | 31 – < 33     | Danger          |
/// | >= 33         | Extreme Danger  |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WbgtCategory {
    Safe,
    Caution,
    ExtremeCaution,
    Danger,
    ExtremeDanger,
    Unknown,
}

impl WbgtCategory {
    pub fn from_value(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_nan() => WbgtCategory::Unknown,
            Some(v) if v < 25.0 => WbgtCategory::Safe,
            Some(v) if v < 28.0 => WbgtCategory::Caution,
            Some(v) if v < 31.0 => WbgtCategory::ExtremeCaution,
            Some(v) if v < 33.0 => WbgtCategory::Danger,
            Some(_) => WbgtCategory::ExtremeDanger,
            None => WbgtCategory::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WbgtCategory::Safe => "Safe",
            WbgtCategory::Caution => "Caution",
            WbgtCategory::ExtremeCaution => "Extreme Caution",
            WbgtCategory::Danger => "Danger",
            WbgtCategory::ExtremeDanger => "Extreme Danger",
            WbgtCategory::Unknown => "Unknown",
        }
    }

    /// The two most severe bands.
    pub fn is_danger_or_worse(&self) -> bool {
        matches!(self, WbgtCategory::Danger | WbgtCategory::ExtremeDanger)
    }
}

/// THI risk band.
///
/// | Range     | Category  |
/// |-----------|-----------|
/// | < 72      | Comfort   |
/// | 72 – < 79 | Alert     |
/// | 79 – < 89 | Danger    |
/// | >= 89     | Emergency |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThiCategory {
    Comfort,
    Alert,
    Danger,
    Emergency,
    Unknown,
}

impl ThiCategory {
    pub fn from_value(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_nan() => ThiCategory::Unknown,
            Some(v) if v < 72.0 => ThiCategory::Comfort,
            Some(v) if v < 79.0 => ThiCategory::Alert,
            Some(v) if v < 89.0 => ThiCategory::Danger,
            Some(_) => ThiCategory::Emergency,
            None => ThiCategory::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThiCategory::Comfort => "Comfort",
            ThiCategory::Alert => "Alert",
            ThiCategory::Danger => "Danger",
            ThiCategory::Emergency => "Emergency",
            ThiCategory::Unknown => "Unknown",
        }
    }
}

/// A categorized value on either scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskCategory {
    Wbgt(WbgtCategory),
    Thi(ThiCategory),
}

impl RiskCategory {
    pub fn label(&self) -> &'static str {
        match self {
            RiskCategory::Wbgt(c) => c.label(),
            RiskCategory::Thi(c) => c.label(),
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
