//! Enumeration types for constrained record values.

use serde::{Deserialize, Serialize};

/// Direction of a transaction, also used as the kind of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in.
    Income,
    /// Money going out.
    Expense,
}

impl TransactionType {
    /// Sign shown in front of amounts of this type.
    #[inline]
    #[must_use]
    pub const fn sign(self) -> char {
        match self {
            Self::Income => '+',
            Self::Expense => '-',
        }
    }

    /// Returns the persisted name of this type.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl core::fmt::Display for TransactionType {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for TransactionType {
    type Err = String;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(format!("unknown transaction type: {other}")),
        }
    }
}

/// Presentation icon tag for a category.
///
/// The presentation layer resolves each tag to an actual glyph; unknown
/// categories resolve to [`CategoryIcon::FALLBACK`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CategoryIcon {
    /// Dollar sign.
    DollarSign,
    /// House.
    Home,
    /// Fork and knife.
    Utensils,
    /// Car.
    Car,
    /// Rising chart.
    TrendingUp,
    /// Gift box.
    Gift,
    /// Heart.
    Heart,
    /// Graduation cap.
    GraduationCap,
}

impl CategoryIcon {
    /// Icon used for categories missing from the catalog.
    pub const FALLBACK: Self = Self::DollarSign;

    /// Returns the persisted tag of this icon.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DollarSign => "dollarSign",
            Self::Home => "home",
            Self::Utensils => "utensils",
            Self::Car => "car",
            Self::TrendingUp => "trendingUp",
            Self::Gift => "gift",
            Self::Heart => "heart",
            Self::GraduationCap => "graduationCap",
        }
    }
}

impl core::fmt::Display for CategoryIcon {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Color theme of the application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background.
    #[default]
    Light,
    /// Dark background.
    Dark,
}

impl Theme {
    /// Returns the opposite theme.
    #[inline]
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}
