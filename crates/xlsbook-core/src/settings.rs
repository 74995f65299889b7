//! Document settings

/// Upper bounds on record tables, checked when a record is created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Limits {
    /// Maximum number of FONT records
    pub max_fonts: usize,
    /// Maximum number of XF records (style and cell XFs together)
    pub max_styles: usize,
    /// Maximum number of custom FORMAT records
    pub max_custom_formats: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_fonts: 512,
            max_styles: 4000,
            max_custom_formats: 250,
        }
    }
}

/// Document-wide settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DocumentSettings {
    /// Use the 1904 date system (Mac compatibility)
    pub date_1904: bool,
    /// Record table limits
    pub limits: Limits,
}

impl DocumentSettings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the date system
    pub fn with_date_1904(mut self, date_1904: bool) -> Self {
        self.date_1904 = date_1904;
        self
    }

    /// Set the record table limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }
}
