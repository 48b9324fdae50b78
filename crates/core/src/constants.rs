/// Symbol category retained by the catalog bootstrapper when none is configured
pub const DEFAULT_SYMBOL_CATEGORY: &str = "Energy";

/// Default decimal places for moving-average rounding
pub const DEFAULT_MA_PRECISION: u32 = 0;

/// First-class moving-average window presets
pub const MA_WINDOW_WEEK: u32 = 7;
pub const MA_WINDOW_MONTH: u32 = 30;
