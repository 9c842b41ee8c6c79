//! Fixed limits and defaults for search sessions.

/// Number of businesses requested per search query.
pub const BIZ_SEARCH_LIMIT: u32 = 20;
/// Number of businesses shown per page; drives pager arithmetic.
pub const BIZ_DISPLAY_LIMIT: u32 = 20;
/// Maximum number of category suggestions returned for typed text.
pub const CAT_SEARCH_LIMIT: usize = 10;

pub const DISTANCE_MILES_MAX: u32 = 25;
pub const DISTANCE_METERS_MAX: f64 = 40_000.0;
pub const DISTANCE_METERS_PER_MILE: f64 = 1_609.344;
pub const DISTANCE_DEFAULT_MILES: u32 = 1;

pub const ZIP_DEFAULT: &str = "90402";

/// Category selected before the user types anything.
pub const CAT_CODE_DEFAULT: &str = "restaurants";
pub const CAT_VAL_DEFAULT: &str = "Restaurants";
