pub const LATITUDE: &str = "Latitude";
pub const LONGITUDE: &str = "Longitude";
pub const SEVERITY: &str = "Severity";
pub const DATE: &str = "Date";
pub const TIME: &str = "Time";

pub const YEAR: &str = "Year";
pub const MONTH: &str = "Month";

/// Fields an uploaded table must carry, matched by exact, case-sensitive name.
pub const REQUIRED_COLUMNS: [&str; 5] = [LATITUDE, LONGITUDE, SEVERITY, DATE, TIME];
