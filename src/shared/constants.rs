/// Default page number for pagination
pub const DEFAULT_PAGE: i64 = 1;

/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

