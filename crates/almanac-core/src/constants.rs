/// Product naming shared across crates
pub const PRODUCT_NAME: &str = "Almanac";
pub const PRODUCT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default PRODID emitted by writers targeting current iCalendar 2.0.
pub const PRODUCT_ID: &str = const_str::concat!(
    "-//",
    PRODUCT_NAME,
    "//",
    PRODUCT_NAME,
    " ",
    PRODUCT_VERSION,
    "//EN"
);

/// Default PRODID emitted by writers targeting the RFC 2445 flavour of 2.0.
pub const PRODUCT_ID_RFC2445: &str = const_str::concat!(
    "-//",
    PRODUCT_NAME,
    "//",
    PRODUCT_NAME,
    " ",
    PRODUCT_VERSION,
    " (RFC 2445)//EN"
);

/// Default PRODID emitted by writers targeting vCalendar 1.0.
pub const PRODUCT_ID_VCAL: &str = const_str::concat!(
    "-//",
    PRODUCT_NAME,
    "//",
    PRODUCT_NAME,
    " ",
    PRODUCT_VERSION,
    " (vCal)//EN"
);
