//! Metric names and descriptions.
//!
//! The crate only emits through the `metrics` facade. Installing a recorder
//! (Prometheus or otherwise) is left to the binary that embeds it.

use metrics::{describe_counter, Unit};

/// Errors constructed, labelled by `code` and `category`.
pub const ERRORS_TOTAL: &str = "mailvault_errors_total";

/// Policy requirements not satisfied, labelled by `requirement` and `role`.
pub const ACCESS_DENIED_TOTAL: &str = "mailvault_access_denied_total";

/// Route guard outcomes, labelled by `outcome`.
pub const ROUTE_DECISIONS_TOTAL: &str = "mailvault_route_decisions_total";

/// Register descriptions with the installed recorder. Call once after the
/// recorder is set up.
pub fn describe_metrics() {
    describe_counter!(ERRORS_TOTAL, Unit::Count, "Errors raised by the access-control services");
    describe_counter!(
        ACCESS_DENIED_TOTAL,
        Unit::Count,
        "Policy requirements that a session did not satisfy"
    );
    describe_counter!(
        ROUTE_DECISIONS_TOTAL,
        Unit::Count,
        "Route guard decisions by outcome"
    );
}
