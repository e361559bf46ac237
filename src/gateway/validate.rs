//! Descriptor validation.
//!
//! Fail-fast: the first missing or invalid field is reported and no upstream
//! call is attempted for a request that is already known to fail.

use crate::gateway::endpoint::EndpointKind;
use crate::gateway::error::GatewayError;
use crate::gateway::params::RequestDescriptor;

/// Candle widths accepted by the seconds-addressed chart endpoint.
pub const CHART_PERIOD_SECONDS: &[&str] = &["300", "900", "3600", "14400", "86400", "604800"];

/// Named ranges accepted by the label-addressed chart endpoint.
pub const CHART_PERIOD_LABELS: &[&str] = &["24H", "1W", "1M", "1Y", "AllTime"];

const CHART_PERIOD_SECONDS_ALLOWED: &str = "300, 900, 3600, 14400, 86400, 604800 seconds";
const CHART_PERIOD_LABELS_ALLOWED: &str = "24H, 1W, 1M, 1Y, AllTime";

/// Check required fields and enumerated values for `kind`.
pub fn validate(kind: EndpointKind, descriptor: &RequestDescriptor) -> Result<(), GatewayError> {
    for field in kind.required_fields() {
        if descriptor.get(field).is_none() {
            return Err(GatewayError::MissingParameter { field });
        }
    }

    match kind {
        EndpointKind::ChartByPeriodSeconds => {
            let period = descriptor.get("period").unwrap_or_default();
            if !CHART_PERIOD_SECONDS.contains(&period) {
                return Err(GatewayError::InvalidEnumValue {
                    field: "period",
                    allowed: CHART_PERIOD_SECONDS_ALLOWED,
                });
            }
        }
        EndpointKind::ChartByPeriodLabel => {
            let period = descriptor.get("period").unwrap_or_default();
            if candle_width_seconds(period).is_none() {
                return Err(GatewayError::InvalidEnumValue {
                    field: "period",
                    allowed: CHART_PERIOD_LABELS_ALLOWED,
                });
            }
        }
        _ => {}
    }

    Ok(())
}

/// Candle width in seconds for a named range. The upstream chart endpoint
/// only understands seconds, so labels are translated before dispatch.
pub fn candle_width_seconds(label: &str) -> Option<&'static str> {
    match label {
        "24H" => Some("3600"),
        "1W" => Some("14400"),
        "1M" => Some("86400"),
        // AllTime uses the widest candle available upstream.
        "1Y" | "AllTime" => Some("604800"),
        _ => None,
    }
}
