//! Endpoint kind tags.
//!
//! Every proxied route is described by one [`EndpointKind`]. The kind selects
//! the parameter resolution table, the validation rules, the upstream URL
//! template and the response shape, so the per-route handlers stay thin.

/// The proxied endpoint families supported by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointKind {
    /// Wallet token balances.
    Balance,
    /// OHLC candles addressed by candle width in seconds.
    ChartByPeriodSeconds,
    /// OHLC candles addressed by a named time range (24H, 1W, ...).
    ChartByPeriodLabel,
    /// Cross-chain swap quote (fusion-plus quoter convention).
    Quote,
    /// Cross-chain swap quote (fusion convention with renamed fields).
    FusionPlusQuote,
    /// Wallet transaction history events.
    TransactionHistory,
    /// Crypto news headlines.
    News,
}

impl EndpointKind {
    /// Stable label used for metrics and structured logs.
    pub fn label(&self) -> &'static str {
        match self {
            EndpointKind::Balance => "balance",
            EndpointKind::ChartByPeriodSeconds => "chart",
            EndpointKind::ChartByPeriodLabel => "chart_range",
            EndpointKind::Quote => "quote",
            EndpointKind::FusionPlusQuote => "fusion_plus_quote",
            EndpointKind::TransactionHistory => "history",
            EndpointKind::News => "news",
        }
    }

    /// Canonical fields that must be present after resolution.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            EndpointKind::Balance => &["walletAddress"],
            EndpointKind::ChartByPeriodSeconds => &["token1", "period"],
            EndpointKind::ChartByPeriodLabel => &["token0", "token1", "period"],
            EndpointKind::Quote | EndpointKind::FusionPlusQuote => {
                &["srcTokenAddress", "dstTokenAddress", "amount", "walletAddress"]
            }
            EndpointKind::TransactionHistory => &["address"],
            EndpointKind::News => &[],
        }
    }

    /// Client-facing message used when the upstream call fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            EndpointKind::Balance => "Failed to fetch wallet balance data",
            EndpointKind::ChartByPeriodSeconds | EndpointKind::ChartByPeriodLabel => {
                "Failed to fetch chart data"
            }
            EndpointKind::Quote | EndpointKind::FusionPlusQuote => "Failed to fetch quote data",
            EndpointKind::TransactionHistory => "Failed to fetch transaction history",
            EndpointKind::News => "Failed to fetch news data",
        }
    }
}
