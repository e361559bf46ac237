//! Upstream request construction.
//!
//! Maps a validated descriptor plus its endpoint kind onto the concrete
//! upstream URL, query set and credential placement. The two quote kinds
//! deliberately keep their different upstream conventions: the fusion-plus
//! quoter takes `srcChain`/`dstChain`/`walletAddress` while the fusion
//! endpoint expects `srcChainId`/`dstChainId`/`receiver`.

use url::Url;

use crate::config::UpstreamConfig;
use crate::gateway::endpoint::EndpointKind;
use crate::gateway::error::GatewayError;
use crate::gateway::params::RequestDescriptor;
use crate::gateway::validate::candle_width_seconds;
use crate::upstream::UpstreamRequest;

/// USDC on Ethereum mainnet, the fixed quote leg for seconds-addressed
/// candle requests.
pub const USDC_MAINNET: &str = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48";

const NEWS_DOMAINS: &str = "coindesk.com,cointelegraph.com,cryptoslate.com";
const NEWS_EXCLUDED_DOMAINS: &str = "npmjs.com,github.com,medium.com";

/// Build the upstream request for a validated descriptor.
///
/// `credential` is the bearer token for aggregation kinds and the API key
/// for news; it is injected here and nowhere else.
pub fn build_upstream_request(
    kind: EndpointKind,
    descriptor: &RequestDescriptor,
    upstream: &UpstreamConfig,
    credential: &str,
) -> Result<UpstreamRequest, GatewayError> {
    let base = match kind {
        EndpointKind::News => &upstream.news_base_url,
        _ => &upstream.aggregation_base_url,
    };
    let base = parse_base(kind, base)?;

    let request = match kind {
        EndpointKind::Balance => {
            let wallet = require(descriptor, "walletAddress")?;
            let url = join(kind, &base, &format!("/balance/v1.2/1/balances/{wallet}"))?;
            UpstreamRequest::new(url).with_bearer(credential)
        }

        EndpointKind::ChartByPeriodSeconds => {
            let token1 = require(descriptor, "token1")?;
            let period = require(descriptor, "period")?;
            let url = join(
                kind,
                &base,
                &format!("/charts/v1.0/chart/aggregated/candle/{USDC_MAINNET}/{token1}/{period}/1"),
            )?;
            UpstreamRequest::new(url).with_bearer(credential)
        }

        EndpointKind::ChartByPeriodLabel => {
            let token0 = require(descriptor, "token0")?;
            let token1 = require(descriptor, "token1")?;
            let label = require(descriptor, "period")?;
            // Validation guarantees the label maps; stay total anyway.
            let seconds = candle_width_seconds(label).ok_or(GatewayError::InvalidEnumValue {
                field: "period",
                allowed: "24H, 1W, 1M, 1Y, AllTime",
            })?;
            let url = join(
                kind,
                &base,
                &format!("/charts/v1.0/chart/aggregated/candle/{token0}/{token1}/{seconds}/1"),
            )?;
            UpstreamRequest::new(url).with_bearer(credential)
        }

        EndpointKind::Quote => {
            let mut url = join(kind, &base, "/fusion-plus/quoter/v1.0/quote/receive/")?;
            url.query_pairs_mut()
                .append_pair("srcChain", require(descriptor, "srcChain")?)
                .append_pair("dstChain", require(descriptor, "dstChain")?)
                .append_pair("srcTokenAddress", require(descriptor, "srcTokenAddress")?)
                .append_pair("dstTokenAddress", require(descriptor, "dstTokenAddress")?)
                .append_pair("amount", require(descriptor, "amount")?)
                .append_pair("walletAddress", require(descriptor, "walletAddress")?)
                .append_pair("enableEstimate", descriptor.get_or("enableEstimate", "true"))
                .append_pair("source", descriptor.get_or("source", "sdk"));
            UpstreamRequest::new(url).with_bearer(credential)
        }

        EndpointKind::FusionPlusQuote => {
            let mut url = join(kind, &base, "/fusion/quote")?;
            url.query_pairs_mut()
                .append_pair("srcChainId", require(descriptor, "srcChain")?)
                .append_pair("dstChainId", require(descriptor, "dstChain")?)
                .append_pair("srcTokenAddress", require(descriptor, "srcTokenAddress")?)
                .append_pair("dstTokenAddress", require(descriptor, "dstTokenAddress")?)
                .append_pair("amount", require(descriptor, "amount")?)
                .append_pair("receiver", require(descriptor, "walletAddress")?)
                .append_pair("enableEstimate", descriptor.get_or("enableEstimate", "true"));
            UpstreamRequest::new(url).with_bearer(credential)
        }

        EndpointKind::TransactionHistory => {
            let address = require(descriptor, "address")?;
            let mut url = join(kind, &base, &format!("/history/v2.0/history/{address}/events"))?;
            url.query_pairs_mut().append_pair("chainId", "1");
            UpstreamRequest::new(url).with_bearer(credential)
        }

        EndpointKind::News => {
            let mut url = join(kind, &base, "/v2/everything")?;
            url.query_pairs_mut()
                .append_pair("q", &format!("({})", descriptor.get_or("q", "Bitcoin AND Ethereum")))
                .append_pair("from", descriptor.get_or("from", ""))
                .append_pair("sortBy", "publishedAt")
                .append_pair("language", "en")
                .append_pair("domains", NEWS_DOMAINS)
                .append_pair("excludeDomains", NEWS_EXCLUDED_DOMAINS)
                .append_pair("apiKey", credential);
            UpstreamRequest::new(url)
        }
    };

    Ok(request)
}

fn parse_base(kind: EndpointKind, base: &str) -> Result<Url, GatewayError> {
    Url::parse(base).map_err(|e| GatewayError::RequestSetupFailed {
        message: kind.failure_message(),
        details: format!("invalid upstream base URL: {e}"),
    })
}

fn join(kind: EndpointKind, base: &Url, path: &str) -> Result<Url, GatewayError> {
    base.join(path).map_err(|e| GatewayError::RequestSetupFailed {
        message: kind.failure_message(),
        details: format!("invalid upstream URL path: {e}"),
    })
}

fn require<'a>(
    descriptor: &'a RequestDescriptor,
    field: &'static str,
) -> Result<&'a str, GatewayError> {
    descriptor
        .get(field)
        .ok_or(GatewayError::MissingParameter { field })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::params::resolve;
    use std::collections::HashMap;

    fn descriptor(kind: EndpointKind, pairs: &[(&str, &str)]) -> RequestDescriptor {
        let query: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        resolve(kind, &query)
    }

    fn upstream() -> UpstreamConfig {
        UpstreamConfig::default()
    }

    #[test]
    fn balance_url_embeds_the_wallet() {
        let d = descriptor(EndpointKind::Balance, &[("walletAddress", "0xabc")]);
        let request =
            build_upstream_request(EndpointKind::Balance, &d, &upstream(), "tok").unwrap();
        assert_eq!(
            request.url.as_str(),
            "https://api.1inch.dev/balance/v1.2/1/balances/0xabc"
        );
        assert_eq!(request.bearer.as_deref(), Some("tok"));
    }

    #[test]
    fn seconds_chart_pairs_against_usdc() {
        let d = descriptor(
            EndpointKind::ChartByPeriodSeconds,
            &[("token1", "0xB"), ("period", "3600")],
        );
        let request =
            build_upstream_request(EndpointKind::ChartByPeriodSeconds, &d, &upstream(), "tok")
                .unwrap();
        assert_eq!(
            request.url.path(),
            format!("/charts/v1.0/chart/aggregated/candle/{USDC_MAINNET}/0xB/3600/1")
        );
    }

    #[test]
    fn label_chart_translates_to_candle_seconds() {
        let d = descriptor(
            EndpointKind::ChartByPeriodLabel,
            &[("token0", "0xA"), ("token1", "0xB"), ("period", "24H")],
        );
        let request =
            build_upstream_request(EndpointKind::ChartByPeriodLabel, &d, &upstream(), "tok")
                .unwrap();
        assert_eq!(
            request.url.path(),
            "/charts/v1.0/chart/aggregated/candle/0xA/0xB/3600/1"
        );
    }

    #[test]
    fn quote_keeps_the_fusion_plus_field_names() {
        let d = descriptor(
            EndpointKind::Quote,
            &[
                ("srcTokenAddress", "0xS"),
                ("dstTokenAddress", "0xD"),
                ("amount", "1000"),
                ("walletAddress", "0xW"),
            ],
        );
        let request = build_upstream_request(EndpointKind::Quote, &d, &upstream(), "tok").unwrap();
        assert_eq!(request.url.path(), "/fusion-plus/quoter/v1.0/quote/receive/");
        let query = request.url.query().unwrap();
        assert!(query.contains("srcChain=1"));
        assert!(query.contains("dstChain=42161"));
        assert!(query.contains("walletAddress=0xW"));
        assert!(query.contains("source=sdk"));
    }

    #[test]
    fn fusion_quote_renames_chain_and_receiver_fields() {
        let d = descriptor(
            EndpointKind::FusionPlusQuote,
            &[
                ("srcTokenAddress", "0xS"),
                ("dstTokenAddress", "0xD"),
                ("amount", "1000"),
                ("walletAddress", "0xW"),
            ],
        );
        let request =
            build_upstream_request(EndpointKind::FusionPlusQuote, &d, &upstream(), "tok").unwrap();
        assert_eq!(request.url.path(), "/fusion/quote");
        let query = request.url.query().unwrap();
        assert!(query.contains("srcChainId=1"));
        assert!(query.contains("dstChainId=42161"));
        assert!(query.contains("receiver=0xW"));
        assert!(!query.contains("walletAddress"));
        assert!(!query.contains("srcChain="));
    }

    #[test]
    fn history_url_sends_only_the_chain_id_upstream() {
        let d = descriptor(EndpointKind::TransactionHistory, &[("address", "0xH")]);
        let request =
            build_upstream_request(EndpointKind::TransactionHistory, &d, &upstream(), "tok")
                .unwrap();
        assert_eq!(request.url.path(), "/history/v2.0/history/0xH/events");
        assert_eq!(request.url.query(), Some("chainId=1"));
    }

    #[test]
    fn news_authenticates_by_query_key_not_bearer() {
        let d = descriptor(EndpointKind::News, &[]);
        let request =
            build_upstream_request(EndpointKind::News, &d, &upstream(), "news-key").unwrap();
        assert_eq!(request.url.path(), "/v2/everything");
        assert!(request.bearer.is_none());
        let query = request.url.query().unwrap();
        assert!(query.contains("apiKey=news-key"));
        assert!(query.contains("q=%28Bitcoin+AND+Ethereum%29"));
        assert!(query.contains("sortBy=publishedAt"));
    }

    #[test]
    fn malformed_base_url_is_a_setup_failure() {
        let mut bad = upstream();
        bad.aggregation_base_url = "not a url".into();
        let d = descriptor(EndpointKind::Balance, &[("walletAddress", "0xabc")]);
        let err = build_upstream_request(EndpointKind::Balance, &d, &bad, "tok").unwrap_err();
        assert!(matches!(err, GatewayError::RequestSetupFailed { .. }));
    }
}
