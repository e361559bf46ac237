//! Static token-address directory.
//!
//! Served without an upstream call; clients use it to translate the symbols
//! they display into the contract addresses the proxied endpoints expect.
//! ETH maps to the canonical WETH contract.

use serde_json::{Map, Value};

/// Common token contract addresses on Ethereum mainnet.
pub const TOKEN_ADDRESSES: &[(&str, &str)] = &[
    ("ETH", "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
    ("USDC", "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
    ("USDT", "0xdAC17F958D2ee523a2206206994597C13D831ec7"),
    ("DAI", "0x6B175474E89094C44Da98b954EedeAC495271d0F"),
    ("WBTC", "0x2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599"),
    ("UNI", "0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984"),
    ("LINK", "0x514910771AF9Ca656af840dff83E8264EcF986CA"),
];

/// The directory as the JSON object served to clients.
pub fn token_directory() -> Value {
    let mut directory = Map::new();
    for (symbol, address) in TOKEN_ADDRESSES {
        directory.insert((*symbol).to_string(), Value::String((*address).to_string()));
    }
    Value::Object(directory)
}
