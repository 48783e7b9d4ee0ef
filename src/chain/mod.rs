//! Wallet bridge to the score contract on the ARC test network.
//!
//! Nothing here builds or signs transactions. The injected wallet does that;
//! this module only knows the target chain parameters, assembles the two call
//! payloads, and sequences the EIP-1193 requests (accounts, chain switch/add,
//! `eth_call`, `eth_sendTransaction`).

use serde::{Deserialize, Serialize};

mod calldata;
mod client;
mod provider;
#[cfg(test)]
pub(crate) mod scripted;

pub use calldata::{
    RECORD_SCORE_SELECTOR, SCORE_QUERY_SELECTOR, decode_uint, encode_record_score,
    encode_score_query,
};
pub use client::WalletClient;
pub use provider::{Eip1193, InjectedProvider};

/// Deployed score contract.
pub const CONTRACT_ADDRESS: &str = "0x2Ee409Ef8DB594adE165dFaaE1ADD362dbEdAb31";

/// Gas limit attached to `recordScore` transactions (200 000).
pub const DEFAULT_GAS_LIMIT: u64 = 0x30D40;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Chain parameters in the shape `wallet_addEthereumChain` expects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChainConfig {
    pub chain_id: String,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

impl ChainConfig {
    pub fn arc_testnet() -> Self {
        Self {
            chain_id: "0x4cf0ea".to_string(),
            chain_name: "Arc Network Testnet".to_string(),
            native_currency: NativeCurrency {
                name: "USDC".to_string(),
                symbol: "USDC".to_string(),
                decimals: 6,
            },
            rpc_urls: vec!["https://rpc.testnet.arc.network".to_string()],
            block_explorer_urls: vec!["https://testnet.arcscan.app".to_string()],
        }
    }

    pub fn matches(&self, chain_id: &str) -> bool {
        chain_ids_match(&self.chain_id, chain_id)
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self::arc_testnet()
    }
}

/// Chain ids are hex strings; wallets differ in letter case.
pub fn chain_ids_match(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// `0x1234...abcd` form for display.
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_id_comparison_ignores_case() {
        let cfg = ChainConfig::arc_testnet();
        assert!(cfg.matches("0x4CF0EA"));
        assert!(cfg.matches("0x4cf0ea"));
        assert!(!cfg.matches("0x1"));
    }

    #[test]
    fn add_chain_params_use_wallet_field_names() {
        let v = serde_json::to_value(ChainConfig::arc_testnet()).unwrap();
        assert_eq!(v["chainId"], "0x4cf0ea");
        assert_eq!(v["chainName"], "Arc Network Testnet");
        assert_eq!(v["nativeCurrency"]["decimals"], 6);
        assert_eq!(v["rpcUrls"][0], "https://rpc.testnet.arc.network");
        assert_eq!(v["blockExplorerUrls"][0], "https://testnet.arcscan.app");
    }

    #[test]
    fn short_address_keeps_prefix_and_suffix() {
        assert_eq!(short_address(CONTRACT_ADDRESS), "0x2Ee4...Ab31");
        assert_eq!(short_address("0x12"), "0x12");
    }
}
