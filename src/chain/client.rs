// Request sequencing for the three wallet actions: connect, read score, record score.

use log::{debug, info, warn};
use serde_json::{Value, json};

use super::{ChainConfig, Eip1193, decode_uint, encode_record_score, encode_score_query};
use crate::error::{UNRECOGNIZED_CHAIN, WalletError};

pub struct WalletClient<P> {
    provider: P,
    chain: ChainConfig,
    contract: String,
    gas_limit: u64,
}

impl<P: Eip1193> WalletClient<P> {
    pub fn new(provider: P, chain: ChainConfig, contract: impl Into<String>, gas_limit: u64) -> Self {
        Self { provider, chain, contract: contract.into(), gas_limit }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Request account access and make sure the wallet sits on the target
    /// chain, adding the chain when the wallet does not know it. Returns the
    /// first account.
    pub async fn connect(&self) -> Result<String, WalletError> {
        let accounts = self.provider.request("eth_requestAccounts", None).await?;
        let account = accounts
            .as_array()
            .and_then(|list| list.first())
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(WalletError::NoAccounts)?;

        let current = self.chain_id().await?;
        debug!("current chain id: {current}");
        debug!("expected chain id: {}", self.chain.chain_id);

        if !self.chain.matches(&current) {
            self.switch_chain().await?;
        }
        info!("wallet connected: {account}");
        Ok(account)
    }

    pub async fn chain_id(&self) -> Result<String, WalletError> {
        let value = self.provider.request("eth_chainId", None).await?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| WalletError::InvalidResponse(format!("eth_chainId returned {value}")))
    }

    async fn switch_chain(&self) -> Result<(), WalletError> {
        let params = json!([{ "chainId": self.chain.chain_id }]);
        match self.provider.request("wallet_switchEthereumChain", Some(params)).await {
            Ok(_) => Ok(()),
            Err(err) if err.code() == Some(UNRECOGNIZED_CHAIN) => {
                info!("wallet does not know {}, adding it", self.chain.chain_name);
                let params = Value::Array(vec![serde_json::to_value(&self.chain)?]);
                self.provider.request("wallet_addEthereumChain", Some(params)).await?;
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Read the recorded score of `address` through `eth_call`.
    pub async fn fetch_score(&self, address: &str) -> Result<u64, WalletError> {
        let data = encode_score_query(address)?;
        let params = json!([{ "to": self.contract, "data": data }, "latest"]);
        let result = self.provider.request("eth_call", Some(params)).await?;
        let hex = result
            .as_str()
            .ok_or_else(|| WalletError::InvalidResponse(format!("eth_call returned {result}")))?;
        decode_uint(hex)
    }

    /// Submit `score` from `from`. Refuses to send when the wallet is on
    /// another chain. Returns the transaction hash.
    pub async fn record_score(&self, from: &str, score: u64) -> Result<String, WalletError> {
        let current = self.chain_id().await?;
        if !self.chain.matches(&current) {
            warn!("refusing to record on chain {current}");
            return Err(WalletError::WrongNetwork {
                expected: self.chain.chain_id.clone(),
                actual: current,
            });
        }

        let data = encode_record_score(score);
        debug!("sending transaction from {from} to {} data {data}", self.contract);
        let params = json!([{
            "from": from,
            "to": self.contract,
            "data": data,
            "gas": format!("{:#X}", self.gas_limit),
        }]);
        let hash = self.provider.request("eth_sendTransaction", Some(params)).await?;
        let hash = hash
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| WalletError::InvalidResponse(format!("eth_sendTransaction returned {hash}")))?;
        info!("score {score} submitted in {hash}");
        Ok(hash)
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::chain::scripted::ScriptedProvider;
    use crate::chain::{CONTRACT_ADDRESS, DEFAULT_GAS_LIMIT};

    const ACCOUNT: &str = "0x00000000000000000000000000000000000000aa";

    fn client(responses: Vec<Result<Value, WalletError>>) -> WalletClient<ScriptedProvider> {
        WalletClient::new(
            ScriptedProvider::new(responses),
            ChainConfig::arc_testnet(),
            CONTRACT_ADDRESS,
            DEFAULT_GAS_LIMIT,
        )
    }

    fn rpc(code: i64) -> WalletError {
        WalletError::Rpc { code, message: "nope".into() }
    }

    #[test]
    fn connect_on_target_chain_skips_switch() {
        let c = client(vec![Ok(json!([ACCOUNT])), Ok(json!("0x4CF0EA"))]);
        assert_eq!(block_on(c.connect()).unwrap(), ACCOUNT);
        assert_eq!(c.provider().methods(), ["eth_requestAccounts", "eth_chainId"]);
    }

    #[test]
    fn connect_switches_when_on_other_chain() {
        let c = client(vec![Ok(json!([ACCOUNT])), Ok(json!("0x1")), Ok(Value::Null)]);
        block_on(c.connect()).unwrap();
        assert_eq!(
            c.provider().methods(),
            ["eth_requestAccounts", "eth_chainId", "wallet_switchEthereumChain"]
        );
        assert_eq!(c.provider().params_of("wallet_switchEthereumChain"), json!([{ "chainId": "0x4cf0ea" }]));
    }

    #[test]
    fn connect_adds_chain_on_unrecognized_chain_error() {
        let c = client(vec![
            Ok(json!([ACCOUNT])),
            Ok(json!("0x1")),
            Err(rpc(UNRECOGNIZED_CHAIN)),
            Ok(Value::Null),
        ]);
        block_on(c.connect()).unwrap();
        let added = c.provider().params_of("wallet_addEthereumChain");
        assert_eq!(added[0]["chainId"], "0x4cf0ea");
        assert_eq!(added[0]["nativeCurrency"]["symbol"], "USDC");
    }

    #[test]
    fn connect_propagates_other_switch_errors() {
        let c = client(vec![Ok(json!([ACCOUNT])), Ok(json!("0x1")), Err(rpc(4001))]);
        let err = block_on(c.connect()).unwrap_err();
        assert_eq!(err.code(), Some(4001));
        assert!(!c.provider().methods().contains(&"wallet_addEthereumChain".to_string()));
    }

    #[test]
    fn connect_without_accounts_fails() {
        let c = client(vec![Ok(json!([]))]);
        assert!(matches!(block_on(c.connect()), Err(WalletError::NoAccounts)));
    }

    #[test]
    fn fetch_score_calls_contract_at_latest_block() {
        let c = client(vec![Ok(json!(
            "0x0000000000000000000000000000000000000000000000000000000000000539"
        ))]);
        assert_eq!(block_on(c.fetch_score(ACCOUNT)).unwrap(), 1337);
        let params = c.provider().params_of("eth_call");
        assert_eq!(params[0]["to"], CONTRACT_ADDRESS);
        assert_eq!(params[1], "latest");
        let data = params[0]["data"].as_str().unwrap();
        assert!(data.starts_with("0x5c60f693"));
        assert!(data.ends_with("aa"));
    }

    #[test]
    fn record_score_sends_transaction_with_gas_limit() {
        let c = client(vec![Ok(json!("0x4cf0ea")), Ok(json!("0xdeadbeef"))]);
        assert_eq!(block_on(c.record_score(ACCOUNT, 16)).unwrap(), "0xdeadbeef");
        let tx = &c.provider().params_of("eth_sendTransaction")[0];
        assert_eq!(tx["from"], ACCOUNT);
        assert_eq!(tx["to"], CONTRACT_ADDRESS);
        assert_eq!(tx["gas"], "0x30D40");
        assert!(tx["data"].as_str().unwrap().ends_with("10"));
    }

    #[test]
    fn record_score_refuses_wrong_network() {
        let c = client(vec![Ok(json!("0x1"))]);
        let err = block_on(c.record_score(ACCOUNT, 5)).unwrap_err();
        assert!(matches!(err, WalletError::WrongNetwork { .. }));
        assert_eq!(c.provider().methods(), ["eth_chainId"]);
    }
}
