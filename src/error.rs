//! Error types for the wallet bridge and configuration loading.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Provider error code returned by `wallet_switchEthereumChain` when the
/// wallet does not know the requested chain yet.
pub const UNRECOGNIZED_CHAIN: i64 = 4902;

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("no browser window")]
    NoWindow,

    /// `window.ethereum` is missing.
    #[error("no injected wallet provider")]
    NoProvider,

    #[error("wallet not connected")]
    NotConnected,

    #[error("wallet returned no accounts")]
    NoAccounts,

    #[error("wrong network: expected chain {expected}, wallet is on {actual}")]
    WrongNetwork { expected: String, actual: String },

    /// Rejection from the provider's `request` promise.
    #[error("{message} (code {code})")]
    Rpc { code: i64, message: String },

    #[error("invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Provider rejection that carried a message but no numeric code.
    #[error("{0}")]
    Rejected(String),

    #[error("javascript interop failed: {0}")]
    Js(String),

    #[error("value conversion failed: {0}")]
    Convert(#[from] serde_wasm_bindgen::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WalletError {
    /// Provider error code, if this error came from the wallet itself.
    pub fn code(&self) -> Option<i64> {
        match self {
            WalletError::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Human-facing message, the part shown in alerts.
    pub fn message(&self) -> String {
        match self {
            WalletError::Rpc { message, .. } | WalletError::Rejected(message) => message.clone(),
            other => other.to_string(),
        }
    }

    /// Build from a rejected provider promise. EIP-1193 errors carry
    /// `code` and `message`; anything else is kept as its debug form.
    pub fn from_js(value: JsValue) -> Self {
        let code = js_sys::Reflect::get(&value, &JsValue::from_str("code"))
            .ok()
            .and_then(|c| c.as_f64());
        let message = js_sys::Reflect::get(&value, &JsValue::from_str("message"))
            .ok()
            .and_then(|m| m.as_string());
        match (code, message) {
            (Some(code), message) => WalletError::Rpc {
                code: code as i64,
                message: message.unwrap_or_else(|| "Unknown error".to_string()),
            },
            (None, Some(message)) => WalletError::Rejected(message),
            (None, None) => WalletError::Js(format!("{value:?}")),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
