// EIP-1193 seam. The browser implementation talks to `window.ethereum`; tests
// substitute a scripted provider.

use js_sys::{Function, Object, Promise, Reflect};
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::window;

use crate::error::WalletError;

/// Minimal `request({ method, params })` interface exposed by injected wallets.
#[allow(async_fn_in_trait)]
pub trait Eip1193 {
    async fn request(&self, method: &str, params: Option<Value>) -> Result<Value, WalletError>;
}

/// Wrapper around the wallet object injected at `window.ethereum`.
pub struct InjectedProvider {
    ethereum: Object,
}

impl InjectedProvider {
    /// Look the provider up now. Extensions may inject late, so callers
    /// detect per action instead of caching at startup.
    pub fn detect() -> Result<Self, WalletError> {
        let win = window().ok_or(WalletError::NoWindow)?;
        let eth = Reflect::get(&win, &JsValue::from_str("ethereum"))
            .map_err(|_| WalletError::NoProvider)?;
        if eth.is_undefined() || eth.is_null() {
            return Err(WalletError::NoProvider);
        }
        let ethereum = eth.dyn_into::<Object>().map_err(|_| WalletError::NoProvider)?;
        Ok(Self { ethereum })
    }
}

impl Eip1193 for InjectedProvider {
    async fn request(&self, method: &str, params: Option<Value>) -> Result<Value, WalletError> {
        let args = Object::new();
        Reflect::set(&args, &JsValue::from_str("method"), &JsValue::from_str(method))
            .map_err(js_err)?;
        if let Some(params) = params {
            // Plain objects, not ES Maps: wallets read params with property access.
            let js_params = params.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?;
            Reflect::set(&args, &JsValue::from_str("params"), &js_params).map_err(js_err)?;
        }

        let request_fn = Reflect::get(&self.ethereum, &JsValue::from_str("request"))
            .map_err(js_err)?
            .dyn_into::<Function>()
            .map_err(|_| WalletError::Js("provider has no request function".to_string()))?;
        let promise = request_fn
            .call1(&self.ethereum, &args)
            .map_err(WalletError::from_js)?
            .dyn_into::<Promise>()
            .map_err(|_| WalletError::Js(format!("{method} did not return a promise")))?;

        let result = JsFuture::from(promise).await.map_err(WalletError::from_js)?;
        if result.is_undefined() || result.is_null() {
            return Ok(Value::Null);
        }
        Ok(serde_wasm_bindgen::from_value(result)?)
    }
}

fn js_err(value: JsValue) -> WalletError {
    WalletError::Js(format!("{value:?}"))
}
