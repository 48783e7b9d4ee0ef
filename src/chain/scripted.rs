// Test double for `Eip1193`: replays canned responses in order and records
// every request it receives.

use std::cell::RefCell;
use std::collections::VecDeque;

use serde_json::Value;

use super::Eip1193;
use crate::error::WalletError;

#[derive(Default)]
pub(crate) struct ScriptedProvider {
    responses: RefCell<VecDeque<Result<Value, WalletError>>>,
    calls: RefCell<Vec<(String, Option<Value>)>>,
}

impl ScriptedProvider {
    pub(crate) fn new(responses: Vec<Result<Value, WalletError>>) -> Self {
        Self { responses: RefCell::new(responses.into()), calls: RefCell::default() }
    }

    pub(crate) fn methods(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(m, _)| m.clone()).collect()
    }

    pub(crate) fn params_of(&self, method: &str) -> Value {
        self.calls
            .borrow()
            .iter()
            .find(|(m, _)| m == method)
            .and_then(|(_, p)| p.clone())
            .unwrap_or(Value::Null)
    }
}

impl Eip1193 for ScriptedProvider {
    async fn request(&self, method: &str, params: Option<Value>) -> Result<Value, WalletError> {
        self.calls.borrow_mut().push((method.to_string(), params));
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request {method}"))
    }
}
