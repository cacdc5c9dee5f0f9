//! Bindings to the JavaScript side: the candy machine client exposed as
//! `window.candyMachine` and the injected wallet at `window.solana`.

use std::time::Duration;

use async_trait::async_trait;
use gloo_utils::format::JsValueSerdeExt;
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlElement;

use crate::error::{error_code, ChainError, MintError};
use crate::mint::{
    ChainStateReader, ConfirmationPoller, IdentityPrompt, SignatureStatus, TransactionSubmitter,
};
use crate::state::{MachineState, WalletSession};

/// Id of the hidden element that opens the gateway verification flow.
pub const IDENTITY_ELEMENT_ID: &str = "#identity";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = candyMachine, js_name = getCandyMachineState, catch)]
    fn get_candy_machine_state(
        wallet: &str,
        candy_machine_id: &str,
        rpc_host: &str,
    ) -> Result<Promise, JsValue>;

    #[wasm_bindgen(js_namespace = candyMachine, js_name = mintOneToken, catch)]
    fn mint_one_token(candy_machine_id: &str, payer: &str) -> Result<Promise, JsValue>;

    #[wasm_bindgen(js_namespace = candyMachine, js_name = awaitTransactionSignatureConfirmation, catch)]
    fn await_transaction_signature_confirmation(
        txid: &str,
        timeout_ms: f64,
        rpc_host: &str,
        query_status: bool,
    ) -> Result<Promise, JsValue>;

    #[wasm_bindgen(js_namespace = candyMachine, js_name = requestGatewayToken, catch)]
    fn request_gateway_token(
        wallet: &str,
        gatekeeper_network: &str,
        cluster_url: &str,
        options: &JsValue,
    ) -> Result<Promise, JsValue>;
}

async fn settle(promise: Result<Promise, JsValue>) -> Result<JsValue, JsValue> {
    JsFuture::from(promise?).await
}

fn property(target: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

fn describe(value: &JsValue) -> String {
    property(value, "message")
        .and_then(|m| m.as_string())
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Reads the `code`, `msg` and `message` fields off a rejection.
pub fn mint_error(value: &JsValue) -> MintError {
    if let Some(message) = value.as_string() {
        return MintError::with_message(message);
    }
    MintError {
        code: property(value, "code")
            .and_then(|c| c.as_f64())
            .and_then(error_code),
        msg: property(value, "msg").and_then(|m| m.as_string()),
        message: property(value, "message").and_then(|m| m.as_string()),
    }
}

/// Candy machine client bound to one RPC endpoint.
#[derive(Clone, Debug)]
pub struct CandyMachineBridge {
    rpc_host: String,
}

impl CandyMachineBridge {
    pub fn new(rpc_host: impl Into<String>) -> Self {
        Self {
            rpc_host: rpc_host.into(),
        }
    }
}

#[async_trait(?Send)]
impl ChainStateReader for CandyMachineBridge {
    async fn fetch_state(
        &self,
        wallet: &WalletSession,
        machine_id: &str,
    ) -> Result<MachineState, ChainError> {
        let value = settle(get_candy_machine_state(
            &wallet.public_key,
            machine_id,
            &self.rpc_host,
        ))
        .await
        .map_err(|e| ChainError::Rpc(describe(&e)))?;

        value
            .into_serde::<MachineState>()
            .map_err(|e| ChainError::Decode(e.to_string()))
    }
}

#[async_trait(?Send)]
impl TransactionSubmitter for CandyMachineBridge {
    async fn mint_one_token(
        &self,
        machine: &MachineState,
        payer: &str,
    ) -> Result<Vec<String>, MintError> {
        let value = settle(mint_one_token(&machine.id, payer))
            .await
            .map_err(|e| mint_error(&e))?;

        value
            .into_serde::<Vec<Option<String>>>()
            .map(|ids| ids.into_iter().flatten().filter(|id| !id.is_empty()).collect())
            .map_err(|e| MintError::with_message(e.to_string()))
    }
}

#[async_trait(?Send)]
impl ConfirmationPoller for CandyMachineBridge {
    async fn await_confirmation(
        &self,
        txid: &str,
        timeout: Duration,
        query_status: bool,
    ) -> Result<Option<SignatureStatus>, MintError> {
        let value = settle(await_transaction_signature_confirmation(
            txid,
            timeout.as_millis() as f64,
            &self.rpc_host,
            query_status,
        ))
        .await
        .map_err(|e| mint_error(&e))?;

        if value.is_null() || value.is_undefined() {
            return Ok(None);
        }
        value
            .into_serde::<SignatureStatus>()
            .map(Some)
            .map_err(|e| MintError::with_message(e.to_string()))
    }
}

/// Clicks the gateway's hidden verification element. Missing element is
/// fine: the machine is simply not gated.
pub struct IdentityElement;

impl IdentityPrompt for IdentityElement {
    fn trigger(&self) {
        let element = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(IDENTITY_ELEMENT_ID))
            .and_then(|e| e.dyn_into::<HtmlElement>().ok());
        if let Some(element) = element {
            element.click();
        }
    }
}

/// Asks the gateway to verify `wallet` against `gatekeeper_network`.
pub async fn request_gateway(
    wallet: &str,
    gatekeeper_network: &str,
    cluster_url: &str,
) -> Result<(), String> {
    let options = JsValue::from_serde(&serde_json::json!({ "autoShowModal": false }))
        .map_err(|e| e.to_string())?;
    settle(request_gateway_token(wallet, gatekeeper_network, cluster_url, &options))
        .await
        .map(|_| ())
        .map_err(|e| describe(&e))
}

fn provider() -> Option<JsValue> {
    let window = web_sys::window()?;
    property(&window, "solana")
}

fn public_key(provider: &JsValue) -> Option<String> {
    let key = property(provider, "publicKey")?;
    if let Some(key) = key.as_string() {
        return Some(key);
    }
    let to_base58 = property(&key, "toBase58")?.dyn_into::<Function>().ok()?;
    to_base58.call0(&key).ok()?.as_string()
}

fn has_method(provider: &JsValue, name: &str) -> bool {
    property(provider, name).is_some_and(|f| f.is_function())
}

/// The session of an already connected wallet, if any.
pub fn wallet_session() -> Option<WalletSession> {
    let provider = provider()?;
    WalletSession::new(
        public_key(&provider),
        has_method(&provider, "signTransaction"),
        has_method(&provider, "signAllTransactions"),
    )
}

/// Prompts the injected wallet to connect.
pub async fn connect_wallet() -> Result<Option<WalletSession>, String> {
    let provider = provider().ok_or_else(|| "Phantom wallet not found".to_string())?;
    let connect = property(&provider, "connect")
        .and_then(|f| f.dyn_into::<Function>().ok())
        .ok_or_else(|| "wallet does not support connect".to_string())?;

    let result = connect.call0(&provider).map_err(|e| describe(&e))?;
    if let Ok(promise) = result.dyn_into::<Promise>() {
        JsFuture::from(promise).await.map_err(|e| describe(&e))?;
    }
    Ok(wallet_session())
}

pub fn reload_page() {
    let reloaded = web_sys::window().map(|w| w.location().reload());
    if let Some(Err(e)) = reloaded {
        log::error!("page reload failed: {}", describe(&e));
    }
}
