use std::time::Duration;

use gloo_utils::format::JsValueSerdeExt;
use serde::Deserialize;
use wasm_bindgen::JsValue;

pub const DEFAULT_RPC_HOST: &str = "https://api.devnet.solana.com";
pub const DEFAULT_NETWORK: &str = "devnet";
pub const DEFAULT_TX_TIMEOUT_MS: u64 = 30_000;

/// Construction-time settings for the mint page. Without a candy machine id
/// the page renders but minting stays disabled.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MintConfig {
    pub candy_machine_id: Option<String>,
    pub rpc_host: String,
    pub network: String,
    /// Unix seconds.
    pub start_date: i64,
    pub tx_timeout_ms: u64,
}

impl Default for MintConfig {
    fn default() -> Self {
        Self {
            candy_machine_id: None,
            rpc_host: DEFAULT_RPC_HOST.to_string(),
            network: DEFAULT_NETWORK.to_string(),
            start_date: 0,
            tx_timeout_ms: DEFAULT_TX_TIMEOUT_MS,
        }
    }
}

impl MintConfig {
    /// `window.mintConfig` when the host page provides it, otherwise the
    /// values baked in at build time.
    pub fn load() -> Self {
        match Self::from_window() {
            Some(config) => config,
            None => Self::from_build_env(),
        }
    }

    fn from_window() -> Option<Self> {
        let window = web_sys::window()?;
        let raw = js_sys::Reflect::get(&window, &JsValue::from_str("mintConfig")).ok()?;
        if raw.is_undefined() || raw.is_null() {
            return None;
        }
        match raw.into_serde::<MintConfig>() {
            Ok(config) => Some(config.normalized()),
            Err(e) => {
                log::warn!("ignoring malformed window.mintConfig: {e}");
                None
            }
        }
    }

    pub fn from_build_env() -> Self {
        Self::from_lookup(|key| {
            let value = match key {
                "CANDY_MACHINE_ID" => option_env!("CANDY_MACHINE_ID"),
                "SOLANA_RPC_HOST" => option_env!("SOLANA_RPC_HOST"),
                "SOLANA_NETWORK" => option_env!("SOLANA_NETWORK"),
                "CANDY_START_DATE" => option_env!("CANDY_START_DATE"),
                "CONNECTION_TIMEOUT_MS" => option_env!("CONNECTION_TIMEOUT_MS"),
                _ => None,
            };
            value.map(str::to_string)
        })
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            candy_machine_id: lookup("CANDY_MACHINE_ID"),
            rpc_host: lookup("SOLANA_RPC_HOST").unwrap_or(defaults.rpc_host),
            network: lookup("SOLANA_NETWORK").unwrap_or(defaults.network),
            start_date: parse_or("CANDY_START_DATE", lookup("CANDY_START_DATE"), defaults.start_date),
            tx_timeout_ms: parse_or(
                "CONNECTION_TIMEOUT_MS",
                lookup("CONNECTION_TIMEOUT_MS"),
                defaults.tx_timeout_ms,
            ),
        };
        config.normalized()
    }

    pub fn tx_timeout(&self) -> Duration {
        Duration::from_millis(self.tx_timeout_ms)
    }

    fn normalized(mut self) -> Self {
        self.candy_machine_id = self
            .candy_machine_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());
        if self.rpc_host.trim().is_empty() {
            self.rpc_host = DEFAULT_RPC_HOST.to_string();
        }
        self
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: std::str::FromStr,
{
    match raw {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("{key}={raw:?} is not a valid number, using the default");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = MintConfig::from_lookup(lookup(&[]));
        assert_eq!(config, MintConfig::default());
        assert_eq!(config.tx_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn reads_every_variable() {
        let config = MintConfig::from_lookup(lookup(&[
            ("CANDY_MACHINE_ID", " 9X5dVJ9eJ4oWo1Nh2Wk3Wn3dLSgFCtXwnkh1sJ3Ds7mE "),
            ("SOLANA_RPC_HOST", "https://api.mainnet-beta.solana.com"),
            ("SOLANA_NETWORK", "mainnet-beta"),
            ("CANDY_START_DATE", "1640995200"),
            ("CONNECTION_TIMEOUT_MS", "60000"),
        ]));
        assert_eq!(
            config.candy_machine_id.as_deref(),
            Some("9X5dVJ9eJ4oWo1Nh2Wk3Wn3dLSgFCtXwnkh1sJ3Ds7mE")
        );
        assert_eq!(config.rpc_host, "https://api.mainnet-beta.solana.com");
        assert_eq!(config.network, "mainnet-beta");
        assert_eq!(config.start_date, 1_640_995_200);
        assert_eq!(config.tx_timeout_ms, 60_000);
    }

    #[test]
    fn blank_machine_id_disables_minting() {
        let config = MintConfig::from_lookup(lookup(&[("CANDY_MACHINE_ID", "  ")]));
        assert_eq!(config.candy_machine_id, None);
    }

    #[test]
    fn bad_numbers_fall_back() {
        let config = MintConfig::from_lookup(lookup(&[
            ("CANDY_START_DATE", "tomorrow"),
            ("CONNECTION_TIMEOUT_MS", "-5"),
        ]));
        assert_eq!(config.start_date, 0);
        assert_eq!(config.tx_timeout_ms, DEFAULT_TX_TIMEOUT_MS);
    }

    #[test]
    fn json_config_fills_missing_fields() {
        let config: MintConfig =
            serde_json::from_str(r#"{ "candyMachineId": "abc", "txTimeoutMs": 5000 }"#).unwrap();
        let config = config.normalized();
        assert_eq!(config.candy_machine_id.as_deref(), Some("abc"));
        assert_eq!(config.tx_timeout_ms, 5_000);
        assert_eq!(config.rpc_host, DEFAULT_RPC_HOST);
    }
}
