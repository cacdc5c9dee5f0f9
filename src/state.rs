//! Page state: the connected wallet, the fetched machine snapshot, the alert
//! banner and the minting flag.

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// How long an open alert stays on screen before it hides itself.
pub const ALERT_AUTO_HIDE_MS: u32 = 6_000;

/// Capabilities borrowed from the connected wallet provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalletSession {
    pub public_key: String,
    pub can_sign_transaction: bool,
    pub can_sign_all_transactions: bool,
}

impl WalletSession {
    /// A session only exists when the provider exposes an identity and both
    /// signing capabilities.
    pub fn new(
        public_key: Option<String>,
        can_sign_transaction: bool,
        can_sign_all_transactions: bool,
    ) -> Option<Self> {
        let public_key = public_key.filter(|key| !key.is_empty())?;
        if !can_sign_transaction || !can_sign_all_transactions {
            return None;
        }
        Some(Self {
            public_key,
            can_sign_transaction,
            can_sign_all_transactions,
        })
    }

    pub fn same_identity(a: Option<&Self>, b: Option<&Self>) -> bool {
        a.map(|w| w.public_key.as_str()) == b.map(|w| w.public_key.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatekeeperConfig {
    pub gatekeeper_network: String,
    #[serde(default)]
    pub expire_on_use: bool,
}

/// Handle to the loaded candy machine program.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramHandle {
    pub program_id: String,
}

/// Snapshot of the on-chain candy machine. Replaced wholesale on every
/// successful refresh.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineState {
    pub id: String,
    pub is_active: bool,
    #[serde(default)]
    pub gatekeeper: Option<GatekeeperConfig>,
    #[serde(default)]
    pub program: Option<ProgramHandle>,
    #[serde(default)]
    pub items_available: u64,
    #[serde(default)]
    pub items_redeemed: u64,
    #[serde(default)]
    pub items_remaining: u64,
    /// Price in lamports.
    #[serde(default)]
    pub price: u64,
    /// Unix seconds.
    #[serde(default)]
    pub go_live_date: Option<i64>,
}

impl MachineState {
    pub fn is_sold_out(&self) -> bool {
        self.items_remaining == 0
    }

    /// The gatekeeper network, when the machine is live and gated.
    pub fn active_gatekeeper_network(&self) -> Option<&str> {
        if !self.is_active {
            return None;
        }
        self.gatekeeper
            .as_ref()
            .map(|gate| gate.gatekeeper_network.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    pub fn class(self) -> &'static str {
        match self {
            Severity::Success => "alert-success",
            Severity::Error => "alert-error",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AlertState {
    pub open: bool,
    pub message: String,
    pub severity: Option<Severity>,
}

impl AlertState {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            open: true,
            message: message.into(),
            severity: Some(Severity::Success),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            open: true,
            message: message.into(),
            severity: Some(Severity::Error),
        }
    }

    /// Same message and severity, hidden.
    pub fn dismissed(&self) -> Self {
        Self {
            open: false,
            ..self.clone()
        }
    }
}

/// True while a mint attempt is in flight. Only guards the UI: a second
/// submission is still possible through another path.
#[derive(Clone, Debug, Default)]
pub struct MintingFlag(Rc<Cell<bool>>);

impl MintingFlag {
    pub fn is_set(&self) -> bool {
        self.0.get()
    }

    /// Raises the flag, or returns `None` if an attempt is already running.
    pub fn acquire(&self) -> Option<MintingGuard> {
        if self.0.replace(true) {
            return None;
        }
        Some(MintingGuard(self.0.clone()))
    }
}

/// Clears the minting flag when dropped, whichever way the attempt ends.
#[derive(Debug)]
pub struct MintingGuard(Rc<Cell<bool>>);

impl Drop for MintingGuard {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> MachineState {
        MachineState {
            id: "machine".into(),
            is_active: true,
            gatekeeper: None,
            program: Some(ProgramHandle {
                program_id: "cndy".into(),
            }),
            items_available: 3999,
            items_redeemed: 10,
            items_remaining: 3989,
            price: 500_000_000,
            go_live_date: None,
        }
    }

    #[test]
    fn wallet_session_requires_every_capability() {
        assert!(WalletSession::new(Some("pk".into()), true, true).is_some());
        assert!(WalletSession::new(Some("pk".into()), true, false).is_none());
        assert!(WalletSession::new(Some("pk".into()), false, true).is_none());
        assert!(WalletSession::new(Some(String::new()), true, true).is_none());
        assert!(WalletSession::new(None, true, true).is_none());
    }

    #[test]
    fn minting_flag_is_released_when_guard_drops() {
        let flag = MintingFlag::default();
        let guard = flag.acquire().unwrap();
        assert!(flag.is_set());
        assert!(flag.acquire().is_none());
        drop(guard);
        assert!(!flag.is_set());
        assert!(flag.acquire().is_some());
    }

    #[test]
    fn gatekeeper_only_applies_to_active_machines() {
        let mut state = machine();
        assert_eq!(state.active_gatekeeper_network(), None);

        state.gatekeeper = Some(GatekeeperConfig {
            gatekeeper_network: "ignREusXmGrscGNUesoU9mxfds9AiYTezUKex2PsZV6".into(),
            expire_on_use: false,
        });
        assert_eq!(
            state.active_gatekeeper_network(),
            Some("ignREusXmGrscGNUesoU9mxfds9AiYTezUKex2PsZV6")
        );

        state.is_active = false;
        assert_eq!(state.active_gatekeeper_network(), None);
    }

    #[test]
    fn machine_state_decodes_bridge_json() {
        let json = r#"{
            "id": "machine",
            "isActive": true,
            "gatekeeper": null,
            "program": { "programId": "cndy" },
            "itemsAvailable": 3999,
            "itemsRedeemed": 3999,
            "itemsRemaining": 0,
            "price": 1000000000
        }"#;
        let state: MachineState = serde_json::from_str(json).unwrap();
        assert!(state.is_sold_out());
        assert!(state.gatekeeper.is_none());
        assert_eq!(state.go_live_date, None);
        assert_eq!(state.program.unwrap().program_id, "cndy");
    }

    #[test]
    fn snapshot_without_supply_fields_is_sold_out() {
        let json = r#"{ "id": "machine", "isActive": true }"#;
        let state: MachineState = serde_json::from_str(json).unwrap();
        assert_eq!(state.items_available, 0);
        assert!(state.is_sold_out());
    }

    #[test]
    fn dismissing_keeps_message() {
        let alert = AlertState::error("SOLD OUT!");
        let closed = alert.dismissed();
        assert!(!closed.open);
        assert_eq!(closed.message, "SOLD OUT!");
        assert_eq!(closed.severity, Some(Severity::Error));
    }
}
