//! Mint lifecycle: refreshing the machine snapshot and running one mint
//! attempt against the chain collaborators.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{classify, ChainError, MintError, MintFailure};
use crate::state::{AlertState, MachineState, MintingGuard, WalletSession};

pub const MINT_SUCCEEDED: &str = "Congratulations! Mint succeeded!";
pub const MINT_FAILED: &str = "Mint failed! Please try again!";

/// Confirmation status of a submitted transaction.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SignatureStatus {
    #[serde(default)]
    pub err: Option<serde_json::Value>,
}

impl SignatureStatus {
    pub fn succeeded(&self) -> bool {
        matches!(self.err, None | Some(serde_json::Value::Null))
    }
}

#[async_trait(?Send)]
pub trait ChainStateReader {
    async fn fetch_state(
        &self,
        wallet: &WalletSession,
        machine_id: &str,
    ) -> Result<MachineState, ChainError>;
}

#[async_trait(?Send)]
pub trait TransactionSubmitter {
    /// Builds and sends one mint transaction, returning the transaction ids
    /// in submission order.
    async fn mint_one_token(
        &self,
        machine: &MachineState,
        payer: &str,
    ) -> Result<Vec<String>, MintError>;
}

#[async_trait(?Send)]
pub trait ConfirmationPoller {
    /// Rejects with an empty [`MintError`] when `timeout` elapses.
    async fn await_confirmation(
        &self,
        txid: &str,
        timeout: Duration,
        query_status: bool,
    ) -> Result<Option<SignatureStatus>, MintError>;
}

/// Out-of-band identity verification shown before a gated mint.
pub trait IdentityPrompt {
    fn trigger(&self);
}

impl<F: Fn()> IdentityPrompt for F {
    fn trigger(&self) {
        self()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum MintOutcome {
    /// Wallet, identity or program handle was missing; nothing was sent.
    Skipped,
    Confirmed,
    /// Confirmed with an error, or no transaction id came back.
    Rejected,
    Failed(MintFailure),
}

impl MintOutcome {
    pub fn alert(&self) -> Option<AlertState> {
        match self {
            MintOutcome::Skipped => None,
            MintOutcome::Confirmed => Some(AlertState::success(MINT_SUCCEEDED)),
            MintOutcome::Rejected => Some(AlertState::error(MINT_FAILED)),
            MintOutcome::Failed(failure) => Some(AlertState::error(failure.message())),
        }
    }

    pub fn reloads_page(&self) -> bool {
        matches!(
            self,
            MintOutcome::Failed(MintFailure::SoldOut { reload: true })
        )
    }
}

/// Fetches a fresh snapshot. Returns `None` when there is nothing to fetch
/// or the fetch failed, in which case the caller keeps its current snapshot.
pub async fn refresh<R>(
    reader: &R,
    wallet: Option<&WalletSession>,
    machine_id: Option<&str>,
) -> Option<MachineState>
where
    R: ChainStateReader + ?Sized,
{
    let (Some(wallet), Some(machine_id)) = (wallet, machine_id) else {
        return None;
    };

    match reader.fetch_state(wallet, machine_id).await {
        Ok(state) => {
            log::debug!(
                "candy machine {} refreshed: {}/{} remaining",
                state.id,
                state.items_remaining,
                state.items_available
            );
            Some(state)
        }
        Err(e) => {
            log::warn!("There was a problem fetching Candy Machine state: {e}");
            None
        }
    }
}

/// The gatekeeper network the mint button must be wrapped in, if any.
pub fn gating_network<'a>(
    machine: Option<&'a MachineState>,
    wallet: Option<&WalletSession>,
) -> Option<&'a str> {
    let network = machine?.active_gatekeeper_network()?;
    wallet.filter(|w| w.can_sign_transaction)?;
    Some(network)
}

pub struct MintRequest<'a> {
    pub wallet: Option<&'a WalletSession>,
    pub machine: Option<&'a MachineState>,
    pub tx_timeout: Duration,
}

/// Runs one mint attempt. The minting flag held by `guard` stays raised
/// for the whole attempt and is cleared on every exit path.
pub async fn mint<S, P>(
    guard: MintingGuard,
    submitter: &S,
    poller: &P,
    identity: &dyn IdentityPrompt,
    request: MintRequest<'_>,
) -> MintOutcome
where
    S: TransactionSubmitter + ?Sized,
    P: ConfirmationPoller + ?Sized,
{
    identity.trigger();

    let outcome = match (request.wallet, request.machine) {
        (Some(wallet), Some(machine))
            if machine.program.is_some() && !wallet.public_key.is_empty() =>
        {
            match submit_and_confirm(submitter, poller, machine, wallet, request.tx_timeout).await
            {
                Ok(true) => MintOutcome::Confirmed,
                Ok(false) => MintOutcome::Rejected,
                Err(e) => {
                    log::error!("mint failed: {e:?}");
                    MintOutcome::Failed(classify(&e))
                }
            }
        }
        _ => {
            log::warn!("mint skipped: wallet or candy machine not ready");
            MintOutcome::Skipped
        }
    };

    drop(guard);
    outcome
}

async fn submit_and_confirm<S, P>(
    submitter: &S,
    poller: &P,
    machine: &MachineState,
    wallet: &WalletSession,
    tx_timeout: Duration,
) -> Result<bool, MintError>
where
    S: TransactionSubmitter + ?Sized,
    P: ConfirmationPoller + ?Sized,
{
    let txids = submitter.mint_one_token(machine, &wallet.public_key).await?;
    let Some(txid) = txids.into_iter().next() else {
        return Ok(false);
    };

    log::info!("mint transaction sent: {txid}");
    let status = poller.await_confirmation(&txid, tx_timeout, true).await?;
    Ok(status.is_some_and(|s| s.succeeded()))
}
