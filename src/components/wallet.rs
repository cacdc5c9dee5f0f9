use yew::prelude::*;

use crate::bridge;
use crate::state::WalletSession;
use crate::utils::shorten_address;

pub struct WalletConnect {
    session: Option<WalletSession>,
    connecting: bool,
    error: Option<String>,
}

pub enum Msg {
    Connect,
    Connected(Option<WalletSession>),
    Error(String),
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub on_change: Callback<Option<WalletSession>>,
}

impl Component for WalletConnect {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        // Trusted sites reconnect silently, so pick up an existing session.
        let session = bridge::wallet_session();
        if session.is_some() {
            ctx.props().on_change.emit(session.clone());
        }
        Self {
            session,
            connecting: false,
            error: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Connect => {
                if self.connecting {
                    return false;
                }
                self.connecting = true;
                self.error = None;
                let link = ctx.link().clone();
                wasm_bindgen_futures::spawn_local(async move {
                    match bridge::connect_wallet().await {
                        Ok(session) => link.send_message(Msg::Connected(session)),
                        Err(e) => link.send_message(Msg::Error(e)),
                    }
                });
                true
            }
            Msg::Connected(session) => {
                self.connecting = false;
                if session.is_none() {
                    self.error = Some("Wallet connected without signing support".to_string());
                }
                self.session = session.clone();
                ctx.props().on_change.emit(session);
                true
            }
            Msg::Error(error) => {
                log::warn!("wallet connection failed: {error}");
                self.connecting = false;
                self.session = None;
                self.error = Some(error);
                ctx.props().on_change.emit(None);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let onclick = ctx.link().callback(|_| Msg::Connect);

        html! {
            <div class="wallet-section">
                if let Some(session) = &self.session {
                    <div class="wallet-address">
                        {shorten_address(&session.public_key)}
                    </div>
                } else {
                    <button class="connect-button" {onclick} disabled={self.connecting}>
                        if self.connecting {
                            {"CONNECTING..."}
                        } else {
                            {"CONNECT WALLET"}
                        }
                    </button>
                    if let Some(error) = &self.error {
                        <div class="wallet-error">{error}</div>
                    }
                }
            </div>
        }
    }
}
