use yew::prelude::*;

use crate::bridge::{self, CandyMachineBridge, IdentityElement};
use crate::components::{
    alert::AlertBanner, footer::Footer, gateway::GatewayScope, header::Header,
    mint_button::MintButton, progressive_image::ProgressiveImage, wallet::WalletConnect,
};
use crate::config::MintConfig;
use crate::mint::{self, MintOutcome, MintRequest};
use crate::state::{AlertState, MachineState, MintingFlag, WalletSession};

const SOLPHANT_LOGO: &str = "assets/images/solphant-logo.png";
const SOLPHANT_PLACEHOLDER: &str = "assets/images/solphant-placeholder.png";
const ELEPHANT_LOGO: &str = "assets/images/elephant-logo.png";
const ELEPHANT_PLACEHOLDER: &str = "assets/images/elephant-placeholder.png";
const ALIMANGO_LOGO: &str = "assets/images/alimango-logo.png";
const ALIMANGO_PLACEHOLDER: &str = "assets/images/alimango-placeholder.png";

#[derive(Properties, PartialEq)]
pub struct HomeProps {
    pub config: MintConfig,
}

/// The mint page. Owns the wallet session, the machine snapshot, the alert
/// banner and the minting flag.
pub struct Home {
    wallet: Option<WalletSession>,
    machine: Option<MachineState>,
    alert: AlertState,
    minting: MintingFlag,
}

pub enum Msg {
    WalletChanged(Option<WalletSession>),
    Refresh,
    MachineLoaded(MachineState),
    Mint,
    MintFinished(MintOutcome),
    CloseAlert,
}

impl Component for Home {
    type Message = Msg;
    type Properties = HomeProps;

    fn create(ctx: &Context<Self>) -> Self {
        ctx.link().send_message(Msg::Refresh);
        Self {
            wallet: None,
            machine: None,
            alert: AlertState::default(),
            minting: MintingFlag::default(),
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        let (new, old) = (&ctx.props().config, &old_props.config);
        if new.candy_machine_id != old.candy_machine_id || new.rpc_host != old.rpc_host {
            ctx.link().send_message(Msg::Refresh);
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::WalletChanged(wallet) => {
                let identity_changed =
                    !WalletSession::same_identity(self.wallet.as_ref(), wallet.as_ref());
                self.wallet = wallet;
                if identity_changed {
                    ctx.link().send_message(Msg::Refresh);
                }
                true
            }
            Msg::Refresh => {
                // In-flight refreshes are not cancelled; the last one to
                // resolve wins.
                let config = &ctx.props().config;
                let reader = CandyMachineBridge::new(config.rpc_host.clone());
                let wallet = self.wallet.clone();
                let machine_id = config.candy_machine_id.clone();
                let link = ctx.link().clone();
                wasm_bindgen_futures::spawn_local(async move {
                    if let Some(state) =
                        mint::refresh(&reader, wallet.as_ref(), machine_id.as_deref()).await
                    {
                        link.send_message(Msg::MachineLoaded(state));
                    }
                });
                false
            }
            Msg::MachineLoaded(state) => {
                self.machine = Some(state);
                true
            }
            Msg::Mint => {
                let Some(guard) = self.minting.acquire() else {
                    return false;
                };
                let config = &ctx.props().config;
                let chain = CandyMachineBridge::new(config.rpc_host.clone());
                let tx_timeout = config.tx_timeout();
                let wallet = self.wallet.clone();
                let machine = self.machine.clone();
                let link = ctx.link().clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let outcome = mint::mint(
                        guard,
                        &chain,
                        &chain,
                        &IdentityElement,
                        MintRequest {
                            wallet: wallet.as_ref(),
                            machine: machine.as_ref(),
                            tx_timeout,
                        },
                    )
                    .await;
                    link.send_message(Msg::MintFinished(outcome));
                });
                true
            }
            Msg::MintFinished(outcome) => {
                if let Some(alert) = outcome.alert() {
                    self.alert = alert;
                }
                if outcome.reloads_page() {
                    bridge::reload_page();
                }
                true
            }
            Msg::CloseAlert => {
                self.alert = self.alert.dismissed();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let config = &ctx.props().config;
        let on_wallet = ctx.link().callback(Msg::WalletChanged);
        let on_mint = ctx.link().callback(|_: ()| Msg::Mint);
        let on_close = ctx.link().callback(|_: ()| Msg::CloseAlert);

        let mint_button = html! {
            <MintButton
                machine={self.machine.clone()}
                is_minting={self.minting.is_set()}
                {on_mint}
            />
        };
        let gate = mint::gating_network(self.machine.as_ref(), self.wallet.as_ref());

        html! {
            <>
                <div class="page">
                    <div class="header">
                        <ProgressiveImage src={ELEPHANT_LOGO} placeholder={ELEPHANT_PLACEHOLDER} class={classes!("logo")} />
                        <ProgressiveImage src={ALIMANGO_LOGO} placeholder={ALIMANGO_PLACEHOLDER} class={classes!("logo")} />
                    </div>
                    <div class="container">
                        <div class="phant-logo">
                            <ProgressiveImage src={SOLPHANT_LOGO} placeholder={SOLPHANT_PLACEHOLDER} />
                        </div>
                        <div class="right-pan">
                            <h1 class="title">{"SOLPHANT V1"}</h1>
                            <div class="text">
                                {"SolPhant V1 is a version 1 collection of 3999 NFT by Phant on Solana Network. \
                                  Each NFT can be staked without leaving the wallet of the holder. \
                                  This will also be a key to some dApp we will build."}
                            </div>
                            <div class="main-button">
                                <WalletConnect on_change={on_wallet} />
                                if let Some(wallet) = &self.wallet {
                                    <Header machine={self.machine.clone()} start_date={config.start_date} />
                                    <div class="mint-container">
                                        if let Some(network) = gate {
                                            <GatewayScope
                                                wallet={wallet.public_key.clone()}
                                                gatekeeper_network={network.to_string()}
                                                cluster_url={config.rpc_host.clone()}
                                            >
                                                {mint_button}
                                            </GatewayScope>
                                        } else {
                                            {mint_button}
                                        }
                                    </div>
                                }
                            </div>
                        </div>
                    </div>
                    <Footer />
                </div>
                <AlertBanner alert={self.alert.clone()} {on_close} />
            </>
        }
    }
}
