use yew::prelude::*;

use crate::bridge::{self, IDENTITY_ELEMENT_ID};

/// Wraps the mint button of a gated machine. The hidden identity trigger is
/// clicked by the page before every mint and starts the gateway's
/// verification for the connected wallet.
pub struct GatewayScope {
    verifying: bool,
}

pub enum Msg {
    Verify,
    Verified(Result<(), String>),
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub wallet: String,
    pub gatekeeper_network: String,
    pub cluster_url: String,
    #[prop_or_default]
    pub children: Html,
}

impl Component for GatewayScope {
    type Message = Msg;
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self { verifying: false }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Verify => {
                if self.verifying {
                    return false;
                }
                self.verifying = true;
                let props = ctx.props();
                let (wallet, network, cluster) = (
                    props.wallet.clone(),
                    props.gatekeeper_network.clone(),
                    props.cluster_url.clone(),
                );
                let link = ctx.link().clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let result = bridge::request_gateway(&wallet, &network, &cluster).await;
                    link.send_message(Msg::Verified(result));
                });
                false
            }
            Msg::Verified(result) => {
                self.verifying = false;
                if let Err(e) = result {
                    log::warn!("gateway verification failed: {e}");
                }
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let onclick = ctx.link().callback(|_: MouseEvent| Msg::Verify);

        html! {
            <div class="gateway-scope" data-gatekeeper-network={ctx.props().gatekeeper_network.clone()}>
                <button id={IDENTITY_ELEMENT_ID} class="identity-trigger" hidden={true} {onclick} />
                {ctx.props().children.clone()}
            </div>
        }
    }
}
