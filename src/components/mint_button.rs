use yew::prelude::*;

use crate::state::MachineState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonState {
    SoldOut,
    Minting,
    Ready,
    Inactive,
}

impl ButtonState {
    /// Sold out wins over everything, then an in-flight mint.
    pub fn of(machine: Option<&MachineState>, is_minting: bool) -> Self {
        match machine {
            Some(m) if m.is_sold_out() => ButtonState::SoldOut,
            _ if is_minting => ButtonState::Minting,
            Some(m) if m.is_active => ButtonState::Ready,
            _ => ButtonState::Inactive,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ButtonState::SoldOut => "SOLD OUT",
            ButtonState::Minting => "MINTING",
            ButtonState::Ready | ButtonState::Inactive => "MINT",
        }
    }

    pub fn disabled(self) -> bool {
        self != ButtonState::Ready
    }
}

#[derive(Properties, PartialEq)]
pub struct MintButtonProps {
    pub machine: Option<MachineState>,
    pub is_minting: bool,
    pub on_mint: Callback<()>,
}

#[function_component(MintButton)]
pub fn mint_button(props: &MintButtonProps) -> Html {
    let state = ButtonState::of(props.machine.as_ref(), props.is_minting);
    let onclick = props.on_mint.reform(|_: MouseEvent| ());

    html! {
        <button class="mint-button" {onclick} disabled={state.disabled()}>
            if state == ButtonState::Minting {
                <span class="spinner" />
            }
            {state.label()}
        </button>
    }
}
