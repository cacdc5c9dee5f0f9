use wasm_bindgen::JsValue;
use yew::prelude::*;

use crate::state::MachineState;
use crate::utils::format_sol;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub machine: Option<MachineState>,
    /// Configured launch time in unix seconds; 0 means unset.
    #[prop_or_default]
    pub start_date: i64,
}

/// The machine's own go-live date, else the configured start date.
pub fn go_live_date(machine: &MachineState, start_date: i64) -> Option<i64> {
    machine
        .go_live_date
        .or_else(|| (start_date > 0).then_some(start_date))
}

/// True while the machine has a go-live date still ahead of `now_secs`.
pub fn launch_pending(go_live_date: Option<i64>, now_secs: i64) -> bool {
    go_live_date.is_some_and(|date| date > now_secs)
}

fn launch_label(go_live_date: i64) -> String {
    let date = js_sys::Date::new(&JsValue::from_f64(go_live_date as f64 * 1000.0));
    String::from(date.to_utc_string())
}

/// Supply and price of the loaded machine. Renders nothing until a
/// snapshot has been fetched.
#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let Some(machine) = &props.machine else {
        return html! {};
    };

    let now_secs = (js_sys::Date::now() / 1000.0) as i64;
    let launch = go_live_date(machine, props.start_date)
        .filter(|date| launch_pending(Some(*date), now_secs));

    html! {
        <div class="mint-header">
            <div class="mint-stat">
                <span class="mint-stat-label">{"Remaining"}</span>
                <span class="mint-stat-value">
                    {format!("{} / {}", machine.items_remaining, machine.items_available)}
                </span>
            </div>
            <div class="mint-stat">
                <span class="mint-stat-label">{"Price"}</span>
                <span class="mint-stat-value">{format!("◎ {}", format_sol(machine.price))}</span>
            </div>
            if let Some(date) = launch {
                <div class="mint-stat">
                    <span class="mint-stat-label">{"Live on"}</span>
                    <span class="mint-stat-value">{launch_label(date)}</span>
                </div>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_is_pending_only_before_go_live() {
        assert!(launch_pending(Some(2_000), 1_000));
        assert!(!launch_pending(Some(1_000), 1_000));
        assert!(!launch_pending(Some(500), 1_000));
        assert!(!launch_pending(None, 1_000));
    }

    fn machine(go_live_date: Option<i64>) -> MachineState {
        MachineState {
            id: "machine".into(),
            is_active: false,
            gatekeeper: None,
            program: None,
            items_available: 3999,
            items_redeemed: 0,
            items_remaining: 3999,
            price: 1_000_000_000,
            go_live_date,
        }
    }

    #[test]
    fn configured_start_date_fills_missing_go_live() {
        assert_eq!(go_live_date(&machine(None), 1_640_995_200), Some(1_640_995_200));
        assert_eq!(go_live_date(&machine(Some(1_700_000_000)), 1_640_995_200), Some(1_700_000_000));
        assert_eq!(go_live_date(&machine(None), 0), None);
    }
}
