use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::state::{AlertState, ALERT_AUTO_HIDE_MS};

/// Dismissible notification banner. An open alert hides itself after
/// [`ALERT_AUTO_HIDE_MS`]; a newer alert restarts the timer.
pub struct AlertBanner {
    hide_timer: Option<Timeout>,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub alert: AlertState,
    pub on_close: Callback<()>,
}

impl AlertBanner {
    fn schedule_hide(&mut self, ctx: &Context<Self>) {
        self.hide_timer = if ctx.props().alert.open {
            let on_close = ctx.props().on_close.clone();
            Some(Timeout::new(ALERT_AUTO_HIDE_MS, move || on_close.emit(())))
        } else {
            None
        };
    }
}

impl Component for AlertBanner {
    type Message = ();
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let mut banner = Self { hide_timer: None };
        banner.schedule_hide(ctx);
        banner
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().alert != old_props.alert {
            self.schedule_hide(ctx);
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let alert = &ctx.props().alert;
        if !alert.open {
            return html! {};
        }

        let severity = alert.severity.map(|s| s.class()).unwrap_or("alert-info");
        let onclick = ctx.props().on_close.reform(|_: MouseEvent| ());

        html! {
            <div class={classes!("snackbar", severity)} role="alert">
                <span class="alert-message">{alert.message.clone()}</span>
                <button class="alert-close" aria-label="close" {onclick}>{"×"}</button>
            </div>
        }
    }
}
