use yew::prelude::*;

/// Shows `placeholder` until the full image has loaded.
pub struct ProgressiveImage {
    loaded: bool,
}

pub enum Msg {
    Loaded,
    Failed,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub src: AttrValue,
    pub placeholder: AttrValue,
    #[prop_or_default]
    pub alt: AttrValue,
    #[prop_or_default]
    pub class: Classes,
}

impl Component for ProgressiveImage {
    type Message = Msg;
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self { loaded: false }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded => {
                self.loaded = true;
                true
            }
            Msg::Failed => {
                log::debug!("image {} failed to load", ctx.props().src);
                false
            }
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().src != old_props.src {
            self.loaded = false;
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let onload = ctx.link().callback(|_: Event| Msg::Loaded);
        let onerror = ctx.link().callback(|_: Event| Msg::Failed);

        html! {
            <>
                if self.loaded {
                    <img src={props.src.clone()} alt={props.alt.clone()} class={props.class.clone()} />
                } else {
                    <img src={props.placeholder.clone()} alt={props.alt.clone()} class={props.class.clone()} />
                    <img src={props.src.clone()} style="display: none" {onload} {onerror} />
                }
            </>
        }
    }
}
