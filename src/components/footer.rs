use yew::prelude::*;

#[function_component(Footer)]
pub fn footer() -> Html {
    html! {
        <div class="footer">
            <a class="social-twitter" href="https://twitter.com" target="_blank" rel="noopener noreferrer">
                {"Twitter"}
            </a>
            <div class="circle-discord">
                <a class="social-discord" href="https://discord.com" target="_blank" rel="noopener noreferrer">
                    {"Discord"}
                </a>
            </div>
        </div>
    }
}
