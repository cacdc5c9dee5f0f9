use wasm_bindgen::prelude::*;

mod app;
mod bridge;
mod components;
pub mod config;
pub mod error;
pub mod mint;
pub mod state;
mod utils;

#[wasm_bindgen(start)]
pub fn run_app() -> Result<(), JsValue> {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    wasm_logger::init(wasm_logger::Config::default());

    let config = config::MintConfig::load();
    if config.candy_machine_id.is_none() {
        log::warn!("no candy machine id configured, minting is disabled");
    }
    log::info!("mint page starting on {} ({})", config.network, config.rpc_host);

    yew::Renderer::<app::Home>::with_props(app::HomeProps { config }).render();
    Ok(())
}
