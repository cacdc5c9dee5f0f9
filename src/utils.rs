use wasm_bindgen::prelude::*;

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// `first6...last6` for addresses and signatures; short input is returned
/// unchanged.
#[wasm_bindgen]
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 12 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 6..].iter().collect();
    format!("{head}...{tail}")
}

/// Lamports as SOL with at most four decimals, trailing zeros trimmed.
pub fn format_sol(lamports: u64) -> String {
    let sol = lamports as f64 / LAMPORTS_PER_SOL as f64;
    let text = format!("{sol:.4}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
