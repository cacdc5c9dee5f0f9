pub mod alert;
pub mod footer;
pub mod gateway;
pub mod header;
pub mod mint_button;
pub mod progressive_image;
pub mod wallet;
