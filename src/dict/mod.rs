pub mod manager;
pub mod transliterate;
pub mod variants;

pub use variants::get_variants;
