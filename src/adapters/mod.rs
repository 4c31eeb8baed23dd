// Adapters layer: concrete implementations of the domain ports (selector, key derivation, http providers).

pub mod google;
pub mod http;
pub mod key;
pub mod nominatim;
pub mod registry;
pub mod selector;
