use crate::domain::ports::KeyDeriver;
use regex::Regex;
use std::sync::OnceLock;

fn separator_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^\p{L}\p{N}]+").expect("static regex is valid"))
}

/// 去重用的正規化鍵：轉小寫、非英數字元合併為單一空白、去除前後空白
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedKeyDeriver;

impl KeyDeriver for NormalizedKeyDeriver {
    fn derive_key(&self, address: &str) -> String {
        let lowered = address.to_lowercase();
        separator_pattern()
            .replace_all(&lowered, " ")
            .trim()
            .to_string()
    }
}

impl<F> KeyDeriver for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn derive_key(&self, address: &str) -> String {
        self(address)
    }
}
