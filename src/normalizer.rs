/// Trims padding and upper-cases a ticker. Blank input yields `None`.
pub fn normalize_symbol(raw: &str) -> Option<String> {
    let symbol = raw.trim();
    if symbol.is_empty() {
        return None;
    }
    Some(symbol.to_uppercase())
}

/// Normalizes every configured symbol, dropping blanks and repeats while keeping order.
pub fn normalize_all(symbols: &[String]) -> Vec<String> {
    let mut result: Vec<String> = Vec::with_capacity(symbols.len());
    for symbol in symbols.iter().filter_map(|s| normalize_symbol(s)) {
        if !result.contains(&symbol) {
            result.push(symbol);
        }
    }
    result
}
