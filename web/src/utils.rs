/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    let mut bytes = [0u8; 8];
    for byte in &mut bytes {
        *byte = (256. * random()) as u8;
    }
    u64::from_be_bytes(bytes)
}

/// Parses a `--seed` value, decimal or `0x`-prefixed hex.
pub(crate) fn parse_seed(seed: &str) -> Option<u64> {
    let seed = seed.trim();
    match seed.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => seed.parse().ok(),
    }
}
