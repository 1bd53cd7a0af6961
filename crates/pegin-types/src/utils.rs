/// Strips a single leading `0x` from a hex string, if present.
pub fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x").unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_hex_prefix() {
        assert_eq!(strip_hex_prefix("0xdeadbeef"), "deadbeef");
        assert_eq!(strip_hex_prefix("deadbeef"), "deadbeef");
        assert_eq!(strip_hex_prefix("0x0xab"), "0xab");
        assert_eq!(strip_hex_prefix(""), "");
    }
}
