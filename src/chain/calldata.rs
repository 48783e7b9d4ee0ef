// Hand-built call payloads for the score contract: a 4-byte selector followed
// by one 32-byte word, all as 0x-prefixed hex text.

use crate::error::WalletError;

/// `scores(address)` style getter.
pub const SCORE_QUERY_SELECTOR: &str = "0x5c60f693";
/// `recordScore(uint256)` style setter.
pub const RECORD_SCORE_SELECTOR: &str = "0x6b8ff574";

const WORD_HEX_LEN: usize = 64;

/// Selector followed by the address left-padded to one word.
pub fn encode_score_query(address: &str) -> Result<String, WalletError> {
    let body = strip_hex_prefix(address);
    if body.is_empty() || body.len() > WORD_HEX_LEN || !body.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(WalletError::InvalidAddress(address.to_string()));
    }
    Ok(format!("{SCORE_QUERY_SELECTOR}{body:0>width$}", width = WORD_HEX_LEN))
}

/// Selector followed by the score as a lowercase hex word.
pub fn encode_record_score(score: u64) -> String {
    format!("{RECORD_SCORE_SELECTOR}{score:0width$x}", width = WORD_HEX_LEN)
}

/// Parse an `eth_call` result word into a u64. Leading zero padding is
/// accepted; anything wider than 64 bits is rejected.
pub fn decode_uint(result: &str) -> Result<u64, WalletError> {
    let body = strip_hex_prefix(result.trim());
    if body.is_empty() {
        return Err(WalletError::InvalidResponse("empty call result".to_string()));
    }
    let digits = body.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(0);
    }
    if digits.len() > 16 {
        return Err(WalletError::InvalidResponse(format!("value does not fit in 64 bits: {result}")));
    }
    u64::from_str_radix(digits, 16)
        .map_err(|e| WalletError::InvalidResponse(format!("bad hex quantity {result}: {e}")))
}

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_query_pads_address_to_one_word() {
        let data = encode_score_query("0xAbC0000000000000000000000000000000000123").unwrap();
        assert_eq!(data.len(), 10 + 64);
        assert!(data.starts_with("0x5c60f693000000000000000000000000"));
        assert!(data.ends_with("AbC0000000000000000000000000000000000123"));
    }

    #[test]
    fn score_query_rejects_non_hex_address() {
        assert!(matches!(
            encode_score_query("0xnot-an-address"),
            Err(WalletError::InvalidAddress(_))
        ));
        assert!(encode_score_query("0x").is_err());
    }

    #[test]
    fn record_score_encodes_lowercase_hex_word() {
        let data = encode_record_score(255);
        assert_eq!(
            data,
            "0x6b8ff57400000000000000000000000000000000000000000000000000000000000000ff"
        );
        assert_eq!(encode_record_score(0).len(), 74);
    }

    #[test]
    fn decode_accepts_padded_and_short_quantities() {
        assert_eq!(
            decode_uint("0x000000000000000000000000000000000000000000000000000000000000002a").unwrap(),
            42
        );
        assert_eq!(decode_uint("0x1f4").unwrap(), 500);
        assert_eq!(decode_uint("0x0").unwrap(), 0);
    }

    #[test]
    fn decode_rejects_empty_and_oversized_results() {
        assert!(decode_uint("0x").is_err());
        assert!(decode_uint("0x10000000000000000").is_err());
        assert!(decode_uint("0xzz").is_err());
    }
}
