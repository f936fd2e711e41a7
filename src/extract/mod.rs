//! Free-text extraction of blockchain identifiers.
//!
//! # Responsibilities
//! - Find `0x`-prefixed addresses and transaction hashes in a message
//! - Find chain names, resolving the common `eth`/`matic` aliases
//! - Preserve order of occurrence, including duplicates
//!
//! # Design Decisions
//! - Single tokenizing pass over maximal hex runs, classified by exact
//!   length (40 = address, 64 = tx hash), so the two classes stay disjoint
//!   even for adjacent tokens
//! - Extraction is total: any input yields a (possibly empty) result

/// Chain names recognized in free text, aliases included.
const CHAIN_KEYWORDS: [&str; 8] = [
    "ethereum", "polygon", "base", "arbitrum", "optimism", "bsc", "eth", "matic",
];

const ADDRESS_HEX_LEN: usize = 40;
const TX_HASH_HEX_LEN: usize = 64;

/// Candidate blockchain data pulled out of a message, in order of
/// first appearance. Nothing here is validated yet; see [`crate::validation`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedData {
    pub addresses: Vec<String>,
    pub tx_hashes: Vec<String>,
    pub chains: Vec<String>,
}

/// Scan `text` for wallet addresses, transaction hashes, and chain names.
///
/// Addresses are `0x` + exactly 40 hex digits, tx hashes `0x` + exactly 64.
/// Hex runs of any other length are ignored rather than truncated. Chain
/// names match whole words only, case-insensitively, and are returned
/// lower-cased with `eth` rewritten to `ethereum` and `matic` to `polygon`.
pub fn extract_blockchain_data(text: &str) -> ExtractedData {
    let mut data = ExtractedData::default();
    scan_hex_tokens(text, &mut data);
    scan_chains(text, &mut data);
    data
}

/// One pass over the raw bytes collecting `0x`-prefixed hex runs.
///
/// A run is maximal: it ends at the first non-hex byte. Classification is by
/// exact run length only, so a 41-digit run yields neither an address nor a
/// hash. The one adjustment is for adjacent tokens: when a maximal run is
/// unclassifiable and ends in `0` directly before an `x`, that `0x` is the
/// start of the next token, so the run is re-measured without it. A 40-digit
/// address directly followed by a 64-digit hash therefore yields both, while
/// a 40-digit run that merely abuts a letter `x` stays a plain address.
fn scan_hex_tokens(text: &str, data: &mut ExtractedData) {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i + 1 < bytes.len() {
        if bytes[i] != b'0' || bytes[i + 1] != b'x' {
            i += 1;
            continue;
        }
        let run_start = i + 2;
        let mut j = run_start;
        while j < bytes.len() && bytes[j].is_ascii_hexdigit() {
            j += 1;
        }
        let mut run_end = j;
        // A trailing `0` directly before an `x` is ceded to the next token,
        // but only when the maximal run is not itself classifiable.
        if !classifiable(run_end - run_start)
            && run_end > run_start
            && bytes[run_end - 1] == b'0'
            && run_end < bytes.len()
            && bytes[run_end] == b'x'
        {
            run_end -= 1;
        }
        match run_end - run_start {
            ADDRESS_HEX_LEN => data.addresses.push(text[i..run_end].to_string()),
            TX_HASH_HEX_LEN => data.tx_hashes.push(text[i..run_end].to_string()),
            _ => {}
        }
        // Resume at the end of the run; if a `0x` was ceded, the next
        // iteration picks that token up.
        i = run_end;
    }
}

fn classifiable(run_len: usize) -> bool {
    run_len == ADDRESS_HEX_LEN || run_len == TX_HASH_HEX_LEN
}

/// Whole-word chain name scan with alias rewriting.
fn scan_chains(text: &str, data: &mut ExtractedData) {
    let is_word_char = |c: char| c.is_ascii_alphanumeric() || c == '_';
    for word in text.split(|c: char| !is_word_char(c)) {
        if word.is_empty() {
            continue;
        }
        let lower = word.to_ascii_lowercase();
        let canonical = match lower.as_str() {
            "eth" => "ethereum",
            "matic" => "polygon",
            other if CHAIN_KEYWORDS.contains(&other) => other,
            _ => continue,
        };
        data.chains.push(canonical.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESS: &str = "0x625758C705bf970375fF780f3544C1ddc8eeb6Ab";
    const TX_HASH: &str = "0x700d06dc473f95530a0dfa04c1fe679aecd722d2a14e07170704fb7a8d2381f6";

    #[test]
    fn test_extracts_address_and_chain() {
        let data = extract_blockchain_data(&format!("activity of {ADDRESS} on ethereum?"));
        assert_eq!(data.addresses, vec![ADDRESS.to_string()]);
        assert!(data.tx_hashes.is_empty());
        assert_eq!(data.chains, vec!["ethereum".to_string()]);
    }

    #[test]
    fn test_extracts_tx_hash() {
        let data = extract_blockchain_data(&format!("what happened in {TX_HASH} on polygon"));
        assert!(data.addresses.is_empty());
        assert_eq!(data.tx_hashes, vec![TX_HASH.to_string()]);
        assert_eq!(data.chains, vec!["polygon".to_string()]);
    }

    #[test]
    fn test_empty_input_yields_empty_data() {
        assert_eq!(extract_blockchain_data(""), ExtractedData::default());
        assert_eq!(extract_blockchain_data("hello world"), ExtractedData::default());
    }

    #[test]
    fn test_adjacent_address_and_hash_stay_disjoint() {
        let data = extract_blockchain_data(&format!("{ADDRESS}{TX_HASH}"));
        assert_eq!(data.addresses, vec![ADDRESS.to_string()]);
        assert_eq!(data.tx_hashes, vec![TX_HASH.to_string()]);
    }

    #[test]
    fn test_wrong_length_runs_are_ignored() {
        // 39, 41, 63, and 65 hex digits: none classify.
        for len in [39usize, 41, 63, 65] {
            let token = format!("0x{}", "a".repeat(len));
            let data = extract_blockchain_data(&token);
            assert!(data.addresses.is_empty(), "len {len} misread as address");
            assert!(data.tx_hashes.is_empty(), "len {len} misread as tx hash");
        }
    }

    #[test]
    fn test_address_ending_in_zero_before_letter_x() {
        // The trailing `0` is the 40th hex digit; the `x` after it is plain
        // text, not a new token, so the address must survive intact.
        let address = format!("0x{}0", "a".repeat(39));
        let data = extract_blockchain_data(&format!("send to {address}xyz please"));
        assert_eq!(data.addresses, vec![address]);
        assert!(data.tx_hashes.is_empty());
    }

    #[test]
    fn test_short_run_cedes_embedded_token_start() {
        let address = format!("0x{}", "b".repeat(40));
        let data = extract_blockchain_data(&format!("ref 0x123{address} ok"));
        assert_eq!(data.addresses, vec![address]);
    }

    #[test]
    fn test_duplicates_and_order_preserved() {
        let data = extract_blockchain_data(&format!("{ADDRESS} and again {ADDRESS} on bsc and bsc"));
        assert_eq!(data.addresses.len(), 2);
        assert_eq!(data.chains, vec!["bsc".to_string(), "bsc".to_string()]);
    }

    #[test]
    fn test_chain_aliases_are_rewritten() {
        assert_eq!(extract_blockchain_data("on eth").chains, vec!["ethereum".to_string()]);
        assert_eq!(extract_blockchain_data("on matic").chains, vec!["polygon".to_string()]);
    }

    #[test]
    fn test_chain_match_is_case_insensitive_and_whole_word() {
        assert_eq!(
            extract_blockchain_data("on Ethereum and ARBITRUM").chains,
            vec!["ethereum".to_string(), "arbitrum".to_string()]
        );
        // "eth" inside a larger word must not match.
        assert!(extract_blockchain_data("wrapped weth token").chains.is_empty());
        assert!(extract_blockchain_data("methane").chains.is_empty());
    }

    #[test]
    fn test_chain_order_follows_text_order() {
        let data = extract_blockchain_data("bridge from polygon to optimism via base");
        assert_eq!(
            data.chains,
            vec!["polygon".to_string(), "optimism".to_string(), "base".to_string()]
        );
    }

    #[test]
    fn test_hex_run_at_end_of_input() {
        let data = extract_blockchain_data(&format!("send to {ADDRESS}"));
        assert_eq!(data.addresses, vec![ADDRESS.to_string()]);
    }
}
