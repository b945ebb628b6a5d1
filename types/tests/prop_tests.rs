use proptest::prelude::*;

use alloy_primitives::{Address, B256, U256};
use ballot_types::{Account, CandidateId, ChainId, Tally, TxHash};

proptest! {
    /// Account roundtrip: new -> address -> new produces the same account.
    #[test]
    fn account_roundtrip(bytes in prop::array::uniform20(0u8..)) {
        let account = Account::new(Address::from(bytes));
        prop_assert_eq!(account.address(), Address::from(bytes));
    }

    /// Account display and FromStr are inverses.
    #[test]
    fn account_display_parse_roundtrip(bytes in prop::array::uniform20(0u8..)) {
        let account = Account::new(Address::from(bytes));
        let parsed: Account = account.to_string().parse().unwrap();
        prop_assert_eq!(parsed, account);
    }

    /// The truncated form is always first 6 + "..." + last 4 of the full string.
    #[test]
    fn account_short_form(bytes in prop::array::uniform20(0u8..)) {
        let account = Account::new(Address::from(bytes));
        let full = account.to_string();
        let short = account.short();
        prop_assert_eq!(short.len(), 13);
        prop_assert!(short.starts_with(&full[..6]));
        prop_assert!(short.ends_with(&full[full.len() - 4..]));
        prop_assert_eq!(&short[6..9], "...");
    }

    /// Tally::count agrees with the underlying fields for both candidates.
    #[test]
    fn tally_count_matches_fields(a in 0u128..u128::MAX, b in 0u128..u128::MAX) {
        let tally = Tally::new(U256::from(a), U256::from(b));
        prop_assert_eq!(tally.count(CandidateId::A), U256::from(a));
        prop_assert_eq!(tally.count(CandidateId::B), U256::from(b));
    }

    /// ChainId preserves the raw id.
    #[test]
    fn chain_id_roundtrip(id in 0u64..u64::MAX) {
        prop_assert_eq!(ChainId::new(id).as_u64(), id);
        prop_assert_eq!(ChainId::new(id).to_string(), id.to_string());
    }

    /// TxHash display and FromStr are inverses.
    #[test]
    fn tx_hash_display_parse_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let hash = TxHash::new(B256::from(bytes));
        let parsed: TxHash = hash.to_string().parse().unwrap();
        prop_assert_eq!(parsed, hash);
    }

    /// Account serializes as a plain JSON string.
    #[test]
    fn account_serde_roundtrip(bytes in prop::array::uniform20(0u8..)) {
        let account = Account::new(Address::from(bytes));
        let json = serde_json::to_string(&account).unwrap();
        prop_assert!(json.starts_with('"'));
        let decoded: Account = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(decoded, account);
    }
}
