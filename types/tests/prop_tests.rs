use proptest::prelude::*;

use lockvote_types::{AccountId, Asset, StakingId, Timestamp, WitnessId, SECONDS_PER_DAY};

proptest! {
    /// Object ids survive Display -> FromStr.
    #[test]
    fn witness_id_text_roundtrip(instance in any::<u64>()) {
        let id = WitnessId::new(instance);
        let parsed: WitnessId = id.to_string().parse().unwrap();
        prop_assert_eq!(parsed, id);
    }

    /// An account id's text never parses as a witness id.
    #[test]
    fn account_text_is_not_a_witness(instance in any::<u64>()) {
        let text = AccountId::new(instance).to_string();
        prop_assert!(text.parse::<WitnessId>().is_err());
    }

    /// Staking ids order by instance.
    #[test]
    fn staking_id_order_matches_instance(a in any::<u64>(), b in any::<u64>()) {
        prop_assert_eq!(StakingId::new(a).cmp(&StakingId::new(b)), a.cmp(&b));
    }

    /// Elapsed days never exceed the real elapsed time and are within one day of it.
    #[test]
    fn elapsed_days_is_floor(start in 0u64..1_000_000_000, delta in 0u64..100_000_000) {
        let created = Timestamp::new(start);
        let now = Timestamp::new(start + delta);
        let days = created.elapsed_days_since(now);
        prop_assert!(days * SECONDS_PER_DAY <= delta);
        prop_assert!(delta < (days + 1) * SECONDS_PER_DAY);
    }

    /// Weighted amount equals the wide product.
    #[test]
    fn weighted_is_exact(amount in any::<u64>(), weight in any::<u32>()) {
        let asset = Asset::core(amount);
        prop_assert_eq!(asset.weighted(weight), amount as u128 * weight as u128);
    }
}
