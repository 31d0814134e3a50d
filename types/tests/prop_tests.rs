use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use cuelock_types::{Credential, CueLabel, Username, Vocabulary};

fn alice() -> Username {
    Username::new("alice").unwrap()
}

proptest! {
    /// Normalizing an already-normalized label changes nothing.
    #[test]
    fn label_normalization_idempotent(raw in "\\PC{0,24}") {
        let once = CueLabel::new(&raw);
        let twice = CueLabel::new(once.as_str());
        prop_assert_eq!(once, twice);
    }

    /// Case never distinguishes labels.
    #[test]
    fn label_equality_ignores_case(raw in "[a-zA-Z ]{1,16}") {
        prop_assert_eq!(CueLabel::new(&raw), CueLabel::new(raw.to_uppercase()));
    }

    /// Shuffling any valid vocabulary yields a permutation: same multiset,
    /// same length, nothing dropped or duplicated.
    #[test]
    fn shuffle_is_permutation(
        labels in prop::collection::hash_set("[a-z]{1,8}", 2..6),
        seed in any::<u64>(),
    ) {
        let vocabulary = Vocabulary::new(labels.iter().map(String::as_str)).unwrap();
        let order = vocabulary.shuffled(&mut StdRng::seed_from_u64(seed));

        prop_assert_eq!(order.len(), vocabulary.len());
        let mut got: Vec<&str> = order.as_slice().iter().map(|l| l.as_str()).collect();
        let mut want: Vec<&str> = vocabulary.labels().iter().map(|l| l.as_str()).collect();
        got.sort_unstable();
        want.sort_unstable();
        prop_assert_eq!(got, want);
    }

    /// Credential plaintext round-trips through the comma join for any label
    /// sequence the vocabulary could produce.
    #[test]
    fn credential_plaintext_roundtrip(labels in prop::collection::vec("[a-z]{1,8}", 1..5)) {
        let original = Credential::new(alice(), labels.iter().map(CueLabel::new).collect());
        let rebuilt = Credential::from_plaintext(alice(), &original.plaintext());
        prop_assert_eq!(rebuilt, original);
    }

    /// Store path characters are rejected wherever they appear in a username.
    #[test]
    fn username_rejects_forbidden_chars(
        prefix in "[a-z]{0,6}",
        suffix in "[a-z]{0,6}",
        which in 0usize..6,
    ) {
        let bad = ['.', '$', '#', '[', ']', '/'][which];
        let raw = format!("{prefix}{bad}{suffix}");
        prop_assert!(Username::new(&raw).is_err());
    }

    /// Plain word-character usernames are accepted verbatim.
    #[test]
    fn username_accepts_word_chars(name in "[A-Za-z0-9_-]{1,16}") {
        let username = Username::new(&name).unwrap();
        prop_assert_eq!(username.as_str(), name.as_str());
    }
}
