use packstream::prelude::*;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig { cases: 1_000, ..ProptestConfig::default() })]

    #[test]
    fn encode_decode(i in proptest::num::i64::ANY) {
        let v = Value::from(Int64::from(i));
        let enc = pack_full(&v).unwrap();

        let dec = unpack_full(&enc).ok();

        if dec != Some(v) {
            panic!("Tried encoding\n {:?}\n as \n{:x?}\n got \n{:?}\n", i, enc, dec)
        }
    }

    #[test]
    fn narrowest_tier(i in proptest::num::i64::ANY) {
        let enc = pack_full(&Value::from(Int64::from(i))).unwrap();
        let expected = match i {
            -16..=127 => 1,
            -128..=-17 => 2,
            -32_768..=32_767 => 3,
            -2_147_483_648..=2_147_483_647 => 5,
            _ => 9,
        };
        prop_assert_eq!(enc.len(), expected, "encoding {} as {:x?}", i, enc);
    }
}
