use proptest::prelude::*;
use pbits::bits::highest_set_bit;
use pbits::{decode, encode, Alphabet, BitStore, Error, PackedString, WidthPolicy};

fn arbitrary_store(max_len: usize) -> impl Strategy<Value = BitStore> {
    (0..=max_len).prop_flat_map(|len| {
        prop::collection::vec(any::<u32>(), len.div_ceil(32))
            .prop_map(move |blocks| BitStore::from_blocks(blocks, len).unwrap())
    })
}

fn store_with_range(max_len: usize) -> impl Strategy<Value = (BitStore, usize, usize)> {
    arbitrary_store(max_len)
        .prop_filter("non-empty", |bs| !bs.is_empty())
        .prop_flat_map(|bs| {
            let len = bs.len();
            (Just(bs), 0..=len).prop_flat_map(move |(bs, start)| {
                let max_end = (start + 32).min(len);
                (Just(bs), Just(start), start..=max_end)
            })
        })
}

proptest! {
    #[test]
    fn test_set_then_get(
        bs in arbitrary_store(300),
        index_seed in any::<usize>(),
        value in any::<bool>(),
    ) {
        prop_assume!(!bs.is_empty());
        let index = index_seed % bs.len();
        let mut updated = bs.clone();
        updated.set(index, value).unwrap();

        prop_assert_eq!(updated.get(index).unwrap(), value);
        for i in (0..bs.len()).filter(|&i| i != index) {
            prop_assert_eq!(updated.get(i).unwrap(), bs.get(i).unwrap());
        }
    }

    #[test]
    fn test_to_int_matches_bit_string((bs, start, end) in store_with_range(200)) {
        let expected = bs.to_int(start, end).unwrap();
        let rendered = bs.to_bit_string(start, end).unwrap();
        prop_assert_eq!(rendered.len(), end - start);

        let parsed = if rendered.is_empty() {
            0
        } else {
            u32::from_str_radix(&rendered, 2).unwrap()
        };
        prop_assert_eq!(parsed, expected);

        let mut manual = 0u32;
        for i in (start..end).rev() {
            manual = (manual << 1) | bs.get(i).unwrap() as u32;
        }
        prop_assert_eq!(manual, expected);
    }

    #[test]
    fn test_slice_matches_parent((bs, start, end) in store_with_range(200)) {
        let slice = bs.slice(start, end).unwrap();
        prop_assert_eq!(slice.len(), end - start);
        prop_assert_eq!(slice.to_int().unwrap(), bs.to_int(start, end).unwrap());
        prop_assert_eq!(slice.to_bit_string(), bs.to_bit_string(start, end).unwrap());
    }

    #[test]
    fn test_set_int_round_trip(
        (bs, start, end) in store_with_range(200),
        value in any::<u32>(),
    ) {
        let mut updated = bs.clone();
        updated.set_int(start, end, value).unwrap();
        let width = end - start;
        let masked = if width == 32 { value } else { value & ((1u32 << width) - 1) };
        prop_assert_eq!(updated.to_int(start, end).unwrap(), masked);
        for i in (0..bs.len()).filter(|&i| i < start || i >= end) {
            prop_assert_eq!(updated.get(i).unwrap(), bs.get(i).unwrap());
        }
    }

    #[test]
    fn test_and_matches_bitwise(a in arbitrary_store(150), b in arbitrary_store(150)) {
        let c = a.and(&b);
        prop_assert_eq!(c.len(), a.len().max(b.len()));
        for i in 0..c.len() {
            let left = i < a.len() && a.get(i).unwrap();
            let right = i < b.len() && b.get(i).unwrap();
            prop_assert_eq!(c.get(i).unwrap(), left && right);
        }
    }

    #[test]
    fn test_highest_set_bit_bounds(n in 1u32..) {
        let k = highest_set_bit(n);
        prop_assert!(n >> k == 1);
    }

    #[test]
    fn test_codec_round_trip(text in "\\PC{1,200}", minimal in any::<bool>()) {
        let policy = if minimal { WidthPolicy::Minimal } else { WidthPolicy::Legacy };
        let alphabet = Alphabet::from_text_with(&text, policy);
        let packed = encode(&text, &alphabet).unwrap();

        let n = text.chars().count();
        prop_assert_eq!(packed.len(), n);
        prop_assert_eq!(packed.store().len(), n * alphabet.code_width() as usize);
        prop_assert_eq!(decode(packed.store(), &alphabet).unwrap(), text.clone());

        for (pos, c) in text.chars().enumerate() {
            prop_assert_eq!(packed.char_at(pos).unwrap(), c);
        }

        let back = PackedString::from_bytes(&packed.to_bytes()).unwrap();
        prop_assert_eq!(back.decode().unwrap(), text);
    }

    #[test]
    fn test_decode_rejects_partial_slots(text in "[a-e]{1,50}", extra in 1usize..3) {
        let alphabet = Alphabet::from_text(&text);
        let width = alphabet.code_width() as usize;
        prop_assume!(extra % width != 0);
        let len = text.chars().count() * width + extra;
        let store = BitStore::new(len);
        prop_assert!(matches!(decode(&store, &alphabet), Err(Error::InvalidEncoding(_))));
    }
}

#[test]
fn test_alphabet_of_repeated_runs() {
    let alphabet = Alphabet::from_text("aabbbcc");
    assert_eq!(alphabet.symbols(), &['a', 'b', 'c']);
    assert_eq!(alphabet.code_width(), highest_set_bit(3) + 1);
    assert_eq!(alphabet.code_width(), 2);
}

#[test]
fn test_power_of_two_alphabet_still_round_trips() {
    let alphabet = Alphabet::from_symbols(['a', 'b'], WidthPolicy::Legacy).unwrap();
    assert_eq!(alphabet.code_width(), 2);
    let packed = encode("ab", &alphabet).unwrap();
    assert_eq!(packed.store().len(), 4);
    assert_eq!(decode(packed.store(), &alphabet).unwrap(), "ab");
}
