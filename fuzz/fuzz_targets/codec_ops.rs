#![no_main]
use libfuzzer_sys::fuzz_target;
use pbits::{Alphabet, PackedString, WidthPolicy};

fuzz_target!(|data: (String, bool, Vec<u8>)| {
    let (text, minimal, raw) = data;

    // Arbitrary bytes must never panic the deserializer.
    let _ = PackedString::from_bytes(&raw);

    if text.is_empty() {
        return;
    }
    let policy = if minimal {
        WidthPolicy::Minimal
    } else {
        WidthPolicy::Legacy
    };
    let alphabet = Alphabet::from_text_with(&text, policy);
    let packed = pbits::encode(&text, &alphabet).expect("text is over its own alphabet");

    assert_eq!(packed.decode().unwrap(), text);
    for (pos, c) in text.chars().enumerate() {
        assert_eq!(packed.char_at(pos).unwrap(), c);
    }

    let back = PackedString::from_bytes(&packed.to_bytes()).unwrap();
    assert_eq!(back, packed);
});
