use chacha24_poly1795::Error;
use chacha24_poly1795::authentication::{
    DoubleMac, Poly1305, Poly1305Modified, double_mac, mac_130_modified, poly1305,
};

fn counting_key() -> [u8; 32] {
    let mut key = [0u8; 32];
    key.iter_mut().zip(0u8..).for_each(|(k, v)| *k = v);
    key
}

fn counting_message(len: usize) -> Vec<u8> {
    (0..len).map(|i| i as u8).collect()
}

// -------------------------------------------------------
// 1. STANDARD POLY1305 (RFC 8439)
// -------------------------------------------------------

#[test]
fn rfc8439_section_2_5_2_vector() {
    let key = [
        0x85, 0xd6, 0xbe, 0x78, 0x57, 0x55, 0x6d, 0x33, 0x7f, 0x44, 0x52, 0xfe, 0x42, 0xd5, 0x06,
        0xa8, 0x01, 0x03, 0x80, 0x8a, 0xfb, 0x0d, 0xb2, 0xfd, 0x4a, 0xbf, 0xf6, 0xaf, 0x41, 0x49,
        0xf5, 0x1b,
    ];
    let expected = [
        0xa8, 0x06, 0x1d, 0xc1, 0x30, 0x51, 0x36, 0xc6, 0xc2, 0x2b, 0x8b, 0xaf, 0x0c, 0x01, 0x27,
        0xa9,
    ];

    assert_eq!(poly1305(&key, b"Cryptographic Forum Research Group"), expected);
}

#[test]
fn standard_streaming_matches_one_shot() {
    let key = counting_key();
    let message = counting_message(90);
    let expected = poly1305(&key, &message);

    let mut mac = Poly1305::new(&key);
    for chunk in message.chunks(13) {
        mac.update(chunk).unwrap();
    }

    assert_eq!(mac.verify(&expected), Ok(()));
    assert_eq!(mac.update(b"late"), Err(Error::UseAfterFinalize));
}

// -------------------------------------------------------
// 2. MODIFIED POLY1305
// -------------------------------------------------------

#[test]
fn modified_empty_message_is_pad_plus_one() {
    let expected = [
        0x11, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b,
        0x1c, 0x1d, 0x1e, 0x1f,
    ];

    assert_eq!(mac_130_modified(&counting_key(), &[]), expected);
}

#[test]
fn modified_known_answer_tags() {
    let key = counting_key();

    let hello = [
        0x50, 0xc0, 0x70, 0xb9, 0x14, 0x15, 0x06, 0x63, 0x18, 0xd7, 0x0e, 0xd0,
        0x58, 0x5c, 0x21, 0xe7,
    ];
    assert_eq!(mac_130_modified(&key, b"hello world"), hello);

    let one_and_a_half_blocks = [
        0xfd, 0xc3, 0x10, 0x81, 0x14, 0x15, 0x06, 0x1f, 0x18, 0x80, 0x07, 0x9a,
        0xd7, 0x1c, 0xd6, 0x51,
    ];
    assert_eq!(
        mac_130_modified(&key, &counting_message(24)),
        one_and_a_half_blocks
    );

    let many_blocks = [
        0x79, 0xf2, 0xb6, 0xb8, 0x14, 0x15, 0xa6, 0xf6, 0x18, 0x0a, 0xc8, 0x2f,
        0x46, 0x1c, 0x81, 0x84,
    ];
    assert_eq!(mac_130_modified(&key, &counting_message(100)), many_blocks);
}

#[test]
fn modified_saturated_inputs() {
    let expected = [
        0xa9, 0x42, 0xc6, 0x39, 0xff, 0xff, 0xef, 0xdd, 0xff, 0xd0, 0xbd, 0xea,
        0xac, 0xbe, 0x6b, 0xda,
    ];

    assert_eq!(mac_130_modified(&[0xff; 32], &[0xff; 200]), expected);
}

#[test]
fn modified_differs_from_standard() {
    let key = counting_key();
    let message = counting_message(64);

    assert_ne!(mac_130_modified(&key, &message), poly1305(&key, &message));
}

#[test]
fn modified_single_bit_flip_changes_tag() {
    let key = counting_key();
    let message = counting_message(50);
    let tag = mac_130_modified(&key, &message);

    for (byte, bit) in [(0usize, 0u8), (15, 7), (16, 2), (49, 6)] {
        let mut flipped = message.clone();
        flipped[byte] ^= 1 << bit;
        assert_ne!(
            mac_130_modified(&key, &flipped),
            tag,
            "flip at byte {byte} bit {bit}"
        );
    }
}

#[test]
fn modified_streaming_state_machine() {
    let key = counting_key();
    let message = counting_message(41);
    let expected = mac_130_modified(&key, &message);

    let mut mac = Poly1305Modified::new(&key);
    mac.update(&message[..16]).unwrap();
    mac.update(&message[16..17]).unwrap();
    mac.update(&message[17..]).unwrap();

    assert_eq!(mac.finalize(), Ok(expected));
    assert_eq!(mac.finalize(), Err(Error::UseAfterFinalize));
    assert_eq!(mac.update(&[]), Err(Error::UseAfterFinalize));
}

#[test]
fn modified_verify_rejects_forgery() {
    let key = counting_key();
    let mut tag = mac_130_modified(&key, b"payload");
    tag[0] = tag[0].wrapping_sub(1);

    let mut mac = Poly1305Modified::new(&key);
    mac.update(b"payload").unwrap();

    assert_eq!(mac.verify(&tag), Err(Error::AuthenticationFailed));
}

// -------------------------------------------------------
// 3. DUAL POLY1305
// -------------------------------------------------------

fn counting_key_64() -> [u8; 64] {
    let mut key = [0u8; 64];
    key.iter_mut().zip(0u8..).for_each(|(k, v)| *k = v);
    key
}

#[test]
fn double_mac_known_answer() {
    let expected = [
        0x6b, 0xe0, 0xaf, 0x63, 0x00, 0xad, 0xcb, 0xa5, 0xa8, 0x06, 0xea, 0x30,
        0x93, 0xf5, 0x57, 0xba, 0xa3, 0x8e, 0xa5, 0x3e, 0xfa, 0x78, 0x89, 0x48,
        0xda, 0x5f, 0x8d, 0x41, 0x96, 0x43, 0xfb, 0xca,
    ];

    assert_eq!(double_mac(&counting_key_64(), b"hello world"), expected);
}

#[test]
fn double_mac_is_two_standard_tags() {
    let key = counting_key_64();
    let message = counting_message(70);

    let mut first = [0u8; 32];
    let mut second = [0u8; 32];
    first.copy_from_slice(&key[..32]);
    second.copy_from_slice(&key[32..]);

    let tag = double_mac(&key, &message);

    assert_eq!(tag[..16], poly1305(&first, &message));
    assert_eq!(tag[16..], poly1305(&second, &message));
}

#[test]
fn double_mac_halves_are_independent() {
    let key = counting_key_64();
    let message = b"independent halves";
    let tag = double_mac(&key, message);

    let mut changed_first = key;
    changed_first[5] ^= 0x80;
    let tag_first = double_mac(&changed_first, message);
    assert_ne!(tag_first[..16], tag[..16]);
    assert_eq!(tag_first[16..], tag[16..]);

    let mut changed_second = key;
    changed_second[52] ^= 0x01;
    let tag_second = double_mac(&changed_second, message);
    assert_eq!(tag_second[..16], tag[..16]);
    assert_ne!(tag_second[16..], tag[16..]);
}

#[test]
fn double_mac_detects_message_change() {
    let key = counting_key_64();
    let message = counting_message(1024);
    let tag = double_mac(&key, &message);

    let mut altered = message.clone();
    altered[0] ^= 0xff;

    assert_ne!(double_mac(&key, &altered), tag);
}

#[test]
fn double_mac_streaming() {
    let key = counting_key_64();
    let message = counting_message(55);
    let expected = double_mac(&key, &message);

    let mut mac = DoubleMac::new(&key);
    mac.update(&message[..20]).unwrap();
    mac.update(&message[20..]).unwrap();
    assert_eq!(mac.verify(&expected), Ok(()));
    assert_eq!(mac.finalize(), Err(Error::UseAfterFinalize));

    let mut forged = expected;
    forged[31] ^= 1;
    let mut mac = DoubleMac::new(&key);
    mac.update(&message).unwrap();
    assert_eq!(mac.verify(&forged), Err(Error::AuthenticationFailed));
}
