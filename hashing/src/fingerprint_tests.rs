// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use crate::Fingerprint;

#[test]
fn from_bytes_unsafe() {
    assert_eq!(
        Fingerprint::from_bytes_unsafe(&[0xab; 32]).as_bytes(),
        &[0xab_u8; 32][..]
    );
}

#[test]
#[should_panic]
fn from_bytes_unsafe_unrecognized_length() {
    Fingerprint::from_bytes_unsafe(&[0xab; 31]);
}

#[test]
fn from_hex_string() {
    let fingerprint = Fingerprint::from_hex_string(
        "0123456789abcdefFEDCBA98765432100000000000000000ffFFfFfFFfFfFFff",
    )
    .unwrap();
    assert_eq!(
        fingerprint.as_bytes(),
        &[
            0x01_u8, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef, 0xfe, 0xdc, 0xba, 0x98, 0x76,
            0x54, 0x32, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0xff, 0xff,
        ][..],
    )
}

#[test]
fn from_hex_string_shorter_functions() {
    // MD5 and SHA-1 sized hashes are fingerprints too.
    let md5 = Fingerprint::from_hex_string("8b1a9953c4611296a827abf8c47804d7").unwrap();
    assert_eq!(md5.len(), 16);
    let sha1 = Fingerprint::from_hex_string("f7ff9e8b7bb2e09b70935a5d785e0cc5d9d0abf0").unwrap();
    assert_eq!(sha1.len(), 20);
    assert_ne!(md5, sha1);
}

#[test]
fn from_hex_string_not_long_enough() {
    Fingerprint::from_hex_string("abcd").expect_err("Want err");
}

#[test]
fn from_hex_string_odd_length() {
    Fingerprint::from_hex_string(
        "0123456789ABCDEF0123456789ABCDEF0123456789ABCDEF0123456789ABCDEF0",
    )
    .expect_err("Want err");
}

#[test]
fn from_hex_string_invalid_chars() {
    Fingerprint::from_hex_string(
        "Q123456789ABCDEF0123456789ABCDEF0123456789ABCDEF0123456789ABCDEF",
    )
    .expect_err("Want err");
}

#[test]
fn to_hex() {
    let hex = "0123456789abcdeffedcba98765432100000000000000000ffffffffffffffff";
    assert_eq!(Fingerprint::from_hex_string(hex).unwrap().to_hex(), hex)
}

#[test]
fn display() {
    let hex = "0123456789ABCDEF0123456789ABCDEF0123456789ABCDEF0123456789ABCDEF";
    assert_eq!(
        format!("{}", Fingerprint::from_hex_string(hex).unwrap()),
        hex.to_lowercase()
    )
}

#[test]
fn equality_ignores_padding() {
    // Two fingerprints of different lengths never compare equal, and equal
    // prefixes do not collide.
    let short = Fingerprint::from_bytes_unsafe(&[0x01; 16]);
    let long = Fingerprint::from_bytes_unsafe(&[0x01; 32]);
    assert_ne!(short, long);
    assert_eq!(short, Fingerprint::from_bytes_unsafe(&[0x01; 16]));
}
