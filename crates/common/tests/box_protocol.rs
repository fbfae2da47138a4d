//! End-to-end properties of the message format between independent peers

use common::crypto::{
    sender_of, MessageError, MissingField, PrivateKey, HEADER_SIZE, PUBLIC_KEY_SIZE, TAG_SIZE,
};

fn peers() -> (PrivateKey, PrivateKey, PrivateKey) {
    (
        PrivateKey::generate().unwrap(),
        PrivateKey::generate().unwrap(),
        PrivateKey::generate().unwrap(),
    )
}

#[test]
fn hello_world_between_two_peers() {
    let k1 = PrivateKey::generate().unwrap();
    let k2 = PrivateKey::generate().unwrap();

    let ct = k1.encrypt(&k2.public_key(), b"Hello World").unwrap();
    let (public, plaintext) = k2.decrypt(&ct).unwrap();

    assert_eq!(public, k1.public_key());
    assert_eq!(plaintext, b"Hello World".to_vec());
}

#[test]
fn round_trip_across_payload_sizes() {
    let (alice, bob, _) = peers();

    for len in [0usize, 1, 15, 16, 17, 63, 64, 255, 1024, 64 * 1024] {
        let payload: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
        let sealed = alice.encrypt(&bob.public_key(), &payload).unwrap();
        assert_eq!(sealed.len(), HEADER_SIZE + TAG_SIZE + len);

        let (sender, opened) = bob.decrypt(&sealed).unwrap();
        assert_eq!(sender, alice.public_key());
        assert_eq!(opened, payload);
    }
}

#[test]
fn replies_go_back_to_the_embedded_sender() {
    let (alice, bob, _) = peers();

    let request = alice.encrypt(&bob.public_key(), b"ping").unwrap();
    let (sender, _) = bob.decrypt(&request).unwrap();

    let reply = bob.encrypt(&sender, b"pong").unwrap();
    let (replier, opened) = alice.decrypt(&reply).unwrap();
    assert_eq!(replier, bob.public_key());
    assert_eq!(opened, b"pong".to_vec());
}

#[test]
fn message_to_someone_else_is_rejected() {
    let (a, b, c) = peers();

    let sealed = a.encrypt(&c.public_key(), b"for carol only").unwrap();
    assert!(matches!(
        b.decrypt(&sealed),
        Err(MessageError::AuthenticationFailed)
    ));
    assert!(c.decrypt(&sealed).is_ok());
}

#[test]
fn spoofed_sender_is_rejected() {
    let (a, b, c) = peers();

    let mut sealed = a.encrypt(&b.public_key(), b"from alice").unwrap();
    sealed[..PUBLIC_KEY_SIZE].copy_from_slice(c.public_key().as_bytes());

    assert_eq!(sender_of(&sealed).unwrap(), c.public_key());
    assert!(matches!(
        b.decrypt(&sealed),
        Err(MessageError::AuthenticationFailed)
    ));
}

#[test]
fn every_bit_flip_in_the_sealed_region_is_detected() {
    let (alice, bob, _) = peers();
    let sealed = alice.encrypt(&bob.public_key(), b"tamper me").unwrap();

    for byte in HEADER_SIZE..sealed.len() {
        for bit in 0..8 {
            let mut tampered = sealed.clone();
            tampered[byte] ^= 1 << bit;
            assert!(
                matches!(
                    bob.decrypt(&tampered),
                    Err(MessageError::AuthenticationFailed)
                ),
                "flip at byte {} bit {} was not detected",
                byte,
                bit
            );
        }
    }
}

#[test]
fn failed_decrypts_are_repeatable() {
    let (alice, bob, _) = peers();
    let mut sealed = alice.encrypt(&bob.public_key(), b"payload").unwrap();
    let last = sealed.len() - 1;
    sealed[last] ^= 0x80;

    for _ in 0..3 {
        assert!(matches!(
            bob.decrypt(&sealed),
            Err(MessageError::AuthenticationFailed)
        ));
    }
}

#[test]
fn truncation_reports_the_missing_field() {
    let (_, bob, _) = peers();

    match bob.decrypt(&[0u8; 10]) {
        Err(MessageError::Truncated(field)) => assert_eq!(field, MissingField::PublicKey),
        other => panic!("unexpected result: {:?}", other),
    }
    match bob.decrypt(&[0u8; 40]) {
        Err(MessageError::Truncated(field)) => assert_eq!(field, MissingField::Nonce),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn keys_are_shareable_across_threads() {
    let (alice, bob, _) = peers();
    let bob_public = bob.public_key();

    let handles: Vec<_> = (0..4u8)
        .map(|i| std::thread::spawn(move || alice.encrypt(&bob_public, &[i; 32]).unwrap()))
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let sealed = handle.join().unwrap();
        let (_, opened) = bob.decrypt(&sealed).unwrap();
        assert_eq!(opened, vec![i as u8; 32]);
    }
}
