// SPDX-License-Identifier: MIT

//! Credential service properties: salt shape and uniqueness, hash
//! determinism, verification behavior.

use std::collections::HashSet;
use vitals_tracker::services::credentials::{generate_salt, hash_password, verify_password};

#[test]
fn test_salt_shape() {
    let salt = generate_salt().expect("secure randomness available");
    assert_eq!(salt.len(), 32);
    assert!(salt.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_1000_salts_are_unique() {
    let salts: HashSet<String> = (0..1000)
        .map(|_| generate_salt().expect("secure randomness available"))
        .collect();
    assert_eq!(salts.len(), 1000);
}

#[test]
fn test_verify_round_trip() {
    for password in ["secret123", "", "pässwörd 🔒", "x"] {
        let salt = generate_salt().unwrap();
        let hash = hash_password(password, &salt).unwrap();
        assert_eq!(hash.len(), 64);
        assert!(
            verify_password(password, &hash, &salt),
            "round trip failed for {:?}",
            password
        );
    }
}

#[test]
fn test_different_salts_diverge() {
    let s1 = generate_salt().unwrap();
    let s2 = generate_salt().unwrap();
    assert_ne!(s1, s2);

    let h1 = hash_password("same password", &s1).unwrap();
    let h2 = hash_password("same password", &s2).unwrap();
    assert_ne!(h1, h2);
}

#[test]
fn test_wrong_password_rejected() {
    let salt = generate_salt().unwrap();
    let hash = hash_password("secret123", &salt).unwrap();
    assert!(!verify_password("secret124", &hash, &salt));
    assert!(!verify_password("", &hash, &salt));
}

#[test]
fn test_verify_with_foreign_salt_fails() {
    let s1 = generate_salt().unwrap();
    let s2 = generate_salt().unwrap();
    let hash = hash_password("secret123", &s1).unwrap();
    assert!(!verify_password("secret123", &hash, &s2));
}
