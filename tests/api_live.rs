//! Live API tests. Run with: `IUCN_API_KEY=... cargo test --features online -- --nocapture`
#![cfg(feature = "online")]

use redlist_tracker::{Client, Config, ConservationStatus, LookupError};

fn client() -> Client {
    let config = Config::load().expect("IUCN_API_KEY must be configured for online tests");
    Client::new(&config).unwrap()
}

#[test]
fn lookup_known_species() {
    let rec = client().lookup("Panthera leo").unwrap();
    assert_eq!(rec.name, "Panthera leo");
    assert_ne!(rec.conservation_status, ConservationStatus::Unknown);
}

#[test]
fn lookup_unknown_species_fails() {
    let err = client().lookup("Nonexistus imaginarius").unwrap_err();
    assert!(err.is_lookup_failure(), "{:?}", err);
}

#[test]
fn invalid_token_is_a_lookup_failure() {
    let config = Config::new("definitely-not-a-token").unwrap();
    let err = Client::new(&config).unwrap().lookup("Panthera leo").unwrap_err();
    assert!(matches!(err, LookupError::LookupFailed(_)), "{:?}", err);
}
