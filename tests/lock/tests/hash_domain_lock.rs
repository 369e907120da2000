//! Hash domain governance lock tests.
//!
//! Proves:
//! 1. The domain set has the expected count
//! 2. All domain byte strings are unique and null-terminated
//! 3. All domains follow the `WAYPOINT::*::V1\0` naming convention
//! 4. No raw `WAYPOINT::` literals in production source outside `hash_domain.rs`
//! 5. State fingerprints match an independent SHA-256 of prefix + bytes

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use waypoint_harness::worlds::water_jug::JugState;
use waypoint_kernel::proof::hash_domain::HashDomain;
use waypoint_kernel::state::CanonicalState;

#[test]
fn hash_domain_canonical_set_count() {
    assert_eq!(
        HashDomain::ALL.len(),
        4,
        "expected 4 domain variants; if you added a new domain, update this count"
    );
}

#[test]
fn hash_domain_all_unique_and_null_terminated() {
    let mut seen = BTreeSet::new();
    for domain in HashDomain::ALL {
        assert!(
            seen.insert(domain.as_bytes()),
            "duplicate domain bytes: {domain}"
        );
        assert!(
            domain.as_bytes().ends_with(&[0]),
            "{domain} is not null-terminated"
        );
    }
}

#[test]
fn hash_domain_all_follow_naming_convention() {
    for domain in HashDomain::ALL {
        let bytes = domain.as_bytes();
        assert!(
            bytes.starts_with(b"WAYPOINT::"),
            "{domain} does not start with WAYPOINT::"
        );
        assert!(
            bytes.ends_with(b"::V1\0"),
            "{domain} does not end with ::V1\\0"
        );
    }
}

#[test]
fn no_raw_domain_literals_outside_authority() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    let pattern = "b\"WAYPOINT::";
    let mut violations = Vec::new();
    for dir in ["kernel/src", "search/src", "harness/src", "benchmarks/src"] {
        for path in rust_files(&root.join(dir)) {
            if path.file_name().and_then(|n| n.to_str()) == Some("hash_domain.rs") {
                continue;
            }
            let Ok(content) = std::fs::read_to_string(&path) else {
                continue;
            };
            for (i, line) in content.lines().enumerate() {
                let trimmed = line.trim();
                if !trimmed.starts_with("//") && trimmed.contains(pattern) {
                    violations.push(format!("  {}:{}: {trimmed}", path.display(), i + 1));
                }
            }
        }
    }
    assert!(
        violations.is_empty(),
        "raw WAYPOINT:: domain literals found outside hash_domain.rs:\n{}",
        violations.join("\n")
    );
}

#[test]
fn state_fingerprint_wire_format() {
    let state = JugState::new(4, 2);
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&4u32.to_le_bytes());
    bytes.extend_from_slice(&2u32.to_le_bytes());
    assert_eq!(state.canonical_bytes(), bytes);

    let mut hasher = Sha256::new();
    hasher.update(HashDomain::SearchState.as_bytes());
    hasher.update(&bytes);
    let expected = format!("sha256:{}", hex::encode(hasher.finalize()));
    assert_eq!(state.fingerprint().as_str(), expected);
}

/// Simple recursive directory walker.
fn rust_files(dir: &Path) -> Vec<PathBuf> {
    let mut results = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                results.extend(rust_files(&path));
            } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                results.push(path);
            }
        }
    }
    results
}
