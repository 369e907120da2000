//! Canonical state encoding.
//!
//! Two states are the same search position iff their canonical encodings are
//! equal. Domains implement [`CanonicalState`] for their state type; the
//! engine keys its sets on `Eq + Hash` and uses the canonical bytes only for
//! fingerprints in traces and diagnostics.
//!
//! Encodings must be injective over the domain's reachable states and must
//! agree with the type's `Eq`. Fixed-width little-endian integers and
//! length-prefixed sequences make the provided impls injective when composed.

use crate::proof::hash::{canonical_hash, ContentHash};
use crate::proof::hash_domain::HashDomain;

/// A state with a canonical byte encoding.
pub trait CanonicalState {
    /// Append this state's canonical bytes to `out`.
    fn encode_canonical(&self, out: &mut Vec<u8>);

    /// Canonical bytes of this state.
    #[must_use]
    fn canonical_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_canonical(&mut out);
        out
    }

    /// `canonical_hash(SearchState, canonical_bytes)`.
    #[must_use]
    fn fingerprint(&self) -> ContentHash {
        canonical_hash(HashDomain::SearchState, &self.canonical_bytes())
    }
}

macro_rules! impl_canonical_int {
    ($($t:ty),+ $(,)?) => {
        $(
            impl CanonicalState for $t {
                fn encode_canonical(&self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_le_bytes());
                }
            }
        )+
    };
}

impl_canonical_int!(u8, u16, u32, u64, i8, i16, i32, i64);

impl CanonicalState for usize {
    fn encode_canonical(&self, out: &mut Vec<u8>) {
        (*self as u64).encode_canonical(out);
    }
}

impl CanonicalState for bool {
    fn encode_canonical(&self, out: &mut Vec<u8>) {
        out.push(u8::from(*self));
    }
}

impl CanonicalState for str {
    fn encode_canonical(&self, out: &mut Vec<u8>) {
        (self.len() as u64).encode_canonical(out);
        out.extend_from_slice(self.as_bytes());
    }
}

impl CanonicalState for String {
    fn encode_canonical(&self, out: &mut Vec<u8>) {
        self.as_str().encode_canonical(out);
    }
}

impl<T: CanonicalState> CanonicalState for [T] {
    fn encode_canonical(&self, out: &mut Vec<u8>) {
        (self.len() as u64).encode_canonical(out);
        for item in self {
            item.encode_canonical(out);
        }
    }
}

impl<T: CanonicalState> CanonicalState for Vec<T> {
    fn encode_canonical(&self, out: &mut Vec<u8>) {
        self.as_slice().encode_canonical(out);
    }
}

impl<A: CanonicalState, B: CanonicalState> CanonicalState for (A, B) {
    fn encode_canonical(&self, out: &mut Vec<u8>) {
        self.0.encode_canonical(out);
        self.1.encode_canonical(out);
    }
}

impl<A: CanonicalState, B: CanonicalState, C: CanonicalState> CanonicalState for (A, B, C) {
    fn encode_canonical(&self, out: &mut Vec<u8>) {
        self.0.encode_canonical(out);
        self.1.encode_canonical(out);
        self.2.encode_canonical(out);
    }
}
