//! Lenient dotted-version comparison
//!
//! Versions are compared as fixed-length tuples of integers. Parsing never
//! fails: missing components become zero and a component that is not a number
//! is kept as `None`, which never compares greater or smaller than anything.

/// Number of components compared by [`greater_than`]
pub const DEFAULT_VERSION_LEN: usize = 3;

/// Fixed-length integer representation of a dotted version string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTriple {
    components: Vec<Option<u64>>,
}

impl VersionTriple {
    /// Parse `version` into exactly `len` components.
    ///
    /// Examples (len = 3):
    /// - "1.2" -> [1, 2, 0]
    /// - "v10.0.1" -> [10, 0, 1]
    /// - "1.2.3.4" -> [1, 2, 3]
    /// - "1.x.3" -> [1, None, 3]
    /// - "" -> [0, 0, 0]
    pub fn parse(version: &str, len: usize) -> Self {
        let version = version.trim();
        let version = version.strip_prefix('v').unwrap_or(version);

        let mut components: Vec<Option<u64>> = if version.is_empty() {
            Vec::new()
        } else {
            version
                .split('.')
                .take(len)
                .map(parse_component)
                .collect()
        };
        components.resize(len, Some(0));

        Self { components }
    }

    pub fn components(&self) -> &[Option<u64>] {
        &self.components
    }
}

fn parse_component(segment: &str) -> Option<u64> {
    let segment = segment.trim();
    if segment.is_empty() {
        return Some(0);
    }
    segment.parse().ok()
}

/// Returns true if `a` is strictly newer than `b`, comparing three components.
pub fn greater_than(a: &str, b: &str) -> bool {
    greater_than_with_len(a, b, DEFAULT_VERSION_LEN)
}

/// Returns true if `a` is strictly newer than `b`, comparing `len` components.
///
/// The first component pair that differs decides. Pairs involving an
/// unparsable component are skipped, so `"1.x.0"` is never greater than
/// `"1.0.0"`.
pub fn greater_than_with_len(a: &str, b: &str, len: usize) -> bool {
    let a = VersionTriple::parse(a, len);
    let b = VersionTriple::parse(b, len);

    for (x, y) in a.components().iter().zip(b.components()) {
        match (x, y) {
            (Some(x), Some(y)) if x > y => return true,
            (Some(x), Some(y)) if x < y => return false,
            _ => {}
        }
    }

    false
}
