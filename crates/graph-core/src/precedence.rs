// File: crates/graph-core/src/precedence.rs
// Summary: Version precedence strategies used to order series newest-first.

use std::cmp::Ordering;

use semver::Version;

/// Orders version labels. `Greater` means "newer".
/// Implementations must be total and deterministic.
pub trait VersionPrecedence: Send + Sync {
    fn id(&self) -> &'static str;
    fn compare(&self, a: &str, b: &str) -> Ordering;
}

/// Semantic-version precedence. Labels that are not valid semver (e.g. "1.2",
/// "v3") fall back to comparing their leading numeric segments, then the
/// remaining text.
#[derive(Clone, Copy, Debug, Default)]
pub struct SemverPrecedence;

impl VersionPrecedence for SemverPrecedence {
    fn id(&self) -> &'static str {
        "semver"
    }

    fn compare(&self, a: &str, b: &str) -> Ordering {
        match (Version::parse(a.trim()), Version::parse(b.trim())) {
            (Ok(va), Ok(vb)) => va.cmp(&vb),
            _ => loose_compare(a, b),
        }
    }
}

/// Every stable release outranks every pre-release; within each group the
/// order is [`SemverPrecedence`]. Keeps a fresh `2.0.0-beta.1` from being
/// charted above the `1.x` line most users download.
#[derive(Clone, Copy, Debug, Default)]
pub struct StableFirstPrecedence;

impl VersionPrecedence for StableFirstPrecedence {
    fn id(&self) -> &'static str {
        "stable-first"
    }

    fn compare(&self, a: &str, b: &str) -> Ordering {
        is_stable(a)
            .cmp(&is_stable(b))
            .then_with(|| SemverPrecedence.compare(a, b))
    }
}

fn is_stable(label: &str) -> bool {
    match Version::parse(label.trim()) {
        Ok(v) => v.pre.is_empty(),
        Err(_) => !label.contains('-'),
    }
}

/// Numeric-prefix comparison for labels semver rejects.
fn loose_compare(a: &str, b: &str) -> Ordering {
    let (na, ra) = split_numeric(a);
    let (nb, rb) = split_numeric(b);
    let width = na.len().max(nb.len());
    for i in 0..width {
        let x = na.get(i).copied().unwrap_or(0);
        let y = nb.get(i).copied().unwrap_or(0);
        match x.cmp(&y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    // A bare release ranks above the same numbers with a suffix ("1.0" > "1.0-rc").
    match (ra.is_empty(), rb.is_empty()) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => ra.cmp(rb),
    }
}

fn split_numeric(label: &str) -> (Vec<u64>, &str) {
    let s = label.trim();
    let s = s.strip_prefix(['v', 'V']).unwrap_or(s);
    let mut nums = Vec::new();
    let mut rest = s;
    loop {
        let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        if digits == 0 {
            break;
        }
        nums.push(rest[..digits].parse().unwrap_or(u64::MAX));
        rest = &rest[digits..];
        match rest.strip_prefix('.') {
            Some(next) if next.starts_with(|c: char| c.is_ascii_digit()) => rest = next,
            _ => break,
        }
    }
    (nums, rest)
}
