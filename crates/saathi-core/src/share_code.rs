//! Share-code generation and validation.
//!
//! A share code is a short human-shareable identifier that lets a second user
//! look up a specific activity. Generation is purely local randomness with no
//! server-side coordination; collision probability is negligible at the scale
//! of a few thousand activities.
//!
//! Two code shapes exist in the wild. Older installations issued three
//! dash-separated alphanumeric groups; current installations issue five
//! groups drawn from visually-unambiguous alphabets with a base-36 timestamp
//! suffix. Only the five-group shape is ever generated here, but validation
//! accepts both so previously issued codes remain resolvable.

use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;

// Alphabets exclude characters easily confused when a code is read aloud or
// copied by hand: I/O, l, 0/1. The group separator '-' is never part of an
// alphabet.
const UPPERCASE: &str = "ABCDEFGHJKLMNPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijkmnopqrstuvwxyz";
const DIGITS: &str = "23456789";
const SPECIALS: &str = "_";

const GROUP_LEN: usize = 4;

static CURRENT_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-HJ-NP-Z2-9]{4}-[a-km-z2-9]{4}-[A-HJ-NP-Za-km-z]{4}-[A-HJ-NP-Za-km-z2-9_]{4}-[0-9a-z]{4}$",
    )
    .expect("current share-code regex is valid")
});

static LEGACY_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9!@#$%^&*_+=]{4}-[A-Za-z0-9!@#$%^&*_+=]{4}-[A-Za-z0-9!@#$%^&*_+=]{4}$")
        .expect("legacy share-code regex is valid")
});

/// Generates a new share code in the current five-group shape.
///
/// Format: `XXXX-xxxx-Xxxx-Xx_x-k3f9` where the first four groups are random
/// draws from unambiguous alphabets and the final group is the last four
/// base-36 digits of the current timestamp, which keeps codes distinct even
/// for draws made in the same millisecond.
pub fn generate() -> String {
    generate_at(chrono::Utc::now().timestamp_millis())
}

/// Generates a share code using the given millisecond timestamp for the
/// suffix group. Split out so the shape is testable deterministically.
pub(crate) fn generate_at(timestamp_millis: i64) -> String {
    let mut rng = rand::thread_rng();

    let alphabets: [String; 4] = [
        format!("{}{}", UPPERCASE, DIGITS),
        format!("{}{}", LOWERCASE, DIGITS),
        format!("{}{}", UPPERCASE, LOWERCASE),
        format!("{}{}{}{}", UPPERCASE, LOWERCASE, DIGITS, SPECIALS),
    ];

    let mut groups: Vec<String> = alphabets
        .iter()
        .map(|alphabet| {
            let chars: Vec<char> = alphabet.chars().collect();
            (0..GROUP_LEN)
                .map(|_| chars[rng.gen_range(0..chars.len())])
                .collect()
        })
        .collect();

    groups.push(timestamp_suffix(timestamp_millis));
    groups.join("-")
}

/// Returns true if `code` matches either the current five-group shape or the
/// legacy three-group shape.
pub fn is_valid(code: &str) -> bool {
    CURRENT_SHAPE.is_match(code) || LEGACY_SHAPE.is_match(code)
}

/// Returns true only for codes in the shape generated by this version.
pub fn is_current_shape(code: &str) -> bool {
    CURRENT_SHAPE.is_match(code)
}

/// Last four base-36 digits of the timestamp, zero-padded.
fn timestamp_suffix(timestamp_millis: i64) -> String {
    let mut n = timestamp_millis.unsigned_abs();
    let digits = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut out = [b'0'; GROUP_LEN];
    for slot in out.iter_mut().rev() {
        *slot = digits[(n % 36) as usize];
        n /= 36;
    }
    String::from_utf8_lossy(&out).into_owned()
}
