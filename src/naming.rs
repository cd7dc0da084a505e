//! Random name and score assignment for new score widgets.
//!
//! Names come from a fixed word list, restricted to words not already used
//! on the board. When every word is taken the picker falls back to a single
//! fallback character. Scores are uniform in `[0, 100]`.

/// Word pool for fresh score widgets.
const NAME_POOL: [&str; 12] = [
    "alpha", "bravo", "delta", "echo", "foxtrot", "kilo", "lima", "nova", "oscar", "tango",
    "victor", "zulu",
];

/// Name used when the word pool is exhausted.
const FALLBACK_NAME: &str = "x";

fn random_u32() -> u32 {
    let mut buf = [0u8; 4];
    // On failure fall back to 0; placement stays correct, only uniformity
    // of the pick degrades.
    if getrandom::getrandom(&mut buf).is_err() {
        return 0;
    }
    u32::from_le_bytes(buf)
}

/// Uniform value in `[0, n)`, rejection-sampled to avoid modulo bias.
fn random_below(n: u32) -> u32 {
    if n == 0 {
        return 0;
    }
    let zone = u32::MAX - (u32::MAX % n);
    loop {
        let v = random_u32();
        if v < zone {
            return v % n;
        }
    }
}

/// Uniform random score in `[0, 100]` inclusive.
pub fn random_score() -> i32 {
    i32::try_from(random_below(101)).unwrap_or(0)
}

/// Pick a random unused name from the pool.
///
/// `is_taken` reports whether a candidate is already used as a name by any
/// existing widget. Falls back to [`FALLBACK_NAME`] when the pool is
/// exhausted.
pub fn random_unused_name(is_taken: impl Fn(&str) -> bool) -> String {
    let available: Vec<&str> = NAME_POOL
        .iter()
        .copied()
        .filter(|w| !is_taken(w))
        .collect();
    match available.len() {
        0 => FALLBACK_NAME.to_string(),
        n => available
            .get(random_below(u32::try_from(n).unwrap_or(1)) as usize)
            .copied()
            .unwrap_or(FALLBACK_NAME)
            .to_string(),
    }
}

/// Sanitize a user-entered name: lowercase, `a-z` only, at most 10 chars.
pub fn sanitize_name(raw: &str) -> String {
    raw.chars()
        .filter_map(|c| {
            let lower = c.to_ascii_lowercase();
            lower.is_ascii_lowercase().then_some(lower)
        })
        .take(10)
        .collect()
}
