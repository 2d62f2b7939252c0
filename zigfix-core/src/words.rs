//! Word pool and the legible strings composed from it.

use crate::{error::Result, rng::RandomStream};

/// Words drawn for names, sentences, scenes and groups.
pub(crate) const WORDS: &[&str] = &[
    "amber", "attic", "balcony", "basement", "bedroom", "birch", "bright", "cabinet", "cedar",
    "cellar", "corner", "cosy", "desk", "door", "dusk", "east", "entry", "garage", "garden",
    "hall", "kitchen", "lamp", "landing", "library", "loft", "lounge", "maple", "meadow", "north",
    "nursery", "office", "pantry", "patio", "porch", "quiet", "shed", "south", "stair", "study",
    "terrace", "utility", "warm", "west", "window", "yard",
];

const SEPARATORS: &[&str] = &["_", " "];

/// Draws one word.
pub(crate) fn word(stream: &mut RandomStream) -> Result<&'static str> {
    stream.pick("word", WORDS).copied()
}

/// Draws a display name: two words and a four-digit number joined by a
/// shared separator.
pub(crate) fn friendly_name(stream: &mut RandomStream) -> Result<String> {
    let separator = *stream.pick("separator", SEPARATORS)?;
    let first = word(stream)?;
    let second = word(stream)?;
    let number = stream.int(1000, 9999);
    Ok(format!("{first}{separator}{second}{separator}{number}"))
}

/// Draws a four to ten word pseudo-sentence, capitalised and full-stopped.
pub(crate) fn sentence(stream: &mut RandomStream) -> Result<String> {
    let count = stream.int(4, 10);
    let mut words = Vec::with_capacity(usize::try_from(count).unwrap_or_default());
    for _ in 0..count {
        words.push(word(stream)?);
    }
    let joined = words.join(" ");
    let mut chars = joined.chars();
    let mut out = chars
        .next()
        .map(|first| first.to_uppercase().collect::<String>())
        .unwrap_or_default();
    out.push_str(chars.as_str());
    out.push('.');
    Ok(out)
}
