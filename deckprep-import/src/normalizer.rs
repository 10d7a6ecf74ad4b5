//! Deck List Normalizer
//!
//! Turns pasted deck list text into ordered [`DeckEntry`] records.
//!
//! # Algorithm (per line)
//! 1. Leading `N` / `Nx` is consumed as the quantity (default 1)
//! 2. `( ... )` spans (set/edition annotations) are removed
//! 3. A collector number glued to a `★` gets split from it
//! 4. Trailing metadata tokens are peeled until a name token is reached
//! 5. What is left, joined by single spaces, is the card name
//!
//! # Peeling Order
//! The last token is tested against these shapes, first match wins:
//! 1. flag: `★`, `*F*`, `*NF*`, `*Foil*` (case-insensitive)
//! 2. set code + number pair: `EMN 155` (both tokens removed)
//! 3. bare collector number: `155`, `123a`
//! 4. fused set code + number: `EMN155`, `EMN-155`
//!
//! Set codes are matched case-sensitively (2-6 uppercase letters). A card
//! name ending in an all-caps word followed by a number is therefore peeled
//! as metadata; the shapes are genuinely ambiguous and no attempt is made to
//! disambiguate them.
//!
//! Normalization is total: every non-blank, non-comment line yields exactly
//! one entry, possibly with an empty name.

use crate::types::DeckEntry;

/// Lines starting with this marker are skipped
const COMMENT_MARKER: char = '#';

/// Foil star glyph
const STAR: char = '★';

/// Bracketed foil / non-foil flags (compared case-insensitively)
const FLAG_TOKENS: [&str; 3] = ["*F*", "*NF*", "*FOIL*"];

const SET_CODE_MIN_LEN: usize = 2;
const SET_CODE_MAX_LEN: usize = 6;

/// Parse deck list text into entries, preserving line order
pub fn normalize(text: &str) -> Vec<DeckEntry> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_MARKER))
        .map(normalize_line)
        .collect()
}

/// Sum of quantities ("Total cards")
pub fn total_quantity(entries: &[DeckEntry]) -> u64 {
    entries.iter().map(|e| u64::from(e.quantity)).sum()
}

/// Normalize a single, already trimmed, non-comment line
pub fn normalize_line(line: &str) -> DeckEntry {
    let (quantity, rest) = split_quantity(line);
    let rest = strip_parentheticals(rest);
    let rest = separate_star_flag(&rest);

    let mut tokens: Vec<&str> = rest.split_whitespace().collect();
    peel_trailing_metadata(&mut tokens);

    DeckEntry::new(tokens.join(" "), quantity)
}

/// Split `"4x Island"` into `(4, "Island")`
///
/// The count must be followed by whitespace (after an optional `x`);
/// otherwise the line has no count and the whole line is returned.
fn split_quantity(line: &str) -> (u32, &str) {
    let digits_end = line
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(line.len());
    if digits_end == 0 {
        return (1, line);
    }

    let after_digits = &line[digits_end..];
    let after_x = after_digits
        .strip_prefix(['x', 'X'])
        .unwrap_or(after_digits);
    let rest = after_x.trim_start();
    if rest.len() == after_x.len() {
        return (1, line);
    }

    match line[..digits_end].parse::<u32>() {
        Ok(quantity) => (quantity, rest),
        Err(_) => (1, line),
    }
}

/// Replace each `(...)` span and its surrounding whitespace with one space
fn strip_parentheticals(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(open) = rest.find('(') {
        let Some(close) = rest[open..].find(')').map(|i| open + i) else {
            break;
        };
        out.push_str(rest[..open].trim_end());
        out.push(' ');
        rest = rest[close + 1..].trim_start();
    }
    out.push_str(rest);

    out.trim().to_string()
}

/// `"35★"` -> `"35 ★"` (first occurrence only)
fn separate_star_flag(s: &str) -> String {
    let chars: Vec<(usize, char)> = s.char_indices().collect();

    for (i, &(pos, c)) in chars.iter().enumerate() {
        if c != STAR || i == 0 {
            continue;
        }
        let prev = chars[i - 1].1;
        let merged = prev.is_ascii_digit()
            || (prev.is_ascii_alphabetic() && i >= 2 && chars[i - 2].1.is_ascii_digit());
        if merged {
            let mut out = String::with_capacity(s.len() + 1);
            out.push_str(&s[..pos]);
            out.push(' ');
            out.push_str(&s[pos..]);
            return out;
        }
    }

    s.to_string()
}

fn peel_trailing_metadata(tokens: &mut Vec<&str>) {
    while let Some(&last) = tokens.last() {
        if is_flag(last) {
            tokens.pop();
            continue;
        }

        if tokens.len() >= 2
            && is_set_code(tokens[tokens.len() - 2])
            && is_collector_number(last)
        {
            tokens.truncate(tokens.len() - 2);
            continue;
        }

        if is_collector_number(last) || is_fused_set_number(last) {
            tokens.pop();
            continue;
        }

        break;
    }
}

fn is_flag(token: &str) -> bool {
    token.chars().eq(std::iter::once(STAR))
        || FLAG_TOKENS.iter().any(|f| f.eq_ignore_ascii_case(token))
}

/// `207`, `35`, `123a`
fn is_collector_number(token: &str) -> bool {
    let bytes = token.as_bytes();
    let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return false;
    }
    match &bytes[digits..] {
        [] => true,
        [suffix] => suffix.is_ascii_lowercase(),
        _ => false,
    }
}

/// `EMN`, `M10` is not one (digits are not part of a bare set code)
fn is_set_code(token: &str) -> bool {
    (SET_CODE_MIN_LEN..=SET_CODE_MAX_LEN).contains(&token.len())
        && token.bytes().all(|b| b.is_ascii_uppercase())
}

/// `EMN155`, `EMN-155`, `EMN-155a`
fn is_fused_set_number(token: &str) -> bool {
    let letters = token.bytes().take_while(|b| b.is_ascii_uppercase()).count();
    if !(SET_CODE_MIN_LEN..=SET_CODE_MAX_LEN).contains(&letters) {
        return false;
    }
    let number = &token[letters..];
    let number = number.strip_prefix('-').unwrap_or(number);
    is_collector_number(number)
}
