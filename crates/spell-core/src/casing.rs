//! Casing-class detection and transfer onto dictionary words.
//!
//! Dictionary terms are stored lowercase; when a correction replaces a
//! cased source token, the replacement mirrors the source's casing class:
//! all-upper, all-lower, title-case, or a character-by-character mixed
//! mirror.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseClass {
    Lower,
    Upper,
    Title,
    Mixed,
}

/// Classify a source token. Tokens without letters count as lower so the
/// target passes through unchanged.
pub fn case_class(source: &str) -> CaseClass {
    let mut letters = source.chars().filter(|c| c.is_alphabetic()).peekable();
    if letters.peek().is_none() {
        return CaseClass::Lower;
    }
    let upper = source
        .chars()
        .filter(|c| c.is_alphabetic())
        .filter(|c| c.is_uppercase())
        .count();
    let total = source.chars().filter(|c| c.is_alphabetic()).count();

    if upper == total {
        return CaseClass::Upper;
    }
    if upper == 0 {
        return CaseClass::Lower;
    }
    let first_is_upper = source.chars().next().is_some_and(|c| c.is_uppercase());
    let rest_lower = source.chars().skip(1).all(|c| !c.is_uppercase());
    if first_is_upper && rest_lower {
        return CaseClass::Title;
    }
    CaseClass::Mixed
}

/// Map `target` onto the casing class of `source`.
///
/// The mixed class mirrors the source's per-position case flags, truncated
/// or padded (as lowercase) to the target length. Non-letter source
/// positions produce lowercase target characters.
pub fn transfer_case(source: &str, target: &str) -> String {
    match case_class(source) {
        CaseClass::Lower => target.to_lowercase(),
        CaseClass::Upper => target.to_uppercase(),
        CaseClass::Title => {
            let mut chars = target.chars();
            match chars.next() {
                Some(first) => {
                    let mut out: String = first.to_uppercase().collect();
                    out.extend(chars.flat_map(|c| c.to_lowercase()));
                    out
                }
                None => String::new(),
            }
        }
        CaseClass::Mixed => {
            let flags: Vec<bool> = source.chars().map(|c| c.is_uppercase()).collect();
            let mut out = String::with_capacity(target.len());
            for (i, c) in target.chars().enumerate() {
                if flags.get(i).copied().unwrap_or(false) {
                    out.extend(c.to_uppercase());
                } else {
                    out.extend(c.to_lowercase());
                }
            }
            out
        }
    }
}
