//! Cleanup of one raw OCR line before it is split into name and code.
//!
//! Roster photos come back from the engine with stray punctuation, misread
//! Latin fragments and uneven spacing around otherwise good Arabic names.
//! Everything here is best effort: malformed input degrades to a shorter (or
//! empty) line, never to an error.

re!(re_separators, r"[|،:؛]");
re!(re_whitespace, r"\s+");
re!(re_decorations, r#"[©#@*+=|~^`"“”'’\[\]()<>{}]"#);
re!(re_trailing_code, r"[A-Za-z]{1,4}-?[0-9]{1,4}$");
re!(re_code_token, r"^[A-Za-z]{1,4}-?[0-9]{1,4}$");
re!(re_latin_run, r"[A-Za-z]+");
re!(re_disallowed, r"[^\x{0600}-\x{06FF}0-9\s-]");

/// Normalize one recognized line.
///
/// The result holds only Arabic letters, ASCII digits, hyphens and single
/// spaces, plus at most one code kept verbatim: the one ending the line, or
/// failing that a code-shaped first token. A code found at the very end of
/// the input is guaranteed to end the output. Applying this twice is the same
/// as applying it once.
pub fn normalize_line(raw: &str) -> String {
    let s = re_separators().replace_all(raw, " ");
    let s = collapse(&s);
    let s = collapse(&re_decorations().replace_all(&s, " "));

    let code = re_trailing_code().find(&s).map(|m| m.as_str().to_string());

    let tokens: Vec<&str> = s.split_whitespace().collect();
    let last = tokens.len().saturating_sub(1);
    let cleaned: Vec<String> = tokens
        .iter()
        .enumerate()
        .map(|(i, &t)| {
            let keep = match &code {
                Some(code) => i == last && t == code.as_str(),
                None => i == 0 && is_code(t),
            };
            if keep {
                t.to_string()
            } else {
                clean_token(t)
            }
        })
        .collect();
    let s = collapse(&cleaned.join(" "));

    match code {
        Some(code) if !s.ends_with(&code) => format!("{s} {code}").trim().to_string(),
        _ => s,
    }
}

/// True when the whole token is a code: 1–4 Latin letters, optional hyphen, 1–4 digits.
pub fn is_code(token: &str) -> bool {
    re_code_token().is_match(token)
}

fn collapse(s: &str) -> String {
    re_whitespace().replace_all(s, " ").trim().to_string()
}

/// Drop standalone Latin words, then anything outside Arabic, digits and hyphens.
fn clean_token(token: &str) -> String {
    let token = strip_latin_words(token);
    re_disallowed().replace_all(&token, " ").into_owned()
}

/// Blank out runs of Latin letters that stand alone as words, i.e. are not
/// glued to digits or other Latin characters on either side.
fn strip_latin_words(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut last = 0;
    for m in re_latin_run().find_iter(token) {
        let glued_before = token[..m.start()].chars().next_back().is_some_and(is_ascii_word);
        let glued_after = token[m.end()..].chars().next().is_some_and(is_ascii_word);
        if !glued_before && !glued_after {
            out.push_str(&token[last..m.start()]);
            out.push(' ');
            last = m.end();
        }
    }
    out.push_str(&token[last..]);
    out
}

fn is_ascii_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
