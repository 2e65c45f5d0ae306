use once_cell::sync::Lazy;
use regex::Regex;

// ASCII-only on purpose: a hash glued to CJK or other scripts is left alone
// rather than risking false positives in mixed-script prose.
static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#([A-Za-z0-9]+(?:/[A-Za-z0-9]+)*)").unwrap());

/// Disambiguates inline hashtags. A tag at the end of a line stays `#tag`
/// syntax; a tag followed by more text on the same line becomes a bracketed
/// `[[tag]]` reference. Missing whitespace around either form is repaired.
pub fn normalize_tags(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut last_index = 0;

    for captures in TAG_RE.captures_iter(text) {
        let mat = match captures.get(0) {
            Some(value) => value,
            None => continue,
        };
        let token = captures.get(1).map_or("", |value| value.as_str());

        output.push_str(&text[last_index..mat.start()]);
        last_index = mat.end();

        let before = text[..mat.start()].chars().next_back();
        let after = text[mat.end()..].chars().next();
        let needs_space_before = before.is_some_and(|ch| !ch.is_whitespace());

        match after {
            None | Some('\n') => {
                // End-of-line tag: keep hashtag syntax.
                if needs_space_before {
                    output.push(' ');
                }
                output.push('#');
                output.push_str(token);
            }
            Some(next) => {
                // Mid-sentence: rewrite as a bracketed reference.
                if needs_space_before {
                    output.push(' ');
                }
                output.push_str("[[");
                output.push_str(token);
                output.push_str("]]");
                if !next.is_whitespace() {
                    output.push(' ');
                }
            }
        }
    }

    output.push_str(&text[last_index..]);
    output
}
