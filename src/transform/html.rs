//! Markup stripping for free-text description fields.

/// Remove markup tags and resolve common entities.
///
/// Tag-free text is preserved verbatim, including its whitespace layout. A
/// lone `<` that does not open a tag (not followed by a letter, `/`, `!` or
/// `?`) is kept as text.
pub fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(i) = rest.find('<') {
        let after = rest[i + 1..].chars().next();
        let opens_tag = matches!(
            after,
            Some(c) if c.is_ascii_alphabetic() || c == '/' || c == '!' || c == '?'
        );

        if !opens_tag {
            out.push_str(&rest[..=i]);
            rest = &rest[i + 1..];
            continue;
        }

        out.push_str(&rest[..i]);
        match rest[i..].find('>') {
            Some(j) => rest = &rest[i + j + 1..],
            None => {
                // Unterminated tag: keep the remainder as text
                out.push_str(&rest[i..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);

    decode_entities(&out)
}

fn decode_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(i) = rest.find('&') {
        out.push_str(&rest[..i]);
        rest = &rest[i..];

        match rest.find(';') {
            // Entity names are short; a distant semicolon means a bare '&'
            Some(j) if j > 1 && j <= 10 => match decode_entity(&rest[1..j]) {
                Some(c) => {
                    out.push(c);
                    rest = &rest[j + 1..];
                }
                None => {
                    out.push('&');
                    rest = &rest[1..];
                }
            },
            _ => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let code = name
                .strip_prefix("#x")
                .or_else(|| name.strip_prefix("#X"))
                .map(|hex| u32::from_str_radix(hex, 16))
                .or_else(|| name.strip_prefix('#').map(|dec| dec.parse::<u32>()))?;
            code.ok().and_then(char::from_u32)
        }
    }
}
