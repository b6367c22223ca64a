//! Small string helpers shared by the HTTP-facing crates.

/// Shorten `text` to at most `max_bytes`, cutting on a char boundary.
pub fn truncate_on_char_boundary(text: &mut String, max_bytes: usize) {
    if text.len() <= max_bytes {
        return;
    }
    let mut cut = max_bytes;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text.truncate(cut);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn short_text_is_untouched() {
        let mut text = String::from("bad gateway");
        truncate_on_char_boundary(&mut text, 512);
        assert_eq!(text, "bad gateway");
    }

    #[test]
    fn cuts_at_byte_limit() {
        let mut text = "x".repeat(600);
        truncate_on_char_boundary(&mut text, 512);
        assert_eq!(text.len(), 512);
    }

    #[test]
    fn never_splits_a_multibyte_char() {
        // "é" is two bytes; a 3-byte limit lands inside the second one.
        let mut text = String::from("éé");
        truncate_on_char_boundary(&mut text, 3);
        assert_eq!(text, "é");
    }
}
