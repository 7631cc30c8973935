//! Comment text sanitization. Comments are plain text only, so the allowed
//! tag set is empty: every tag is removed and only text content survives.
//! Whitespace is left exactly as written and the function never fails; at
//! worst it returns an empty string.

pub fn strip_markup(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut output = String::with_capacity(raw.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '<' {
            output.push(chars[i]);
            i += 1;
            continue;
        }

        // A '<' that does not open a tag stays as literal text.
        if !is_tag_start(&chars, i) {
            output.push('<');
            i += 1;
            continue;
        }

        let name = tag_name(&chars, i + 1);

        let close = match find_tag_end(&chars, i) {
            Some(close) => close,
            // Unterminated tag: the rest of the input is markup.
            None => break,
        };

        i = close + 1;

        // Script and style bodies are not renderable text.
        if name == "script" || name == "style" {
            i = skip_element_body(&chars, i, &name);
        }
    }

    output
}

fn is_tag_start(chars: &[char], lt: usize) -> bool {
    match chars.get(lt + 1) {
        Some(c) => c.is_ascii_alphabetic() || *c == '/' || *c == '!' || *c == '?',
        None => false,
    }
}

fn tag_name(chars: &[char], mut i: usize) -> String {
    if chars.get(i) == Some(&'/') {
        i += 1;
    }

    let mut name = String::new();
    while let Some(c) = chars.get(i) {
        if c.is_ascii_alphanumeric() {
            name.push(c.to_ascii_lowercase());
            i += 1;
        } else {
            break;
        }
    }

    name
}

// Finds the '>' closing the tag that opens at `lt`, skipping over quoted
// attribute values.
fn find_tag_end(chars: &[char], lt: usize) -> Option<usize> {
    let mut i = lt + 1;
    let mut quote: Option<char> = None;

    while let Some(c) = chars.get(i) {
        match quote {
            Some(q) => {
                if *c == q {
                    quote = None;
                }
            }
            None => match c {
                '"' | '\'' => quote = Some(*c),
                '>' => return Some(i),
                _ => {}
            },
        }
        i += 1;
    }

    None
}

// Consumes everything up to and including the matching closing tag.
fn skip_element_body(chars: &[char], mut i: usize, name: &str) -> usize {
    while i < chars.len() {
        if chars[i] == '<'
            && chars.get(i + 1) == Some(&'/')
            && tag_name(chars, i + 1) == name
        {
            return match find_tag_end(chars, i) {
                Some(close) => close + 1,
                None => chars.len(),
            };
        }
        i += 1;
    }

    chars.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_simple_tags_keeping_text() {
        assert_eq!(strip_markup("<b>ótimo</b>"), "ótimo");
        assert_eq!(strip_markup("a<br>b"), "ab");
    }

    #[test]
    fn whitespace_is_not_normalized() {
        assert_eq!(strip_markup("  <b>ótimo</b>  "), "  ótimo  ");
        assert_eq!(strip_markup("a  \n  b"), "a  \n  b");
    }

    #[test]
    fn script_body_is_dropped_entirely() {
        assert_eq!(strip_markup("<script>alert(1)</script>hi"), "hi");
        assert_eq!(strip_markup("a<style>p { color: red }</style>b"), "ab");
    }

    #[test]
    fn literal_angle_brackets_survive() {
        assert_eq!(strip_markup("1 < 2 e 3 > 1"), "1 < 2 e 3 > 1");
        assert_eq!(strip_markup("<<b>>"), "<>");
    }

    #[test]
    fn quoted_attributes_may_contain_gt() {
        assert_eq!(strip_markup("<a href=\"a>b\">x</a>"), "x");
    }

    #[test]
    fn unterminated_tag_truncates_as_markup() {
        assert_eq!(strip_markup("oi <b"), "oi ");
    }

    #[test]
    fn markup_only_input_becomes_empty() {
        assert_eq!(strip_markup("<p></p>"), "");
        assert_eq!(strip_markup("<img src=\"x\">"), "");
    }

    #[test]
    fn stripping_is_idempotent() {
        let samples = [
            "<script>alert(1)</script>hi",
            "  <b>ótimo</b>  ",
            "1 < 2 e 3 > 1",
            "<<b>>",
            "oi <b",
            "plain text",
            "",
        ];

        for sample in samples {
            let once = strip_markup(sample);
            assert_eq!(strip_markup(&once), once, "input: {sample:?}");
        }
    }
}
