//! LaTeX escaping for plain text segments.

/// Escape the characters LaTeX treats specially.
///
/// Shortcode output and code block content never pass through here.
pub fn escape_latex(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\textbackslash~"),
            '~' => out.push_str("\\textasciitilde~"),
            '^' => out.push_str("\\textasciicircum~"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}

/// True if `input` contains nothing [`escape_latex`] would rewrite.
pub fn is_latex_safe(input: &str) -> bool {
    !input
        .chars()
        .any(|ch| matches!(ch, '\\' | '~' | '^' | '&' | '%' | '$' | '#' | '_' | '{' | '}'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_text_is_unchanged() {
        let samples = ["", "hello world", "Grüße, 100 (ok)!", "a-b+c=d <x> [y] @z"];
        for s in samples {
            assert!(is_latex_safe(s));
            assert_eq!(escape_latex(s), s);
        }
    }

    #[test]
    fn every_special_character_is_replaced() {
        let cases = [
            ("\\", "\\textbackslash~"),
            ("~", "\\textasciitilde~"),
            ("^", "\\textasciicircum~"),
            ("&", "\\&"),
            ("%", "\\%"),
            ("$", "\\$"),
            ("#", "\\#"),
            ("_", "\\_"),
            ("{", "\\{"),
            ("}", "\\}"),
        ];
        for (input, expected) in cases {
            assert!(!is_latex_safe(input));
            assert_eq!(escape_latex(input), expected, "escaping {:?}", input);
        }
    }

    #[test]
    fn mixed_text() {
        assert_eq!(
            escape_latex("50% of $x_1 & {y}"),
            "50\\% of \\$x\\_1 \\& \\{y\\}"
        );
    }
}
