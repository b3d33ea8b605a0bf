//! Ruby interpolation scanning for non-script filter content.
//!
//! A non-Ruby filter (`:javascript`, `:css`, ...) is inert text except
//! for `#{...}` interpolations, which are real Ruby expressions the
//! linter should still see.

/// Collect the inner expression of every `#{...}` interpolation in
/// `text`, verbatim and in order.
///
/// Brace depth is tracked, so hash literals and blocks inside an
/// interpolation do not terminate it early, and an interpolation may
/// span several physical lines. An unterminated interpolation at the
/// end of the text is dropped.
pub fn extract_interpolated_values(text: &str) -> Vec<String> {
    let bytes = text.as_bytes();
    let mut values = Vec::new();
    let mut i = 0;

    while i + 1 < bytes.len() {
        if bytes[i] != b'#' || bytes[i + 1] != b'{' {
            i += 1;
            continue;
        }

        let start = i + 2;
        let mut depth = 1usize;
        let mut end = None;
        let mut j = start;
        while j < bytes.len() {
            match bytes[j] {
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        end = Some(j);
                        break;
                    }
                }
                _ => {}
            }
            j += 1;
        }

        match end {
            Some(end) => {
                values.push(text[start..end].to_string());
                i = end + 1;
            }
            None => break,
        }
    }

    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_interpolation() {
        assert!(extract_interpolated_values("console.log('hi');").is_empty());
        assert!(extract_interpolated_values("").is_empty());
    }

    #[test]
    fn single_interpolation() {
        assert_eq!(
            extract_interpolated_values("var x = #{user.name};"),
            vec!["user.name"]
        );
    }

    #[test]
    fn multiple_interpolations_in_order() {
        assert_eq!(
            extract_interpolated_values("#{first} and #{second}"),
            vec!["first", "second"]
        );
    }

    #[test]
    fn nested_braces_do_not_terminate_early() {
        assert_eq!(
            extract_interpolated_values("count: #{ { a: 1, b: 2 }.size }"),
            vec![" { a: 1, b: 2 }.size "]
        );
    }

    #[test]
    fn interpolation_may_span_lines() {
        assert_eq!(
            extract_interpolated_values("x = #{values\n  .sum};"),
            vec!["values\n  .sum"]
        );
    }

    #[test]
    fn unterminated_interpolation_is_dropped() {
        assert_eq!(
            extract_interpolated_values("#{complete} then #{dangling"),
            vec!["complete"]
        );
    }

    #[test]
    fn lone_hash_is_not_an_interpolation() {
        assert!(extract_interpolated_values("#comment {not ruby}").is_empty());
    }
}
