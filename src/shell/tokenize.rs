//! Splitting command lines into words

use crate::core::error::{RecordsError, Result};

/// Split a command line on whitespace, keeping double-quoted text together
///
/// `\"` inside quotes is a literal quote. An empty pair of quotes yields an
/// empty word.
///
/// # Errors
/// Returns `InvalidInput` for an unterminated quote
pub fn split_line(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut in_quotes = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                in_word = true;
            }
            '\\' if in_quotes => match chars.next() {
                Some(next) => current.push(next),
                None => break,
            },
            c if c.is_whitespace() && !in_quotes => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if in_quotes {
        return Err(RecordsError::invalid(format!(
            "unterminated quote in: {line}"
        )));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_words() {
        assert_eq!(
            split_line("  enroll   S1 CS101 ").unwrap(),
            vec!["enroll", "S1", "CS101"]
        );
    }

    #[test]
    fn test_quoted_words() {
        assert_eq!(
            split_line(r#"add-student S1 "Ada Lovelace" "12 Analytical Way""#).unwrap(),
            vec!["add-student", "S1", "Ada Lovelace", "12 Analytical Way"]
        );
    }

    #[test]
    fn test_escaped_quote_and_empty_word() {
        assert_eq!(
            split_line(r#"rate-faculty F1 4 "said \"great\"" """#).unwrap(),
            vec!["rate-faculty", "F1", "4", "said \"great\"", ""]
        );
    }

    #[test]
    fn test_unterminated_quote() {
        assert!(matches!(
            split_line(r#"add-student S1 "Ada"#),
            Err(RecordsError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_blank_line() {
        assert!(split_line("   ").unwrap().is_empty());
    }
}
