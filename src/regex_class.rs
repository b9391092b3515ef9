//! Bracket-expression rendering of character sets.
//!
//! Members are written in ascending code-point order. Runs of three or more
//! consecutive code points collapse into a range (`a-z`); shorter runs are
//! listed one by one. Characters that mean something inside a bracket
//! expression are escaped with a backslash.

use crate::charset::CharacterSet;

/// Shortest run written as a range.
const MIN_RANGE_RUN: u32 = 3;

impl CharacterSet {
    /// Returns a bracket expression matching any single member of the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use strict_uri::CharacterClass;
    ///
    /// assert_eq!(CharacterClass::Digit.regex_class(), "[0-9]");
    /// assert_eq!(CharacterClass::Scheme.regex_class(), r"[+\-.0-9A-Za-z]");
    /// ```
    #[must_use]
    pub fn regex_class(&self) -> String {
        self.bracket_expression(false)
    }

    /// Returns a bracket expression matching any single character outside
    /// the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use strict_uri::CharacterClass;
    ///
    /// assert_eq!(CharacterClass::Digit.inverted_regex_class(), "[^0-9]");
    /// ```
    #[must_use]
    pub fn inverted_regex_class(&self) -> String {
        self.bracket_expression(true)
    }

    fn bracket_expression(&self, negated: bool) -> String {
        let mut out = String::with_capacity(2 + self.len() * 2);
        out.push('[');
        if negated {
            out.push('^');
        }

        let mut chars = self.chars().peekable();
        while let Some(start) = chars.next() {
            let mut end = start;
            while let Some(&next) = chars.peek() {
                if u32::from(next) != u32::from(end) + 1 {
                    break;
                }
                end = next;
                chars.next();
            }

            let run = u32::from(end) - u32::from(start) + 1;
            if run >= MIN_RANGE_RUN {
                push_escaped(&mut out, start);
                out.push('-');
                push_escaped(&mut out, end);
            } else {
                for c in start..=end {
                    push_escaped(&mut out, c);
                }
            }
        }

        out.push(']');
        out
    }
}

fn push_escaped(out: &mut String, c: char) {
    if matches!(c, '\\' | ']' | '[' | '^' | '-' | '&' | '~') {
        out.push('\\');
    }
    out.push(c);
}

#[cfg(test)]
mod tests {
    use crate::charset::CharacterClass;

    #[test]
    fn collapses_runs_into_ranges() {
        assert_eq!(CharacterClass::Alpha.regex_class(), "[A-Za-z]");
        assert_eq!(CharacterClass::Digit.regex_class(), "[0-9]");
    }

    #[test]
    fn short_runs_are_listed() {
        // "?@" is a run of two
        assert_eq!(CharacterClass::GenDelims.regex_class(), r"[#/:?@\[\]]");
    }

    #[test]
    fn sub_delims_escape_ampersand() {
        assert_eq!(CharacterClass::SubDelims.regex_class(), r"[!$\&-,;=]");
    }

    #[test]
    fn unreserved_escapes_hyphen_and_tilde() {
        assert_eq!(
            CharacterClass::Unreserved.regex_class(),
            r"[\-.0-9A-Z_a-z\~]"
        );
    }

    #[test]
    fn inverted_class_is_negated() {
        let normal = CharacterClass::Path.regex_class();
        let inverted = CharacterClass::Path.inverted_regex_class();
        assert_eq!(&inverted[..2], "[^");
        assert_eq!(&inverted[2..], &normal[1..]);
    }

    #[test]
    fn output_is_deterministic() {
        for class in CharacterClass::ALL {
            assert_eq!(class.regex_class(), class.regex_class());
        }
    }

    #[test]
    fn classes_compile_and_match_exactly_the_members() {
        for class in CharacterClass::ALL {
            let set = class.set();
            let normal = regex::Regex::new(&format!("^{}$", class.regex_class())).unwrap();
            let inverted =
                regex::Regex::new(&format!("^{}$", class.inverted_regex_class())).unwrap();

            for c in (0u8..128).map(char::from) {
                let text = c.to_string();
                assert_eq!(normal.is_match(&text), set.contains(c), "{class}: {c:?}");
                assert_eq!(inverted.is_match(&text), !set.contains(c), "{class}: {c:?}");
            }
            assert!(inverted.is_match("é"));
        }
    }
}
