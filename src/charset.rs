//! Character sets for the productions of the RFC 3986 grammar.
//!
//! Every [`CharacterClass`] maps to one [`CharacterSet`], computed on first
//! use and shared for the rest of the process:
//!
//! ```text
//! gen-delims  = ":" / "/" / "?" / "#" / "[" / "]" / "@"
//! sub-delims  = "!" / "$" / "&" / "'" / "(" / ")" / "*" / "+" / "," / ";" / "="
//! reserved    = gen-delims / sub-delims
//! unreserved  = ALPHA / DIGIT / "-" / "." / "_" / "~"
//! pchar       = unreserved / sub-delims / ":" / "@"
//! scheme      = ALPHA / DIGIT / "+" / "-" / "."
//! authority   = unreserved / sub-delims / ":" / "@" / "[" / "]"
//! userinfo    = unreserved / sub-delims / ":"
//! reg-name    = unreserved / sub-delims
//! IP-literal  = unreserved / sub-delims / ":"       (between "[" and "]")
//! path        = pchar / "/"
//! query       = pchar / "/" / "?"
//! fragment    = pchar / "/" / "?"
//! ```
//!
//! Percent-encoded octets are not members of any set; validation treats a
//! `%HH` triple as satisfying every set.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::constants::{GEN_DELIMS, SCHEME_MARKS, SUB_DELIMS, UNRESERVED_MARKS};

/// A grammar production with a registered character set.
///
/// # Examples
///
/// ```
/// use strict_uri::CharacterClass;
///
/// let unreserved = CharacterClass::Unreserved.set();
/// assert!(unreserved.contains('~'));
/// assert!(!unreserved.contains('/'));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CharacterClass {
    /// `ALPHA`: ASCII letters.
    Alpha,
    /// `DIGIT`: ASCII decimal digits.
    Digit,
    /// `gen-delims`
    GenDelims,
    /// `sub-delims`
    SubDelims,
    /// `reserved = gen-delims / sub-delims`
    Reserved,
    /// `unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"`
    Unreserved,
    /// `pchar`: characters allowed inside a single path segment.
    InnerPath,
    /// Characters allowed in a scheme.
    Scheme,
    /// Characters allowed anywhere in an authority.
    Authority,
    /// Characters allowed in the user information.
    UserInfo,
    /// Characters allowed in a registered host name.
    Host,
    /// Characters allowed between the brackets of an IP literal host.
    IpLiteral,
    /// Characters allowed in a path.
    Path,
    /// Characters allowed in a query.
    Query,
    /// Characters allowed in a fragment.
    Fragment,
}

const CLASS_COUNT: usize = 15;

impl CharacterClass {
    /// Every registered class, in declaration order.
    pub const ALL: [Self; CLASS_COUNT] = [
        Self::Alpha,
        Self::Digit,
        Self::GenDelims,
        Self::SubDelims,
        Self::Reserved,
        Self::Unreserved,
        Self::InnerPath,
        Self::Scheme,
        Self::Authority,
        Self::UserInfo,
        Self::Host,
        Self::IpLiteral,
        Self::Path,
        Self::Query,
        Self::Fragment,
    ];

    /// Returns the ABNF-style name of the production.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Alpha => "ALPHA",
            Self::Digit => "DIGIT",
            Self::GenDelims => "gen-delims",
            Self::SubDelims => "sub-delims",
            Self::Reserved => "reserved",
            Self::Unreserved => "unreserved",
            Self::InnerPath => "pchar",
            Self::Scheme => "scheme",
            Self::Authority => "authority",
            Self::UserInfo => "userinfo",
            Self::Host => "reg-name",
            Self::IpLiteral => "IP-literal",
            Self::Path => "path",
            Self::Query => "query",
            Self::Fragment => "fragment",
        }
    }

    /// Returns the character set of this production.
    ///
    /// The set is computed once per process, even when several threads ask
    /// for it at the same time; every call returns the same reference.
    #[must_use]
    pub fn set(self) -> &'static CharacterSet {
        static SETS: [OnceLock<CharacterSet>; CLASS_COUNT] =
            [const { OnceLock::new() }; CLASS_COUNT];

        SETS[self as usize].get_or_init(|| {
            let set = self.compute();
            log::trace!("computed {} character set ({} members)", self.name(), set.len());
            set
        })
    }

    /// Returns a bracket expression matching one member of this class.
    ///
    /// See [`CharacterSet::regex_class`].
    #[must_use]
    pub fn regex_class(self) -> String {
        self.set().regex_class()
    }

    /// Returns a bracket expression matching one character outside this class.
    ///
    /// See [`CharacterSet::inverted_regex_class`].
    #[must_use]
    pub fn inverted_regex_class(self) -> String {
        self.set().inverted_regex_class()
    }

    fn compute(self) -> CharacterSet {
        let unreserved_sub_delims =
            |class| Self::Unreserved.set().union(Self::SubDelims.set(), class);

        match self {
            Self::Alpha => CharacterSet::from_ranges(self, &[('a', 'z'), ('A', 'Z')]),
            Self::Digit => CharacterSet::from_ranges(self, &[('0', '9')]),
            Self::GenDelims => CharacterSet::from_chars(self, GEN_DELIMS),
            Self::SubDelims => CharacterSet::from_chars(self, SUB_DELIMS),
            Self::Reserved => Self::GenDelims.set().union(Self::SubDelims.set(), self),
            Self::Unreserved => Self::Alpha
                .set()
                .union(Self::Digit.set(), self)
                .with_chars(UNRESERVED_MARKS),
            Self::Scheme => Self::Alpha
                .set()
                .union(Self::Digit.set(), self)
                .with_chars(SCHEME_MARKS),
            Self::Host => unreserved_sub_delims(self),
            Self::UserInfo | Self::IpLiteral => unreserved_sub_delims(self).with_chars(":"),
            Self::InnerPath => unreserved_sub_delims(self).with_chars(":@"),
            Self::Authority => unreserved_sub_delims(self).with_chars(":@[]"),
            Self::Path => Self::InnerPath.set().retag(self).with_chars("/"),
            Self::Query | Self::Fragment => Self::InnerPath.set().retag(self).with_chars("/?"),
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CharacterClass {
    type Err = UnknownCharacterClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|class| class.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownCharacterClass(s.to_string()))
    }
}

/// Returned when a name does not match any [`CharacterClass`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCharacterClass(pub String);

impl fmt::Display for UnknownCharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown character class '{}'", self.0)
    }
}

impl std::error::Error for UnknownCharacterClass {}

/// An immutable set of ASCII characters tagged with its production.
///
/// Sets are only handed out by [`CharacterClass::set`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharacterSet {
    class: CharacterClass,
    bits: u128,
}

impl CharacterSet {
    fn from_chars(class: CharacterClass, chars: &str) -> Self {
        Self { class, bits: 0 }.with_chars(chars)
    }

    fn from_ranges(class: CharacterClass, ranges: &[(char, char)]) -> Self {
        let bits = ranges
            .iter()
            .flat_map(|&(start, end)| start..=end)
            .fold(0, |bits, c| bits | Self::bit(c));
        Self { class, bits }
    }

    fn with_chars(self, chars: &str) -> Self {
        let bits = chars.chars().fold(self.bits, |bits, c| bits | Self::bit(c));
        Self { bits, ..self }
    }

    const fn union(&self, other: &Self, class: CharacterClass) -> Self {
        Self {
            class,
            bits: self.bits | other.bits,
        }
    }

    const fn retag(&self, class: CharacterClass) -> Self {
        Self {
            class,
            bits: self.bits,
        }
    }

    const fn bit(c: char) -> u128 {
        if c.is_ascii() { 1 << (c as u32) } else { 0 }
    }

    /// Returns the production this set belongs to.
    #[must_use]
    pub const fn class(&self) -> CharacterClass {
        self.class
    }

    /// Returns true if `c` is a member of the set.
    #[must_use]
    pub const fn contains(&self, c: char) -> bool {
        self.bits & Self::bit(c) != 0
    }

    /// Returns the number of members.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns true if the set has no members.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Returns true if no character belongs to both sets.
    #[must_use]
    pub const fn is_disjoint(&self, other: &Self) -> bool {
        self.bits & other.bits == 0
    }

    /// Returns true if every member of `self` is a member of `other`.
    #[must_use]
    pub const fn is_subset(&self, other: &Self) -> bool {
        self.bits & other.bits == self.bits
    }

    /// Iterates over the members in ascending code-point order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        (0u8..128).map(char::from).filter(|&c| self.contains(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(class: CharacterClass) -> String {
        class.set().chars().collect()
    }

    #[test]
    fn same_reference_on_every_call() {
        for class in CharacterClass::ALL {
            assert!(std::ptr::eq(class.set(), class.set()));
            assert_eq!(class.set().class(), class);
        }
    }

    #[test]
    fn concurrent_first_access_agrees() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| CharacterClass::Fragment.set() as *const _ as usize))
            .collect();
        let addrs: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(addrs.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn alpha_and_digit() {
        assert_eq!(CharacterClass::Alpha.set().len(), 52);
        assert_eq!(collect(CharacterClass::Digit), "0123456789");
    }

    #[test]
    fn delimiters() {
        assert_eq!(collect(CharacterClass::GenDelims), "#/:?@[]");
        assert_eq!(collect(CharacterClass::SubDelims), "!$&'()*+,;=");
        assert_eq!(CharacterClass::Reserved.set().len(), 18);
    }

    #[test]
    fn unreserved_members() {
        let set = CharacterClass::Unreserved.set();
        assert_eq!(set.len(), 66);
        for c in ['-', '.', '_', '~', 'a', 'Z', '7'] {
            assert!(set.contains(c), "{c} should be unreserved");
        }
        assert!(!set.contains('%'));
        assert!(!set.contains(' '));
    }

    #[test]
    fn reserved_and_unreserved_partition() {
        let reserved = CharacterClass::Reserved.set();
        let unreserved = CharacterClass::Unreserved.set();
        assert!(reserved.is_disjoint(unreserved));

        let union = reserved.union(unreserved, CharacterClass::Reserved);
        for class in [
            CharacterClass::Scheme,
            CharacterClass::Authority,
            CharacterClass::Path,
            CharacterClass::Query,
            CharacterClass::Fragment,
        ] {
            assert!(class.set().is_subset(&union), "{class} escapes the partition");
        }
    }

    #[test]
    fn scheme_members() {
        let set = CharacterClass::Scheme.set();
        assert!(set.contains('+') && set.contains('-') && set.contains('.'));
        assert!(!set.contains('_'));
        assert!(!set.contains(':'));
    }

    #[test]
    fn component_delimiters() {
        let path = CharacterClass::Path.set();
        assert!(path.contains('/') && path.contains(':') && path.contains('@'));
        assert!(!path.contains('?'));

        let query = CharacterClass::Query.set();
        assert!(query.contains('?') && query.contains('/'));
        assert!(!query.contains('#'));
        assert_eq!(
            CharacterClass::Query.set().chars().collect::<Vec<_>>(),
            CharacterClass::Fragment.set().chars().collect::<Vec<_>>()
        );

        let host = CharacterClass::Host.set();
        assert!(!host.contains(':') && !host.contains('@'));
        assert!(host.is_subset(CharacterClass::Authority.set()));
    }

    #[test]
    fn non_ascii_is_never_a_member() {
        for class in CharacterClass::ALL {
            assert!(!class.set().contains('é'));
        }
    }

    #[test]
    fn class_from_name() {
        assert_eq!("pchar".parse::<CharacterClass>(), Ok(CharacterClass::InnerPath));
        assert_eq!("SUB-DELIMS".parse::<CharacterClass>(), Ok(CharacterClass::SubDelims));
        assert!("nope".parse::<CharacterClass>().is_err());
    }
}
