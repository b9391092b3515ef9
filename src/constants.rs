//! Character constants from the RFC 3986 ABNF.

/// `gen-delims = ":" / "/" / "?" / "#" / "[" / "]" / "@"`
pub const GEN_DELIMS: &str = ":/?#[]@";

/// `sub-delims = "!" / "$" / "&" / "'" / "(" / ")" / "*" / "+" / "," / ";" / "="`
pub const SUB_DELIMS: &str = "!$&'()*+,;=";

/// Punctuation allowed in `unreserved` besides letters and digits.
pub const UNRESERVED_MARKS: &str = "-._~";

/// Punctuation allowed in `scheme` after the leading letter.
pub const SCHEME_MARKS: &str = "+-.";

/// Introduces a percent-encoded octet.
pub const PERCENT: char = '%';

/// Separates query parameters.
pub const QUERY_PAIR_SEPARATOR: char = '&';

/// Separates a query parameter key from its value.
pub const QUERY_VALUE_SEPARATOR: char = '=';
