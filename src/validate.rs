//! Per-component grammar checks.
//!
//! Each check looks at a single component in isolation; rules spanning
//! several components live on [`Uri`](crate::Uri).

use crate::charset::CharacterClass;
use crate::constants::PERCENT;
use crate::error::InvalidUriErrorKind;

/// Checks that every character is in `class` or part of a `%HH` triple.
pub(crate) fn check_chars(value: &str, class: CharacterClass) -> Result<(), InvalidUriErrorKind> {
    let set = class.set();
    let mut chars = value.chars().enumerate();

    while let Some((position, c)) = chars.next() {
        if c == PERCENT {
            match (chars.next(), chars.next()) {
                (Some((_, hi)), Some((_, lo)))
                    if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => {}
                _ => return Err(InvalidUriErrorKind::InvalidPercentEncoding { position }),
            }
        } else if !set.contains(c) {
            return Err(InvalidUriErrorKind::InvalidChar {
                char: c,
                position,
                allowed: class,
            });
        }
    }

    Ok(())
}

/// `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
pub(crate) fn check_scheme(scheme: &str) -> Result<(), InvalidUriErrorKind> {
    let mut chars = scheme.chars();
    let first = chars.next().ok_or(InvalidUriErrorKind::EmptyScheme)?;
    if !CharacterClass::Alpha.set().contains(first) {
        return Err(InvalidUriErrorKind::SchemeMustStartWithLetter { found: first });
    }

    let set = CharacterClass::Scheme.set();
    for (i, c) in chars.enumerate() {
        if !set.contains(c) {
            return Err(InvalidUriErrorKind::InvalidChar {
                char: c,
                position: i + 1,
                allowed: CharacterClass::Scheme,
            });
        }
    }

    Ok(())
}

/// A user name is user information without the `:` that starts the password.
pub(crate) fn check_user_name(user_name: &str) -> Result<(), InvalidUriErrorKind> {
    if let Some(position) = user_name.chars().position(|c| c == ':') {
        return Err(InvalidUriErrorKind::UnencodedDelimiter { char: ':', position });
    }
    check_chars(user_name, CharacterClass::UserInfo)
}

pub(crate) fn check_password(password: &str) -> Result<(), InvalidUriErrorKind> {
    check_chars(password, CharacterClass::UserInfo)
}

/// `host = IP-literal / reg-name`
///
/// An empty host is a valid, empty reg-name.
pub(crate) fn check_host(host: &str) -> Result<(), InvalidUriErrorKind> {
    let Some(literal) = host.strip_prefix('[') else {
        return check_chars(host, CharacterClass::Host);
    };
    let (inner, trailing) = literal
        .split_once(']')
        .ok_or(InvalidUriErrorKind::UnterminatedIpLiteral)?;
    if let Some(c) = trailing.chars().next() {
        return Err(InvalidUriErrorKind::InvalidChar {
            char: c,
            position: inner.chars().count() + 2,
            allowed: CharacterClass::IpLiteral,
        });
    }

    let set = CharacterClass::IpLiteral.set();
    for (i, c) in inner.chars().enumerate() {
        if !set.contains(c) {
            return Err(InvalidUriErrorKind::InvalidChar {
                char: c,
                position: i + 1,
                allowed: CharacterClass::IpLiteral,
            });
        }
    }

    Ok(())
}

/// `port = *DIGIT`
pub(crate) fn check_port(port: &str) -> Result<(), InvalidUriErrorKind> {
    match port.chars().enumerate().find(|(_, c)| !c.is_ascii_digit()) {
        Some((position, c)) => Err(InvalidUriErrorKind::NonDigitPort { char: c, position }),
        None => Ok(()),
    }
}
