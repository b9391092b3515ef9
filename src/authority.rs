//! Decomposition and recomposition of the authority component.
//!
//! ```text
//! authority = [ userinfo "@" ] host [ ":" port ]
//! userinfo  = user [ ":" password ]
//! ```
//!
//! Decomposition is lossless: recomposing the parts of any authority string
//! gives back that string.

/// The four sub-components of an authority.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub(crate) struct AuthorityParts {
    pub(crate) user_name: Option<String>,
    pub(crate) password: Option<String>,
    pub(crate) host_name: Option<String>,
    pub(crate) port_number: Option<String>,
}

impl AuthorityParts {
    /// Splits an authority string.
    ///
    /// User information is everything before the last `@`. The port is
    /// whatever follows the last `:` when only digits follow it, so the
    /// colons of a bracketed IPv6 literal are never mistaken for a port
    /// separator.
    pub(crate) fn decompose(authority: &str) -> Self {
        let (user_info, host_port) = match authority.rfind('@') {
            Some(at) => (Some(&authority[..at]), &authority[at + 1..]),
            None => (None, authority),
        };
        let (user_name, password) = split_user_info(user_info);
        let (host_name, port_number) = split_host_port(host_port);

        Self {
            user_name: user_name.map(str::to_string),
            password: password.map(str::to_string),
            host_name: Some(host_name.to_string()),
            port_number: port_number.map(str::to_string),
        }
    }

    /// Replaces user name and password with the parts of `user_info`.
    pub(crate) fn set_user_info(&mut self, user_info: Option<&str>) {
        let (user_name, password) = split_user_info(user_info);
        self.user_name = user_name.map(str::to_string);
        self.password = password.map(str::to_string);
    }

    /// `user [":" password]`, absent when both are absent.
    pub(crate) fn user_info(&self) -> Option<String> {
        match (&self.user_name, &self.password) {
            (None, None) => None,
            (user, None) => user.clone(),
            (user, Some(password)) => {
                Some(format!("{}:{password}", user.as_deref().unwrap_or_default()))
            }
        }
    }

    /// `[userinfo "@"] host [":" port]`, absent when the host is absent.
    pub(crate) fn compose(&self) -> Option<String> {
        let host = self.host_name.as_deref()?;
        let mut authority = String::new();

        if let Some(user_info) = self.user_info() {
            authority.push_str(&user_info);
            authority.push('@');
        }
        authority.push_str(host);
        if let Some(port) = &self.port_number {
            authority.push(':');
            authority.push_str(port);
        }

        Some(authority)
    }
}

fn split_user_info(user_info: Option<&str>) -> (Option<&str>, Option<&str>) {
    match user_info {
        None => (None, None),
        Some(user_info) => match user_info.split_once(':') {
            Some((user, password)) => (Some(user), Some(password)),
            None => (Some(user_info), None),
        },
    }
}

fn split_host_port(host_port: &str) -> (&str, Option<&str>) {
    if let Some(colon) = host_port.rfind(':') {
        let port = &host_port[colon + 1..];
        if port.bytes().all(|b| b.is_ascii_digit()) {
            return (&host_port[..colon], Some(port));
        }
    }
    (host_port, None)
}
