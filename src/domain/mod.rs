//! Apex domain resolution.
//!
//! Uses the Public Suffix List (via the `psl` crate) to find the registrable
//! domain of a hostname, e.g. `www.example.co.uk` → `example.co.uk`.

use crate::error_handling::ApexError;

/// Returns the registrable ("apex") domain of `domain`.
///
/// The input is trimmed, lowercased and stripped of a single trailing dot
/// before lookup, so `WWW.Example.COM.` resolves to `example.com`.
///
/// # Errors
///
/// Returns an error for blank input, IP addresses, and names that are a
/// public suffix themselves (such as `co.uk`).
pub fn effective_apex(domain: &str) -> Result<String, ApexError> {
    let host = domain.trim();
    let host = host.strip_suffix('.').unwrap_or(host).to_ascii_lowercase();
    if host.is_empty() {
        return Err(ApexError::Empty);
    }

    // Reject IP addresses (they don't have registrable domains)
    if host.parse::<std::net::IpAddr>().is_ok()
        || host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .is_some_and(|h| h.parse::<std::net::Ipv6Addr>().is_ok())
    {
        return Err(ApexError::IpAddress(host));
    }

    match psl::domain_str(&host) {
        Some(apex) => Ok(apex.to_string()),
        None => Err(ApexError::NoRegistrableDomain(host)),
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
