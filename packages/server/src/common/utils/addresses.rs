//! Email address helpers shared by routing and composition.

/// Extract the bare address from a header value.
/// Handles formats like "Name <email@domain.com>" and plain "email@domain.com".
pub fn bare_address(value: &str) -> String {
    if let Some(start) = value.find('<') {
        if let Some(end) = value.find('>') {
            return value[start + 1..end].trim().to_lowercase();
        }
    }
    value.trim().to_lowercase()
}

/// The part before '@', e.g. "announce@lists.example.org" → "announce".
pub fn local_part(address: &str) -> &str {
    address.split('@').next().unwrap_or(address)
}

/// The part after '@', lowercased.
/// e.g. "announce@Lists.Example.org" → "lists.example.org"
pub fn domain_part(address: &str) -> Option<String> {
    address.split('@').nth(1).map(|d| d.to_lowercase())
}
