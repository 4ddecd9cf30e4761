//! Session token handling.

use std::fmt;

use zeroize::Zeroize;

/// Opaque bearer token for the authenticated session.
///
/// Deliberately not `Clone`, not serializable, and redacted in all formatting
/// output; memory is zeroed on drop. The token store owns the persisted copy.
/// Every other component re-reads the token per use instead of caching it, so
/// a concurrent logout is always observed.
pub struct SessionToken {
    inner: String,
}

impl SessionToken {
    /// Wrap a raw token string.
    ///
    /// Returns `None` for empty or all-whitespace input. A blank token can
    /// never authenticate, so it is treated the same as no session at all.
    pub fn new(value: String) -> Option<Self> {
        if value.trim().is_empty() {
            None
        } else {
            Some(Self { inner: value })
        }
    }

    /// Borrow the raw token for an outgoing request.
    pub fn expose(&self) -> &str {
        &self.inner
    }

    /// Consume and return the raw token string.
    pub fn into_inner(mut self) -> String {
        let mut tmp = String::new();
        std::mem::swap(&mut self.inner, &mut tmp);
        tmp
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Drop for SessionToken {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}
