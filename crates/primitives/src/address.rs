#[cfg(test)]
#[path = "tests/address.rs"]
mod tests;

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::is_token;

/// Content-derived identifier of a blob or directory tree.
///
/// Two addresses are equal iff their identifier strings are byte-equal.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentAddress(String);

impl ContentAddress {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("invalid content address {0:?}: must be a non-empty string without whitespace")]
pub struct InvalidContentAddress(String);

impl TryFrom<String> for ContentAddress {
    type Error = InvalidContentAddress;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if !is_token(&value) {
            return Err(InvalidContentAddress(value));
        }

        Ok(Self(value))
    }
}

impl FromStr for ContentAddress {
    type Err = InvalidContentAddress;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.to_owned().try_into()
    }
}

impl From<ContentAddress> for String {
    fn from(address: ContentAddress) -> Self {
        address.0
    }
}

impl AsRef<str> for ContentAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}
