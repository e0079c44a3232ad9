//! Contains names via the [`Name`] type.

use internment::Intern;
use std::fmt::{self, Display, Formatter};
use std::ops::Deref;

/// An interned, lower-cased PDDL identifier. PDDL is case-insensitive, so all
/// names are normalised on construction.
#[derive(Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Name(Intern<String>);

impl Name {
    #[inline(always)]
    pub fn new(name: &str) -> Self {
        Self(Intern::new(name.to_lowercase()))
    }

    #[inline(always)]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::new("")
    }
}

impl From<&str> for Name {
    #[inline(always)]
    fn from(value: &str) -> Self {
        Name::new(value)
    }
}

impl From<String> for Name {
    #[inline(always)]
    fn from(value: String) -> Self {
        Name::new(&value)
    }
}

impl From<&String> for Name {
    #[inline(always)]
    fn from(value: &String) -> Self {
        Name::new(value)
    }
}

impl AsRef<str> for Name {
    #[inline(always)]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Deref for Name {
    type Target = str;

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other.to_lowercase()
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == other.to_lowercase()
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Hide the interning details from debug output.
impl fmt::Debug for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}
