#![forbid(unsafe_code)]

//! Breakpoint labels.
//!
//! A [`Breakpoint`] is an opaque, symbolic size tier such as `"md"`. Labels
//! carry no ordering of their own: rank is the label's position in the
//! canonical `sizes` sequence of a [`ThresholdTable`](crate::ThresholdTable),
//! so two tables may order the same labels differently.
//!
//! The conventional six-tier names are available as associated constants
//! and borrow `'static` strings, so they never allocate.

use std::borrow::{Borrow, Cow};
use std::fmt;

use serde::{Deserialize, Serialize};

/// A symbolic size-tier name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Breakpoint(Cow<'static, str>);

impl Breakpoint {
    /// Extra small.
    pub const XS: Self = Self::from_static("xs");
    /// Small.
    pub const SM: Self = Self::from_static("sm");
    /// Medium.
    pub const MD: Self = Self::from_static("md");
    /// Large.
    pub const LG: Self = Self::from_static("lg");
    /// Extra large.
    pub const XL: Self = Self::from_static("xl");
    /// Extra extra large.
    pub const XXL: Self = Self::from_static("xxl");

    /// The conventional labels, smallest first.
    pub const STANDARD: [Self; 6] = [Self::XS, Self::SM, Self::MD, Self::LG, Self::XL, Self::XXL];

    /// Create a label from a static string without allocating.
    #[must_use]
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Create a label from any owned or borrowed string.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// The label's name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Breakpoint {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for Breakpoint {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl AsRef<str> for Breakpoint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Breakpoint {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Breakpoint {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Breakpoint {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
