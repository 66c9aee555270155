//! Value types used in [`GitRepo`](crate::GitRepo) signatures.

use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// BranchName
// ---------------------------------------------------------------------------

/// A short branch name as shown by `git branch` (e.g. `main`, `feature/a`).
///
/// Slash-separated names are "sub-branches"; each `/` becomes a nested
/// directory under the snapshot root.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    /// Create a new `BranchName`, validating that it can name a directory.
    ///
    /// # Errors
    /// Returns an error if the name is empty, has empty or relative (`.`,
    /// `..`) segments, or contains a backslash or NUL byte.
    pub fn new(name: &str) -> Result<Self, BranchNameError> {
        Self::validate(name)?;
        Ok(Self(name.to_owned()))
    }

    /// Return the branch name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the name contains at least one `/`.
    #[must_use]
    pub fn is_hierarchical(&self) -> bool {
        self.0.contains('/')
    }

    /// Iterate over the `/`-separated segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    fn validate(name: &str) -> Result<(), BranchNameError> {
        let reject = |reason: &str| {
            Err(BranchNameError {
                value: name.to_owned(),
                reason: reason.to_owned(),
            })
        };
        if name.is_empty() {
            return reject("branch name must not be empty");
        }
        if name.contains(['\\', '\0']) {
            return reject("branch name must not contain '\\' or NUL");
        }
        if name
            .split('/')
            .any(|seg| seg.is_empty() || seg == "." || seg == "..")
        {
            return reject("branch name segments must be non-empty and not '.' or '..'");
        }
        Ok(())
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for BranchName {
    type Err = BranchNameError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Error from validating a [`BranchName`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BranchNameError {
    /// The invalid value.
    pub value: String,
    /// Why it was rejected.
    pub reason: String,
}

impl fmt::Display for BranchNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid branch name {:?}: {}", self.value, self.reason)
    }
}

impl std::error::Error for BranchNameError {}
