use std::fmt;

use crate::{IncompatibleVersion, Version};

/// Version range an adapter has been written and validated against.
///
/// Versions below `minimum` are rejected because bookkeeping SQL may run
/// incorrectly on them. Versions above `maximum` are allowed but produce an
/// [`UpgradeAdvisory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportedVersions {
    pub product: &'static str,
    pub minimum: Option<Version>,
    pub maximum: Option<Version>,
}

impl SupportedVersions {
    #[must_use]
    pub const fn new(product: &'static str) -> Self {
        Self {
            product,
            minimum: None,
            maximum: None,
        }
    }

    #[must_use]
    pub const fn minimum(mut self, major: u16, minor: u16) -> Self {
        self.minimum = Some(Version::new(major, minor));
        self
    }

    #[must_use]
    pub const fn maximum(mut self, major: u16, minor: u16) -> Self {
        self.maximum = Some(Version::new(major, minor));
        self
    }

    pub fn check(
        &self,
        version: Version,
    ) -> std::result::Result<Option<UpgradeAdvisory>, IncompatibleVersion> {
        if let Some(minimum) = self.minimum
            && version < minimum
        {
            return Err(IncompatibleVersion {
                product: self.product.to_string(),
                version,
                minimum,
            });
        }

        Ok(self
            .maximum
            .filter(|maximum| version > *maximum)
            .map(|maximum| UpgradeAdvisory {
                product: self.product.to_string(),
                version,
                maximum,
            }))
    }
}

/// Non-fatal notice that the live server is newer than anything the adapter
/// was validated against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeAdvisory {
    pub product: String,
    pub version: Version,
    pub maximum: Version,
}

impl fmt::Display for UpgradeAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} is newer than this version of shiftql supports (validated up to {}); \
             consider upgrading shiftql",
            self.product, self.version, self.maximum
        )
    }
}
