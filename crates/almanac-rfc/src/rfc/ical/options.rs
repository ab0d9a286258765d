//! Reader and writer options.

use almanac_core::config::{ReaderConfig, WriterConfig};

use super::build::MAX_LINE_OCTETS;
use super::core::ICalVersion;
use crate::error::{RfcError, RfcResult};

fn version_from(text: &str) -> RfcResult<ICalVersion> {
    ICalVersion::parse(text).ok_or_else(|| RfcError::InvalidVersion(text.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Decode `^n`, `^^` and `^'` inside parameter values.
    pub caret_encoding: bool,
    /// Version in effect until a document declares VERSION.
    pub default_version: ICalVersion,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            caret_encoding: true,
            default_version: ICalVersion::V2_0,
        }
    }
}

impl ReaderOptions {
    #[must_use]
    pub fn with_caret_encoding(mut self, enabled: bool) -> Self {
        self.caret_encoding = enabled;
        self
    }

    #[must_use]
    pub fn with_default_version(mut self, version: ICalVersion) -> Self {
        self.default_version = version;
        self
    }
}

impl TryFrom<&ReaderConfig> for ReaderOptions {
    type Error = RfcError;

    fn try_from(config: &ReaderConfig) -> RfcResult<Self> {
        Ok(Self {
            caret_encoding: config.caret_encoding,
            default_version: version_from(&config.default_version)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterOptions {
    pub version: ICalVersion,
    /// Encode `^`, newlines and `"` in parameter values.
    pub caret_encoding: bool,
    /// Fold threshold in octets; 0 disables folding.
    pub fold_line_length: usize,
    /// PRODID written when the calendar has none. Defaults per version.
    pub product_id: Option<String>,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            version: ICalVersion::V2_0,
            caret_encoding: false,
            fold_line_length: MAX_LINE_OCTETS,
            product_id: None,
        }
    }
}

impl WriterOptions {
    #[must_use]
    pub fn with_version(mut self, version: ICalVersion) -> Self {
        self.version = version;
        self
    }

    #[must_use]
    pub fn with_caret_encoding(mut self, enabled: bool) -> Self {
        self.caret_encoding = enabled;
        self
    }

    #[must_use]
    pub fn with_fold_line_length(mut self, octets: usize) -> Self {
        self.fold_line_length = octets;
        self
    }

    #[must_use]
    pub fn with_product_id(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    /// PRODID to write when the calendar does not carry one.
    #[must_use]
    pub fn product_id(&self) -> &str {
        self.product_id
            .as_deref()
            .unwrap_or(self.version.default_product_id())
    }
}

impl TryFrom<&WriterConfig> for WriterOptions {
    type Error = RfcError;

    fn try_from(config: &WriterConfig) -> RfcResult<Self> {
        Ok(Self {
            version: version_from(&config.version)?,
            caret_encoding: config.caret_encoding,
            fold_line_length: config.fold_line_length,
            product_id: config.product_id.clone(),
        })
    }
}
