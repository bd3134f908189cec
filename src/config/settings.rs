//! Engine-wide settings loaded from TOML.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AmmError;

/// Default domain separator for address derivation.
pub const DEFAULT_NAMESPACE: &str = "xy-amm/v1";

/// How many LP tokens the first deposit into an empty pool mints.
///
/// The caller always contributes exactly `max_x` and `max_y`; the policy
/// only decides the LP side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstDepositPolicy {
    /// Mint `isqrt(max_x × max_y)`; the requested amount is a lower bound.
    #[default]
    GeometricMean,
    /// Mint exactly the requested amount.
    Requested,
}

impl fmt::Display for FirstDepositPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GeometricMean => write!(f, "geometric_mean"),
            Self::Requested => write!(f, "requested"),
        }
    }
}

/// Settings shared by every pool an engine manages.
///
/// Unknown keys are rejected and missing keys take their defaults, so an
/// empty document is a valid configuration.
///
/// # Examples
///
/// ```
/// use xy_amm::config::{EngineSettings, FirstDepositPolicy};
///
/// let settings = EngineSettings::from_toml_str(r#"first_deposit = "requested""#)
///     .expect("valid settings");
/// assert_eq!(settings.first_deposit, FirstDepositPolicy::Requested);
/// assert_eq!(settings.namespace, "xy-amm/v1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSettings {
    /// Domain separator mixed into every derived address.
    pub namespace: String,
    /// LP issuance rule for the first deposit.
    pub first_deposit: FirstDepositPolicy,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_owned(),
            first_deposit: FirstDepositPolicy::default(),
        }
    }
}

impl EngineSettings {
    /// Default settings with a different first-deposit policy.
    #[must_use]
    pub fn with_first_deposit(policy: FirstDepositPolicy) -> Self {
        Self {
            first_deposit: policy,
            ..Self::default()
        }
    }

    /// Parses and validates settings from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the document does not
    /// parse, contains unknown keys, or fails [`validate`](Self::validate).
    pub fn from_toml_str(input: &str) -> Result<Self, AmmError> {
        let settings: Self = toml::from_str(input)
            .map_err(|e| AmmError::InvalidConfiguration(e.message().to_owned()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `namespace` is empty
    /// or only whitespace.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.namespace.trim().is_empty() {
            return Err(AmmError::InvalidConfiguration(
                "namespace must not be empty".to_owned(),
            ));
        }
        Ok(())
    }
}
