use serde::{Deserialize, Serialize};

use crate::domain::ZeroQuantityPolicy;

use super::PasswordScheme;

/// Runtime behaviour switches for the tracker service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Zero-unit profit simulations are rejected unless set to `Allow`.
    pub zero_quantity: ZeroQuantityPolicy,
    /// How passwords are stored and checked.
    pub password_scheme: PasswordScheme,
}

impl TrackerConfig {
    pub fn with_zero_quantity(mut self, policy: ZeroQuantityPolicy) -> Self {
        self.zero_quantity = policy;
        self
    }

    pub fn with_password_scheme(mut self, scheme: PasswordScheme) -> Self {
        self.password_scheme = scheme;
        self
    }
}
