//! Parent PIN settings.
//!
//! # Responsibility
//! - Store a bcrypt hash of the shared parent PIN.
//! - Verify and change the PIN.
//!
//! # Invariants
//! - The plain PIN is never persisted or logged.
//! - Changing an existing PIN requires the current one.
//! - Any bcrypt variant (`$2a$`, `$2b$`, `$2y$`) already in `pin_hash` verifies.

use crate::repo::settings_repo::SettingsRepository;
use crate::service::ServiceResult;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PIN_HASH_KEY: &str = "pin_hash";
const MIN_PIN_LEN: usize = 4;

#[cfg(not(test))]
const PIN_HASH_COST: u32 = bcrypt::DEFAULT_COST;
#[cfg(test)]
const PIN_HASH_COST: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinError {
    TooShort,
    NotSet,
    CurrentRequired,
    CurrentMismatch,
    Hash(String),
}

impl PinError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::CurrentRequired | Self::CurrentMismatch)
    }
}

impl Display for PinError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooShort => write!(f, "PIN must be at least {MIN_PIN_LEN} digits"),
            Self::NotSet => f.write_str("No PIN set"),
            Self::CurrentRequired => f.write_str("Current PIN required"),
            Self::CurrentMismatch => f.write_str("Invalid current PIN"),
            Self::Hash(details) => write!(f, "PIN hashing failed: {details}"),
        }
    }
}

impl Error for PinError {}

pub struct PinService<R> {
    repo: R,
}

impl<R: SettingsRepository> PinService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn pin_exists(&self) -> ServiceResult<bool> {
        Ok(self.repo.get_setting(PIN_HASH_KEY)?.is_some())
    }

    /// Checks `pin` against the stored hash.
    ///
    /// # Errors
    /// - `PinError::NotSet` when no PIN has been configured.
    pub fn verify_pin(&self, pin: &str) -> ServiceResult<bool> {
        let stored = self.repo.get_setting(PIN_HASH_KEY)?.ok_or(PinError::NotSet)?;
        let valid = verify_pin_hash(pin, &stored);
        if !valid {
            warn!("event=pin_verify module=pin status=rejected");
        }
        Ok(valid)
    }

    /// Sets or changes the PIN.
    ///
    /// When a PIN exists, `current_pin` must be present and match it.
    pub fn set_pin(&self, new_pin: &str, current_pin: Option<&str>) -> ServiceResult<()> {
        if new_pin.chars().count() < MIN_PIN_LEN {
            return Err(PinError::TooShort.into());
        }

        if let Some(stored) = self.repo.get_setting(PIN_HASH_KEY)? {
            let current = current_pin
                .filter(|value| !value.is_empty())
                .ok_or(PinError::CurrentRequired)?;
            if !verify_pin_hash(current, &stored) {
                warn!("event=pin_set module=pin status=rejected reason=current_mismatch");
                return Err(PinError::CurrentMismatch.into());
            }
        }

        let hashed = bcrypt::hash(new_pin, PIN_HASH_COST)
            .map_err(|err| PinError::Hash(err.to_string()))?;
        self.repo.put_setting(PIN_HASH_KEY, &hashed)?;
        info!("event=pin_set module=pin status=ok");
        Ok(())
    }
}

/// A stored value that is not a bcrypt hash never verifies.
fn verify_pin_hash(pin: &str, stored: &str) -> bool {
    bcrypt::verify(pin, stored).unwrap_or(false)
}
