//! # Mapping Store Module
//!
//! Persistence seam for mapping profiles.
//!
//! The core does not design an on-disk format; it invokes `save` and `load`
//! on a [`MappingStore`] collaborator and inspects the returned profile's
//! discriminator. [`TomlProfileStore`] is the stock implementation, writing
//! whatever `serde`/`toml` produce.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[cfg(test)]
use mockall::automock;

use crate::error::Result;
use crate::mapping::{JoystickMapping, KeyboardMapping};

/// Tagged envelope for a persisted mapping, discriminated by device kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MappingProfile {
    Keyboard(KeyboardMapping),
    Joystick(JoystickMapping),
}

impl MappingProfile {
    /// Static name of the profile's device kind, for logs and errors.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Keyboard(_) => "keyboard",
            Self::Joystick(_) => "joystick",
        }
    }

    /// Display name carried inside the profile.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Keyboard(mapping) => &mapping.name,
            Self::Joystick(mapping) => &mapping.name,
        }
    }
}

/// Operations the core invokes on a mapping store.
#[cfg_attr(test, automock)]
pub trait MappingStore {
    /// Persists `profile` at `path`.
    fn save(&self, path: &Path, profile: &MappingProfile) -> Result<()>;

    /// Loads the profile stored at `path`.
    fn load(&self, path: &Path) -> Result<MappingProfile>;
}

/// File-backed store using TOML via serde.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlProfileStore;

impl MappingStore for TomlProfileStore {
    fn save(&self, path: &Path, profile: &MappingProfile) -> Result<()> {
        let contents = toml::to_string_pretty(profile)?;
        fs::write(path, contents)?;
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<MappingProfile> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}
