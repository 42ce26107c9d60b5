use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use uno_core::errors::{ErrorInfo, UnoError};
use uno_core::ValueFormatter;

pub const DEFAULT_GROUP: &str = "Uno";
pub const DEFAULT_NAME: &str = "{method}({args}) == {expected}";

/// Options an [`crate::Evaluator`] is constructed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Label prefixed to passing messages.
    pub group: String,
    /// Name template used when a call supplies none.
    pub name: String,
    /// JSON-style encoding for arrays and objects in names and messages.
    pub structural: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            group: DEFAULT_GROUP.to_string(),
            name: DEFAULT_NAME.to_string(),
            structural: true,
        }
    }
}

/// Partial settings; present fields override on [`Settings::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structural: Option<bool>,
}

impl Settings {
    pub fn validate(&self) -> Result<(), UnoError> {
        if self.name.trim().is_empty() {
            return Err(UnoError::Settings(
                ErrorInfo::new("uno_host.settings_name", "default name template is empty")
                    .with_hint("use a template such as \"{method}({args}) == {expected}\""),
            ));
        }
        if self.group.trim().is_empty() {
            return Err(UnoError::Settings(ErrorInfo::new(
                "uno_host.settings_group",
                "group label is empty",
            )));
        }
        Ok(())
    }

    pub fn merge(&mut self, patch: SettingsPatch) -> &mut Self {
        if let Some(group) = patch.group {
            self.group = group;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(structural) = patch.structural {
            self.structural = structural;
        }
        self
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn formatter(&self) -> ValueFormatter {
        ValueFormatter::with_structural(self.structural)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, UnoError> {
        let settings: Settings = toml::from_str(contents).map_err(|err| {
            UnoError::Serde(ErrorInfo::new("uno_host.parse_settings", err.to_string()))
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_toml_string(&self) -> Result<String, UnoError> {
        toml::to_string_pretty(self).map_err(|err| {
            UnoError::Serde(ErrorInfo::new(
                "uno_host.settings_serialize",
                err.to_string(),
            ))
        })
    }
}

pub fn load_settings(path: &Path) -> Result<Settings, UnoError> {
    let contents = fs::read_to_string(path).map_err(|err| {
        UnoError::Settings(
            ErrorInfo::new(
                "uno_host.read_settings",
                format!("failed to read settings: {err}"),
            )
            .with_context("path", path.display().to_string()),
        )
    })?;
    Settings::from_toml_str(&contents).map_err(|err| match err {
        UnoError::Serde(info) => {
            UnoError::Serde(info.with_context("path", path.display().to_string()))
        }
        other => other,
    })
}

pub fn load_settings_patch(path: &Path) -> Result<SettingsPatch, UnoError> {
    let contents = fs::read_to_string(path).map_err(|err| {
        UnoError::Settings(
            ErrorInfo::new(
                "uno_host.read_settings",
                format!("failed to read settings: {err}"),
            )
            .with_context("path", path.display().to_string()),
        )
    })?;
    toml::from_str(&contents).map_err(|err| {
        UnoError::Serde(
            ErrorInfo::new("uno_host.parse_settings", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}
