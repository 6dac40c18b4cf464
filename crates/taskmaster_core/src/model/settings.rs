//! Typed user settings.
//!
//! # Responsibility
//! - Enumerate every recognized dashboard option with its type.
//! - Parse single `key=value` changes from loosely typed input.
//! - Encode/decode the settings JSON document.
//!
//! # Invariants
//! - Unknown keys are rejected, never stored.
//! - `font_size` stays within `FONT_SIZE_MIN..=FONT_SIZE_MAX`.
//! - A change always produces a whole new `Settings` value.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const FONT_SIZE_MIN: u8 = 12;
pub const FONT_SIZE_MAX: u8 = 20;
const FONT_SIZE_DEFAULT: u8 = 14;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    UnknownKey(String),
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
    InvalidDocument(String),
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownKey(key) => write!(f, "unknown setting `{key}`"),
            Self::InvalidValue {
                key,
                value,
                expected,
            } => write!(f, "invalid value `{value}` for `{key}`; expected {expected}"),
            Self::InvalidDocument(message) => write!(f, "invalid settings document: {message}"),
        }
    }
}

impl Error for SettingsError {}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Blue,
    Green,
    Purple,
    Orange,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Purple => "purple",
            Self::Orange => "orange",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "blue" => Some(Self::Blue),
            "green" => Some(Self::Green),
            "purple" => Some(Self::Purple),
            "orange" => Some(Self::Orange),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
    De,
    Sk,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::De => "de",
            Self::Sk => "sk",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            "fr" => Some(Self::Fr),
            "de" => Some(Self::De),
            "sk" => Some(Self::Sk),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFormat {
    #[default]
    #[serde(rename = "12h")]
    TwelveHour,
    #[serde(rename = "24h")]
    TwentyFourHour,
}

impl TimeFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TwelveHour => "12h",
            Self::TwentyFourHour => "24h",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "12h" => Some(Self::TwelveHour),
            "24h" => Some(Self::TwentyFourHour),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFormat {
    #[default]
    Mdy,
    Dmy,
    Ymd,
}

impl DateFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mdy => "mdy",
            Self::Dmy => "dmy",
            Self::Ymd => "ymd",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mdy" => Some(Self::Mdy),
            "dmy" => Some(Self::Dmy),
            "ymd" => Some(Self::Ymd),
            _ => None,
        }
    }
}

/// Every dashboard option, serialized with camelCase keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Settings {
    pub notifications: bool,
    pub dark_mode: bool,
    pub compact_view: bool,
    pub sound_effects: bool,
    pub auto_save: bool,
    pub theme: Theme,
    pub font_size: u8,
    pub language: Language,
    pub email_notifications: bool,
    pub task_reminders: bool,
    pub weekly_digest: bool,
    pub data_backup: bool,
    pub analytics_tracking: bool,
    pub keyboard_shortcuts: bool,
    pub animations_enabled: bool,
    pub auto_sync: bool,
    pub time_format: TimeFormat,
    pub date_format: DateFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notifications: true,
            dark_mode: false,
            compact_view: false,
            sound_effects: true,
            auto_save: true,
            theme: Theme::Blue,
            font_size: FONT_SIZE_DEFAULT,
            language: Language::En,
            email_notifications: true,
            task_reminders: true,
            weekly_digest: false,
            data_backup: true,
            analytics_tracking: false,
            keyboard_shortcuts: true,
            animations_enabled: true,
            auto_sync: true,
            time_format: TimeFormat::TwelveHour,
            date_format: DateFormat::Mdy,
        }
    }
}

/// Name of one recognized option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    Notifications,
    DarkMode,
    CompactView,
    SoundEffects,
    AutoSave,
    Theme,
    FontSize,
    Language,
    EmailNotifications,
    TaskReminders,
    WeeklyDigest,
    DataBackup,
    AnalyticsTracking,
    KeyboardShortcuts,
    AnimationsEnabled,
    AutoSync,
    TimeFormat,
    DateFormat,
}

impl SettingKey {
    pub const ALL: [SettingKey; 18] = [
        Self::Notifications,
        Self::DarkMode,
        Self::CompactView,
        Self::SoundEffects,
        Self::AutoSave,
        Self::Theme,
        Self::FontSize,
        Self::Language,
        Self::EmailNotifications,
        Self::TaskReminders,
        Self::WeeklyDigest,
        Self::DataBackup,
        Self::AnalyticsTracking,
        Self::KeyboardShortcuts,
        Self::AnimationsEnabled,
        Self::AutoSync,
        Self::TimeFormat,
        Self::DateFormat,
    ];

    /// camelCase key as stored in the settings document.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Notifications => "notifications",
            Self::DarkMode => "darkMode",
            Self::CompactView => "compactView",
            Self::SoundEffects => "soundEffects",
            Self::AutoSave => "autoSave",
            Self::Theme => "theme",
            Self::FontSize => "fontSize",
            Self::Language => "language",
            Self::EmailNotifications => "emailNotifications",
            Self::TaskReminders => "taskReminders",
            Self::WeeklyDigest => "weeklyDigest",
            Self::DataBackup => "dataBackup",
            Self::AnalyticsTracking => "analyticsTracking",
            Self::KeyboardShortcuts => "keyboardShortcuts",
            Self::AnimationsEnabled => "animationsEnabled",
            Self::AutoSync => "autoSync",
            Self::TimeFormat => "timeFormat",
            Self::DateFormat => "dateFormat",
        }
    }

    /// snake_case spelling of the canonical key, e.g. `dark_mode`.
    pub fn snake_case(self) -> String {
        let mut out = String::new();
        for ch in self.as_str().chars() {
            if ch.is_ascii_uppercase() {
                out.push('_');
                out.push(ch.to_ascii_lowercase());
            } else {
                out.push(ch);
            }
        }
        out
    }

    /// Accepts the camelCase key or its snake_case spelling.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == value || key.snake_case() == value)
    }
}

/// One typed option change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingChange {
    Notifications(bool),
    DarkMode(bool),
    CompactView(bool),
    SoundEffects(bool),
    AutoSave(bool),
    Theme(Theme),
    FontSize(u8),
    Language(Language),
    EmailNotifications(bool),
    TaskReminders(bool),
    WeeklyDigest(bool),
    DataBackup(bool),
    AnalyticsTracking(bool),
    KeyboardShortcuts(bool),
    AnimationsEnabled(bool),
    AutoSync(bool),
    TimeFormat(TimeFormat),
    DateFormat(DateFormat),
}

impl SettingChange {
    /// Parses a loosely typed `key=value` pair.
    ///
    /// # Errors
    /// - `UnknownKey` for keys outside [`SettingKey::ALL`].
    /// - `InvalidValue` for ill-typed or out-of-range values.
    pub fn parse(key: &str, value: &str) -> Result<Self, SettingsError> {
        let key = SettingKey::parse(key).ok_or_else(|| SettingsError::UnknownKey(key.to_string()))?;
        let change = match key {
            SettingKey::Notifications => Self::Notifications(parse_bool(key, value)?),
            SettingKey::DarkMode => Self::DarkMode(parse_bool(key, value)?),
            SettingKey::CompactView => Self::CompactView(parse_bool(key, value)?),
            SettingKey::SoundEffects => Self::SoundEffects(parse_bool(key, value)?),
            SettingKey::AutoSave => Self::AutoSave(parse_bool(key, value)?),
            SettingKey::Theme => Self::Theme(
                Theme::parse(value).ok_or_else(|| invalid(key, value, "blue|green|purple|orange"))?,
            ),
            SettingKey::FontSize => Self::FontSize(parse_font_size(value)?),
            SettingKey::Language => Self::Language(
                Language::parse(value).ok_or_else(|| invalid(key, value, "en|es|fr|de|sk"))?,
            ),
            SettingKey::EmailNotifications => Self::EmailNotifications(parse_bool(key, value)?),
            SettingKey::TaskReminders => Self::TaskReminders(parse_bool(key, value)?),
            SettingKey::WeeklyDigest => Self::WeeklyDigest(parse_bool(key, value)?),
            SettingKey::DataBackup => Self::DataBackup(parse_bool(key, value)?),
            SettingKey::AnalyticsTracking => Self::AnalyticsTracking(parse_bool(key, value)?),
            SettingKey::KeyboardShortcuts => Self::KeyboardShortcuts(parse_bool(key, value)?),
            SettingKey::AnimationsEnabled => Self::AnimationsEnabled(parse_bool(key, value)?),
            SettingKey::AutoSync => Self::AutoSync(parse_bool(key, value)?),
            SettingKey::TimeFormat => Self::TimeFormat(
                TimeFormat::parse(value).ok_or_else(|| invalid(key, value, "12h|24h"))?,
            ),
            SettingKey::DateFormat => Self::DateFormat(
                DateFormat::parse(value).ok_or_else(|| invalid(key, value, "mdy|dmy|ymd"))?,
            ),
        };
        Ok(change)
    }
}

impl Settings {
    /// Returns a new settings value with one option replaced.
    pub fn with_change(&self, change: SettingChange) -> Result<Self, SettingsError> {
        let mut next = self.clone();
        match change {
            SettingChange::Notifications(value) => next.notifications = value,
            SettingChange::DarkMode(value) => next.dark_mode = value,
            SettingChange::CompactView(value) => next.compact_view = value,
            SettingChange::SoundEffects(value) => next.sound_effects = value,
            SettingChange::AutoSave(value) => next.auto_save = value,
            SettingChange::Theme(value) => next.theme = value,
            SettingChange::FontSize(value) => next.font_size = value,
            SettingChange::Language(value) => next.language = value,
            SettingChange::EmailNotifications(value) => next.email_notifications = value,
            SettingChange::TaskReminders(value) => next.task_reminders = value,
            SettingChange::WeeklyDigest(value) => next.weekly_digest = value,
            SettingChange::DataBackup(value) => next.data_backup = value,
            SettingChange::AnalyticsTracking(value) => next.analytics_tracking = value,
            SettingChange::KeyboardShortcuts(value) => next.keyboard_shortcuts = value,
            SettingChange::AnimationsEnabled(value) => next.animations_enabled = value,
            SettingChange::AutoSync(value) => next.auto_sync = value,
            SettingChange::TimeFormat(value) => next.time_format = value,
            SettingChange::DateFormat(value) => next.date_format = value,
        }
        next.validate()?;
        Ok(next)
    }

    /// Checks value ranges that the type system does not cover.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(FONT_SIZE_MIN..=FONT_SIZE_MAX).contains(&self.font_size) {
            return Err(invalid(
                SettingKey::FontSize,
                &self.font_size.to_string(),
                "an integer in 12..=20",
            ));
        }
        Ok(())
    }

    /// Display form of one option's current value.
    pub fn value(&self, key: SettingKey) -> String {
        match key {
            SettingKey::Notifications => self.notifications.to_string(),
            SettingKey::DarkMode => self.dark_mode.to_string(),
            SettingKey::CompactView => self.compact_view.to_string(),
            SettingKey::SoundEffects => self.sound_effects.to_string(),
            SettingKey::AutoSave => self.auto_save.to_string(),
            SettingKey::Theme => self.theme.as_str().to_string(),
            SettingKey::FontSize => self.font_size.to_string(),
            SettingKey::Language => self.language.as_str().to_string(),
            SettingKey::EmailNotifications => self.email_notifications.to_string(),
            SettingKey::TaskReminders => self.task_reminders.to_string(),
            SettingKey::WeeklyDigest => self.weekly_digest.to_string(),
            SettingKey::DataBackup => self.data_backup.to_string(),
            SettingKey::AnalyticsTracking => self.analytics_tracking.to_string(),
            SettingKey::KeyboardShortcuts => self.keyboard_shortcuts.to_string(),
            SettingKey::AnimationsEnabled => self.animations_enabled.to_string(),
            SettingKey::AutoSync => self.auto_sync.to_string(),
            SettingKey::TimeFormat => self.time_format.as_str().to_string(),
            SettingKey::DateFormat => self.date_format.as_str().to_string(),
        }
    }

    /// Encodes the settings document.
    pub fn to_json(&self) -> Result<String, SettingsError> {
        serde_json::to_string(self).map_err(|err| SettingsError::InvalidDocument(err.to_string()))
    }

    /// Decodes and validates a settings document.
    ///
    /// Missing keys take their default; unknown keys are rejected.
    pub fn from_json(document: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(document)
            .map_err(|err| SettingsError::InvalidDocument(err.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }
}

fn parse_bool(key: SettingKey, value: &str) -> Result<bool, SettingsError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(invalid(key, value, "true|false")),
    }
}

fn parse_font_size(value: &str) -> Result<u8, SettingsError> {
    value
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|size| (FONT_SIZE_MIN..=FONT_SIZE_MAX).contains(size))
        .ok_or_else(|| invalid(SettingKey::FontSize, value, "an integer in 12..=20"))
}

fn invalid(key: SettingKey, value: &str, expected: &'static str) -> SettingsError {
    SettingsError::InvalidValue {
        key: key.as_str(),
        value: value.to_string(),
        expected,
    }
}
