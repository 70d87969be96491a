//! Grid geometry and item sizing.
//!
//! `GridConfig` is the single aggregate behind every form control. All
//! textual input goes through [`GridConfig::set_field`], which clamps or
//! falls back instead of failing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_COLUMNS: u32 = 5;
pub const DEFAULT_ROWS: u32 = 5;
pub const DEFAULT_GAP: u32 = 8;
/// Upper bound for columns and rows.
pub const MAX_TRACKS: u32 = 1000;

/// Length used when an item size is switched to `custom`.
pub const DEFAULT_CUSTOM_ITEM_SIZE: Length = Length::px(100.0);

/// CSS length unit offered by the size controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    #[default]
    Px,
    Percent,
    Vw,
    Vh,
    Em,
    Rem,
}

impl Unit {
    pub const ALL: [Unit; 6] = [Unit::Px, Unit::Percent, Unit::Vw, Unit::Vh, Unit::Em, Unit::Rem];

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Px => "px",
            Unit::Percent => "%",
            Unit::Vw => "vw",
            Unit::Vh => "vh",
            Unit::Em => "em",
            Unit::Rem => "rem",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = ParseLengthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Unit::ALL
            .into_iter()
            .find(|u| u.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseLengthError::UnknownUnit(s.to_string()))
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseLengthError {
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("unknown unit '{0}' (expected one of px, %, vw, vh, em, rem)")]
    UnknownUnit(String),
    #[error("length '{0}' is negative")]
    Negative(String),
}

/// A non-negative value with a unit, rendered without a space (`500px`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    pub value: f64,
    pub unit: Unit,
}

impl Length {
    pub const fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub const fn px(value: f64) -> Self {
        Self::new(value, Unit::Px)
    }

    pub const fn percent(value: f64) -> Self {
        Self::new(value, Unit::Percent)
    }

    fn clamped(self) -> Self {
        Self {
            value: clamp_non_negative(self.value),
            unit: self.unit,
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

impl FromStr for Length {
    type Err = ParseLengthError;

    /// Strict parse used for layout documents: a number followed by an
    /// optional unit (pixels when omitted).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (number, rest) = split_leading_float(trimmed)
            .ok_or_else(|| ParseLengthError::NotANumber(trimmed.to_string()))?;
        let value: f64 = number
            .parse()
            .map_err(|_| ParseLengthError::NotANumber(trimmed.to_string()))?;
        if value < 0.0 {
            return Err(ParseLengthError::Negative(trimmed.to_string()));
        }
        let unit = if rest.trim().is_empty() {
            Unit::Px
        } else {
            rest.parse()?
        };
        Ok(Length::new(value, unit))
    }
}

impl Serialize for Length {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Length {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct LengthVisitor;

        impl Visitor<'_> for LengthVisitor {
            type Value = Length;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a length such as \"500px\" or a number of pixels")
            }

            fn visit_str<E>(self, value: &str) -> Result<Length, E>
            where
                E: de::Error,
            {
                value.parse().map_err(de::Error::custom)
            }

            fn visit_u64<E>(self, value: u64) -> Result<Length, E>
            where
                E: de::Error,
            {
                Ok(Length::px(value as f64))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Length, E>
            where
                E: de::Error,
            {
                if value < 0 {
                    return Err(de::Error::custom(ParseLengthError::Negative(value.to_string())));
                }
                Ok(Length::px(value as f64))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Length, E>
            where
                E: de::Error,
            {
                if value < 0.0 {
                    return Err(de::Error::custom(ParseLengthError::Negative(value.to_string())));
                }
                Ok(Length::px(value))
            }
        }

        deserializer.deserialize_any(LengthVisitor)
    }
}

/// Size applied to every generated item rule.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ItemSize {
    Auto,
    /// Fills the track (`100%`).
    #[default]
    Fill,
    Custom(Length),
}

/// The mode half of an [`ItemSize`], as offered by the mode selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemSizeMode {
    Auto,
    Fill,
    Custom,
}

impl FromStr for ItemSizeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ItemSizeMode::Auto),
            "fill" | "100%" => Ok(ItemSizeMode::Fill),
            "custom" => Ok(ItemSizeMode::Custom),
            other => Err(format!("unknown item size mode '{}'", other)),
        }
    }
}

impl ItemSize {
    pub fn mode(&self) -> ItemSizeMode {
        match self {
            ItemSize::Auto => ItemSizeMode::Auto,
            ItemSize::Fill => ItemSizeMode::Fill,
            ItemSize::Custom(_) => ItemSizeMode::Custom,
        }
    }

    /// The CSS value emitted for this size.
    pub fn resolve(&self) -> String {
        match self {
            ItemSize::Auto => "auto".to_string(),
            ItemSize::Fill => "100%".to_string(),
            ItemSize::Custom(length) => length.to_string(),
        }
    }

    /// Switch to `mode`. Leaving custom saves the length into `last_custom`,
    /// and entering custom restores it.
    fn switch_mode(&mut self, mode: ItemSizeMode, last_custom: &mut Length) {
        if let ItemSize::Custom(length) = *self {
            *last_custom = length;
        }
        *self = match mode {
            ItemSizeMode::Auto => ItemSize::Auto,
            ItemSizeMode::Fill => ItemSize::Fill,
            ItemSizeMode::Custom => ItemSize::Custom(*last_custom),
        };
    }
}

impl Serialize for ItemSize {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            ItemSize::Auto => serializer.serialize_str("auto"),
            ItemSize::Fill => serializer.serialize_str("fill"),
            ItemSize::Custom(length) => serializer.collect_str(length),
        }
    }
}

impl<'de> Deserialize<'de> for ItemSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Length(Length),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Length(length) => Ok(ItemSize::Custom(length)),
            Raw::Text(text) => match text.parse::<ItemSizeMode>() {
                Ok(ItemSizeMode::Auto) => Ok(ItemSize::Auto),
                Ok(ItemSizeMode::Fill) => Ok(ItemSize::Fill),
                Ok(ItemSizeMode::Custom) => Ok(ItemSize::Custom(DEFAULT_CUSTOM_ITEM_SIZE)),
                Err(_) => text
                    .parse::<Length>()
                    .map(ItemSize::Custom)
                    .map_err(serde::de::Error::custom),
            },
        }
    }
}

/// One editable control of the configuration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    Columns,
    Rows,
    Gap,
    ContainerWidth,
    ContainerWidthUnit,
    ContainerHeight,
    ContainerHeightUnit,
    ItemWidthMode,
    ItemWidthValue,
    ItemWidthUnit,
    ItemHeightMode,
    ItemHeightValue,
    ItemHeightUnit,
}

impl ConfigField {
    pub const ALL: [ConfigField; 13] = [
        ConfigField::Columns,
        ConfigField::Rows,
        ConfigField::Gap,
        ConfigField::ContainerWidth,
        ConfigField::ContainerWidthUnit,
        ConfigField::ContainerHeight,
        ConfigField::ContainerHeightUnit,
        ConfigField::ItemWidthMode,
        ConfigField::ItemWidthValue,
        ConfigField::ItemWidthUnit,
        ConfigField::ItemHeightMode,
        ConfigField::ItemHeightValue,
        ConfigField::ItemHeightUnit,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ConfigField::Columns => "columns",
            ConfigField::Rows => "rows",
            ConfigField::Gap => "gap",
            ConfigField::ContainerWidth => "container-width",
            ConfigField::ContainerWidthUnit => "container-width-unit",
            ConfigField::ContainerHeight => "container-height",
            ConfigField::ContainerHeightUnit => "container-height-unit",
            ConfigField::ItemWidthMode => "item-width-mode",
            ConfigField::ItemWidthValue => "item-width-value",
            ConfigField::ItemWidthUnit => "item-width-unit",
            ConfigField::ItemHeightMode => "item-height-mode",
            ConfigField::ItemHeightValue => "item-height-value",
            ConfigField::ItemHeightUnit => "item-height-unit",
        }
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConfigField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('_', "-").to_ascii_lowercase();
        ConfigField::ALL
            .into_iter()
            .find(|f| f.name() == wanted)
            .ok_or_else(|| format!("unknown config field '{}'", s.trim()))
    }
}

/// Typed partial update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigPatch {
    pub columns: Option<u32>,
    pub rows: Option<u32>,
    pub gap: Option<u32>,
    pub container_width: Option<Length>,
    pub container_height: Option<Length>,
    pub item_width: Option<ItemSize>,
    pub item_height: Option<ItemSize>,
}

/// Grid geometry and the global item size applied to every region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    pub columns: u32,
    pub rows: u32,
    /// Gap between tracks, in pixels.
    pub gap: u32,
    pub container_width: Length,
    pub container_height: Length,
    pub item_width: ItemSize,
    pub item_height: ItemSize,
    /// Custom lengths kept while an axis is in auto or fill mode.
    #[serde(skip)]
    last_custom_width: Length,
    #[serde(skip)]
    last_custom_height: Length,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            gap: DEFAULT_GAP,
            container_width: Length::percent(100.0),
            container_height: Length::px(500.0),
            item_width: ItemSize::Fill,
            item_height: ItemSize::Fill,
            last_custom_width: DEFAULT_CUSTOM_ITEM_SIZE,
            last_custom_height: DEFAULT_CUSTOM_ITEM_SIZE,
        }
    }
}

impl GridConfig {
    /// Apply raw text from a form control.
    ///
    /// Never fails: unparseable numbers fall back to the field minimum,
    /// out-of-range numbers are clamped, and unknown unit/mode text leaves
    /// the field as it was. Returns true if the config changed.
    pub fn set_field(&mut self, field: ConfigField, raw: &str) -> bool {
        let before = self.clone();

        match field {
            ConfigField::Columns => self.columns = clamp_tracks(lenient_count(raw, 1)),
            ConfigField::Rows => self.rows = clamp_tracks(lenient_count(raw, 1)),
            ConfigField::Gap => self.gap = lenient_count(raw, 0),
            ConfigField::ContainerWidth => self.container_width.value = lenient_length(raw),
            ConfigField::ContainerHeight => self.container_height.value = lenient_length(raw),
            ConfigField::ContainerWidthUnit => {
                if let Ok(unit) = raw.parse::<Unit>() {
                    self.container_width.unit = unit;
                }
            }
            ConfigField::ContainerHeightUnit => {
                if let Ok(unit) = raw.parse::<Unit>() {
                    self.container_height.unit = unit;
                }
            }
            ConfigField::ItemWidthMode => {
                if let Ok(mode) = raw.parse::<ItemSizeMode>() {
                    self.item_width.switch_mode(mode, &mut self.last_custom_width);
                }
            }
            ConfigField::ItemHeightMode => {
                if let Ok(mode) = raw.parse::<ItemSizeMode>() {
                    self.item_height.switch_mode(mode, &mut self.last_custom_height);
                }
            }
            ConfigField::ItemWidthValue => {
                if let ItemSize::Custom(length) = &mut self.item_width {
                    length.value = lenient_length(raw);
                }
            }
            ConfigField::ItemHeightValue => {
                if let ItemSize::Custom(length) = &mut self.item_height {
                    length.value = lenient_length(raw);
                }
            }
            ConfigField::ItemWidthUnit => {
                if let (ItemSize::Custom(length), Ok(unit)) =
                    (&mut self.item_width, raw.parse::<Unit>())
                {
                    length.unit = unit;
                }
            }
            ConfigField::ItemHeightUnit => {
                if let (ItemSize::Custom(length), Ok(unit)) =
                    (&mut self.item_height, raw.parse::<Unit>())
                {
                    length.unit = unit;
                }
            }
        }

        *self != before
    }

    /// Merge a typed partial update, clamping each field to its minimum.
    pub fn apply(&mut self, patch: &ConfigPatch) {
        if let Some(columns) = patch.columns {
            self.columns = clamp_tracks(columns);
        }
        if let Some(rows) = patch.rows {
            self.rows = clamp_tracks(rows);
        }
        if let Some(gap) = patch.gap {
            self.gap = gap;
        }
        if let Some(width) = patch.container_width {
            self.container_width = width.clamped();
        }
        if let Some(height) = patch.container_height {
            self.container_height = height.clamped();
        }
        if let Some(size) = patch.item_width {
            if let ItemSize::Custom(length) = self.item_width {
                self.last_custom_width = length;
            }
            self.item_width = clamp_item_size(size);
        }
        if let Some(size) = patch.item_height {
            if let ItemSize::Custom(length) = self.item_height {
                self.last_custom_height = length;
            }
            self.item_height = clamp_item_size(size);
        }
    }

    /// Copy with every field pulled into its valid range.
    pub fn normalized(mut self) -> Self {
        self.columns = clamp_tracks(self.columns);
        self.rows = clamp_tracks(self.rows);
        self.container_width = self.container_width.clamped();
        self.container_height = self.container_height.clamped();
        self.item_width = clamp_item_size(self.item_width);
        self.item_height = clamp_item_size(self.item_height);
        self
    }
}

fn clamp_item_size(size: ItemSize) -> ItemSize {
    match size {
        ItemSize::Custom(length) => ItemSize::Custom(length.clamped()),
        other => other,
    }
}

fn clamp_tracks(n: u32) -> u32 {
    n.clamp(1, MAX_TRACKS)
}

fn clamp_non_negative(value: f64) -> f64 {
    // Also maps NaN, infinities and -0.0 to 0.
    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}

/// Leading-integer parse clamped to `min`; garbage yields `min`.
fn lenient_count(raw: &str, min: u32) -> u32 {
    let Some(digits) = split_leading_int(raw.trim()) else {
        return min;
    };
    match digits.parse::<i64>() {
        Ok(n) => u32::try_from(n.max(min as i64)).unwrap_or(u32::MAX),
        // Only overflow gets here; the sign tells which way.
        Err(_) if digits.starts_with('-') => min,
        Err(_) => u32::MAX,
    }
}

/// Leading-float parse clamped to >= 0; garbage yields 0.
fn lenient_length(raw: &str) -> f64 {
    split_leading_float(raw.trim())
        .and_then(|(number, _)| number.parse::<f64>().ok())
        .map(clamp_non_negative)
        .unwrap_or(0.0)
}

fn sign_len(s: &str) -> usize {
    if s.starts_with('-') || s.starts_with('+') { 1 } else { 0 }
}

fn digit_run(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

/// The optionally signed digit prefix of `s`, if it has at least one digit.
fn split_leading_int(s: &str) -> Option<&str> {
    let sign = sign_len(s);
    let digits = digit_run(&s[sign..]);
    (digits > 0).then(|| &s[..sign + digits])
}

/// Splits `s` into a decimal-number prefix and the remainder.
fn split_leading_float(s: &str) -> Option<(&str, &str)> {
    let sign = sign_len(s);
    let int_digits = digit_run(&s[sign..]);
    let mut end = sign + int_digits;
    let mut frac_digits = 0;
    if s[end..].starts_with('.') {
        frac_digits = digit_run(&s[end + 1..]);
        if frac_digits > 0 || int_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }
    Some((&s[..end], &s[end..]))
}
