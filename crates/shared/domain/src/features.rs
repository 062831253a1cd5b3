//! The closed set of platform features a scope may enable.
//!
//! Each [`Feature`] owns a stable configuration key and a stable positional index into the
//! scope configuration payload. Lookups go by key; the index is kept as a cross-check.

use crate::error::DomainError;
use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Feature {
    Appcomponent,
    ViewModel,
    Fragment,
    Work,
}

impl Feature {
    /// Name of the boolean argument in the scope configuration annotation.
    #[must_use]
    pub const fn config_key(self) -> &'static str {
        match self {
            Self::Appcomponent => "addAppcomponentSupport",
            Self::ViewModel => "addViewModelSupport",
            Self::Fragment => "addFragmentSupport",
            Self::Work => "addWorkSupport",
        }
    }

    /// Position of the flag in the configuration payload.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Appcomponent => 0,
            Self::ViewModel => 1,
            Self::Fragment => 2,
            Self::Work => 3,
        }
    }

    #[must_use]
    pub const fn flag(self) -> FeatureSet {
        match self {
            Self::Appcomponent => FeatureSet::APPCOMPONENT,
            Self::ViewModel => FeatureSet::VIEW_MODEL,
            Self::Fragment => FeatureSet::FRAGMENT,
            Self::Work => FeatureSet::WORK,
        }
    }

    #[must_use]
    pub fn from_config_key(key: &str) -> Option<Self> {
        Self::iter().find(|f| f.config_key() == key)
    }

    /// All features in payload order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}

bitflags! {
    /// A set of features, used for scope configurations and generator filtering.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct FeatureSet: u32 {
        const APPCOMPONENT = 1 << 0;
        const VIEW_MODEL = 1 << 1;
        const FRAGMENT = 1 << 2;
        const WORK = 1 << 3;

        const ALL = Self::APPCOMPONENT.bits()
            | Self::VIEW_MODEL.bits()
            | Self::FRAGMENT.bits()
            | Self::WORK.bits();
    }
}

impl FeatureSet {
    #[must_use]
    pub const fn has(self, feature: Feature) -> bool {
        self.contains(feature.flag())
    }

    /// Enabled features in payload order.
    pub fn features(self) -> impl Iterator<Item = Feature> {
        Feature::iter().filter(move |f| self.has(*f))
    }
}

impl Default for FeatureSet {
    fn default() -> Self {
        Self::ALL
    }
}

impl From<Feature> for FeatureSet {
    fn from(feature: Feature) -> Self {
        feature.flag()
    }
}

impl FromIterator<Feature> for FeatureSet {
    fn from_iter<T: IntoIterator<Item = Feature>>(iter: T) -> Self {
        iter.into_iter().fold(Self::empty(), |acc, f| acc | f.flag())
    }
}

impl TryFrom<&str> for FeatureSet {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim() {
            "all" | "*" => Ok(Self::ALL),
            "none" => Ok(Self::empty()),
            other => other.parse::<Feature>().map(Feature::flag).map_err(|_| {
                DomainError::UnknownFeature { message: other.to_owned().into(), context: None }
            }),
        }
    }
}

impl From<u32> for FeatureSet {
    fn from(bits: u32) -> Self {
        Self::from_bits_truncate(bits)
    }
}

impl Serialize for FeatureSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let names: Vec<&'static str> = self.features().map(Into::into).collect();
        names.serialize(serializer)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FeatureSetRepr {
    Bits(u32),
    Names(Vec<String>),
    Single(String),
}

impl<'de> Deserialize<'de> for FeatureSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match FeatureSetRepr::deserialize(deserializer)? {
            FeatureSetRepr::Bits(bits) => Ok(Self::from_bits_truncate(bits)),
            FeatureSetRepr::Single(name) => {
                Self::try_from(name.as_str()).map_err(serde::de::Error::custom)
            },
            FeatureSetRepr::Names(names) => names.iter().try_fold(Self::empty(), |acc, name| {
                Self::try_from(name.as_str()).map(|f| acc | f).map_err(serde::de::Error::custom)
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_stable() {
        let table: Vec<(&str, usize)> = Feature::all().map(|f| (f.config_key(), f.index())).collect();
        assert_eq!(
            table,
            [
                ("addAppcomponentSupport", 0),
                ("addViewModelSupport", 1),
                ("addFragmentSupport", 2),
                ("addWorkSupport", 3),
            ]
        );
    }

    #[test]
    fn config_key_round_trips() {
        for feature in Feature::all() {
            assert_eq!(Feature::from_config_key(feature.config_key()), Some(feature));
        }
        assert_eq!(Feature::from_config_key("parentScope"), None);
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!("viewmodel".parse::<Feature>().unwrap(), Feature::ViewModel);
        assert_eq!("Work".parse::<Feature>().unwrap(), Feature::Work);
        assert_eq!(Feature::ViewModel.to_string(), "viewmodel");
    }

    #[test]
    fn feature_set_accepts_several_shapes() {
        let from_names: FeatureSet = serde_json::from_str(r#"["fragment", "work"]"#).unwrap();
        assert_eq!(from_names, FeatureSet::FRAGMENT | FeatureSet::WORK);

        let from_single: FeatureSet = serde_json::from_str(r#""all""#).unwrap();
        assert_eq!(from_single, FeatureSet::ALL);

        let from_bits: FeatureSet = serde_json::from_str("2").unwrap();
        assert_eq!(from_bits, FeatureSet::VIEW_MODEL);

        assert!(serde_json::from_str::<FeatureSet>(r#"["dialogs"]"#).is_err());
    }

    #[test]
    fn feature_set_serializes_as_names() {
        let set = FeatureSet::APPCOMPONENT | FeatureSet::WORK;
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["appcomponent","work"]"#);
    }
}
