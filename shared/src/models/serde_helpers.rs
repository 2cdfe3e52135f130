//! Serde helpers for records written by older page builds
//!
//! Those builds stored raw form values, so numbers may arrive as strings and
//! optional text may arrive as `""` or `null`.

use serde::{Deserialize, Deserializer};

/// Deserialize a non-negative integer given either as a number or a numeric string
pub fn flexible_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct FlexibleVisitor;

    impl<'de> Visitor<'de> for FlexibleVisitor {
        type Value = u32;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a non-negative integer or numeric string")
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            u32::try_from(value).map_err(|_| de::Error::custom(format!("out of range: {}", value)))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            u32::try_from(value).map_err(|_| de::Error::custom(format!("out of range: {}", value)))
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            value
                .trim()
                .parse::<u32>()
                .map_err(|_| de::Error::custom(format!("invalid integer: {}", value)))
        }
    }

    deserializer.deserialize_any(FlexibleVisitor)
}

/// Deserialize optional text that treats `null` and blank strings as absent
pub fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
        .map(|opt| opt.filter(|s| !s.trim().is_empty()))
}
