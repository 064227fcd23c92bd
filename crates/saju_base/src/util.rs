//! Shared helpers for the rule tables.

/// Serialize a token as its `Display` glyph and deserialize it through `FromStr`.
macro_rules! glyph_serde {
    ($ty:ty) => {
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use glyph_serde;

/// Position of `idx` counted from `start` around a cycle of `len`.
pub const fn cycle_offset(idx: u8, start: u8, len: u8) -> u8 {
    (idx + len - start % len) % len
}
