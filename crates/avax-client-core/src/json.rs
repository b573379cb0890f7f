//! Integers quoted as JSON strings.
//!
//! Node APIs emit amounts, limits and counters as decimal strings (`"42"`)
//! so values above 2^53 survive JavaScript clients. These wrappers encode
//! that way and accept either strings or plain numbers when decoding.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

macro_rules! quoted_uint {
    ($name:ident, $inner:ty) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(pub $inner);

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $inner {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                struct QuotedVisitor;

                impl Visitor<'_> for QuotedVisitor {
                    type Value = $inner;

                    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        write!(f, "a {} as a decimal string or number", stringify!($inner))
                    }

                    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                        v.parse::<$inner>().map_err(E::custom)
                    }

                    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                        <$inner>::try_from(v).map_err(E::custom)
                    }

                    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                        <$inner>::try_from(v).map_err(E::custom)
                    }
                }

                deserializer.deserialize_any(QuotedVisitor).map($name)
            }
        }
    };
}

quoted_uint!(JsonU64, u64);
quoted_uint!(JsonU32, u32);
quoted_uint!(JsonU8, u8);
