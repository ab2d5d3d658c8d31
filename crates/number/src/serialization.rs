use {
    serde::{Deserializer, Serializer, de},
    serde_with::{DeserializeAs, SerializeAs},
    std::fmt,
};

/// Serialize [`alloy::primitives::U256`] as a decimal string and deserialize
/// it from a decimal or a hex string prefixed with 0x.
#[derive(Debug)]
pub struct U256;

impl SerializeAs<alloy::primitives::U256> for U256 {
    fn serialize_as<S: Serializer>(
        source: &alloy::primitives::U256,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&source.to_string())
    }
}

impl<'de> DeserializeAs<'de, alloy::primitives::U256> for U256 {
    fn deserialize_as<D>(deserializer: D) -> Result<alloy::primitives::U256, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct U256Visitor;

        impl de::Visitor<'_> for U256Visitor {
            type Value = alloy::primitives::U256;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(
                    formatter,
                    "a u256 encoded either as 0x hex prefixed or decimal encoded string"
                )
            }

            fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                s.trim()
                    .parse()
                    .map_err(|err| E::custom(format!("failed to decode {s:?} as u256: {err}")))
            }
        }

        deserializer.deserialize_str(U256Visitor)
    }
}
