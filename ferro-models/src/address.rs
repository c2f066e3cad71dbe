// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

use crate::error::ModelsError;
use std::convert::TryInto;
use std::str::FromStr;

/// Size of an account address, in bytes
pub const ADDRESS_SIZE_BYTES: usize = 20;

const ADDRESS_PREFIX: char = 'A';

/// An account address, derived from the account's public key at admission time
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Address([u8; ADDRESS_SIZE_BYTES]);

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}{}",
            ADDRESS_PREFIX,
            bs58::encode(self.0).with_check().into_string()
        )
    }
}

impl std::fmt::Debug for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl Address {
    /// Build an address from raw bytes.
    ///
    /// # Example
    /// ```
    /// # use ferro_models::Address;
    /// let addr = Address::from_bytes([7u8; 20]);
    /// ```
    pub const fn from_bytes(data: [u8; ADDRESS_SIZE_BYTES]) -> Self {
        Address(data)
    }

    /// Raw bytes of the address.
    pub const fn to_bytes(&self) -> &[u8; ADDRESS_SIZE_BYTES] {
        &self.0
    }
}

impl FromStr for Address {
    type Err = ModelsError;

    /// ```
    /// # use std::str::FromStr;
    /// # use ferro_models::Address;
    /// let addr = Address::from_bytes([7u8; 20]);
    /// let back = Address::from_str(&addr.to_string()).unwrap();
    /// assert_eq!(back, addr);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match chars.next() {
            Some(prefix) if prefix == ADDRESS_PREFIX => {
                let data = chars.collect::<String>();
                let decoded = bs58::decode(data)
                    .with_check(None)
                    .into_vec()
                    .map_err(|err| ModelsError::AddressParseError(format!("{}: {}", s, err)))?;
                let bytes: [u8; ADDRESS_SIZE_BYTES] = decoded
                    .as_slice()
                    .try_into()
                    .map_err(|_| ModelsError::AddressParseError(s.to_string()))?;
                Ok(Address(bytes))
            }
            _ => Err(ModelsError::AddressParseError(s.to_string())),
        }
    }
}

impl ::serde::Serialize for Address {
    fn serialize<S: ::serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        if s.is_human_readable() {
            s.collect_str(&self.to_string())
        } else {
            s.serialize_bytes(self.to_bytes())
        }
    }
}

impl<'de> ::serde::Deserialize<'de> for Address {
    fn deserialize<D: ::serde::Deserializer<'de>>(d: D) -> Result<Address, D::Error> {
        if d.is_human_readable() {
            struct AddressVisitor;

            impl<'de> ::serde::de::Visitor<'de> for AddressVisitor {
                type Value = Address;

                fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                    formatter.write_str("A + base58::encode(bytes)")
                }

                fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
                where
                    E: ::serde::de::Error,
                {
                    Address::from_str(v).map_err(E::custom)
                }
            }
            d.deserialize_str(AddressVisitor)
        } else {
            struct BytesVisitor;

            impl<'de> ::serde::de::Visitor<'de> for BytesVisitor {
                type Value = Address;

                fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                    formatter.write_str("a bytestring")
                }

                fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
                where
                    E: ::serde::de::Error,
                {
                    let bytes: [u8; ADDRESS_SIZE_BYTES] = v
                        .try_into()
                        .map_err(|_| E::custom("invalid address byte length"))?;
                    Ok(Address::from_bytes(bytes))
                }
            }
            d.deserialize_bytes(BytesVisitor)
        }
    }
}
