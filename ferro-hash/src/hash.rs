// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

use crate::error::FerroHashError;
use crate::settings::HASH_SIZE_BYTES;
use std::convert::TryInto;
use std::str::FromStr;

/// Blake3 hash of arbitrary content
#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash)]
pub struct Hash([u8; HASH_SIZE_BYTES]);

impl std::fmt::Display for Hash {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_bs58_check())
    }
}

impl std::fmt::Debug for Hash {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_bs58_check())
    }
}

impl Hash {
    /// Compute a hash from data.
    ///
    /// # Example
    ///  ```
    /// # use ferro_hash::Hash;
    /// let hash = Hash::compute_from("hello world".as_bytes());
    /// ```
    pub fn compute_from(data: &[u8]) -> Self {
        Hash(*blake3::hash(data).as_bytes())
    }

    /// Serialize a Hash using bs58 encoding with checksum.
    ///
    /// # Example
    ///  ```
    /// # use ferro_hash::Hash;
    /// let hash = Hash::compute_from("hello world".as_bytes());
    /// let serialized: String = hash.to_bs58_check();
    /// ```
    pub fn to_bs58_check(&self) -> String {
        bs58::encode(self.to_bytes()).with_check().into_string()
    }

    /// Serialize a Hash as bytes.
    ///
    /// # Example
    ///  ```
    /// # use ferro_hash::Hash;
    /// let hash = Hash::compute_from("hello world".as_bytes());
    /// let serialized = hash.to_bytes();
    /// ```
    pub fn to_bytes(&self) -> &[u8; HASH_SIZE_BYTES] {
        &self.0
    }

    /// Convert into bytes.
    pub fn into_bytes(self) -> [u8; HASH_SIZE_BYTES] {
        self.0
    }

    /// Deserialize a Hash from bytes.
    ///
    /// # Example
    ///  ```
    /// # use ferro_hash::Hash;
    /// let hash = Hash::compute_from("hello world".as_bytes());
    /// let deserialized: Hash = Hash::from_bytes(&hash.to_bytes().clone());
    /// ```
    pub fn from_bytes(data: &[u8; HASH_SIZE_BYTES]) -> Self {
        Hash(*data)
    }

    /// Deserialize a Hash from its bs58check form.
    ///
    /// # Example
    ///  ```
    /// # use ferro_hash::Hash;
    /// let hash = Hash::compute_from("hello world".as_bytes());
    /// let deserialized: Hash = Hash::from_bs58_check(&hash.to_bs58_check()).unwrap();
    /// ```
    pub fn from_bs58_check(data: &str) -> Result<Hash, FerroHashError> {
        let decoded = bs58::decode(data)
            .with_check(None)
            .into_vec()
            .map_err(|err| FerroHashError::NotBs58CheckEncoded(format!("{}: {}", data, err)))?;
        let bytes: [u8; HASH_SIZE_BYTES] = decoded
            .as_slice()
            .try_into()
            .map_err(|_| FerroHashError::WrongHashSize(HASH_SIZE_BYTES, decoded.len()))?;
        Ok(Hash::from_bytes(&bytes))
    }
}

impl FromStr for Hash {
    type Err = FerroHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hash::from_bs58_check(s)
    }
}

impl ::serde::Serialize for Hash {
    /// `::serde::Serialize` trait for Hash.
    /// The hash is serialized to its bs58check form when the serializer is human readable,
    /// to raw bytes otherwise.
    fn serialize<S: ::serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        if s.is_human_readable() {
            s.collect_str(&self.to_bs58_check())
        } else {
            s.serialize_bytes(self.to_bytes())
        }
    }
}

impl<'de> ::serde::Deserialize<'de> for Hash {
    fn deserialize<D: ::serde::Deserializer<'de>>(d: D) -> Result<Hash, D::Error> {
        if d.is_human_readable() {
            struct Base58CheckVisitor;

            impl<'de> ::serde::de::Visitor<'de> for Base58CheckVisitor {
                type Value = Hash;

                fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                    formatter.write_str("an ASCII base58check string")
                }

                fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
                where
                    E: ::serde::de::Error,
                {
                    Hash::from_bs58_check(v).map_err(E::custom)
                }
            }
            d.deserialize_str(Base58CheckVisitor)
        } else {
            struct BytesVisitor;

            impl<'de> ::serde::de::Visitor<'de> for BytesVisitor {
                type Value = Hash;

                fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                    formatter.write_str("a bytestring")
                }

                fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
                where
                    E: ::serde::de::Error,
                {
                    let bytes: [u8; HASH_SIZE_BYTES] = v
                        .try_into()
                        .map_err(|_| E::custom("invalid hash byte length"))?;
                    Ok(Hash::from_bytes(&bytes))
                }
            }
            d.deserialize_bytes(BytesVisitor)
        }
    }
}
