// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

use crate::address::Address;
use crate::error::ModelsResult;
use ferro_hash::Hash;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const TRANSACTION_ID_PREFIX: char = 'T';

/// A transaction as admitted by the pool: the origin account was recovered
/// from the signature at admission time and travels with the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// account the transaction originates from
    pub origin: Address,
    /// per-origin strictly increasing sequence number
    pub nonce: u64,
    /// offered unit price, used to order candidates during block assembly
    pub price: u64,
    /// replay-protection domain the signature commits to, if any
    pub chain_id: Option<u64>,
    /// opaque call payload
    pub payload: Vec<u8>,
}

impl Transaction {
    /// Content id of the transaction.
    pub fn id(&self) -> TransactionId {
        let mut data = Vec::with_capacity(
            ADDRESS_AND_FIXED_FIELDS_SIZE + self.payload.len(),
        );
        data.extend_from_slice(self.origin.to_bytes());
        data.extend_from_slice(&self.nonce.to_be_bytes());
        data.extend_from_slice(&self.price.to_be_bytes());
        match self.chain_id {
            Some(chain_id) => {
                data.push(1);
                data.extend_from_slice(&chain_id.to_be_bytes());
            }
            None => data.push(0),
        }
        data.extend_from_slice(&self.payload);
        TransactionId(Hash::compute_from(&data))
    }
}

// origin + nonce + price + chain id tag and value
const ADDRESS_AND_FIXED_FIELDS_SIZE: usize = crate::address::ADDRESS_SIZE_BYTES + 8 + 8 + 9;

/// Content id of a transaction
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TransactionId(Hash);

impl TransactionId {
    /// Build an id from a content hash.
    pub const fn new(hash: Hash) -> Self {
        TransactionId(hash)
    }

    /// Underlying content hash.
    pub const fn hash(&self) -> Hash {
        self.0
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", TRANSACTION_ID_PREFIX, self.0)
    }
}

impl std::fmt::Debug for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl FromStr for TransactionId {
    type Err = crate::error::ModelsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix(TRANSACTION_ID_PREFIX) {
            Some(rest) => Ok(TransactionId(
                Hash::from_bs58_check(rest)
                    .map_err(|_| crate::error::ModelsError::IdParseError(s.to_string()))?,
            )),
            None => Err(crate::error::ModelsError::IdParseError(s.to_string())),
        }
    }
}

impl ::serde::Serialize for TransactionId {
    fn serialize<S: ::serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        if s.is_human_readable() {
            s.collect_str(&self.to_string())
        } else {
            s.serialize_bytes(self.0.to_bytes())
        }
    }
}

impl<'de> ::serde::Deserialize<'de> for TransactionId {
    fn deserialize<D: ::serde::Deserializer<'de>>(d: D) -> Result<TransactionId, D::Error> {
        if d.is_human_readable() {
            struct IdVisitor;

            impl<'de> ::serde::de::Visitor<'de> for IdVisitor {
                type Value = TransactionId;

                fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                    formatter.write_str("T + base58check::encode(hash)")
                }

                fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
                where
                    E: ::serde::de::Error,
                {
                    TransactionId::from_str(v).map_err(E::custom)
                }
            }
            d.deserialize_str(IdVisitor)
        } else {
            Ok(TransactionId(Hash::deserialize(d)?))
        }
    }
}

/// Resolves the origin account of transactions and enforces the
/// replay-protection policy for one assembly cycle.
pub trait Signer: Send + Sync {
    /// Origin account of the transaction.
    fn sender(&self, tx: &Transaction) -> ModelsResult<Address>;

    /// Whether the transaction commits to this signer's replay-protection
    /// domain. Transactions that do not are excluded from produced blocks.
    fn is_replay_protected(&self, tx: &Transaction) -> bool;
}

/// Signer bound to one chain id.
#[derive(Debug, Clone)]
pub struct ChainSigner {
    chain_id: u64,
}

impl ChainSigner {
    /// Create a signer for the given chain id.
    pub const fn new(chain_id: u64) -> Self {
        ChainSigner { chain_id }
    }
}

impl Signer for ChainSigner {
    fn sender(&self, tx: &Transaction) -> ModelsResult<Address> {
        // signature recovery happened at pool admission, the recovered
        // origin travels with the transaction
        Ok(tx.origin)
    }

    fn is_replay_protected(&self, tx: &Transaction) -> bool {
        tx.chain_id == Some(self.chain_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(nonce: u64) -> Transaction {
        Transaction {
            origin: Address::from_bytes([9; crate::address::ADDRESS_SIZE_BYTES]),
            nonce,
            price: 10,
            chain_id: Some(1),
            payload: vec![1, 2, 3],
        }
    }

    #[test]
    fn test_transaction_id_depends_on_content() {
        assert_ne!(tx(1).id(), tx(2).id());
        assert_eq!(tx(1).id(), tx(1).id());
    }

    #[test]
    fn test_transaction_id_text_roundtrip() {
        let id = tx(1).id();
        let back = TransactionId::from_str(&id.to_string()).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_chain_signer_replay_protection() {
        let signer = ChainSigner::new(1);
        assert!(signer.is_replay_protected(&tx(1)));
        let mut foreign = tx(1);
        foreign.chain_id = Some(2);
        assert!(!signer.is_replay_protected(&foreign));
        let mut unprotected = tx(1);
        unprotected.chain_id = None;
        assert!(!signer.is_replay_protected(&unprotected));
    }
}
