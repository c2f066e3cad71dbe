// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

use crate::address::Address;
use crate::error::ModelsError;
use crate::transaction::Transaction;
use ferro_hash::Hash;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const BLOCK_ID_PREFIX: char = 'B';

/// A block header. Mutable only while the block template is being assembled;
/// the consensus engine fills `difficulty` during prepare and `nonce` during
/// sealing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    /// id of the parent block
    pub parent_hash: BlockId,
    /// height of the block, parent height + 1
    pub number: u64,
    /// unix timestamp in seconds, strictly greater than the parent's
    pub timestamp: u64,
    /// reward recipient, only present on blocks produced while sealing
    pub coinbase: Option<Address>,
    /// arbitrary producer-configured bytes
    pub extra_data: Vec<u8>,
    /// proof-of-work target, set by the consensus engine
    pub difficulty: u64,
    /// proof-of-work solution, set by the consensus engine
    pub nonce: u64,
}

impl BlockHeader {
    /// Content id of the header, which identifies the whole block.
    pub fn id(&self) -> BlockId {
        let mut data = Vec::with_capacity(128 + self.extra_data.len());
        data.extend_from_slice(self.parent_hash.hash().to_bytes());
        data.extend_from_slice(&self.number.to_be_bytes());
        data.extend_from_slice(&self.timestamp.to_be_bytes());
        match self.coinbase {
            Some(coinbase) => {
                data.push(1);
                data.extend_from_slice(coinbase.to_bytes());
            }
            None => data.push(0),
        }
        data.extend_from_slice(&self.extra_data);
        data.extend_from_slice(&self.difficulty.to_be_bytes());
        data.extend_from_slice(&self.nonce.to_be_bytes());
        BlockId(Hash::compute_from(&data))
    }
}

/// A block: header plus the ordered transactions it includes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// block header
    pub header: BlockHeader,
    /// included transactions, in commit order
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Assemble a block from a header and transactions.
    pub fn new(header: BlockHeader, transactions: Vec<Transaction>) -> Self {
        Block {
            header,
            transactions,
        }
    }

    /// Id of the block (the header's content id).
    pub fn id(&self) -> BlockId {
        self.header.id()
    }

    /// Height of the block.
    pub fn number(&self) -> u64 {
        self.header.number
    }
}

/// Content id of a block
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct BlockId(Hash);

impl BlockId {
    /// Build an id from a content hash.
    pub const fn new(hash: Hash) -> Self {
        BlockId(hash)
    }

    /// Underlying content hash.
    pub const fn hash(&self) -> Hash {
        self.0
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", BLOCK_ID_PREFIX, self.0)
    }
}

impl std::fmt::Debug for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl FromStr for BlockId {
    type Err = ModelsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix(BLOCK_ID_PREFIX) {
            Some(rest) => Ok(BlockId(
                Hash::from_bs58_check(rest)
                    .map_err(|_| ModelsError::IdParseError(s.to_string()))?,
            )),
            None => Err(ModelsError::IdParseError(s.to_string())),
        }
    }
}

impl ::serde::Serialize for BlockId {
    fn serialize<S: ::serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        if s.is_human_readable() {
            s.collect_str(&self.to_string())
        } else {
            s.serialize_bytes(self.0.to_bytes())
        }
    }
}

impl<'de> ::serde::Deserialize<'de> for BlockId {
    fn deserialize<D: ::serde::Deserializer<'de>>(d: D) -> Result<BlockId, D::Error> {
        if d.is_human_readable() {
            struct IdVisitor;

            impl<'de> ::serde::de::Visitor<'de> for IdVisitor {
                type Value = BlockId;

                fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                    formatter.write_str("B + base58check::encode(hash)")
                }

                fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
                where
                    E: ::serde::de::Error,
                {
                    BlockId::from_str(v).map_err(E::custom)
                }
            }
            d.deserialize_str(IdVisitor)
        } else {
            Ok(BlockId(Hash::deserialize(d)?))
        }
    }
}
