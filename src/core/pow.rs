//! Proof of work validation
//!
//! A block hash is read as a 256-bit number using the protocol's
//! little-endian convention (the raw digest, least-significant byte
//! first) and must not exceed the target decompressed from `bits`.

use crate::core::header::{compact_to_target, BlockHash};
use num_bigint::BigUint;
use thiserror::Error;

/// Proof of work errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PowError {
    #[error("Insufficient proof of work: hash {hash} exceeds target for bits {bits:#010x}")]
    InsufficientPow { hash: BlockHash, bits: u32 },
}

/// Numeric value of a block hash
///
/// The canonical bytes are the reversed digest, so reading them
/// big-endian equals reading the internal digest little-endian.
pub fn hash_to_number(hash: &BlockHash) -> BigUint {
    BigUint::from_bytes_be(hash.as_bytes())
}

/// Whether `hash` satisfies the target encoded in `bits`
pub fn meets_target(hash: &BlockHash, bits: u32) -> bool {
    hash_to_number(hash) <= compact_to_target(bits)
}

/// Check that `hash` satisfies the target encoded in `bits`
pub fn check_proof_of_work(hash: &BlockHash, bits: u32) -> Result<(), PowError> {
    if !meets_target(hash, bits) {
        return Err(PowError::InsufficientPow { hash: *hash, bits });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::header::RawHeader;
    use crate::crypto::Hash256;
    use crate::fixtures::{self, hash};

    #[test]
    fn test_real_headers_meet_their_target() {
        for hex_header in [fixtures::GENESIS_HEADER, fixtures::MAINNET_GENESIS_HEADER] {
            let header = RawHeader::from_hex(hex_header).unwrap();
            assert_eq!(check_proof_of_work(&header.hash(), header.bits()), Ok(()));
        }
    }

    #[test]
    fn test_fixture_headers_meet_their_target() {
        for hex_header in [
            fixtures::HEADER_120098,
            fixtures::HEADER_120099,
            fixtures::HEADER_120100,
        ] {
            let header = RawHeader::from_hex(hex_header).unwrap();
            assert_eq!(header.bits(), fixtures::FIXTURE_BITS);
            assert!(meets_target(&header.hash(), header.bits()));
        }
    }

    #[test]
    fn test_zeroed_nonce_fails() {
        let header = RawHeader::from_hex(fixtures::HEADER_120098).unwrap();
        assert_eq!(header.nonce(), fixtures::NONCE_120098);

        let mut fields = header.fields();
        fields.nonce = 0;
        let tampered = fields.encode();

        assert_eq!(
            check_proof_of_work(&tampered.hash(), tampered.bits()),
            Err(PowError::InsufficientPow {
                hash: tampered.hash(),
                bits: fixtures::FIXTURE_BITS
            })
        );
    }

    #[test]
    fn test_harder_target_rejects_valid_hash() {
        // 120097 clears the minimum-difficulty target but not 0x1a00ffff
        let genesis = hash(fixtures::GENESIS_HASH);
        assert!(meets_target(&genesis, 0x1d00ffff));
        assert!(!meets_target(&genesis, 0x1a00ffff));
    }

    #[test]
    fn test_hash_equal_to_target_passes() {
        let mut bytes = [0u8; 32];
        bytes[4] = 0xff;
        bytes[5] = 0xff;
        let at_target = Hash256::from_canonical(bytes);
        assert!(meets_target(&at_target, 0x1d00ffff));

        bytes[6] = 0x01;
        let above = Hash256::from_canonical(bytes);
        assert!(!meets_target(&above, 0x1d00ffff));
    }

    #[test]
    fn test_numeric_interpretation() {
        let mut bytes = [0u8; 32];
        bytes[31] = 0x02;
        assert_eq!(
            hash_to_number(&Hash256::from_canonical(bytes)),
            BigUint::from(2u8)
        );
    }
}
