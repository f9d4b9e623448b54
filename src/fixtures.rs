//! Test fixtures shared by the unit tests
//!
//! `GENESIS_HEADER` is the real mainnet header of block 120097. The
//! headers for 120098..120100 are fixture headers that extend it: each
//! commits to the previous fixture hash and was mined against its own
//! declared `bits` (0x1f00ffff), so they pass every check the light
//! client performs without needing a network data source.

use crate::crypto::Hash256;

pub const GENESIS_HEIGHT: u64 = 120097;

/// Raw header of mainnet block 120097
pub const GENESIS_HEADER: &str = "01000000a65157a7d35a487fa2d7019b152a90a8fd150eec19b68deef718000000000000a759626da6ca215507d10c8681328b558dbad808c3861a394357eb91d8db1a3f3a6ab54dacb5001b38f27f41";
pub const GENESIS_HASH: &str = "00000000000037128b08b2107b91798d36f4beee8a988abceb21a5bc8b7dc47e";
pub const GENESIS_PREV_HASH: &str = "00000000000018f7ee8db619ec0e15fda8902a159b01d7a27f485ad3a75751a6";
pub const GENESIS_MERKLE_ROOT: &str = "3f1adbd891eb5743391a86c308d8ba8d558b3281860cd1075521caa66d6259a7";

pub const HEADER_120098: &str = "010000007ec47d8bbca521ebbc8a988aeebef4368d79917b10b2088b1237000000000000f0a05c867cad4d863f64a7fdf910120be3a4c39fc25ed15f93189c0801214efb926cb54dffff001f25920100";
pub const HASH_120098: &str = "00002805870f60a7a7939d206cb8640f476350b9c60c0942c2679d0f7a968cf4";
pub const NONCE_120098: u32 = 102949;

pub const HEADER_120099: &str = "01000000f48c967a0f9d67c242090cc6b95063470f64b86c209d93a7a7600f8705280000d695637ae187c85031181be5b01e34d09bfa0bf45bdec296402a3421c3c87108ea6eb54dffff001f8c170100";
pub const HASH_120099: &str = "0000aaf1e87ccf31f93859544d40c8ab37a557d231c3d9e70bfdcc75bfa8096b";
pub const MERKLE_ROOT_120099: &str = "0871c8c321342a4096c2de5bf40bfa9bd0341eb0e51b183150c887e17a6395d6";

pub const HEADER_120100: &str = "010000006b09a8bf75ccfd0be7d9c331d257a537abc8404d545938f931cf7ce8f1aa000051e49d26667eba76b2d781b098569ab29df6cc7b5b082a4972bc01be7997accb4271b54dffff001f0efb0100";
pub const HASH_120100: &str = "00006cdde6e1907daa98076df3a701d328eeaeddbf7d6646ad9bf3d985d05424";

/// Mined header whose parent is not part of the fixture chain
pub const ORPHAN_HEADER: &str = "0100000085172bc3b2d37d30645cc6ed35a8960b1f502998a36bf0ca9324a34b910395f1c642a2009a976a844aa26714f13c595b2418821ae14237d9c5ff4ea1602cdcea9a73b54dffff001f33680000";

/// Compact target shared by the fixture headers
pub const FIXTURE_BITS: u32 = 0x1f00ffff;

/// Bitcoin mainnet block 0 and its only transaction
pub const MAINNET_GENESIS_HEADER: &str = "0100000000000000000000000000000000000000000000000000000000000000000000003ba3edfd7a7b12b27ac72c3e67768f617fc81bc3888a51323a9fb8aa4b1e5e4a29ab5f49ffff001d1dac2b7c";
pub const MAINNET_GENESIS_HASH: &str = "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f";
pub const MAINNET_GENESIS_COINBASE: &str = "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b";

/// Transaction hashes committed to by `HEADER_120099`, in block order
pub const TXS_120099: [&str; 10] = [
    "4bbde213d36ca16cac86a37487a878c2660bd1d19afff18e55ef4c4e3eb1f3fc",
    "915000ffdc7b0b34d9efc30375d28a79b97943bbe37da86d3db7b3ac19351be6",
    "c92312633328155654da2e37ffb04cefabc3f3e9089bf1d85497b459fa4f44f4",
    "03c15ee09a68c8ba00793d867113f4e1732cf922b8698659c8e4fa714591b0d9",
    "442d32c1ccdf7a576af4436d8204911d0b40d652002edd9331104e38ca8179c6",
    "40b578b78cb7f362361f4dfd85ca83a1e1ac415a82b7f726731d729c8a449af4",
    "2974713e4e2b043b5aab5503d24cd5cdea53233c2ad635dca7cf4ed4ce9c7de5",
    "8d337a6796de176085eae26ff6fa104c566b8d6c1499f0c0428b5aa345922958",
    "2f43d7558e013e42f6f8c6b7f80a0e2a1def2a7de869c040a87143372a0481cb",
    "3f82401253ef77a810b3dccfb69fb72468dfbf75aebe651960924e06caacecad",
];

/// Inclusion proof for transaction 5 of block 120099
pub const PROOF_120099_TX5: [&str; 4] = [
    "442d32c1ccdf7a576af4436d8204911d0b40d652002edd9331104e38ca8179c6",
    "b9fd3547c55d220f56bd4f30e50426455afc342fa482eee7e5968c0a053606eb",
    "ec537e555bb10a4c6098470998cff418de4c69d45a5b79089959177dfdb2923e",
    "113e827a150eee1db60ee7c818b7855c14ad361314d38c14db66d18c9702e137",
];

/// Inclusion proof for transaction 9 (the unpaired last leaf) of block 120099
pub const PROOF_120099_TX9: [&str; 4] = [
    "2f43d7558e013e42f6f8c6b7f80a0e2a1def2a7de869c040a87143372a0481cb",
    "6e629c7a4a9d88d48bfefc3ed04157914210535ba98163ebafad5e6f921e2340",
    "a6a74221667d4c07246b674dc4ee8cc2fdf94fcbf4118680a7a6ec9f83337533",
    "a0fcf700b7a92a988469d6bf4b7299c32dd358c9898f2aa9fb794cf6eeb2f1d2",
];

pub fn bytes(hex_str: &str) -> Vec<u8> {
    hex::decode(hex_str).unwrap()
}

pub fn hash(hex_str: &str) -> Hash256 {
    hex_str.parse().unwrap()
}

pub fn hashes(hex_strs: &[&str]) -> Vec<Hash256> {
    hex_strs.iter().map(|h| hash(h)).collect()
}
