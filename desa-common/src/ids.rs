//! Identity minting
//!
//! Ids keep the `<prefix>-<epoch ms>` shape of the stored seed data, with a
//! random suffix so two ids minted in the same millisecond never collide.

use crate::time::now_millis;
use uuid::Uuid;

/// Mint a new id such as `warga-1718000000000-3f2a9c1b`
pub fn mint(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}-{}", prefix, now_millis(), &suffix[..8])
}
