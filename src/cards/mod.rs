//! Character system: canonical records, raw-record normalization, and the
//! shared pool.
//!
//! ## Key Types
//!
//! - `CharacterId`: Unique record identifier
//! - `IdentityKey`: `name::origin`, the "same character" unit for no-repeat
//! - `Character`: Canonical, immutable character record
//! - `CharacterRecord`: Raw provider record accepting legacy field names
//! - `CharacterPool`: Read-only pool shared by both round engines

pub mod character;
pub mod pool;
pub mod record;

pub use character::{Character, CharacterId, IdentityKey};
pub use pool::CharacterPool;
pub use record::CharacterRecord;
