//! # Key Namespaces
//!
//! Every record in the Mapping Store lives under exactly one namespace prefix.
//! The prefixes are on-disk format: changing one orphans every record written
//! under the old spelling, which is what the migration subsystem exists to
//! repair.
//!
//! | Namespace | Prefix | Key identifier | Value |
//! |-----------|--------|----------------|-------|
//! | `MatrixUser` | `matrix_user_` | Matrix user id | Mattermost user id |
//! | `MattermostUser` | `mattermost_user_` | Mattermost user id | Matrix user id |
//! | `ChannelMapping` | `channel_mapping_` | Mattermost channel id | Matrix room id or alias |
//! | `RoomMapping` | `room_mapping_` | Matrix room id or alias | Mattermost channel id |
//! | `GhostUser` | `ghost_user_` | Mattermost user id | ghost Matrix user id |
//! | `GhostRoom` | `ghost_room_` | `{ghost}_{room}` | membership marker |
//! | `MatrixEventPost` | `matrix_event_post_` | Matrix event id | Mattermost post id |
//! | `MatrixReaction` | `matrix_reaction_` | Matrix event id | reaction record |
//! | `LegacyDmMapping` | `dm_mapping_` | Mattermost channel id | Matrix room id |
//! | `LegacyMatrixDmMapping` | `matrix_dm_mapping_` | Matrix room id | Mattermost channel id |
//!
//! The schema version is a single key (`kv_store_version`), not a namespace.

use serde::{Deserialize, Serialize};

/// Forward user mapping: Matrix user id → Mattermost user id.
pub const MATRIX_USER_PREFIX: &str = "matrix_user_";
/// Reverse user mapping: Mattermost user id → Matrix user id.
pub const MATTERMOST_USER_PREFIX: &str = "mattermost_user_";
/// Forward channel mapping: Mattermost channel id → Matrix room id or alias.
pub const CHANNEL_MAPPING_PREFIX: &str = "channel_mapping_";
/// Reverse channel mapping: Matrix room id or alias → Mattermost channel id.
pub const ROOM_MAPPING_PREFIX: &str = "room_mapping_";
/// Ghost identity for a local Mattermost user.
pub const GHOST_USER_PREFIX: &str = "ghost_user_";
/// Ghost room membership marker.
pub const GHOST_ROOM_PREFIX: &str = "ghost_room_";
/// Matrix event id → Mattermost post id.
pub const MATRIX_EVENT_POST_PREFIX: &str = "matrix_event_post_";
/// Matrix reaction event id → reaction record.
pub const MATRIX_REACTION_PREFIX: &str = "matrix_reaction_";
/// Legacy DM forward mapping, retired by schema version 2.
pub const LEGACY_DM_MAPPING_PREFIX: &str = "dm_mapping_";
/// Legacy DM reverse mapping, retired by schema version 2.
pub const LEGACY_MATRIX_DM_MAPPING_PREFIX: &str = "matrix_dm_mapping_";

/// Key holding the highest fully-applied migration number.
pub const SCHEMA_VERSION_KEY: &str = "kv_store_version";

/// A key namespace in the Mapping Store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Namespace {
    /// `matrix_user_`
    MatrixUser,
    /// `mattermost_user_`
    MattermostUser,
    /// `channel_mapping_`
    ChannelMapping,
    /// `room_mapping_`
    RoomMapping,
    /// `ghost_user_`
    GhostUser,
    /// `ghost_room_`
    GhostRoom,
    /// `matrix_event_post_`
    MatrixEventPost,
    /// `matrix_reaction_`
    MatrixReaction,
    /// `dm_mapping_` (legacy)
    LegacyDmMapping,
    /// `matrix_dm_mapping_` (legacy)
    LegacyMatrixDmMapping,
}

impl Namespace {
    /// All namespaces, current and legacy.
    pub const ALL: [Namespace; 10] = [
        Namespace::MatrixUser,
        Namespace::MattermostUser,
        Namespace::ChannelMapping,
        Namespace::RoomMapping,
        Namespace::GhostUser,
        Namespace::GhostRoom,
        Namespace::MatrixEventPost,
        Namespace::MatrixReaction,
        Namespace::LegacyDmMapping,
        Namespace::LegacyMatrixDmMapping,
    ];

    /// On-disk key prefix.
    pub const fn prefix(self) -> &'static str {
        match self {
            Namespace::MatrixUser => MATRIX_USER_PREFIX,
            Namespace::MattermostUser => MATTERMOST_USER_PREFIX,
            Namespace::ChannelMapping => CHANNEL_MAPPING_PREFIX,
            Namespace::RoomMapping => ROOM_MAPPING_PREFIX,
            Namespace::GhostUser => GHOST_USER_PREFIX,
            Namespace::GhostRoom => GHOST_ROOM_PREFIX,
            Namespace::MatrixEventPost => MATRIX_EVENT_POST_PREFIX,
            Namespace::MatrixReaction => MATRIX_REACTION_PREFIX,
            Namespace::LegacyDmMapping => LEGACY_DM_MAPPING_PREFIX,
            Namespace::LegacyMatrixDmMapping => LEGACY_MATRIX_DM_MAPPING_PREFIX,
        }
    }

    /// Namespaces retired by migration.
    pub const fn is_legacy(self) -> bool {
        matches!(
            self,
            Namespace::LegacyDmMapping | Namespace::LegacyMatrixDmMapping
        )
    }

    /// Build a full key for `identifier` in this namespace.
    pub fn key(self, identifier: &str) -> String {
        let prefix = self.prefix();
        let mut key = String::with_capacity(prefix.len() + identifier.len());
        key.push_str(prefix);
        key.push_str(identifier);
        key
    }

    /// Strip this namespace's prefix, returning the identifier part.
    pub fn identifier<'a>(self, key: &'a str) -> Option<&'a str> {
        key.strip_prefix(self.prefix())
    }

    /// Find the namespace a key belongs to.
    ///
    /// Prefixes never overlap at position 0, so at most one matches.
    pub fn classify(key: &str) -> Option<Namespace> {
        Self::ALL
            .into_iter()
            .find(|namespace| key.starts_with(namespace.prefix()))
    }
}

/// Key for a ghost user's membership in a Matrix room.
pub fn ghost_room_key(ghost_user_id: &str, room_id: &str) -> String {
    Namespace::GhostRoom.key(&format!("{}_{}", ghost_user_id, room_id))
}
