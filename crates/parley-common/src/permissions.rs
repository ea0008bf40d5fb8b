//! Permission bitfield shared by roles and members.
//!
//! Every grantable capability is one bit. A member's server-level permissions
//! are the OR of the `@everyone` role and each role assigned to them.

use bitflags::bitflags;

bitflags! {
    /// Server-level permissions.
    ///
    /// The defined bits are contiguous, so any raw value in
    /// `0..=ALL_PERMISSIONS` is made of named flags only.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Permissions: i64 {
        // === General ===
        /// View channels and read messages
        const VIEW_CHANNEL          = 1 << 0;
        /// Manage server settings
        const MANAGE_SERVER         = 1 << 1;
        /// Create, edit and delete channels
        const MANAGE_CHANNELS       = 1 << 2;
        /// Create and edit roles below your highest role
        const MANAGE_ROLES          = 1 << 3;
        const CREATE_INVITES        = 1 << 4;
        const KICK_MEMBERS          = 1 << 5;
        const BAN_MEMBERS           = 1 << 6;
        const VIEW_AUDIT_LOG        = 1 << 7;
        const CHANGE_NICKNAME       = 1 << 8;
        /// Change other members' nicknames
        const MANAGE_NICKNAMES      = 1 << 9;
        /// Manage custom emojis and stickers
        const MANAGE_EMOJIS         = 1 << 10;
        const MANAGE_WEBHOOKS       = 1 << 11;

        // === Text ===
        const SEND_MESSAGES         = 1 << 12;
        const SEND_MESSAGES_IN_THREADS = 1 << 13;
        const CREATE_PUBLIC_THREADS = 1 << 14;
        const CREATE_PRIVATE_THREADS = 1 << 15;
        /// Archive, delete and edit threads
        const MANAGE_THREADS        = 1 << 16;
        const EMBED_LINKS           = 1 << 17;
        const ATTACH_FILES          = 1 << 18;
        const ADD_REACTIONS         = 1 << 19;
        const USE_EXTERNAL_EMOJIS   = 1 << 20;
        /// Mention @everyone and @here
        const MENTION_EVERYONE      = 1 << 21;
        /// Delete and pin other members' messages
        const MANAGE_MESSAGES       = 1 << 22;
        const READ_MESSAGE_HISTORY  = 1 << 23;
        const USE_COMMANDS          = 1 << 24;

        // === Voice ===
        const CONNECT               = 1 << 25;
        const SPEAK                 = 1 << 26;
        const VIDEO                 = 1 << 27;
        const MUTE_MEMBERS          = 1 << 28;
        const DEAFEN_MEMBERS        = 1 << 29;
        const MOVE_MEMBERS          = 1 << 30;
        /// Use voice activity detection instead of push-to-talk
        const USE_VAD               = 1 << 31;
        const SCREEN_SHARE          = 1 << 32;
        const STAGE_SPEAKER         = 1 << 33;

        // === Extras ===
        const RECORD_VOICE          = 1 << 34;
        const MANAGE_POLLS          = 1 << 35;
        const MANAGE_EVENTS         = 1 << 36;
        const PIN_MESSAGES          = 1 << 37;
        const MANAGE_PLUGINS        = 1 << 38;
        const VIEW_ANALYTICS        = 1 << 39;

        // === Meta ===
        /// Implies every other permission
        const ADMINISTRATOR         = 1 << 40;
    }
}

/// Raw bitmask with every defined permission set. Upper bound for any valid mask.
pub const ALL_PERMISSIONS: i64 = Permissions::all().bits();

impl Permissions {
    /// Check if administrator (overrides all other checks).
    pub fn is_admin(&self) -> bool {
        self.contains(Self::ADMINISTRATOR)
    }

    /// Check if a holder of these permissions may use `required`.
    pub fn has(&self, required: Permissions) -> bool {
        self.is_admin() || self.contains(required)
    }

    /// Name of the first named flag in `self`, e.g. `"MANAGE_ROLES"`.
    pub fn name(&self) -> Option<&'static str> {
        self.iter_names().next().map(|(name, _)| name)
    }

    /// Split a mask into its individual flags, lowest bit first.
    pub fn flags(self) -> impl Iterator<Item = Permissions> {
        self.iter_names().map(|(_, flag)| flag)
    }
}

/// Compute the server-level permissions of a member.
///
/// 1. The owner holds everything
/// 2. Otherwise OR the @everyone permissions with every assigned role
/// 3. ADMINISTRATOR expands to every permission
pub fn compute_server_permissions(
    everyone: Permissions,
    role_permissions: &[Permissions],
    is_owner: bool,
) -> Permissions {
    if is_owner {
        return Permissions::all();
    }

    let perms = role_permissions
        .iter()
        .fold(everyone, |acc, &rp| acc | rp);

    if perms.is_admin() {
        return Permissions::all();
    }

    perms
}
