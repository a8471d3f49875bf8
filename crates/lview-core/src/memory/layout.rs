//! Layout constants that do not move between client builds.
//!
//! Build-specific field offsets live in [`crate::offset::OffsetTable`]; the
//! values here describe container shapes and sizes that have stayed fixed.

/// The client is a 32-bit process
pub const POINTER_SIZE: u64 = 4;

/// Object manager tree nodes
pub mod tree {
    use super::POINTER_SIZE;

    /// Child/parent links at the start of each node
    pub const LINKS: [u64; 3] = [0, POINTER_SIZE, POINTER_SIZE * 2];

    /// Bytes read per node (links + key + value)
    pub const NODE_SIZE: usize = 0x30;

    /// Upper bound on visited nodes per snapshot
    pub const MAX_OBJECTS: usize = 500;

    /// Network ids of units, missiles and structures start here
    pub const NET_ID_BASE: u32 = 0x4000_0000;

    /// Width of the network id range worth reading
    pub const NET_ID_RANGE: u32 = 0x10_0000;

    /// Whether `net_id` belongs to an object the overlay cares about
    pub fn is_tracked_net_id(net_id: u32) -> bool {
        net_id.wrapping_sub(NET_ID_BASE) <= NET_ID_RANGE
    }
}

/// Game object blocks
pub mod object {
    /// Bytes read per object in one go (covers every field up to the item list)
    pub const READ_SIZE: usize = 0x3800;

    /// Maximum length of object and spell names
    pub const NAME_MAX: usize = 50;

    /// Q, W, E, R, D, F
    pub const SPELL_SLOTS: usize = 6;

    /// Summoner spells occupy the last two slots
    pub const SUMMONER_SLOTS: [usize; 2] = [4, 5];

    /// Inventory slots including the trinket
    pub const ITEM_SLOTS: usize = 7;

    /// Distance between inventory slot entries
    pub const ITEM_SLOT_STRIDE: u64 = 0x10;
}

/// Spell slot block
pub mod spell {
    pub const READ_SIZE: usize = 0x150;
}

/// Missile block
pub mod missile {
    pub const READ_SIZE: usize = 0x320;
}

/// View/projection matrices (two row-major 4x4 f32 matrices back to back)
pub mod matrix {
    pub const FLOATS: usize = 16;
    pub const BYTES: usize = FLOATS * 4;
}

/// Timing constants for the frame loop
pub mod timing {
    /// Default delay between snapshots when running headless (ms)
    pub const FRAME_INTERVAL_MS: u64 = 33;

    /// Delay between attempts to find the game process (s)
    pub const PROCESS_POLL_INTERVAL_SECS: u64 = 5;
}

#[cfg(test)]
mod tests {
    use super::tree::*;

    #[test]
    fn test_tracked_net_ids() {
        assert!(is_tracked_net_id(0x4000_0000));
        assert!(is_tracked_net_id(0x4000_0123));
        assert!(is_tracked_net_id(0x4010_0000));
        assert!(!is_tracked_net_id(0x4010_0001));
        assert!(!is_tracked_net_id(0x3FFF_FFFF));
        assert!(!is_tracked_net_id(0));
    }
}
