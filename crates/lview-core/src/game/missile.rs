use serde::Serialize;

use crate::data::{SpellFlags, SpellInfo};
use crate::game::math::Vector3;
use crate::memory::ByteBuffer;
use crate::offset::MissileOffsets;

/// A spell projectile in flight
#[derive(Debug, Clone, Serialize)]
pub struct Missile<'a> {
    pub address: u64,
    pub name: String,
    /// Object index of the caster
    pub src_index: i16,
    /// Object index of the target, for targeted spells
    pub dest_index: i16,
    pub start_pos: Vector3,
    pub end_pos: Vector3,
    #[serde(skip)]
    pub spell_info: &'a SpellInfo,
}

impl<'a> Missile<'a> {
    pub fn from_buffer(
        address: u64,
        buffer: &ByteBuffer,
        offsets: &MissileOffsets,
        name: String,
        spell_info: &'a SpellInfo,
    ) -> Self {
        Self {
            address,
            name,
            src_index: buffer.i16_at(offsets.src_index),
            dest_index: buffer.i16_at(offsets.dest_index),
            start_pos: Vector3::from_buffer(buffer, offsets.start_pos),
            end_pos: Vector3::from_buffer(buffer, offsets.end_pos),
            spell_info,
        }
    }

    pub fn is_targeted(&self) -> bool {
        self.spell_info.has_flags(SpellFlags::TARGETED)
    }

    /// Where the missile will land, clamped to the spell's range unless
    /// its destination is fixed
    pub fn landing_position(&self) -> Vector3 {
        let range = self.spell_info.range;
        if self.spell_info.has_flags(SpellFlags::FIXED_DESTINATION) || range <= 0.0 {
            return self.end_pos;
        }

        let travel = self.end_pos - self.start_pos;
        let distance = travel.length();
        if distance <= range {
            self.end_pos
        } else {
            self.start_pos + travel * (range / distance)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missile(info: &SpellInfo) -> Missile<'_> {
        Missile {
            address: 0x1000,
            name: info.name.clone(),
            src_index: 1,
            dest_index: 0,
            start_pos: Vector3::new(0.0, 0.0, 0.0),
            end_pos: Vector3::new(0.0, 0.0, 2000.0),
            spell_info: info,
        }
    }

    #[test]
    fn test_landing_clamped_to_range() {
        let mut info = SpellInfo::UNKNOWN.clone();
        info.name = "ezrealq".to_string();
        info.range = 1000.0;

        assert_eq!(missile(&info).landing_position(), Vector3::new(0.0, 0.0, 1000.0));
    }

    #[test]
    fn test_fixed_destination_not_clamped() {
        let mut info = SpellInfo::UNKNOWN.clone();
        info.name = "ziggsw".to_string();
        info.range = 1000.0;
        info.add_flags(SpellFlags::FIXED_DESTINATION);

        assert_eq!(missile(&info).landing_position(), Vector3::new(0.0, 0.0, 2000.0));
    }

    #[test]
    fn test_decode_missile() {
        let offsets = crate::offset::builtin_offsets().missile;
        let mut bytes = vec![0u8; crate::memory::layout::missile::READ_SIZE];
        let start = offsets.src_index as usize;
        bytes[start..start + 2].copy_from_slice(&3i16.to_le_bytes());
        let start = offsets.end_pos as usize;
        bytes[start..start + 4].copy_from_slice(&450.0f32.to_le_bytes());

        let info = SpellInfo::UNKNOWN;
        let missile = Missile::from_buffer(
            0x5000,
            &ByteBuffer::new(&bytes),
            &offsets,
            "caitlynpiltoverpeacemaker".to_string(),
            &info,
        );

        assert_eq!(missile.src_index, 3);
        assert_eq!(missile.end_pos.x, 450.0);
        assert!(!missile.is_targeted());
    }
}
