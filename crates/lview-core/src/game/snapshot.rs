//! Per-frame snapshot of the game state.
//!
//! The object manager keeps every live object in a binary tree keyed by
//! network id. Each frame the tree is walked breadth-first, every tracked
//! object is copied out in one read and classified by the tags of its unit
//! data. Objects with no unit data are probed as missiles.

use std::collections::{HashSet, VecDeque};

use serde::Serialize;
use tracing::{debug, warn};

use crate::data::GameData;
use crate::error::{Error, Result};
use crate::game::math::{Matrix4, Vector2, multiply_matrices};
use crate::game::missile::Missile;
use crate::game::object::{GameObject, ObjectKind};
use crate::game::spell::Spell;
use crate::memory::layout::{self, POINTER_SIZE, tree};
use crate::memory::{ByteBuffer, ReadMemory};
use crate::offset::OffsetTable;

/// Result of walking the object manager tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeWalk {
    /// Object addresses of nodes with a tracked network id
    pub objects: Vec<u64>,
    /// Nodes visited, at most [`tree::MAX_OBJECTS`]
    pub visited: usize,
}

/// Everything the overlay knows about one frame
#[derive(Debug, Clone, Default, Serialize)]
pub struct MemSnapshot<'a> {
    pub game_time: f32,
    pub champions: Vec<GameObject<'a>>,
    pub minions: Vec<GameObject<'a>>,
    pub jungle: Vec<GameObject<'a>>,
    pub turrets: Vec<GameObject<'a>>,
    pub others: Vec<GameObject<'a>>,
    pub missiles: Vec<Missile<'a>>,
    /// Index into `champions`
    pub local_champion: Option<usize>,
    pub view_proj: Matrix4,
    pub screen_width: i32,
    pub screen_height: i32,
    pub minimap_pos: Vector2,
    pub minimap_size: Vector2,
    pub nodes_visited: usize,
}

impl<'a> MemSnapshot<'a> {
    /// Read a full snapshot from `reader`
    pub fn read<R: ReadMemory>(
        reader: &R,
        offsets: &OffsetTable,
        data: &'a GameData,
    ) -> Result<Self> {
        SnapshotReader::new(reader, offsets, data).read()
    }

    pub fn local_champion(&self) -> Option<&GameObject<'a>> {
        self.local_champion.and_then(|i| self.champions.get(i))
    }

    /// Total number of units (missiles excluded)
    pub fn unit_count(&self) -> usize {
        self.champions.len()
            + self.minions.len()
            + self.jungle.len()
            + self.turrets.len()
            + self.others.len()
    }

    fn push(&mut self, object: GameObject<'a>) {
        let list = match object.kind() {
            ObjectKind::Champion => &mut self.champions,
            ObjectKind::Minion => &mut self.minions,
            ObjectKind::Jungle => &mut self.jungle,
            ObjectKind::Turret => &mut self.turrets,
            ObjectKind::Other => &mut self.others,
        };
        list.push(object);
    }
}

/// Reads snapshots through one offset table and knowledge base
pub struct SnapshotReader<'r, 'a, R: ReadMemory> {
    reader: &'r R,
    offsets: &'r OffsetTable,
    data: &'a GameData,
}

impl<'r, 'a, R: ReadMemory> SnapshotReader<'r, 'a, R> {
    pub fn new(reader: &'r R, offsets: &'r OffsetTable, data: &'a GameData) -> Self {
        Self {
            reader,
            offsets,
            data,
        }
    }

    fn global(&self, offset: u64) -> Result<u64> {
        offset_address(self.reader.base_address(), offset)
    }

    pub fn read(&self) -> Result<MemSnapshot<'a>> {
        let mut snapshot = MemSnapshot {
            game_time: self.read_game_time()?,
            ..Default::default()
        };

        let walk = self.walk_object_tree()?;
        snapshot.nodes_visited = walk.visited;

        for address in walk.objects {
            match self.read_entry(address) {
                Ok(Entry::Unit(object)) => snapshot.push(object),
                Ok(Entry::Missile(missile)) => snapshot.missiles.push(missile),
                Ok(Entry::Unknown) => {}
                Err(e) => debug!("Skipping object at {:#x}: {}", address, e),
            }
        }

        self.attach_local_player(&mut snapshot)?;
        snapshot.view_proj = self.read_view_proj()?;

        // The HUD objects are null while the client is still loading.
        match self.read_screen_size() {
            Ok(size) => (snapshot.screen_width, snapshot.screen_height) = size,
            Err(e) => warn!("Renderer unreadable, screen size left at zero: {}", e),
        }
        match self.read_minimap() {
            Ok(geometry) => (snapshot.minimap_pos, snapshot.minimap_size) = geometry,
            Err(e) => debug!("Minimap unreadable: {}", e),
        }

        debug!(
            "Snapshot at {:.1}s: {} champions, {} minions, {} jungle, {} turrets, {} others, {} missiles ({} nodes)",
            snapshot.game_time,
            snapshot.champions.len(),
            snapshot.minions.len(),
            snapshot.jungle.len(),
            snapshot.turrets.len(),
            snapshot.others.len(),
            snapshot.missiles.len(),
            snapshot.nodes_visited,
        );

        Ok(snapshot)
    }

    pub fn read_game_time(&self) -> Result<f32> {
        self.reader
            .read_f32(self.global(self.offsets.globals.game_time)?)
    }

    /// Breadth-first walk of the object manager tree.
    ///
    /// Nodes are visited once; the walk stops after [`tree::MAX_OBJECTS`]
    /// nodes. An unreadable node is skipped along with its subtree.
    pub fn walk_object_tree(&self) -> Result<TreeWalk> {
        let manager_offsets = &self.offsets.object_manager;
        let manager = self
            .reader
            .read_ptr(self.global(self.offsets.globals.object_manager)?)?;
        let root = self
            .reader
            .read_ptr(offset_address(manager, manager_offsets.map_root)?)?;

        let mut walk = TreeWalk::default();
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([root]);

        while let Some(node) = queue.pop_front() {
            if visited.len() >= tree::MAX_OBJECTS {
                debug!("Object tree walk stopped at {} nodes", visited.len());
                break;
            }
            if node == 0 || !visited.insert(node) {
                continue;
            }

            let bytes = match self.reader.read_bytes(node, tree::NODE_SIZE) {
                Ok(bytes) => bytes,
                Err(e) => {
                    debug!("Unreadable tree node {:#x}: {}", node, e);
                    continue;
                }
            };
            let buffer = ByteBuffer::new(&bytes);

            for link in tree::LINKS {
                let child = buffer.ptr_at(link);
                if child != 0 && !visited.contains(&child) {
                    queue.push_back(child);
                }
            }

            let net_id = buffer.u32_at(manager_offsets.node_net_id);
            if !tree::is_tracked_net_id(net_id) {
                continue;
            }

            let object = buffer.ptr_at(manager_offsets.node_object);
            if object != 0 {
                walk.objects.push(object);
            }
        }

        walk.visited = visited.len();
        Ok(walk)
    }

    /// Read the object at `address`; champions also get their spells and items
    pub fn read_object(&self, address: u64) -> Result<GameObject<'a>> {
        let bytes = self.reader.read_bytes(address, layout::object::READ_SIZE)?;
        let buffer = ByteBuffer::new(&bytes);
        Ok(self.decode_object(address, &buffer))
    }

    fn decode_object(&self, address: u64, buffer: &ByteBuffer) -> GameObject<'a> {
        let object_offsets = &self.offsets.object;
        let name = self.read_name(buffer.ptr_at(object_offsets.name));
        let unit_info = self.data.get_unit_info_by_name(&name);

        let mut object = GameObject::from_buffer(address, buffer, object_offsets, name, unit_info);
        if object.kind() == ObjectKind::Champion {
            object.spells = self.read_spells(buffer);
            object.items = self.read_items(buffer);
        }
        object
    }

    fn read_entry(&self, address: u64) -> Result<Entry<'a>> {
        let bytes = self.reader.read_bytes(address, layout::object::READ_SIZE)?;
        let buffer = ByteBuffer::new(&bytes);

        let object = self.decode_object(address, &buffer);
        if !object.unit_info.is_unknown() {
            return Ok(Entry::Unit(object));
        }

        Ok(match self.probe_missile(address, &buffer) {
            Some(missile) => Entry::Missile(missile),
            None => Entry::Unknown,
        })
    }

    /// Interpret an object block as a missile; `None` unless its spell is known
    fn probe_missile(&self, address: u64, buffer: &ByteBuffer) -> Option<Missile<'a>> {
        let offsets = &self.offsets;
        let spell_info = buffer.ptr_at(offsets.missile.spell_info);
        if spell_info == 0 {
            return None;
        }

        let name = self
            .read_spell_data_string(spell_info, offsets.spell_info.missile_name)
            .ok()?;
        let info = self.data.get_spell_info_by_name(&name);
        if info.is_unknown() {
            return None;
        }

        Some(Missile::from_buffer(
            address,
            buffer,
            &offsets.missile,
            name,
            info,
        ))
    }

    fn read_spells(&self, buffer: &ByteBuffer) -> Vec<Spell<'a>> {
        let offsets = &self.offsets;
        let mut spells = Vec::with_capacity(layout::object::SPELL_SLOTS);

        for slot in 0..layout::object::SPELL_SLOTS {
            let address = buffer.ptr_at(
                offsets
                    .object
                    .spell_book
                    .saturating_add(slot as u64 * POINTER_SIZE),
            );
            if address == 0 {
                continue;
            }

            match self.read_spell(address, slot) {
                Ok(spell) => spells.push(spell),
                Err(e) => debug!("Skipping spell slot {} at {:#x}: {}", slot, address, e),
            }
        }

        spells
    }

    fn read_spell(&self, address: u64, slot: usize) -> Result<Spell<'a>> {
        let slot_offsets = &self.offsets.spell_slot;
        let bytes = self.reader.read_bytes(address, layout::spell::READ_SIZE)?;
        let buffer = ByteBuffer::new(&bytes);

        let name = self.read_spell_data_string(
            buffer.ptr_at(slot_offsets.spell_info),
            self.offsets.spell_info.spell_name,
        )?;
        let info = self.data.get_spell_info_by_name(&name);

        Ok(Spell::from_buffer(
            address,
            slot,
            &buffer,
            slot_offsets,
            name,
            info,
        ))
    }

    /// Follow spell info -> spell data -> string pointer
    fn read_spell_data_string(&self, spell_info: u64, field: u64) -> Result<String> {
        let spell_data = self
            .reader
            .read_ptr(offset_address(spell_info, self.offsets.spell_info.spell_data)?)?;
        let name = self.reader.read_ptr(offset_address(spell_data, field)?)?;
        self.reader.read_c_string(name)
    }

    fn read_items(&self, buffer: &ByteBuffer) -> Vec<u32> {
        let offsets = &self.offsets;

        (0..layout::object::ITEM_SLOTS as u64)
            .filter_map(|slot| {
                // Out-of-range entries read as null in the buffer.
                let entry = offsets
                    .object
                    .item_list
                    .saturating_add(slot * layout::object::ITEM_SLOT_STRIDE)
                    .saturating_add(offsets.item.list_item);
                let item = buffer.ptr_at(entry);
                if item == 0 {
                    return None;
                }

                let info = self
                    .reader
                    .read_ptr(offset_address(item, offsets.item.info).ok()?)
                    .ok()?;
                let id = self
                    .reader
                    .read_u32(offset_address(info, offsets.item.info_id).ok()?)
                    .ok()?;
                (id != 0).then_some(id)
            })
            .collect()
    }

    fn read_name(&self, address: u64) -> String {
        if address == 0 {
            return String::new();
        }
        self.reader.read_c_string(address).unwrap_or_default()
    }

    /// Mark the local player, reading it directly if the walk missed it
    fn attach_local_player(&self, snapshot: &mut MemSnapshot<'a>) -> Result<()> {
        let address = self
            .reader
            .read_ptr(self.global(self.offsets.globals.local_player)?)?;
        if address == 0 {
            return Ok(());
        }

        if let Some(index) = snapshot.champions.iter().position(|c| c.address == address) {
            snapshot.local_champion = Some(index);
            return Ok(());
        }

        match self.read_object(address) {
            Ok(object) if object.kind() == ObjectKind::Champion => {
                snapshot.champions.push(object);
                snapshot.local_champion = Some(snapshot.champions.len() - 1);
            }
            Ok(object) => debug!("Local player {:?} is not a champion", object.name),
            Err(e) => debug!("Local player unreadable: {}", e),
        }
        Ok(())
    }

    /// View and projection matrices multiplied together
    pub fn read_view_proj(&self) -> Result<Matrix4> {
        let address = self.global(self.offsets.globals.view_proj_matrices)?;
        let bytes = self.reader.read_bytes(address, layout::matrix::BYTES * 2)?;
        let buffer = ByteBuffer::new(&bytes);

        let matrix = |start: usize| -> Matrix4 {
            std::array::from_fn(|i| buffer.f32_at(((start + i) * 4) as u64))
        };
        let view = matrix(0);
        let proj = matrix(layout::matrix::FLOATS);

        Ok(multiply_matrices(&view, &proj))
    }

    pub fn read_screen_size(&self) -> Result<(i32, i32)> {
        let renderer = self
            .reader
            .read_ptr(self.global(self.offsets.globals.renderer)?)?;
        let width = self
            .reader
            .read_i32(offset_address(renderer, self.offsets.renderer.width)?)?;
        let height = self
            .reader
            .read_i32(offset_address(renderer, self.offsets.renderer.height)?)?;
        Ok((width, height))
    }

    /// Minimap position and size in screen pixels
    pub fn read_minimap(&self) -> Result<(Vector2, Vector2)> {
        let minimap_offsets = &self.offsets.minimap;
        let minimap = self
            .reader
            .read_ptr(self.global(self.offsets.globals.minimap_object)?)?;
        let hud = self
            .reader
            .read_ptr(offset_address(minimap, minimap_offsets.object_hud)?)?;

        let read_vec = |offset: u64| -> Result<Vector2> {
            let x = offset_address(hud, offset)?;
            Ok(Vector2::new(
                self.reader.read_f32(x)?,
                self.reader.read_f32(offset_address(x, 4)?)?,
            ))
        };

        Ok((
            read_vec(minimap_offsets.hud_pos)?,
            read_vec(minimap_offsets.hud_size)?,
        ))
    }
}

/// `base + offset`, rejecting offsets that overflow the address space
fn offset_address(base: u64, offset: u64) -> Result<u64> {
    base.checked_add(offset).ok_or_else(|| {
        Error::InvalidOffset(format!("{:#x} + {:#x} overflows", base, offset))
    })
}

enum Entry<'a> {
    Unit(GameObject<'a>),
    Missile(Missile<'a>),
    Unknown,
}
