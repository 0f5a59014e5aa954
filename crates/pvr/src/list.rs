//! Command lists.

use crate::cmd::{ListType, ParamControl, ParamType};
use crate::header::PolyHeader;
use crate::vertex::Vertex;
use static_assertions::const_assert_eq;
use strum::VariantArray;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// A raw 32-byte parameter record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, align(32))]
pub struct Record(pub [u32; 8]);

const_assert_eq!(size_of::<Record>(), 32);

/// A decoded record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Header(PolyHeader),
    Vertex(Vertex),
    Unknown(Record),
}

impl Command {
    pub fn decode(record: &Record) -> Self {
        let control = ParamControl::from_bits(record.0[0]);
        match control.param() {
            ParamType::PolyHeader => Self::Header(PolyHeader::from_record(record)),
            ParamType::Vertex => Self::Vertex(Vertex::from_record(record)),
            _ => Self::Unknown(*record),
        }
    }
}

/// A growable list of records destined to a single display list.
#[derive(Debug, Clone)]
pub struct CommandList {
    list: ListType,
    records: Vec<Record>,
}

impl CommandList {
    pub fn new(list: ListType) -> Self {
        Self {
            list,
            records: Vec::new(),
        }
    }

    #[inline(always)]
    pub fn list_type(&self) -> ListType {
        self.list
    }

    /// Appends `count` zeroed records and returns a handle to them.
    pub fn reserve(&mut self, count: usize) -> Region<'_> {
        let start = self.records.len();
        self.records.resize(start + count, Record::default());
        tracing::trace!(list = ?self.list, start, count, "reserved records");

        Region {
            records: &mut self.records[start..],
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline(always)]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn commands(&self) -> impl Iterator<Item = Command> + '_ {
        self.records.iter().map(Command::decode)
    }

    /// The hardware byte stream of this list.
    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        self.records.as_bytes()
    }

    /// Drops every record, keeping the allocation.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

/// A reserved run of records. Slot 0 holds the polygon header and vertices follow it.
pub struct Region<'list> {
    records: &'list mut [Record],
}

impl Region<'_> {
    /// Number of vertex slots after the header.
    #[inline(always)]
    pub fn vertex_count(&self) -> usize {
        self.records.len().saturating_sub(1)
    }

    pub fn set_header(&mut self, header: &PolyHeader) {
        self.records[0] = header.to_record();
    }

    /// Writes vertex `index` of the region, which lives right after the header.
    #[inline(always)]
    pub fn set_vertex(&mut self, index: usize, vertex: &Vertex) {
        self.records[index + 1] = vertex.to_record();
    }
}

/// One command list per list type.
#[derive(Debug, Clone)]
pub struct Lists([CommandList; ListType::COUNT]);

impl Default for Lists {
    fn default() -> Self {
        Self(std::array::from_fn(|i| {
            CommandList::new(ListType::VARIANTS[i])
        }))
    }
}

impl Lists {
    pub fn iter(&self) -> impl Iterator<Item = &CommandList> {
        self.0.iter()
    }

    /// Total number of records over all lists.
    pub fn len(&self) -> usize {
        self.0.iter().map(CommandList::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(CommandList::is_empty)
    }

    pub fn clear(&mut self) {
        self.0.iter_mut().for_each(CommandList::clear);
    }
}

impl std::ops::Index<ListType> for Lists {
    type Output = CommandList;

    #[inline(always)]
    fn index(&self, index: ListType) -> &Self::Output {
        &self.0[index.index()]
    }
}

impl std::ops::IndexMut<ListType> for Lists {
    #[inline(always)]
    fn index_mut(&mut self, index: ListType) -> &mut Self::Output {
        &mut self.0[index.index()]
    }
}
