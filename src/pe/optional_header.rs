use crate::error;
use crate::options::{ParseOptions, Permissive};
use crate::types::{U8Ne, U16Ne, U32Ne};
use log::debug;
use scroll::ctx::SizeWith as _;
use scroll::{Pread, SizeWith};

/// The standard fields of the PE32 optional header.
///
/// Despite the name the optional header is required in every PE image; only
/// object files go without it. This is the PE32 shape. PE32+ images drop
/// `base_of_data`, so check [`magic`](OptionalHeader::magic) (or use
/// [`base_of_data`]) before trusting that field.
#[repr(C)]
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Pread, SizeWith)]
pub struct OptionalHeader {
    /// Image class, see [`magic_to_str`]
    pub magic: U16Ne,
    pub major_linker_version: U8Ne,
    pub minor_linker_version: U8Ne,
    /// Size of all code (`.text`) sections
    pub size_of_code: U32Ne,
    /// Size of all initialized data (`.data`) sections
    pub size_of_initialized_data: U32Ne,
    /// Size of all uninitialized data (`.bss`) sections
    pub size_of_uninitialized_data: U32Ne,
    /// RVA of the entry point, zero when the image has none
    pub address_of_entry_point: U32Ne,
    /// RVA of the start of the code section once loaded
    pub base_of_code: U32Ne,
    /// RVA of the start of the data section once loaded.
    ///
    /// Only present in PE32 (and ROM) images; zero when read from a PE32+ image.
    pub base_of_data: U32Ne,
}

pub const SIZEOF_STANDARD_FIELDS_32: usize = 28;
pub const SIZEOF_STANDARD_FIELDS_64: usize = 24;

/// Standard fields magic number for a 32-bit (PE32) image
pub const MAGIC_32: u16 = 0x10b;
/// Standard fields magic number for a 64-bit (PE32+) image
pub const MAGIC_64: u16 = 0x20b;
/// Standard fields magic number for a ROM image
pub const MAGIC_ROM: u16 = 0x107;

/// Returned by [`magic_to_str`] for a magic number not in [`MAGICS`]
pub const UNRECOGNISED_MAGIC: &str = "Unrecognised (PE)";

/// Magic numbers and their names, in lookup order
pub static MAGICS: &[(u16, &str)] = &[
    (MAGIC_32, "PE32 Image (PE)"),
    (MAGIC_64, "PE32+ Image (PE)"),
    (MAGIC_ROM, "PE ROM Image (PE)"),
];

/// Convert an optional header magic number to its image class name
pub fn magic_to_str(magic: u16) -> &'static str {
    MAGICS
        .iter()
        .find(|&&(code, _)| code == magic)
        .map_or(UNRECOGNISED_MAGIC, |&(_, name)| name)
}

/// Whether `magic` is one of the numbers in [`MAGICS`]
pub fn is_magic_known(magic: u16) -> bool {
    MAGICS.iter().any(|&(code, _)| code == magic)
}

/// Whether an optional header with this magic carries `base_of_data`, or
/// `None` if the magic is not recognised.
fn has_base_of_data(magic: u16) -> Option<bool> {
    match magic {
        MAGIC_32 | MAGIC_ROM => Some(true),
        MAGIC_64 => Some(false),
        _ => None,
    }
}

/// `base_of_data` if the header's magic says the field is there
pub fn base_of_data(header: &OptionalHeader) -> Option<u32> {
    match has_base_of_data(header.magic.get()) {
        Some(true) => Some(header.base_of_data.get()),
        _ => None,
    }
}

/// Read the optional header's standard fields at `offset`, advancing it by
/// the number of bytes the image class uses (28 for PE32 and ROM, 24 for
/// PE32+).
///
/// An unrecognised magic is an [`error::Error::BadMagic`], unless `opts` is
/// permissive, in which case the fields are read in the PE32 shape.
pub fn parse_optional_header(
    bytes: &[u8],
    offset: &mut usize,
    le: scroll::Endian,
    opts: &ParseOptions,
) -> error::Result<OptionalHeader> {
    let start = *offset;
    let magic: u16 = bytes.pread_with(start, le)?;
    let has_base_of_data = has_base_of_data(magic)
        .ok_or(error::Error::BadMagic(magic as u64))
        .or_permissive_and_value(
            opts.parse_mode.is_permissive(),
            "unrecognised optional header magic, reading PE32 standard fields",
            true,
        )?;
    let size = if has_base_of_data {
        SIZEOF_STANDARD_FIELDS_32
    } else {
        SIZEOF_STANDARD_FIELDS_64
    };
    if bytes.len().saturating_sub(start) < size {
        return Err(error::Error::BufferTooShort(
            size,
            "bytes for optional header standard fields",
        ));
    }

    let header: OptionalHeader = if has_base_of_data {
        bytes.gread_with(offset, le)?
    } else {
        // PE32+ ends at base_of_code; the missing base_of_data reads as zero
        let mut fields = [0u8; SIZEOF_STANDARD_FIELDS_32];
        fields[..size].copy_from_slice(&bytes[start..start + size]);
        let header: OptionalHeader = fields.pread_with(0, le)?;
        *offset += size;
        header
    };
    debug!(
        "optional header at {:#x}: {} ({:#x}), linker {}.{}, entry {:#x}",
        start,
        magic_to_str(magic),
        magic,
        header.major_linker_version,
        header.minor_linker_version,
        header.address_of_entry_point
    );
    Ok(header)
}
