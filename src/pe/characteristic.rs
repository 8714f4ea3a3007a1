//! COFF header characteristics.
//!
//! The `characteristics` field of [`CoffHeader`](crate::pe::header::CoffHeader)
//! is a bit mask, not an enumeration: any combination of the flags below may
//! be set.
//!
//! [`characteristic_to_str`] names one flag. It returns as soon as it finds a
//! set bit, so handed a whole field it only names the first flag (in
//! [`CHARACTERISTICS`] order) that is set. To name every flag, call it once per
//! single-bit mask, which is what [`characteristics_to_strs`] does:
//!
//! ```rust
//! use pecoff_catalog::pe::characteristic::*;
//!
//! let field = IMAGE_FILE_EXECUTABLE_IMAGE | IMAGE_FILE_DLL;
//! assert_eq!(characteristic_to_str(field), "PE image is a valid executable (COFF)");
//!
//! let names: Vec<_> = characteristics_to_strs(field).collect();
//! assert_eq!(
//!     names,
//!     ["PE image is a valid executable (COFF)", "Dynamically linked library (COFF)"]
//! );
//! ```

/// The image has no base relocations and must be loaded at its preferred base address
pub const IMAGE_FILE_RELOCS_STRIPPED: u16 = 0x0001;
/// The image is valid and can be run; unset means a linker error
pub const IMAGE_FILE_EXECUTABLE_IMAGE: u16 = 0x0002;
/// COFF line numbers have been removed. Deprecated and should be zero.
pub const IMAGE_FILE_LINE_NUMS_STRIPPED: u16 = 0x0004;
/// COFF symbol table entries for local symbols have been removed. Deprecated and should be zero.
pub const IMAGE_FILE_LOCAL_SYMS_STRIPPED: u16 = 0x0008;
/// Aggressively trim working set. Obsolete and must be zero.
pub const IMAGE_FILE_AGGRESSIVE_WS_TRIM: u16 = 0x0010;
/// Application can handle addresses above 2 GiB
pub const IMAGE_FILE_LARGE_ADDRESS_AWARE: u16 = 0x0020;
/// Reserved for future use
pub const IMAGE_FILE_RESERVED: u16 = 0x0040;
/// Little endian. Deprecated and should be zero.
pub const IMAGE_FILE_BYTES_REVERSED_LO: u16 = 0x0080;
/// Machine is based on a 32-bit-word architecture
pub const IMAGE_FILE_32BIT_MACHINE: u16 = 0x0100;
/// Debugging information is removed from the image file
pub const IMAGE_FILE_DEBUG_STRIPPED: u16 = 0x0200;
/// If the image is on removable media, fully load it and copy it to swap
pub const IMAGE_FILE_REMOVABLE_RUN_FROM_SWAP: u16 = 0x0400;
/// If the image is on network media, fully load it and copy it to swap
pub const IMAGE_FILE_NET_RUN_FROM_SWAP: u16 = 0x0800;
/// The image is a system file, not a user program
pub const IMAGE_FILE_SYSTEM: u16 = 0x1000;
/// The image is a dynamic-link library
pub const IMAGE_FILE_DLL: u16 = 0x2000;
/// The image should only be run on a uniprocessor machine
pub const IMAGE_FILE_UP_SYSTEM_ONLY: u16 = 0x4000;
/// Big endian. Deprecated and should be zero.
pub const IMAGE_FILE_BYTES_REVERSED_HI: u16 = 0x8000;

/// Returned by [`characteristic_to_str`] when no flag in [`CHARACTERISTICS`] is set
pub const NOT_A_CHARACTERISTIC: &str = "Not a characteristic (COFF)";

/// Characteristic flags and their names, in lookup order
pub static CHARACTERISTICS: &[(u16, &str)] = &[
    (IMAGE_FILE_RELOCS_STRIPPED, "PE relocations stripped (COFF)"),
    (IMAGE_FILE_EXECUTABLE_IMAGE, "PE image is a valid executable (COFF)"),
    (IMAGE_FILE_LINE_NUMS_STRIPPED, "Line numbers stripped. Deprecated/SBZ (COFF)"),
    (IMAGE_FILE_LOCAL_SYMS_STRIPPED, "Local symbols stripped. Deprecated/SBZ (COFF)"),
    (IMAGE_FILE_AGGRESSIVE_WS_TRIM, "Aggressive workspace trim. Obsolete/SBZ (COFF)"),
    (IMAGE_FILE_LARGE_ADDRESS_AWARE, "Large address space aware (COFF)"),
    (IMAGE_FILE_RESERVED, "Reserved 1. SBZ (COFF)"),
    (IMAGE_FILE_BYTES_REVERSED_LO, "Little endian. Deprecated/SBZ (COFF)"),
    (IMAGE_FILE_32BIT_MACHINE, "32-bit image (COFF)"),
    (IMAGE_FILE_DEBUG_STRIPPED, "Debugging info stripped (COFF)"),
    (IMAGE_FILE_REMOVABLE_RUN_FROM_SWAP, "Removable run from swap space (COFF)"),
    (IMAGE_FILE_NET_RUN_FROM_SWAP, "Network run from swap space (COFF)"),
    (IMAGE_FILE_SYSTEM, "Operating system image (COFF)"),
    (IMAGE_FILE_DLL, "Dynamically linked library (COFF)"),
    (IMAGE_FILE_UP_SYSTEM_ONLY, "Uniprocessor only (COFF)"),
    (IMAGE_FILE_BYTES_REVERSED_HI, "Big endian. Deprecated/SBZ (COFF)"),
];

/// Name the first flag in [`CHARACTERISTICS`] whose bit is set in
/// `characteristic`, or [`NOT_A_CHARACTERISTIC`] if none is.
///
/// This does not decompose a field holding several flags; pass one flag at a
/// time, or use [`characteristics_to_strs`].
pub fn characteristic_to_str(characteristic: u16) -> &'static str {
    CHARACTERISTICS
        .iter()
        .find(|&&(flag, _)| characteristic & flag != 0)
        .map_or(NOT_A_CHARACTERISTIC, |&(_, name)| name)
}

/// Names of every flag set in `characteristics`, lowest bit first.
///
/// Masks the field down to one bit at a time and names each with
/// [`characteristic_to_str`].
pub fn characteristics_to_strs(characteristics: u16) -> impl Iterator<Item = &'static str> {
    (0..u16::BITS)
        .map(|bit| 1u16 << bit)
        .filter(move |&mask| characteristics & mask != 0)
        .map(characteristic_to_str)
}

/// Whether the image is a dynamic-link library
pub fn is_dll(characteristics: u16) -> bool {
    characteristics & IMAGE_FILE_DLL == IMAGE_FILE_DLL
}

/// Whether the linker marked the image as valid to run
pub fn is_executable_image(characteristics: u16) -> bool {
    characteristics & IMAGE_FILE_EXECUTABLE_IMAGE == IMAGE_FILE_EXECUTABLE_IMAGE
}
