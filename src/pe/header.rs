use crate::error;
use crate::types::{U16Ne, U32Ne};
use log::debug;
use scroll::ctx::SizeWith as _;
use scroll::{Pread, SizeWith};

/// COFF Header
///
/// The header shared by COFF object files and PE images. In an object file it
/// is at offset zero; in an image it follows the `PE\0\0` signature.
///
/// Every field is native-endian tagged: the header is stored in the target
/// machine's byte order. It carries no methods; the free functions in this
/// module interpret it.
#[repr(C)]
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Pread, SizeWith)]
#[doc(alias("IMAGE_FILE_HEADER"))]
pub struct CoffHeader {
    /// The machine type, see [`machine_to_str`]
    pub machine: U16Ne,
    /// Number of entries in the section table
    pub number_of_sections: U16Ne,
    /// Seconds since 00:00:00 01/01/1970 UTC at which the file was created
    pub time_date_stamp: U32Ne,
    /// File offset of the COFF symbol table, or zero. Zero in images.
    pub pointer_to_symbol_table: U32Ne,
    /// Number of entries in the symbol table. Zero in images.
    ///
    /// The string table starts right after the symbol table, see
    /// [`string_table_offset`].
    pub number_of_symbol_table: U32Ne,
    /// Byte length of the optional header that follows, zero for object files
    pub size_of_optional_header: U16Ne,
    /// Attribute flags, see [`crate::pe::characteristic`]
    pub characteristics: U16Ne,
}

pub const SIZEOF_COFF_HEADER: usize = 20;
/// Size of one COFF symbol table entry
pub const SIZEOF_SYMBOL: usize = 18;
/// PE\0\0, little endian
pub const PE_MAGIC: u32 = 0x0000_4550;
pub const SIZEOF_PE_MAGIC: usize = 4;

/// Read a COFF header at `offset`, advancing it past the header.
///
/// `le` is the byte order of the file, which for a COFF header is the byte
/// order of the machine it targets.
pub fn parse_coff_header(
    bytes: &[u8],
    offset: &mut usize,
    le: scroll::Endian,
) -> error::Result<CoffHeader> {
    let header: CoffHeader = bytes.gread_with(offset, le)?;
    debug!(
        "coff header at {:#x}: machine {:#x} ({}), {} sections",
        *offset - SIZEOF_COFF_HEADER,
        header.machine,
        machine_to_str(header.machine.get()),
        header.number_of_sections
    );
    Ok(header)
}

/// View the start of `bytes` as a COFF header in the host's byte order,
/// without copying.
///
/// `bytes` must be at least [`SIZEOF_COFF_HEADER`] long and aligned for a
/// `u32`.
pub fn coff_header_from_bytes(bytes: &[u8]) -> error::Result<&CoffHeader> {
    plain::from_bytes(bytes).map_err(|err| match err {
        plain::Error::TooShort => {
            error::Error::BufferTooShort(SIZEOF_COFF_HEADER, "bytes for a COFF header")
        }
        plain::Error::BadAlignment => error::Error::Malformed(alloc::format!(
            "COFF header view at {:p} is not aligned to {} bytes",
            bytes.as_ptr(),
            core::mem::align_of::<CoffHeader>()
        )),
    })
}

// SAFETY: repr(C), no padding, every field is a Plain integer wrapper
unsafe impl plain::Plain for CoffHeader {}

/// File offset of the string table, which immediately follows the symbol
/// table. `None` when the header has no symbol table, as in a PE image.
pub fn string_table_offset(header: &CoffHeader) -> Option<usize> {
    match header.pointer_to_symbol_table.get() {
        0 => None,
        pointer => Some(
            pointer as usize + header.number_of_symbol_table.get() as usize * SIZEOF_SYMBOL,
        ),
    }
}

/// The contents of this field are assumed to be applicable to any machine type
pub const COFF_MACHINE_UNKNOWN: u16 = 0x0;
/// Matsushita AM33
pub const COFF_MACHINE_AM33: u16 = 0x1d3;
/// x64
pub const COFF_MACHINE_X86_64: u16 = 0x8664;
/// ARM little endian
pub const COFF_MACHINE_ARM: u16 = 0x1c0;
/// ARM64 little endian
pub const COFF_MACHINE_ARM64: u16 = 0xaa64;
/// ARM Thumb-2 little endian
pub const COFF_MACHINE_ARMNT: u16 = 0x1c4;
/// EFI byte code
pub const COFF_MACHINE_EBC: u16 = 0xebc;
/// Intel 386 or later processors and compatible processors
pub const COFF_MACHINE_X86: u16 = 0x14c;
/// Intel Itanium processor family
pub const COFF_MACHINE_IA64: u16 = 0x200;
/// Mitsubishi M32R little endian
pub const COFF_MACHINE_M32R: u16 = 0x9041;
/// MIPS16
pub const COFF_MACHINE_MIPS16: u16 = 0x266;
/// MIPS with FPU
pub const COFF_MACHINE_MIPSFPU: u16 = 0x366;
/// MIPS16 with FPU
pub const COFF_MACHINE_MIPSFPU16: u16 = 0x466;
/// Power PC little endian
pub const COFF_MACHINE_POWERPC: u16 = 0x1f0;
/// Power PC with floating point support
pub const COFF_MACHINE_POWERPCFP: u16 = 0x1f1;
/// MIPS little endian (R4000)
///
/// Not present in [`MACHINES`]; see the note there.
pub const COFF_MACHINE_MIPS: u16 = 0x166;
/// RISC-V 32-bit address space
pub const COFF_MACHINE_RISCV32: u16 = 0x5032;
/// RISC-V 64-bit address space
pub const COFF_MACHINE_RISCV64: u16 = 0x5064;
/// RISC-V 128-bit address space
pub const COFF_MACHINE_RISCV128: u16 = 0x5128;
/// Hitachi SH3
pub const COFF_MACHINE_SH3: u16 = 0x1a2;
/// Hitachi SH3 DSP
pub const COFF_MACHINE_SH3DSP: u16 = 0x1a3;
/// Hitachi SH4
pub const COFF_MACHINE_SH4: u16 = 0x1a6;
/// Hitachi SH5
pub const COFF_MACHINE_SH5: u16 = 0x1a8;
/// Thumb
pub const COFF_MACHINE_THUMB: u16 = 0x1c2;
/// MIPS little-endian WCE v2
pub const COFF_MACHINE_WCEMIPSV2: u16 = 0x169;

/// Returned by [`machine_to_str`] for a code not in [`MACHINES`]
pub const UNRECOGNISED_MACHINE: &str = "Unrecognised (COFF)";

/// Machine codes and their names, in lookup order.
///
/// `COFF_MACHINE_MIPSFPU` appears twice: the second entry carries the name
/// that belongs to [`COFF_MACHINE_MIPS`], which has no entry of its own. Since
/// lookups stop at the first match, `0x366` names "MIPS with FPU" and `0x166`
/// is unrecognised.
pub static MACHINES: &[(u16, &str)] = &[
    (COFF_MACHINE_UNKNOWN, "Unknown/Default (COFF)"),
    (COFF_MACHINE_AM33, "Matsushita AM33 (COFF)"),
    (COFF_MACHINE_X86_64, "x86_64 (COFF)"),
    (COFF_MACHINE_ARM, "ARM32 little endian (COFF)"),
    (COFF_MACHINE_ARM64, "ARM64 little endian (COFF)"),
    (COFF_MACHINE_ARMNT, "ARM Thumb-2 little endian (COFF)"),
    (COFF_MACHINE_EBC, "EFI bytecode (COFF)"),
    (COFF_MACHINE_X86, "x86 (COFF)"),
    (COFF_MACHINE_IA64, "IA64 Itanium (COFF)"),
    (COFF_MACHINE_M32R, "Mitshubishi M32R little endian (COFF)"),
    (COFF_MACHINE_MIPS16, "MIPS16 (COFF)"),
    (COFF_MACHINE_MIPSFPU, "MIPS with FPU (COFF)"),
    (COFF_MACHINE_MIPSFPU16, "MIPS 16-bit with FPU (COFF)"),
    (COFF_MACHINE_POWERPC, "PowerPC (COFF)"),
    (COFF_MACHINE_POWERPCFP, "PowerPC with FPU (COFF)"),
    // TODO: key this entry on COFF_MACHINE_MIPS once callers no longer expect 0x166 to be unrecognised
    (COFF_MACHINE_MIPSFPU, "MIPS little endian (COFF)"),
    (COFF_MACHINE_RISCV32, "RISC-V 32-bit (COFF)"),
    (COFF_MACHINE_RISCV64, "RISC-V 64-bit (COFF)"),
    (COFF_MACHINE_RISCV128, "RISC-V 128-bit (COFF)"),
    (COFF_MACHINE_SH3, "Hitachi SH3 (COFF)"),
    (COFF_MACHINE_SH3DSP, "Hitachi Sh3 DSP (COFF)"),
    (COFF_MACHINE_SH4, "Hitachi SH4 (COFF)"),
    (COFF_MACHINE_SH5, "Hitachi SH5 (COFF)"),
    (COFF_MACHINE_THUMB, "ARM Thumb (COFF)"),
    (COFF_MACHINE_WCEMIPSV2, "MIPS WCE v2 little endian (COFF)"),
];

/// Convert machine to str representation
///
/// Returns [`UNRECOGNISED_MACHINE`] for a code that is not in [`MACHINES`].
pub fn machine_to_str(machine: u16) -> &'static str {
    MACHINES
        .iter()
        .find(|&&(code, _)| code == machine)
        .map_or(UNRECOGNISED_MACHINE, |&(_, name)| name)
}

/// Whether `machine` is one of the codes in [`MACHINES`].
///
/// [`COFF_MACHINE_UNKNOWN`] is a known code: it is the specification's value
/// for "any machine", not an unrecognised one.
pub fn is_machine_known(machine: u16) -> bool {
    MACHINES.iter().any(|&(code, _)| code == machine)
}
