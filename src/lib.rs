//! # pecoff-catalog
//!
//! The on-disk shapes of the COFF file header and the PE "optional" header,
//! built from fixed-width, byte-order tagged integers, together with the
//! catalogs that turn the codes found in those headers into readable names.
//!
//! Every header field is one of the [`types`] primitives, so a struct's size
//! and field offsets are the same on every host:
//!
//! ```rust
//! use pecoff_catalog::pe::header::{CoffHeader, SIZEOF_COFF_HEADER};
//! use pecoff_catalog::pe::optional_header::{OptionalHeader, SIZEOF_STANDARD_FIELDS_32};
//!
//! assert_eq!(core::mem::size_of::<CoffHeader>(), SIZEOF_COFF_HEADER);
//! assert_eq!(core::mem::size_of::<OptionalHeader>(), SIZEOF_STANDARD_FIELDS_32);
//! ```
//!
//! The catalogs never fail; a code they do not list resolves to a sentinel
//! string:
//!
//! ```rust
//! use pecoff_catalog::pe::header::{machine_to_str, is_machine_known, COFF_MACHINE_X86_64};
//! use pecoff_catalog::pe::optional_header::magic_to_str;
//! use pecoff_catalog::pe::characteristic::characteristic_to_str;
//!
//! assert_eq!(machine_to_str(COFF_MACHINE_X86_64), "x86_64 (COFF)");
//! assert!(!is_machine_known(0xffff));
//! assert_eq!(machine_to_str(0xffff), "Unrecognised (COFF)");
//! assert_eq!(magic_to_str(0x10b), "PE32 Image (PE)");
//! assert_eq!(characteristic_to_str(0x0002), "PE image is a valid executable (COFF)");
//! ```
//!
//! # Reading headers
//!
//! The headers derive [`scroll::Pread`], and [`pe::header::parse_coff_header`] and
//! [`pe::optional_header::parse_optional_header`] wrap that with the checks a
//! reader needs (the optional header changes shape with its magic number):
//!
//! ```rust
//! use pecoff_catalog::pe::header::{self, COFF_MACHINE_X86};
//!
//! let bytes = [
//!     0x4c, 0x01, 0x05, 0x00, 0xd9, 0x8f, 0x15, 0x52, 0x00, 0x00, 0x00, 0x00,
//!     0x00, 0x00, 0x00, 0x00, 0xe0, 0x00, 0x02, 0x01,
//! ];
//! let mut offset = 0;
//! let coff = header::parse_coff_header(&bytes, &mut offset, scroll::LE).unwrap();
//! assert_eq!(coff.machine.get(), COFF_MACHINE_X86);
//! assert_eq!(coff.number_of_sections.get(), 5);
//! assert_eq!(offset, header::SIZEOF_COFF_HEADER);
//! ```
//!
//! # Features
//!
//! * `std` (default) - implements `std::error::Error` for the crate's errors and enables
//!   `scroll/std`. Without it the crate is `no_std` and only needs `alloc`.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod error;
pub mod options;
pub mod types;
pub mod pe;
