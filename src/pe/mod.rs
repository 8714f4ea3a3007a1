//! The COFF file header and the PE32 optional header, and the catalogs that
//! name the codes found in them.
//!
//! * [`header`] - the COFF header and the machine catalog
//! * [`optional_header`] - the PE32 standard fields and the magic catalog
//! * [`characteristic`] - the COFF characteristic flags and their catalog
//!
//! The catalogs are `static` tables scanned front to back; the first entry
//! whose code matches wins. They are never written, so they can be read from
//! any number of threads.

pub mod characteristic;
pub mod header;
pub mod optional_header;
