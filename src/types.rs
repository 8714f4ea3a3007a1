//! Fixed-width integers tagged with the byte order they have on disk.
//!
//! Every header field in this crate is one of these types. Each is a
//! `#[repr(transparent)]` wrapper over the primitive of the same width, so it
//! occupies exactly 1, 2, 4 or 8 bytes with no padding, and a `#[repr(C)]`
//! struct of them has the same layout on every host.
//!
//! The wrapped value is always the integer itself (host order). The tag says
//! how the field is laid out in a file:
//!
//! * `Ne` - native, i.e. the target machine's order. Decoded in whatever order the caller passes
//!   as the [`scroll::Endian`] context.
//! * `Le` - always little endian, whatever the context.
//! * `Be` - always big endian, whatever the context.
//!
//! Types of the same width but different order do not convert into each
//! other; going from one to another is an explicit trip through the raw
//! integer:
//!
//! ```compile_fail
//! use pecoff_catalog::types::{U16Be, U16Le};
//!
//! let le = U16Le::new(0x1234);
//! let be: U16Be = le.into();
//! ```
//!
//! ```rust
//! use pecoff_catalog::types::{U16Be, U16Le};
//!
//! let le = U16Le::new(0x1234);
//! let be = U16Be::new(le.get());
//! assert_eq!(le.to_bytes(), [0x34, 0x12]);
//! assert_eq!(be.to_bytes(), [0x12, 0x34]);
//! ```

use core::fmt;
use scroll::{Endian, ctx};

/// The byte order a typed integer is stored in
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum ByteOrder {
    /// The order of the target machine; decided by the reader's context
    Native,
    /// Least significant byte first
    Little,
    /// Most significant byte first
    Big,
}

impl ByteOrder {
    /// The scroll endianness to decode with, given the reader's context
    #[inline]
    pub fn resolve(self, ctx: Endian) -> Endian {
        match self {
            ByteOrder::Native => ctx,
            ByteOrder::Little => Endian::Little,
            ByteOrder::Big => Endian::Big,
        }
    }
}

macro_rules! typed_int {
    ($(#[$meta:meta])* $name:ident, $ty:ty, $size:literal, $order:ident, $from:ident, $to:ident) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone, Default)]
        pub struct $name($ty);

        impl $name {
            /// Width in bytes
            pub const SIZE: usize = $size;
            /// Byte order of the field on disk
            pub const ORDER: ByteOrder = ByteOrder::$order;

            #[inline]
            pub const fn new(value: $ty) -> Self {
                $name(value)
            }

            /// The integer value
            #[inline]
            pub const fn get(self) -> $ty {
                self.0
            }

            /// Build from the field's on-disk bytes
            #[inline]
            pub const fn from_bytes(bytes: [u8; $size]) -> Self {
                $name(<$ty>::$from(bytes))
            }

            /// The field's on-disk bytes
            #[inline]
            pub const fn to_bytes(self) -> [u8; $size] {
                self.0.$to()
            }
        }

        impl From<$ty> for $name {
            #[inline]
            fn from(value: $ty) -> Self {
                $name(value)
            }
        }

        impl From<$name> for $ty {
            #[inline]
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl fmt::LowerHex for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                fmt::LowerHex::fmt(&self.0, f)
            }
        }

        impl fmt::UpperHex for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                fmt::UpperHex::fmt(&self.0, f)
            }
        }

        impl<'a> ctx::TryFromCtx<'a, Endian> for $name {
            type Error = scroll::Error;
            #[inline]
            fn try_from_ctx(src: &'a [u8], ctx: Endian) -> Result<(Self, usize), Self::Error> {
                let endian = ByteOrder::$order.resolve(ctx);
                let (value, size) = <$ty as ctx::TryFromCtx<'a, Endian>>::try_from_ctx(src, endian)?;
                Ok(($name(value), size))
            }
        }

        impl ctx::SizeWith<Endian> for $name {
            #[inline]
            fn size_with(_ctx: &Endian) -> usize {
                $size
            }
        }

        // SAFETY: a transparent wrapper over an integer is valid for any bit pattern
        unsafe impl plain::Plain for $name {}
    };
}

typed_int!(
    /// A native endian, 8 bit, unsigned integer
    U8Ne, u8, 1, Native, from_ne_bytes, to_ne_bytes
);
typed_int!(
    /// A native endian, 16 bit, unsigned integer
    U16Ne, u16, 2, Native, from_ne_bytes, to_ne_bytes
);
typed_int!(
    /// A native endian, 32 bit, unsigned integer
    U32Ne, u32, 4, Native, from_ne_bytes, to_ne_bytes
);
typed_int!(
    /// A native endian, 64 bit, unsigned integer
    U64Ne, u64, 8, Native, from_ne_bytes, to_ne_bytes
);
typed_int!(
    /// A little endian, 8 bit, unsigned integer
    U8Le, u8, 1, Little, from_le_bytes, to_le_bytes
);
typed_int!(
    /// A little endian, 16 bit, unsigned integer
    U16Le, u16, 2, Little, from_le_bytes, to_le_bytes
);
typed_int!(
    /// A little endian, 32 bit, unsigned integer
    U32Le, u32, 4, Little, from_le_bytes, to_le_bytes
);
typed_int!(
    /// A little endian, 64 bit, unsigned integer
    U64Le, u64, 8, Little, from_le_bytes, to_le_bytes
);
typed_int!(
    /// A big endian, 8 bit, unsigned integer
    U8Be, u8, 1, Big, from_be_bytes, to_be_bytes
);
typed_int!(
    /// A big endian, 16 bit, unsigned integer
    U16Be, u16, 2, Big, from_be_bytes, to_be_bytes
);
typed_int!(
    /// A big endian, 32 bit, unsigned integer
    U32Be, u32, 4, Big, from_be_bytes, to_be_bytes
);
typed_int!(
    /// A big endian, 64 bit, unsigned integer
    U64Be, u64, 8, Big, from_be_bytes, to_be_bytes
);

typed_int!(
    /// A native endian, 8 bit, signed integer
    I8Ne, i8, 1, Native, from_ne_bytes, to_ne_bytes
);
typed_int!(
    /// A native endian, 16 bit, signed integer
    I16Ne, i16, 2, Native, from_ne_bytes, to_ne_bytes
);
typed_int!(
    /// A native endian, 32 bit, signed integer
    I32Ne, i32, 4, Native, from_ne_bytes, to_ne_bytes
);
typed_int!(
    /// A native endian, 64 bit, signed integer
    I64Ne, i64, 8, Native, from_ne_bytes, to_ne_bytes
);
typed_int!(
    /// A little endian, 8 bit, signed integer
    I8Le, i8, 1, Little, from_le_bytes, to_le_bytes
);
typed_int!(
    /// A little endian, 16 bit, signed integer
    I16Le, i16, 2, Little, from_le_bytes, to_le_bytes
);
typed_int!(
    /// A little endian, 32 bit, signed integer
    I32Le, i32, 4, Little, from_le_bytes, to_le_bytes
);
typed_int!(
    /// A little endian, 64 bit, signed integer
    I64Le, i64, 8, Little, from_le_bytes, to_le_bytes
);
typed_int!(
    /// A big endian, 8 bit, signed integer
    I8Be, i8, 1, Big, from_be_bytes, to_be_bytes
);
typed_int!(
    /// A big endian, 16 bit, signed integer
    I16Be, i16, 2, Big, from_be_bytes, to_be_bytes
);
typed_int!(
    /// A big endian, 32 bit, signed integer
    I32Be, i32, 4, Big, from_be_bytes, to_be_bytes
);
typed_int!(
    /// A big endian, 64 bit, signed integer
    I64Be, i64, 8, Big, from_be_bytes, to_be_bytes
);
