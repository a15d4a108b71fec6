/// Null marker.
pub(crate) const NULL: u8 = 0xC0;
/// Float marker, followed by 8 big-endian payload bytes.
pub(crate) const FLOAT_64: u8 = 0xC1;
/// `False` marker.
pub(crate) const FALSE: u8 = 0xC2;
/// `True` marker.
pub(crate) const TRUE: u8 = 0xC3;

/// Integer marker with a 1-byte payload.
pub(crate) const INT_8: u8 = 0xC8;
/// Integer marker with a 2-byte payload.
pub(crate) const INT_16: u8 = 0xC9;
/// Integer marker with a 4-byte payload.
pub(crate) const INT_32: u8 = 0xCA;
/// Integer marker with an 8-byte payload, high word then low word.
pub(crate) const INT_64: u8 = 0xCB;

/// String marker with a `u8` length prefix.
pub(crate) const STRING_8: u8 = 0xD0;
/// String marker with a `u16` length prefix.
pub(crate) const STRING_16: u8 = 0xD1;
/// String marker with a `u32` length prefix.
pub(crate) const STRING_32: u8 = 0xD2;

/// List marker with a `u8` length prefix.
pub(crate) const LIST_8: u8 = 0xD4;
/// List marker with a `u16` length prefix.
pub(crate) const LIST_16: u8 = 0xD5;
/// List marker with a `u32` length prefix.
pub(crate) const LIST_32: u8 = 0xD6;

/// Map marker with a `u8` length prefix.
pub(crate) const MAP_8: u8 = 0xD8;
/// Map marker with a `u16` length prefix.
pub(crate) const MAP_16: u8 = 0xD9;
/// Map marker with a `u32` length prefix.
pub(crate) const MAP_32: u8 = 0xDA;

/// Struct marker with a `u8` size prefix, then the signature byte.
pub(crate) const STRUCT_8: u8 = 0xDC;
/// Struct marker with a `u16` size prefix, then the signature byte.
pub(crate) const STRUCT_16: u8 = 0xDD;

/// Tiny string nibble; the low nibble carries the byte length.
pub(crate) const TINY_STRING: u8 = 0x80;
/// Tiny list nibble; the low nibble carries the element count.
pub(crate) const TINY_LIST: u8 = 0x90;
/// Tiny map nibble; the low nibble carries the entry count.
pub(crate) const TINY_MAP: u8 = 0xA0;
/// Tiny struct nibble; the low nibble carries the field count.
pub(crate) const TINY_STRUCT: u8 = 0xB0;

/// 0xf0
pub(crate) const MASK_HIGH_NIBBLE: u8 = 0b1111_0000;
/// 0x0f
pub(crate) const MASK_LOW_NIBBLE: u8 = 0b0000_1111;
