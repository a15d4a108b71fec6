use super::*;
use failure::{bail, format_err};
use hashbrown::HashMap;
use Marker::*;
use Size::*;

/// Wire markers, decoded.
#[derive(Copy, Clone, Debug)]
enum Marker {
    /// Null marker.
    MNull,
    /// Boolean `true` marker.
    MTrue,
    /// Boolean `false` marker.
    MFalse,
    /// Float marker.
    MFloat,
    /// Single-byte integer; the marker is the value.
    MTinyInt(i8),
    /// Fixed-width integer; the payload width in bytes.
    MInt(u8),
    /// String marker.
    MStr(Size),
    /// List marker.
    MList(Size),
    /// Map marker.
    MMap(Size),
    /// Struct marker.
    MStruct(Size),
}

/// How a marker carries its payload size.
#[derive(Copy, Clone, Debug)]
enum Size {
    /// Size packed into the marker's low nibble.
    Inline(u8),
    /// One-byte size prefix.
    Prefix8,
    /// Two-byte size prefix.
    Prefix16,
    /// Four-byte size prefix.
    Prefix32,
}

/// A sequence of bytes with guarded big-endian read methods.
///
/// Each method fails, instead of panicking, when the source holds fewer
/// bytes than requested.
pub trait ByteSource {
    /// Read a single byte.
    fn read_u8(&mut self) -> Result<u8, Error>;

    /// Read a single byte as a signed value.
    fn read_i8(&mut self) -> Result<i8, Error>;

    /// Read two bytes as a big-endian [`u16`].
    fn read_u16(&mut self) -> Result<u16, Error>;

    /// Read two bytes as a big-endian [`i16`].
    fn read_i16(&mut self) -> Result<i16, Error>;

    /// Read four bytes as a big-endian [`u32`].
    fn read_u32(&mut self) -> Result<u32, Error>;

    /// Read four bytes as a big-endian [`i32`].
    fn read_i32(&mut self) -> Result<i32, Error>;

    /// Read eight bytes as a big-endian [`f64`].
    fn read_f64(&mut self) -> Result<f64, Error>;

    /// Read a specified number of bytes as a `Vec<u8>`.
    ///
    /// # Arguments
    ///
    /// * `len: usize` - The number of bytes to be read.
    fn read_many(&mut self, len: usize) -> Result<Vec<u8>, Error>;
}

impl<B: Buf + ?Sized> ByteSource for B {
    #[inline(always)]
    fn read_u8(&mut self) -> Result<u8, Error> {
        if self.has_remaining() {
            Ok(self.get_u8())
        } else {
            bail!("Buffer was empty, couldn't get byte")
        }
    }

    #[inline(always)]
    fn read_i8(&mut self) -> Result<i8, Error> {
        if self.has_remaining() {
            Ok(self.get_i8())
        } else {
            bail!("Buffer was empty, couldn't get byte")
        }
    }

    #[inline(always)]
    fn read_u16(&mut self) -> Result<u16, Error> {
        if self.remaining() >= 2 {
            Ok(self.get_u16())
        } else {
            bail!(
                "Tried to read u16, but only {} bytes were left",
                self.remaining()
            )
        }
    }

    #[inline(always)]
    fn read_i16(&mut self) -> Result<i16, Error> {
        if self.remaining() >= 2 {
            Ok(self.get_i16())
        } else {
            bail!(
                "Tried to read i16, but only {} bytes were left",
                self.remaining()
            )
        }
    }

    #[inline(always)]
    fn read_u32(&mut self) -> Result<u32, Error> {
        if self.remaining() >= 4 {
            Ok(self.get_u32())
        } else {
            bail!(
                "Tried to read u32, but only {} bytes were left",
                self.remaining()
            )
        }
    }

    #[inline(always)]
    fn read_i32(&mut self) -> Result<i32, Error> {
        if self.remaining() >= 4 {
            Ok(self.get_i32())
        } else {
            bail!(
                "Tried to read i32, but only {} bytes were left",
                self.remaining()
            )
        }
    }

    #[inline(always)]
    fn read_f64(&mut self) -> Result<f64, Error> {
        if self.remaining() >= 8 {
            Ok(self.get_f64())
        } else {
            bail!(
                "Tried to read f64, but only {} bytes were left",
                self.remaining()
            )
        }
    }

    #[inline(always)]
    fn read_many(&mut self, len: usize) -> Result<Vec<u8>, Error> {
        if self.remaining() >= len {
            let mut bts = vec![0; len];
            self.copy_to_slice(&mut bts);
            Ok(bts)
        } else {
            bail!(
                "Requested {} bytes, but only {} bytes were left",
                len,
                self.remaining()
            )
        }
    }
}

/// Try to read a marker byte from the source.
fn read_marker(data: &mut dyn Buf) -> Result<Marker, Error> {
    let byte = data.read_u8()?;

    match byte {
        NULL => Ok(MNull),
        FLOAT_64 => Ok(MFloat),
        FALSE => Ok(MFalse),
        TRUE => Ok(MTrue),
        INT_8 => Ok(MInt(1)),
        INT_16 => Ok(MInt(2)),
        INT_32 => Ok(MInt(4)),
        INT_64 => Ok(MInt(8)),
        STRING_8 => Ok(MStr(Prefix8)),
        STRING_16 => Ok(MStr(Prefix16)),
        STRING_32 => Ok(MStr(Prefix32)),
        LIST_8 => Ok(MList(Prefix8)),
        LIST_16 => Ok(MList(Prefix16)),
        LIST_32 => Ok(MList(Prefix32)),
        MAP_8 => Ok(MMap(Prefix8)),
        MAP_16 => Ok(MMap(Prefix16)),
        MAP_32 => Ok(MMap(Prefix32)),
        STRUCT_8 => Ok(MStruct(Prefix8)),
        STRUCT_16 => Ok(MStruct(Prefix16)),
        _ => {
            let low = byte & MASK_LOW_NIBBLE;
            match byte & MASK_HIGH_NIBBLE {
                TINY_STRING => Ok(MStr(Inline(low))),
                TINY_LIST => Ok(MList(Inline(low))),
                TINY_MAP => Ok(MMap(Inline(low))),
                TINY_STRUCT => Ok(MStruct(Inline(low))),
                _ if byte < 0x80 || byte >= 0xF0 => Ok(MTinyInt(byte as i8)),
                _ => bail!("Unknown packed value with marker {:#04x}", byte),
            }
        }
    }
}

/// Try to read a payload size from the source.
fn read_size(data: &mut dyn Buf, size: Size) -> Result<usize, Error> {
    match size {
        Inline(len) => Ok(len as usize),
        Prefix8 => Ok(data.read_u8()? as usize),
        Prefix16 => Ok(data.read_u16()? as usize),
        Prefix32 => Ok(data.read_u32()? as usize),
    }
}

/// Try to read a fixed-width integer from the source, preserving sign.
fn read_int(data: &mut dyn Buf, width: u8) -> Result<Int64, Error> {
    match width {
        1 => data.read_i8().map(Int64::from),
        2 => data.read_i16().map(Int64::from),
        4 => data.read_i32().map(Int64::from),
        _ => {
            debug_assert_eq!(width, 8);
            let high = data.read_i32()?;
            let low = data.read_i32()?;
            Ok(Int64::from_halves(high, low))
        }
    }
}

/// Try to read a UTF-8 string of exactly `len` bytes from the source.
fn read_string(data: &mut dyn Buf, len: usize) -> Result<String, Error> {
    Ok(String::from_utf8(data.read_many(len)?)?)
}

/// Decoder for structures with a registered signature.
///
/// The struct header (size and signature) has already been consumed when
/// a mapper runs; the mapper must read exactly the declared number of
/// fields from the source, and its return value is used verbatim.
pub type StructMapper = Box<dyn Fn(&Unpacker, &mut dyn Buf) -> Result<Value, Error>>;

#[derive(Default)]
/// Reads [`Value`]s back out of their binary encoding.
///
/// An unpacker with no registered mappers decodes every structure into a
/// plain [`Structure`]. Registering a [`StructMapper`] for a signature
/// lets a higher layer materialize its own type for that tag instead.
///
/// # Example
///
/// ```
/// use bytes::Buf;
/// use packstream::prelude::*;
///
/// let mut unpacker = Unpacker::new();
/// // surface single-field structures tagged 0x4E as the bare field
/// unpacker.register_struct_mapper(0x4E, |unpacker: &Unpacker, mut source: &mut dyn Buf| {
///     unpacker.unpack(&mut source)
/// });
///
/// let mut data: &[u8] = &[0xB1, 0x4E, 0x2A];
/// let value = unpacker.unpack(&mut data).unwrap();
///
/// assert_eq!(value, Value::from(42));
/// ```
pub struct Unpacker {
    struct_mappers: HashMap<u8, StructMapper>,
}

impl Unpacker {
    /// Creates an unpacker with no registered struct mappers.
    pub fn new() -> Unpacker { Unpacker::default() }

    /// Registers `mapper` as the decoder for structures tagged with
    /// `signature`, replacing any previous registration.
    ///
    /// Registration is a one-time setup step; the registry is not
    /// synchronized and must not be mutated while decoding.
    pub fn register_struct_mapper<F>(&mut self, signature: u8, mapper: F)
    where
        F: Fn(&Unpacker, &mut dyn Buf) -> Result<Value, Error> + 'static,
    {
        self.struct_mappers.insert(signature, Box::new(mapper));
    }

    /// Reads exactly the bytes of one encoded value from `data`.
    pub fn unpack<B: Buf>(&self, data: &mut B) -> Result<Value, Error> {
        self.unpack_value(data)
    }

    fn unpack_value(&self, data: &mut dyn Buf) -> Result<Value, Error> {
        match read_marker(data)? {
            MNull => Ok(Null),
            MTrue => Ok(Bool(true)),
            MFalse => Ok(Bool(false)),
            MFloat => data.read_f64().map(Float),
            MTinyInt(i) => Ok(Int(Int64::from(i))),
            MInt(width) => read_int(data, width).map(Int),

            MStr(size) => {
                let len = read_size(data, size)?;
                read_string(data, len).map(Str)
            }

            MList(size) => {
                let len = read_size(data, size)?;
                let mut out = Vec::with_capacity(len);
                for _ in 0..len {
                    out.push(self.unpack_value(&mut *data)?);
                }
                Ok(List(out))
            }

            MMap(size) => {
                let len = read_size(data, size)?;
                let mut out = Vec::with_capacity(len);
                for _ in 0..len {
                    let key: String = self
                        .unpack_value(&mut *data)?
                        .try_into()
                        .map_err(|v| format_err!("Expected a string key, found: {:?}", v))?;
                    let val = self.unpack_value(&mut *data)?;
                    out.push((key, val));
                }
                Ok(Map(VecMap::from(out)))
            }

            MStruct(size) => {
                let size = read_size(data, size)?;
                self.unpack_struct(data, size)
            }
        }
    }

    fn unpack_struct(&self, data: &mut dyn Buf, size: usize) -> Result<Value, Error> {
        let signature = data.read_u8()?;
        match self.struct_mappers.get(&signature) {
            Some(mapper) => mapper(self, data),
            None => {
                let mut fields = Vec::with_capacity(size);
                for _ in 0..size {
                    fields.push(self.unpack_value(&mut *data)?);
                }
                Ok(Struct(Structure::new(signature, fields)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_markers_name_the_byte() {
        let reserved = [
            0xC4, 0xC5, 0xC6, 0xC7, 0xCC, 0xCD, 0xCE, 0xCF, 0xD3, 0xD7, 0xDB, 0xDE, 0xDF,
        ];
        for marker in reserved.iter().copied().chain(0xE0..=0xEF) {
            let err = Unpacker::new().unpack(&mut &[marker][..]).unwrap_err();
            let msg = err.to_string();
            assert!(
                msg.contains(&format!("{:#04x}", marker)),
                "{:?} does not name {:#04x}",
                msg,
                marker
            );
        }
    }

    #[test]
    fn truncated_input_fails() {
        let cases: &[&[u8]] = &[
            &[],
            &[0xC1, 0x40],
            &[0xC8],
            &[0xC9, 0x00],
            &[0xCB, 0x00, 0x00, 0x00, 0x00],
            &[0x84, 0x41],
            &[0xD0],
            &[0xD1, 0x01],
            &[0x91],
            &[0xA1, 0x81, 0x61],
            &[0xB1],
            &[0xB1, 0x4E],
        ];
        for case in cases {
            assert!(
                Unpacker::new().unpack(&mut &case[..]).is_err(),
                "{:x?} should not decode",
                case
            );
        }
    }

    #[test]
    fn fixed_width_tiers_preserve_sign() {
        let minus_one: &[&[u8]] = &[
            &[0xFF],
            &[0xC8, 0xFF],
            &[0xC9, 0xFF, 0xFF],
            &[0xCA, 0xFF, 0xFF, 0xFF, 0xFF],
            &[0xCB, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF],
        ];
        // a wider-than-necessary encoding still reads back correctly
        for case in minus_one {
            let value = Unpacker::new().unpack(&mut &case[..]).unwrap();
            assert_eq!(value, Int(Int64::from(-1)), "decoding {:x?}", case);
        }
    }

    #[test]
    fn mapper_dispatch() {
        let mut unpacker = Unpacker::new();
        unpacker.register_struct_mapper(0x4E, |u: &Unpacker, mut source: &mut dyn Buf| {
            let id = u.unpack(&mut source)?;
            let label = u.unpack(&mut source)?;
            Ok(List(vec![label, id]))
        });

        // registered signature: the mapper's value comes back verbatim
        let data = [0xB2, 0x4E, 0x2A, 0x81, 0x78];
        let value = unpacker.unpack(&mut &data[..]).unwrap();
        assert_eq!(value, List(vec![Value::from("x"), Value::from(42)]));

        // unregistered signature: plain Structure fallback
        let data = [0xB2, 0x4F, 0x2A, 0x81, 0x78];
        let value = unpacker.unpack(&mut &data[..]).unwrap();
        assert_eq!(
            value,
            Struct(Structure::new(0x4F, vec![Value::from(42), Value::from("x")]))
        );
    }

    #[test]
    fn mapper_registration_replaces() {
        let mut unpacker = Unpacker::new();
        unpacker.register_struct_mapper(0x4E, |_: &Unpacker, _: &mut dyn Buf| Ok(Null));
        unpacker.register_struct_mapper(0x4E, |_: &Unpacker, _: &mut dyn Buf| Ok(Bool(true)));

        let data = [0xB0, 0x4E];
        assert_eq!(unpacker.unpack(&mut &data[..]).unwrap(), Bool(true));
    }

    #[test]
    fn non_string_map_keys_are_rejected() {
        let data = [0xA1, 0x01, 0x01];
        let err = Unpacker::new().unpack(&mut &data[..]).unwrap_err();
        assert!(err.to_string().contains("string key"));
    }

    #[test]
    fn invalid_utf8_fails() {
        let data = [0x82, 0xFF, 0xFE];
        assert!(Unpacker::new().unpack(&mut &data[..]).is_err());
    }
}
