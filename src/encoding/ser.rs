use super::*;
use failure::bail;

/// Byte-level packing surface, implemented for any [`BufMut`] sink.
///
/// Every value is written with the narrowest legal encoding. The header
/// methods are public so that protocol layers can stream a message
/// structure field by field without first assembling a [`Value`] tree.
pub trait Packer {
    /// Add a null marker to the output.
    fn pack_null(&mut self);

    /// Add a boolean to the output.
    fn pack_bool(&mut self, b: bool);

    /// Add a float to the output.
    ///
    /// Floats always take the 8-byte tier; they are never narrowed to an
    /// integer encoding, even when the value is integral.
    fn pack_float(&mut self, f: f64);

    /// Add an integer to the output, using the narrowest tier that
    /// admits the value.
    fn pack_int(&mut self, i: Int64);

    /// Add a UTF-8 string to the output.
    ///
    /// # Arguments
    ///
    /// * `s: &str` - The string to be added. Its UTF-8 byte length picks
    ///   the header tier and must fit 32 bits.
    fn pack_string(&mut self, s: &str) -> Result<(), Error>;

    /// Add a list header for `size` elements. The caller packs the
    /// elements afterwards.
    fn pack_list_header(&mut self, size: usize) -> Result<(), Error>;

    /// Add a map header for `size` entries. The caller packs each key
    /// and value afterwards.
    fn pack_map_header(&mut self, size: usize) -> Result<(), Error>;

    /// Add a struct header for `size` fields. The signature byte is
    /// emitted in every tier. The caller packs the fields afterwards.
    fn pack_struct_header(&mut self, size: usize, signature: u8) -> Result<(), Error>;

    /// Add an arbitrary [`Value`] to the output.
    fn pack_value(&mut self, value: &Value) -> Result<(), Error>;
}

impl<B: BufMut> Packer for B {
    #[inline(always)]
    fn pack_null(&mut self) { self.put_u8(NULL) }

    #[inline(always)]
    fn pack_bool(&mut self, b: bool) {
        if b {
            self.put_u8(TRUE)
        } else {
            self.put_u8(FALSE)
        }
    }

    #[inline(always)]
    fn pack_float(&mut self, f: f64) {
        self.put_u8(FLOAT_64);
        self.put_f64(f);
    }

    #[inline]
    fn pack_int(&mut self, i: Int64) {
        // tier bounds are compared as full 64-bit values; 32-bit
        // arithmetic would wrap at the Int32 boundary
        if i >= Int64::from(-16) && i < Int64::from(128) {
            self.put_i8(i.as_i64() as i8)
        } else if i >= Int64::from(-128) && i < Int64::from(-16) {
            self.put_u8(INT_8);
            self.put_i8(i.as_i64() as i8)
        } else if i >= Int64::from(-32_768) && i < Int64::from(32_768) {
            self.put_u8(INT_16);
            self.put_i16(i.as_i64() as i16)
        } else if i >= Int64::from(-2_147_483_648i64) && i < Int64::from(2_147_483_648i64) {
            self.put_u8(INT_32);
            self.put_i32(i.as_i64() as i32)
        } else {
            self.put_u8(INT_64);
            self.put_i32(i.high());
            self.put_i32(i.low());
        }
    }

    fn pack_string(&mut self, s: &str) -> Result<(), Error> {
        let bytes = s.as_bytes();
        let size = bytes.len();
        if size < 0x10 {
            self.put_u8(TINY_STRING | size as u8);
        } else if size < 0x100 {
            self.put_u8(STRING_8);
            self.put_u8(size as u8);
        } else if size < 0x1_0000 {
            self.put_u8(STRING_16);
            self.put_u16(size as u16);
        } else if (size as u64) < 0x1_0000_0000 {
            self.put_u8(STRING_32);
            self.put_u32(size as u32);
        } else {
            bail!("UTF-8 strings of size {} are not supported", size)
        }
        self.put_slice(bytes);
        Ok(())
    }

    fn pack_list_header(&mut self, size: usize) -> Result<(), Error> {
        if size < 0x10 {
            self.put_u8(TINY_LIST | size as u8);
        } else if size < 0x100 {
            self.put_u8(LIST_8);
            self.put_u8(size as u8);
        } else if size < 0x1_0000 {
            self.put_u8(LIST_16);
            self.put_u16(size as u16);
        } else if (size as u64) < 0x1_0000_0000 {
            self.put_u8(LIST_32);
            self.put_u32(size as u32);
        } else {
            bail!("Lists of size {} are not supported", size)
        }
        Ok(())
    }

    fn pack_map_header(&mut self, size: usize) -> Result<(), Error> {
        if size < 0x10 {
            self.put_u8(TINY_MAP | size as u8);
        } else if size < 0x100 {
            self.put_u8(MAP_8);
            self.put_u8(size as u8);
        } else if size < 0x1_0000 {
            self.put_u8(MAP_16);
            self.put_u16(size as u16);
        } else if (size as u64) < 0x1_0000_0000 {
            self.put_u8(MAP_32);
            self.put_u32(size as u32);
        } else {
            bail!("Maps of size {} are not supported", size)
        }
        Ok(())
    }

    fn pack_struct_header(&mut self, size: usize, signature: u8) -> Result<(), Error> {
        if size < 0x10 {
            self.put_u8(TINY_STRUCT | size as u8);
        } else if size < 0x100 {
            self.put_u8(STRUCT_8);
            self.put_u8(size as u8);
        } else if size < 0x1_0000 {
            self.put_u8(STRUCT_16);
            self.put_u16(size as u16);
        } else {
            bail!("Structures of size {} are not supported", size)
        }
        self.put_u8(signature);
        Ok(())
    }

    fn pack_value(&mut self, value: &Value) -> Result<(), Error> {
        match value {
            Null => self.pack_null(),
            Bool(b) => self.pack_bool(*b),
            Int(i) => self.pack_int(*i),
            Float(f) => self.pack_float(*f),
            Str(s) => self.pack_string(s)?,
            List(elems) => {
                self.pack_list_header(elems.len())?;
                for elem in elems {
                    match elem {
                        Undefined => self.pack_null(),
                        elem => self.pack_value(elem)?,
                    }
                }
            }
            Map(map) => {
                // count survivors before the header goes out, so the
                // emitted count matches the emitted entries
                let entries: Vec<_> = map.iter().filter(|(_, v)| !v.is_undefined()).collect();
                self.pack_map_header(entries.len())?;
                for (key, val) in entries {
                    self.pack_string(key)?;
                    self.pack_value(val)?;
                }
            }
            Struct(st) => {
                self.pack_struct_header(st.fields().len(), st.signature())?;
                for field in st.fields() {
                    self.pack_value(field)?;
                }
            }
            Undefined => bail!("Cannot pack this value: {:?}", value),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn struct_headers_carry_the_signature_in_every_tier() {
        let mut out = Vec::new();
        out.pack_struct_header(2, 0x4E).unwrap();
        assert_eq!(out, vec![0xB2, 0x4E]);

        let mut out = Vec::new();
        out.pack_struct_header(0x10, 0x4E).unwrap();
        assert_eq!(out, vec![0xDC, 0x10, 0x4E]);

        let mut out = Vec::new();
        out.pack_struct_header(0x123, 0x4E).unwrap();
        assert_eq!(out, vec![0xDD, 0x01, 0x23, 0x4E]);
    }

    #[test]
    fn oversized_struct_headers_are_refused() {
        let mut out = Vec::new();
        let err = out.pack_struct_header(0x1_0000, 0x4E).unwrap_err();
        assert!(err.to_string().contains("Structures of size 65536 are not supported"));
        // nothing was emitted for the failed header
        assert!(out.is_empty());
    }

    #[test]
    fn container_header_tiers() {
        let mut out = Vec::new();
        out.pack_list_header(0x0F).unwrap();
        out.pack_list_header(0x10).unwrap();
        out.pack_list_header(0x123).unwrap();
        out.pack_list_header(0x1_0000).unwrap();
        assert_eq!(
            out,
            vec![0x9F, 0xD4, 0x10, 0xD5, 0x01, 0x23, 0xD6, 0x00, 0x01, 0x00, 0x00]
        );

        let mut out = Vec::new();
        out.pack_map_header(0).unwrap();
        out.pack_map_header(0x100).unwrap();
        assert_eq!(out, vec![0xA0, 0xD9, 0x01, 0x00]);
    }

    #[test]
    fn headers_and_fields_compose_into_messages() {
        // a RUN-like message packed field by field
        let mut out = Vec::new();
        out.pack_struct_header(2, 0x10).unwrap();
        out.pack_string("RETURN 1").unwrap();
        out.pack_map_header(0).unwrap();

        let decoded = unpack_full(&out).unwrap();
        let expected = Struct(Structure::new(
            0x10,
            vec![Value::from("RETURN 1"), Map(VecMap::new())],
        ));
        assert_eq!(decoded, expected);
    }
}
