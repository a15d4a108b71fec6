//! # Binary encoder and decoder
//!
//! Packing and unpacking between [`Value`] trees and their wire bytes.
//! Every value starts with a single marker byte; small payloads carry
//! their size in the marker's low nibble, larger ones in a big-endian
//! prefix of one, two, or four bytes. The packer always chooses the
//! narrowest legal encoding.
//!
//! # Example
//!
//! ```
//! use packstream::prelude::*;
//!
//! // a value to encode
//! let value = Value::from(vec![1, 2, 3]);
//!
//! // encode it
//! let bytes = pack_full(&value).unwrap();
//! assert_eq!(bytes, vec![0x93, 0x01, 0x02, 0x03]);
//!
//! // and get it back
//! let decoded = unpack_full(&bytes).unwrap();
//! assert_eq!(decoded, value);
//! ```

use crate::{
    int64::Int64,
    structure::Structure,
    vecmap::VecMap,
    Value::{self, *},
};
use bytes::{Buf, BufMut};
use failure::Error;

mod constants;
pub(crate) use constants::*;
pub mod de;
pub mod ser;
pub use de::{ByteSource, StructMapper, Unpacker};
pub use ser::Packer;

/// Encode a [`Value`] into its binary representation, writing the bytes
/// through `out`.
///
/// On an error nothing further is written for the failing value, but
/// bytes already written for earlier siblings remain in `out`; the
/// caller should treat the stream as poisoned.
///
/// # Arguments
///
/// * `value: &Value` - A reference to the value to be encoded.
/// * `out: &mut B` - A mutable reference to the sink the encoder output
///   will be written to.
///
/// # Example
///
/// ```
/// use packstream::prelude::*;
///
/// // output buffer
/// let out = &mut Vec::new();
/// // value to encode
/// let value = Value::Null;
///
/// // encode value
/// pack(&value, out).unwrap();
/// assert_eq!(*out, vec![0xC0]);
/// ```
pub fn pack<B: BufMut>(value: &Value, out: &mut B) -> Result<(), Error> {
    out.pack_value(value)
}

/// Encode a [`Value`] into a fresh vector of bytes.
///
/// # Example
///
/// ```
/// use packstream::prelude::*;
///
/// let enc: Vec<u8> = pack_full(&Value::from(true)).unwrap();
/// assert_eq!(enc, vec![0xC3]);
/// ```
pub fn pack_full(value: &Value) -> Result<Vec<u8>, Error> {
    let mut out = Vec::new();
    pack(value, &mut out)?;
    Ok(out)
}

/// Decode one value from `data` with no struct mappers registered;
/// every structure comes back as a plain [`Structure`].
///
/// Reads exactly the bytes of one encoded value and leaves the rest of
/// the source untouched.
pub fn unpack<B: Buf>(data: &mut B) -> Result<Value, Error> {
    Unpacker::new().unpack(data)
}

/// Decode one value from a byte slice.
///
/// # Example
///
/// ```
/// use packstream::prelude::*;
///
/// let value = unpack_full(&[0x93, 0x01, 0x02, 0x03]).unwrap();
/// assert_eq!(value, Value::from(vec![1, 2, 3]));
/// ```
pub fn unpack_full(mut data: &[u8]) -> Result<Value, Error> {
    unpack(&mut data)
}
