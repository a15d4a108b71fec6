//! # Structures
//!
//! A structure is the grammar's extension point: a one-byte signature
//! naming a protocol-level type, plus an ordered list of field values.
//! The codec carries structures inertly; giving a signature meaning is
//! the business of whoever registers a mapper with the
//! [`Unpacker`](crate::encoding::Unpacker).
//!
//! ```
//! use packstream::prelude::*;
//!
//! let node = Structure::new(0x4E, vec![Value::from(1), Value::from("x")]);
//!
//! assert_eq!(node.signature(), 0x4E);
//! assert_eq!(node.fields().len(), 2);
//! ```

use crate::Value;

#[derive(PartialEq, Clone, Debug)]
/// A tagged structure: a signature byte plus its fields, in wire order.
///
/// Equality is structural. The field count must fit the 16-bit struct
/// header at encode time; the carrier itself does not enforce it.
pub struct Structure {
    signature: u8,
    fields: Vec<Value>,
}

impl Structure {
    /// Creates a structure from its signature and fields.
    pub fn new(signature: u8, fields: Vec<Value>) -> Structure {
        Structure { signature, fields }
    }

    /// The signature byte identifying the structure's protocol type.
    pub fn signature(&self) -> u8 { self.signature }

    /// The structure's fields, in wire order.
    pub fn fields(&self) -> &[Value] { &self.fields }

    /// Consumes the structure, returning its fields.
    pub fn into_fields(self) -> Vec<Value> { self.fields }
}
