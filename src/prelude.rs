pub use crate::{
    encoding::{pack, pack_full, unpack, unpack_full, ByteSource, Packer, StructMapper, Unpacker},
    int64::Int64,
    structure::Structure,
    vecmap::VecMap,
    HashMap, Value,
};
pub use bytes::{Buf, BufMut};
