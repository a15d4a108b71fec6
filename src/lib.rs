/// Binary encoder and decoder.
pub mod encoding;
/// The 64-bit integer carrier.
pub mod int64;
/// Prelude
pub mod prelude;
/// Tagged structures.
pub mod structure;
/// Helper functions.
pub mod util;
/// A map wrapper around a sorted vector of string-keyed pairs.
pub mod vecmap;

pub use hashbrown::HashMap;
use int64::Int64;
use structure::Structure;
use vecmap::VecMap;

#[derive(PartialEq, Clone, Debug)]
/// Wire value types.
pub enum Value {
    /// Null type. Equivalent to `None`.
    Null,
    /// Absent-value sentinel. Map entries holding it are dropped before
    /// the map header is emitted, and list slots holding it are packed
    /// as [`Null`]; it is never produced by decoding.
    Undefined,
    /// Boolean type.
    Bool(bool),
    /// Integer type.
    Int(Int64),
    /// Float type. Always encoded as a 64-bit float, even for integral
    /// values; integer semantics require wrapping in [`Int64`].
    Float(f64),
    /// UTF-8 string type.
    Str(String),
    /// List type.
    List(Vec<Value>),
    /// Map type, keyed by strings.
    Map(VecMap<Value>),
    /// Tagged structure type.
    Struct(Structure),
}

use Value::*;

impl Value {
    /// Indicates whether a value is `Null`.
    ///
    /// # Example
    ///
    /// ```
    /// use packstream::Value::Null;
    ///
    /// let foo = Null;
    ///
    /// assert!(foo.is_null());
    /// ```
    pub fn is_null(&self) -> bool {
        match self {
            Null => true,
            _ => false,
        }
    }

    /// Indicates whether a value is the `Undefined` sentinel.
    pub fn is_undefined(&self) -> bool {
        match self {
            Undefined => true,
            _ => false,
        }
    }

    /// Tries to convert value to a `bool`.
    /// This will return `None` if the value is not a `Bool`.
    ///
    /// # Example
    ///
    /// ```
    /// use packstream::Value;
    ///
    /// let b = Value::from(true);
    ///
    /// assert!(b.to_bool().unwrap());
    /// ```
    pub fn to_bool(&self) -> Option<bool> {
        match self {
            Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Tries to convert value to an [`Int64`].
    /// This will return `None` if the value is not an `Int`.
    ///
    /// # Example
    ///
    /// ```
    /// use packstream::Value;
    ///
    /// let num = Value::from(1);
    ///
    /// assert_eq!(num.to_int().unwrap().as_i64(), 1);
    /// ```
    pub fn to_int(&self) -> Option<Int64> {
        match self {
            Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Tries to convert value to an `f64`.
    /// This will return `None` if the value is not a `Float`.
    pub fn to_float(&self) -> Option<f64> {
        match self {
            Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Tries to convert value to a `&str`.
    /// This will return `None` if the value is not a `Str`.
    pub fn to_str(&self) -> Option<&str> {
        match self {
            Str(s) => Some(s),
            _ => None,
        }
    }

    /// Converts a `Value` to a vector of `Value`.
    /// This will return `None` if the value is not a `List`.
    pub fn to_list(&self) -> Option<&Vec<Value>> {
        match self {
            List(a) => Some(a),
            _ => None,
        }
    }

    /// Consumes a `Value`, converting it into a vector of `Value`.
    /// This will return `None` if the value is not a `List`.
    pub fn into_list(self) -> Option<Vec<Value>> { self.try_into().ok() }

    /// Converts a `Value` to a [`VecMap`].
    /// This will return `None` if the value is not a `Map`.
    pub fn to_vecmap(&self) -> Option<&VecMap<Value>> {
        match self {
            Map(vmap) => Some(vmap),
            _ => None,
        }
    }

    /// Consumes a `Value`, converting it into a [`VecMap`].
    /// This will return `None` if the value is not a `Map`.
    pub fn into_vecmap(self) -> Option<VecMap<Value>> { self.try_into().ok() }

    /// Consumes a `Value`, converting it into a `HashMap`.
    /// This will return `None` if the value is not a `Map`.
    ///
    /// # Example
    ///
    /// ```
    /// use hashbrown::HashMap;
    /// use packstream::prelude::*;
    ///
    /// let mut simple_map = HashMap::new();
    /// simple_map.insert("foo".to_string(), Value::from(1));
    ///
    /// let value = Value::from(VecMap::from(simple_map));
    ///
    /// let m: HashMap<String, Value> = value.into_map().unwrap();
    /// assert_eq!(m["foo"], Value::from(1));
    /// ```
    pub fn into_map(self) -> Option<HashMap<String, Value>> {
        Some(self.into_vecmap()?.into_hashmap())
    }

    /// Converts a `Value` to a [`Structure`].
    /// This will return `None` if the value is not a `Struct`.
    pub fn to_struct(&self) -> Option<&Structure> {
        match self {
            Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Consumes a `Value`, converting it into a [`Structure`].
    /// This will return `None` if the value is not a `Struct`.
    pub fn into_struct(self) -> Option<Structure> { self.try_into().ok() }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Value { List(v.into_iter().map(T::into).collect()) }
}

impl<T: Into<Value>> From<VecMap<T>> for Value {
    fn from(v: VecMap<T>) -> Value {
        Map(v.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value { Str(s.to_string()) }
}

macro_rules! try_from_ctor {
    ($from:ty, $to:ty, $ctor:tt) => {
        impl TryFrom<$from> for $to {
            type Error = $from;

            fn try_from(from: $from) -> Result<$to, $from> {
                match from {
                    $ctor(a) => Ok(a),
                    f => Err(f),
                }
            }
        }
    };
}

from_fn!(Value, bool, Bool);
try_from_ctor!(Value, bool, Bool);
from_fn!(Value, Int64, Int);
try_from_ctor!(Value, Int64, Int);
from_fn!(Value, f64, Float);
try_from_ctor!(Value, f64, Float);
from_fn!(Value, String, Str);
try_from_ctor!(Value, String, Str);
from_fn!(Value, Structure, Struct);
try_from_ctor!(Value, Structure, Struct);

try_from_ctor!(Value, Vec<Value>, List);
try_from_ctor!(Value, VecMap<Value>, Map);

compose_from!(Value, Int64, i64);
from_as!(Value, f32, f64);

from_prims!(Value);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trivial_tests() {
        assert!(Null.is_null());
        assert!(Undefined.is_undefined());
        assert!(!Null.is_undefined());

        assert!(Value::from(5).to_int().is_some());

        assert!(Value::from(true).to_bool().unwrap());

        assert_eq!(Value::from("word").to_str(), Some("word"));

        assert_eq!(Value::from(0.5f32).to_float(), Some(0.5));
    }

    #[test]
    fn from_vec() {
        let v = vec![0, 1, 2, 3, 4];
        let value = Value::from(v);
        assert_eq!(value.to_list().map(Vec::len), Some(5));
        assert_eq!(value.into_list().unwrap()[4], Value::from(4));
    }

    #[test]
    fn from_map() {
        let value = Value::from(VecMap::from(vec![
            ("b".to_string(), Value::from(2)),
            ("a".to_string(), Value::from(1)),
        ]));
        assert_eq!(value.to_vecmap().and_then(|m| m.get("a")), Some(&Value::from(1)));
        assert_eq!(value.into_map().unwrap()["b"], Value::from(2));
    }

    #[test]
    fn from_struct() {
        let s = Structure::new(0x4E, vec![Value::from(1), Value::from("x")]);
        let value = Value::from(s.clone());

        assert_eq!(value.to_struct(), Some(&s));
        assert_eq!(value.to_struct().map(Structure::signature), Some(0x4E));

        let fields = value.into_struct().unwrap().into_fields();
        assert_eq!(fields, vec![Value::from(1), Value::from("x")]);
    }
}
