//! Request construction from typed parameter objects
//!
//! Every RPC method is represented by a struct whose fields are the method's
//! named parameters. The builder turns such a value into a [`Request`]: the
//! wire method name plus a map from wire key to JSON value.
//!
//! There are two ways in:
//!
//! - [`RequestBuilder::build`] for types implementing [`RpcMethod`]. Generated
//!   parameter structs carry their method name as a constant and an explicit
//!   `to_params` function, so nothing is derived at call time.
//! - [`RequestBuilder::build_serialized`] for any `Serialize` struct. The
//!   method name is the snake style form of the type's name and the parameter
//!   map is the struct's serde representation, so `#[serde(rename)]` decides
//!   the wire keys.
//!
//! # Examples
//!
//! ```rust
//! use serde::Serialize;
//! use spdk_rpc_core::{BuildError, RequestBuilder};
//!
//! #[derive(Serialize)]
//! struct BdevMallocDelete {
//!     name: String,
//! }
//!
//! let request = RequestBuilder::build_serialized(&BdevMallocDelete { name: "Malloc0".into() }).unwrap();
//! assert_eq!(request.method, "bdev_malloc_delete");
//!
//! let err = RequestBuilder::build_serialized(&"bdev_malloc_delete").unwrap_err();
//! assert!(matches!(err, BuildError::WrongArgumentType(_)));
//! ```

use crate::error::BuildError;
use crate::naming::to_snake_style;
use crate::types::{Id, JsonRpcRequest};
use serde::ser::{self, Impossible, Serialize, Serializer};
use std::fmt;

/// Named RPC parameters keyed by wire key
pub type Params = serde_json::Map<String, serde_json::Value>;

/// A typed parameter object for one RPC method
///
/// Implemented by the structs `spdk-rpc-gen` emits. `METHOD` is the wire
/// method name and `to_params` inserts every field under its wire key.
pub trait RpcMethod {
    /// Wire name of the RPC method, e.g. `bdev_get_bdevs`
    const METHOD: &'static str;

    /// Serialize the fields into a parameter map
    fn to_params(&self) -> Result<Params, BuildError>;
}

/// A method name and its parameters, ready to be handed to a transport
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: String,
    pub params: Params,
}

impl Request {
    /// Wrap into a JSON-RPC 2.0 request object with the given ID
    ///
    /// An empty parameter map is sent without a `params` member; SPDK rejects
    /// parameters on methods that take none.
    pub fn into_json_rpc(self, id: Id) -> JsonRpcRequest {
        let params = if self.params.is_empty() {
            None
        } else {
            Some(serde_json::Value::Object(self.params))
        };
        JsonRpcRequest::new(self.method, params, id)
    }
}

/// Builds [`Request`]s from parameter objects
pub struct RequestBuilder;

impl RequestBuilder {
    /// Build a request from a typed parameter object
    pub fn build<M: RpcMethod + ?Sized>(method: &M) -> Result<Request, BuildError> {
        Ok(Request {
            method: M::METHOD.to_string(),
            params: method.to_params()?,
        })
    }

    /// Build a request from any serializable struct
    ///
    /// # Errors
    ///
    /// - `BuildError::WrongArgumentType` if `object` is not a struct
    /// - `BuildError::Serialization` if a field has no JSON representation
    pub fn build_serialized<T: Serialize + ?Sized>(object: &T) -> Result<Request, BuildError> {
        let type_name = std::any::type_name::<T>();
        if !is_record(object) {
            return Err(BuildError::WrongArgumentType(type_name.to_string()));
        }

        let value = serde_json::to_value(object).map_err(|e| BuildError::Serialization(e.to_string()))?;
        let params = match value {
            serde_json::Value::Object(map) => map,
            // unit structs serialize as null
            serde_json::Value::Null => Params::new(),
            _ => return Err(BuildError::WrongArgumentType(type_name.to_string())),
        };

        Ok(Request {
            method: method_name_for::<T>(),
            params,
        })
    }
}

/// Snake style method name for a type, derived from its name
///
/// Module path, generic arguments, reference markers and `Box`/`Rc`/`Arc`
/// wrappers are stripped first: `&my_crate::rpc::BdevGetBdevs` and
/// `Box<my_crate::rpc::BdevGetBdevs>` both become `bdev_get_bdevs`.
pub fn method_name_for<T: ?Sized>() -> String {
    to_snake_style(short_type_name(std::any::type_name::<T>()))
}

const POINTER_WRAPPERS: &[&str] = &["alloc::boxed::Box<", "alloc::rc::Rc<", "alloc::sync::Arc<"];

fn short_type_name(full: &str) -> &str {
    let mut name = full;
    loop {
        name = name.trim_start_matches('&').trim_start_matches("mut ");
        match POINTER_WRAPPERS.iter().find_map(|wrapper| name.strip_prefix(wrapper)) {
            Some(inner) => name = first_type_argument(inner),
            None => break,
        }
    }

    let without_generics = match name.find('<') {
        Some(index) => &name[..index],
        None => name,
    };
    match without_generics.rfind("::") {
        Some(index) => &without_generics[index + 2..],
        None => without_generics,
    }
}

/// `a::B<c::D>, Alloc>` -> `a::B<c::D>`
fn first_type_argument(arguments: &str) -> &str {
    let mut depth = 0usize;
    for (index, c) in arguments.char_indices() {
        match c {
            '<' => depth += 1,
            '>' if depth == 0 => return &arguments[..index],
            '>' => depth -= 1,
            ',' if depth == 0 => return &arguments[..index],
            _ => {}
        }
    }
    arguments
}

/// Serialize one field value for insertion under `key`
///
/// Used by generated `to_params` bodies.
pub fn param_value<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<serde_json::Value, BuildError> {
    serde_json::to_value(value).map_err(|e| BuildError::Serialization(format!("{}: {}", key, e)))
}

/// Whether `value` serializes as a struct
///
/// References, `Some` and newtype wrappers are looked through. A map of
/// unknown length counts as a struct: derived `Serialize` on a struct with a
/// `#[serde(flatten)]` field goes through `serialize_map(None)`, while
/// standard map types always report their length and stay rejected.
fn is_record<T: Serialize + ?Sized>(value: &T) -> bool {
    matches!(value.serialize(ShapeProbe), Err(Shape::Record))
}

/// Outcome of probing a value's serde shape
///
/// The probe always stops at the first serializer call, reporting it as an
/// error so no data is ever written.
#[derive(Debug)]
enum Shape {
    Record,
    Other(&'static str),
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Record => write!(f, "struct"),
            Shape::Other(kind) => write!(f, "{}", kind),
        }
    }
}

impl std::error::Error for Shape {}

impl ser::Error for Shape {
    fn custom<T: fmt::Display>(_msg: T) -> Self {
        Shape::Other("custom")
    }
}

struct ShapeProbe;

macro_rules! reject {
    ($($method:ident($ty:ty) => $kind:literal),* $(,)?) => {
        $(
            fn $method(self, _v: $ty) -> Result<(), Shape> {
                Err(Shape::Other($kind))
            }
        )*
    };
}

impl Serializer for ShapeProbe {
    type Ok = ();
    type Error = Shape;
    type SerializeSeq = Impossible<(), Shape>;
    type SerializeTuple = Impossible<(), Shape>;
    type SerializeTupleStruct = Impossible<(), Shape>;
    type SerializeTupleVariant = Impossible<(), Shape>;
    type SerializeMap = Impossible<(), Shape>;
    type SerializeStruct = Impossible<(), Shape>;
    type SerializeStructVariant = Impossible<(), Shape>;

    reject! {
        serialize_bool(bool) => "bool",
        serialize_i8(i8) => "integer",
        serialize_i16(i16) => "integer",
        serialize_i32(i32) => "integer",
        serialize_i64(i64) => "integer",
        serialize_u8(u8) => "integer",
        serialize_u16(u16) => "integer",
        serialize_u32(u32) => "integer",
        serialize_u64(u64) => "integer",
        serialize_f32(f32) => "float",
        serialize_f64(f64) => "float",
        serialize_char(char) => "char",
        serialize_str(&str) => "string",
        serialize_bytes(&[u8]) => "bytes",
    }

    fn serialize_none(self) -> Result<(), Shape> {
        Err(Shape::Other("none"))
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<(), Shape> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<(), Shape> {
        Err(Shape::Other("unit"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<(), Shape> {
        Err(Shape::Record)
    }

    fn serialize_unit_variant(self, _name: &'static str, _index: u32, _variant: &'static str) -> Result<(), Shape> {
        Err(Shape::Other("enum"))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(self, _name: &'static str, value: &T) -> Result<(), Shape> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<(), Shape> {
        Err(Shape::Other("enum"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, Shape> {
        Err(Shape::Other("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, Shape> {
        Err(Shape::Other("tuple"))
    }

    fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeTupleStruct, Shape> {
        Err(Shape::Other("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, Shape> {
        Err(Shape::Other("enum"))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap, Shape> {
        match len {
            None => Err(Shape::Record),
            Some(_) => Err(Shape::Other("map")),
        }
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct, Shape> {
        Err(Shape::Record)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, Shape> {
        Err(Shape::Other("enum"))
    }
}
