//! [`Dump`] implementations for std, parking_lot and serde types.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::{Arc, TryLockError};

use serde::Serialize;

use super::dumper::{Dump, Dumper};
use super::error::DumpError;
use super::node::Node;

macro_rules! impl_dump_int {
    ($($ty:ty),*) => {
        $(
            impl Dump for $ty {
                fn dump(&self, _: &mut Dumper) -> Result<Node, DumpError> {
                    Ok(Node::Int(i128::from(*self)))
                }
            }
        )*
    };
}

impl_dump_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl Dump for isize {
    fn dump(&self, _: &mut Dumper) -> Result<Node, DumpError> {
        Ok(Node::Int(*self as i128))
    }
}

impl Dump for usize {
    fn dump(&self, _: &mut Dumper) -> Result<Node, DumpError> {
        Ok(Node::Int(*self as i128))
    }
}

impl Dump for f32 {
    fn dump(&self, _: &mut Dumper) -> Result<Node, DumpError> {
        Ok(Node::Float(f64::from(*self)))
    }
}

impl Dump for f64 {
    fn dump(&self, _: &mut Dumper) -> Result<Node, DumpError> {
        Ok(Node::Float(*self))
    }
}

impl Dump for bool {
    fn dump(&self, _: &mut Dumper) -> Result<Node, DumpError> {
        Ok(Node::Bool(*self))
    }
}

impl Dump for char {
    fn dump(&self, d: &mut Dumper) -> Result<Node, DumpError> {
        Ok(d.text(self.encode_utf8(&mut [0; 4])))
    }
}

impl Dump for str {
    fn dump(&self, d: &mut Dumper) -> Result<Node, DumpError> {
        Ok(d.text(self))
    }
}

impl Dump for String {
    fn dump(&self, d: &mut Dumper) -> Result<Node, DumpError> {
        Ok(d.text(self))
    }
}

impl Dump for () {
    fn dump(&self, _: &mut Dumper) -> Result<Node, DumpError> {
        Ok(Node::Null)
    }
}

impl<T: Dump> Dump for Option<T> {
    fn dump(&self, d: &mut Dumper) -> Result<Node, DumpError> {
        match self {
            Some(value) => value.dump(d),
            None => Ok(Node::Null),
        }
    }
}

impl<T: Dump + ?Sized> Dump for &T {
    fn dump(&self, d: &mut Dumper) -> Result<Node, DumpError> {
        (**self).dump(d)
    }
}

impl<T: Dump + ?Sized> Dump for Box<T> {
    fn dump(&self, d: &mut Dumper) -> Result<Node, DumpError> {
        (**self).dump(d)
    }
}

impl<T: Dump + ?Sized> Dump for Rc<T> {
    fn dump(&self, d: &mut Dumper) -> Result<Node, DumpError> {
        let address = Rc::as_ptr(self) as *const () as usize;
        d.shared(address, |d| (**self).dump(d))
    }
}

impl<T: Dump + ?Sized> Dump for Arc<T> {
    fn dump(&self, d: &mut Dumper) -> Result<Node, DumpError> {
        let address = Arc::as_ptr(self) as *const () as usize;
        d.shared(address, |d| (**self).dump(d))
    }
}

impl<T: Dump + ?Sized> Dump for RefCell<T> {
    fn dump(&self, d: &mut Dumper) -> Result<Node, DumpError> {
        match self.try_borrow() {
            Ok(value) => (*value).dump(d),
            Err(_) => Ok(Node::Unavailable("mutably borrowed".to_string())),
        }
    }
}

impl<T: Dump + ?Sized> Dump for std::sync::Mutex<T> {
    fn dump(&self, d: &mut Dumper) -> Result<Node, DumpError> {
        match self.try_lock() {
            Ok(guard) => (*guard).dump(d),
            Err(TryLockError::Poisoned(poisoned)) => {
                let guard = poisoned.into_inner();
                (*guard).dump(d)
            }
            Err(TryLockError::WouldBlock) => Ok(Node::Unavailable("locked".to_string())),
        }
    }
}

impl<T: Dump + ?Sized> Dump for parking_lot::Mutex<T> {
    fn dump(&self, d: &mut Dumper) -> Result<Node, DumpError> {
        match self.try_lock() {
            Some(guard) => (*guard).dump(d),
            None => Ok(Node::Unavailable("locked".to_string())),
        }
    }
}

impl<T: Dump + ?Sized> Dump for parking_lot::RwLock<T> {
    fn dump(&self, d: &mut Dumper) -> Result<Node, DumpError> {
        match self.try_read() {
            Some(guard) => (*guard).dump(d),
            None => Ok(Node::Unavailable("write-locked".to_string())),
        }
    }
}

impl<T: Dump> Dump for [T] {
    fn dump(&self, d: &mut Dumper) -> Result<Node, DumpError> {
        d.seq("slice", self.iter())
    }
}

impl<T: Dump, const N: usize> Dump for [T; N] {
    fn dump(&self, d: &mut Dumper) -> Result<Node, DumpError> {
        d.seq("array", self.iter())
    }
}

impl<T: Dump> Dump for Vec<T> {
    fn dump(&self, d: &mut Dumper) -> Result<Node, DumpError> {
        d.seq("Vec", self.iter())
    }
}

impl<T: Dump> Dump for VecDeque<T> {
    fn dump(&self, d: &mut Dumper) -> Result<Node, DumpError> {
        d.seq("VecDeque", self.iter())
    }
}

impl<T: Dump, S> Dump for HashSet<T, S> {
    fn dump(&self, d: &mut Dumper) -> Result<Node, DumpError> {
        d.seq("HashSet", self.iter())
    }
}

impl<T: Dump> Dump for BTreeSet<T> {
    fn dump(&self, d: &mut Dumper) -> Result<Node, DumpError> {
        d.seq("BTreeSet", self.iter())
    }
}

impl<K: Dump, V: Dump, S> Dump for HashMap<K, V, S> {
    fn dump(&self, d: &mut Dumper) -> Result<Node, DumpError> {
        d.map("HashMap", self.iter())
    }
}

impl<K: Dump, V: Dump> Dump for BTreeMap<K, V> {
    fn dump(&self, d: &mut Dumper) -> Result<Node, DumpError> {
        d.map("BTreeMap", self.iter())
    }
}

macro_rules! impl_dump_tuple {
    ($($name:ident . $idx:tt),+) => {
        impl<$($name: Dump),+> Dump for ($($name,)+) {
            fn dump(&self, d: &mut Dumper) -> Result<Node, DumpError> {
                let items: &[&dyn Dump] = &[$(&self.$idx as &dyn Dump),+];
                d.seq("tuple", items)
            }
        }
    };
}

impl_dump_tuple!(A.0, B.1);
impl_dump_tuple!(A.0, B.1, C.2);
impl_dump_tuple!(A.0, B.1, C.2, D.3);

impl Dump for serde_json::Value {
    fn dump(&self, d: &mut Dumper) -> Result<Node, DumpError> {
        use serde_json::Value;

        match self {
            Value::Null => Ok(Node::Null),
            Value::Bool(value) => Ok(Node::Bool(*value)),
            Value::Number(number) => Ok(if let Some(value) = number.as_i64() {
                Node::Int(i128::from(value))
            } else if let Some(value) = number.as_u64() {
                Node::Int(i128::from(value))
            } else {
                Node::Float(number.as_f64().unwrap_or(f64::NAN))
            }),
            Value::String(value) => Ok(d.text(value)),
            Value::Array(values) => d.seq("array", values.iter()),
            Value::Object(map) => d.map("object", map.iter()),
        }
    }
}

/// Dump any serde-serializable value through its JSON data model.
///
/// Serialization failures surface as [`DumpError::Serialize`].
#[derive(Debug, Clone, PartialEq)]
pub struct Serialized<T>(pub T);

impl<T: Serialize> Dump for Serialized<T> {
    fn dump(&self, d: &mut Dumper) -> Result<Node, DumpError> {
        let value = serde_json::to_value(&self.0)?;
        value.dump(d)
    }
}
