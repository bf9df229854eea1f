//! Extra data ("attributes") attached to mesh elements.
//!
//! Every mesh has one [`AttrStore`] per element kind. A store maps attribute
//! names to typed columns. Each column holds exactly one value per live
//! element of its kind: the mesh notifies its stores about every insertion,
//! removal and compaction, so columns never get out of sync with the element
//! storage.
//!
//! The set of value types is closed (see [`AttrType`]). For the attributes
//! this crate itself knows about, there are typed markers in [`kinds`] that
//! can be used with `Mesh::get`/`Mesh::set` and the element proxies.
//!
//! ```
//! use ringmesh::{Mesh, attr::kinds::BoundaryVertex};
//!
//! let mut mesh = Mesh::new();
//! let a = mesh.add_vertex([0.0, 0.0, 0.0]);
//! mesh.vertex_data_mut().attach::<f32>("weight").unwrap();
//! mesh.vertex_data_mut().set("weight", a, 0.5f32).unwrap();
//! assert_eq!(mesh.vertex_data().get::<f32>("weight", a).unwrap(), &0.5);
//!
//! mesh.attach::<BoundaryVertex>().unwrap();
//! assert_eq!(mesh.get::<BoundaryVertex>(a).unwrap(), &false);
//! ```

use std::{
    collections::BTreeMap,
    fmt,
    marker::PhantomData,
};

use cgmath::{Vector2, Vector3};
use derive_more::Display;

use crate::{
    error::{Error, Result},
    handle::{hsize, Handle},
    map::DenseMap,
};


pub mod kinds;

pub use self::kinds::{ExtraData, MaterialTable};


/// The closed set of value types an attribute column can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum AttrKind {
    #[display(fmt = "bool")]
    Bool,
    #[display(fmt = "f32")]
    Float,
    #[display(fmt = "Vector2<f32>")]
    Vec2,
    #[display(fmt = "Vector3<f32>")]
    Vec3,
    #[display(fmt = "Vec<Vector3<f32>>")]
    Vec3List,
    #[display(fmt = "String")]
    Text,
}

mod internal {
    pub trait DoNotImplement {}
}

/// Types that can be stored in an attribute column.
///
/// This trait is implemented for exactly the types listed in [`AttrKind`].
/// It has a crate-private supertrait, so you can't implement it for other
/// types.
pub trait AttrType: 'static + Clone + fmt::Debug + internal::DoNotImplement {
    const KIND: AttrKind;

    /// The value every element has right after the attribute was attached or
    /// the element was added.
    fn default_value() -> Self;

    #[doc(hidden)]
    fn wrap<H: Handle>(column: DenseMap<H, Self>) -> AnyColumn<H>;

    #[doc(hidden)]
    fn unwrap_ref<H: Handle>(column: &AnyColumn<H>) -> Option<&DenseMap<H, Self>>;

    #[doc(hidden)]
    fn unwrap_mut<H: Handle>(column: &mut AnyColumn<H>) -> Option<&mut DenseMap<H, Self>>;
}

macro_rules! impl_attr_type {
    ($ty:ty, $variant:ident, $default:expr) => {
        impl internal::DoNotImplement for $ty {}
        impl AttrType for $ty {
            const KIND: AttrKind = AttrKind::$variant;

            fn default_value() -> Self {
                $default
            }

            fn wrap<H: Handle>(column: DenseMap<H, Self>) -> AnyColumn<H> {
                AnyColumn::$variant(column)
            }

            fn unwrap_ref<H: Handle>(column: &AnyColumn<H>) -> Option<&DenseMap<H, Self>> {
                match column {
                    AnyColumn::$variant(c) => Some(c),
                    _ => None,
                }
            }

            fn unwrap_mut<H: Handle>(
                column: &mut AnyColumn<H>,
            ) -> Option<&mut DenseMap<H, Self>> {
                match column {
                    AnyColumn::$variant(c) => Some(c),
                    _ => None,
                }
            }
        }
    }
}

impl_attr_type!(bool, Bool, false);
impl_attr_type!(f32, Float, 0.0);
impl_attr_type!(Vector2<f32>, Vec2, Vector2::new(0.0, 0.0));
impl_attr_type!(Vector3<f32>, Vec3, Vector3::new(0.0, 0.0, 0.0));
impl_attr_type!(Vec<Vector3<f32>>, Vec3List, Vec::new());
impl_attr_type!(String, Text, String::new());


/// A column of attribute values with one of the supported types.
#[derive(Debug, Clone)]
pub enum AnyColumn<H: Handle> {
    Bool(DenseMap<H, bool>),
    Float(DenseMap<H, f32>),
    Vec2(DenseMap<H, Vector2<f32>>),
    Vec3(DenseMap<H, Vector3<f32>>),
    Vec3List(DenseMap<H, Vec<Vector3<f32>>>),
    Text(DenseMap<H, String>),
}

/// Evaluates `$body` with `$c` bound to the inner `DenseMap` and `$t` being
/// its value type.
macro_rules! with_column {
    ($column:expr, |$c:ident: $t:ident| $body:expr) => {
        match $column {
            AnyColumn::Bool($c) => {
                #[allow(dead_code)]
                type $t = bool;
                $body
            }
            AnyColumn::Float($c) => {
                #[allow(dead_code)]
                type $t = f32;
                $body
            }
            AnyColumn::Vec2($c) => {
                #[allow(dead_code)]
                type $t = Vector2<f32>;
                $body
            }
            AnyColumn::Vec3($c) => {
                #[allow(dead_code)]
                type $t = Vector3<f32>;
                $body
            }
            AnyColumn::Vec3List($c) => {
                #[allow(dead_code)]
                type $t = Vec<Vector3<f32>>;
                $body
            }
            AnyColumn::Text($c) => {
                #[allow(dead_code)]
                type $t = String;
                $body
            }
        }
    }
}

impl<H: Handle> AnyColumn<H> {
    fn new<T: AttrType>(slots: &DenseMap<H, ()>) -> Self {
        let mut column = DenseMap::with_capacity(slots.num_elements() as usize);
        for h in slots.handles() {
            column.insert(h, T::default_value());
        }
        T::wrap(column)
    }

    pub fn kind(&self) -> AttrKind {
        with_column!(self, |_c: T| T::KIND)
    }

    /// Number of stored values. Always equal to the number of live elements.
    pub fn num_values(&self) -> hsize {
        with_column!(self, |c: T| c.num_elements())
    }

    /// Formats the value of the given element with `Debug`. Returns `None` if
    /// there is no value for that element.
    pub fn debug_value(&self, handle: H) -> Option<String> {
        with_column!(self, |c: T| c.get(handle).map(|v| format!("{:?}", v)))
    }

    fn insert_default(&mut self, handle: H) {
        with_column!(self, |c: T| { c.insert(handle, T::default_value()); })
    }

    fn remove(&mut self, handle: H) {
        with_column!(self, |c: T| { c.remove(handle); })
    }

    fn compact(&mut self) {
        with_column!(self, |c: T| { *c = c.compacted(|_, _| {}); })
    }
}


/// Typed name of an attached attribute, returned by [`AttrStore::attach`].
///
/// Accessing a column through its id cannot fail with a type mismatch
/// unless the column was detached and re-attached with another type.
#[derive(Debug)]
pub struct AttrId<T> {
    name: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> AttrId<T> {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> Clone for AttrId<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> PartialEq for AttrId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T> Eq for AttrId<T> {}


/// Attribute columns for all elements of one kind (the "extra data
/// container" of vertices or faces).
#[derive(Debug, Clone)]
pub struct AttrStore<H: Handle> {
    /// Mirrors the element arena: one entry per live element.
    slots: DenseMap<H, ()>,
    columns: BTreeMap<String, AnyColumn<H>>,
}

impl<H: Handle> AttrStore<H> {
    pub(crate) fn new() -> Self {
        Self {
            slots: DenseMap::new(),
            columns: BTreeMap::new(),
        }
    }

    /// Attaches a new attribute with the given name. Every live element gets
    /// `T::default_value()`.
    pub fn attach<T: AttrType>(&mut self, name: impl Into<String>) -> Result<AttrId<T>> {
        let name = name.into();
        if self.columns.contains_key(&name) {
            return Err(Error::DuplicateAttribute { element: H::ELEMENT, name });
        }

        self.columns.insert(name.clone(), AnyColumn::new::<T>(&self.slots));
        Ok(AttrId { name, _marker: PhantomData })
    }

    /// Attaches the attribute if it doesn't exist yet. Fails if it exists
    /// with a different type.
    pub fn get_or_attach<T: AttrType>(&mut self, name: &str) -> Result<&mut DenseMap<H, T>> {
        if !self.columns.contains_key(name) {
            self.attach::<T>(name)?;
        }
        self.column_mut(name)
    }

    /// Removes the attribute and returns its column.
    pub fn detach(&mut self, name: &str) -> Result<AnyColumn<H>> {
        self.columns.remove(name).ok_or_else(|| unknown::<H>(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Returns the value type of the attribute or `None` if no such
    /// attribute is attached.
    pub fn kind_of(&self, name: &str) -> Option<AttrKind> {
        self.columns.get(name).map(|c| c.kind())
    }

    /// Names of all attached attributes in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.keys().map(|s| s.as_str())
    }

    /// All attached attributes with their untyped columns.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &AnyColumn<H>)> + '_ {
        self.columns.iter().map(|(name, c)| (name.as_str(), c))
    }

    /// Number of attached attributes.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Number of elements each column has a value for.
    pub fn num_elements(&self) -> hsize {
        self.slots.num_elements()
    }

    pub fn column<T: AttrType>(&self, name: &str) -> Result<&DenseMap<H, T>> {
        let column = self.columns.get(name).ok_or_else(|| unknown::<H>(name))?;
        T::unwrap_ref(column).ok_or_else(|| mismatch::<T>(name, column.kind()))
    }

    pub fn column_mut<T: AttrType>(&mut self, name: &str) -> Result<&mut DenseMap<H, T>> {
        let column = self.columns.get_mut(name).ok_or_else(|| unknown::<H>(name))?;
        let kind = column.kind();
        T::unwrap_mut(column).ok_or_else(|| mismatch::<T>(name, kind))
    }

    pub fn get<T: AttrType>(&self, name: &str, handle: H) -> Result<&T> {
        let column = self.column::<T>(name)?;
        self.check_handle(handle)?;
        column.get(handle).ok_or_else(|| Error::invalid_handle(handle))
    }

    pub fn get_mut<T: AttrType>(&mut self, name: &str, handle: H) -> Result<&mut T> {
        self.column::<T>(name)?;
        self.check_handle(handle)?;
        self.column_mut::<T>(name)?
            .get_mut(handle)
            .ok_or_else(|| Error::invalid_handle(handle))
    }

    /// Sets the value for the given element and returns the old one.
    pub fn set<T: AttrType>(&mut self, name: &str, handle: H, value: T) -> Result<T> {
        let slot = self.get_mut::<T>(name, handle)?;
        Ok(std::mem::replace(slot, value))
    }

    pub fn get_by_id<T: AttrType>(&self, id: &AttrId<T>, handle: H) -> Result<&T> {
        self.get(&id.name, handle)
    }

    pub fn set_by_id<T: AttrType>(&mut self, id: &AttrId<T>, handle: H, value: T) -> Result<T> {
        self.set(&id.name, handle, value)
    }

    /// Distinguishes handles beyond the index space from handles of removed
    /// elements.
    fn check_handle(&self, handle: H) -> Result<()> {
        let len = self.slots.index_space();
        if handle.idx() >= len {
            Err(Error::IndexOutOfRange { element: H::ELEMENT, idx: handle.idx(), len })
        } else if !self.slots.contains_handle(handle) {
            Err(Error::invalid_handle(handle))
        } else {
            Ok(())
        }
    }

    // ----- Synchronization with the element storage ------------------------

    pub(crate) fn on_insert(&mut self, handle: H) {
        self.slots.insert(handle, ());
        for column in self.columns.values_mut() {
            column.insert_default(handle);
        }
    }

    pub(crate) fn on_remove(&mut self, handle: H) {
        self.slots.remove(handle);
        for column in self.columns.values_mut() {
            column.remove(handle);
        }
    }

    /// Called after the element arena was compacted. Since all columns have
    /// the same holes as the arena, compacting them in order yields the new
    /// handles.
    pub(crate) fn on_compact(&mut self) {
        self.slots = self.slots.compacted(|_, _| {});
        for column in self.columns.values_mut() {
            column.compact();
        }
    }
}

fn unknown<H: Handle>(name: &str) -> Error {
    Error::UnknownAttribute { element: H::ELEMENT, name: name.to_owned() }
}

fn mismatch<T: AttrType>(name: &str, actual: AttrKind) -> Error {
    Error::AttributeTypeMismatch {
        name: name.to_owned(),
        expected: T::KIND,
        actual,
    }
}
