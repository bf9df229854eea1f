//! Storage that maps handles to values.

use std::{
    fmt,
    iter::FusedIterator,
    marker::PhantomData,
    ops::{Index, IndexMut},
};

use stable_vec::{
    StableVec,
    core::DefaultCore,
    iter::{
        Indices, Iter as SvIter, IterMut as SvIterMut, Values as SvValues,
        ValuesMut as SvValuesMut,
    },
};

use crate::handle::{hsize, Handle};


/// A map from handles to values that uses a contiguous vector with holes to
/// store the values.
///
/// The handle is simply used as an index into the underlying vector. Removing
/// a value leaves a hole (the index is never handed out again by `push`), so
/// all other handles stay valid. This is the storage used for the element
/// arenas of a mesh as well as for all attribute columns.
///
/// # Example
///
/// ```
/// use ringmesh::{FaceHandle, handle::Handle, map::DenseMap};
///
/// let mut map = DenseMap::new();
///
/// let f0: FaceHandle = map.push("bob");
/// let f1 = map.push("lena");
/// assert_eq!(map.get(f0), Some(&"bob"));
///
/// map.remove(f0);
/// assert_eq!(map.get(f0), None);
/// assert_eq!(map[f1], "lena");
/// assert_eq!(map.num_elements(), 1);
/// assert_eq!(map.index_space(), 2);
/// ```
#[derive(Clone)]
pub struct DenseMap<H: Handle, T> {
    vec: StableVec<T>,
    _dummy: PhantomData<H>,
}

impl<H: Handle, T> DenseMap<H, T> {
    /// Creates an empty `DenseMap`.
    pub fn new() -> Self {
        Self {
            vec: StableVec::new(),
            _dummy: PhantomData,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vec: StableVec::with_capacity(capacity),
            _dummy: PhantomData,
        }
    }

    /// Appends the element and returns its handle.
    pub fn push(&mut self, elem: T) -> H {
        H::from_usize(self.vec.push(elem))
    }

    /// Inserts the element at the given handle, returning the element that
    /// was stored there before (if any). Grows the map if necessary.
    pub fn insert(&mut self, handle: H, elem: T) -> Option<T> {
        let idx = handle.to_usize();
        self.vec.reserve_for(idx);
        self.vec.insert(idx, elem)
    }

    /// Removes and returns the element associated with the handle. The slot
    /// becomes a hole.
    pub fn remove(&mut self, handle: H) -> Option<T> {
        let idx = handle.to_usize();
        if idx >= self.vec.capacity() {
            return None;
        }

        self.vec.remove(idx)
    }

    pub fn get(&self, handle: H) -> Option<&T> {
        self.vec.get(handle.to_usize())
    }

    pub fn get_mut(&mut self, handle: H) -> Option<&mut T> {
        self.vec.get_mut(handle.to_usize())
    }

    pub fn contains_handle(&self, handle: H) -> bool {
        self.vec.has_element_at(handle.to_usize())
    }

    /// Returns the number of values stored (holes are not counted).
    pub fn num_elements(&self) -> hsize {
        self.vec.num_elements() as hsize
    }

    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }

    /// Returns the size of the index space: all handles with an index equal
    /// or greater than this are guaranteed to be empty.
    pub fn index_space(&self) -> hsize {
        self.vec.next_push_index() as hsize
    }

    /// Returns `true` if there are no holes, i.e. handles `0..num_elements`
    /// are all present.
    pub fn is_compact(&self) -> bool {
        self.vec.num_elements() == self.vec.next_push_index()
    }

    pub fn reserve(&mut self, additional: hsize) {
        self.vec.reserve(additional as usize);
    }

    pub fn clear(&mut self) {
        self.vec.clear()
    }

    pub fn iter(&self) -> Iter<'_, H, T> {
        Iter::new(self)
    }
    pub fn handles(&self) -> Handles<'_, H, T> {
        Handles::new(self)
    }
    pub fn values(&self) -> Values<'_, H, T> {
        Values::new(self)
    }
    pub fn iter_mut(&mut self) -> IterMut<'_, H, T> {
        IterMut::new(self)
    }
    pub fn values_mut(&mut self) -> ValuesMut<'_, H, T> {
        ValuesMut::new(self)
    }

    /// Moves all values into a new map without holes, preserving their
    /// order. `remap` is called for each moved value with its old and new
    /// handle.
    pub(crate) fn compacted(&mut self, mut remap: impl FnMut(H, H)) -> Self {
        let mut out = Self::with_capacity(self.vec.num_elements());
        let indices = self.vec.indices().collect::<Vec<_>>();
        for idx in indices {
            if let Some(elem) = self.vec.remove(idx) {
                let new = out.push(elem);
                remap(H::from_usize(idx), new);
            }
        }
        self.vec.clear();

        out
    }
}

impl<H: Handle, T> Default for DenseMap<H, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Handle, T> Index<H> for DenseMap<H, T> {
    type Output = T;
    fn index(&self, handle: H) -> &Self::Output {
        match self.get(handle) {
            None => panic!("no value found for handle '{:?}'", handle),
            Some(r) => r,
        }
    }
}

impl<H: Handle, T> IndexMut<H> for DenseMap<H, T> {
    fn index_mut(&mut self, handle: H) -> &mut Self::Output {
        match self.get_mut(handle) {
            None => panic!("no value found for handle '{:?}'", handle),
            Some(r) => r,
        }
    }
}

impl<H: Handle, T: fmt::Debug> fmt::Debug for DenseMap<H, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map()
            .entries(self.vec.indices().map(|k| (H::from_usize(k), &self.vec[k])))
            .finish()
    }
}


// ===== Iterator wrappers =======================================================================

/// This macro generates an iterator wrapper. The usage is kinda awkward, but
/// this way we can avoid duplicate code.
macro_rules! gen_iter_wrapper {
    (
        $name:ident, $sv_name:ident, $iter_method:ident, [$($mutable:ident)?], [$($clone:ident)?],
        |$lt:tt, $h:ident, $t:ident| $item:ty,
        [$($mapping:tt)*] $(,)?
    ) => {
        #[derive(Debug, $($clone)?)]
        pub struct $name<$lt, $h: Handle, $t> {
            iter: $sv_name<$lt, $t, DefaultCore<$t>>,
            _dummy: PhantomData<&$lt $h>,
        }

        impl<$lt, $h: Handle, $t> $name<$lt, $h, $t> {
            fn new(map: &$lt $($mutable)? DenseMap<$h, $t>) -> Self {
                Self {
                    iter: map.vec.$iter_method(),
                    _dummy: PhantomData,
                }
            }
        }

        impl<$lt, $h: Handle, $t> Iterator for $name<$lt, $h, $t> {
            type Item = $item;
            fn next(&mut self) -> Option<Self::Item> {
                self.iter.next() $($mapping)*
            }

            fn size_hint(&self) -> (usize, Option<usize>) {
                self.iter.size_hint()
            }

            fn count(self) -> usize {
                self.iter.count()
            }

            fn last(mut self) -> Option<Self::Item> {
                self.next_back()
            }
        }

        impl<$lt, $h: Handle, $t> DoubleEndedIterator for $name<$lt, $h, $t> {
            fn next_back(&mut self) -> Option<Self::Item> {
                self.iter.next_back() $($mapping)*
            }
        }

        impl<$lt, $h: Handle, $t> ExactSizeIterator for $name<$lt, $h, $t> {
            fn len(&self) -> usize {
                self.iter.len()
            }
        }

        impl<$lt, $h: Handle, $t> FusedIterator for $name<$lt, $h, $t> {}
    };
}

gen_iter_wrapper!(
    Iter, SvIter, iter, [], [Clone],
    |'map, H, T| (H, &'map T),
    [.map(|(i, e)| (H::from_usize(i), e))],
);
gen_iter_wrapper!(
    IterMut, SvIterMut, iter_mut, [mut], [],
    |'map, H, T| (H, &'map mut T),
    [.map(|(i, e)| (H::from_usize(i), e))],
);
gen_iter_wrapper!(Handles, Indices, indices, [], [Clone], |'map, H, T| H, [.map(H::from_usize)]);
gen_iter_wrapper!(Values, SvValues, values, [], [Clone], |'map, H, T| &'map T, []);
gen_iter_wrapper!(ValuesMut, SvValuesMut, values_mut, [mut], [], |'map, H, T| &'map mut T, []);


// ===== Tests ===================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::VertexHandle;

    fn vh(idx: hsize) -> VertexHandle {
        VertexHandle::new(idx)
    }

    #[test]
    fn push_remove_insert() {
        let mut map = DenseMap::new();
        assert_eq!(map.push('a'), vh(0));
        assert_eq!(map.push('b'), vh(1));
        assert_eq!(map.push('c'), vh(2));
        assert!(map.is_compact());

        assert_eq!(map.remove(vh(1)), Some('b'));
        assert_eq!(map.remove(vh(1)), None);
        assert_eq!(map.remove(vh(17)), None);
        assert!(!map.is_compact());
        assert_eq!(map.num_elements(), 2);
        assert_eq!(map.index_space(), 3);

        // Holes are never reused by `push`
        assert_eq!(map.push('d'), vh(3));
        assert_eq!(map.index_space(), 4);

        assert_eq!(map.insert(vh(6), 'x'), None);
        assert_eq!(map.index_space(), 7);
        assert_eq!(map.get(vh(5)), None);
        assert_eq!(map[vh(6)], 'x');
    }

    #[test]
    fn iterators_skip_holes() {
        let mut map = DenseMap::new();
        let handles = (0..5).map(|i| map.push(i * 10)).collect::<Vec<VertexHandle>>();
        map.remove(handles[0]);
        map.remove(handles[3]);

        assert_eq!(map.handles().collect::<Vec<_>>(), vec![vh(1), vh(2), vh(4)]);
        assert_eq!(map.values().copied().collect::<Vec<_>>(), vec![10, 20, 40]);
        assert_eq!(map.iter().len(), 3);

        for v in map.values_mut() {
            *v += 1;
        }
        assert_eq!(map.iter().last(), Some((vh(4), &41)));
    }

    #[test]
    fn compacted_preserves_order() {
        let mut map = DenseMap::<VertexHandle, _>::new();
        for c in "abcde".chars() {
            map.push(c);
        }
        map.remove(vh(0));
        map.remove(vh(2));

        let mut pairs = Vec::new();
        let new = map.compacted(|old, new| pairs.push((old, new)));
        assert!(map.is_empty());
        assert!(new.is_compact());
        assert_eq!(new.values().collect::<String>(), "bde");
        assert_eq!(pairs, vec![(vh(1), vh(0)), (vh(3), vh(1)), (vh(4), vh(2))]);
    }

    #[test]
    #[should_panic]
    fn index_missing_panics() {
        let map = DenseMap::<VertexHandle, u8>::new();
        let _ = map[vh(0)];
    }
}
