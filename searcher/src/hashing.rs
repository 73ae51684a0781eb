//! Structural hashing for search states.
//!
//! When a search is not given an explicit key function, states are
//! identified by a 32-bit hash of their structure. The hash is computed
//! by shape:
//!
//! * scalars (unit, `None`, booleans) hash to fixed sentinels,
//! * numbers hash their `f64` bit pattern,
//! * strings use the familiar `31 * h + c` rolling hash over UTF-16 units,
//! * sequences fold their elements in order,
//! * sets sum their elements, so iteration order does not matter,
//! * maps and records sum a per-entry mix of value and key,
//! * [Opaque] handles hash by reference.
//!
//! Collisions are possible and are never corrected. Cyclic structures
//! recurse forever; use an explicit key function for those.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::hash::BuildHasher;
use std::ops::Deref;
use std::rc::{Rc, Weak};

use num::{BigInt, BigUint};

pub const NULL: i32 = 0x4210_8422;
pub const UNDEFINED: i32 = 0x4210_8423;
pub const TRUE: i32 = 0x4210_8421;
pub const FALSE: i32 = 0x4210_8420;

const REFERENCE_WRAP: u32 = 0x7fff_ffff;
const MIN_SWEEP: usize = 16;

/// Canonical identity of a search state derived by structural hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey(pub u32);

impl From<i32> for StateKey {
    fn from(hash: i32) -> Self {
        StateKey(hash as u32)
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

/// Values which can be hashed by shape.
pub trait StructuralHash {
    fn structural_hash(&self, hasher: &mut StructuralHasher) -> i32;
}

trait Liveness {
    fn is_alive(&self) -> bool;
}

impl<T: ?Sized> Liveness for Weak<T> {
    fn is_alive(&self) -> bool {
        self.strong_count() > 0
    }
}

struct Reference {
    id: i32,
    handle: Box<dyn Liveness>,
}

/// Computes structural hashes.
///
/// The hasher owns the registry of reference ids handed out to [Opaque]
/// values, so the same handle hashes the same way for as long as the hasher
/// lives. Each search creates its own hasher.
#[derive(Default)]
pub struct StructuralHasher {
    references: HashMap<usize, Reference>,
    next: u32,
    sweep_at: usize,
}

impl fmt::Debug for StructuralHasher {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("StructuralHasher")
            .field("references", &self.references.len())
            .field("next", &self.next)
            .finish()
    }
}

impl StructuralHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash a value into a [StateKey].
    pub fn hash<T>(&mut self, value: &T) -> StateKey
    where
        T: StructuralHash + ?Sized,
    {
        value.structural_hash(self).into()
    }

    /// Hash a plain record given as named fields.
    ///
    /// Field order does not matter, but swapping a name with a value does.
    pub fn record(&mut self, fields: &[(&str, &dyn StructuralHash)]) -> i32 {
        let mut mixed = Vec::with_capacity(fields.len());
        for (name, value) in fields {
            mixed.push((hash_str(name), value.structural_hash(self)));
        }
        entries(mixed)
    }

    fn reference<T>(&mut self, handle: &Rc<T>) -> i32
    where
        T: ?Sized + 'static,
    {
        let address = Rc::as_ptr(handle).cast::<()>() as usize;
        if let Some(known) = self.references.get(&address) {
            if known.handle.is_alive() {
                return known.id;
            }
        }

        if self.references.len() >= self.sweep_at {
            self.sweep();
        }

        let id = self.next as i32;
        self.next += 1;
        if self.next == REFERENCE_WRAP {
            self.next = 0;
        }

        self.references.insert(
            address,
            Reference {
                id,
                handle: Box::new(Rc::downgrade(handle)),
            },
        );
        id
    }

    /// Forget handles whose values have been dropped.
    fn sweep(&mut self) {
        self.references.retain(|_, known| known.handle.is_alive());
        self.sweep_at = (self.references.len() * 2).max(MIN_SWEEP);
    }
}

/// Build a key function which hashes states structurally.
pub fn structural_key<S>() -> impl FnMut(&S) -> StateKey
where
    S: StructuralHash + ?Sized,
{
    let mut hasher = StructuralHasher::new();
    move |state| hasher.hash(state)
}

/// Hash a number through its 64-bit float representation.
pub fn hash_number(number: f64) -> i32 {
    let number = if number.is_nan() { f64::NAN } else { number };
    let bits = number.to_bits();
    let high = (bits >> 32) as u32 as i32;
    let low = bits as u32 as i32;
    0x045d_9f3b_i32.wrapping_mul((high >> 16) ^ high) ^ low
}

/// Rolling string hash over UTF-16 code units.
pub fn hash_str(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |h, unit| 31i32.wrapping_mul(h).wrapping_add(i32::from(unit)))
}

/// Order sensitive mix of two hashes.
pub fn merge(a: i32, b: i32) -> i32 {
    a ^ b
        .wrapping_add(0x9e37_79b9_u32 as i32)
        .wrapping_add(a.wrapping_shl(6))
        .wrapping_add(a >> 2)
}

/// Combine element hashes of a sequence, in order.
pub fn ordered<I>(hashes: I) -> i32
where
    I: IntoIterator<Item = i32>,
{
    hashes
        .into_iter()
        .fold(0i32, |h, e| 31i32.wrapping_mul(h).wrapping_add(e))
}

/// Combine element hashes of a set, ignoring order.
pub fn unordered<I>(hashes: I) -> i32
where
    I: IntoIterator<Item = i32>,
{
    hashes.into_iter().fold(0i32, i32::wrapping_add)
}

/// Combine `(key, value)` hashes of a mapping, ignoring entry order.
pub fn entries<I>(pairs: I) -> i32
where
    I: IntoIterator<Item = (i32, i32)>,
{
    pairs
        .into_iter()
        .fold(0i32, |h, (key, value)| h.wrapping_add(merge(value, key)))
}

fn sequence<'a, T, I>(items: I, hasher: &mut StructuralHasher) -> i32
where
    T: StructuralHash + 'a + ?Sized,
    I: IntoIterator<Item = &'a T>,
{
    let mut hashes = Vec::new();
    for item in items {
        hashes.push(item.structural_hash(hasher));
    }
    ordered(hashes)
}

fn set<'a, T, I>(items: I, hasher: &mut StructuralHasher) -> i32
where
    T: StructuralHash + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut hashes = Vec::new();
    for item in items {
        hashes.push(item.structural_hash(hasher));
    }
    unordered(hashes)
}

fn mapping<'a, K, V, I>(items: I, hasher: &mut StructuralHasher) -> i32
where
    K: StructuralHash + 'a,
    V: StructuralHash + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    let mut pairs = Vec::new();
    for (key, value) in items {
        pairs.push((key.structural_hash(hasher), value.structural_hash(hasher)));
    }
    entries(pairs)
}

/// A value identified by reference rather than by structure.
///
/// Cloning an `Opaque` shares the reference, so clones hash alike; two
/// separately created handles never do while both are alive.
#[derive(Debug)]
pub struct Opaque<T: ?Sized>(Rc<T>);

impl<T> Opaque<T> {
    pub fn new(value: T) -> Self {
        Opaque(Rc::new(value))
    }
}

impl<T: ?Sized> Clone for Opaque<T> {
    fn clone(&self) -> Self {
        Opaque(Rc::clone(&self.0))
    }
}

impl<T: ?Sized> From<Rc<T>> for Opaque<T> {
    fn from(handle: Rc<T>) -> Self {
        Opaque(handle)
    }
}

impl<T: ?Sized> Deref for Opaque<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized + 'static> StructuralHash for Opaque<T> {
    fn structural_hash(&self, hasher: &mut StructuralHasher) -> i32 {
        hasher.reference(&self.0)
    }
}

impl StructuralHash for () {
    fn structural_hash(&self, _hasher: &mut StructuralHasher) -> i32 {
        UNDEFINED
    }
}

impl StructuralHash for bool {
    fn structural_hash(&self, _hasher: &mut StructuralHasher) -> i32 {
        if *self {
            TRUE
        } else {
            FALSE
        }
    }
}

macro_rules! numeric {
    ($($t:ty),*) => {
        $(
            impl StructuralHash for $t {
                fn structural_hash(&self, _hasher: &mut StructuralHasher) -> i32 {
                    hash_number(*self as f64)
                }
            }
        )*
    };
}

numeric!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl StructuralHash for char {
    fn structural_hash(&self, _hasher: &mut StructuralHasher) -> i32 {
        let mut buffer = [0u8; 4];
        hash_str(self.encode_utf8(&mut buffer))
    }
}

impl StructuralHash for str {
    fn structural_hash(&self, _hasher: &mut StructuralHasher) -> i32 {
        hash_str(self)
    }
}

impl StructuralHash for String {
    fn structural_hash(&self, _hasher: &mut StructuralHasher) -> i32 {
        hash_str(self)
    }
}

impl StructuralHash for BigInt {
    fn structural_hash(&self, _hasher: &mut StructuralHasher) -> i32 {
        hash_str(&self.to_string())
    }
}

impl StructuralHash for BigUint {
    fn structural_hash(&self, _hasher: &mut StructuralHasher) -> i32 {
        hash_str(&self.to_string())
    }
}

impl<T: StructuralHash> StructuralHash for Option<T> {
    fn structural_hash(&self, hasher: &mut StructuralHasher) -> i32 {
        match self {
            Some(value) => value.structural_hash(hasher),
            None => NULL,
        }
    }
}

impl<T: StructuralHash + ?Sized> StructuralHash for &T {
    fn structural_hash(&self, hasher: &mut StructuralHasher) -> i32 {
        (**self).structural_hash(hasher)
    }
}

impl<T: StructuralHash + ?Sized> StructuralHash for Box<T> {
    fn structural_hash(&self, hasher: &mut StructuralHasher) -> i32 {
        (**self).structural_hash(hasher)
    }
}

impl<T: StructuralHash + ?Sized> StructuralHash for Rc<T> {
    fn structural_hash(&self, hasher: &mut StructuralHasher) -> i32 {
        (**self).structural_hash(hasher)
    }
}

impl<T: StructuralHash> StructuralHash for [T] {
    fn structural_hash(&self, hasher: &mut StructuralHasher) -> i32 {
        sequence(self.iter(), hasher)
    }
}

impl<T: StructuralHash, const N: usize> StructuralHash for [T; N] {
    fn structural_hash(&self, hasher: &mut StructuralHasher) -> i32 {
        sequence(self.iter(), hasher)
    }
}

impl<T: StructuralHash> StructuralHash for Vec<T> {
    fn structural_hash(&self, hasher: &mut StructuralHasher) -> i32 {
        sequence(self.iter(), hasher)
    }
}

impl<T: StructuralHash> StructuralHash for VecDeque<T> {
    fn structural_hash(&self, hasher: &mut StructuralHasher) -> i32 {
        sequence(self.iter(), hasher)
    }
}

macro_rules! tuple {
    ($($name:ident),+) => {
        impl<$($name: StructuralHash),+> StructuralHash for ($($name,)+) {
            #[allow(non_snake_case)]
            fn structural_hash(&self, hasher: &mut StructuralHasher) -> i32 {
                let ($($name,)+) = self;
                ordered(vec![$($name.structural_hash(hasher)),+])
            }
        }
    };
}

tuple!(A);
tuple!(A, B);
tuple!(A, B, C);
tuple!(A, B, C, D);
tuple!(A, B, C, D, E);
tuple!(A, B, C, D, E, F);

impl<T: StructuralHash, H: BuildHasher> StructuralHash for HashSet<T, H> {
    fn structural_hash(&self, hasher: &mut StructuralHasher) -> i32 {
        set(self.iter(), hasher)
    }
}

impl<T: StructuralHash> StructuralHash for BTreeSet<T> {
    fn structural_hash(&self, hasher: &mut StructuralHasher) -> i32 {
        set(self.iter(), hasher)
    }
}

impl<K: StructuralHash, V: StructuralHash, H: BuildHasher> StructuralHash for HashMap<K, V, H> {
    fn structural_hash(&self, hasher: &mut StructuralHasher) -> i32 {
        mapping(self.iter(), hasher)
    }
}

impl<K: StructuralHash, V: StructuralHash> StructuralHash for BTreeMap<K, V> {
    fn structural_hash(&self, hasher: &mut StructuralHasher) -> i32 {
        mapping(self.iter(), hasher)
    }
}

impl StructuralHash for serde_json::Value {
    fn structural_hash(&self, hasher: &mut StructuralHasher) -> i32 {
        use serde_json::Value;

        match self {
            Value::Null => NULL,
            Value::Bool(b) => b.structural_hash(hasher),
            Value::Number(n) => n.as_f64().map(hash_number).unwrap_or(UNDEFINED),
            Value::String(s) => hash_str(s),
            Value::Array(items) => sequence(items.iter(), hasher),
            Value::Object(fields) => {
                let mut pairs = Vec::with_capacity(fields.len());
                for (name, value) in fields {
                    pairs.push((hash_str(name), value.structural_hash(hasher)));
                }
                entries(pairs)
            }
        }
    }
}
