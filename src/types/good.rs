// src/types/good.rs

//! The commodities traded in the simulation and a total per-good table.

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Index, IndexMut};

/// A tradeable commodity. The set is fixed for a run and shared by every agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Good {
    Corn,
    Apples,
    Beef,
}

impl Good {
    pub const COUNT: usize = 3;

    /// Every good, in the order all per-good loops visit them.
    pub const ALL: [Good; Good::COUNT] = [Good::Corn, Good::Apples, Good::Beef];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Good::Corn => "corn",
            Good::Apples => "apples",
            Good::Beef => "beef",
        }
    }
}

impl fmt::Display for Good {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One value per good. Lookups can never miss, so every agent always has a
/// price, valuation, offer and sales counter for every good.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GoodMap<T>([T; Good::COUNT]);

impl<T> GoodMap<T> {
    /// Values in `Good::ALL` order.
    pub const fn new(values: [T; Good::COUNT]) -> Self {
        Self(values)
    }

    pub fn from_fn(mut f: impl FnMut(Good) -> T) -> Self {
        Self(Good::ALL.map(|good| f(good)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Good, &T)> {
        Good::ALL.into_iter().zip(self.0.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Good, &mut T)> {
        Good::ALL.into_iter().zip(self.0.iter_mut())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> GoodMap<U> {
        GoodMap(std::array::from_fn(|i| f(&self.0[i])))
    }
}

impl<T: Copy> GoodMap<T> {
    /// The same value for every good.
    pub const fn splat(value: T) -> Self {
        Self([value; Good::COUNT])
    }
}

impl<T> Index<Good> for GoodMap<T> {
    type Output = T;

    #[inline]
    fn index(&self, good: Good) -> &T {
        &self.0[good.index()]
    }
}

impl<T> IndexMut<Good> for GoodMap<T> {
    #[inline]
    fn index_mut(&mut self, good: Good) -> &mut T {
        &mut self.0[good.index()]
    }
}

// Serialized as `{"corn": .., "apples": .., "beef": ..}` so config files and
// snapshots stay readable.
impl<T: Serialize> Serialize for GoodMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Good::COUNT))?;
        for (good, value) in self.iter() {
            map.serialize_entry(&good, value)?;
        }
        map.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for GoodMap<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut entries = BTreeMap::<Good, T>::deserialize(deserializer)?;
        let mut take = |good: Good| {
            entries
                .remove(&good)
                .ok_or_else(|| D::Error::custom(format!("missing entry for good `{good}`")))
        };
        Ok(Self([take(Good::Corn)?, take(Good::Apples)?, take(Good::Beef)?]))
    }
}
