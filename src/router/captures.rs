use std::ops::Deref;
use std::str::FromStr;

use smallvec::SmallVec;

pub(crate) type KvBuffer<'a> = SmallVec<[(&'a str, &'a str); 8]>;

/// Captured `(name, value)` pairs, in match order.
///
/// A name may appear more than once when nested routes capture it; lookups
/// return the last one.
#[derive(Debug, Clone, Default)]
pub struct Captures<'a> {
    pub(crate) buf: KvBuffer<'a>,
}

impl<'a> Captures<'a> {
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.buf
            .iter()
            .rev()
            .find_map(|&(k, v)| if name == k { Some(v) } else { None })
    }

    pub fn parse<T: FromStr>(&self, name: &str) -> Option<Result<T, T::Err>> {
        self.get(name).map(T::from_str)
    }
}

impl<'a> Deref for Captures<'a> {
    type Target = [(&'a str, &'a str)];
    fn deref(&self) -> &Self::Target {
        &*self.buf
    }
}

impl Captures<'_> {
    pub(crate) fn new() -> Self {
        Self {
            buf: SmallVec::new(),
        }
    }
}
