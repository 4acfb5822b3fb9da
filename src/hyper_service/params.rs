use std::str::FromStr;

/// Owned captures handed to handlers and guards.
///
/// Later entries override earlier ones, so a name captured by both a bridge
/// and an endpoint resolves to the endpoint's value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pairs: Vec<(String, String)>,
    format: Option<String>,
}

impl Params {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find_map(|(n, v)| if n == name { Some(v.as_str()) } else { None })
    }

    pub fn parse<T: FromStr>(&self, name: &str) -> Option<Result<T, T::Err>> {
        self.get(name).map(T::from_str)
    }

    /// The detected extension or the explicit format of the request.
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.pairs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl IntoIterator for Params {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;
    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

impl Params {
    pub(super) fn empty() -> Self {
        Self::default()
    }

    pub(super) fn new(caps: &[(&str, &str)], format: Option<&str>) -> Self {
        let pairs = caps
            .iter()
            .map(|&(name, value)| (name.to_owned(), value.to_owned()))
            .collect();
        Self {
            pairs,
            format: format.map(ToOwned::to_owned),
        }
    }
}
