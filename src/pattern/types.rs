use std::collections::HashMap;

/// The built-in numeric placeholder type.
pub const NUM: &str = "num";

/// Definition of a placeholder type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDef {
    /// A regular expression fragment.
    Regex(String),
    /// A list of literal alternatives.
    OneOf(Vec<String>),
}

impl TypeDef {
    pub fn fragment(&self) -> String {
        match self {
            Self::Regex(re) => re.clone(),
            Self::OneOf(list) => {
                let mut alts: Vec<String> = list.iter().map(|s| regex::escape(s)).collect();
                // longest first, so that "json" is not shadowed by "js"
                alts.sort_by(|a, b| b.len().cmp(&a.len()));
                alts.join("|")
            }
        }
    }
}

impl From<&str> for TypeDef {
    fn from(re: &str) -> Self {
        Self::Regex(re.to_owned())
    }
}

impl From<&[&str]> for TypeDef {
    fn from(list: &[&str]) -> Self {
        Self::OneOf(list.iter().map(|&s| s.to_owned()).collect())
    }
}

impl<const N: usize> From<&[&str; N]> for TypeDef {
    fn from(list: &[&str; N]) -> Self {
        Self::from(&list[..])
    }
}

/// Named placeholder types, used by the `:name|type` syntax.
///
/// Patterns copy the fragment when they are compiled, so redefining a type
/// only affects patterns compiled afterwards.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    map: HashMap<Box<str>, TypeDef>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        let mut map = HashMap::new();
        map.insert(NUM.into(), TypeDef::Regex("[0-9]+".to_owned()));
        Self { map }
    }
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, def: impl Into<TypeDef>) -> Option<TypeDef> {
        self.map.insert(name.into(), def.into())
    }

    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.map.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }
}
