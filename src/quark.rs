use std::collections::HashMap;

/// Bidirectional string <-> dense id table.
///
/// Ids are assigned in insertion order; building one from a sorted list
/// therefore makes id order and lexicographic order agree, which the
/// decoders rely on for tie-breaking.
#[derive(Debug, Default, Clone)]
pub struct Quark {
    v: Vec<String>,
    m: HashMap<String, usize>,
}

impl<S: Into<String>> FromIterator<S> for Quark {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut quark = Quark::default();
        for s in iter {
            quark.find_or_insert(s);
        }
        quark
    }
}

impl Quark {
    pub fn find_or_insert(&mut self, key: impl Into<String>) -> usize {
        let key = key.into();
        if let Some(&id) = self.m.get(&key) {
            return id;
        }
        let id = self.v.len();
        self.m.insert(key.clone(), id);
        self.v.push(key);
        id
    }

    pub fn to_str(&self, id: usize) -> Option<&str> {
        self.v.get(id).map(|x| x.as_str())
    }

    pub fn contains(&self, s: &str) -> bool {
        self.m.contains_key(s)
    }

    pub fn len(&self) -> usize {
        self.v.len()
    }

    pub fn is_empty(&self) -> bool {
        self.v.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.v.iter().map(|x| x.as_str())
    }
}
