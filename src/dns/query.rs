use std::hash::{Hash, Hasher};
use synthdns_proto::QueryType;

/// Ensure a name is lower-cased and dot-terminated, as every name stored
/// anywhere in this system must be.
pub fn normalize_name(name: &str) -> String {
    let mut name = name.to_ascii_lowercase();
    if !name.ends_with('.') {
        name.push('.');
    }
    name
}

/// A single incoming question, plus the scratch owner name synthesized
/// answers are built against.
///
/// Equality and hashing only consider `qtype` and `name`: `name_for_reply`
/// is mutable scratch state a `fake-…-rr` match can rewrite, and it must
/// never affect whether two queries are "the same" for rebind bookkeeping.
#[derive(Debug, Clone)]
pub struct Query {
    pub qtype: QueryType,
    pub name: String,
    pub name_for_reply: String,
}

impl Query {
    pub fn new(qtype: QueryType, name: &str) -> Self {
        let name = normalize_name(name);
        Self {
            qtype,
            name: name.clone(),
            name_for_reply: name,
        }
    }

    pub fn key(&self) -> (QueryType, String) {
        (self.qtype, self.name.clone())
    }
}

impl PartialEq for Query {
    fn eq(&self, other: &Self) -> bool {
        self.qtype == other.qtype && self.name == other.name
    }
}

impl Eq for Query {}

impl Hash for Query {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.qtype.hash(state);
        self.name.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn normalizes_case_and_trailing_dot() {
        assert_eq!(normalize_name("Foo.1U.ms"), "foo.1u.ms.");
        assert_eq!(normalize_name("foo.1u.ms."), "foo.1u.ms.");
    }

    #[test]
    fn equality_ignores_name_for_reply() {
        let mut a = Query::new(QueryType::A, "foo.1u.ms.");
        let b = Query::new(QueryType::A, "foo.1u.ms.");
        a.name_for_reply = "rewritten.1u.ms.".into();
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a.key());
        assert!(set.contains(&b.key()));
    }
}
