use synthdns_proto::packet::record::Record;

/// What a matched handler produces. `None` (outside this type) means "did
/// not match; try the next handler" — an empty `rrs` here still counts as
/// a match, it just adds nothing to the Answer section.
#[derive(Debug, Clone, Default)]
pub struct Response {
    pub rrs: Vec<Record>,
    pub servfail: bool,
}

impl Response {
    pub fn records(rrs: Vec<Record>) -> Self {
        Self {
            rrs,
            servfail: false,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn servfail() -> Self {
        Self {
            rrs: Vec::new(),
            servfail: true,
        }
    }
}
