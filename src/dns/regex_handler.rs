use crate::dns::handler::Handler;
use crate::dns::query::Query;
use crate::dns::response::Response;
use async_trait::async_trait;
use regex::{Captures, Regex};

/// Binds a compiled pattern to a synchronous callback receiving its
/// captures. Patterns are evaluated against the full, lower-cased,
/// dot-terminated query name. Covers every grammar handler except the
/// delay injector, which needs to actually suspend.
pub struct RegexHandler<F> {
    pattern: Regex,
    callback: F,
}

impl<F> RegexHandler<F>
where
    F: Fn(&mut Query, &Captures) -> Option<Response> + Send + Sync,
{
    pub fn new(pattern: &str, callback: F) -> Self {
        let pattern = Regex::new(pattern)
            .unwrap_or_else(|error| panic!("invalid grammar pattern {pattern:?}: {error}"));
        Self { pattern, callback }
    }
}

#[async_trait]
impl<F> Handler for RegexHandler<F>
where
    F: Fn(&mut Query, &Captures) -> Option<Response> + Send + Sync,
{
    async fn handle(&self, query: &mut Query) -> Option<Response> {
        let name = query.name.clone();
        let captures = self.pattern.captures(&name)?;
        (self.callback)(query, &captures)
    }
}
