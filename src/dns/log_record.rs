use crate::dns::response::Response;
use chrono::Local;
use synthdns_proto::QueryType;

/// An immutable record of one answered question, as pushed to the
/// `LogViewer` ring buffer.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub remote: String,
    pub qtype: QueryType,
    pub name: String,
    pub response: Option<Response>,
}

impl LogRecord {
    pub fn new(remote: String, qtype: QueryType, name: String, response: Option<Response>) -> Self {
        Self {
            remote,
            qtype,
            name,
            response,
        }
    }

    /// `"[YYYY-MM-DD HH:MM:SS.fff] <remote> <TYPE> "<name>" -> [rr,rr,…]"`.
    pub fn render(&self) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let rrs = self
            .response
            .as_ref()
            .map(|response| {
                response
                    .rrs
                    .iter()
                    .map(|rr| rr.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();

        format!(
            "[{timestamp}] {} {} \"{}\" -> [{rrs}]",
            self.remote,
            self.qtype.name(),
            self.name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_with_name_and_type() {
        let record = LogRecord::new(
            "127.0.0.1:5353".into(),
            QueryType::A,
            "foo.1u.ms.".into(),
            Some(Response::empty()),
        );
        let line = record.render();
        assert!(line.contains("127.0.0.1:5353 A \"foo.1u.ms.\" -> []"));
    }
}
