use std::fmt;

/// Fatal at startup: a missing file, malformed YAML, unknown query type
/// name, or an unparseable predefined record.
#[derive(Debug)]
pub enum ConfigError {
    Load(config::ConfigError),
    UnknownQueryType { domain: String, type_name: String },
    InvalidRecord {
        domain: String,
        type_name: String,
        line: String,
        source: synthdns_proto::packet::record::ParseRecordError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load(error) => write!(f, "failed to load configuration: {error}"),
            Self::UnknownQueryType { domain, type_name } => {
                write!(f, "unknown query type {type_name:?} for domain {domain:?}")
            }
            Self::InvalidRecord {
                domain,
                type_name,
                line,
                source,
            } => write!(
                f,
                "invalid {type_name} record for domain {domain:?} ({line:?}): {source}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(value: config::ConfigError) -> Self {
        Self::Load(value)
    }
}

/// Errors surfaced while handling one DNS question.
#[derive(Debug)]
pub enum HandleError {
    Reader(synthdns_proto::buffer::reader::ReaderError),
    Writer(synthdns_proto::buffer::writer::WriterError),
}

impl fmt::Display for HandleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reader(error) => write!(f, "couldn't read dns packet: {error}"),
            Self::Writer(error) => write!(f, "couldn't write dns packet: {error:?}"),
        }
    }
}

impl std::error::Error for HandleError {}

impl From<synthdns_proto::buffer::reader::ReaderError> for HandleError {
    fn from(value: synthdns_proto::buffer::reader::ReaderError) -> Self {
        Self::Reader(value)
    }
}

impl From<synthdns_proto::buffer::writer::WriterError> for HandleError {
    fn from(value: synthdns_proto::buffer::writer::WriterError) -> Self {
        Self::Writer(value)
    }
}
