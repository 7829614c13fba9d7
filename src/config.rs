use crate::dns::error::ConfigError;
use crate::dns::handlers::PredefinedTable;
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;
use synthdns_proto::packet::record::Record;
use synthdns_proto::QueryType;

#[derive(Debug, serde::Deserialize)]
pub struct DnsConfig {
    #[serde(default = "DnsConfig::default_host")]
    pub host: IpAddr,
    #[serde(default = "DnsConfig::default_port")]
    pub port: u16,
}

impl DnsConfig {
    fn default_host() -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0))
    }

    fn default_port() -> u16 {
        53
    }
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl DnsConfig {
    pub fn address(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::from((self.host, self.port))
    }
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct HttpConfig {
    #[serde(default)]
    pub listen_on: Vec<String>,
}

/// The raw shape deserialized straight from YAML. `predefined_records` is
/// kept as nested maps of text-RR lines here; `Config::load` turns it into
/// a validated `PredefinedTable` afterwards, since the `Record` text
/// parser needs to run at load time, not at `serde` deserialization time.
#[derive(Debug, serde::Deserialize)]
pub struct Config {
    pub domain: String,
    #[serde(default)]
    pub predefined_records: HashMap<String, HashMap<String, Vec<String>>>,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub dns: DnsConfig,
}

impl Config {
    /// Build from one or more YAML files, added as sources in the order
    /// given so later files override earlier ones — `config`'s own
    /// recursive source-merge, not a hand-rolled one.
    pub fn load(paths: &[impl AsRef<Path>]) -> Result<Self, ConfigError> {
        let mut builder = ::config::Config::builder();
        for path in paths {
            builder = builder.add_source(
                ::config::File::from(path.as_ref()).format(::config::FileFormat::Yaml),
            );
        }
        let raw: Self = builder.build()?.try_deserialize()?;
        Ok(raw)
    }

    /// Validate every predefined record against the text-RR parser and
    /// build the exact-match table the predefined-record handler uses.
    /// Domain keys without a trailing `.` get one appended.
    pub fn predefined_table(&self) -> Result<PredefinedTable, ConfigError> {
        let mut table = PredefinedTable::new();

        for (domain, by_type) in &self.predefined_records {
            let domain_key = crate::dns::query::normalize_name(domain);

            for (type_name, lines) in by_type {
                let qtype = QueryType::from_name(type_name).ok_or_else(|| {
                    ConfigError::UnknownQueryType {
                        domain: domain.clone(),
                        type_name: type_name.clone(),
                    }
                })?;

                let mut records = Vec::with_capacity(lines.len());
                for line in lines {
                    let record = Record::parse(line).map_err(|source| ConfigError::InvalidRecord {
                        domain: domain.clone(),
                        type_name: type_name.clone(),
                        line: line.clone(),
                        source,
                    })?;
                    records.push(record);
                }

                table.insert((qtype, domain_key.clone()), records);
            }
        }

        Ok(table)
    }
}
