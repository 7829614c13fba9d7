use super::QueryType;
use crate::buffer::reader::ReaderError;
use crate::buffer::writer::WriterError;
use crate::buffer::BytePacketBuffer;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(clippy::upper_case_acronyms)]
pub enum Record {
    Unknown {
        domain: String,
        qtype: u16,
        data_len: u16,
        ttl: u32,
    }, // 0
    A {
        domain: String,
        addr: Ipv4Addr,
        ttl: u32,
    }, // 1
    NS {
        domain: String,
        host: String,
        ttl: u32,
    }, // 2
    CNAME {
        domain: String,
        host: String,
        ttl: u32,
    }, // 5
    SOA {
        domain: String,
        mname: String,
        rname: String,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        minimum: u32,
        ttl: u32,
    }, // 6
    MX {
        domain: String,
        priority: u16,
        host: String,
        ttl: u32,
    }, // 15
    TXT {
        domain: String,
        data: String,
        ttl: u32,
    }, // 16
    AAAA {
        domain: String,
        addr: Ipv6Addr,
        ttl: u32,
    }, // 28
}

/// Parsing a textual resource record (`<name> <ttl> IN <TYPE> <rdata>`) failed.
#[derive(Debug, PartialEq, Eq)]
pub enum ParseRecordError {
    MissingField(&'static str),
    UnsupportedClass(String),
    UnsupportedType(String),
    InvalidTtl(String),
    InvalidAddress(String),
    InvalidSoaField(&'static str, String),
}

impl fmt::Display for ParseRecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(name) => write!(f, "missing field: {name}"),
            Self::UnsupportedClass(class) => write!(f, "unsupported class: {class}"),
            Self::UnsupportedType(ty) => write!(f, "unsupported record type: {ty}"),
            Self::InvalidTtl(ttl) => write!(f, "invalid ttl: {ttl}"),
            Self::InvalidAddress(addr) => write!(f, "invalid address: {addr}"),
            Self::InvalidSoaField(field, value) => {
                write!(f, "invalid SOA field {field}: {value}")
            }
        }
    }
}

impl std::error::Error for ParseRecordError {}

impl Record {
    pub fn domain(&self) -> &str {
        match self {
            Self::A { domain, .. }
            | Self::AAAA { domain, .. }
            | Self::CNAME { domain, .. }
            | Self::MX { domain, .. }
            | Self::NS { domain, .. }
            | Self::SOA { domain, .. }
            | Self::TXT { domain, .. }
            | Self::Unknown { domain, .. } => domain,
        }
    }

    pub fn qtype(&self) -> QueryType {
        match self {
            Self::A { .. } => QueryType::A,
            Self::AAAA { .. } => QueryType::AAAA,
            Self::CNAME { .. } => QueryType::CNAME,
            Self::MX { .. } => QueryType::MX,
            Self::NS { .. } => QueryType::NS,
            Self::SOA { .. } => QueryType::SOA,
            Self::TXT { .. } => QueryType::TXT,
            Self::Unknown { qtype, .. } => QueryType::Unknown(*qtype),
        }
    }

    pub fn ttl(&self) -> u32 {
        match self {
            Self::A { ttl, .. } => *ttl,
            Self::AAAA { ttl, .. } => *ttl,
            Self::CNAME { ttl, .. } => *ttl,
            Self::MX { ttl, .. } => *ttl,
            Self::NS { ttl, .. } => *ttl,
            Self::SOA { ttl, .. } => *ttl,
            Self::TXT { ttl, .. } => *ttl,
            Self::Unknown { ttl, .. } => *ttl,
        }
    }

    pub fn read(buffer: &mut BytePacketBuffer) -> Result<Record, ReaderError> {
        // NAME a domain name to which this resource record pertains.
        let domain = buffer.read_qname()?;

        // TYPE two octets containing one of the RR type codes.
        // This field specifies the meaning of the data in the RDATA field.
        let qtype_num = buffer.read_u16()?;
        let qtype = QueryType::from_num(qtype_num);

        // CLASS two octets which specify the class of the data in the RDATA field.
        let _qclass = buffer.read_u16()?;

        // TTL a 32 bit unsigned integer that specifies the time interval (in seconds)
        // that the resource record may be cached before it should be discarded.
        let ttl = buffer.read_u32()?;

        // RDLENGTH an unsigned 16 bit integer that specifies the length in octets of the RDATA field.
        let data_len = buffer.read_u16()?;

        match qtype {
            QueryType::A => {
                let raw_addr = buffer.read_u32()?;
                let addr = Ipv4Addr::new(
                    ((raw_addr >> 24) & 0xFF) as u8,
                    ((raw_addr >> 16) & 0xFF) as u8,
                    ((raw_addr >> 8) & 0xFF) as u8,
                    (raw_addr & 0xFF) as u8,
                );

                Ok(Record::A { domain, addr, ttl })
            }
            QueryType::AAAA => {
                let raw_addr1 = buffer.read_u32()?;
                let raw_addr2 = buffer.read_u32()?;
                let raw_addr3 = buffer.read_u32()?;
                let raw_addr4 = buffer.read_u32()?;
                let addr = Ipv6Addr::new(
                    ((raw_addr1 >> 16) & 0xFFFF) as u16,
                    (raw_addr1 & 0xFFFF) as u16,
                    ((raw_addr2 >> 16) & 0xFFFF) as u16,
                    (raw_addr2 & 0xFFFF) as u16,
                    ((raw_addr3 >> 16) & 0xFFFF) as u16,
                    (raw_addr3 & 0xFFFF) as u16,
                    ((raw_addr4 >> 16) & 0xFFFF) as u16,
                    (raw_addr4 & 0xFFFF) as u16,
                );

                Ok(Record::AAAA { domain, addr, ttl })
            }
            QueryType::NS => {
                let host = buffer.read_qname()?;

                Ok(Record::NS { domain, host, ttl })
            }
            QueryType::CNAME => {
                let host = buffer.read_qname()?;

                Ok(Record::CNAME { domain, host, ttl })
            }
            QueryType::MX => {
                let priority = buffer.read_u16()?;
                let host = buffer.read_qname()?;

                Ok(Record::MX {
                    domain,
                    priority,
                    host,
                    ttl,
                })
            }
            QueryType::SOA => {
                let mname = buffer.read_qname()?;
                let rname = buffer.read_qname()?;
                let serial = buffer.read_u32()?;
                let refresh = buffer.read_u32()?;
                let retry = buffer.read_u32()?;
                let expire = buffer.read_u32()?;
                let minimum = buffer.read_u32()?;

                Ok(Record::SOA {
                    domain,
                    mname,
                    rname,
                    serial,
                    refresh,
                    retry,
                    expire,
                    minimum,
                    ttl,
                })
            }
            QueryType::TXT => {
                let len = buffer.read()? as usize;
                let mut bytes = Vec::with_capacity(len);
                for _ in 0..len {
                    bytes.push(buffer.read()?);
                }
                let data = String::from_utf8_lossy(&bytes).into_owned();

                Ok(Record::TXT { domain, data, ttl })
            }
            QueryType::HTTPS | QueryType::ANY | QueryType::Unknown(_) => {
                buffer.step(data_len as usize)?;

                Ok(Record::Unknown {
                    domain,
                    qtype: qtype_num,
                    data_len,
                    ttl,
                })
            }
        }
    }

    pub fn write(&self, buffer: &mut BytePacketBuffer) -> Result<usize, WriterError> {
        let start_pos = buffer.pos();

        match self {
            Record::A { domain, addr, ttl } => {
                buffer.write_qname(domain)?;
                buffer.write_u16(QueryType::A.into_num())?;
                buffer.write_u16(1)?;
                buffer.write_u32(*ttl)?;
                buffer.write_u16(4)?;

                let octets = addr.octets();
                buffer.write_u8(octets[0])?;
                buffer.write_u8(octets[1])?;
                buffer.write_u8(octets[2])?;
                buffer.write_u8(octets[3])?;
            }
            Record::NS { domain, host, ttl } => {
                buffer.write_qname(domain)?;
                buffer.write_u16(QueryType::NS.into_num())?;
                buffer.write_u16(1)?;
                buffer.write_u32(*ttl)?;

                let pos = buffer.pos();
                buffer.write_u16(0)?;

                buffer.write_qname(host)?;

                let size = buffer.pos() - (pos + 2);
                buffer.set_u16(pos, size as u16)?;
            }
            Record::CNAME { domain, host, ttl } => {
                buffer.write_qname(domain)?;
                buffer.write_u16(QueryType::CNAME.into_num())?;
                buffer.write_u16(1)?;
                buffer.write_u32(*ttl)?;

                let pos = buffer.pos();
                buffer.write_u16(0)?;

                buffer.write_qname(host)?;

                let size = buffer.pos() - (pos + 2);
                buffer.set_u16(pos, size as u16)?;
            }
            Record::MX {
                domain,
                priority,
                host,
                ttl,
            } => {
                buffer.write_qname(domain)?;
                buffer.write_u16(QueryType::MX.into_num())?;
                buffer.write_u16(1)?;
                buffer.write_u32(*ttl)?;

                let pos = buffer.pos();
                buffer.write_u16(0)?;

                buffer.write_u16(*priority)?;
                buffer.write_qname(host)?;

                let size = buffer.pos() - (pos + 2);
                buffer.set_u16(pos, size as u16)?;
            }
            Record::SOA {
                domain,
                mname,
                rname,
                serial,
                refresh,
                retry,
                expire,
                minimum,
                ttl,
            } => {
                buffer.write_qname(domain)?;
                buffer.write_u16(QueryType::SOA.into_num())?;
                buffer.write_u16(1)?;
                buffer.write_u32(*ttl)?;

                let pos = buffer.pos();
                buffer.write_u16(0)?;

                buffer.write_qname(mname)?;
                buffer.write_qname(rname)?;
                buffer.write_u32(*serial)?;
                buffer.write_u32(*refresh)?;
                buffer.write_u32(*retry)?;
                buffer.write_u32(*expire)?;
                buffer.write_u32(*minimum)?;

                let size = buffer.pos() - (pos + 2);
                buffer.set_u16(pos, size as u16)?;
            }
            Record::TXT { domain, data, ttl } => {
                buffer.write_qname(domain)?;
                buffer.write_u16(QueryType::TXT.into_num())?;
                buffer.write_u16(1)?;
                buffer.write_u32(*ttl)?;

                let bytes = data.as_bytes();
                if bytes.len() > 255 {
                    return Err(WriterError::SingleLabelLengh);
                }
                buffer.write_u16(1 + bytes.len() as u16)?;
                buffer.write_u8(bytes.len() as u8)?;
                for byte in bytes {
                    buffer.write_u8(*byte)?;
                }
            }
            Record::AAAA { domain, addr, ttl } => {
                buffer.write_qname(domain)?;
                buffer.write_u16(QueryType::AAAA.into_num())?;
                buffer.write_u16(1)?;
                buffer.write_u32(*ttl)?;
                buffer.write_u16(16)?;

                for segment in &addr.segments() {
                    buffer.write_u16(*segment)?;
                }
            }
            Record::Unknown { .. } => {
                tracing::debug!(record = ?self, "skipping unknown record on write");
            }
        }

        Ok(buffer.pos() - start_pos)
    }

    /// Parse a single line of text-RR notation: `<name> <ttl> IN <TYPE> <rdata>`.
    /// This is the format predefined records are authored in and the format
    /// synthesized answers are logged in.
    pub fn parse(line: &str) -> Result<Record, ParseRecordError> {
        let mut fields = line.split_whitespace();

        let domain = fields
            .next()
            .ok_or(ParseRecordError::MissingField("name"))?
            .trim_end_matches('.')
            .to_string();
        let ttl_raw = fields.next().ok_or(ParseRecordError::MissingField("ttl"))?;
        let ttl: u32 = ttl_raw
            .parse()
            .map_err(|_| ParseRecordError::InvalidTtl(ttl_raw.to_string()))?;
        let class = fields.next().ok_or(ParseRecordError::MissingField("class"))?;
        if !class.eq_ignore_ascii_case("IN") {
            return Err(ParseRecordError::UnsupportedClass(class.to_string()));
        }
        let ty = fields.next().ok_or(ParseRecordError::MissingField("type"))?;
        let rdata: Vec<&str> = fields.collect();

        match ty.to_ascii_uppercase().as_str() {
            "A" => {
                let raw = rdata.first().ok_or(ParseRecordError::MissingField("address"))?;
                let addr = Ipv4Addr::from_str(raw)
                    .map_err(|_| ParseRecordError::InvalidAddress(raw.to_string()))?;
                Ok(Record::A { domain, addr, ttl })
            }
            "AAAA" => {
                let raw = rdata.first().ok_or(ParseRecordError::MissingField("address"))?;
                let addr = Ipv6Addr::from_str(raw)
                    .map_err(|_| ParseRecordError::InvalidAddress(raw.to_string()))?;
                Ok(Record::AAAA { domain, addr, ttl })
            }
            "CNAME" => {
                let host = rdata
                    .first()
                    .ok_or(ParseRecordError::MissingField("host"))?
                    .trim_end_matches('.')
                    .to_string();
                Ok(Record::CNAME { domain, host, ttl })
            }
            "NS" => {
                let host = rdata
                    .first()
                    .ok_or(ParseRecordError::MissingField("host"))?
                    .trim_end_matches('.')
                    .to_string();
                Ok(Record::NS { domain, host, ttl })
            }
            "MX" => {
                let priority_raw = rdata.first().ok_or(ParseRecordError::MissingField("priority"))?;
                let priority: u16 = priority_raw
                    .parse()
                    .map_err(|_| ParseRecordError::InvalidTtl(priority_raw.to_string()))?;
                let host = rdata
                    .get(1)
                    .ok_or(ParseRecordError::MissingField("host"))?
                    .trim_end_matches('.')
                    .to_string();
                Ok(Record::MX {
                    domain,
                    priority,
                    host,
                    ttl,
                })
            }
            "TXT" => {
                let data = rdata.join(" ").trim_matches('"').to_string();
                Ok(Record::TXT { domain, data, ttl })
            }
            "SOA" => {
                let field = |idx: usize, name: &'static str| {
                    rdata.get(idx).ok_or(ParseRecordError::MissingField(name))
                };
                let parse_u32 = |idx: usize, name: &'static str| -> Result<u32, ParseRecordError> {
                    field(idx, name)?
                        .parse()
                        .map_err(|_| ParseRecordError::InvalidSoaField(name, rdata[idx].to_string()))
                };
                let mname = field(0, "mname")?.trim_end_matches('.').to_string();
                let rname = field(1, "rname")?.trim_end_matches('.').to_string();
                let serial = parse_u32(2, "serial")?;
                let refresh = parse_u32(3, "refresh")?;
                let retry = parse_u32(4, "retry")?;
                let expire = parse_u32(5, "expire")?;
                let minimum = parse_u32(6, "minimum")?;
                Ok(Record::SOA {
                    domain,
                    mname,
                    rname,
                    serial,
                    refresh,
                    retry,
                    expire,
                    minimum,
                    ttl,
                })
            }
            other => Err(ParseRecordError::UnsupportedType(other.to_string())),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Record::A { domain, addr, ttl } => {
                write!(f, "{domain} {ttl} IN A {addr}")
            }
            Record::AAAA { domain, addr, ttl } => {
                write!(f, "{domain} {ttl} IN AAAA {addr}")
            }
            Record::CNAME { domain, host, ttl } => {
                write!(f, "{domain} {ttl} IN CNAME {host}")
            }
            Record::NS { domain, host, ttl } => {
                write!(f, "{domain} {ttl} IN NS {host}")
            }
            Record::MX {
                domain,
                priority,
                host,
                ttl,
            } => write!(f, "{domain} {ttl} IN MX {priority} {host}"),
            Record::SOA {
                domain,
                mname,
                rname,
                serial,
                refresh,
                retry,
                expire,
                minimum,
                ttl,
            } => write!(
                f,
                "{domain} {ttl} IN SOA {mname} {rname} {serial} {refresh} {retry} {expire} {minimum}"
            ),
            Record::TXT { domain, data, ttl } => {
                write!(f, "{domain} {ttl} IN TXT \"{data}\"")
            }
            Record::Unknown { domain, qtype, ttl, .. } => {
                write!(f, "{domain} {ttl} IN TYPE{qtype} ;unsupported")
            }
        }
    }
}
