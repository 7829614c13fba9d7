pub mod header;
pub mod question;
pub mod record;

use crate::buffer::{BytePacketBuffer, ReaderError, WriterError};

#[derive(PartialEq, Eq, Debug, Clone, Hash, Copy)]
#[allow(clippy::upper_case_acronyms)]
pub enum QueryType {
    Unknown(u16),
    /// a host address
    A, // 1
    /// an authoritative name server
    NS, // 2
    /// the canonical name for an alias
    CNAME, // 5
    /// start of a zone of authority
    SOA, // 6
    /// mail exchange
    MX, // 15
    /// text strings
    TXT, // 16
    /// IPv6 host address
    AAAA, // 28
    /// HTTPS service binding
    HTTPS, // 65
    /// a request for all records
    ANY, // 255
}

impl QueryType {
    pub fn into_num(self) -> u16 {
        match self {
            QueryType::Unknown(x) => x,
            QueryType::A => 1,
            QueryType::NS => 2,
            QueryType::CNAME => 5,
            QueryType::SOA => 6,
            QueryType::MX => 15,
            QueryType::TXT => 16,
            QueryType::AAAA => 28,
            QueryType::HTTPS => 65,
            QueryType::ANY => 255,
        }
    }

    pub fn from_num(num: u16) -> QueryType {
        match num {
            1 => QueryType::A,
            2 => QueryType::NS,
            5 => QueryType::CNAME,
            6 => QueryType::SOA,
            15 => QueryType::MX,
            16 => QueryType::TXT,
            28 => QueryType::AAAA,
            65 => QueryType::HTTPS,
            255 => QueryType::ANY,
            _ => QueryType::Unknown(num),
        }
    }

    /// The name as it appears in text-RR notation, e.g. `A`, `AAAA`,
    /// `CNAME`. Used both to parse predefined records and to render
    /// synthesized ones.
    pub fn name(self) -> &'static str {
        match self {
            QueryType::Unknown(_) => "UNKNOWN",
            QueryType::A => "A",
            QueryType::NS => "NS",
            QueryType::CNAME => "CNAME",
            QueryType::SOA => "SOA",
            QueryType::MX => "MX",
            QueryType::TXT => "TXT",
            QueryType::AAAA => "AAAA",
            QueryType::HTTPS => "HTTPS",
            QueryType::ANY => "ANY",
        }
    }

    pub fn from_name(name: &str) -> Option<QueryType> {
        match name.to_ascii_uppercase().as_str() {
            "A" => Some(QueryType::A),
            "NS" => Some(QueryType::NS),
            "CNAME" => Some(QueryType::CNAME),
            "SOA" => Some(QueryType::SOA),
            "MX" => Some(QueryType::MX),
            "TXT" => Some(QueryType::TXT),
            "AAAA" => Some(QueryType::AAAA),
            "HTTPS" => Some(QueryType::HTTPS),
            "ANY" => Some(QueryType::ANY),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct DnsPacket {
    pub header: header::Header,
    pub questions: Vec<question::Question>,
    pub answers: Vec<record::Record>,
    pub authorities: Vec<record::Record>,
    pub resources: Vec<record::Record>,
}

impl DnsPacket {
    pub fn new(header: header::Header) -> Self {
        Self {
            header,
            ..Default::default()
        }
    }

    /// Build the skeleton of a reply to `request`: same id, AA set, same
    /// question section, everything else empty.
    pub fn response_from(request: &Self) -> Self {
        Self {
            header: header::Header::response_from(&request.header),
            questions: request.questions.clone(),
            ..Default::default()
        }
    }

    pub fn with_question(mut self, question: question::Question) -> Self {
        self.questions.push(question);
        self
    }

    pub fn with_answer(mut self, record: record::Record) -> Self {
        self.answers.push(record);
        self
    }

    pub fn with_answers(mut self, records: Vec<record::Record>) -> Self {
        self.answers.extend(records);
        self
    }

    pub fn with_authority(mut self, record: record::Record) -> Self {
        self.authorities.push(record);
        self
    }

    pub fn with_resource(mut self, record: record::Record) -> Self {
        self.resources.push(record);
        self
    }
}

impl TryFrom<BytePacketBuffer> for DnsPacket {
    type Error = ReaderError;

    fn try_from(mut buffer: BytePacketBuffer) -> Result<Self, Self::Error> {
        Self::from_buffer(&mut buffer)
    }
}

impl DnsPacket {
    pub fn from_buffer(buffer: &mut BytePacketBuffer) -> Result<Self, ReaderError> {
        let header = header::Header::read(buffer)?;

        let mut questions = Vec::with_capacity(header.questions as usize);
        for _ in 0..header.questions {
            questions.push(question::Question::read(buffer)?);
        }

        let mut answers = Vec::with_capacity(header.answers as usize);
        for _ in 0..header.answers {
            answers.push(record::Record::read(buffer)?);
        }

        let mut authorities = Vec::with_capacity(header.authoritative_entries as usize);
        for _ in 0..header.authoritative_entries {
            authorities.push(record::Record::read(buffer)?);
        }

        let mut resources = Vec::with_capacity(header.resource_entries as usize);
        for _ in 0..header.resource_entries {
            resources.push(record::Record::read(buffer)?);
        }

        Ok(DnsPacket {
            header,
            questions,
            answers,
            authorities,
            resources,
        })
    }

    pub fn create_buffer(&self) -> Result<BytePacketBuffer, WriterError> {
        let mut buffer = BytePacketBuffer::default();

        let mut header = self.header.clone();
        header.questions = self.questions.len() as u16;
        header.answers = self.answers.len() as u16;
        header.authoritative_entries = self.authorities.len() as u16;
        header.resource_entries = self.resources.len() as u16;
        header.write(&mut buffer)?;

        for question in &self.questions {
            question.write(&mut buffer)?;
        }
        for rec in &self.answers {
            rec.write(&mut buffer)?;
        }
        for rec in &self.authorities {
            rec.write(&mut buffer)?;
        }
        for rec in &self.resources {
            rec.write(&mut buffer)?;
        }

        Ok(buffer)
    }
}
