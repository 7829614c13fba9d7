use crate::buffer::reader::ReaderError;
use crate::buffer::writer::WriterError;
use crate::buffer::BytePacketBuffer;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResponseCode {
    /// No error condition
    NoError = 0,
    /// Format error - the name server was unable to interpret the query.
    FormatError = 1,
    /// Server failure - the name server was unable to process this query
    /// due to a problem with the name server.
    ServerFailure = 2,
    /// Name error - meaningful only for responses from an authoritative
    /// name server: the domain name referenced in the query does not exist.
    NameError = 3,
    /// Not implemented - the name server does not support the requested
    /// kind of query.
    NotImplemented = 4,
    /// Refused - the name server refuses to perform the operation.
    Refused = 5,
}

impl ResponseCode {
    pub fn from_num(num: u8) -> ResponseCode {
        match num {
            1 => ResponseCode::FormatError,
            2 => ResponseCode::ServerFailure,
            3 => ResponseCode::NameError,
            4 => ResponseCode::NotImplemented,
            5 => ResponseCode::Refused,
            _ => ResponseCode::NoError,
        }
    }

    pub fn into_num(self) -> u8 {
        self as u8
    }
}

#[derive(Clone, Debug, Default)]
pub struct Header {
    /// A 16 bit identifier assigned by the program that generates any kind
    /// of query. This identifier is copied into the response.
    pub id: u16,
    /// RD recursion desired - copied from query into response.
    pub recursion_desired: bool,
    /// TC truncation.
    pub truncated_message: bool,
    /// AA authoritative answer.
    pub authoritative_answer: bool,
    /// OPCODE, 4 bits.
    pub opcode: u8,
    /// QR, whether this message is a query (false) or a response (true).
    pub response: bool,
    pub response_code: ResponseCode,
    pub checking_disabled: bool,
    pub authed_data: bool,
    pub z: bool,
    pub recursion_available: bool,
    pub questions: u16,
    pub answers: u16,
    pub authoritative_entries: u16,
    pub resource_entries: u16,
}

impl Header {
    /// A fresh outgoing query header.
    pub fn question(id: u16) -> Self {
        Self {
            id,
            recursion_desired: true,
            ..Default::default()
        }
    }

    /// A fresh outgoing response header.
    pub fn response(id: u16) -> Self {
        Self {
            id,
            response: true,
            authoritative_answer: true,
            ..Default::default()
        }
    }

    /// Build a response header copying over the identifier from a request.
    pub fn response_from(request: &Self) -> Self {
        Self {
            id: request.id,
            recursion_desired: request.recursion_desired,
            ..Self::response(request.id)
        }
    }

    pub fn read(buffer: &mut BytePacketBuffer) -> Result<Self, ReaderError> {
        let id = buffer.read_u16()?;

        let flags = buffer.read_u16()?;
        let head = (flags >> 8) as u8;
        let tail = (flags & 0xFF) as u8;

        let questions = buffer.read_u16()?;
        let answers = buffer.read_u16()?;
        let authoritative_entries = buffer.read_u16()?;
        let resource_entries = buffer.read_u16()?;

        Ok(Self {
            id,
            recursion_desired: (head & (1 << 0)) > 0,
            truncated_message: (head & (1 << 1)) > 0,
            authoritative_answer: (head & (1 << 2)) > 0,
            opcode: (head >> 3) & 0x0F,
            response: (head & (1 << 7)) > 0,
            response_code: ResponseCode::from_num(tail & 0x0F),
            checking_disabled: (tail & (1 << 4)) > 0,
            authed_data: (tail & (1 << 5)) > 0,
            z: (tail & (1 << 6)) > 0,
            recursion_available: (tail & (1 << 7)) > 0,
            questions,
            answers,
            authoritative_entries,
            resource_entries,
        })
    }

    pub fn write(&self, buffer: &mut BytePacketBuffer) -> Result<(), WriterError> {
        buffer.write_u16(self.id)?;

        buffer.write_u8(
            (self.recursion_desired as u8)
                | ((self.truncated_message as u8) << 1)
                | ((self.authoritative_answer as u8) << 2)
                | (self.opcode << 3)
                | ((self.response as u8) << 7),
        )?;

        buffer.write_u8(
            (self.response_code.into_num())
                | ((self.checking_disabled as u8) << 4)
                | ((self.authed_data as u8) << 5)
                | ((self.z as u8) << 6)
                | ((self.recursion_available as u8) << 7),
        )?;

        buffer.write_u16(self.questions)?;
        buffer.write_u16(self.answers)?;
        buffer.write_u16(self.authoritative_entries)?;
        buffer.write_u16(self.resource_entries)?;

        Ok(())
    }
}

impl Default for ResponseCode {
    fn default() -> Self {
        Self::NoError
    }
}
