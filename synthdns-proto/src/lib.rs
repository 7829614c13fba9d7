pub mod buffer;
pub mod packet;

pub use buffer::BytePacketBuffer;
pub use packet::header::{Header, ResponseCode};
pub use packet::question::{DnsClass, Question};
pub use packet::record::Record;
pub use packet::{DnsPacket, QueryType};

#[cfg(test)]
mod tests {
    use crate::packet::header::Header;
    use crate::packet::question::Question;
    use crate::packet::record::Record;
    use crate::packet::{DnsPacket, QueryType};
    use std::net::Ipv4Addr;

    #[test]
    fn round_trips_a_query_packet() {
        let packet = DnsPacket::new(Header::question(38005))
            .with_question(Question::new("foo.1u.ms".into(), QueryType::A));

        let buffer = packet.create_buffer().unwrap();
        let decoded = DnsPacket::try_from(buffer).unwrap();

        assert_eq!(decoded.header.id, 38005);
        assert!(decoded.header.recursion_desired);
        assert_eq!(decoded.questions.len(), 1);
        assert_eq!(decoded.questions[0].name, "foo.1u.ms");
        assert_eq!(decoded.questions[0].qtype, QueryType::A);
        assert!(decoded.answers.is_empty());
    }

    #[test]
    fn round_trips_a_response_with_compressed_names() {
        let request = DnsPacket::new(Header::question(1))
            .with_question(Question::new("ip-127-0-0-1.1u.ms".into(), QueryType::A));

        let packet = DnsPacket::response_from(&request).with_answer(Record::A {
            domain: "ip-127-0-0-1.1u.ms".into(),
            addr: Ipv4Addr::new(127, 0, 0, 1),
            ttl: 60,
        });

        let buffer = packet.create_buffer().unwrap();
        let decoded = DnsPacket::try_from(buffer).unwrap();

        assert!(decoded.header.response);
        assert!(decoded.header.authoritative_answer);
        assert_eq!(decoded.answers.len(), 1);
        assert_eq!(
            decoded.answers[0],
            Record::A {
                domain: "ip-127-0-0-1.1u.ms".into(),
                addr: Ipv4Addr::new(127, 0, 0, 1),
                ttl: 60,
            }
        );
    }

    #[test]
    fn round_trips_mixed_record_types() {
        let packet = DnsPacket::new(Header::response(7))
            .with_answer(Record::CNAME {
                domain: "www.1u.ms".into(),
                host: "1u.ms".into(),
                ttl: 300,
            })
            .with_answer(Record::TXT {
                domain: "1u.ms".into(),
                data: "hello world".into(),
                ttl: 60,
            })
            .with_authority(Record::SOA {
                domain: "1u.ms".into(),
                mname: "ns1.1u.ms".into(),
                rname: "hostmaster.1u.ms".into(),
                serial: 1,
                refresh: 3600,
                retry: 600,
                expire: 86400,
                minimum: 60,
                ttl: 3600,
            });

        let buffer = packet.create_buffer().unwrap();
        let decoded = DnsPacket::try_from(buffer).unwrap();

        assert_eq!(decoded.answers.len(), 2);
        assert_eq!(decoded.authorities.len(), 1);
        assert_eq!(decoded.answers[1].qtype(), QueryType::TXT);
    }

    #[test]
    fn query_type_name_round_trips() {
        for qtype in [
            QueryType::A,
            QueryType::AAAA,
            QueryType::CNAME,
            QueryType::NS,
            QueryType::MX,
            QueryType::SOA,
            QueryType::TXT,
            QueryType::HTTPS,
            QueryType::ANY,
        ] {
            assert_eq!(QueryType::from_name(qtype.name()), Some(qtype));
        }
    }
}
