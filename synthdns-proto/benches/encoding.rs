use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::net::Ipv4Addr;
use synthdns_proto::packet::header::Header;
use synthdns_proto::packet::question::Question;
use synthdns_proto::packet::record::Record;
use synthdns_proto::{DnsPacket, QueryType};

fn query_packet() -> DnsPacket {
    DnsPacket::new(Header::question(38005))
        .with_question(Question::new("foo.1u.ms".into(), QueryType::A))
}

fn response_packet() -> DnsPacket {
    let request = query_packet();
    DnsPacket::response_from(&request).with_answer(Record::A {
        domain: "foo.1u.ms".into(),
        addr: Ipv4Addr::new(172, 217, 20, 206),
        ttl: 8,
    })
}

fn encoding(packet: &DnsPacket) {
    let _buffer = packet.create_buffer().unwrap();
}

fn decoding(packet: &DnsPacket) {
    let buffer = packet.create_buffer().unwrap();
    let _decoded = DnsPacket::try_from(buffer).unwrap();
}

fn criterion_benchmark(c: &mut Criterion) {
    let query = query_packet();
    let response = response_packet();

    c.bench_function("encoding query packet", |b| {
        b.iter(|| encoding(black_box(&query)))
    });
    c.bench_function("encoding response packet", |b| {
        b.iter(|| encoding(black_box(&response)))
    });
    c.bench_function("decoding query packet", |b| {
        b.iter(|| decoding(black_box(&query)))
    });
    c.bench_function("decoding response packet", |b| {
        b.iter(|| decoding(black_box(&response)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
