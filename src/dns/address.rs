use crate::dns::query::Query;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use std::sync::OnceLock;
use synthdns_proto::packet::record::Record;
use synthdns_proto::QueryType;

fn ttl_pattern() -> &'static regex::Regex {
    static PATTERN: OnceLock<regex::Regex> = OnceLock::new();
    PATTERN.get_or_init(|| regex::Regex::new(r"set-([0-9]+)-ttl").expect("valid pattern"))
}

/// TTL for every synthesized RR is 0 unless the owner name carries a
/// `set-N-ttl` directive, in which case it's exactly N.
pub fn ttl_for_owner(owner: &str) -> u32 {
    ttl_pattern()
        .captures(owner)
        .and_then(|captures| captures.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Strip a leading `.` from a cname target, as the grammar allows
/// `cname-.other.name` to mean `other.name`.
fn canonicalize_cname(target: &str) -> &str {
    target.strip_prefix('.').unwrap_or(target)
}

fn expand_ipv6(addr: &Ipv6Addr) -> String {
    addr.segments()
        .iter()
        .map(|segment| format!("{segment:04x}"))
        .collect::<Vec<_>>()
        .join(":")
}

fn hex_decode_lossy(raw: &str) -> String {
    match hex::decode(raw) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(_) => raw.to_string(),
    }
}

/// Decode one address token against a query, producing the RR it encodes
/// (if any) and whether the token was recognized at all.
///
/// `ttl` is the TTL directive already extracted from the owner name
/// (`query.name_for_reply`); every RR this produces carries it.
pub fn interpret_address(token: &str, query: &Query, ttl: u32) -> (Vec<Record>, bool) {
    if token.is_empty() {
        return (Vec::new(), false);
    }

    let a = token.strip_suffix('-').unwrap_or(token);
    let owner = query.name_for_reply.clone();

    if let Some(target) = a.strip_prefix("cname-") {
        let host = canonicalize_cname(target).to_string();
        return (
            vec![Record::CNAME {
                domain: owner,
                host,
                ttl,
            }],
            true,
        );
    }

    if matches!(query.qtype, QueryType::A | QueryType::AAAA) {
        let lower = a.to_ascii_lowercase();
        let mut force_v6 = false;
        let mut candidate = None;

        if let Some(rest) = lower.strip_prefix("ip-") {
            candidate = Some(rest.replace('o', ".").replace('l', ":"));
        } else {
            let mut rest = lower.as_str();
            if let Some(stripped) = rest.strip_prefix("v6-") {
                rest = stripped;
                force_v6 = true;
            }
            let dot_form = rest.replace('-', ".");
            let colon_form = rest.replace('-', ":");
            if dot_form.parse::<IpAddr>().is_ok() {
                candidate = Some(dot_form);
            } else if colon_form.parse::<IpAddr>().is_ok() {
                candidate = Some(colon_form);
            }
        }

        if let Some(candidate) = candidate {
            if let Ok(parsed) = IpAddr::from_str(&candidate) {
                let is_v4 = matches!(parsed, IpAddr::V4(_)) && !force_v6;

                return match query.qtype {
                    QueryType::A if is_v4 => {
                        let addr = match parsed {
                            IpAddr::V4(addr) => addr,
                            IpAddr::V6(_) => unreachable!(),
                        };
                        (
                            vec![Record::A {
                                domain: owner,
                                addr,
                                ttl,
                            }],
                            true,
                        )
                    }
                    QueryType::AAAA if !is_v4 => {
                        let addr = match parsed {
                            IpAddr::V6(addr) => addr,
                            IpAddr::V4(v4) => v4.to_ipv6_mapped(),
                        };
                        let line = format!("{owner} {ttl} IN AAAA {}", expand_ipv6(&addr));
                        match Record::parse(&line) {
                            Ok(record) => (vec![record], true),
                            Err(_) => (Vec::new(), true),
                        }
                    }
                    _ => (Vec::new(), true),
                };
            }
        }
    } else if a.starts_with("ip-") {
        return (Vec::new(), true);
    }

    let decoded;
    let a = if let Some(rest) = a.strip_prefix("hex-") {
        decoded = hex_decode_lossy(rest);
        decoded.as_str()
    } else {
        a
    };

    let type_name = query.qtype.name();
    let line = format!("{owner} {ttl} IN {type_name} {a}");
    match Record::parse(&line) {
        Ok(record) => (vec![record], true),
        Err(_) => (Vec::new(), true),
    }
}

/// Split the `-and-` joined payload into individual address tokens and
/// interpret each independently, concatenating whatever they produce.
pub fn interpret_multi(payload: &str, query: &Query, ttl: u32) -> (Vec<Record>, bool) {
    let mut rrs = Vec::new();
    let mut any_matched = false;
    for token in payload.split("-and-") {
        let (mut token_rrs, matched) = interpret_address(token, query, ttl);
        any_matched |= matched;
        rrs.append(&mut token_rrs);
    }
    (rrs, any_matched)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(qtype: QueryType, name: &str) -> Query {
        Query::new(qtype, name)
    }

    #[test]
    fn plain_ipv4_literal() {
        let q = query(QueryType::A, "make-1.2.3.4-rr.1u.ms.");
        let (rrs, matched) = interpret_address("1.2.3.4-", &q, 0);
        assert!(matched);
        assert_eq!(
            rrs,
            vec![Record::A {
                domain: "make-1.2.3.4-rr.1u.ms.".into(),
                addr: Ipv4Addr::new(1, 2, 3, 4),
                ttl: 0,
            }]
        );
    }

    #[test]
    fn ip_dash_encoded_address() {
        let q = query(QueryType::A, "make-ip-10o0o0o1-rr.1u.ms.");
        let (rrs, matched) = interpret_address("ip-10o0o0o1-", &q, 0);
        assert!(matched);
        assert_eq!(
            rrs,
            vec![Record::A {
                domain: "make-ip-10o0o0o1-rr.1u.ms.".into(),
                addr: Ipv4Addr::new(10, 0, 0, 1),
                ttl: 0,
            }]
        );
    }

    #[test]
    fn v6_dash_encoded_address_expands_fully() {
        let q = query(QueryType::AAAA, "make-v6-dead--beef-rr.1u.ms.");
        let (rrs, matched) = interpret_address("v6-dead--beef-", &q, 0);
        assert!(matched);
        assert_eq!(rrs.len(), 1);
        match &rrs[0] {
            Record::AAAA { addr, .. } => {
                assert_eq!(
                    expand_ipv6(addr),
                    "dead:0000:0000:0000:0000:0000:0000:beef"
                );
            }
            other => panic!("expected AAAA, got {other:?}"),
        }
    }

    #[test]
    fn mismatched_family_is_suppressed_but_consumed() {
        let q = query(QueryType::A, "1u.ms.");
        let (rrs, matched) = interpret_address("v6-dead--beef-", &q, 0);
        assert!(matched);
        assert!(rrs.is_empty());
    }

    #[test]
    fn cname_strips_leading_dot() {
        let q = query(QueryType::CNAME, "fake.1u.ms.");
        let (rrs, matched) = interpret_address("cname-.other.1u.ms", &q, 30);
        assert!(matched);
        assert_eq!(
            rrs,
            vec![Record::CNAME {
                domain: "fake.1u.ms.".into(),
                host: "other.1u.ms".into(),
                ttl: 30,
            }]
        );
    }

    #[test]
    fn hex_decodes_txt_payload() {
        let q = query(QueryType::TXT, "1u.ms.");
        let (rrs, matched) = interpret_address("hex-68656c6c6f", &q, 0);
        assert!(matched);
        assert_eq!(
            rrs,
            vec![Record::TXT {
                domain: "1u.ms.".into(),
                data: "hello".into(),
                ttl: 0,
            }]
        );
    }

    #[test]
    fn and_joined_tokens_each_contribute_a_record() {
        let q = query(QueryType::A, "1u.ms.");
        let (rrs, matched) = interpret_multi("1.2.3.4-and-5.6.7.8", &q, 0);
        assert!(matched);
        assert_eq!(rrs.len(), 2);
    }

    #[test]
    fn ttl_directive_is_extracted_from_owner() {
        assert_eq!(ttl_for_owner("foo.set-30-ttl.1u.ms."), 30);
        assert_eq!(ttl_for_owner("foo.1u.ms."), 0);
    }
}
