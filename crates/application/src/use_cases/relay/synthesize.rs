use hickory_proto::op::Message;
use hickory_proto::rr::rdata::AAAA;
use hickory_proto::rr::{RData, Record};
use mdns64_domain::synthesize_nat64;
use std::net::Ipv4Addr;

/// Build NAT64 AAAA records for an IPv4-only response.
///
/// Looks at the answer and additional sections together. Nothing is
/// produced when the response already carries an AAAA record or carries no
/// A record at all. Otherwise there is one AAAA per A, in A-record order,
/// with the A record's name, class (cache-flush bit included) and TTL.
pub fn synthesize_aaaa_records(response: &Message) -> Vec<Record> {
    let mut ipv4_records: Vec<(&Record, Ipv4Addr)> = Vec::new();

    for record in response.answers().iter().chain(response.additionals()) {
        match record.data() {
            RData::A(a) => ipv4_records.push((record, a.0)),
            RData::AAAA(_) => return Vec::new(),
            _ => {}
        }
    }

    ipv4_records
        .into_iter()
        .map(|(record, addr)| nat64_record(record, addr))
        .collect()
}

fn nat64_record(a_record: &Record, addr: Ipv4Addr) -> Record {
    let mut aaaa = Record::from_rdata(
        a_record.name().clone(),
        a_record.ttl(),
        RData::AAAA(AAAA(synthesize_nat64(addr))),
    );
    aaaa.set_dns_class(a_record.dns_class());
    aaaa.set_mdns_cache_flush(a_record.mdns_cache_flush());
    aaaa
}
