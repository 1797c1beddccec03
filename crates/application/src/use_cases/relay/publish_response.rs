use hickory_proto::op::Message;
use hickory_proto::rr::Record;

/// Prepare the IPv4 answer for publication on the IPv6 group.
///
/// Appends `synthesized` to the additional section and replaces the
/// responder's transaction ID with `query_id`. Returns `None` when there is
/// nothing to add, in which case nothing is published.
pub fn merge_synthesized(
    query_id: u16,
    response: &Message,
    synthesized: Vec<Record>,
) -> Option<Message> {
    if synthesized.is_empty() {
        return None;
    }

    let mut publication = response.clone();
    for record in synthesized {
        publication.add_additional(record);
    }
    publication.set_id(query_id);

    Some(publication)
}
