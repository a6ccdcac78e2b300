use super::*;

#[test]
fn known_tags_parse_to_their_variants() {
    assert_eq!(ValueType::from_tag("string"), Some(ValueType::String));
    assert_eq!(ValueType::from_tag("list"), Some(ValueType::List));
    assert_eq!(ValueType::from_tag("set"), Some(ValueType::Set));
    assert_eq!(ValueType::from_tag("zset"), Some(ValueType::ZSet));
    assert_eq!(ValueType::from_tag("hash"), Some(ValueType::Hash));
    assert_eq!(ValueType::from_tag("stream"), Some(ValueType::Stream));
}

#[test]
fn none_tag_means_the_key_is_gone() {
    assert_eq!(ValueType::from_tag("none"), None);
}

#[test]
fn unknown_tags_are_preserved_verbatim() {
    let parsed = ValueType::from_tag("reJSON-RL").expect("module type parses");
    assert_eq!(parsed, ValueType::Other("reJSON-RL".to_string()));
    assert_eq!(parsed.as_str(), "reJSON-RL");
}

#[test]
fn tags_round_trip_through_as_str() {
    for tag in ["string", "list", "set", "zset", "hash", "stream", "graph"] {
        let parsed = ValueType::from_tag(tag).expect("tag parses");
        assert_eq!(parsed.as_str(), tag);
        assert_eq!(parsed.to_string(), tag);
    }
}

#[test]
fn display_rank_orders_builtins_before_unknowns() {
    let ordered = [
        ValueType::String,
        ValueType::List,
        ValueType::Set,
        ValueType::ZSet,
        ValueType::Hash,
        ValueType::Stream,
        ValueType::Other("graph".to_string()),
    ];
    for pair in ordered.windows(2) {
        assert!(pair[0].display_rank() < pair[1].display_rank());
    }
}

#[test]
fn store_errors_render_their_category() {
    let connection = StoreError::Connection("refused".to_string());
    assert!(connection.to_string().contains("connection"));
    let command = StoreError::Command("LOADING".to_string());
    assert!(command.to_string().contains("command"));
}
