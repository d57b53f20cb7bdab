use super::*;

#[test]
fn test_peer_identity_parse() {
    let peer: PeerIdentity = "QmPeerA".parse().unwrap();
    assert_eq!(peer.as_str(), "QmPeerA");
    assert_eq!(format!("{peer}"), "QmPeerA");
}

#[test]
fn test_peer_identity_rejects_invalid() {
    assert!("".parse::<PeerIdentity>().is_err(), "empty identity");
    assert!("peer a".parse::<PeerIdentity>().is_err(), "inner space");
}

#[test]
fn test_peer_identity_deserialize_list() {
    let peers: Vec<PeerIdentity> = serde_json::from_str(r#"["peerA", "peerB"]"#).unwrap();
    let expected: Vec<PeerIdentity> = vec!["peerA".parse().unwrap(), "peerB".parse().unwrap()];
    assert_eq!(peers, expected);
}
