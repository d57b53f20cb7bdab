use super::*;

fn class(address: &str) -> AddressClass {
    NetworkAddress::new(address).classify()
}

#[test]
fn test_public_ipv4_is_usable() {
    assert_eq!(class("/ip4/104.131.131.82/tcp/4001"), AddressClass::Usable);
    assert_eq!(class("/ip4/192.168.1.20/udp/4001/quic"), AddressClass::Usable);
    assert!(class("/ip4/8.8.8.8/tcp/4001").is_usable(), "public address");
}

#[test]
fn test_loopback_is_filtered() {
    assert_eq!(class("/ip4/127.0.0.1/tcp/4001"), AddressClass::Loopback);
    assert_eq!(class("/ip4/127.3.2.1/tcp/4001"), AddressClass::Loopback);
    // the textual marker wins even when the address is otherwise unparseable
    assert_eq!(class("garbage-127.0.0.1"), AddressClass::Loopback);
}

#[test]
fn test_private_range_is_filtered() {
    assert_eq!(class("/ip4/10.0.0.5/tcp/4001"), AddressClass::PrivateRange);
    assert_eq!(class("/ip4/10.200.3.4/tcp/4001"), AddressClass::PrivateRange);
    assert_eq!(class("/ip4/110.0.0.5/tcp/4001"), AddressClass::Usable);
}

#[test]
fn test_non_ipv4_is_filtered() {
    assert_eq!(class("/ip6/::1/tcp/4001"), AddressClass::NotIpv4);
    assert_eq!(class("/ip6/2604:a880:1:20::203:d001/tcp/4001"), AddressClass::NotIpv4);
    assert_eq!(class("/dns4/bootstrap.example.org/tcp/4001"), AddressClass::NotIpv4);
    assert_eq!(class("not an address"), AddressClass::Unparseable);
    assert!(!class("").is_usable(), "empty address");
}

#[test]
fn test_unknown_trailing_protocols_keep_ipv4_rules() {
    assert_eq!(class("/ip4/45.67.89.10/tcp/4001/http-path/foo"), AddressClass::Usable);
    assert_eq!(class("/ip4/10.4.5.6/tcp/4001/http-path/foo"), AddressClass::PrivateRange);
    assert_eq!(class("/ip4/127.8.8.8/tcp/4001/http-path/foo"), AddressClass::Loopback);
    assert_eq!(class("/ip6/2604:a880::1/tcp/4001/http-path/foo"), AddressClass::NotIpv4);
    assert_eq!(class("/ip4/300.1.1.1/tcp/4001/http-path/foo"), AddressClass::Unparseable);
    assert_eq!(class("/ip4"), AddressClass::Unparseable);
}

#[test]
fn test_only_usable_addresses_pass() {
    let candidates = [
        "/ip4/127.0.0.1/tcp/4001",
        "/ip4/10.1.1.1/tcp/4001",
        "/ip6/::1/tcp/4001",
        "/ip4/45.67.89.10/tcp/4001",
        "nonsense",
    ];

    let usable: Vec<_> = candidates
        .iter()
        .map(|c| NetworkAddress::new(*c))
        .filter(|a| a.classify().is_usable())
        .collect();

    assert_eq!(usable, vec![NetworkAddress::new("/ip4/45.67.89.10/tcp/4001")]);
}

#[test]
fn test_dial_target() {
    let peer: PeerIdentity = "QmPeerA".parse().unwrap();

    assert_eq!(
        NetworkAddress::new("/ip4/45.67.89.10/tcp/4001").dial_target(&peer),
        "/ip4/45.67.89.10/tcp/4001/ipfs/QmPeerA"
    );
    assert_eq!(
        NetworkAddress::new(" /ip4/45.67.89.10/tcp/4001/ ").dial_target(&peer),
        "/ip4/45.67.89.10/tcp/4001/ipfs/QmPeerA"
    );
}
