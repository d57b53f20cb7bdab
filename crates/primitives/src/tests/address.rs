use super::*;

#[test]
fn test_content_address_parse() {
    let address: ContentAddress = "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG".parse().unwrap();
    assert_eq!(
        address.as_str(),
        "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG"
    );
    assert_eq!(address.to_string(), address.as_str());
}

#[test]
fn test_content_address_rejects_empty_and_whitespace() {
    assert!("".parse::<ContentAddress>().is_err(), "empty address");
    assert!("Qm abc".parse::<ContentAddress>().is_err(), "inner space");
    assert!("Qmabc\n".parse::<ContentAddress>().is_err(), "trailing newline");
}

#[test]
fn test_content_address_equality_is_byte_equality() {
    let a: ContentAddress = "cidX".parse().unwrap();
    let b: ContentAddress = "cidX".parse().unwrap();
    let c: ContentAddress = "cidx".parse().unwrap();

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_content_address_serde() {
    let addresses: Vec<ContentAddress> = serde_json::from_str(r#"["cidX", "cidY"]"#).unwrap();
    assert_eq!(addresses.len(), 2);
    assert_eq!(addresses[1].as_str(), "cidY");

    let json = serde_json::to_string(&addresses).unwrap();
    assert_eq!(json, r#"["cidX","cidY"]"#);

    assert!(
        serde_json::from_str::<Vec<ContentAddress>>(r#"["cid X"]"#).is_err(),
        "whitespace must be rejected during deserialization"
    );
    assert!(
        serde_json::from_str::<Vec<ContentAddress>>("[42]").is_err(),
        "non-string elements must be rejected"
    );
}
