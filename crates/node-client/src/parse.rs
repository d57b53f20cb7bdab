//! Decoders for the daemon's line-oriented command output.

use consortium_primitives::{ContentAddress, ManifestEntry, NetworkAddress};
use serde::{Deserialize, Serialize};

/// Column layout of a directory listing line.
///
/// Both layouts carry three whitespace-separated tokens per entry, with the
/// entry size in the middle column.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListingLayout {
    /// `<name> <size> <address>`
    #[default]
    NameFirst,
    /// `<address> <size> <name>`, as printed by `ipfs ls`.
    AddressFirst,
}

/// Addresses reported by a routing lookup. The first line is a header.
#[must_use]
pub fn parse_peer_addresses(output: &str) -> Vec<NetworkAddress> {
    output
        .lines()
        .skip(1)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(NetworkAddress::new)
        .collect()
}

/// Entries of a directory listing. Lines with fewer than three tokens are
/// not entries and are dropped.
#[must_use]
pub fn parse_directory_listing(output: &str, layout: ListingLayout) -> Vec<ManifestEntry> {
    output
        .lines()
        .filter_map(|line| {
            let mut tokens = line.split_whitespace();
            let first = tokens.next()?;
            let third = tokens.nth(1)?;

            let (name, address) = match layout {
                ListingLayout::NameFirst => (first, third),
                ListingLayout::AddressFirst => (third, first),
            };

            Some(ManifestEntry::new(address.parse().ok()?, name))
        })
        .collect()
}

/// Pinned addresses, one per line, address in the first column.
#[must_use]
pub fn parse_pinned(output: &str) -> Vec<ContentAddress> {
    output
        .lines()
        .filter_map(|line| line.split_whitespace().next()?.parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_peer_addresses_skips_header() {
        let output = "QmPeerA\n/ip4/1.2.3.4/tcp/4001\n\n  /ip6/::1/tcp/4001  \n";

        assert_eq!(
            parse_peer_addresses(output),
            vec![
                NetworkAddress::new("/ip4/1.2.3.4/tcp/4001"),
                NetworkAddress::new("/ip6/::1/tcp/4001"),
            ]
        );
    }

    #[test]
    fn test_parse_peer_addresses_header_only() {
        assert!(parse_peer_addresses("QmPeerA").is_empty(), "only a header");
        assert!(parse_peer_addresses("").is_empty(), "no output");
    }

    #[test]
    fn test_parse_directory_listing_name_first() {
        let output = "manifest.json 120 QmManifest\nreadme.txt 44 QmReadme\n";
        let entries = parse_directory_listing(output, ListingLayout::NameFirst);

        assert_eq!(
            entries,
            vec![
                ManifestEntry::new("QmManifest".parse().unwrap(), "manifest.json"),
                ManifestEntry::new("QmReadme".parse().unwrap(), "readme.txt"),
            ]
        );
    }

    #[test]
    fn test_parse_directory_listing_address_first() {
        let output = "QmManifest 120 manifest.json\n";
        let entries = parse_directory_listing(output, ListingLayout::AddressFirst);

        assert_eq!(
            entries,
            vec![ManifestEntry::new(
                "QmManifest".parse().unwrap(),
                "manifest.json"
            )]
        );
    }

    #[test]
    fn test_parse_directory_listing_ignores_short_lines() {
        let output = "\nmanifest.json 120\n  \nok.json 1 QmOk extra\n";
        let entries = parse_directory_listing(output, ListingLayout::NameFirst);

        assert_eq!(
            entries,
            vec![ManifestEntry::new("QmOk".parse().unwrap(), "ok.json")]
        );
    }

    #[test]
    fn test_parse_pinned_takes_first_token() {
        let output = "QmA recursive\nQmB indirect\n\nQmC\n";

        let expected: Vec<ContentAddress> = vec![
            "QmA".parse().unwrap(),
            "QmB".parse().unwrap(),
            "QmC".parse().unwrap(),
        ];
        assert_eq!(parse_pinned(output), expected);
    }

    #[test]
    fn test_listing_layout_serde() {
        let layout: ListingLayout = serde_json::from_str(r#""address-first""#).unwrap();
        assert_eq!(layout, ListingLayout::AddressFirst);
        assert_eq!(ListingLayout::default(), ListingLayout::NameFirst);
    }
}
