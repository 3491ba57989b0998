//! Structural address validation. NEM addresses are 40 base32 characters,
//! the first of which encodes the network. The final checksum depends on
//! keccak and stays behind the [`AddressValidator`] seam for SDK-backed
//! implementations; everything the forms need to catch typos, pasted
//! garbage and wrong-network addresses is covered here.

use super::{AddressValidator, Network};

/// Uppercases an address and strips the display hyphens, the form users
/// paste addresses with (`TA-VGTN-...`).
pub fn normalize(address: &str) -> String {
    address.to_uppercase().replace('-', "")
}

/// Validates addresses against one network.
#[derive(Debug, Clone, Copy)]
pub struct NetworkAddressValidator {
    network: Network,
}

impl NetworkAddressValidator {
    pub fn new(network: Network) -> Self {
        NetworkAddressValidator { network }
    }
}

impl AddressValidator for NetworkAddressValidator {
    fn is_valid(&self, address: &str) -> bool {
        let address = normalize(address);
        address.len() == 40
            && address.starts_with(self.network.address_prefix())
            && address.bytes().all(|b| matches!(b, b'A'..=b'Z' | b'2'..=b'7'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_index_accounts() {
        let mainnet = NetworkAddressValidator::new(Network::Mainnet);
        let testnet = NetworkAddressValidator::new(Network::Testnet);
        assert!(mainnet.is_valid(Network::Mainnet.poll_index_address()));
        assert!(testnet.is_valid(Network::Testnet.poll_index_address()));
    }

    #[test]
    fn rejects_addresses_from_the_other_network() {
        let mainnet = NetworkAddressValidator::new(Network::Mainnet);
        assert!(!mainnet.is_valid(Network::Testnet.poll_index_address()));
    }

    #[test]
    fn normalizes_hyphens_and_case() {
        let testnet = NetworkAddressValidator::new(Network::Testnet);
        assert!(testnet.is_valid("ta-vgtn-cvga-llup-zc4j-tlkr-2wx2-5rqm-2qok-5bhb-kc"));
    }

    #[test]
    fn rejects_wrong_length_and_charset() {
        let testnet = NetworkAddressValidator::new(Network::Testnet);
        assert!(!testnet.is_valid(""));
        assert!(!testnet.is_valid("TAVGTNCVGALLUPZC4JTLKR2WX25RQM2QOK5BHBK"));
        assert!(!testnet.is_valid("TAVGTNCVGALLUPZC4JTLKR2WX25RQM2QOK5BHB1C"));
    }
}
