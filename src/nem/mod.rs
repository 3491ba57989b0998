//! NEM collaborator seams: the network constants and the traits behind
//! which the SDK-backed services (checksum validation, wallet decryption,
//! transaction broadcast) live. The crate ships default implementations
//! only for the pieces that need no cryptography.

pub mod address;
pub mod fees;

pub use address::NetworkAddressValidator;
pub use fees::{MessageFeeSchedule, PlainMessageSizer};

/// Placeholder recipient used in preview messages. Per-option poll accounts
/// are generated during submission, so previews stand this address in for
/// every one of them.
pub const MOCK_ADDRESS: &str = "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX";

/// NEM network the wallet is connected to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    /// First character of every address on this network.
    pub fn address_prefix(self) -> char {
        match self {
            Network::Mainnet => 'N',
            Network::Testnet => 'T',
        }
    }

    /// The well-known account that indexes polls on this network.
    pub fn poll_index_address(self) -> &'static str {
        match self {
            Network::Mainnet => "NAZN26HYB7C5HVYVJ4SL3KBTDT773NZBAOMGRFZB",
            Network::Testnet => "TAVGTNCVGALLUPZC4JTLKR2WX25RQM2QOK5BHBKC",
        }
    }
}

/// Scheme under which a wallet account's private key is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletAlgorithm {
    /// Password-derived key (6k-round derivation), the common case.
    PassphraseDerived,
    /// BIP32 child key encrypted with the wallet password.
    Bip32,
    /// Key held on a Trezor device.
    Trezor,
}

/// The wallet account a form acts on behalf of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletAccount {
    pub address: String,
    /// Encrypted private key blob, opaque to this crate.
    pub encrypted_key: String,
    pub iv: String,
}

/// A decrypted account private key. The hex never appears in `Debug`
/// output so it cannot leak through logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey(String);

impl PrivateKey {
    pub fn new(hex: impl Into<String>) -> Self {
        PrivateKey(hex.into())
    }

    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PrivateKey(****)")
    }
}

/// Network-aware address validation. The default implementation is
/// structural; an SDK-backed one adds the checksum.
pub trait AddressValidator: Send + Sync {
    fn is_valid(&self, address: &str) -> bool;
}

/// Wire-encoding-aware message length: what NIS counts against the
/// payload limit, not the number of characters typed.
pub trait MessageSizer: Send + Sync {
    fn byte_length(&self, message: &str) -> usize;
}

/// Maps a message's byte length to its transfer fee in µXEM. Must be
/// monotonic in the length.
pub trait FeeSchedule: Send + Sync {
    fn fee_for(&self, byte_length: usize) -> u64;
}

/// Decrypts a wallet account's private key and derives addresses from it.
/// Both operations belong to the SDK; the forms only cross-check that the
/// resolved key really is the account's.
pub trait CredentialResolver: Send + Sync {
    /// `None` when the password does not decrypt the account.
    fn resolve(
        &self,
        password: &str,
        account: &WalletAccount,
        algorithm: WalletAlgorithm,
    ) -> Option<PrivateKey>;

    fn address_of(&self, key: &PrivateKey, network: Network) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_address_is_address_sized() {
        assert_eq!(MOCK_ADDRESS.len(), 40);
    }

    #[test]
    fn index_addresses_match_their_network_prefix() {
        for network in [Network::Mainnet, Network::Testnet] {
            assert!(
                network
                    .poll_index_address()
                    .starts_with(network.address_prefix())
            );
        }
    }

    #[test]
    fn private_key_debug_is_redacted() {
        let key = PrivateKey::new("00aa11bb");
        assert_eq!(format!("{key:?}"), "PrivateKey(****)");
        assert_eq!(key.as_hex(), "00aa11bb");
    }
}
