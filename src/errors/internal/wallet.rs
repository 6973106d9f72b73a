use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Wallet {wallet_address} is already linked to another identity")]
    AlreadyLinked { wallet_address: String },

    /// No active principal with this identity number, or it already has a wallet
    #[error("No linkable identity for {identity_no}")]
    IdentityNotLinkable { identity_no: String },

    #[error("No active identity for {identity_no}")]
    IdentityNotFound { identity_no: String },

    #[error("No identity linked to wallet {wallet_address}")]
    WalletNotFound { wallet_address: String },

    #[error("Principal {principal_id} has no linked wallet")]
    NoWalletLinked { principal_id: String },
}
