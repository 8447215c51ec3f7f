//! The closed set of named authentication modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named canonical security-policy shape.
///
/// Each mode corresponds to exactly one template graph, constructible from
/// the mode name alone plus a key-type parameter for token-based modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthenticationMode {
    AnonymousForCertificate,
    AnonymousForSslNegotiated,
    CertificateOverTransport,
    IssuedToken,
    IssuedTokenForCertificate,
    IssuedTokenForSslNegotiated,
    IssuedTokenOverTransport,
    Kerberos,
    KerberosOverTransport,
    MutualCertificate,
    MutualCertificateDuplex,
    MutualSslNegotiated,
    SecureConversation,
    SspiNegotiated,
    SspiNegotiatedOverTransport,
    UserNameForCertificate,
    UserNameForSslNegotiated,
    UserNameOverTransport,
}

impl AuthenticationMode {
    /// All modes, in the fixed matching order.
    pub const ALL: [AuthenticationMode; 18] = [
        AuthenticationMode::AnonymousForCertificate,
        AuthenticationMode::AnonymousForSslNegotiated,
        AuthenticationMode::CertificateOverTransport,
        AuthenticationMode::IssuedToken,
        AuthenticationMode::IssuedTokenForCertificate,
        AuthenticationMode::IssuedTokenForSslNegotiated,
        AuthenticationMode::IssuedTokenOverTransport,
        AuthenticationMode::Kerberos,
        AuthenticationMode::KerberosOverTransport,
        AuthenticationMode::MutualCertificate,
        AuthenticationMode::MutualCertificateDuplex,
        AuthenticationMode::MutualSslNegotiated,
        AuthenticationMode::SecureConversation,
        AuthenticationMode::SspiNegotiated,
        AuthenticationMode::SspiNegotiatedOverTransport,
        AuthenticationMode::UserNameForCertificate,
        AuthenticationMode::UserNameForSslNegotiated,
        AuthenticationMode::UserNameOverTransport,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AuthenticationMode::AnonymousForCertificate => "anonymous_for_certificate",
            AuthenticationMode::AnonymousForSslNegotiated => "anonymous_for_ssl_negotiated",
            AuthenticationMode::CertificateOverTransport => "certificate_over_transport",
            AuthenticationMode::IssuedToken => "issued_token",
            AuthenticationMode::IssuedTokenForCertificate => "issued_token_for_certificate",
            AuthenticationMode::IssuedTokenForSslNegotiated => "issued_token_for_ssl_negotiated",
            AuthenticationMode::IssuedTokenOverTransport => "issued_token_over_transport",
            AuthenticationMode::Kerberos => "kerberos",
            AuthenticationMode::KerberosOverTransport => "kerberos_over_transport",
            AuthenticationMode::MutualCertificate => "mutual_certificate",
            AuthenticationMode::MutualCertificateDuplex => "mutual_certificate_duplex",
            AuthenticationMode::MutualSslNegotiated => "mutual_ssl_negotiated",
            AuthenticationMode::SecureConversation => "secure_conversation",
            AuthenticationMode::SspiNegotiated => "sspi_negotiated",
            AuthenticationMode::SspiNegotiatedOverTransport => "sspi_negotiated_over_transport",
            AuthenticationMode::UserNameForCertificate => "user_name_for_certificate",
            AuthenticationMode::UserNameForSslNegotiated => "user_name_for_ssl_negotiated",
            AuthenticationMode::UserNameOverTransport => "user_name_over_transport",
        }
    }
}

impl fmt::Display for AuthenticationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AuthenticationMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| format!("unknown authentication mode: {s}"))
    }
}
