//! Token parameter descriptions.

use serde::{Deserialize, Serialize};

use crate::graph::SecurityPolicyGraph;

/// When a token is included in messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InclusionMode {
    Never,
    AlwaysToRecipient,
    AlwaysToInitiator,
    Once,
}

/// How a token is referenced from the security header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceStyle {
    Internal,
    External,
}

/// Certificate reference clause style.
///
/// Only `Any` and `Thumbprint` can be expressed by the declarative schema;
/// a graph depending on the other styles cannot be re-encoded as a named
/// mode and is preserved verbatim with a diagnostic note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClauseStyle {
    Any,
    Thumbprint,
    IssuerSerial,
    SubjectKeyIdentifier,
}

/// Key type of an issued token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssuedKeyType {
    Bearer,
    Symmetric,
    Asymmetric,
}

/// The concrete parameter type of a token slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TokenKind {
    UserName,
    X509 {
        clause_style: ClauseStyle,
    },
    Kerberos,
    Sspi {
        require_cancellation: bool,
    },
    Ssl {
        require_client_certificate: bool,
        require_cancellation: bool,
    },
    Issued {
        key_type: IssuedKeyType,
    },
    SecureConversation {
        require_cancellation: bool,
        can_renew_session: bool,
        bootstrap: Box<SecurityPolicyGraph>,
    },
}

/// One token parameter slot of a security policy graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenParameters {
    pub kind: TokenKind,
    pub inclusion: InclusionMode,
    pub reference_style: ReferenceStyle,
    pub require_derived_keys: bool,
}

impl TokenParameters {
    /// User-name tokens never carry derived keys.
    pub fn user_name() -> Self {
        Self {
            kind: TokenKind::UserName,
            inclusion: InclusionMode::AlwaysToRecipient,
            reference_style: ReferenceStyle::Internal,
            require_derived_keys: false,
        }
    }

    pub fn x509(clause_style: ClauseStyle, inclusion: InclusionMode) -> Self {
        Self {
            kind: TokenKind::X509 { clause_style },
            inclusion,
            reference_style: ReferenceStyle::Internal,
            require_derived_keys: true,
        }
    }

    pub fn kerberos() -> Self {
        Self {
            kind: TokenKind::Kerberos,
            inclusion: InclusionMode::Once,
            reference_style: ReferenceStyle::Internal,
            require_derived_keys: true,
        }
    }

    pub fn sspi(require_cancellation: bool) -> Self {
        Self {
            kind: TokenKind::Sspi {
                require_cancellation,
            },
            inclusion: InclusionMode::AlwaysToRecipient,
            reference_style: ReferenceStyle::Internal,
            require_derived_keys: true,
        }
    }

    pub fn ssl(require_client_certificate: bool, require_cancellation: bool) -> Self {
        Self {
            kind: TokenKind::Ssl {
                require_client_certificate,
                require_cancellation,
            },
            inclusion: InclusionMode::AlwaysToRecipient,
            reference_style: ReferenceStyle::Internal,
            require_derived_keys: true,
        }
    }

    pub fn issued(key_type: IssuedKeyType) -> Self {
        Self {
            kind: TokenKind::Issued { key_type },
            inclusion: InclusionMode::AlwaysToRecipient,
            reference_style: ReferenceStyle::Internal,
            // Bearer keys cannot derive
            require_derived_keys: key_type != IssuedKeyType::Bearer,
        }
    }

    pub fn secure_conversation(
        bootstrap: SecurityPolicyGraph,
        require_cancellation: bool,
    ) -> Self {
        Self {
            kind: TokenKind::SecureConversation {
                require_cancellation,
                can_renew_session: true,
                bootstrap: Box::new(bootstrap),
            },
            inclusion: InclusionMode::AlwaysToRecipient,
            reference_style: ReferenceStyle::Internal,
            require_derived_keys: true,
        }
    }

    pub fn without_derived_keys(mut self) -> Self {
        self.require_derived_keys = false;
        self
    }

    /// Whether this slot meaningfully carries the derived-keys flag.
    /// User-name and bearer-key tokens have no key to derive from.
    pub fn carries_derived_keys(&self) -> bool {
        !matches!(
            self.kind,
            TokenKind::UserName
                | TokenKind::Issued {
                    key_type: IssuedKeyType::Bearer,
                }
        )
    }

    pub fn is_issued(&self) -> bool {
        matches!(self.kind, TokenKind::Issued { .. })
    }

    pub fn issued_key_type(&self) -> Option<IssuedKeyType> {
        match self.kind {
            TokenKind::Issued { key_type } => Some(key_type),
            _ => None,
        }
    }
}
