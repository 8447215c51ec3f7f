//! Message security version aggregates.

use serde::{Deserialize, Serialize};

/// WS-Security specification version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecurityVersion {
    WsSecurity10,
    WsSecurity11,
}

/// WS-Trust specification version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrustVersion {
    WsTrustFeb2005,
    WsTrust13,
}

/// WS-SecureConversation specification version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecureConversationVersion {
    Feb2005,
    V13,
}

/// WS-SecurityPolicy specification version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyVersion {
    Policy11,
    Policy12,
}

/// A named aggregate of the four version sub-components.
///
/// The named profiles carry their own identity: two versions are exactly
/// equal only when they are the same profile, while the relaxed comparison
/// looks at the four sub-components and tolerates a differently-named
/// aggregate with identical parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageSecurityVersion {
    /// WS-Security 1.0 with the February 2005 trust/conversation profiles.
    Wss10TrustFeb2005,
    /// WS-Security 1.1 with the February 2005 trust/conversation profiles.
    /// The default for message-security bindings.
    Wss11TrustFeb2005,
    /// WS-Security 1.1 with WS-Trust 1.3, used by bearer-key issued tokens.
    Wss11Trust13,
    /// An unnamed aggregate assembled from explicit sub-components.
    Custom {
        security: SecurityVersion,
        trust: TrustVersion,
        secure_conversation: SecureConversationVersion,
        policy: PolicyVersion,
    },
}

impl MessageSecurityVersion {
    /// The four sub-components of this aggregate.
    pub fn components(
        &self,
    ) -> (
        SecurityVersion,
        TrustVersion,
        SecureConversationVersion,
        PolicyVersion,
    ) {
        match self {
            MessageSecurityVersion::Wss10TrustFeb2005 => (
                SecurityVersion::WsSecurity10,
                TrustVersion::WsTrustFeb2005,
                SecureConversationVersion::Feb2005,
                PolicyVersion::Policy11,
            ),
            MessageSecurityVersion::Wss11TrustFeb2005 => (
                SecurityVersion::WsSecurity11,
                TrustVersion::WsTrustFeb2005,
                SecureConversationVersion::Feb2005,
                PolicyVersion::Policy11,
            ),
            MessageSecurityVersion::Wss11Trust13 => (
                SecurityVersion::WsSecurity11,
                TrustVersion::WsTrust13,
                SecureConversationVersion::V13,
                PolicyVersion::Policy12,
            ),
            MessageSecurityVersion::Custom {
                security,
                trust,
                secure_conversation,
                policy,
            } => (*security, *trust, *secure_conversation, *policy),
        }
    }

    pub fn security(&self) -> SecurityVersion {
        self.components().0
    }

    /// Compare two version aggregates.
    ///
    /// With `exact` the aggregate identity must match. Without it the four
    /// sub-components are compared individually, tolerating differences in
    /// the aggregate object identity.
    pub fn matches(&self, other: &MessageSecurityVersion, exact: bool) -> bool {
        if exact {
            self == other
        } else {
            self.components() == other.components()
        }
    }
}

impl Default for MessageSecurityVersion {
    fn default() -> Self {
        MessageSecurityVersion::Wss11TrustFeb2005
    }
}
