//! Security policy graphs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::token::TokenParameters;
use crate::version::MessageSecurityVersion;

/// Cryptographic algorithm suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlgorithmSuite {
    Basic128,
    Basic192,
    Basic256,
    Basic128Sha256,
    Basic192Sha256,
    Basic256Sha256,
    TripleDes,
    TripleDesSha256,
}

impl AlgorithmSuite {
    /// Suite used by Kerberos-protected bindings.
    pub const KERBEROS_DEFAULT: AlgorithmSuite = AlgorithmSuite::Basic128;
}

impl Default for AlgorithmSuite {
    fn default() -> Self {
        AlgorithmSuite::Basic256
    }
}

/// Layout of the security header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecurityHeaderLayout {
    Strict,
    Lax,
    LaxTimestampFirst,
    LaxTimestampLast,
}

impl Default for SecurityHeaderLayout {
    fn default() -> Self {
        SecurityHeaderLayout::Strict
    }
}

/// Who contributes key entropy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEntropyMode {
    ClientEntropy,
    ServerEntropy,
    CombinedEntropy,
}

impl Default for KeyEntropyMode {
    fn default() -> Self {
        KeyEntropyMode::CombinedEntropy
    }
}

/// Order of signing relative to encryption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageProtectionOrder {
    SignBeforeEncrypt,
    SignBeforeEncryptAndEncryptSignature,
    EncryptBeforeSign,
}

impl Default for MessageProtectionOrder {
    fn default() -> Self {
        MessageProtectionOrder::SignBeforeEncryptAndEncryptSignature
    }
}

/// The four supporting-token roles of one level (endpoint or operation).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportingTokens {
    pub endorsing: Vec<TokenParameters>,
    pub signed: Vec<TokenParameters>,
    pub signed_encrypted: Vec<TokenParameters>,
    pub signed_endorsing: Vec<TokenParameters>,
}

impl SupportingTokens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.endorsing.is_empty()
            && self.signed.is_empty()
            && self.signed_encrypted.is_empty()
            && self.signed_endorsing.is_empty()
    }
}

/// Concrete shape of a policy graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GraphShape {
    /// Security is delegated to the transport; tokens ride as supporting
    /// parameters only.
    Transport,
    /// One protection token secures both directions.
    Symmetric {
        protection: TokenParameters,
        protection_order: MessageProtectionOrder,
        require_signature_confirmation: bool,
    },
    /// Distinct initiator and recipient tokens.
    Asymmetric {
        initiator: TokenParameters,
        recipient: TokenParameters,
        protection_order: MessageProtectionOrder,
        require_signature_confirmation: bool,
    },
}

/// In-memory structural representation of a constructed security binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityPolicyGraph {
    pub shape: GraphShape,
    pub algorithm_suite: AlgorithmSuite,
    pub layout: SecurityHeaderLayout,
    pub include_timestamp: bool,
    pub key_entropy: KeyEntropyMode,
    pub version: MessageSecurityVersion,
    pub allow_insecure_transport: bool,
    /// Supporting tokens applying to every operation.
    pub endpoint_supporting: SupportingTokens,
    /// Per-operation supporting-token overrides, keyed by request action.
    pub operation_supporting: BTreeMap<String, SupportingTokens>,
}

impl SecurityPolicyGraph {
    fn with_shape(shape: GraphShape) -> Self {
        Self {
            shape,
            algorithm_suite: AlgorithmSuite::default(),
            layout: SecurityHeaderLayout::default(),
            include_timestamp: true,
            key_entropy: KeyEntropyMode::default(),
            version: MessageSecurityVersion::default(),
            allow_insecure_transport: false,
            endpoint_supporting: SupportingTokens::new(),
            operation_supporting: BTreeMap::new(),
        }
    }

    /// A transport-security graph with no message protection.
    pub fn transport() -> Self {
        Self::with_shape(GraphShape::Transport)
    }

    /// A symmetric graph protected by one token.
    pub fn symmetric(protection: TokenParameters) -> Self {
        Self::with_shape(GraphShape::Symmetric {
            protection,
            protection_order: MessageProtectionOrder::default(),
            require_signature_confirmation: false,
        })
    }

    /// An asymmetric graph with initiator and recipient tokens.
    pub fn asymmetric(initiator: TokenParameters, recipient: TokenParameters) -> Self {
        Self::with_shape(GraphShape::Asymmetric {
            initiator,
            recipient,
            protection_order: MessageProtectionOrder::default(),
            require_signature_confirmation: false,
        })
    }

    /// Set signature confirmation on symmetric and asymmetric shapes.
    pub fn with_signature_confirmation(mut self, value: bool) -> Self {
        match &mut self.shape {
            GraphShape::Symmetric {
                require_signature_confirmation,
                ..
            }
            | GraphShape::Asymmetric {
                require_signature_confirmation,
                ..
            } => *require_signature_confirmation = value,
            GraphShape::Transport => {}
        }
        self
    }

    pub fn with_version(mut self, version: MessageSecurityVersion) -> Self {
        self.version = version;
        self
    }

    pub fn with_algorithm_suite(mut self, suite: AlgorithmSuite) -> Self {
        self.algorithm_suite = suite;
        self
    }

    /// The symmetric protection token, if this graph has one.
    pub fn protection_token(&self) -> Option<&TokenParameters> {
        match &self.shape {
            GraphShape::Symmetric { protection, .. } => Some(protection),
            _ => None,
        }
    }

    /// Whether any per-operation supporting-token override exists.
    pub fn has_operation_overrides(&self) -> bool {
        !self.operation_supporting.is_empty()
    }
}
