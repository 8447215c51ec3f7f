//! Security policy template matching for Service Binder.
//!
//! A constructed security policy graph (token parameters, protection
//! settings, supporting-token collections) is mapped back to the single
//! named authentication mode that produced it, by building one canonical
//! template graph per mode and comparing field by field. Graphs that match
//! no template are retained verbatim as unmapped policies instead of being
//! lossily re-encoded.

pub mod error;
pub mod graph;
pub mod matcher;
pub mod modes;
pub mod templates;
pub mod token;
pub mod version;

pub use error::{Error, Result};
pub use graph::{
    AlgorithmSuite, GraphShape, KeyEntropyMode, MessageProtectionOrder, SecurityHeaderLayout,
    SecurityPolicyGraph, SupportingTokens,
};
pub use matcher::{
    ModeDetection, UnmappedPolicy, detect_mode, graphs_match, infer_issued_key_type,
    reconcile_derived_keys, token_parameters_match,
};
pub use modes::AuthenticationMode;
pub use templates::{TemplateContext, build_template};
pub use token::{
    ClauseStyle, InclusionMode, IssuedKeyType, ReferenceStyle, TokenKind, TokenParameters,
};
pub use version::{
    MessageSecurityVersion, PolicyVersion, SecureConversationVersion, SecurityVersion,
    TrustVersion,
};
