//! Canonical template graphs, one per authentication mode.
//!
//! Each template reproduces the graph the corresponding factory would
//! construct, so a candidate graph structurally equal to a template is
//! known to have come from that mode. Building a template can legitimately
//! fail for a given mode (unsupported key-type combination, missing
//! bootstrap); such modes are simply absent from the candidate set.

use crate::graph::{AlgorithmSuite, SecurityPolicyGraph};
use crate::modes::AuthenticationMode;
use crate::token::{ClauseStyle, InclusionMode, IssuedKeyType, TokenParameters};
use crate::version::{MessageSecurityVersion, SecurityVersion};

/// Context biasing template construction so like is compared with like.
#[derive(Debug, Clone)]
pub struct TemplateContext<'a> {
    /// Key type implied by the candidate graph's issued-token slots.
    pub key_type: IssuedKeyType,
    /// Bootstrap graph for secure-conversation templates, taken from the
    /// candidate's own secure-conversation token when present.
    pub bootstrap: Option<&'a SecurityPolicyGraph>,
    /// Version stamped on every template, so version comparison reflects
    /// the declared configuration rather than per-factory defaults.
    pub version: MessageSecurityVersion,
}

impl<'a> TemplateContext<'a> {
    pub fn new(key_type: IssuedKeyType) -> Self {
        Self {
            key_type,
            bootstrap: None,
            version: MessageSecurityVersion::default(),
        }
    }

    pub fn with_bootstrap(mut self, bootstrap: &'a SecurityPolicyGraph) -> Self {
        self.bootstrap = Some(bootstrap);
        self
    }

    pub fn with_version(mut self, version: MessageSecurityVersion) -> Self {
        self.version = version;
        self
    }
}

/// Build the canonical graph for one authentication mode.
///
/// Returns `None` when the mode is structurally inapplicable under `ctx`
/// (never an error).
pub fn build_template(
    mode: AuthenticationMode,
    ctx: &TemplateContext<'_>,
) -> Option<SecurityPolicyGraph> {
    let graph = match mode {
        AuthenticationMode::AnonymousForCertificate => SecurityPolicyGraph::symmetric(
            TokenParameters::x509(ClauseStyle::Thumbprint, InclusionMode::Never),
        )
        .with_signature_confirmation(true),

        AuthenticationMode::AnonymousForSslNegotiated => {
            SecurityPolicyGraph::symmetric(TokenParameters::ssl(false, true))
        }

        AuthenticationMode::CertificateOverTransport => {
            let clause_style = match ctx.version.security() {
                SecurityVersion::WsSecurity10 => ClauseStyle::Any,
                SecurityVersion::WsSecurity11 => ClauseStyle::Thumbprint,
            };
            let mut graph = SecurityPolicyGraph::transport();
            graph.endpoint_supporting.endorsing.push(
                TokenParameters::x509(clause_style, InclusionMode::AlwaysToRecipient)
                    .without_derived_keys(),
            );
            graph
        }

        AuthenticationMode::IssuedToken => {
            // The issued-token mode requires a symmetric issued key.
            if ctx.key_type != IssuedKeyType::Symmetric {
                return None;
            }
            SecurityPolicyGraph::symmetric(TokenParameters::issued(IssuedKeyType::Symmetric))
        }

        AuthenticationMode::IssuedTokenForCertificate => with_issued_supporting(
            SecurityPolicyGraph::symmetric(TokenParameters::x509(
                ClauseStyle::Thumbprint,
                InclusionMode::Never,
            ))
            .with_signature_confirmation(true),
            ctx.key_type,
            IssuedPlacement::SignedEncrypted,
        ),

        AuthenticationMode::IssuedTokenForSslNegotiated => with_issued_supporting(
            SecurityPolicyGraph::symmetric(TokenParameters::ssl(false, true))
                .with_signature_confirmation(true),
            ctx.key_type,
            IssuedPlacement::SignedEncrypted,
        ),

        AuthenticationMode::IssuedTokenOverTransport => {
            let graph = with_issued_supporting(
                SecurityPolicyGraph::transport(),
                ctx.key_type,
                IssuedPlacement::Signed,
            );
            // transport bindings never derive from the issued token
            strip_supporting_derived_keys(graph)
        }

        AuthenticationMode::Kerberos => {
            SecurityPolicyGraph::symmetric(TokenParameters::kerberos())
                .with_algorithm_suite(AlgorithmSuite::KERBEROS_DEFAULT)
        }

        AuthenticationMode::KerberosOverTransport => {
            let mut graph =
                SecurityPolicyGraph::transport().with_algorithm_suite(AlgorithmSuite::KERBEROS_DEFAULT);
            graph
                .endpoint_supporting
                .endorsing
                .push(TokenParameters::kerberos().without_derived_keys());
            graph
        }

        AuthenticationMode::MutualCertificate => match ctx.version.security() {
            SecurityVersion::WsSecurity10 => SecurityPolicyGraph::asymmetric(
                TokenParameters::x509(ClauseStyle::Any, InclusionMode::AlwaysToRecipient)
                    .without_derived_keys(),
                TokenParameters::x509(ClauseStyle::Any, InclusionMode::Never)
                    .without_derived_keys(),
            ),
            SecurityVersion::WsSecurity11 => {
                let mut graph = SecurityPolicyGraph::symmetric(TokenParameters::x509(
                    ClauseStyle::Thumbprint,
                    InclusionMode::Never,
                ))
                .with_signature_confirmation(true);
                graph.endpoint_supporting.endorsing.push(
                    TokenParameters::x509(ClauseStyle::Thumbprint, InclusionMode::AlwaysToRecipient)
                        .without_derived_keys(),
                );
                graph
            }
        },

        AuthenticationMode::MutualCertificateDuplex => {
            let clause_style = match ctx.version.security() {
                SecurityVersion::WsSecurity10 => ClauseStyle::Any,
                SecurityVersion::WsSecurity11 => ClauseStyle::Thumbprint,
            };
            SecurityPolicyGraph::asymmetric(
                TokenParameters::x509(clause_style, InclusionMode::AlwaysToRecipient)
                    .without_derived_keys(),
                TokenParameters::x509(clause_style, InclusionMode::AlwaysToInitiator)
                    .without_derived_keys(),
            )
        }

        AuthenticationMode::MutualSslNegotiated => {
            SecurityPolicyGraph::symmetric(TokenParameters::ssl(true, true))
        }

        AuthenticationMode::SecureConversation => {
            let bootstrap = ctx.bootstrap?;
            match bootstrap.shape {
                crate::graph::GraphShape::Transport => {
                    let mut graph = SecurityPolicyGraph::transport();
                    graph.endpoint_supporting.endorsing.push(
                        TokenParameters::secure_conversation(bootstrap.clone(), true)
                            .without_derived_keys(),
                    );
                    graph
                }
                _ => SecurityPolicyGraph::symmetric(TokenParameters::secure_conversation(
                    bootstrap.clone(),
                    true,
                )),
            }
        }

        AuthenticationMode::SspiNegotiated => {
            SecurityPolicyGraph::symmetric(TokenParameters::sspi(true))
        }

        AuthenticationMode::SspiNegotiatedOverTransport => {
            let mut graph = SecurityPolicyGraph::transport();
            graph
                .endpoint_supporting
                .endorsing
                .push(TokenParameters::sspi(true).without_derived_keys());
            graph
        }

        AuthenticationMode::UserNameForCertificate => {
            let mut graph = SecurityPolicyGraph::symmetric(TokenParameters::x509(
                ClauseStyle::Thumbprint,
                InclusionMode::Never,
            ));
            graph
                .endpoint_supporting
                .signed_encrypted
                .push(TokenParameters::user_name());
            graph
        }

        AuthenticationMode::UserNameForSslNegotiated => {
            let mut graph = SecurityPolicyGraph::symmetric(TokenParameters::ssl(false, true));
            graph
                .endpoint_supporting
                .signed_encrypted
                .push(TokenParameters::user_name());
            graph
        }

        AuthenticationMode::UserNameOverTransport => {
            let mut graph = SecurityPolicyGraph::transport();
            graph
                .endpoint_supporting
                .signed_encrypted
                .push(TokenParameters::user_name());
            graph
        }
    };

    Some(graph.with_version(ctx.version))
}

/// Where a bearer-key issued token lands for the message-security modes
/// (`SignedEncrypted`) versus the transport mode (`Signed`).
enum IssuedPlacement {
    SignedEncrypted,
    Signed,
}

fn with_issued_supporting(
    mut graph: SecurityPolicyGraph,
    key_type: IssuedKeyType,
    bearer_placement: IssuedPlacement,
) -> SecurityPolicyGraph {
    let issued = TokenParameters::issued(key_type);
    match key_type {
        IssuedKeyType::Bearer => match bearer_placement {
            IssuedPlacement::SignedEncrypted => {
                graph.endpoint_supporting.signed_encrypted.push(issued)
            }
            IssuedPlacement::Signed => graph.endpoint_supporting.signed.push(issued),
        },
        IssuedKeyType::Symmetric | IssuedKeyType::Asymmetric => {
            graph.endpoint_supporting.endorsing.push(issued)
        }
    }
    graph
}

fn strip_supporting_derived_keys(mut graph: SecurityPolicyGraph) -> SecurityPolicyGraph {
    for token in graph
        .endpoint_supporting
        .endorsing
        .iter_mut()
        .chain(graph.endpoint_supporting.signed.iter_mut())
    {
        token.require_derived_keys = false;
    }
    graph
}
