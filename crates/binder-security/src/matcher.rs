//! Structural matching of policy graphs against mode templates.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::graph::{GraphShape, SecurityPolicyGraph, SupportingTokens};
use crate::modes::AuthenticationMode;
use crate::templates::{TemplateContext, build_template};
use crate::token::{ClauseStyle, IssuedKeyType, TokenKind, TokenParameters};

/// Outcome of mapping a graph back to its declarative form.
#[derive(Debug, Clone, PartialEq)]
pub enum ModeDetection {
    /// The graph is structurally identical to one mode's template.
    Named(AuthenticationMode),
    /// No template matched; the graph is kept verbatim.
    Unmapped(UnmappedPolicy),
}

impl ModeDetection {
    pub fn mode(&self) -> Option<AuthenticationMode> {
        match self {
            ModeDetection::Named(mode) => Some(*mode),
            ModeDetection::Unmapped(_) => None,
        }
    }
}

/// A graph that no named mode can express, retained as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct UnmappedPolicy {
    pub graph: SecurityPolicyGraph,
    /// Human-readable hint at why no mode matched.
    pub note: String,
}

/// Compare two token parameter slots field by field.
///
/// `skip_derived_keys` excludes the derived-keys flag from the comparison;
/// it is used for protection-level tokens whose flag has already been
/// reconciled across the whole graph.
pub fn token_parameters_match(
    a: &TokenParameters,
    b: &TokenParameters,
    skip_derived_keys: bool,
    exact_version: bool,
) -> bool {
    if a.inclusion != b.inclusion || a.reference_style != b.reference_style {
        return false;
    }
    if !skip_derived_keys && a.require_derived_keys != b.require_derived_keys {
        return false;
    }
    match (&a.kind, &b.kind) {
        (TokenKind::UserName, TokenKind::UserName) => true,
        (TokenKind::Kerberos, TokenKind::Kerberos) => true,
        (
            TokenKind::X509 { clause_style: ca },
            TokenKind::X509 { clause_style: cb },
        ) => ca == cb,
        (
            TokenKind::Sspi {
                require_cancellation: ra,
            },
            TokenKind::Sspi {
                require_cancellation: rb,
            },
        ) => ra == rb,
        (
            TokenKind::Ssl {
                require_client_certificate: cca,
                require_cancellation: ra,
            },
            TokenKind::Ssl {
                require_client_certificate: ccb,
                require_cancellation: rb,
            },
        ) => cca == ccb && ra == rb,
        (
            TokenKind::Issued { key_type: ka },
            TokenKind::Issued { key_type: kb },
        ) => ka == kb,
        (
            TokenKind::SecureConversation {
                require_cancellation: ra,
                can_renew_session: cra,
                bootstrap: ba,
            },
            TokenKind::SecureConversation {
                require_cancellation: rb,
                can_renew_session: crb,
                bootstrap: bb,
            },
        ) => ra == rb && cra == crb && graphs_match(ba, bb, exact_version),
        _ => false,
    }
}

fn supporting_tokens_match(a: &SupportingTokens, b: &SupportingTokens, exact_version: bool) -> bool {
    let roles = [
        (&a.endorsing, &b.endorsing),
        (&a.signed, &b.signed),
        (&a.signed_encrypted, &b.signed_encrypted),
        (&a.signed_endorsing, &b.signed_endorsing),
    ];
    roles.into_iter().all(|(ta, tb)| {
        ta.len() == tb.len()
            && ta
                .iter()
                .zip(tb.iter())
                .all(|(x, y)| token_parameters_match(x, y, false, exact_version))
    })
}

/// Deep structural comparison of two policy graphs.
///
/// `exact_version` requires identical version aggregates; otherwise the
/// four version sub-components are compared individually.
pub fn graphs_match(a: &SecurityPolicyGraph, b: &SecurityPolicyGraph, exact_version: bool) -> bool {
    let shapes_match = match (&a.shape, &b.shape) {
        (GraphShape::Transport, GraphShape::Transport) => true,
        (
            GraphShape::Symmetric {
                protection: pa,
                protection_order: oa,
                require_signature_confirmation: sa,
            },
            GraphShape::Symmetric {
                protection: pb,
                protection_order: ob,
                require_signature_confirmation: sb,
            },
        ) => oa == ob && sa == sb && token_parameters_match(pa, pb, true, exact_version),
        (
            GraphShape::Asymmetric {
                initiator: ia,
                recipient: ra,
                protection_order: oa,
                require_signature_confirmation: sa,
            },
            GraphShape::Asymmetric {
                initiator: ib,
                recipient: rb,
                protection_order: ob,
                require_signature_confirmation: sb,
            },
        ) => {
            oa == ob
                && sa == sb
                && token_parameters_match(ia, ib, true, exact_version)
                && token_parameters_match(ra, rb, true, exact_version)
        }
        _ => false,
    };
    if !shapes_match {
        return false;
    }

    a.algorithm_suite == b.algorithm_suite
        && a.layout == b.layout
        && a.include_timestamp == b.include_timestamp
        && a.key_entropy == b.key_entropy
        && a.allow_insecure_transport == b.allow_insecure_transport
        && a.version.matches(&b.version, exact_version)
        && supporting_tokens_match(&a.endpoint_supporting, &b.endpoint_supporting, exact_version)
        && a.operation_supporting.len() == b.operation_supporting.len()
        && a.operation_supporting.iter().all(|(action, ta)| {
            b.operation_supporting
                .get(action)
                .is_some_and(|tb| supporting_tokens_match(ta, tb, exact_version))
        })
}

/// Infer the issued-token key type a template should be built with.
///
/// Supporting-token slots are inspected endorsing first, then signed, then
/// signed-encrypted; the first issued token found decides. A graph with no
/// issued token defaults to symmetric keys.
pub fn infer_issued_key_type(graph: &SecurityPolicyGraph) -> IssuedKeyType {
    let supporting = &graph.endpoint_supporting;
    supporting
        .endorsing
        .iter()
        .chain(supporting.signed.iter())
        .chain(supporting.signed_encrypted.iter())
        .find_map(TokenParameters::issued_key_type)
        .unwrap_or(IssuedKeyType::Symmetric)
}

/// Reconcile the derived-keys flags of a graph into one setting.
///
/// Slot tiers are inspected in fixed priority order (endorsing, then
/// signed-encrypted, then signed, then the protection or initiator
/// parameters); the first tier holding a slot that carries the flag is
/// authoritative. Two carrying slots of that tier must agree, otherwise
/// the graph cannot be expressed by a single declarative setting. A graph
/// with no carrying slot defaults to `true`.
pub fn reconcile_derived_keys(graph: &SecurityPolicyGraph) -> Result<bool> {
    let supporting = &graph.endpoint_supporting;
    let tiers: [Vec<&TokenParameters>; 4] = [
        supporting.endorsing.iter().collect(),
        supporting.signed_encrypted.iter().collect(),
        supporting.signed.iter().collect(),
        shape_tokens(graph),
    ];
    for tier in tiers {
        let mut agreed: Option<bool> = None;
        for token in tier {
            if !token.carries_derived_keys() {
                continue;
            }
            match agreed {
                None => agreed = Some(token.require_derived_keys),
                Some(flag) if flag != token.require_derived_keys => {
                    return Err(Error::AmbiguousDerivedKeys);
                }
                Some(_) => {}
            }
        }
        if let Some(flag) = agreed {
            return Ok(flag);
        }
    }
    Ok(true)
}

fn shape_tokens(graph: &SecurityPolicyGraph) -> Vec<&TokenParameters> {
    match &graph.shape {
        GraphShape::Transport => Vec::new(),
        GraphShape::Symmetric { protection, .. } => vec![protection],
        GraphShape::Asymmetric {
            initiator,
            recipient,
            ..
        } => vec![initiator, recipient],
    }
}

fn all_slots(graph: &SecurityPolicyGraph) -> impl Iterator<Item = &TokenParameters> {
    let supporting = &graph.endpoint_supporting;
    supporting
        .endorsing
        .iter()
        .chain(supporting.signed_encrypted.iter())
        .chain(supporting.signed.iter())
        .chain(supporting.signed_endorsing.iter())
        .chain(shape_tokens(graph))
}

fn apply_derived_keys(graph: &mut SecurityPolicyGraph, value: bool) {
    match &mut graph.shape {
        GraphShape::Transport => {}
        GraphShape::Symmetric { protection, .. } => {
            if protection.carries_derived_keys() {
                protection.require_derived_keys = value;
            }
        }
        GraphShape::Asymmetric {
            initiator,
            recipient,
            ..
        } => {
            for token in [initiator, recipient] {
                if token.carries_derived_keys() {
                    token.require_derived_keys = value;
                }
            }
        }
    }
    let supporting = &mut graph.endpoint_supporting;
    for token in supporting
        .endorsing
        .iter_mut()
        .chain(supporting.signed_endorsing.iter_mut())
    {
        if token.carries_derived_keys() {
            token.require_derived_keys = value;
        }
    }
}

fn find_bootstrap(graph: &SecurityPolicyGraph) -> Option<&SecurityPolicyGraph> {
    let candidates = graph
        .protection_token()
        .into_iter()
        .chain(graph.endpoint_supporting.endorsing.iter());
    for token in candidates {
        if let TokenKind::SecureConversation { bootstrap, .. } = &token.kind {
            return Some(bootstrap);
        }
    }
    None
}

fn has_inexpressible_clause_style(graph: &SecurityPolicyGraph) -> bool {
    all_slots(graph).any(|token| {
        matches!(
            token.kind,
            TokenKind::X509 {
                clause_style: ClauseStyle::IssuerSerial | ClauseStyle::SubjectKeyIdentifier,
            }
        )
    })
}

/// Map a constructed policy graph to the named mode that produced it.
///
/// One template per mode is built under a context inferred from the graph
/// itself (issued key type, secure-conversation bootstrap, declared
/// version) and compared structurally; the first match wins. Graphs with
/// per-operation supporting-token overrides can never be expressed by a
/// single mode declaration and short-circuit to unmapped.
pub fn detect_mode(graph: &SecurityPolicyGraph) -> ModeDetection {
    if graph.has_operation_overrides() {
        warn!(
            operations = graph.operation_supporting.len(),
            "policy has per-operation supporting tokens, keeping it unmapped"
        );
        return ModeDetection::Unmapped(UnmappedPolicy {
            graph: graph.clone(),
            note: "per-operation supporting-token overrides have no named mode".to_string(),
        });
    }

    let derived_keys = match reconcile_derived_keys(graph) {
        Ok(flag) => flag,
        Err(err) => {
            warn!(error = %err, "keeping policy unmapped");
            return ModeDetection::Unmapped(UnmappedPolicy {
                graph: graph.clone(),
                note: err.to_string(),
            });
        }
    };

    let mut ctx = TemplateContext::new(infer_issued_key_type(graph)).with_version(graph.version);
    if let Some(bootstrap) = find_bootstrap(graph) {
        ctx = ctx.with_bootstrap(bootstrap);
    }

    for mode in AuthenticationMode::ALL {
        let Some(mut template) = build_template(mode, &ctx) else {
            continue;
        };
        apply_derived_keys(&mut template, derived_keys);
        if graphs_match(graph, &template, true) {
            debug!(mode = %mode, "policy matched a named authentication mode");
            return ModeDetection::Named(mode);
        }
    }

    let note = if has_inexpressible_clause_style(graph) {
        "certificate reference style is not expressible by a named mode".to_string()
    } else {
        "no authentication-mode template matches this policy".to_string()
    };
    warn!(note = %note, "keeping policy unmapped");
    ModeDetection::Unmapped(UnmappedPolicy {
        graph: graph.clone(),
        note,
    })
}
