//! End-to-end security flow: template construction, round-trip detection,
//! and verbatim retention of policies no named mode can express.

use binder_security::{
    AuthenticationMode, ClauseStyle, InclusionMode, IssuedKeyType, MessageSecurityVersion,
    ModeDetection, SecurityPolicyGraph, SupportingTokens, TemplateContext, TokenParameters,
    build_template, detect_mode,
};
use pretty_assertions::assert_eq;

#[test]
fn every_buildable_mode_round_trips_through_detection() {
    let ctx = TemplateContext::new(IssuedKeyType::Symmetric);
    let mut detected = 0;
    for mode in AuthenticationMode::ALL {
        let Some(graph) = build_template(mode, &ctx) else {
            continue;
        };
        assert_eq!(detect_mode(&graph), ModeDetection::Named(mode));
        detected += 1;
    }
    // all modes except the bootstrap-dependent secure conversation
    assert_eq!(detected, 17);
}

#[test]
fn secure_conversation_round_trips_with_a_message_security_bootstrap() {
    let ctx = TemplateContext::new(IssuedKeyType::Symmetric);
    let bootstrap = build_template(AuthenticationMode::UserNameForSslNegotiated, &ctx).unwrap();
    let graph = build_template(
        AuthenticationMode::SecureConversation,
        &ctx.clone().with_bootstrap(&bootstrap),
    )
    .unwrap();

    assert_eq!(
        detect_mode(&graph),
        ModeDetection::Named(AuthenticationMode::SecureConversation)
    );
}

#[test]
fn declared_version_is_respected_end_to_end() {
    let ctx = TemplateContext::new(IssuedKeyType::Symmetric)
        .with_version(MessageSecurityVersion::Wss11Trust13);
    let graph = build_template(AuthenticationMode::UserNameOverTransport, &ctx).unwrap();
    assert_eq!(graph.version, MessageSecurityVersion::Wss11Trust13);
    assert_eq!(
        detect_mode(&graph),
        ModeDetection::Named(AuthenticationMode::UserNameOverTransport)
    );
}

#[test]
fn hand_built_policy_outside_the_mode_set_is_kept_verbatim() {
    let graph = SecurityPolicyGraph::symmetric(TokenParameters::x509(
        ClauseStyle::SubjectKeyIdentifier,
        InclusionMode::Never,
    ));

    match detect_mode(&graph) {
        ModeDetection::Unmapped(policy) => {
            assert_eq!(policy.graph, graph);
            assert!(policy.note.contains("reference style"), "note: {}", policy.note);
        }
        ModeDetection::Named(mode) => panic!("unexpectedly matched {mode}"),
    }
}

#[test]
fn operation_scoped_tokens_force_verbatim_retention() {
    let ctx = TemplateContext::new(IssuedKeyType::Symmetric);
    let mut graph = build_template(AuthenticationMode::Kerberos, &ctx).unwrap();
    let mut per_op = SupportingTokens::new();
    per_op.signed_encrypted.push(TokenParameters::user_name());
    graph
        .operation_supporting
        .insert("urn:example:audit".to_string(), per_op);

    assert!(matches!(detect_mode(&graph), ModeDetection::Unmapped(_)));
}
