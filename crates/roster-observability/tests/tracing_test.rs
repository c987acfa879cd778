use roster_core::config::{MatchMode, ObservabilityConfig};
use roster_core::EventKind;
use roster_observability::tracing_setup::spans::names;
use roster_observability::{canonicalize_span, extract_span, init_from_config, init_tracing, match_span};

#[test]
fn span_names_are_namespaced() {
    for name in [names::MATCH, names::CANONICALIZE, names::EXTRACT] {
        assert!(name.starts_with("roster."));
    }
}

#[test]
fn spans_build_and_enter_with_subscriber_installed() {
    init_from_config(&ObservabilityConfig::default());
    // Repeated initialization is a no-op.
    init_tracing();

    let span = match_span!(MatchMode::Cluster, 10usize, 12usize);
    let _guard = span.enter();
    let inner = extract_span!(EventKind::OfficerHire, 3usize);
    inner.in_scope(|| tracing::info!("extracting"));
    canonicalize_span!(6usize, 3usize).in_scope(|| {});
}
