//! Integration test to verify the workspace crates link together.

#[test]
fn domain_crate_compiles() {
    let _endpoint = vfimport_domain::ImportEndpoint::default();
    let _form = vfimport_domain::MultipartForm::new("boundary");
}

#[test]
fn application_crate_compiles() {
    let chain = vfimport_application::TransportChain::new();
    assert!(chain.is_empty());
}

#[test]
fn infrastructure_crate_compiles() {
    use vfimport_application::Clock;
    let clock = vfimport_infrastructure::SystemClock;
    let _now = clock.now();
}
