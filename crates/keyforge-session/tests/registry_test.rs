use keyforge_session::SessionRegistry;

#[test]
fn test_register_increments_len_and_unregister_decrements_it() {
    let registry = SessionRegistry::new();
    assert_eq!(registry.len(), 0);

    let peer: std::net::SocketAddr = "127.0.0.1:9000".parse().unwrap();
    let id = registry.register(peer);
    assert_eq!(registry.len(), 1);

    registry.unregister(id);
    assert_eq!(registry.len(), 0);
}

#[test]
fn test_each_registration_gets_a_distinct_id() {
    let registry = SessionRegistry::new();
    let peer: std::net::SocketAddr = "127.0.0.1:9000".parse().unwrap();
    let a = registry.register(peer);
    let b = registry.register(peer);
    assert_ne!(a, b);
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_unregister_of_unknown_id_is_a_no_op() {
    let registry = SessionRegistry::new();
    registry.unregister(9999);
    assert_eq!(registry.len(), 0);
}
