use crumb::{CookieSource, CookieStore, Flash, HeaderSource, MemorySource};

#[test]
fn browser_like_session_flow() {
    let mut src = MemorySource::new();
    src.write("session=abc123");
    src.write("theme=dark");

    let mut store = CookieStore::new(src);
    assert_eq!(store.get("session").as_deref(), Some("abc123"));
    assert_eq!(store.get("theme").as_deref(), Some("dark"));
    assert_eq!(store.get("missing"), None);

    store.delete("session");
    assert_eq!(store.get("session"), None);
    assert_eq!(store.get("theme").as_deref(), Some("dark"));

    // Deleting again leaves the ambient state as it was.
    store.delete("session");
    assert_eq!(store.source().read(), "theme=dark");
}

#[test]
fn request_scoped_flow_emits_set_cookie() {
    let src = HeaderSource::from_header("flash_message=profile%20saved; session=abc123");
    let mut store = CookieStore::new(src);

    // The flash bundle consumes its cookie on first read. Values come
    // back exactly as stored; decoding is the caller's business.
    let msg = Flash::new(&mut store).take();
    assert_eq!(msg.as_deref(), Some("profile%20saved"));
    assert_eq!(store.get("flash_message"), None);
    assert_eq!(store.get("session").as_deref(), Some("abc123"));

    let lines = store.source().set_cookie_lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(
        lines[0],
        "flash_message=;path=/; expires=Thu, 01 Jan 1970 00:00:01 GMT;"
    );
}
