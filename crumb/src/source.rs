use chrono::{DateTime, Utc};

/// Seam between the store and whatever owns the ambient cookie string.
///
/// `read` returns the live `"; "`-joined `name=value` string; `write`
/// hands the environment one cookie assignment (pair plus attributes)
/// to apply. No acknowledgment either way.
pub trait CookieSource {
    fn read(&self) -> String;
    fn write(&mut self, entry: &str);
}

/// One parsed cookie assignment: `name=value` followed by `;`-separated
/// attributes. Only `path` and `expires` matter here.
struct Assignment<'a> {
    name: &'a str,
    value: &'a str,
    path: &'a str,
    expired: bool,
}

fn parse_assignment(entry: &str) -> Option<Assignment<'_>> {
    let mut parts = entry.split(';');
    let pair = parts.next()?;
    let (name, value) = pair.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let mut path = "/";
    let mut expired = false;
    for attr in parts {
        let (k, v) = match attr.split_once('=') {
            Some((k, v)) => (k.trim(), v.trim()),
            None => (attr.trim(), ""),
        };
        if k.eq_ignore_ascii_case("path") && !v.is_empty() {
            path = v;
        } else if k.eq_ignore_ascii_case("expires") {
            expired = expires_in_past(v);
        }
    }

    Some(Assignment {
        name,
        value,
        path,
        expired,
    })
}

/// An `expires` value the environment cannot parse sets the cookie
/// anyway, same as a browser.
fn expires_in_past(value: &str) -> bool {
    DateTime::parse_from_rfc2822(value)
        .map(|t| t.with_timezone(&Utc) <= Utc::now())
        .unwrap_or(false)
}

/// In-memory stand-in for the hosting environment.
///
/// Applies assignments the way a browser does: a pair sets or updates
/// the cookie, a past `expires` evicts it. Entries are keyed by
/// `(name, path)` so an eviction under `path=/` leaves a same-name
/// cookie set under another path alone.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    entries: Vec<Entry>,
}

#[derive(Debug, Clone)]
struct Entry {
    name: String,
    value: String,
    path: String,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CookieSource for MemorySource {
    fn read(&self) -> String {
        let mut out = String::new();
        for e in &self.entries {
            if !out.is_empty() {
                out.push_str("; ");
            }
            out.push_str(&e.name);
            out.push('=');
            out.push_str(&e.value);
        }
        out
    }

    fn write(&mut self, entry: &str) {
        let Some(a) = parse_assignment(entry) else {
            return;
        };

        if a.expired {
            self.entries
                .retain(|e| !(e.name == a.name && e.path == a.path));
        } else if let Some(e) = self
            .entries
            .iter_mut()
            .find(|e| e.name == a.name && e.path == a.path)
        {
            e.value = a.value.to_string();
        } else {
            self.entries.push(Entry {
                name: a.name.to_string(),
                value: a.value.to_string(),
                path: a.path.to_string(),
            });
        }
    }
}

/// Request-scoped source over an incoming `Cookie` header.
///
/// Reads reflect writes immediately (jar semantics), so expiring a
/// cookie masks it for the rest of the request. Every raw assignment is
/// also kept, in order, for the caller to emit as `Set-Cookie` response
/// lines.
#[derive(Debug, Default, Clone)]
pub struct HeaderSource {
    pairs: Vec<(String, String)>,
    pending: Vec<String>,
}

impl HeaderSource {
    /// Lenient `Cookie` header parse: `;`-separated pairs, whitespace
    /// trimmed, segments without `=` skipped. Duplicate names are kept
    /// in order, as user agents may send them.
    pub fn from_header(header: &str) -> Self {
        let mut pairs = Vec::new();
        for part in header.split(';') {
            let part = part.trim();
            if let Some((name, value)) = part.split_once('=') {
                let name = name.trim();
                if !name.is_empty() {
                    pairs.push((name.to_string(), value.trim().to_string()));
                }
            }
        }
        Self {
            pairs,
            pending: Vec::new(),
        }
    }

    /// Assignments written so far, verbatim and in write order.
    pub fn set_cookie_lines(&self) -> &[String] {
        &self.pending
    }
}

impl CookieSource for HeaderSource {
    fn read(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.pairs {
            if !out.is_empty() {
                out.push_str("; ");
            }
            out.push_str(name);
            out.push('=');
            out.push_str(value);
        }
        out
    }

    fn write(&mut self, entry: &str) {
        self.pending.push(entry.to_string());

        // A request header carries no path information, so the
        // effective view ignores the path attribute.
        let Some(a) = parse_assignment(entry) else {
            return;
        };

        if a.expired {
            self.pairs.retain(|(n, _)| n.as_str() != a.name);
        } else if let Some(slot) = self.pairs.iter_mut().find(|(n, _)| n.as_str() == a.name) {
            slot.1 = a.value.to_string();
        } else {
            self.pairs.push((a.name.to_string(), a.value.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_write_then_read() {
        let mut src = MemorySource::new();
        src.write("session=abc123");
        src.write("theme=dark");
        assert_eq!(src.read(), "session=abc123; theme=dark");
    }

    #[test]
    fn memory_update_in_place() {
        let mut src = MemorySource::new();
        src.write("theme=dark");
        src.write("theme=light");
        assert_eq!(src.read(), "theme=light");
    }

    #[test]
    fn memory_past_expiry_evicts() {
        let mut src = MemorySource::new();
        src.write("session=abc123");
        src.write("session=;path=/; expires=Thu, 01 Jan 1970 00:00:01 GMT;");
        assert_eq!(src.read(), "");
    }

    #[test]
    fn memory_eviction_is_path_scoped() {
        let mut src = MemorySource::new();
        src.write("token=root");
        src.write("token=admin;path=/admin");
        src.write("token=;path=/; expires=Thu, 01 Jan 1970 00:00:01 GMT;");
        assert_eq!(src.read(), "token=admin");
    }

    #[test]
    fn memory_future_expiry_sets() {
        let mut src = MemorySource::new();
        src.write("keep=1; expires=Fri, 31 Dec 9999 23:59:59 GMT");
        assert_eq!(src.read(), "keep=1");
    }

    #[test]
    fn memory_garbage_expiry_sets() {
        let mut src = MemorySource::new();
        src.write("keep=1; expires=not-a-date");
        assert_eq!(src.read(), "keep=1");
    }

    #[test]
    fn memory_ignores_nameless_entries() {
        let mut src = MemorySource::new();
        src.write("=orphan");
        src.write("no-equals-sign");
        assert_eq!(src.read(), "");
    }

    #[test]
    fn header_parse_is_lenient() {
        let src = HeaderSource::from_header("  session=abc123;theme=dark ; junk ;=x");
        assert_eq!(src.read(), "session=abc123; theme=dark");
    }

    #[test]
    fn header_keeps_duplicates_in_order() {
        let src = HeaderSource::from_header("name=first; name=second");
        assert_eq!(src.read(), "name=first; name=second");
    }

    #[test]
    fn header_write_masks_reads_and_records_line() {
        let mut src = HeaderSource::from_header("session=abc123");
        src.write("session=;path=/; expires=Thu, 01 Jan 1970 00:00:01 GMT;");

        assert_eq!(src.read(), "");
        let lines = src.set_cookie_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(
            lines[0],
            "session=;path=/; expires=Thu, 01 Jan 1970 00:00:01 GMT;"
        );
    }

    #[test]
    fn header_write_appends_new_pair() {
        let mut src = HeaderSource::from_header("a=1");
        src.write("b=2;path=/");
        assert_eq!(src.read(), "a=1; b=2");
        assert_eq!(src.set_cookie_lines().len(), 1);
    }
}
