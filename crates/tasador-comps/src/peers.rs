//! Peer list selection.

/// Fallback peer set when neither the caller nor the provider supplies one.
pub const DEFAULT_PEERS: [&str; 6] = ["AAPL", "MSFT", "GOOGL", "AMZN", "META", "NVDA"];

/// Parse a comma-separated ticker list.
///
/// Tickers are trimmed and upper-cased; blanks and repeats are dropped while
/// the first-seen order is kept.
#[must_use]
pub fn parse_peers(input: &str) -> Vec<String> {
    let mut peers: Vec<String> = Vec::new();
    for ticker in input.split(',').map(|t| t.trim().to_uppercase()) {
        if !ticker.is_empty() && !peers.contains(&ticker) {
            peers.push(ticker);
        }
    }
    peers
}

/// Choose the peer list for `subject`.
///
/// An explicit list wins, then the provider's peer list, then
/// [`DEFAULT_PEERS`]. The subject itself is never its own peer.
#[must_use]
pub fn resolve_peers(
    subject: &str,
    explicit: Option<&str>,
    discovered: Option<Vec<String>>,
) -> Vec<String> {
    let subject = subject.trim().to_uppercase();
    let without_subject = |peers: Vec<String>| -> Vec<String> {
        peers.into_iter().filter(|p| *p != subject).collect()
    };

    if let Some(list) = explicit.map(parse_peers).map(without_subject)
        && !list.is_empty()
    {
        return list;
    }
    if let Some(list) = discovered.map(|d| parse_peers(&d.join(","))).map(without_subject)
        && !list.is_empty()
    {
        return list;
    }

    tracing::debug!(%subject, "using default peer set");
    without_subject(DEFAULT_PEERS.iter().map(|s| (*s).to_string()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_peers() {
        assert_eq!(parse_peers(" msft, googl ,,MSFT, amzn "), vec!["MSFT", "GOOGL", "AMZN"]);
        assert!(parse_peers("").is_empty());
        assert!(parse_peers(" , ").is_empty());
    }

    #[test]
    fn test_explicit_wins() {
        let peers = resolve_peers("AAPL", Some("ko,pep"), Some(vec!["MSFT".to_string()]));
        assert_eq!(peers, vec!["KO", "PEP"]);
    }

    #[test]
    fn test_discovered_fallback() {
        let discovered = Some(vec!["MSFT".to_string(), "aapl".to_string()]);
        assert_eq!(resolve_peers("AAPL", Some(" "), discovered), vec!["MSFT"]);
    }

    #[test]
    fn test_default_fallback_excludes_subject() {
        let peers = resolve_peers("msft", None, Some(Vec::new()));
        assert_eq!(peers.len(), DEFAULT_PEERS.len() - 1);
        assert!(!peers.contains(&"MSFT".to_string()));
        assert_eq!(resolve_peers("KO", None, None).len(), DEFAULT_PEERS.len());
    }
}
