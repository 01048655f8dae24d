//! Source-domain political leaning lookup.
//!
//! The table maps a normalized hostname (lowercase, one leading `www.`
//! removed) to a coarse label. Matching is exact: `edition.cnn.com` is not
//! `cnn.com`. Anything absent from the table is `Unknown`, which is kept apart
//! from `Center` all the way to the response.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bias {
    Left,
    Center,
    Right,
    Unknown,
}

impl Bias {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bias::Left => "Left",
            Bias::Center => "Center",
            Bias::Right => "Right",
            Bias::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Bias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bias {
    type Err = Error;

    /// Accepts the three labels plus the "lean" variants of a five-point
    /// scale, which collapse onto their side.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "left" | "lean left" => Ok(Bias::Left),
            "center" | "centre" => Ok(Bias::Center),
            "right" | "lean right" => Ok(Bias::Right),
            "unknown" => Ok(Bias::Unknown),
            _ => Err(Error::InvalidInput(format!("Unknown bias label: {}", s))),
        }
    }
}

/// Lowercase a hostname and drop one leading `www.`.
pub fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('.').to_ascii_lowercase();
    match host.strip_prefix("www.") {
        Some(stripped) => stripped.to_string(),
        None => host,
    }
}

/// Normalized host of an absolute URL, or "" when the URL does not parse or
/// has no host.
pub fn host_from_url(url: &str) -> String {
    Url::parse(url.trim())
        .ok()
        .and_then(|u| u.host_str().map(normalize_host))
        .unwrap_or_default()
}

#[derive(Debug, Clone, Default)]
pub struct BiasTable {
    entries: HashMap<String, Bias>,
}

impl BiasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The bundled table of news domains.
    pub fn builtin() -> Self {
        let entries = BUILTIN_ENTRIES
            .iter()
            .map(|(host, bias)| (host.to_string(), *bias))
            .collect();
        Self { entries }
    }

    pub fn from_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Bias)>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for (host, bias) in entries {
            table.insert(host.as_ref(), bias)?;
        }
        Ok(table)
    }

    /// Parse a JSON object of `{"host": "label"}` pairs.
    pub fn from_json(raw: &str) -> Result<Self> {
        let map: HashMap<String, String> = serde_json::from_str(raw)?;
        let mut table = Self::new();
        for (host, label) in map {
            table.insert(&host, label.parse()?)?;
        }
        Ok(table)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read bias table {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw).map_err(|e| {
            Error::Config(format!("Invalid bias table {}: {}", path.display(), e))
        })
    }

    pub fn insert(&mut self, host: &str, bias: Bias) -> Result<()> {
        if bias == Bias::Unknown {
            return Err(Error::InvalidInput(format!(
                "{} cannot be mapped to Unknown; leave it out of the table instead",
                host
            )));
        }
        let host = normalize_host(host);
        if host.is_empty() {
            return Err(Error::InvalidInput("Empty host in bias table".to_string()));
        }
        self.entries.insert(host, bias);
        Ok(())
    }

    pub fn lookup_host(&self, host: &str) -> Bias {
        self.entries
            .get(&normalize_host(host))
            .copied()
            .unwrap_or(Bias::Unknown)
    }

    pub fn classify(&self, url: &str) -> Bias {
        let host = host_from_url(url);
        if host.is_empty() {
            return Bias::Unknown;
        }
        self.lookup_host(&host)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookup result for a single URL, with the host it was matched on.
    pub fn source_bias(&self, url: &str) -> SourceBias {
        SourceBias {
            url: url.to_string(),
            domain: host_from_url(url),
            bias: self.classify(url),
        }
    }
}

/// Article titles grouped by the leaning of their source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiasBuckets {
    #[serde(rename = "Left")]
    pub left: Vec<String>,
    #[serde(rename = "Center")]
    pub center: Vec<String>,
    #[serde(rename = "Right")]
    pub right: Vec<String>,
    #[serde(rename = "Unknown")]
    pub unknown: Vec<String>,
}

impl BiasBuckets {
    pub fn push(&mut self, bias: Bias, title: String) {
        match bias {
            Bias::Left => self.left.push(title),
            Bias::Center => self.center.push(title),
            Bias::Right => self.right.push(title),
            Bias::Unknown => self.unknown.push(title),
        }
    }

    pub fn total(&self) -> usize {
        self.left.len() + self.center.len() + self.right.len() + self.unknown.len()
    }
}

/// Result of a single URL lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceBias {
    pub url: String,
    pub domain: String,
    pub bias: Bias,
}

const BUILTIN_ENTRIES: &[(&str, Bias)] = &[
    // Left
    ("abcnews.go.com", Bias::Left),
    ("alternet.org", Bias::Left),
    ("axios.com", Bias::Left),
    ("bloomberg.com", Bias::Left),
    ("buzzfeednews.com", Bias::Left),
    ("cbsnews.com", Bias::Left),
    ("cnn.com", Bias::Left),
    ("crooksandliars.com", Bias::Left),
    ("dailykos.com", Bias::Left),
    ("democracynow.org", Bias::Left),
    ("huffpost.com", Bias::Left),
    ("msnbc.com", Bias::Left),
    ("nbcnews.com", Bias::Left),
    ("newrepublic.com", Bias::Left),
    ("newyorker.com", Bias::Left),
    ("nytimes.com", Bias::Left),
    ("politico.com", Bias::Left),
    ("slate.com", Bias::Left),
    ("theatlantic.com", Bias::Left),
    ("theguardian.com", Bias::Left),
    ("theintercept.com", Bias::Left),
    ("thenation.com", Bias::Left),
    ("thinkprogress.org", Bias::Left),
    ("vox.com", Bias::Left),
    ("washingtonpost.com", Bias::Left),
    // Lean left
    ("afr.com", Bias::Left),
    ("aljazeera.com", Bias::Left),
    ("apnews.com", Bias::Left),
    ("businessinsider.com", Bias::Left),
    ("cnbc.com", Bias::Left),
    ("fortune.com", Bias::Left),
    ("insider.com", Bias::Left),
    ("latimes.com", Bias::Left),
    ("npr.org", Bias::Left),
    ("pbs.org", Bias::Left),
    ("propublica.org", Bias::Left),
    ("time.com", Bias::Left),
    ("usatoday.com", Bias::Left),
    ("vanityfair.com", Bias::Left),
    ("wired.com", Bias::Left),
    // Center
    ("ap.org", Bias::Center),
    ("bbc.com", Bias::Center),
    ("csmonitor.com", Bias::Center),
    ("forbes.com", Bias::Center),
    ("marketwatch.com", Bias::Center),
    ("news.yahoo.com", Bias::Center),
    ("newsweek.com", Bias::Center),
    ("realclearpolitics.com", Bias::Center),
    ("reuters.com", Bias::Center),
    ("thehill.com", Bias::Center),
    ("thestreet.com", Bias::Center),
    ("usnews.com", Bias::Center),
    ("wsj.com", Bias::Center),
    ("yahoo.com", Bias::Center),
    // Lean right
    ("americanaffairsjournal.org", Bias::Right),
    ("christianpost.com", Bias::Right),
    ("commentarymagazine.com", Bias::Right),
    ("dailymail.co.uk", Bias::Right),
    ("foxbusiness.com", Bias::Right),
    ("nationalreview.com", Bias::Right),
    ("nypost.com", Bias::Right),
    ("spectator.org", Bias::Right),
    ("theadvocate.com", Bias::Right),
    ("thedispatch.com", Bias::Right),
    ("theepochtimes.com", Bias::Right),
    ("thefederalist.com", Bias::Right),
    ("thetimes.co.uk", Bias::Right),
    ("washingtontimes.com", Bias::Right),
    // Right
    ("americanthinker.com", Bias::Right),
    ("breitbart.com", Bias::Right),
    ("cbn.com", Bias::Right),
    ("dailycaller.com", Bias::Right),
    ("dailywire.com", Bias::Right),
    ("foxnews.com", Bias::Right),
    ("freebeacon.com", Bias::Right),
    ("infowars.com", Bias::Right),
    ("judicialwatch.org", Bias::Right),
    ("newsmax.com", Bias::Right),
    ("redstate.com", Bias::Right),
    ("theblaze.com", Bias::Right),
    ("townhall.com", Bias::Right),
    ("washingtonexaminer.com", Bias::Right),
    ("wnd.com", Bias::Right),
    // International
    ("cbc.ca", Bias::Left),
    ("dw.com", Bias::Center),
    ("economist.com", Bias::Left),
    ("ft.com", Bias::Center),
    ("indiatimes.com", Bias::Center),
    ("japantimes.co.jp", Bias::Center),
    ("lemonde.fr", Bias::Left),
    ("reuters.co.jp", Bias::Center),
    ("scmp.com", Bias::Center),
    ("smh.com.au", Bias::Left),
    ("spiegel.de", Bias::Left),
    ("theage.com.au", Bias::Left),
    ("theglobeandmail.com", Bias::Center),
    ("timesofindia.indiatimes.com", Bias::Center),
    ("torontosun.com", Bias::Right),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_builtin_entry_classifies_to_its_label() {
        let table = BiasTable::builtin();
        assert_eq!(table.len(), BUILTIN_ENTRIES.len());
        for (host, bias) in BUILTIN_ENTRIES {
            assert_eq!(table.lookup_host(host), *bias, "{}", host);
            assert_eq!(table.classify(&format!("https://{}/story", host)), *bias, "{}", host);
        }
    }

    #[test]
    fn test_unlisted_hosts_are_unknown() {
        let table = BiasTable::builtin();
        assert_eq!(table.classify("https://unknownsite.xyz/c"), Bias::Unknown);
        // exact match only, no suffix matching
        assert_eq!(table.classify("https://edition.cnn.com/world"), Bias::Unknown);
    }

    #[test]
    fn test_www_prefix_is_ignored() {
        let table = BiasTable::builtin();
        assert_eq!(table.lookup_host("www.foxnews.com"), table.lookup_host("foxnews.com"));
        assert_eq!(table.classify("https://www.cnn.com/a"), Bias::Left);
        assert_eq!(table.classify("https://WWW.Reuters.com/b"), Bias::Center);
        assert_eq!(table.lookup_host("www.example.com"), table.lookup_host("example.com"));
    }

    #[test]
    fn test_malformed_urls_fail_closed() {
        let table = BiasTable::builtin();
        assert_eq!(table.classify(""), Bias::Unknown);
        assert_eq!(table.classify("cnn.com/a"), Bias::Unknown);
        assert_eq!(table.classify("not a url"), Bias::Unknown);
        assert_eq!(host_from_url("mailto:someone@cnn.com"), "");
    }

    #[test]
    fn test_classification_is_repeatable() {
        let table = BiasTable::builtin();
        let first = table.classify("https://www.nypost.com/x");
        for _ in 0..5 {
            assert_eq!(table.classify("https://www.nypost.com/x"), first);
        }
    }

    #[test]
    fn test_injected_table() {
        let table = BiasTable::from_entries([("www.Example.com", Bias::Right)]).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.classify("https://example.com/a"), Bias::Right);
        assert_eq!(table.classify("https://cnn.com/a"), Bias::Unknown);

        assert!(BiasTable::from_entries([("example.com", Bias::Unknown)]).is_err());
    }

    #[test]
    fn test_table_from_json() {
        let table = BiasTable::from_json(
            r#"{"example.org": "Lean Left", "example.net": "center", "www.example.com": "Right"}"#,
        )
        .unwrap();
        assert_eq!(table.lookup_host("example.org"), Bias::Left);
        assert_eq!(table.lookup_host("example.net"), Bias::Center);
        assert_eq!(table.lookup_host("example.com"), Bias::Right);

        assert!(BiasTable::from_json(r#"{"example.org": "far out"}"#).is_err());
        assert!(BiasTable::from_json("[]").is_err());
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let err = BiasTable::load(Path::new("/nonexistent/bias.json")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_buckets_route_by_label() {
        let mut buckets = BiasBuckets::default();
        buckets.push(Bias::Left, "a".into());
        buckets.push(Bias::Unknown, "b".into());
        assert_eq!(buckets.left, ["a".to_string()]);
        assert_eq!(buckets.unknown, ["b".to_string()]);
        assert!(buckets.center.is_empty());
        assert_eq!(buckets.total(), 2);

        let json = serde_json::to_value(&buckets).unwrap();
        assert_eq!(json["Left"][0], "a");
        assert_eq!(json["Unknown"][0], "b");
    }

    #[test]
    fn test_source_bias_for_url() {
        let table = BiasTable::builtin();
        let lookup = table.source_bias("https://www.reuters.com/world/story");
        assert_eq!(lookup.domain, "reuters.com");
        assert_eq!(lookup.bias, Bias::Center);
        assert_eq!(lookup.url, "https://www.reuters.com/world/story");

        let lookup = table.source_bias("not a url");
        assert_eq!(lookup.domain, "");
        assert_eq!(lookup.bias, Bias::Unknown);
    }
}
