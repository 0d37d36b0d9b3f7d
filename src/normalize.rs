use crate::{
    authority::{canonicalize_host, canonicalize_port, canonicalize_scheme},
    component::UriComponents,
    config::NormalizationConfig,
    error::ParseError,
    fragment::canonicalize_fragment,
    parse::{is_port_like, parse},
    path::canonicalize_path,
    pct_enc,
    query::canonicalize_query,
};
use tracing::{debug, trace};

/// A URI normalizer.
///
/// A `Normalizer` holds one URI at a time, split into its components, and
/// rewrites it into a canonical form with [`normalize`]. Two URIs that are
/// equivalent under the configured rules normalize to the same string, and
/// normalizing a normalized URI leaves it unchanged.
///
/// The configuration is fixed at construction.
///
/// [`normalize`]: Self::normalize
///
/// # Examples
///
/// ```
/// use uri_canon::{Mode, NormalizationConfig, Normalizer};
///
/// let mut n = Normalizer::new(Some("eXAMPLE://a/./b/../b/%63/%7bfoo%7d"), NormalizationConfig::new());
/// assert_eq!(n.normalize(), "example://a/b/c/%7Bfoo%7D");
///
/// let config = NormalizationConfig::new().mode(Mode::SafeBrowsing);
/// let mut n = Normalizer::new(Some("www.GOOgle.com/a/../b#frag"), config);
/// assert_eq!(n.normalize(), "http://www.google.com/b");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Normalizer {
    url: String,
    components: UriComponents,
    config: NormalizationConfig,
}

impl Normalizer {
    /// Creates a new `Normalizer` with the given configuration, optionally
    /// loading a URI into it.
    ///
    /// A URI that fails to split leaves the normalizer empty, as
    /// [`set_url`](Self::set_url) would.
    #[must_use]
    pub fn new(url: Option<&str>, config: NormalizationConfig) -> Self {
        let mut normalizer = Self {
            config,
            ..Self::default()
        };
        if let Some(url) = url {
            normalizer.set_url(url);
        }
        normalizer
    }

    /// Loads a URI, replacing every component of the previous one.
    ///
    /// Returns `false` if the URI cannot be split into components, in which
    /// case the stored URI and every component are reset to empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_canon::{NormalizationConfig, Normalizer};
    ///
    /// let mut n = Normalizer::new(None, NormalizationConfig::new());
    /// assert!(n.set_url("http://example.com:8080/"));
    /// assert_eq!(n.components().port(), "8080");
    ///
    /// assert!(!n.set_url("/test:2/"));
    /// assert_eq!(n.get_url(), "");
    /// assert!(n.components().is_empty());
    /// ```
    pub fn set_url(&mut self, url: &str) -> bool {
        self.try_set_url(url).is_ok()
    }

    /// Loads a URI like [`set_url`](Self::set_url), returning the reason
    /// for a failure.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the URI cannot be split into components.
    pub fn try_set_url(&mut self, url: &str) -> Result<(), ParseError> {
        match parse(url) {
            Ok(mut components) => {
                self.fix_up(&mut components);
                self.url = url.to_owned();
                self.components = components;
                Ok(())
            }
            Err(e) => {
                debug!(url, error = %e, "rejected URL");
                self.url.clear();
                self.components = UriComponents::default();
                Err(e)
            }
        }
    }

    fn fix_up(&self, c: &mut UriComponents) {
        if c.is_empty() {
            return;
        }
        if self.config.is_safe_browsing() {
            if c.scheme.is_empty() {
                c.scheme.push_str("http");
            }
            if c.host.is_empty() && !c.path.is_empty() {
                let i = c.path.find('/').unwrap_or(c.path.len());
                c.host = c.path[..i].to_owned();
                c.path.replace_range(..i, "");
            }
        }
        if c.path.bytes().all(|x| x == b'/') {
            c.path.clear();
        }
    }

    /// Returns the stored URI: the one last loaded, or the result of the
    /// last call to [`normalize`](Self::normalize).
    #[must_use]
    pub fn get_url(&self) -> &str {
        &self.url
    }

    /// Returns the scheme of the stored URI as it was written.
    #[must_use]
    pub fn get_scheme(&self) -> &str {
        &self.components.scheme
    }

    /// Returns the components of the stored URI.
    #[must_use]
    pub fn components(&self) -> &UriComponents {
        &self.components
    }

    /// Returns the configuration of the normalizer.
    #[must_use]
    pub fn config(&self) -> &NormalizationConfig {
        &self.config
    }

    /// Normalizes the stored URI and returns the result.
    ///
    /// The result replaces the stored URI, so it is also what
    /// [`get_url`](Self::get_url) returns afterwards.
    pub fn normalize(&mut self) -> &str {
        let normalized = self.build().to_string();
        trace!(input = %self.url, output = %normalized, "normalized URL");
        self.set_url(&normalized);
        &self.url
    }

    fn build(&self) -> UriComponents {
        let c = &self.components;
        let mode = self.config.get_mode();

        let mut out = UriComponents {
            scheme: canonicalize_scheme(&c.scheme),
            user: c.user.clone(),
            pass: c.pass.clone(),
            ..UriComponents::default()
        };

        if !c.host.is_empty() {
            out.host = canonicalize_host(&c.host, mode);
            out.port = canonicalize_port(&out.scheme, &c.port).to_owned();
        }

        out.path = canonicalize_path(&c.path, mode);
        if out.path.is_empty() && !c.is_empty() {
            out.path.push('/');
        }
        // A colon in a path with nothing before it would read as a scheme
        // or port delimiter.
        if out.scheme.is_empty() && out.host.is_empty() && out.path.contains(':') {
            out.path = out.path.replace(':', "%3A");
        }
        // "foo:80/" splits as a host and a port.
        if !out.scheme.is_empty() && out.host.is_empty() && is_port_like(&out.path) {
            let first = pct_enc::encode_byte(out.path.as_bytes()[0]);
            out.path.replace_range(..1, first);
        }

        // Canonical query and fragment carry their own delimiters.
        out.query = canonicalize_query(&c.query, c.had_query_delimiter, &self.config);
        out.fragment = canonicalize_fragment(&c.fragment, c.had_fragment_delimiter, &self.config);
        if let Some(query) = out.query.strip_prefix('?') {
            out.query = query.to_owned();
            out.had_query_delimiter = true;
        }
        if let Some(fragment) = out.fragment.strip_prefix('#') {
            out.fragment = fragment.to_owned();
            out.had_fragment_delimiter = true;
        }
        out
    }
}

/// Normalizes a URI in one call.
///
/// # Errors
///
/// Returns `Err` if the URI cannot be split into components.
///
/// # Examples
///
/// ```
/// use uri_canon::{normalize_str, NormalizationConfig};
///
/// let config = NormalizationConfig::new();
/// assert_eq!(normalize_str("HTTP://www.Example.com", config)?, "http://www.example.com/");
/// assert!(normalize_str("http://:80/", config).is_err());
/// # Ok::<_, uri_canon::ParseError>(())
/// ```
pub fn normalize_str(url: &str, config: NormalizationConfig) -> Result<String, ParseError> {
    let mut normalizer = Normalizer::new(None, config);
    normalizer.try_set_url(url)?;
    Ok(normalizer.normalize().to_owned())
}
