use crate::{component::Scheme, config::Mode, Normalizer, UriComponents};
use std::fmt::{self, Write};

impl fmt::Debug for Scheme {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for Scheme {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl fmt::Debug for UriComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UriComponents")
            .field("scheme", &self.scheme)
            .field("user", &self.user)
            .field("pass", &self.pass)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("fragment", &self.fragment)
            .field("had_query_delimiter", &self.had_query_delimiter)
            .field("had_fragment_delimiter", &self.had_fragment_delimiter)
            .finish()
    }
}

impl fmt::Display for UriComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.scheme.is_empty() {
            f.write_str(&self.scheme)?;
            f.write_char(':')?;
        }
        if !self.host.is_empty() {
            f.write_str("//")?;
            if !self.user.is_empty() {
                f.write_str(&self.user)?;
                if !self.pass.is_empty() {
                    f.write_char(':')?;
                    f.write_str(&self.pass)?;
                }
                f.write_char('@')?;
            }
            f.write_str(&self.host)?;
            if !self.port.is_empty() {
                f.write_char(':')?;
                f.write_str(&self.port)?;
            }
        }
        f.write_str(&self.path)?;
        if self.had_query_delimiter || !self.query.is_empty() {
            f.write_char('?')?;
            f.write_str(&self.query)?;
        }
        if self.had_fragment_delimiter || !self.fragment.is_empty() {
            f.write_char('#')?;
            f.write_str(&self.fragment)?;
        }
        Ok(())
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Normalizer {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.get_url(), f)
    }
}
