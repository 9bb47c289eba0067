//! Fetch refspecs of the form `[+]<src>:<dst>`
//!
//! Each side is either an exact ref name or a pattern with a single `*`,
//! e.g. `+refs/heads/*:refs/remotes/origin/*`.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Matches remote ref names against a fetch pattern and maps them to local names.
pub trait RefspecMatcher {
    /// Whether `name` falls under the source side of the pattern.
    fn matches_source(&self, name: &str) -> Result<bool>;

    /// Map a matching remote ref name to its local counterpart.
    fn transform_to_destination(&self, name: &str) -> Result<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refspec {
    force: bool,
    src: String,
    dst: String,
}

impl Refspec {
    pub fn parse(spec: &str) -> Result<Self> {
        let (force, rest) = match spec.strip_prefix('+') {
            Some(rest) => (true, rest),
            None => (false, spec),
        };
        let (src, dst) = rest
            .split_once(':')
            .ok_or_else(|| Error::configuration(format!("refspec '{}' has no destination", spec)))?;

        if src.is_empty() || dst.is_empty() {
            return Err(Error::configuration(format!(
                "refspec '{}' has an empty side",
                spec
            )));
        }
        let globs = (src.matches('*').count(), dst.matches('*').count());
        match globs {
            (0, 0) | (1, 1) => {}
            _ => {
                return Err(Error::configuration(format!(
                    "refspec '{}' must use a single '*' on both sides or none",
                    spec
                )))
            }
        }

        Ok(Refspec {
            force,
            src: src.to_string(),
            dst: dst.to_string(),
        })
    }

    pub fn is_force(&self) -> bool {
        self.force
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn dst(&self) -> &str {
        &self.dst
    }

    /// The part of `name` covered by the source glob, if it matches.
    fn capture<'a>(&self, name: &'a str) -> Option<&'a str> {
        match self.src.split_once('*') {
            None => (name == self.src).then_some(""),
            Some((prefix, suffix)) => name
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_suffix(suffix)),
        }
    }
}

impl RefspecMatcher for Refspec {
    fn matches_source(&self, name: &str) -> Result<bool> {
        Ok(self.capture(name).is_some())
    }

    fn transform_to_destination(&self, name: &str) -> Result<String> {
        let captured = self.capture(name).ok_or_else(|| Error::no_match(name))?;
        match self.dst.split_once('*') {
            None => Ok(self.dst.clone()),
            Some((prefix, suffix)) => {
                let mut local = String::with_capacity(prefix.len() + captured.len() + suffix.len());
                local.push_str(prefix);
                local.push_str(captured);
                local.push_str(suffix);
                Ok(local)
            }
        }
    }
}

impl FromStr for Refspec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Refspec::parse(s)
    }
}

impl fmt::Display for Refspec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.force {
            f.write_str("+")?;
        }
        write!(f, "{}:{}", self.src, self.dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_glob() {
        let spec: Refspec = "+refs/heads/*:refs/remotes/origin/*".parse().unwrap();
        assert!(spec.is_force());
        assert_eq!(spec.src(), "refs/heads/*");
        assert_eq!(spec.dst(), "refs/remotes/origin/*");
        assert_eq!(spec.to_string(), "+refs/heads/*:refs/remotes/origin/*");
    }

    #[test]
    fn test_glob_match_and_transform() {
        let spec = Refspec::parse("refs/heads/*:refs/remotes/origin/*").unwrap();

        assert!(spec.matches_source("refs/heads/main").unwrap());
        assert!(spec.matches_source("refs/heads/feature/deep/name").unwrap());
        assert!(!spec.matches_source("refs/tags/v1.0").unwrap());
        assert_eq!(
            spec.transform_to_destination("refs/heads/feature/deep/name").unwrap(),
            "refs/remotes/origin/feature/deep/name"
        );
    }

    #[test]
    fn test_long_names_are_not_truncated() {
        let spec = Refspec::parse("refs/heads/*:refs/remotes/origin/*").unwrap();
        let branch = "x".repeat(4096);
        let local = spec
            .transform_to_destination(&format!("refs/heads/{}", branch))
            .unwrap();
        assert_eq!(local, format!("refs/remotes/origin/{}", branch));
    }

    #[test]
    fn test_exact_refspec() {
        let spec = Refspec::parse("refs/heads/main:refs/remotes/origin/main").unwrap();

        assert!(spec.matches_source("refs/heads/main").unwrap());
        assert!(!spec.matches_source("refs/heads/main2").unwrap());
        assert_eq!(
            spec.transform_to_destination("refs/heads/main").unwrap(),
            "refs/remotes/origin/main"
        );
    }

    #[test]
    fn test_transform_of_non_matching_name() {
        let spec = Refspec::parse("refs/heads/*:refs/remotes/origin/*").unwrap();
        let err = spec.transform_to_destination("refs/tags/v1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoMatch);
    }

    #[test]
    fn test_invalid_refspecs() {
        for spec in [
            "refs/heads/*",
            ":refs/remotes/origin/*",
            "refs/heads/*:refs/remotes/origin/main",
            "refs/heads/*/*:refs/remotes/*/*",
        ] {
            let err = Refspec::parse(spec).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Configuration, "{}", spec);
        }
    }
}
