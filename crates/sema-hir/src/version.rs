//! Module versions and the constraint language used to express dependency
//! requirements (`ModuleSpec`).

use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub pre_release: Option<String>,
    pub build_metadata: Option<String>,
}

impl Version {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            pre_release: None,
            build_metadata: None,
        }
    }

    pub fn with_pre_release(mut self, pre: impl Into<String>) -> Self {
        self.pre_release = Some(pre.into());
        self
    }

    pub fn with_build_metadata(mut self, build: impl Into<String>) -> Self {
        self.build_metadata = Some(build.into());
        self
    }

    /// Parses the canonical `M.m.p[-pre][+build]` form.
    pub fn parse(s: &str) -> Option<Version> {
        let (core_and_pre, build_metadata) = match s.split_once('+') {
            Some((head, build)) => (head, Some(build.to_string())),
            None => (s, None),
        };
        let (core, pre_release) = match core_and_pre.split_once('-') {
            Some((head, pre)) => (head, Some(pre.to_string())),
            None => (core_and_pre, None),
        };
        let mut parts = core.split('.');
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next()?.parse().ok()?;
        let patch = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Version {
            major,
            minor,
            patch,
            pre_release,
            build_metadata,
        })
    }

    /// Compares the numeric tuple, then pre-release (lexically, with "no
    /// pre-release" sorting after any pre-release per semver precedence),
    /// and ignores build metadata entirely.
    pub fn compare(&self, other: &Version) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (&self.pre_release, &other.pre_release) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre_release {
            write!(f, "-{pre}")?;
        }
        if let Some(build) = &self.build_metadata {
            write!(f, "+{build}")?;
        }
        Ok(())
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}
impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOp {
    Gte,
    Lt,
    Eq,
    Caret,
    Tilde,
}

#[derive(Debug, Clone)]
pub struct VersionClause {
    pub op: ConstraintOp,
    pub version: Version,
}

/// A conjunction of version clauses, e.g. `>=1.2.0, <2.0.0`.
#[derive(Debug, Clone, Default)]
pub struct VersionConstraint {
    pub clauses: Vec<VersionClause>,
}

impl VersionConstraint {
    pub fn matches(&self, candidate: &Version) -> bool {
        self.clauses.iter().all(|clause| match clause.op {
            ConstraintOp::Gte => candidate.compare(&clause.version) != Ordering::Less,
            ConstraintOp::Lt => candidate.compare(&clause.version) == Ordering::Less,
            ConstraintOp::Eq => candidate.compare(&clause.version) == Ordering::Equal,
            ConstraintOp::Caret => {
                candidate.major == clause.version.major
                    && candidate.compare(&clause.version) != Ordering::Less
            }
            ConstraintOp::Tilde => {
                candidate.major == clause.version.major
                    && candidate.minor == clause.version.minor
                    && candidate.compare(&clause.version) != Ordering::Less
            }
        })
    }
}

/// A dependency requirement: a module path plus an optional version and an
/// optional constraint narrowing which versions satisfy it.
#[derive(Debug, Clone)]
pub struct ModuleSpec {
    pub path: String,
    pub version: Option<Version>,
    pub version_constraint: Option<VersionConstraint>,
}

impl ModuleSpec {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            version: None,
            version_constraint: None,
        }
    }
}
