// Copyright 2024 Felix Engl
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use strum::EnumString;
use ubyte::ByteUnit;

/// The settings of a single recursive retrieval.
#[derive(Debug, Clone, Deserialize, Serialize, Eq, PartialEq)]
#[serde(default)]
pub struct CrawlConfig {
    /// How deep to follow links, counted from the seed. (default: 5 levels)
    pub reclevel: RecursionDepth,
    /// Also fetch the resources a page inlines (images, stylesheets,
    /// scripts), allowing them to exceed the depth bound. (default: false)
    pub page_requisites: bool,
    /// Follow only links that were written relative. (default: false)
    pub relative_only: bool,
    /// Refuse to follow anything that is not HTTPS. (default: false)
    pub https_only: bool,
    /// Recurse into FTP/FTPS links. (default: false)
    pub follow_ftp: bool,
    /// Never ascend above the seed directory. (default: false)
    pub no_parent: bool,
    /// Follow links onto other hosts. (default: false)
    pub span_hosts: bool,
    /// Honor robots.txt and nofollow hints. (default: true)
    pub use_robots: bool,
    /// Only check that pages exist, report visits, keep nothing. (default: false)
    pub spider: bool,
    /// Delete every body right after downloading it. (default: false)
    pub delete_after: bool,

    /// Directories to stay inside of, if any are given.
    pub includes: Vec<String>,
    /// Directories never to enter.
    pub excludes: Vec<String>,
    /// File names to accept: plain suffixes or shell-style globs.
    pub accept: Vec<String>,
    /// File names to reject: plain suffixes or shell-style globs.
    pub reject: Vec<String>,
    /// Urls must match this regex, when set.
    pub accept_regex: Option<String>,
    /// Urls must not match this regex, when set.
    pub reject_regex: Option<String>,
    /// Hosts must tail-match one of these domains, when any are given.
    pub domains: Vec<String>,
    /// Hosts tail-matching one of these domains are never followed.
    pub exclude_domains: Vec<String>,

    /// Stop the crawl once this many bytes were downloaded. (default: unbounded)
    pub quota: Option<ByteUnit>,
    /// Write a tab-separated audit trail of rejected urls to this path.
    pub rejected_log: Option<Utf8PathBuf>,
    /// Locale tag shown in diagnostics; has no effect on behavior.
    pub locale: Option<String>,
    /// Agent name matched against robots.txt groups.
    pub user_agent: UserAgent,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            reclevel: RecursionDepth::default(),
            page_requisites: false,
            relative_only: false,
            https_only: false,
            follow_ftp: false,
            no_parent: false,
            span_hosts: false,
            use_robots: true,
            spider: false,
            delete_after: false,
            includes: Vec::new(),
            excludes: Vec::new(),
            accept: Vec::new(),
            reject: Vec::new(),
            accept_regex: None,
            reject_regex: None,
            domains: Vec::new(),
            exclude_domains: Vec::new(),
            quota: None,
            rejected_log: None,
            locale: None,
            user_agent: UserAgent::default(),
        }
    }
}

/// The depth bound of a crawl.
///
/// `Limit(n)` allows following links up to `n` hops from the seed;
/// page requisites may exceed the bound by up to two extra levels (one
/// for the inline requisites of a boundary page, one more for the
/// framesets of those requisites).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum RecursionDepth {
    Infinite,
    Limit(u64),
}

impl RecursionDepth {
    pub fn is_infinite(self) -> bool {
        matches!(self, Self::Infinite)
    }

    /// True when an item at `depth` sits at or past the bound, so its
    /// children would overstep it.
    pub fn exceeded_by(self, depth: u64) -> bool {
        match self {
            Self::Infinite => false,
            Self::Limit(limit) => depth >= limit,
        }
    }

    /// The two pseudo-levels page requisites are allowed to borrow
    /// beyond the bound.
    pub fn in_requisites_window(self, depth: u64) -> bool {
        match self {
            Self::Infinite => false,
            Self::Limit(limit) => depth == limit || depth == limit + 1,
        }
    }

    /// True when an HTML body found at `depth` can still have its own
    /// links followed, making it non-leaf.
    pub fn non_leaf_at(self, depth: u64) -> bool {
        match self {
            Self::Infinite => true,
            Self::Limit(limit) => depth + 1 < limit,
        }
    }
}

impl Default for RecursionDepth {
    fn default() -> Self {
        Self::Limit(5)
    }
}

impl Display for RecursionDepth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Infinite => f.write_str("inf"),
            Self::Limit(limit) => write!(f, "{limit}"),
        }
    }
}

/// The agent name presented to robots.txt matching.
#[derive(Debug, Default, Clone, Deserialize, Serialize, EnumString, Eq, PartialEq)]
pub enum UserAgent {
    #[default]
    #[strum(ascii_case_insensitive = true)]
    Default,
    #[strum(default)]
    Custom(String),
}

impl UserAgent {
    const DEFAULT_AGENT: &'static str = env!("CARGO_PKG_NAME");

    pub fn agent(&self) -> &str {
        match self {
            UserAgent::Default => Self::DEFAULT_AGENT,
            UserAgent::Custom(agent) => agent,
        }
    }
}

impl AsRef<str> for UserAgent {
    fn as_ref(&self) -> &str {
        self.agent()
    }
}

#[cfg(test)]
mod test {
    use super::{CrawlConfig, RecursionDepth, UserAgent};
    use ubyte::ToByteUnit;

    #[test]
    fn defaults_follow_the_classic_tool() {
        let config = CrawlConfig::default();
        assert_eq!(config.reclevel, RecursionDepth::Limit(5));
        assert!(config.use_robots);
        assert!(!config.page_requisites);
        assert!(!config.span_hosts);
        assert!(config.quota.is_none());
    }

    #[test]
    fn can_serialize_roundtrip() {
        let mut config = CrawlConfig::default();
        config.reclevel = RecursionDepth::Infinite;
        config.quota = Some(2.mebibytes());
        config.accept = vec![".html".to_string()];
        config.user_agent = UserAgent::Custom("mirrorbot".to_string());
        let data = serde_json::to_string(&config).expect("Why?");
        let deser: CrawlConfig = serde_json::from_str(&data).expect("Why?");
        assert_eq!(config, deser);
    }

    #[test]
    fn depth_bound_comparisons() {
        let bound = RecursionDepth::Limit(2);
        assert!(!bound.exceeded_by(1));
        assert!(bound.exceeded_by(2));
        assert!(bound.exceeded_by(3));
        assert!(bound.in_requisites_window(2));
        assert!(bound.in_requisites_window(3));
        assert!(!bound.in_requisites_window(4));
        assert!(bound.non_leaf_at(0));
        assert!(!bound.non_leaf_at(1));
    }

    #[test]
    fn zero_depth_bound_does_not_underflow() {
        let bound = RecursionDepth::Limit(0);
        assert!(bound.exceeded_by(0));
        assert!(!bound.non_leaf_at(0));
        assert!(bound.in_requisites_window(0));
        assert!(bound.in_requisites_window(1));
    }

    #[test]
    fn infinite_depth_never_bounds() {
        let depth = RecursionDepth::Infinite;
        assert!(!depth.exceeded_by(u64::MAX));
        assert!(depth.non_leaf_at(u64::MAX));
        assert!(!depth.in_requisites_window(5));
    }

    #[test]
    fn user_agent_tokens() {
        assert_eq!(UserAgent::Default.agent(), "webmirror");
        assert_eq!(
            UserAgent::Custom("botling".to_string()).agent(),
            "botling"
        );
    }
}
