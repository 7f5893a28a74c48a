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

//! The accept/reject rule sets of a crawl, compiled once from the
//! configuration and then read-only.

use crate::config::CrawlConfig;
use crate::url::is_subdirectory;
use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("invalid pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A file-name pattern. Patterns carrying glob metacharacters match the
/// whole name; anything else is a plain suffix.
#[derive(Debug, Clone)]
enum NamePattern {
    Suffix(String),
    Glob(Regex),
}

impl NamePattern {
    fn compile(pattern: &str) -> Result<Self, RulesError> {
        if has_wildcards(pattern) {
            Ok(Self::Glob(glob_to_regex(pattern)?))
        } else {
            Ok(Self::Suffix(pattern.to_string()))
        }
    }

    fn matches(&self, name: &str) -> bool {
        match self {
            Self::Suffix(suffix) => name.ends_with(suffix.as_str()),
            Self::Glob(glob) => glob.is_match(name),
        }
    }
}

/// A directory pattern. Plain patterns match the named directory and
/// everything below it; glob patterns match the whole directory string.
#[derive(Debug, Clone)]
enum DirPattern {
    Plain(String),
    Glob(Regex),
}

impl DirPattern {
    fn compile(pattern: &str) -> Result<Self, RulesError> {
        let trimmed = pattern.strip_prefix('/').unwrap_or(pattern);
        if has_wildcards(trimmed) {
            Ok(Self::Glob(glob_to_regex(trimmed)?))
        } else {
            Ok(Self::Plain(trimmed.to_string()))
        }
    }

    fn matches(&self, dir: &str) -> bool {
        match self {
            Self::Plain(prefix) => is_subdirectory(prefix, dir),
            Self::Glob(glob) => glob.is_match(dir),
        }
    }
}

/// All configured admission rule sets in compiled form.
#[derive(Debug, Default)]
pub struct DownloadRules {
    domains: Vec<String>,
    exclude_domains: Vec<String>,
    includes: Vec<DirPattern>,
    excludes: Vec<DirPattern>,
    accept: Vec<NamePattern>,
    reject: Vec<NamePattern>,
    accept_re: Option<Regex>,
    reject_re: Option<Regex>,
}

impl DownloadRules {
    pub fn from_config(config: &CrawlConfig) -> Result<Self, RulesError> {
        Ok(Self {
            domains: config
                .domains
                .iter()
                .map(|d| d.to_ascii_lowercase())
                .collect(),
            exclude_domains: config
                .exclude_domains
                .iter()
                .map(|d| d.to_ascii_lowercase())
                .collect(),
            includes: compile_all(&config.includes, DirPattern::compile)?,
            excludes: compile_all(&config.excludes, DirPattern::compile)?,
            accept: compile_all(&config.accept, NamePattern::compile)?,
            reject: compile_all(&config.reject, NamePattern::compile)?,
            accept_re: compile_optional(config.accept_regex.as_deref())?,
            reject_re: compile_optional(config.reject_regex.as_deref())?,
        })
    }

    /// Domain admission: the host must tail-match an accepted domain
    /// when an accept list is configured, and must not match any
    /// excluded domain.
    pub fn accept_domain(&self, host: &str) -> bool {
        if !self.domains.is_empty()
            && !self.domains.iter().any(|d| domain_tail_match(host, d))
        {
            return false;
        }
        !self
            .exclude_domains
            .iter()
            .any(|d| domain_tail_match(host, d))
    }

    pub fn has_directory_rules(&self) -> bool {
        !self.includes.is_empty() || !self.excludes.is_empty()
    }

    /// Directory admission against the include/exclude lists.
    pub fn accept_directory(&self, dir: &str) -> bool {
        if !self.includes.is_empty() && !self.includes.iter().any(|p| p.matches(dir)) {
            return false;
        }
        !self.excludes.iter().any(|p| p.matches(dir))
    }

    /// Whole-url admission against the accept/reject regexes.
    pub fn accept_url(&self, url: &str) -> bool {
        if let Some(accept) = &self.accept_re {
            if !accept.is_match(url) {
                return false;
            }
        }
        match &self.reject_re {
            Some(reject) => !reject.is_match(url),
            None => true,
        }
    }

    /// File-name admission against the suffix/wildcard lists.
    pub fn acceptable(&self, file: &str) -> bool {
        if !self.accept.is_empty() && !self.accept.iter().any(|p| p.matches(file)) {
            return false;
        }
        !self.reject.iter().any(|p| p.matches(file))
    }
}

/// Whether the file name carries a suffix this crawler will parse as
/// HTML.
pub fn has_html_suffix(file: &str) -> bool {
    match file.rsplit_once('.') {
        Some((_, suffix)) => {
            suffix.eq_ignore_ascii_case("html")
                || suffix.eq_ignore_ascii_case("htm")
                || suffix.eq_ignore_ascii_case("xhtml")
        }
        None => false,
    }
}

fn compile_all<T>(
    patterns: &[String],
    compile: impl Fn(&str) -> Result<T, RulesError>,
) -> Result<Vec<T>, RulesError> {
    patterns.iter().map(|p| compile(p)).collect()
}

fn compile_optional(pattern: Option<&str>) -> Result<Option<Regex>, RulesError> {
    match pattern {
        Some(pattern) => Regex::new(pattern)
            .map(Some)
            .map_err(|source| RulesError::Pattern {
                pattern: pattern.to_string(),
                source,
            }),
        None => Ok(None),
    }
}

fn has_wildcards(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Translates a shell-style glob into an anchored regex. Character
/// classes are passed through, `!` negation becomes `^`.
fn glob_to_regex(pattern: &str) -> Result<Regex, RulesError> {
    let mut translated = String::with_capacity(pattern.len() + 8);
    translated.push('^');
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => translated.push_str(".*"),
            '?' => translated.push('.'),
            '[' => {
                translated.push('[');
                if chars.peek() == Some(&'!') {
                    chars.next();
                    translated.push('^');
                }
                for inner in chars.by_ref() {
                    translated.push(inner);
                    if inner == ']' {
                        break;
                    }
                }
            }
            other => translated.push_str(regex::escape(other.encode_utf8(&mut [0; 4])).as_str()),
        }
    }
    translated.push('$');
    Regex::new(&translated).map_err(|source| RulesError::Pattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Case-insensitive suffix match on a dot boundary: `example.com`
/// covers `www.example.com` but not `badexample.com`.
fn domain_tail_match(host: &str, domain: &str) -> bool {
    if domain.is_empty() {
        return false;
    }
    let host = host.to_ascii_lowercase();
    if host == *domain {
        return true;
    }
    match host.strip_suffix(domain) {
        Some(head) => domain.starts_with('.') || head.ends_with('.'),
        None => false,
    }
}
