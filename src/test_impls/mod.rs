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

//! In-memory collaborators for the test suite: a scripted site map, a
//! recording fetcher, and counting robots retrieval.

use crate::config::CrawlConfig;
use crate::context::{
    ContextDelegate, SupportsConfigs, SupportsDownloadRecords, SupportsFetching,
    SupportsFileCleanup, SupportsLinkExtraction, SupportsRobotsTxt, SupportsSpiderEvents,
};
use crate::extraction::{ExtractedLink, HtmlExtraction};
use crate::fetching::{DocumentFlags, FetchResult, FetchStatus};
use crate::robots::RetrievedRobotsTxt;
use crate::rules::DownloadRules;
use crate::url::CrawlUrl;
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::{HashMap, HashSet};

/// A link that is expected to resolve to an HTML page.
pub fn html_link(url: &str) -> ExtractedLink {
    let mut link = link(url);
    link.expects_html = true;
    link
}

/// A bare link record with all flags off.
pub fn link(url: &str) -> ExtractedLink {
    ExtractedLink::new(CrawlUrl::parse(url).unwrap())
}

/// What the scripted site serves for one url.
#[derive(Debug, Clone)]
pub struct PageSpec {
    pub status: FetchStatus,
    pub flags: DocumentFlags,
    pub redirect: Option<String>,
    pub links: Vec<ExtractedLink>,
    pub meta_nofollow: bool,
    pub size: u64,
}

impl PageSpec {
    pub fn html(links: Vec<ExtractedLink>) -> Self {
        Self {
            status: FetchStatus::Success,
            flags: DocumentFlags {
                retrieval_ok: true,
                is_html: true,
                is_css: false,
            },
            redirect: None,
            links,
            meta_nofollow: false,
            size: 100,
        }
    }

    pub fn css(links: Vec<ExtractedLink>) -> Self {
        Self {
            flags: DocumentFlags {
                retrieval_ok: true,
                is_html: false,
                is_css: true,
            },
            ..Self::html(links)
        }
    }

    pub fn redirect_to(target: &str) -> Self {
        Self {
            redirect: Some(target.to_string()),
            ..Self::html(Vec::new())
        }
    }

    pub fn broken() -> Self {
        Self {
            status: FetchStatus::Failure,
            flags: DocumentFlags::default(),
            redirect: None,
            links: Vec::new(),
            meta_nofollow: false,
            size: 0,
        }
    }

    pub fn write_error() -> Self {
        Self {
            status: FetchStatus::FatalWriteError,
            ..Self::broken()
        }
    }

    pub fn sized(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    pub fn nofollow(mut self) -> Self {
        self.meta_nofollow = true;
        self
    }
}

/// Scripted context backing the crawl tests.
pub struct TestContext {
    pub config: CrawlConfig,
    rules: DownloadRules,
    pub pages: HashMap<String, PageSpec>,

    /// Urls handed to the fetcher, in order.
    pub fetched: Vec<String>,
    /// Referers handed to the fetcher, in fetch order.
    pub referers: Vec<Option<String>>,
    bytes: u64,
    url_to_file: HashMap<String, Utf8PathBuf>,
    file_to_url: HashMap<Utf8PathBuf, String>,
    next_file: usize,

    robots_bodies: HashMap<String, String>,
    robots_transient: bool,
    robots_calls: usize,

    pub dl_url_file_map: HashMap<String, Utf8PathBuf>,
    pub downloaded_html: HashSet<Utf8PathBuf>,
    pub downloaded_css: HashSet<Utf8PathBuf>,

    pub visited: Vec<(String, Option<String>)>,
    pub unlinked: Vec<Utf8PathBuf>,
    pub registered_deletes: Vec<Utf8PathBuf>,

    temp: tempfile::TempDir,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new(CrawlConfig::default())
    }
}

impl TestContext {
    pub fn new(config: CrawlConfig) -> Self {
        let rules = DownloadRules::from_config(&config).unwrap();
        Self {
            config,
            rules,
            pages: HashMap::new(),
            fetched: Vec::new(),
            referers: Vec::new(),
            bytes: 0,
            url_to_file: HashMap::new(),
            file_to_url: HashMap::new(),
            next_file: 0,
            robots_bodies: HashMap::new(),
            robots_transient: false,
            robots_calls: 0,
            dl_url_file_map: HashMap::new(),
            downloaded_html: HashSet::new(),
            downloaded_css: HashSet::new(),
            visited: Vec::new(),
            unlinked: Vec::new(),
            registered_deletes: Vec::new(),
            temp: tempfile::tempdir().unwrap(),
        }
    }

    pub fn with_config(mutate: impl FnOnce(&mut CrawlConfig)) -> Self {
        let mut config = CrawlConfig::default();
        mutate(&mut config);
        Self::new(config)
    }

    pub fn page(&mut self, url: &str, spec: PageSpec) -> &mut Self {
        self.pages.insert(url.to_string(), spec);
        self
    }

    /// Installs a robots.txt body for a `"host:port"` origin.
    pub fn set_robots(&mut self, origin: &str, body: &str) {
        self.robots_bodies.insert(origin.to_string(), body.to_string());
    }

    pub fn set_robots_transient(&mut self, transient: bool) {
        self.robots_transient = transient;
    }

    pub fn robots_retrievals(&self) -> usize {
        self.robots_calls
    }

    /// Marks `url` as already downloaded HTML so the crawl reuses the
    /// recorded file instead of fetching.
    pub fn record_downloaded_html(&mut self, url: &str, links: Vec<ExtractedLink>) {
        let file = self.allocate_file(url);
        self.dl_url_file_map.insert(url.to_string(), file.clone());
        self.downloaded_html.insert(file);
        self.pages.insert(url.to_string(), PageSpec::html(links));
    }

    fn allocate_file(&mut self, url: &str) -> Utf8PathBuf {
        if let Some(existing) = self.url_to_file.get(url) {
            return existing.clone();
        }
        let parsed = CrawlUrl::parse(url).unwrap();
        let name = match parsed.file_name() {
            name if name.is_empty() => "index.html".to_string(),
            name => name,
        };
        let dir = Utf8Path::from_path(self.temp.path()).unwrap();
        let file = dir.join(format!("f{}_{name}", self.next_file));
        self.next_file += 1;
        self.url_to_file.insert(url.to_string(), file.clone());
        self.file_to_url.insert(file.clone(), url.to_string());
        file
    }
}

impl ContextDelegate for TestContext {}

impl SupportsConfigs for TestContext {
    fn config(&self) -> &CrawlConfig {
        &self.config
    }

    fn rules(&self) -> &DownloadRules {
        &self.rules
    }
}

impl SupportsFetching for TestContext {
    fn retrieve(&mut self, url: &CrawlUrl, referer: Option<&str>) -> FetchResult {
        self.fetched.push(url.as_str().to_string());
        self.referers.push(referer.map(str::to_string));
        let Some(spec) = self.pages.get(url.as_str()).cloned() else {
            return FetchResult::failure();
        };
        if spec.status != FetchStatus::Success {
            return FetchResult {
                status: spec.status,
                ..FetchResult::default()
            };
        }
        self.bytes += spec.size;
        FetchResult {
            status: spec.status,
            file: Some(self.allocate_file(url.as_str())),
            redirected: spec.redirect.clone(),
            flags: spec.flags,
        }
    }

    fn total_downloaded_bytes(&self) -> u64 {
        self.bytes
    }
}

impl SupportsLinkExtraction for TestContext {
    fn get_urls_html(&mut self, file: &Utf8Path, _base: &CrawlUrl) -> HtmlExtraction {
        let Some(url) = self.file_to_url.get(file) else {
            return HtmlExtraction::default();
        };
        match self.pages.get(url) {
            Some(spec) => HtmlExtraction {
                links: spec.links.clone(),
                meta_nofollow: spec.meta_nofollow,
            },
            None => HtmlExtraction::default(),
        }
    }

    fn get_urls_css(&mut self, file: &Utf8Path, _base: &CrawlUrl) -> Vec<ExtractedLink> {
        let Some(url) = self.file_to_url.get(file) else {
            return Vec::new();
        };
        self.pages
            .get(url)
            .map(|spec| spec.links.clone())
            .unwrap_or_default()
    }
}

impl SupportsRobotsTxt for TestContext {
    fn retrieve_robots_txt(&mut self, url: &CrawlUrl) -> Option<RetrievedRobotsTxt> {
        self.robots_calls += 1;
        let origin = format!("{}:{}", url.host(), url.port());
        let body = self.robots_bodies.get(&origin)?.clone();
        let dir = Utf8Path::from_path(self.temp.path()).unwrap();
        let file = dir.join(format!("robots{}.txt", self.robots_calls));
        std::fs::write(file.as_std_path(), body).unwrap();
        Some(RetrievedRobotsTxt {
            file,
            transient: self.robots_transient,
        })
    }
}

impl SupportsDownloadRecords for TestContext {
    fn downloaded_file_for(&self, url: &str) -> Option<Utf8PathBuf> {
        self.dl_url_file_map.get(url).cloned()
    }

    fn is_downloaded_html(&self, file: &Utf8Path) -> bool {
        self.downloaded_html.contains(file)
    }

    fn is_downloaded_css(&self, file: &Utf8Path) -> bool {
        self.downloaded_css.contains(file)
    }
}

impl SupportsSpiderEvents for TestContext {
    fn visited_url(&mut self, url: &str, referer: Option<&str>) {
        self.visited.push((url.to_string(), referer.map(str::to_string)));
    }
}

impl SupportsFileCleanup for TestContext {
    fn unlink(&mut self, file: &Utf8Path) -> std::io::Result<()> {
        self.unlinked.push(file.to_path_buf());
        if file.as_std_path().exists() {
            std::fs::remove_file(file.as_std_path())
        } else {
            Ok(())
        }
    }

    fn register_delete_file(&mut self, file: &Utf8Path) {
        self.registered_deletes.push(file.to_path_buf());
    }
}
