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

use crate::config::CrawlConfig;
use crate::extraction::{ExtractedLink, HtmlExtraction};
use crate::fetching::FetchResult;
use crate::robots::RetrievedRobotsTxt;
use crate::rules::DownloadRules;
use crate::url::CrawlUrl;
use camino::{Utf8Path, Utf8PathBuf};

/// A marker interface for applying the blanket [`super::Context`] impl
/// iff appropriate.
pub trait ContextDelegate {}

pub trait SupportsConfigs {
    fn config(&self) -> &CrawlConfig;

    /// The rule sets compiled from the configuration.
    fn rules(&self) -> &DownloadRules;
}

/// The blocking fetcher. One retrieval is in flight at a time.
pub trait SupportsFetching {
    fn retrieve(&mut self, url: &CrawlUrl, referer: Option<&str>) -> FetchResult;

    /// Bytes downloaded so far across the whole crawl, for quota
    /// accounting.
    fn total_downloaded_bytes(&self) -> u64;
}

/// The external HTML and CSS link extractors.
pub trait SupportsLinkExtraction {
    fn get_urls_html(&mut self, file: &Utf8Path, base: &CrawlUrl) -> HtmlExtraction;

    fn get_urls_css(&mut self, file: &Utf8Path, base: &CrawlUrl) -> Vec<ExtractedLink>;
}

/// Retrieval of robots.txt bodies. Parsing and caching happen inside
/// this crate; only the download is delegated.
pub trait SupportsRobotsTxt {
    /// Fetches the robots.txt governing `url`. `None` means it could
    /// not be retrieved; the caller installs a permissive dummy entry.
    fn retrieve_robots_txt(&mut self, url: &CrawlUrl) -> Option<RetrievedRobotsTxt>;
}

/// Read-only views of what earlier retrievals already produced.
pub trait SupportsDownloadRecords {
    /// The local file a url was already downloaded to, if any.
    fn downloaded_file_for(&self, url: &str) -> Option<Utf8PathBuf>;

    fn is_downloaded_html(&self, file: &Utf8Path) -> bool;

    fn is_downloaded_css(&self, file: &Utf8Path) -> bool;
}

/// Visit reporting in spider mode.
pub trait SupportsSpiderEvents {
    fn visited_url(&mut self, url: &str, referer: Option<&str>);
}

/// Local file disposal after a body served its purpose.
pub trait SupportsFileCleanup {
    fn unlink(&mut self, file: &Utf8Path) -> std::io::Result<()>;

    /// Records that `file` was deliberately removed so later phases do
    /// not look for it.
    fn register_delete_file(&mut self, file: &Utf8Path);
}
