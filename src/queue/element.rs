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

use crate::url::CrawlUrl;
use std::fmt::{Display, Formatter};

/// An entry of the url queue.
///
/// Owns its url and referer for the lifetime of the crawl step. The two
/// hints record whether a successfully downloaded body may be treated
/// as HTML respectively CSS for link extraction.
#[derive(Debug, Clone)]
pub struct UrlQueueElement {
    /// The url to download.
    pub url: CrawlUrl,
    /// The referring document, credentials already stripped.
    pub referer: Option<String>,
    /// Link distance from the seed; the seed itself is 0.
    pub depth: u64,
    pub html_allowed: bool,
    pub css_allowed: bool,
}

impl UrlQueueElement {
    pub fn new(
        url: CrawlUrl,
        referer: Option<String>,
        depth: u64,
        html_allowed: bool,
        css_allowed: bool,
    ) -> Self {
        Self {
            url,
            referer,
            depth,
            html_allowed,
            css_allowed,
        }
    }
}

impl Display for UrlQueueElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "QueueElement(url: {}, depth: {}, html: {}, css: {})",
            self.url, self.depth, self.html_allowed, self.css_allowed
        )
    }
}

impl AsRef<CrawlUrl> for UrlQueueElement {
    fn as_ref(&self) -> &CrawlUrl {
        &self.url
    }
}
