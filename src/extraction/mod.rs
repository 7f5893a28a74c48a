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

//! Child-link records as produced by the external HTML and CSS
//! extractors.

use crate::url::CrawlUrl;

/// One link found in a downloaded body.
#[derive(Debug, Clone)]
pub struct ExtractedLink {
    pub url: CrawlUrl,
    /// The link was written relative in the source document.
    pub relative: bool,
    /// The link is inlined by the page (image, stylesheet, script),
    /// needed to render it.
    pub inline: bool,
    /// The target is expected to be HTML.
    pub expects_html: bool,
    /// The target is expected to be CSS.
    pub expects_css: bool,
    /// The extractor asked for this link to be skipped when
    /// downloading (e.g. a `<base>` href).
    pub ignore_when_downloading: bool,
}

impl ExtractedLink {
    pub fn new(url: CrawlUrl) -> Self {
        Self {
            url,
            relative: false,
            inline: false,
            expects_html: false,
            expects_css: false,
            ignore_when_downloading: false,
        }
    }
}

/// What the HTML extractor returns: the links plus whether the page
/// carried a `<meta name="robots" content="nofollow">` hint.
#[derive(Debug, Default)]
pub struct HtmlExtraction {
    pub links: Vec<ExtractedLink>,
    pub meta_nofollow: bool,
}
