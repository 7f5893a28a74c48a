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

//! The contract of the external, blocking fetcher.

use camino::Utf8PathBuf;

/// Terminal state of one retrieval.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FetchStatus {
    Success,
    /// The url could not be retrieved; the crawl goes on without it.
    Failure,
    /// Writing to local storage failed; the crawl must stop.
    FatalWriteError,
}

/// Content classification of a retrieved body.
#[derive(Debug, Copy, Clone, Default)]
pub struct DocumentFlags {
    /// The retrieval itself went through (the body is usable).
    pub retrieval_ok: bool,
    /// Served as HTML.
    pub is_html: bool,
    /// Served as CSS.
    pub is_css: bool,
}

/// Everything the fetcher reports back for one url.
#[derive(Debug, Default)]
pub struct FetchResult {
    pub status: FetchStatus,
    /// Where the body was stored, when one was stored.
    pub file: Option<Utf8PathBuf>,
    /// The final url after any redirect chain, when it differs from
    /// the requested one.
    pub redirected: Option<String>,
    pub flags: DocumentFlags,
}

impl FetchResult {
    pub fn failure() -> Self {
        Self {
            status: FetchStatus::Failure,
            ..Self::default()
        }
    }
}

impl Default for FetchStatus {
    fn default() -> Self {
        Self::Failure
    }
}
