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

use percent_encoding::percent_decode_str;
use std::collections::HashSet;

/// The set of url strings already enqueued or explicitly barred.
///
/// Keys are percent-decoded, so different escapings of the same url
/// collapse to one entry. Host or scheme case is not normalized here;
/// the admission rules compare those case-insensitively themselves.
#[derive(Debug, Default)]
pub struct Blacklist {
    seen: HashSet<String>,
}

impl Blacklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the decoded form. Returns false when it was already
    /// present.
    pub fn add(&mut self, url: &str) -> bool {
        self.seen.insert(unescape(url))
    }

    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(&unescape(url))
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

fn unescape(url: &str) -> String {
    percent_decode_str(url).decode_utf8_lossy().into_owned()
}
