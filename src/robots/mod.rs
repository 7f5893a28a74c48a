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

mod cached;
mod registry;

pub use cached::CachedRobots;
pub use registry::RobotsRegistry;

use camino::Utf8PathBuf;

/// A robots.txt body as handed back by the retrieval collaborator.
#[derive(Debug, Clone)]
pub struct RetrievedRobotsTxt {
    /// Where the body was stored.
    pub file: Utf8PathBuf,
    /// The path is a scratch location and must be removed once parsed.
    pub transient: bool,
}
