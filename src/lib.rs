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

//! Breadth-first recursive retrieval core.
//!
//! Starting from a seed url the crawl loop downloads each reachable
//! resource, extracts linked resources from HTML and CSS bodies and
//! enqueues the children that survive the admission rules. Fetching,
//! link extraction and robots.txt retrieval are collaborators provided
//! through the [`context::Context`] trait; the queue, the blacklist and
//! the robots cache are owned by a single [`crawl::retrieve_tree`] call.

pub mod blacklist;
pub mod config;
pub mod context;
pub mod crawl;
pub mod extraction;
pub mod fetching;
pub mod queue;
pub mod robots;
pub mod rules;
pub mod url;

#[cfg(test)]
pub(crate) mod test_impls;

pub use crate::config::{CrawlConfig, RecursionDepth, UserAgent};
pub use crate::context::Context;
pub use crate::crawl::{retrieve_tree, CrawlOutcome, RejectReason};
pub use crate::url::CrawlUrl;
