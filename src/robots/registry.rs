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

use crate::context::{SupportsConfigs, SupportsFileCleanup, SupportsRobotsTxt};
use crate::robots::CachedRobots;
use crate::url::CrawlUrl;
use case_insensitive_string::CaseInsensitiveString;
use log::{info, warn};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use texting_robots::Robot;

/// Per-crawl robots.txt cache, keyed by `(host, port)`.
///
/// The retrieval collaborator is asked at most once per key; whatever
/// comes back (including nothing) is cached so rediscoveries of the
/// same origin never fetch again.
#[derive(Debug, Default)]
pub struct RobotsRegistry {
    cache: HashMap<(CaseInsensitiveString, u16), CachedRobots>,
}

impl RobotsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached entry for the url's origin, retrieving and
    /// parsing it first when this origin was never seen.
    pub fn ensure<C>(&mut self, ctx: &mut C, url: &CrawlUrl) -> &CachedRobots
    where
        C: SupportsConfigs + SupportsRobotsTxt + SupportsFileCleanup,
    {
        let key = (CaseInsensitiveString::from(url.host()), url.port());
        match self.cache.entry(key) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(retrieve_and_parse(ctx, url)),
        }
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

fn retrieve_and_parse<C>(ctx: &mut C, url: &CrawlUrl) -> CachedRobots
where
    C: SupportsConfigs + SupportsRobotsTxt + SupportsFileCleanup,
{
    let Some(retrieved) = ctx.retrieve_robots_txt(url) else {
        // Install a dummy entry so we stop trying to retrieve it.
        return CachedRobots::NoRobots;
    };

    let parsed = match std::fs::read(retrieved.file.as_std_path()) {
        Ok(body) => match Robot::new(ctx.config().user_agent.agent(), &body) {
            Ok(robot) => CachedRobots::HasRobots { robot },
            Err(error) => {
                warn!("Cannot parse {}: {error}", retrieved.file);
                CachedRobots::NoRobots
            }
        },
        Err(error) => {
            warn!("Cannot read {}: {error}", retrieved.file);
            CachedRobots::NoRobots
        }
    };

    let dispose = retrieved.transient || {
        let config = ctx.config();
        config.delete_after || config.spider
    };
    if dispose {
        info!("Removing {}.", retrieved.file);
        if let Err(error) = ctx.unlink(&retrieved.file) {
            warn!("unlink: {error}");
        }
    }

    parsed
}
