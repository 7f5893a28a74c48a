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

use texting_robots::Robot;

/// The cache entry for one `(host, port)` robots.txt.
///
/// A failed retrieval or an unparseable body installs `NoRobots`, a
/// permissive dummy that also suppresses retry fetches.
#[derive(Debug)]
pub enum CachedRobots {
    HasRobots { robot: Robot },
    NoRobots,
}

impl CachedRobots {
    /// Checks if the path is allowed.
    pub fn allowed(&self, path: &str) -> bool {
        match self {
            CachedRobots::HasRobots { robot } => robot.allowed(path),
            CachedRobots::NoRobots => true,
        }
    }
}

#[cfg(test)]
mod test {
    use super::CachedRobots;
    use texting_robots::Robot;

    #[test]
    fn dummy_entry_allows_everything() {
        let cached = CachedRobots::NoRobots;
        assert!(cached.allowed("/private/p"));
        assert!(cached.allowed("/"));
    }

    #[test]
    fn parsed_entry_honors_disallow() {
        let robot = Robot::new("webmirror", b"User-agent: *\nDisallow: /private/\n").unwrap();
        let cached = CachedRobots::HasRobots { robot };
        assert!(!cached.allowed("/private/p"));
        assert!(cached.allowed("/public/p"));
    }
}
