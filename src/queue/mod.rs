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

mod element;

pub use element::UrlQueueElement;

use log::debug;
use std::collections::VecDeque;

/// The FIFO queue of pending crawl work. Items come back out in the
/// exact order they went in; `maxcount` tracks the high-watermark for
/// diagnostics.
#[derive(Debug, Default)]
pub struct UrlQueue {
    elements: VecDeque<UrlQueueElement>,
    maxcount: usize,
}

impl UrlQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, element: UrlQueueElement) {
        self.elements.push_back(element);
        if self.elements.len() > self.maxcount {
            self.maxcount = self.elements.len();
        }
        debug!(
            "Queue count {}, maxcount {}.",
            self.elements.len(),
            self.maxcount
        );
    }

    pub fn dequeue(&mut self) -> Option<UrlQueueElement> {
        let element = self.elements.pop_front()?;
        debug!(
            "Dequeuing {} at depth {}",
            element.url.as_str(),
            element.depth
        );
        debug!(
            "Queue count {}, maxcount {}.",
            self.elements.len(),
            self.maxcount
        );
        Some(element)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The highest number of elements the queue ever held.
    pub fn maxcount(&self) -> usize {
        self.maxcount
    }

    /// Drops all still-pending elements. Used on early termination.
    pub fn clear(&mut self) {
        self.elements.clear();
    }
}
