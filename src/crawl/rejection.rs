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

//! The tab-separated audit trail of rejected urls.

use crate::crawl::RejectReason;
use crate::url::CrawlUrl;
use camino::Utf8Path;
use itertools::Itertools;
use log::{debug, warn};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::iter;

/// The characters escaped in the url columns.
const URL_UNSAFE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'<')
    .add(b'>')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'~')
    .add(b'[')
    .add(b']')
    .add(b'`');

const HEADER: &str = "REASON\t\
    U_URL\tU_SCHEME\tU_HOST\tU_PORT\tU_PATH\tU_PARAMS\tU_QUERY\tU_FRAGMENT\t\
    P_URL\tP_SCHEME\tP_HOST\tP_PORT\tP_PATH\tP_PARAMS\tP_QUERY\tP_FRAGMENT";

/// Writer for the rejection audit log.
///
/// With no configured path, or when the path cannot be opened, the
/// writer turns into a silent sink: the crawl proceeds, nothing is
/// written, and the header is never emitted through a failed open.
#[derive(Debug, Default)]
pub struct RejectionLog {
    sink: Option<BufWriter<File>>,
}

impl RejectionLog {
    pub fn open(path: Option<&Utf8Path>) -> Self {
        let Some(path) = path else {
            return Self { sink: None };
        };
        match File::create(path.as_std_path()) {
            Ok(file) => {
                let mut log = Self {
                    sink: Some(BufWriter::new(file)),
                };
                log.write_line(HEADER);
                log
            }
            Err(error) => {
                warn!("{path}: {error}");
                Self { sink: None }
            }
        }
    }

    /// Writes one row for a rejected url and its parent context.
    pub fn log(&mut self, reason: RejectReason, url: &CrawlUrl, parent: &CrawlUrl) {
        if self.sink.is_none() {
            return;
        }
        let row = iter::once(reason.to_string())
            .chain(url_fields(url))
            .chain(url_fields(parent))
            .join("\t");
        self.write_line(&row);
    }

    fn write_line(&mut self, line: &str) {
        if let Some(sink) = &mut self.sink {
            if let Err(error) = writeln!(sink, "{line}") {
                debug!("rejection log write failed: {error}");
            }
        }
    }
}

/// The eight url-shaped columns of one side of a row. Missing optional
/// parts render as the empty string.
fn url_fields(url: &CrawlUrl) -> [String; 8] {
    [
        utf8_percent_encode(url.as_str(), URL_UNSAFE).to_string(),
        url.scheme().to_string(),
        url.host().to_string(),
        url.port().to_string(),
        url.decoded_path(),
        url.params().unwrap_or_default(),
        url.query().unwrap_or_default().to_string(),
        url.fragment().unwrap_or_default().to_string(),
    ]
}
