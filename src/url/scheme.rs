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

use strum::Display;

/// The scheme class of a crawl target. The display form is the token
/// written to the rejection log.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Display)]
pub enum Scheme {
    #[strum(serialize = "SCHEME_HTTP")]
    Http,
    #[strum(serialize = "SCHEME_HTTPS")]
    Https,
    #[strum(serialize = "SCHEME_FTP")]
    Ftp,
    #[strum(serialize = "SCHEME_FTPS")]
    Ftps,
    /// Anything this crawler does not know how to recurse into.
    #[strum(serialize = "SCHEME_INVALID")]
    Invalid,
}

impl Scheme {
    pub fn from_url_scheme(scheme: &str) -> Self {
        match scheme {
            "http" => Self::Http,
            "https" => Self::Https,
            "ftp" => Self::Ftp,
            "ftps" => Self::Ftps,
            _ => Self::Invalid,
        }
    }

    /// HTTP and HTTPS are treated as one scheme family by most rules.
    pub fn is_http_like(self) -> bool {
        matches!(self, Self::Http | Self::Https)
    }

    pub fn is_ftp_like(self) -> bool {
        matches!(self, Self::Ftp | Self::Ftps)
    }

    /// Two schemes are similar when they are identical or both HTTP-like.
    pub fn similar_to(self, other: Self) -> bool {
        self == other || (self.is_http_like() && other.is_http_like())
    }
}
